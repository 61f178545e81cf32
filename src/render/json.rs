//! JSON rendering for classified content.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{ContentElement, ContentKind, DocumentStats, Formatting};
use crate::parser::heading_level;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    stats: &'a DocumentStats,
    elements: Vec<JsonElement<'a>>,
}

#[derive(Serialize)]
struct JsonElement<'a> {
    text: &'a str,
    font_size: f32,
    page: u32,
    formatting: Formatting,
    kind: ContentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<u8>,
}

impl<'a> From<&'a ContentElement> for JsonElement<'a> {
    fn from(element: &'a ContentElement) -> Self {
        Self {
            text: &element.text,
            font_size: element.font_size,
            page: element.page,
            formatting: element.formatting,
            kind: element.kind,
            level: element.is_heading().then(|| heading_level(element)),
        }
    }
}

/// Serialize elements and stats to JSON.
pub fn to_json(elements: &[ContentElement], stats: &DocumentStats, format: JsonFormat) -> Result<String> {
    let doc = JsonDocument {
        stats,
        elements: elements.iter().map(JsonElement::from).collect(),
    };

    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&doc),
        JsonFormat::Compact => serde_json::to_string(&doc),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
