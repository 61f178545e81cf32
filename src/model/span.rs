//! Span-level types supplied by an extraction backend.

use serde::{Deserialize, Deserializer, Serialize};

/// Font size assumed when a backend does not report one.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Bit set in [`RawSpan::flags`] for italic text.
pub const FLAG_ITALIC: u32 = 1 << 1;

/// Bit set in [`RawSpan::flags`] for bold text.
pub const FLAG_BOLD: u32 = 1 << 4;

fn default_font_size() -> f32 {
    DEFAULT_FONT_SIZE
}

fn font_size_or_default<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f32>::deserialize(deserializer)?.unwrap_or(DEFAULT_FONT_SIZE))
}

/// A span as it arrives from an extractor, before decoding.
///
/// Every field is optional on the wire: missing text is empty, a missing
/// size falls back to [`DEFAULT_FONT_SIZE`], and missing flags mean plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    /// The text content
    #[serde(default)]
    pub text: String,

    /// Font size in points
    #[serde(
        default = "default_font_size",
        alias = "size",
        deserialize_with = "font_size_or_default"
    )]
    pub font_size: f32,

    /// Style bit set (see [`FLAG_BOLD`] and [`FLAG_ITALIC`])
    #[serde(default)]
    pub flags: u32,
}

impl RawSpan {
    /// Create a plain span.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            flags: 0,
        }
    }

    /// Set the style flags.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }
}

/// One run of text with uniform font styling on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    /// The text content
    pub text: String,

    /// Font size in points
    pub font_size: f32,

    /// Whether the span is bold
    pub bold: bool,

    /// Whether the span is italic
    pub italic: bool,

    /// Page number (1-indexed)
    pub page: u32,
}

impl Span {
    /// Create a plain span.
    pub fn new(text: impl Into<String>, font_size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            italic: false,
            page,
        }
    }

    /// Decode a wire span found on `page`.
    pub fn from_raw(raw: &RawSpan, page: u32) -> Self {
        let font_size = if raw.font_size.is_finite() {
            raw.font_size
        } else {
            DEFAULT_FONT_SIZE
        };
        Self {
            text: raw.text.clone(),
            font_size,
            bold: raw.flags & FLAG_BOLD != 0,
            italic: raw.flags & FLAG_ITALIC != 0,
            page,
        }
    }

    /// Mark the span bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Mark the span italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

/// One visual line as grouped by the extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanLine {
    /// Spans in reading order
    #[serde(default)]
    pub spans: Vec<RawSpan>,
}

impl SpanLine {
    /// Create a line from spans.
    pub fn new(spans: Vec<RawSpan>) -> Self {
        Self { spans }
    }

    /// Check if the line carries no visible text.
    pub fn is_blank(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }
}

/// All lines of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSpans {
    /// Page number (1-indexed). Zero means "use the position in the document".
    #[serde(default)]
    pub number: u32,

    /// Lines in reading order
    #[serde(default)]
    pub lines: Vec<SpanLine>,
}

impl PageSpans {
    /// Create a page.
    pub fn new(number: u32, lines: Vec<SpanLine>) -> Self {
        Self { number, lines }
    }
}
