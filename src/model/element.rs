//! Content elements: one classified visual line each.

use serde::{Deserialize, Serialize};

/// Structural label of a content element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// A section heading
    Heading,
    /// A bulleted, numbered, lettered, or roman-numbered item
    ListItem,
    /// Running body text
    Paragraph,
}

impl ContentKind {
    /// Label used in logs and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Heading => "heading",
            ContentKind::ListItem => "list_item",
            ContentKind::Paragraph => "paragraph",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Style flags aggregated over a line's spans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatting {
    /// Any span on the line is bold
    pub bold: bool,

    /// Any span on the line is italic
    pub italic: bool,
}

/// A visual line after span joining, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledLine {
    /// Trimmed, whitespace-normalized text (never empty)
    pub text: String,

    /// Mean font size of the contributing spans
    pub font_size: f32,

    /// Page number (1-indexed)
    pub page: u32,

    /// Aggregated style flags
    pub formatting: Formatting,
}

impl AssembledLine {
    /// Attach a label, producing the final element.
    pub fn into_element(self, kind: ContentKind) -> ContentElement {
        ContentElement {
            text: self.text,
            font_size: self.font_size,
            page: self.page,
            formatting: self.formatting,
            kind,
        }
    }
}

/// A classified visual line, the unit the renderer consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentElement {
    /// Trimmed, whitespace-normalized text (never empty)
    pub text: String,

    /// Mean font size of the contributing spans
    pub font_size: f32,

    /// Page number (1-indexed)
    pub page: u32,

    /// Aggregated style flags
    pub formatting: Formatting,

    /// Structural label
    pub kind: ContentKind,
}

impl ContentElement {
    /// Create an element directly, bypassing assembly.
    pub fn new(text: impl Into<String>, font_size: f32, kind: ContentKind) -> Self {
        Self {
            text: text.into(),
            font_size,
            page: 1,
            formatting: Formatting::default(),
            kind,
        }
    }

    /// Create a paragraph element at body size.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(text, 12.0, ContentKind::Paragraph)
    }

    /// Create a heading element with the given font size.
    pub fn heading(text: impl Into<String>, font_size: f32) -> Self {
        Self::new(text, font_size, ContentKind::Heading)
    }

    /// Create a list item element at body size.
    pub fn list_item(text: impl Into<String>) -> Self {
        Self::new(text, 12.0, ContentKind::ListItem)
    }

    /// Set the page number.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.kind == ContentKind::Heading
    }

    /// Check if this is a list item.
    pub fn is_list_item(&self) -> bool {
        self.kind == ContentKind::ListItem
    }

    /// Check if this is a paragraph line.
    pub fn is_paragraph(&self) -> bool {
        self.kind == ContentKind::Paragraph
    }
}
