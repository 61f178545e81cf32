//! Document pre-analysis.
//!
//! Samples the first pages of a source to estimate whether the document
//! carries a real text layer or is mostly scanned images.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parser::SpanSource;

/// Pages sampled from the start of the document.
pub const SAMPLE_PAGES: u32 = 3;

/// Average characters per page above which a document is text-rich.
pub const TEXT_RICH_CHARS: f64 = 200.0;

/// Average characters per page above which a document has usable text.
pub const TEXT_SPARSE_CHARS: f64 = 50.0;

/// Estimated document type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Plenty of extractable text
    TextRich,
    /// Some text, likely mixed with images or forms
    TextSparse,
    /// Little or no text layer; OCR needed
    ImageBased,
}

impl DocumentType {
    /// Classify by average characters per sampled page.
    pub fn from_density(avg_chars_per_page: f64) -> Self {
        if avg_chars_per_page > TEXT_RICH_CHARS {
            DocumentType::TextRich
        } else if avg_chars_per_page > TEXT_SPARSE_CHARS {
            DocumentType::TextSparse
        } else {
            DocumentType::ImageBased
        }
    }

    /// Get the snake_case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::TextRich => "text_rich",
            DocumentType::TextSparse => "text_sparse",
            DocumentType::ImageBased => "image_based",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What sampling the first pages revealed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    /// Pages in the document
    pub total_pages: u32,
    /// Pages actually sampled
    pub sampled_pages: u32,
    /// Characters of trimmed, non-empty span text across sampled pages
    pub total_chars: usize,
    /// `total_chars / sampled_pages`, zero when nothing was sampled
    pub avg_chars_per_page: f64,
    /// Distinct font sizes seen, in tenths of a point
    pub font_sizes: BTreeSet<u32>,
    /// Average above the sparse threshold
    pub has_text_content: bool,
    /// Estimated type
    pub estimated_type: DocumentType,
}

impl DocumentAnalysis {
    /// Font sizes in points, ascending.
    pub fn font_sizes_pt(&self) -> Vec<f32> {
        self.font_sizes.iter().map(|&t| t as f32 / 10.0).collect()
    }

    /// Check if the document looks scanned.
    pub fn is_image_based(&self) -> bool {
        self.estimated_type == DocumentType::ImageBased
    }
}

/// Sample up to [`SAMPLE_PAGES`] leading pages of `source`.
pub fn analyze(source: &dyn SpanSource) -> Result<DocumentAnalysis> {
    let total_pages = source.page_count();
    let sampled_pages = total_pages.min(SAMPLE_PAGES);
    log::debug!(
        "Analyzing {} sample pages from {} total pages",
        sampled_pages,
        total_pages
    );

    let mut total_chars = 0usize;
    let mut font_sizes = BTreeSet::new();

    for page in 1..=sampled_pages {
        for line in source.page_lines(page)? {
            for span in &line.spans {
                let text = span.text.trim();
                if text.is_empty() {
                    continue;
                }
                total_chars += text.chars().count();
                if span.font_size.is_finite() && span.font_size >= 0.0 {
                    font_sizes.insert((span.font_size * 10.0).round() as u32);
                }
            }
        }
    }

    let avg_chars_per_page = if sampled_pages > 0 {
        total_chars as f64 / sampled_pages as f64
    } else {
        0.0
    };

    Ok(DocumentAnalysis {
        total_pages,
        sampled_pages,
        total_chars,
        avg_chars_per_page,
        font_sizes,
        has_text_content: avg_chars_per_page > TEXT_SPARSE_CHARS,
        estimated_type: DocumentType::from_density(avg_chars_per_page),
    })
}
