//! Per-conversion counters.

use serde::{Deserialize, Serialize};

use super::ContentKind;

/// Counters for a single conversion run.
///
/// A fresh instance belongs to each conversion; it is mutated while pages are
/// assembled and classified and only read once rendering starts. Every
/// emitted element lands in exactly one of the three kind buckets, so
/// `headings_detected + paragraphs_created + list_items_found` always equals
/// `text_blocks_found`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Pages visited, including pages without text
    pub pages_processed: u32,

    /// Non-empty lines turned into content elements
    pub text_blocks_found: u32,

    /// Elements classified as headings
    pub headings_detected: u32,

    /// Elements classified as paragraph lines
    pub paragraphs_created: u32,

    /// Elements classified as list items
    pub list_items_found: u32,
}

impl DocumentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment page count.
    pub fn add_page(&mut self) {
        self.pages_processed += 1;
    }

    /// Increment the emitted-element count.
    pub fn add_text_block(&mut self) {
        self.text_blocks_found += 1;
    }

    /// Increment the bucket for `kind`.
    pub fn record(&mut self, kind: ContentKind) {
        match kind {
            ContentKind::Heading => self.headings_detected += 1,
            ContentKind::ListItem => self.list_items_found += 1,
            ContentKind::Paragraph => self.paragraphs_created += 1,
        }
    }

    /// Sum of the three kind buckets.
    pub fn classified_total(&self) -> u32 {
        self.headings_detected + self.paragraphs_created + self.list_items_found
    }

    /// Check that every emitted element was counted exactly once.
    pub fn is_consistent(&self) -> bool {
        self.classified_total() == self.text_blocks_found
    }

    /// Labelled counters in display order.
    pub fn entries(&self) -> [(&'static str, u32); 5] {
        [
            ("Pages Processed", self.pages_processed),
            ("Text Blocks Found", self.text_blocks_found),
            ("Headings Detected", self.headings_detected),
            ("Paragraphs Created", self.paragraphs_created),
            ("List Items Found", self.list_items_found),
        ]
    }
}
