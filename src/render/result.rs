//! Rendering result with statistics.

use serde::{Deserialize, Serialize};

use crate::model::DocumentStats;

use super::markdown::ERROR_NOTICE;

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered Markdown
    pub content: String,

    /// Statistics snapshot shown in the preamble
    pub stats: DocumentStats,

    /// Number of content elements rendered
    pub element_count: usize,

    /// Byte offset where the body starts (after the preamble)
    pub body_offset: usize,

    /// Number of output lines
    pub lines: usize,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(
        content: String,
        stats: DocumentStats,
        element_count: usize,
        body_offset: usize,
        lines: usize,
    ) -> Self {
        Self {
            content,
            stats,
            element_count,
            body_offset,
            lines,
        }
    }

    /// The fixed notice produced when nothing could be extracted.
    pub fn error_notice(stats: DocumentStats) -> Self {
        Self::new(
            ERROR_NOTICE.to_string(),
            stats,
            0,
            0,
            ERROR_NOTICE.lines().count(),
        )
    }

    /// Body text without the preamble.
    pub fn body(&self) -> &str {
        &self.content[self.body_offset..]
    }

    /// Check if this is the no-content notice.
    pub fn is_error_notice(&self) -> bool {
        self.element_count == 0 && self.content == ERROR_NOTICE
    }

    /// Get the number of output lines.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Get the content length in characters.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_notice_result() {
        let result = RenderResult::error_notice(DocumentStats::new());
        assert!(result.is_error_notice());
        assert_eq!(result.body(), ERROR_NOTICE);
        assert_eq!(result.line_count(), 3);
    }

    #[test]
    fn test_body_slices_after_offset() {
        let result = RenderResult::new("# H\n\nbody\n".to_string(), DocumentStats::new(), 1, 5, 3);
        assert_eq!(result.body(), "body\n");
        assert_eq!(result.content_len(), 10);
        assert!(!result.is_error_notice());
    }
}
