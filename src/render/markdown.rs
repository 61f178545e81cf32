//! Markdown rendering for classified content.
//!
//! Paragraph lines are held back until a heading, a list item, or the end
//! of input forces them out as one reflowed block. The buffering is an
//! explicit two-state machine, see [`ParagraphAccumulator`].

use crate::model::{ContentElement, ContentKind, DocumentStats};
use crate::parser::{heading_level, strip_list_marker};

use super::paragraph::paragraph_blocks;
use super::RenderResult;

/// Output for a conversion that produced no content elements.
pub const ERROR_NOTICE: &str = "# Conversion Error\n\nNo content could be extracted from the PDF.";

/// Title line of the preamble.
const DOCUMENT_TITLE: &str = "# Converted Document";

/// Render elements to Markdown text.
pub fn to_markdown(elements: &[ContentElement], stats: &DocumentStats) -> String {
    render_markdown(elements, stats).content
}

/// Render elements to Markdown with line and offset bookkeeping.
pub fn render_markdown(elements: &[ContentElement], stats: &DocumentStats) -> RenderResult {
    MarkdownRenderer::new(*stats).render(elements)
}

/// Buffering state of the paragraph accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AccumulatorState {
    /// No paragraph text held
    #[default]
    Idle,
    /// Paragraph lines held in arrival order, pending a flush
    Buffering(Vec<String>),
}

/// Holds consecutive paragraph lines until something interrupts them.
#[derive(Debug, Clone, Default)]
pub struct ParagraphAccumulator {
    state: AccumulatorState,
}

impl ParagraphAccumulator {
    /// Create an idle accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &AccumulatorState {
        &self.state
    }

    /// Check if paragraph text is pending.
    pub fn is_buffering(&self) -> bool {
        matches!(self.state, AccumulatorState::Buffering(_))
    }

    /// Append a paragraph line.
    pub fn push(&mut self, text: &str) {
        match &mut self.state {
            AccumulatorState::Buffering(lines) => lines.push(text.to_string()),
            AccumulatorState::Idle => {
                self.state = AccumulatorState::Buffering(vec![text.to_string()]);
            }
        }
    }

    /// Take the pending lines joined by single spaces, returning to idle.
    pub fn flush(&mut self) -> Option<String> {
        match std::mem::take(&mut self.state) {
            AccumulatorState::Buffering(lines) => Some(lines.join(" ")),
            AccumulatorState::Idle => None,
        }
    }
}

/// Markdown renderer.
pub struct MarkdownRenderer {
    stats: DocumentStats,
    lines: Vec<String>,
    paragraph: ParagraphAccumulator,
}

impl MarkdownRenderer {
    /// Create a renderer whose preamble reports `stats`.
    pub fn new(stats: DocumentStats) -> Self {
        Self {
            stats,
            lines: Vec::new(),
            paragraph: ParagraphAccumulator::new(),
        }
    }

    /// Render all elements.
    ///
    /// An empty sequence yields exactly [`ERROR_NOTICE`] with no preamble.
    pub fn render(mut self, elements: &[ContentElement]) -> RenderResult {
        if elements.is_empty() {
            return RenderResult::error_notice(self.stats);
        }

        log::debug!("Generating Markdown from {} content elements", elements.len());

        self.push_preamble(elements.len());
        let body_offset: usize = self.lines.iter().map(|l| l.len() + 1).sum();

        for element in elements {
            self.render_element(element);
        }
        self.flush_paragraph();

        let mut content = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            content.push_str(line);
            content.push('\n');
        }

        log::debug!(
            "Markdown generation complete: {} characters, {} lines",
            content.chars().count(),
            self.lines.len()
        );

        RenderResult::new(content, self.stats, elements.len(), body_offset, self.lines.len())
    }

    fn push_preamble(&mut self, element_count: usize) {
        self.lines.push(DOCUMENT_TITLE.to_string());
        self.lines.push(String::new());
        self.lines.push("**Conversion Statistics:**".to_string());
        self.lines.push(format!("- Pages processed: {}", self.stats.pages_processed));
        self.lines.push(format!("- Content elements: {}", element_count));
        self.lines.push(format!("- Headings detected: {}", self.stats.headings_detected));
        self.lines.push(format!("- Paragraphs created: {}", self.stats.paragraphs_created));
        self.lines.push(format!("- List items found: {}", self.stats.list_items_found));
        self.lines.push(String::new());
        self.lines.push("---".to_string());
        self.lines.push(String::new());
    }

    fn render_element(&mut self, element: &ContentElement) {
        match element.kind {
            ContentKind::Paragraph => self.paragraph.push(&element.text),
            ContentKind::Heading => {
                self.flush_paragraph();
                let level = heading_level(element);
                self.lines
                    .push(format!("{} {}", "#".repeat(level as usize), element.text));
                self.lines.push(String::new());
            }
            ContentKind::ListItem => {
                self.flush_paragraph();
                // No blank line after, so consecutive items stay one list.
                self.lines
                    .push(format!("- {}", strip_list_marker(&element.text)));
            }
        }
    }

    fn flush_paragraph(&mut self) {
        if let Some(text) = self.paragraph.flush() {
            let mut blocks = paragraph_blocks(&text).into_iter();
            if let Some(first) = blocks.next() {
                self.lines.push(first);
            }
            for block in blocks {
                self.lines.push(String::new());
                self.lines.push(block);
            }
            self.lines.push(String::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_for(elements: &[ContentElement]) -> DocumentStats {
        let mut stats = DocumentStats::new();
        stats.add_page();
        for e in elements {
            stats.add_text_block();
            stats.record(e.kind);
        }
        stats
    }

    fn render(elements: &[ContentElement]) -> RenderResult {
        render_markdown(elements, &stats_for(elements))
    }

    #[test]
    fn test_accumulator_transitions() {
        let mut acc = ParagraphAccumulator::new();
        assert_eq!(acc.state(), &AccumulatorState::Idle);
        assert_eq!(acc.flush(), None);

        acc.push("one");
        acc.push("two");
        assert!(acc.is_buffering());
        assert_eq!(acc.flush().as_deref(), Some("one two"));
        assert_eq!(acc.state(), &AccumulatorState::Idle);
    }

    #[test]
    fn test_paragraph_flushed_before_heading() {
        let elements = vec![
            ContentElement::paragraph("A"),
            ContentElement::paragraph("B"),
            ContentElement::heading("C", 24.0),
        ];
        assert_eq!(render(&elements).body(), "A B\n\n# C\n\n");
    }

    #[test]
    fn test_paragraph_flushed_at_end() {
        let elements = vec![
            ContentElement::heading("Intro", 18.0),
            ContentElement::paragraph("tail"),
        ];
        assert_eq!(render(&elements).body(), "## Intro\n\ntail\n\n");
    }

    #[test]
    fn test_list_items_grouped() {
        let elements = vec![
            ContentElement::paragraph("Steps"),
            ContentElement::list_item("1. Introduction"),
            ContentElement::list_item("* Methods"),
            ContentElement::paragraph("after"),
        ];
        assert_eq!(
            render(&elements).body(),
            "Steps\n\n- Introduction\n- Methods\nafter\n\n"
        );
    }

    #[test]
    fn test_empty_input_is_error_notice() {
        let result = render(&[]);
        assert_eq!(result.content, ERROR_NOTICE);
        assert!(result.is_error_notice());
        assert!(!result.content.contains("Converted Document"));
    }

    #[test]
    fn test_preamble_reports_stats() {
        let elements = vec![
            ContentElement::heading("TITLE", 12.0),
            ContentElement::paragraph("body"),
            ContentElement::list_item("- item"),
        ];
        let result = render(&elements);
        let expected = "# Converted Document\n\n**Conversion Statistics:**\n\
            - Pages processed: 1\n- Content elements: 3\n- Headings detected: 1\n\
            - Paragraphs created: 1\n- List items found: 1\n\n---\n\n";
        assert!(result.content.starts_with(expected));
        assert_eq!(&result.content[..result.body_offset], expected);
        assert_eq!(result.element_count, 3);
    }

    #[test]
    fn test_line_count_matches_content() {
        let elements = vec![ContentElement::heading("X", 30.0), ContentElement::paragraph("y")];
        let result = render(&elements);
        assert_eq!(result.line_count(), result.content.lines().count());
    }

    #[test]
    fn test_long_paragraph_rendered_as_two_blocks() {
        let sentence = "Each sentence here is short and plain. ";
        let text = sentence.repeat(25);
        let result = render(&[ContentElement::paragraph(text.trim())]);
        let blocks: Vec<&str> = result.body().trim_end().split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(format!("{} {}", blocks[0], blocks[1]), text.trim());
    }
}
