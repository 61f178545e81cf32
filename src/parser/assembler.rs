//! Line assembly: spans of one visual line become one content line.

use unicode_normalization::UnicodeNormalization;

use crate::model::{AssembledLine, DocumentStats, Formatting, Span, SpanLine};

/// Join one line's spans.
///
/// Span texts are trimmed and joined with single spaces; spans with no text
/// contribute neither size nor style. The font size is the arithmetic mean
/// over contributing spans and each style flag is set if any contributing
/// span sets it. Returns `None` when nothing visible remains.
pub fn assemble_line(spans: &[Span]) -> Option<AssembledLine> {
    let mut parts: Vec<&str> = Vec::with_capacity(spans.len());
    let mut size_sum = 0.0f32;
    let mut formatting = Formatting::default();
    let mut page = spans.first().map(|s| s.page).unwrap_or(1);

    for span in spans {
        let text = span.text.trim();
        if text.is_empty() {
            continue;
        }
        if parts.is_empty() {
            page = span.page;
        }
        parts.push(text);
        size_sum += span.font_size;
        formatting.bold |= span.bold;
        formatting.italic |= span.italic;
    }

    let text = normalize_text(&parts.join(" "));
    if text.is_empty() {
        return None;
    }

    Some(AssembledLine {
        text,
        font_size: size_sum / parts.len() as f32,
        page,
        formatting,
    })
}

/// Assemble every line of a page, counting each emitted line.
pub fn assemble_page(
    page: u32,
    lines: &[SpanLine],
    stats: &mut DocumentStats,
) -> Vec<AssembledLine> {
    let mut assembled = Vec::with_capacity(lines.len());
    for line in lines {
        let spans: Vec<Span> = line
            .spans
            .iter()
            .map(|raw| Span::from_raw(raw, page))
            .collect();
        if let Some(line) = assemble_line(&spans) {
            stats.add_text_block();
            assembled.push(line);
        }
    }
    assembled
}

/// NFC-compose and collapse whitespace runs to single spaces.
fn normalize_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawSpan, FLAG_BOLD, FLAG_ITALIC};

    #[test]
    fn test_assemble_joins_and_averages() {
        let spans = vec![
            Span::new(" Hello ", 12.0, 1),
            Span::new("world", 14.0, 1).bold(),
        ];
        let line = assemble_line(&spans).unwrap();
        assert_eq!(line.text, "Hello world");
        assert_eq!(line.font_size, 13.0);
        assert!(line.formatting.bold);
        assert!(!line.formatting.italic);
    }

    #[test]
    fn test_empty_spans_do_not_contribute() {
        let spans = vec![
            Span::new("   ", 40.0, 1).italic(),
            Span::new("Body", 10.0, 1),
        ];
        let line = assemble_line(&spans).unwrap();
        assert_eq!(line.font_size, 10.0);
        assert!(!line.formatting.italic);
    }

    #[test]
    fn test_blank_line_dropped() {
        assert!(assemble_line(&[]).is_none());
        assert!(assemble_line(&[Span::new(" \t ", 12.0, 1)]).is_none());
    }

    #[test]
    fn test_internal_whitespace_collapsed() {
        let line = assemble_line(&[Span::new("a   b\t\tc", 12.0, 1)]).unwrap();
        assert_eq!(line.text, "a b c");
    }

    #[test]
    fn test_assemble_page_counts_only_emitted() {
        let lines = vec![
            SpanLine::new(vec![RawSpan::new("Intro", 18.0).with_flags(FLAG_BOLD)]),
            SpanLine::new(vec![RawSpan::new("", 12.0)]),
            SpanLine::default(),
            SpanLine::new(vec![RawSpan::new("text", 12.0).with_flags(FLAG_ITALIC)]),
        ];
        let mut stats = DocumentStats::new();
        let assembled = assemble_page(4, &lines, &mut stats);

        assert_eq!(assembled.len(), 2);
        assert_eq!(stats.text_blocks_found, 2);
        assert_eq!(assembled[0].page, 4);
        assert!(assembled[0].formatting.bold);
        assert!(assembled[1].formatting.italic);
    }

    #[test]
    fn test_missing_size_defaults_to_twelve() {
        let raw: RawSpan = serde_json::from_str(r#"{"text": "x"}"#).unwrap();
        let mut stats = DocumentStats::new();
        let assembled = assemble_page(1, &[SpanLine::new(vec![raw])], &mut stats);
        assert_eq!(assembled[0].font_size, 12.0);
    }
}
