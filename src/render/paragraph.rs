//! Paragraph reflow.

use std::sync::OnceLock;

use regex::Regex;

/// Paragraphs longer than this many characters are split in two.
pub const LONG_PARAGRAPH_CHARS: usize = 800;

/// Fewer sentence fragments than this are never split.
const MIN_SPLIT_FRAGMENTS: usize = 3;

fn sentence_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"[.!?]+\s+").unwrap())
}

/// Collapse whitespace and split an overlong paragraph into blocks.
///
/// Returns one block, or two when the text exceeds [`LONG_PARAGRAPH_CHARS`]
/// and has at least three sentence fragments. The split falls on the
/// sentence boundary at the fragment-count midpoint; the boundary's
/// punctuation stays with the first block and its whitespace is dropped.
pub fn paragraph_blocks(text: &str) -> Vec<String> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= LONG_PARAGRAPH_CHARS {
        return vec![text];
    }

    let boundaries: Vec<_> = sentence_boundary().find_iter(&text).collect();
    let fragments = boundaries.len() + 1;
    if fragments < MIN_SPLIT_FRAGMENTS {
        return vec![text];
    }

    let cut = boundaries[fragments / 2 - 1];
    let punct_end = cut.start() + cut.as_str().trim_end().len();
    vec![text[..punct_end].to_string(), text[cut.end()..].to_string()]
}

/// Reflow a paragraph to its final text, blocks separated by a blank line.
pub fn format_paragraph(text: &str) -> String {
    paragraph_blocks(text).join("\n\n")
}
