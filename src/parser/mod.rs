//! Span extraction and structure recognition.
//!
//! Sources produce span lines, the assembler turns each visual line into one
//! text line, and the classifier labels it.

pub mod assembler;
pub mod backend;
pub mod classifier;
pub mod content;
pub mod heading;
pub mod json_source;
pub mod options;

pub use assembler::{assemble_line, assemble_page};
pub use backend::{check_pdf_header, decode_text_simple, LopdfSource, SpanSource};
pub use classifier::{
    list_marker_len, strip_list_marker, Candidate, Classifier, Rule, DEFAULT_RULES,
    LIST_MARKER_PATTERNS,
};
pub use heading::{heading_level, resolve_level, MAX_HEADING_LEVEL};
pub use json_source::{JsonSpanSource, SpanDump};
pub use options::{ConvertOptions, DEFAULT_HEADING_FONT_THRESHOLD, DEFAULT_LINE_SPACING_THRESHOLD};
