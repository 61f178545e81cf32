//! Rendering module for converting classified content to output formats.

mod json;
mod markdown;
mod paragraph;
mod result;

pub use json::{to_json, JsonFormat};
pub use markdown::{
    render_markdown, to_markdown, AccumulatorState, MarkdownRenderer, ParagraphAccumulator,
    ERROR_NOTICE,
};
pub use paragraph::{format_paragraph, paragraph_blocks, LONG_PARAGRAPH_CHARS};
pub use result::RenderResult;
