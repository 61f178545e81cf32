//! # pdf2md
//!
//! PDF to Markdown conversion that recovers document structure from font
//! styling.
//!
//! Spans of styled text are joined into lines, each line is labelled as a
//! heading, list item, or paragraph by an ordered rule table, and the
//! result is rendered as Markdown with a statistics preamble.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf2md::to_markdown;
//!
//! fn main() -> pdf2md::Result<()> {
//!     let markdown = to_markdown("document.pdf")?;
//!     println!("{}", markdown);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Structure recovery**: headings (three levels), list items, reflowed paragraphs
//! - **Pluggable extraction**: PDFs through lopdf, or span dumps from any extractor as JSON
//! - **Pre-analysis**: flags scanned documents that need OCR
//! - **Parallel batches**: one independent pipeline per file with Rayon

pub mod analyze;
pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analyze::{analyze, DocumentAnalysis, DocumentType};
pub use convert::{convert_batch, convert_batch_with, BatchItem, Conversion, Converter};
pub use error::{Error, Result};
pub use model::{
    ContentElement, ContentKind, DocumentStats, Formatting, PageSpans, RawSpan, Span, SpanLine,
};
pub use parser::{Classifier, ConvertOptions, JsonSpanSource, LopdfSource, Rule, SpanSource};
pub use render::{JsonFormat, RenderResult, ERROR_NOTICE};

use std::path::Path;

/// Convert a file (PDF, or `.json` span dump) with default options.
///
/// # Example
///
/// ```no_run
/// use pdf2md::convert_file;
///
/// let conversion = convert_file("document.pdf").unwrap();
/// println!("Headings: {}", conversion.stats.headings_detected);
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<Conversion> {
    Converter::new(ConvertOptions::default())?.convert_file(path)
}

/// Convert a PDF held in memory.
///
/// # Example
///
/// ```no_run
/// use pdf2md::{convert_bytes, ConvertOptions};
///
/// let data = std::fs::read("document.pdf").unwrap();
/// let conversion = convert_bytes(&data, &ConvertOptions::default()).unwrap();
/// ```
pub fn convert_bytes(data: &[u8], options: &ConvertOptions) -> Result<Conversion> {
    let source = LopdfSource::from_bytes(data)?;
    Converter::new(options.clone())?.convert(&source)
}

/// Convert spans already in memory.
pub fn convert_pages(pages: &[PageSpans], options: &ConvertOptions) -> Result<Conversion> {
    Ok(Converter::new(options.clone())?.convert_pages(pages))
}

/// Convert a PDF to Markdown.
///
/// # Example
///
/// ```no_run
/// use pdf2md::to_markdown;
///
/// let markdown = to_markdown("document.pdf").unwrap();
/// std::fs::write("document.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(convert_file(path)?.to_markdown())
}

/// Convert a PDF to Markdown with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf2md::{to_markdown_with_options, ConvertOptions};
///
/// let options = ConvertOptions::new().with_heading_threshold(16.0);
/// let markdown = to_markdown_with_options("document.pdf", &options).unwrap();
/// ```
pub fn to_markdown_with_options<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<String> {
    let converter = Converter::new(options.clone())?;
    Ok(converter.convert_file(path)?.to_markdown())
}

/// Convert a PDF to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    convert_file(path)?.to_json(format)
}
