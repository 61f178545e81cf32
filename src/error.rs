//! Error types for the pdf2md library.

use std::io;
use thiserror::Error;

/// Result type alias for pdf2md operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting and converting a document.
///
/// Classification and rendering never fail; every variant here comes from
/// reading the input, decoding span dumps, validating options, or
/// serializing output.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input does not start with a PDF header.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF header names a version we cannot read.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure or a content stream.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// A span dump could not be decoded.
    #[error("Invalid span input: {0}")]
    SpanInput(#[from] serde_json::Error),

    /// A conversion option is outside its valid domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error while producing serialized output.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
