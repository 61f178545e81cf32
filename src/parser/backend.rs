//! Span source abstraction layer.
//!
//! The pipeline only ever sees pages of span lines. Where they come from
//! (a PDF parsed with lopdf, a JSON span dump, an in-memory fixture) stays
//! behind [`SpanSource`].

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Dictionary, Document as LopdfDocument, ObjectId};

use crate::error::{Error, Result};
use crate::model::SpanLine;

use super::content::{group_into_lines, walk_operations};

/// Anything that yields styled text spans page by page.
pub trait SpanSource {
    /// Number of pages, numbered `1..=page_count()`.
    fn page_count(&self) -> u32;

    /// Visual lines of one page in reading order.
    fn page_lines(&self, page: u32) -> Result<Vec<SpanLine>>;

    /// Page number reported on elements from `page`. Defaults to its position.
    fn page_number(&self, page: u32) -> u32 {
        page
    }
}

/// Highest PDF major version the reader accepts.
const MAX_MAJOR_VERSION: u32 = 2;

/// Read and check the `%PDF-x.y` header, returning the version string.
pub fn check_pdf_header(data: &[u8]) -> Result<String> {
    if data.len() < 8 || !data.starts_with(b"%PDF-") {
        return Err(Error::UnknownFormat);
    }

    let version: String = data[5..]
        .iter()
        .take_while(|b| b.is_ascii_digit() || **b == b'.')
        .map(|&b| b as char)
        .collect();

    let mut parts = version.split('.');
    let major = parts.next().and_then(|s| s.parse::<u32>().ok());
    let minor = parts.next().and_then(|s| s.parse::<u32>().ok());
    match (major, minor) {
        (Some(major), Some(_)) if (1..=MAX_MAJOR_VERSION).contains(&major) => Ok(version),
        (Some(_), Some(_)) => Err(Error::UnsupportedVersion(version)),
        _ => Err(Error::UnknownFormat),
    }
}

/// Span source backed by a PDF parsed with lopdf.
pub struct LopdfSource {
    doc: LopdfDocument,
    pages: BTreeMap<u32, ObjectId>,
    version: String,
}

impl LopdfSource {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    /// Parse a PDF from memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let version = check_pdf_header(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let pages = doc.get_pages();
        log::debug!("Loaded PDF {} with {} pages", version, pages.len());

        Ok(Self {
            doc,
            pages,
            version,
        })
    }

    /// Version from the file header (e.g., "1.7").
    pub fn version(&self) -> &str {
        &self.version
    }

    fn page_id(&self, page: u32) -> Result<ObjectId> {
        self.pages
            .get(&page)
            .copied()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    fn decode_text(&self, font: Option<&Dictionary>, bytes: &[u8]) -> String {
        if let Some(font) = font {
            if let Ok(enc) = font.get_font_encoding(&self.doc) {
                if let Ok(decoded) = LopdfDocument::decode_text(&enc, bytes) {
                    return decoded;
                }
            }
        }
        decode_text_simple(bytes)
    }
}

/// Base font name per font resource, falling back to the resource name.
fn base_font_names(fonts: &BTreeMap<Vec<u8>, &Dictionary>) -> HashMap<Vec<u8>, String> {
    fonts
        .iter()
        .map(|(name, font)| {
            let base_font = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).into_owned())
                .unwrap_or_else(|| String::from_utf8_lossy(name).into_owned());
            (name.clone(), base_font)
        })
        .collect()
}

impl SpanSource for LopdfSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_lines(&self, page: u32) -> Result<Vec<SpanLine>> {
        let page_id = self.page_id(page)?;

        let has_contents = self
            .doc
            .get_dictionary(page_id)
            .map(|dict| dict.has(b"Contents"))
            .unwrap_or(false);
        if !has_contents {
            return Ok(Vec::new());
        }

        let data = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::PdfParse(format!("Failed to read page {} content: {}", page, e)))?;
        let content = Content::decode(&data)
            .map_err(|e| Error::PdfParse(format!("Failed to decode page {} content: {}", page, e)))?;

        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(format!("Failed to get fonts: {}", e)))?;
        let base_fonts = base_font_names(&fonts);
        let spans = walk_operations(&content.operations, &base_fonts, |font_key, bytes| {
            self.decode_text(fonts.get(font_key).copied(), bytes)
        });

        Ok(group_into_lines(spans))
    }
}

/// Decoding fallback when a font has no usable encoding.
///
/// Tries UTF-16BE (with BOM), then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}
