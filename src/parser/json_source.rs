//! Span dumps produced by an external extractor.
//!
//! The expected shape is
//! `{"pages": [{"number": 1, "lines": [{"spans": [{"text": "..", "size": 12.0, "flags": 16}]}]}]}`.
//! `number` is optional and defaults to the page's position.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{PageSpans, SpanLine};

use super::backend::SpanSource;

/// Top-level document of a span dump.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpanDump {
    /// Pages in document order
    #[serde(default)]
    pub pages: Vec<PageSpans>,
}

/// Span source over pages already held in memory.
#[derive(Debug, Clone, Default)]
pub struct JsonSpanSource {
    pages: Vec<PageSpans>,
}

impl JsonSpanSource {
    /// Wrap pages directly. Unnumbered pages take their 1-based position.
    pub fn from_pages(mut pages: Vec<PageSpans>) -> Self {
        for (idx, page) in pages.iter_mut().enumerate() {
            if page.number == 0 {
                page.number = idx as u32 + 1;
            }
        }
        Self { pages }
    }

    /// Parse a span dump from a string.
    pub fn from_json(json: &str) -> Result<Self> {
        let dump: SpanDump = serde_json::from_str(json)?;
        Ok(Self::from_pages(dump.pages))
    }

    /// Parse a span dump from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dump: SpanDump = serde_json::from_reader(reader)?;
        Ok(Self::from_pages(dump.pages))
    }

    /// Read a span dump file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Pages with their resolved numbers.
    pub fn pages(&self) -> &[PageSpans] {
        &self.pages
    }
}

impl SpanSource for JsonSpanSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_lines(&self, page: u32) -> Result<Vec<SpanLine>> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx as usize))
            .map(|p| p.lines.clone())
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }

    fn page_number(&self, page: u32) -> u32 {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx as usize))
            .map_or(page, |p| p.number)
    }
}
