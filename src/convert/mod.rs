//! Conversion pipeline.
//!
//! A [`Converter`] drives one document from span source to classified
//! elements: optional pre-analysis, then per page assembly and
//! classification, counting into a [`DocumentStats`] owned by that call.
//!
//! # Example
//!
//! ```no_run
//! use pdf2md::convert::Converter;
//! use pdf2md::ConvertOptions;
//!
//! fn main() -> pdf2md::Result<()> {
//!     let converter = Converter::new(ConvertOptions::default())?;
//!     let conversion = converter.convert_file("document.pdf")?;
//!     println!("{}", conversion.to_markdown());
//!     Ok(())
//! }
//! ```

mod batch;

pub use batch::{convert_batch, convert_batch_with, BatchItem};

use std::path::Path;

use log::Level;

use crate::analyze::{analyze, DocumentAnalysis};
use crate::error::Result;
use crate::model::{ContentElement, DocumentStats, PageSpans, SpanLine};
use crate::parser::{
    assemble_page, Classifier, ConvertOptions, JsonSpanSource, LopdfSource, SpanSource,
};
use crate::render::{render_markdown, to_json, JsonFormat, RenderResult};

/// Result of converting one document.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Classified elements in reading order
    pub elements: Vec<ContentElement>,

    /// Counters for this run
    pub stats: DocumentStats,

    /// Pre-analysis, when enabled
    pub analysis: Option<DocumentAnalysis>,
}

impl Conversion {
    /// Render to Markdown with bookkeeping.
    pub fn render(&self) -> RenderResult {
        render_markdown(&self.elements, &self.stats)
    }

    /// Render to Markdown text.
    pub fn to_markdown(&self) -> String {
        self.render().content
    }

    /// Serialize elements and stats to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        to_json(&self.elements, &self.stats, format)
    }

    /// Check if no content was extracted.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Document converter.
///
/// Holds only options, so one converter can be reused for any number of
/// sequential conversions.
#[derive(Debug, Clone)]
pub struct Converter {
    options: ConvertOptions,
    classifier: Classifier,
}

impl Converter {
    /// Create a converter after validating `options`.
    pub fn new(options: ConvertOptions) -> Result<Self> {
        options.validate()?;
        let classifier = Classifier::new(options.heading_font_threshold);
        Ok(Self {
            options,
            classifier,
        })
    }

    /// Replace the classifier (e.g., one with extra rules).
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Options in effect.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Open a file and convert it.
    ///
    /// `.json` files are read as span dumps; anything else as PDF.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<Conversion> {
        let path = path.as_ref();
        self.stage(format_args!("Processing {}", path.display()));

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            self.convert(&JsonSpanSource::open(path)?)
        } else {
            self.convert(&LopdfSource::open(path)?)
        }
    }

    /// Convert everything a source yields.
    ///
    /// Any page failing to extract aborts the run.
    pub fn convert(&self, source: &dyn SpanSource) -> Result<Conversion> {
        let analysis = if self.options.analyze {
            Some(self.run_analysis(source)?)
        } else {
            None
        };

        let mut stats = DocumentStats::new();
        let mut elements = Vec::new();
        for page in 1..=source.page_count() {
            let lines = source.page_lines(page)?;
            self.process_page(source.page_number(page), &lines, &mut stats, &mut elements);
        }

        Ok(self.finish(elements, stats, analysis))
    }

    /// Convert pages already in memory. Unnumbered pages take their position.
    pub fn convert_pages(&self, pages: &[PageSpans]) -> Conversion {
        let mut stats = DocumentStats::new();
        let mut elements = Vec::new();
        for (idx, page) in pages.iter().enumerate() {
            let number = if page.number == 0 {
                idx as u32 + 1
            } else {
                page.number
            };
            self.process_page(number, &page.lines, &mut stats, &mut elements);
        }

        self.finish(elements, stats, None)
    }

    fn run_analysis(&self, source: &dyn SpanSource) -> Result<DocumentAnalysis> {
        let analysis = analyze(source)?;
        self.stage(format_args!(
            "Analysis: {} pages, {:.1} chars/page, {} font sizes, type {}",
            analysis.total_pages,
            analysis.avg_chars_per_page,
            analysis.font_sizes.len(),
            analysis.estimated_type
        ));
        if analysis.is_image_based() {
            log::warn!(
                "Document appears to be scanned or image-based ({:.1} chars/page); \
                 text extraction may be limited, consider OCR",
                analysis.avg_chars_per_page
            );
        }
        Ok(analysis)
    }

    fn process_page(
        &self,
        page: u32,
        lines: &[SpanLine],
        stats: &mut DocumentStats,
        elements: &mut Vec<ContentElement>,
    ) {
        stats.add_page();
        let assembled = assemble_page(page, lines, stats);
        self.stage(format_args!(
            "Page {}: {} lines, {} text blocks",
            page,
            lines.len(),
            assembled.len()
        ));
        elements.extend(
            assembled
                .into_iter()
                .map(|line| self.classifier.classify_line(line, stats)),
        );
    }

    fn finish(
        &self,
        elements: Vec<ContentElement>,
        stats: DocumentStats,
        analysis: Option<DocumentAnalysis>,
    ) -> Conversion {
        self.stage(format_args!(
            "Classified {} elements: {} headings, {} paragraphs, {} list items",
            elements.len(),
            stats.headings_detected,
            stats.paragraphs_created,
            stats.list_items_found
        ));
        Conversion {
            elements,
            stats,
            analysis,
        }
    }

    fn stage(&self, message: std::fmt::Arguments<'_>) {
        let level = if self.options.verbose {
            Level::Info
        } else {
            Level::Debug
        };
        log::log!(level, "{}", message);
    }
}
