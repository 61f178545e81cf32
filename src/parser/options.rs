//! Conversion options and configuration.

use crate::error::{Error, Result};

/// Default font size above which a line is a heading.
pub const DEFAULT_HEADING_FONT_THRESHOLD: f32 = 14.0;

/// Default line spacing multiplier for paragraph breaks.
pub const DEFAULT_LINE_SPACING_THRESHOLD: f32 = 1.5;

/// Options for converting a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Lines with a mean font size strictly above this are headings
    pub heading_font_threshold: f32,

    /// Line spacing multiplier reserved for paragraph-break refinement
    pub line_spacing_threshold: f32,

    /// Surface stage diagnostics at `info` instead of `debug`
    pub verbose: bool,

    /// Sample the first pages to estimate the document type before converting
    pub analyze: bool,
}

impl ConvertOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading font threshold.
    pub fn with_heading_threshold(mut self, threshold: f32) -> Self {
        self.heading_font_threshold = threshold;
        self
    }

    /// Set the line spacing threshold.
    pub fn with_line_spacing_threshold(mut self, threshold: f32) -> Self {
        self.line_spacing_threshold = threshold;
        self
    }

    /// Enable or disable verbose diagnostics.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Enable or disable document pre-analysis.
    pub fn with_analysis(mut self, analyze: bool) -> Self {
        self.analyze = analyze;
        self
    }

    /// Check that both thresholds are finite and positive.
    pub fn validate(&self) -> Result<()> {
        check_positive("heading_font_threshold", self.heading_font_threshold)?;
        check_positive("line_spacing_threshold", self.line_spacing_threshold)
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            heading_font_threshold: DEFAULT_HEADING_FONT_THRESHOLD,
            line_spacing_threshold: DEFAULT_LINE_SPACING_THRESHOLD,
            verbose: false,
            analyze: true,
        }
    }
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}
