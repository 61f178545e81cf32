//! Document model types for span input and classified content.
//!
//! Spans flow in from an extraction backend, are joined into
//! [`AssembledLine`]s, and leave classification as immutable
//! [`ContentElement`]s. [`DocumentStats`] tallies the run.

mod element;
mod span;
mod stats;

pub use element::{AssembledLine, ContentElement, ContentKind, Formatting};
pub use span::{
    PageSpans, RawSpan, Span, SpanLine, DEFAULT_FONT_SIZE, FLAG_BOLD, FLAG_ITALIC,
};
pub use stats::DocumentStats;
