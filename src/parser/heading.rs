//! Heading level resolution.

use crate::model::ContentElement;

/// Deepest level ever produced. Sizes that would map deeper clamp here.
pub const MAX_HEADING_LEVEL: u8 = 3;

/// Font size bands, checked top-down: a size strictly above the bound gets the level.
const SIZE_BANDS: [(f32, u8); 3] = [(20.0, 1), (16.0, 2), (14.0, 3)];

/// Words that mark a structural division.
const DIVISION_KEYWORDS: [&str; 3] = ["chapter", "section", "part"];

/// Level (1-3) for a heading line.
///
/// Font size bands decide first; headings at or below the lowest band were
/// labelled by their text shape and fall back to lexical cues.
pub fn resolve_level(text: &str, font_size: f32) -> u8 {
    if let Some(&(_, level)) = SIZE_BANDS.iter().find(|(bound, _)| font_size > *bound) {
        return level;
    }

    let lower = text.to_lowercase();
    if DIVISION_KEYWORDS.iter().any(|word| lower.contains(word)) {
        return 2;
    }

    // Short title-like lines and long colon-terminated lead-ins alike.
    MAX_HEADING_LEVEL
}

/// Level for a classified heading element.
pub fn heading_level(element: &ContentElement) -> u8 {
    resolve_level(&element.text, element.font_size)
}
