//! Structure classification as an ordered rule table.
//!
//! Rules are tried in declaration order and the first match wins, so a later
//! rule never overrides an earlier one. Every input reaches the final
//! catch-all, which makes [`Classifier::classify`] total.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{AssembledLine, ContentElement, ContentKind, DocumentStats};

use super::options::DEFAULT_HEADING_FONT_THRESHOLD;

/// Line-prefix patterns that mark a list item, in match order.
pub const LIST_MARKER_PATTERNS: [(&str, &str); 5] = [
    ("bullet", r"^\s*[-*+]\s+"),
    ("numbered", r"^\s*\d+\.\s+"),
    ("numbered_paren", r"^\s*\d+\)\s+"),
    ("lettered", r"^\s*[a-zA-Z]\.\s+"),
    ("roman", r"^\s*[ivx]+\.\s+"),
];

fn list_markers() -> &'static [Regex] {
    static MARKERS: OnceLock<Vec<Regex>> = OnceLock::new();
    MARKERS.get_or_init(|| {
        LIST_MARKER_PATTERNS
            .iter()
            .map(|(_, pattern)| Regex::new(pattern).unwrap())
            .collect()
    })
}

/// Length of the list marker prefix of `text`, if it has one.
pub fn list_marker_len(text: &str) -> Option<usize> {
    list_markers()
        .iter()
        .find_map(|re| re.find(text).map(|m| m.end()))
}

/// Remove the leading list marker, leaving other text untouched.
pub fn strip_list_marker(text: &str) -> &str {
    match list_marker_len(text) {
        Some(end) => &text[end..],
        None => text,
    }
}

/// What a rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Line text
    pub text: &'a str,
    /// Mean font size of the line
    pub font_size: f32,
    /// Heading font threshold in effect
    pub heading_threshold: f32,
}

/// One entry of the classification table.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Short identifier used in diagnostics
    pub name: &'static str,
    /// Label assigned when the rule matches
    pub kind: ContentKind,
    predicate: fn(&Candidate<'_>) -> bool,
}

impl Rule {
    /// Declare a rule.
    pub const fn new(
        name: &'static str,
        kind: ContentKind,
        predicate: fn(&Candidate<'_>) -> bool,
    ) -> Self {
        Self {
            name,
            kind,
            predicate,
        }
    }

    /// Check whether the rule fires for `candidate`.
    pub fn matches(&self, candidate: &Candidate<'_>) -> bool {
        (self.predicate)(candidate)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

fn large_font(c: &Candidate<'_>) -> bool {
    c.font_size > c.heading_threshold
}

fn list_marker(c: &Candidate<'_>) -> bool {
    list_marker_len(c.text).is_some()
}

fn short_caps(c: &Candidate<'_>) -> bool {
    let len = c.text.chars().count();
    len > 5 && len < 80 && is_upper(c.text)
}

fn trailing_colon(c: &Candidate<'_>) -> bool {
    c.text.chars().count() < 100 && c.text.ends_with(':')
}

fn always(_: &Candidate<'_>) -> bool {
    true
}

/// The built-in table.
pub const DEFAULT_RULES: [Rule; 5] = [
    Rule::new("large_font", ContentKind::Heading, large_font),
    Rule::new("list_marker", ContentKind::ListItem, list_marker),
    Rule::new("short_caps", ContentKind::Heading, short_caps),
    Rule::new("trailing_colon", ContentKind::Heading, trailing_colon),
    Rule::new("body", ContentKind::Paragraph, always),
];

/// At least one uppercase character and no lowercase or titlecase ones.
fn is_upper(text: &str) -> bool {
    let mut cased = false;
    for c in text.chars() {
        if c.is_uppercase() {
            cased = true;
        } else if c.is_lowercase() || c.to_lowercase().ne(std::iter::once(c)) {
            return false;
        }
    }
    cased
}

/// Labels lines as headings, list items, or paragraphs.
#[derive(Debug, Clone)]
pub struct Classifier {
    heading_threshold: f32,
    rules: Vec<Rule>,
}

impl Classifier {
    /// Create a classifier with the built-in rules.
    pub fn new(heading_threshold: f32) -> Self {
        Self {
            heading_threshold,
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    /// Insert a rule ahead of the built-in ones.
    pub fn with_rule_first(mut self, rule: Rule) -> Self {
        self.rules.insert(0, rule);
        self
    }

    /// Heading font threshold in effect.
    pub fn heading_threshold(&self) -> f32 {
        self.heading_threshold
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// First rule matching the line, if any.
    pub fn matching_rule(&self, text: &str, font_size: f32) -> Option<&Rule> {
        let candidate = Candidate {
            text,
            font_size,
            heading_threshold: self.heading_threshold,
        };
        self.rules.iter().find(|rule| rule.matches(&candidate))
    }

    /// Label a line. Falls back to paragraph when no rule fires.
    pub fn classify(&self, text: &str, font_size: f32) -> ContentKind {
        self.matching_rule(text, font_size)
            .map(|rule| rule.kind)
            .unwrap_or(ContentKind::Paragraph)
    }

    /// Label an assembled line and count it.
    pub fn classify_line(&self, line: AssembledLine, stats: &mut DocumentStats) -> ContentElement {
        let kind = self.classify(&line.text, line.font_size);
        stats.record(kind);
        line.into_element(kind)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_HEADING_FONT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Formatting;

    fn rule(name: &str) -> Rule {
        *DEFAULT_RULES.iter().find(|r| r.name == name).unwrap()
    }

    fn candidate(text: &str, font_size: f32) -> Candidate<'_> {
        Candidate {
            text,
            font_size,
            heading_threshold: 14.0,
        }
    }

    #[test]
    fn test_large_font_rule() {
        let r = rule("large_font");
        assert!(r.matches(&candidate("Anything", 14.5)));
        assert!(!r.matches(&candidate("Anything", 14.0)));
    }

    #[test]
    fn test_list_marker_rule() {
        let r = rule("list_marker");
        for text in ["- item", "* item", "+ item", "1. item", "12) item", "b. item", "iv. item"] {
            assert!(r.matches(&candidate(text, 12.0)), "{text}");
        }
        for text in ["-item", "1.5 percent", "Dr.Smith", "item - x"] {
            assert!(!r.matches(&candidate(text, 12.0)), "{text}");
        }
    }

    #[test]
    fn test_short_caps_rule() {
        let r = rule("short_caps");
        assert!(r.matches(&candidate("INTRODUCTION", 12.0)));
        assert!(r.matches(&candidate("PART 2: RESULTS", 12.0)));
        assert!(!r.matches(&candidate("ABC", 12.0)));
        assert!(!r.matches(&candidate("ABSTRACT text", 12.0)));
        assert!(!r.matches(&candidate("123456", 12.0)));
        assert!(!r.matches(&candidate(&"A".repeat(80), 12.0)));
        assert!(!r.matches(&candidate("ǅURING THE WAR", 12.0)));
        assert!(r.matches(&candidate("SECTION 東京", 12.0)));
    }

    #[test]
    fn test_trailing_colon_rule() {
        let r = rule("trailing_colon");
        assert!(r.matches(&candidate("The following applies:", 12.0)));
        assert!(!r.matches(&candidate("No colon here", 12.0)));
        let long = format!("{}:", "x".repeat(99));
        assert!(!r.matches(&candidate(&long, 12.0)));
    }

    #[test]
    fn test_heading_size_beats_list_pattern() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("- Overview", 15.0), ContentKind::Heading);
        assert_eq!(classifier.classify("- Overview", 12.0), ContentKind::ListItem);
    }

    #[test]
    fn test_list_pattern_beats_caps() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("1. SCOPE OF WORK", 12.0), ContentKind::ListItem);
    }

    #[test]
    fn test_classify_total() {
        let classifier = Classifier::default();
        for (text, size) in [("", 0.0), ("x", -1.0), ("plain text", 12.0), ("Ü", f32::MAX)] {
            let kind = classifier.classify(text, size);
            assert!(matches!(
                kind,
                ContentKind::Heading | ContentKind::ListItem | ContentKind::Paragraph
            ));
        }
    }

    #[test]
    fn test_custom_threshold() {
        let classifier = Classifier::new(18.0);
        assert_eq!(classifier.classify("Subsection", 16.0), ContentKind::Paragraph);
        assert_eq!(classifier.classify("Title", 19.0), ContentKind::Heading);
    }

    #[test]
    fn test_extra_rule_runs_first() {
        fn note(c: &Candidate<'_>) -> bool {
            c.text.starts_with("Note")
        }
        let classifier = Classifier::default()
            .with_rule_first(Rule::new("note", ContentKind::Heading, note));
        assert_eq!(classifier.rules()[0].name, "note");
        assert_eq!(classifier.classify("Note that this holds", 12.0), ContentKind::Heading);
    }

    #[test]
    fn test_classify_line_counts() {
        let classifier = Classifier::default();
        let mut stats = DocumentStats::new();
        let line = AssembledLine {
            text: "SUMMARY".to_string(),
            font_size: 12.0,
            page: 1,
            formatting: Formatting::default(),
        };
        let element = classifier.classify_line(line, &mut stats);
        assert!(element.is_heading());
        assert_eq!(stats.headings_detected, 1);
        assert_eq!(stats.paragraphs_created, 0);
    }

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("1. Introduction"), "Introduction");
        assert_eq!(strip_list_marker("- dash item"), "dash item");
        assert_eq!(strip_list_marker("3) third"), "third");
        assert_eq!(strip_list_marker("ii. second"), "second");
        assert_eq!(strip_list_marker("no marker"), "no marker");
    }
}
