//! End-to-end properties of the span-to-Markdown pipeline.

use pdf2md::model::{FLAG_BOLD, FLAG_ITALIC};
use pdf2md::parser::{resolve_level, Classifier};
use pdf2md::render::{render_markdown, to_markdown};
use pdf2md::{
    convert_pages, ContentElement, ContentKind, ConvertOptions, DocumentStats, PageSpans, RawSpan,
    SpanLine, ERROR_NOTICE,
};

fn line(text: &str, size: f32) -> SpanLine {
    SpanLine::new(vec![RawSpan::new(text, size)])
}

fn body(elements: &[ContentElement]) -> String {
    render_markdown(elements, &DocumentStats::new()).body().to_string()
}

#[test]
fn test_classifier_priority_and_totality() {
    let classifier = Classifier::default();
    assert_eq!(classifier.classify("- bullet text", 15.0), ContentKind::Heading);

    let inputs = [
        ("", 0.0),
        ("   ", 12.0),
        ("1) item", 9.0),
        ("RESULTS AND DISCUSSION", 10.0),
        ("Terms:", 10.0),
        ("ordinary sentence.", 10.0),
        ("🦀", f32::NAN),
    ];
    for (text, size) in inputs {
        let kind = classifier.classify(text, size);
        assert!(matches!(
            kind,
            ContentKind::Heading | ContentKind::ListItem | ContentKind::Paragraph
        ));
    }
}

#[test]
fn test_heading_levels_by_size() {
    let levels: Vec<u8> = [21.0, 17.0, 15.0, 10.0]
        .into_iter()
        .map(|size| resolve_level("Background", size))
        .collect();
    assert_eq!(levels, vec![1, 2, 3, 3]);
}

#[test]
fn test_list_marker_stripped_once() {
    let rendered = body(&[ContentElement::list_item("1. Introduction")]);
    assert_eq!(rendered, "- Introduction\n");
}

#[test]
fn test_paragraph_flush_boundary() {
    let elements = vec![
        ContentElement::paragraph("A"),
        ContentElement::paragraph("B"),
        ContentElement::heading("C", 22.0),
    ];
    assert_eq!(body(&elements), "A B\n\n# C\n\n");
}

#[test]
fn test_empty_input_contract() {
    let output = to_markdown(&[], &DocumentStats::new());
    assert_eq!(output, ERROR_NOTICE);
    assert_eq!(
        output,
        "# Conversion Error\n\nNo content could be extracted from the PDF."
    );
    assert!(!output.contains("Conversion Statistics"));
}

#[test]
fn test_long_paragraph_split_keeps_sentences() {
    let sentences = [
        "Rust guarantees memory safety.",
        "It has no garbage collector.",
        "Ownership rules are checked at compile time.",
        "Borrowing allows shared access.",
        "Lifetimes describe scopes.",
        "Traits enable polymorphism.",
    ];
    let mut sequence: Vec<&str> = Vec::new();
    while sequence.join(" ").chars().count() <= 800 {
        sequence.extend(sentences);
    }
    let text = sequence.join(" ");

    let rendered = body(&[ContentElement::paragraph(text.as_str())]);
    let blocks: Vec<&str> = rendered.trim_end_matches('\n').split("\n\n").collect();
    assert_eq!(blocks.len(), 2);

    let split_sentences = |block: &str| -> Vec<String> {
        block
            .split_inclusive('.')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    };
    let mut rejoined = split_sentences(blocks[0]);
    rejoined.extend(split_sentences(blocks[1]));
    assert_eq!(rejoined, sequence);
    assert!(!split_sentences(blocks[0]).is_empty());
    assert!(!split_sentences(blocks[1]).is_empty());
}

#[test]
fn test_statistics_accuracy() {
    let pages = vec![
        PageSpans::new(
            0,
            vec![
                line("Quarterly Summary", 26.0),
                line("INTRODUCTION", 11.0),
                line("The quarter closed with", 11.0),
                line("strong results.", 11.0),
                line("Highlights:", 11.0),
                line("- revenue up", 11.0),
                line("2) costs down", 11.0),
                line("", 11.0),
            ],
        ),
        PageSpans::new(0, vec![]),
        PageSpans::new(0, vec![line("a. appendix item", 11.0), line("closing remark", 11.0)]),
    ];
    let conversion = convert_pages(&pages, &ConvertOptions::default()).unwrap();
    let stats = conversion.stats;

    assert_eq!(stats.pages_processed, 3);
    assert_eq!(stats.text_blocks_found, 9);
    assert_eq!(stats.headings_detected, 3);
    assert_eq!(stats.list_items_found, 3);
    assert_eq!(stats.paragraphs_created, 3);
    assert_eq!(
        stats.headings_detected + stats.paragraphs_created + stats.list_items_found,
        stats.text_blocks_found
    );
    assert_eq!(conversion.elements.len() as u32, stats.text_blocks_found);
}

#[test]
fn test_full_document_rendering() {
    let pages = vec![PageSpans::new(
        1,
        vec![
            SpanLine::new(vec![RawSpan::new("Project Plan", 24.0).with_flags(FLAG_BOLD)]),
            SpanLine::new(vec![
                RawSpan::new("This plan", 11.0),
                RawSpan::new("describes", 11.0).with_flags(FLAG_ITALIC),
            ]),
            line("the next phase.", 11.0),
            line("Chapter overview", 16.5),
            line("* design", 11.0),
            line("* build", 11.0),
        ],
    )];
    let conversion = convert_pages(&pages, &ConvertOptions::default()).unwrap();
    let expected = "# Converted Document\n\
        \n\
        **Conversion Statistics:**\n\
        - Pages processed: 1\n\
        - Content elements: 6\n\
        - Headings detected: 2\n\
        - Paragraphs created: 2\n\
        - List items found: 2\n\
        \n\
        ---\n\
        \n\
        # Project Plan\n\
        \n\
        This plan describes the next phase.\n\
        \n\
        ## Chapter overview\n\
        \n\
        - design\n\
        - build\n";
    assert_eq!(conversion.to_markdown(), expected);

    let paragraph = &conversion.elements[1];
    assert!(paragraph.formatting.italic);
    assert!(!paragraph.formatting.bold);
}

#[test]
fn test_custom_heading_threshold() {
    let pages = vec![PageSpans::new(1, vec![line("Subsection", 16.0)])];

    let default = convert_pages(&pages, &ConvertOptions::default()).unwrap();
    assert!(default.elements[0].is_heading());

    let raised = ConvertOptions::new().with_heading_threshold(18.0);
    let conversion = convert_pages(&pages, &raised).unwrap();
    assert!(conversion.elements[0].is_paragraph());
}

#[test]
fn test_independent_conversions_in_parallel() {
    let pages: Vec<PageSpans> = (0..4)
        .map(|i| PageSpans::new(0, vec![line(&format!("Paragraph {}", i), 11.0)]))
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pages = pages.clone();
            std::thread::spawn(move || convert_pages(&pages, &ConvertOptions::default()).unwrap())
        })
        .collect();

    for handle in handles {
        let conversion = handle.join().unwrap();
        assert_eq!(conversion.stats.pages_processed, 4);
        assert_eq!(conversion.stats.paragraphs_created, 4);
    }
}
