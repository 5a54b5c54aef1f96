//! Engine-free integration tests for styled-pdf2md.
//!
//! Everything here goes through the public API without a pdfium library:
//! layout trees are built in memory, and decode failures are caught by the
//! header check before any binding happens.

use styled_pdf2md::{
    convert_bytes, convert_to_file, render_document, style_span, Block, ConversionConfig,
    DecodeError, Document, Line, Page, Pdf2MdError, Span,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn span(text: &str, size: f32, font: &str, flags: u32) -> Span {
    Span::new(text, size, font, flags)
}

fn line(spans: Vec<Span>) -> Line {
    Line { spans }
}

fn block(lines: Vec<Line>) -> Block {
    Block { lines }
}

fn page(number: usize, blocks: Vec<Block>) -> Page {
    Page { number, blocks }
}

fn plain(text: &str) -> Span {
    span(text, 10.0, "Helvetica", 0)
}

// ── Scenarios ────────────────────────────────────────────────────────────────

#[test]
fn heading_then_body_scenario() {
    let doc = Document {
        pages: vec![page(
            1,
            vec![block(vec![
                line(vec![span("Title", 18.0, "Helvetica", 0)]),
                line(vec![span("body", 10.0, "Helvetica", 0)]),
            ])],
        )],
    };
    assert_eq!(render_document(&doc), "# Title\nbody\n");
}

#[test]
fn heading_boundary_is_strictly_greater_than_14() {
    assert_eq!(style_span(&span("x", 14.0, "Helvetica", 0)), "x");
    assert_eq!(style_span(&span("x", 14.01, "Helvetica", 0)), "# x");
}

#[test]
fn heading_bold_italic_nest_outward() {
    let s = span("Hi", 20.0, "Arial-Bold", 16 | 2);
    assert_eq!(style_span(&s), "***# Hi***");
}

#[test]
fn conversion_is_deterministic() {
    let doc = Document {
        pages: vec![
            page(
                1,
                vec![block(vec![line(vec![
                    span("Intro", 16.0, "Times-Bold", 0),
                    plain(" and "),
                    span("more", 10.0, "Times", 2),
                ])])],
            ),
            page(2, vec![block(vec![line(vec![plain("end")])])]),
        ],
    };
    let first = render_document(&doc);
    let second = render_document(&doc);
    assert_eq!(first, second);
    assert_eq!(first, "**# Intro** and *more*\n\nend\n");
}

#[test]
fn order_is_preserved_at_every_level() {
    let doc = Document {
        pages: vec![
            page(
                1,
                vec![
                    block(vec![
                        line(vec![plain("a1"), plain("a2")]),
                        line(vec![plain("b")]),
                    ]),
                    block(vec![line(vec![plain("c")])]),
                ],
            ),
            page(2, vec![block(vec![line(vec![plain("d")])])]),
        ],
    };
    assert_eq!(render_document(&doc), "a1a2\nb\n\nc\n\nd\n");
}

#[test]
fn blank_lines_drop_but_blocks_still_separate() {
    let doc = Document {
        pages: vec![page(
            1,
            vec![
                block(vec![line(vec![plain("   "), plain("")])]),
                block(vec![]),
                block(vec![line(vec![plain("x")])]),
            ],
        )],
    };
    // Two empty blocks contribute one blank entry each.
    assert_eq!(render_document(&doc), "\n\nx\n");
}

#[test]
fn styled_empty_span_keeps_its_line() {
    let doc = Document {
        pages: vec![page(
            1,
            vec![block(vec![line(vec![span("", 10.0, "Arial-Bold", 0)])])],
        )],
    };
    assert_eq!(render_document(&doc), "****\n");
}

#[test]
fn rendering_leaves_the_tree_untouched() {
    let doc = Document {
        pages: vec![page(
            1,
            vec![block(vec![line(vec![span(" x ", 30.0, "Bold", 18)])])],
        )],
    };
    let before = doc.clone();
    let _ = render_document(&doc);
    assert_eq!(doc, before);
}

#[test]
fn layout_json_renders_like_in_memory_tree() {
    let json = r#"{
        "pages": [{
            "number": 1,
            "blocks": [{
                "lines": [
                    {"spans": [{"text": "Title", "font_size": 18.0, "font_name": "Helvetica", "style_flags": 0}]},
                    {"spans": [{"text": "body", "font_size": 10.0, "font_name": "Helvetica", "style_flags": 2}]}
                ]
            }]
        }]
    }"#;
    let doc: Document = serde_json::from_str(json).unwrap();
    assert_eq!(render_document(&doc), "# Title\n*body*\n");
}

// ── Decode failures ──────────────────────────────────────────────────────────

#[test]
fn empty_bytes_raise_decode_error() {
    let result = convert_bytes(&[], &ConversionConfig::default());
    assert!(matches!(result, Err(DecodeError::Empty)));
}

#[test]
fn non_pdf_bytes_raise_decode_error() {
    let result = convert_bytes(b"GIF89a....", &ConversionConfig::default());
    match result {
        Err(DecodeError::NotAPdf { magic }) => assert_eq!(&magic, b"GIF8"),
        other => panic!("expected NotAPdf, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_conversion_writes_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("fake.pdf");
    std::fs::write(&input, b"plain text, not a pdf").unwrap();
    let out = dir.path().join("out.md");

    let err = convert_to_file(
        input.to_string_lossy(),
        &out,
        &ConversionConfig::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Pdf2MdError::Decode(DecodeError::NotAPdf { .. })));
    assert!(!out.exists());
    assert!(!out.with_extension("md.tmp").exists());
}
