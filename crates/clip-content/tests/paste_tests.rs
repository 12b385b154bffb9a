//! Integration tests for clipboard paste parsing

use clip_content::{Block, Error, PasteMode, PasteRequest, parse_clipboard_content, serialize};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn names(blocks: &[Block]) -> Vec<&str> {
    blocks.iter().map(|b| b.name.as_str()).collect()
}

#[test]
fn test_copied_markup_wins_over_plain_text() {
    let markup = serialize(&[
        Block::with_html("paragraph", "<p>a</p>"),
        Block::with_html("quote", "<blockquote>b</blockquote>"),
    ]);
    let request = PasteRequest::new(markup.clone(), markup);
    let blocks = parse_clipboard_content(&request).unwrap();
    assert_eq!(names(&blocks), ["core/paragraph", "core/quote"]);
}

#[test]
fn test_word_processor_html() {
    let html = concat!(
        "<html><head><meta charset=\"utf-8\"><style>p{}</style></head>",
        "<body><!--StartFragment--><h1>Report</h1><p>Intro <i>text</i></p>",
        "<ul><li>one</li><li>two</li></ul><!--EndFragment--></body></html>",
    );
    let request = PasteRequest::new(html, "Report\nIntro text\none\ntwo");
    let blocks = parse_clipboard_content(&request).unwrap();

    assert_eq!(names(&blocks), ["core/heading", "core/paragraph", "core/list"]);
    assert_eq!(blocks[0].attributes["level"], 1);
    assert_eq!(blocks[1].inner_html(), "<p>Intro <i>text</i></p>");
}

#[test]
fn test_plain_text_only() {
    let request = PasteRequest::new("", "Line <one>\n\nLine two");
    let blocks = parse_clipboard_content(&request).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].inner_html(), "<p>Line &lt;one&gt;</p>");
}

#[rstest]
#[case(false, "core/paragraph")]
#[case(true, "core/html")]
fn test_capability_flag_controls_raw_html(#[case] allow: bool, #[case] expected: &str) {
    let request = PasteRequest::new("<div onclick=\"x()\">widget</div>", "widget")
        .allow_unfiltered_html(allow);
    let blocks = parse_clipboard_content(&request).unwrap();
    assert_eq!(blocks[0].name, expected);
    assert_eq!(blocks[0].inner_html().contains("onclick"), allow);
}

#[test]
fn test_script_only_html_falls_through_to_nothing() {
    let request = PasteRequest::new("<script>steal()</script>", "");
    let err = parse_clipboard_content(&request).unwrap_err();
    assert!(matches!(err, Error::NothingToPaste));
}

#[test]
fn test_malformed_markup_propagates() {
    let markup = "<!-- block:quote -->\n<blockquote>never closed";
    let err = parse_clipboard_content(&PasteRequest::new(markup, markup)).unwrap_err();
    assert!(matches!(err, Error::UnclosedBlock { .. }));
}

#[test]
fn test_inline_mode_from_plain_text() {
    let request = PasteRequest::new("", "just words").with_mode(PasteMode::Inline);
    let blocks = parse_clipboard_content(&request).unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].inner_html(), "<p>just words</p>");
}

#[test]
fn test_filtered_html_falls_back_to_plain_text() {
    let request = PasteRequest::new("<script>steal()</script>", "visible text");
    let blocks = parse_clipboard_content(&request).unwrap();
    assert_eq!(blocks[0].inner_html(), "<p>visible text</p>");
}

#[test]
fn test_split_script_tags_in_markup_are_removed() {
    let markup = concat!(
        "<!-- block:html -->\n",
        "<div>ok</div><scr<script>ipt>alert(1)</scr<script>ipt>\n",
        "<!-- /block:html -->",
    );
    let blocks = parse_clipboard_content(&PasteRequest::new(markup, markup)).unwrap();
    assert_eq!(names(&blocks), ["core/html"]);
    assert_eq!(blocks[0].inner_html(), "<div>ok</div>");
}

#[test]
fn test_split_script_tags_in_html_are_removed() {
    let html = "<p>safe</p><scr<script>ipt>alert(1)</scr<script>ipt>";
    let blocks = parse_clipboard_content(&PasteRequest::new(html, "safe")).unwrap();
    let html: Vec<String> = blocks.iter().map(Block::inner_html).collect();
    assert_eq!(html, vec!["<p>safe</p>"]);
}

#[test]
fn test_filtered_paste_keeps_attribute_like_text() {
    let html = "<p>let one = two; if x == y</p>";
    let blocks = parse_clipboard_content(&PasteRequest::new(html, "")).unwrap();
    assert_eq!(blocks[0].inner_html(), html);
}

#[test]
fn test_copied_freeform_pastes_as_freeform() {
    let markup = serialize(&[Block::with_html("freeform", "<p>legacy</p>")]);
    let blocks = parse_clipboard_content(&PasteRequest::new(markup, "legacy")).unwrap();
    assert_eq!(names(&blocks), ["core/freeform"]);
    assert_eq!(blocks[0].inner_html(), "<p>legacy</p>");
}
