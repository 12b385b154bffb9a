//! Plain text to block conversion

use crate::block::Block;
use regex::Regex;
use std::sync::LazyLock;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("Invalid blank line regex"));

/// Escape text for inclusion in HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn paragraph_html(chunk: &str) -> String {
    let lines: Vec<String> = chunk.lines().map(|line| escape_html(line.trim_end())).collect();
    format!("<p>{}</p>", lines.join("<br>"))
}

/// Split plain text on blank lines into paragraphs.
///
/// Text is escaped and single line breaks become `<br>`.
pub fn plain_text_to_blocks(text: &str) -> Vec<Block> {
    let text = text.replace("\r\n", "\n");
    BLANK_LINE
        .split(&text)
        .map(|chunk| chunk.trim_matches('\n'))
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| Block::with_html("paragraph", paragraph_html(chunk)))
        .collect()
}

/// Wrap all of the text in one paragraph.
pub fn plain_text_to_inline(text: &str) -> Option<Block> {
    let text = text.replace("\r\n", "\n");
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(Block::with_html("paragraph", paragraph_html(text)))
}
