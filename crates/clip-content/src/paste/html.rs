//! HTML to block conversion
//!
//! Splits a fragment into top-level elements and maps each element to a
//! block type. Runs of text and inline elements become paragraphs.

use crate::block::Block;
use crate::error::{Error, Result};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Matches comments and start/end/self-closing tags.
///
/// Captures: 1 = closing slash, 2 = tag name, 3 = self-closing slash.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)<!--.*?-->",
        r#"|<(/?)([a-zA-Z][a-zA-Z0-9-]*)(?:\s(?:"[^"]*"|'[^']*'|[^>"'])*)?(/?)>"#,
    ))
    .expect("Invalid tag regex")
});

/// A `<` that starts a tag which is never closed.
static UNTERMINATED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[a-zA-Z/!][^>]*\z").expect("Invalid unterminated tag regex"));

static IMG_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\ssrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#)
        .expect("Invalid img src regex")
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--.*?-->|</?([a-zA-Z][a-zA-Z0-9-]*)[^>]*>").expect("Invalid any tag regex")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "cite", "code", "del", "dfn", "em", "i", "ins", "kbd",
    "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// A top-level piece of an HTML fragment
#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Text(&'a str),
    Element { tag: String, html: &'a str },
}

fn is_inline(tag: &str) -> bool {
    INLINE_ELEMENTS.contains(&tag)
}

fn split_top_level(html: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut depth = 0usize;
    let mut open: Option<(String, usize)> = None;

    for caps in TAG_REGEX.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let Some(name) = caps.get(2) else {
            // Comment: dropped at top level, kept inside elements.
            if depth == 0 {
                if whole.start() > cursor {
                    segments.push(Segment::Text(&html[cursor..whole.start()]));
                }
                cursor = whole.end();
            }
            continue;
        };

        let tag = name.as_str().to_ascii_lowercase();
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty())
            || VOID_ELEMENTS.contains(&tag.as_str());

        if depth == 0 {
            if whole.start() > cursor {
                segments.push(Segment::Text(&html[cursor..whole.start()]));
            }
            cursor = whole.end();
            if closing {
                // Stray closing tag
                continue;
            }
            if self_closing {
                segments.push(Segment::Element {
                    tag,
                    html: whole.as_str(),
                });
            } else {
                open = Some((tag, whole.start()));
                depth = 1;
            }
            continue;
        }

        if closing {
            depth -= 1;
            if depth == 0 {
                if let Some((tag, start)) = open.take() {
                    segments.push(Segment::Element {
                        tag,
                        html: &html[start..whole.end()],
                    });
                }
                cursor = whole.end();
            }
        } else if !self_closing {
            depth += 1;
        }
    }

    match open {
        Some((tag, start)) => segments.push(Segment::Element {
            tag,
            html: &html[start..],
        }),
        None if cursor < html.len() => segments.push(Segment::Text(&html[cursor..])),
        None => {}
    }

    segments
}

fn paragraph(inline_html: &str) -> Option<Block> {
    let trimmed = inline_html.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(Block::with_html("paragraph", format!("<p>{trimmed}</p>")))
    }
}

/// Text content of an element with all tags removed.
fn text_content(html: &str) -> String {
    let text = ANY_TAG.replace_all(html, " ");
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

fn image_url(html: &str) -> Option<String> {
    let caps = IMG_SRC.captures(html)?;
    (1..=3)
        .find_map(|i| caps.get(i))
        .map(|m| m.as_str().to_string())
}

fn element_to_block(tag: &str, html: &str, allow_unfiltered_html: bool) -> Option<Block> {
    let block = match tag {
        "p" => Block::with_html("paragraph", html),
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse::<u8>().unwrap_or(2);
            Block::with_html("heading", html).attribute("level", json!(level))
        }
        "ul" => Block::with_html("list", html),
        "ol" => Block::with_html("list", html).attribute("ordered", json!(true)),
        "blockquote" => Block::with_html("quote", html),
        "img" | "figure" => {
            let block = Block::with_html("image", html);
            match image_url(html) {
                Some(url) => block.attribute("url", json!(url)),
                None => block,
            }
        }
        "pre" => Block::with_html("code", html),
        "hr" => Block::with_html("separator", html),
        "table" => Block::with_html("table", html),
        _ if allow_unfiltered_html => Block::with_html("html", html),
        _ => return paragraph(&text_content(html)),
    };
    Some(block)
}

/// Convert an HTML fragment to a block sequence.
///
/// Elements without a dedicated block type become `core/html` blocks when
/// unfiltered HTML is allowed, otherwise paragraphs of their text.
///
/// # Errors
/// Returns a parse error if the fragment ends inside an unterminated tag.
pub fn html_to_blocks(html: &str, allow_unfiltered_html: bool) -> Result<Vec<Block>> {
    check_terminated(html)?;

    let mut blocks = Vec::new();
    let mut inline_run = String::new();

    for segment in split_top_level(html) {
        match segment {
            Segment::Text(text) => inline_run.push_str(text),
            Segment::Element { ref tag, html } if is_inline(tag) => inline_run.push_str(html),
            Segment::Element { tag, html } => {
                blocks.extend(paragraph(&inline_run));
                inline_run.clear();
                blocks.extend(element_to_block(&tag, html, allow_unfiltered_html));
            }
        }
    }
    blocks.extend(paragraph(&inline_run));

    tracing::debug!(count = blocks.len(), "Converted pasted HTML to blocks");
    Ok(blocks)
}

/// Collapse an HTML fragment into one paragraph of inline content.
pub fn html_to_inline(html: &str) -> Option<Block> {
    let inline = ANY_TAG.replace_all(html, |caps: &regex::Captures<'_>| {
        match caps.get(1) {
            Some(name) if is_inline(&name.as_str().to_ascii_lowercase()) => caps[0].to_string(),
            _ => " ".to_string(),
        }
    });
    paragraph(&WHITESPACE.replace_all(&inline, " "))
}

fn check_terminated(html: &str) -> Result<()> {
    match UNTERMINATED_TAG.find(html) {
        Some(m) => Err(Error::parse(
            "HTML",
            format!("unterminated tag at byte {}", m.start()),
        )),
        None => Ok(()),
    }
}
