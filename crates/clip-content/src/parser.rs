//! Block markup parsing.
//!
//! Parses comment-delimited markup back into a block tree:
//! ```text
//! <!-- block:NAME ATTRS -->
//! inner html
//! <!-- /block:NAME -->
//! ```
//! HTML found between top-level delimiters becomes `core/freeform` blocks.

use crate::block::{Block, ClientId, ContentPiece, qualify_name};
use crate::error::{Error, Result};
use crate::serializer::FREEFORM_BLOCK;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// Matches opening, closing, and void block delimiters.
///
/// Captures: 1 = closer slash, 2 = name, 3 = attribute JSON, 4 = void slash.
static DELIMITER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)<!--\s+(/)?block:([a-z][a-z0-9_-]*(?:/[a-z][a-z0-9_-]*)?)\s+(\{.*?\}\s+)?(/)?-->",
    )
    .expect("Invalid block delimiter regex")
});

/// A block whose closing delimiter has not been seen yet.
struct OpenBlock {
    name: String,
    attributes: Map<String, Value>,
    inner_content: Vec<ContentPiece>,
    position: usize,
}

impl OpenBlock {
    fn finish(mut self) -> Block {
        if let Some(ContentPiece::Html(first)) = self.inner_content.first_mut() {
            if let Some(stripped) = first.strip_prefix('\n') {
                *first = stripped.to_string();
            }
        }
        if let Some(ContentPiece::Html(last)) = self.inner_content.last_mut() {
            if let Some(stripped) = last.strip_suffix('\n') {
                *last = stripped.to_string();
            }
        }
        self.inner_content
            .retain(|piece| !matches!(piece, ContentPiece::Html(html) if html.is_empty()));

        Block {
            client_id: ClientId::new(),
            name: self.name,
            attributes: self.attributes,
            inner_content: self.inner_content,
        }
    }
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<OpenBlock>,
    output: Vec<Block>,
}

impl TreeBuilder {
    fn push_html(&mut self, html: &str) {
        if html.is_empty() {
            return;
        }
        match self.stack.last_mut() {
            Some(open) => open.inner_content.push(ContentPiece::Html(html.to_string())),
            None => {
                let trimmed = html.trim();
                if !trimmed.is_empty() {
                    self.output.push(Block::with_html(FREEFORM_BLOCK, trimmed));
                }
            }
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(open) => open.inner_content.push(ContentPiece::Block(block)),
            None => self.output.push(block),
        }
    }
}

/// Check whether content contains at least one block delimiter.
pub fn has_block_delimiters(content: &str) -> bool {
    DELIMITER_REGEX.is_match(content)
}

/// Parse block markup into an ordered block sequence.
///
/// Every parsed block receives a fresh [`ClientId`].
///
/// # Errors
/// - `InvalidBlockMarker` when attribute JSON is malformed or not an object
/// - `UnexpectedCloser` when a closing delimiter does not match the open block
/// - `UnclosedBlock` when the input ends with a block still open
///
/// # Example
/// ```
/// use clip_content::parse;
///
/// let markup = "<!-- block:heading {\"level\":2} -->\n<h2>Hi</h2>\n<!-- /block:heading -->";
/// let blocks = parse(markup).unwrap();
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].name, "core/heading");
/// assert_eq!(blocks[0].inner_html(), "<h2>Hi</h2>");
/// ```
pub fn parse(markup: &str) -> Result<Vec<Block>> {
    let mut builder = TreeBuilder::default();
    let mut cursor = 0;

    for caps in DELIMITER_REGEX.captures_iter(markup) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        builder.push_html(&markup[cursor..whole.start()]);
        cursor = whole.end();

        let position = whole.start();
        let name = qualify_name(caps.get(2).map_or("", |m| m.as_str()));
        let is_closer = caps.get(1).is_some();
        let is_void = caps.get(4).is_some();

        if is_closer {
            match builder.stack.pop() {
                Some(open) if open.name == name => {
                    let block = open.finish();
                    builder.push_block(block);
                }
                _ => return Err(Error::UnexpectedCloser { name, position }),
            }
            continue;
        }

        let attributes = match caps.get(3) {
            Some(json) => parse_attributes(json.as_str(), position)?,
            None => Map::new(),
        };

        if is_void {
            builder.push_block(Block {
                client_id: ClientId::new(),
                name,
                attributes,
                inner_content: Vec::new(),
            });
        } else {
            builder.stack.push(OpenBlock {
                name,
                attributes,
                inner_content: Vec::new(),
                position,
            });
        }
    }

    builder.push_html(&markup[cursor..]);

    if let Some(open) = builder.stack.pop() {
        return Err(Error::UnclosedBlock {
            name: open.name,
            position: open.position,
        });
    }

    tracing::trace!(count = builder.output.len(), "Parsed block markup");
    Ok(builder.output)
}

fn parse_attributes(json: &str, position: usize) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json.trim()) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::InvalidBlockMarker {
            position,
            message: format!("attributes must be a JSON object, got {other}"),
        }),
        Err(e) => Err(Error::InvalidBlockMarker {
            position,
            message: e.to_string(),
        }),
    }
}
