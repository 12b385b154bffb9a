//! Block serialization to comment-delimited markup.
//!
//! Produces the canonical payload written to both clipboard channels:
//! ```text
//! <!-- block:NAME {"attr":"value"} -->
//! inner html
//! <!-- /block:NAME -->
//! ```

use crate::block::{Block, ContentPiece};
use serde_json::{Map, Value};

/// Block holding HTML that carries no block delimiters of its own.
///
/// It is still delimited when serialized so a paste gets the same block back.
pub const FREEFORM_BLOCK: &str = "core/freeform";

/// Serialize an ordered block sequence, separating top-level blocks with a blank line.
///
/// # Example
/// ```
/// use clip_content::{Block, serialize};
///
/// let markup = serialize(&[Block::with_html("paragraph", "<p>Hi</p>")]);
/// assert_eq!(markup, "<!-- block:paragraph -->\n<p>Hi</p>\n<!-- /block:paragraph -->");
/// ```
pub fn serialize(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(serialize_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Serialize a single block including its nested blocks.
pub fn serialize_block(block: &Block) -> String {
    let content: String = block
        .inner_content
        .iter()
        .map(|piece| match piece {
            ContentPiece::Html(html) => html.clone(),
            ContentPiece::Block(inner) => serialize_block(inner),
        })
        .collect();

    let name = block.short_name();
    let attributes = serialize_attributes(&block.attributes);

    if block.inner_content.is_empty() {
        format!("<!-- block:{name} {attributes}/-->")
    } else {
        format!("<!-- block:{name} {attributes}-->\n{content}\n<!-- /block:{name} -->")
    }
}

/// Render attributes as JSON followed by a space, or nothing when empty.
///
/// Sequences that could terminate or confuse the surrounding HTML comment are
/// written as unicode escapes; any JSON reader restores them unchanged.
fn serialize_attributes(attributes: &Map<String, Value>) -> String {
    if attributes.is_empty() {
        return String::new();
    }
    let json = Value::Object(attributes.clone()).to_string();
    let escaped = json
        .replace("--", "\\u002d\\u002d")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026");
    format!("{escaped} ")
}
