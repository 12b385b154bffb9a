//! Paste parsing: clipboard HTML or plain text into blocks
//!
//! Content carrying block delimiters goes through the markup parser. Other
//! HTML is split into top-level elements; plain text becomes paragraphs.

mod html;
mod plain_text;
mod sanitize;

pub use html::{html_to_blocks, html_to_inline};
pub use plain_text::{escape_html, plain_text_to_blocks, plain_text_to_inline};
pub use sanitize::{clean_clipboard_html, sanitize_html};

use crate::block::{Block, ContentPiece};
use crate::codec::{PasteMode, PasteRequest};
use crate::error::{Error, Result};
use crate::parser::{has_block_delimiters, parse};

/// Parse clipboard content into blocks.
///
/// # Errors
/// Returns a parse error when the markup is malformed, and
/// `Error::NothingToPaste` when no block could be produced.
///
/// # Example
/// ```
/// use clip_content::{PasteRequest, parse_clipboard_content};
///
/// let blocks = parse_clipboard_content(&PasteRequest::new("", "one\n\ntwo")).unwrap();
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[1].inner_html(), "<p>two</p>");
/// ```
pub fn parse_clipboard_content(request: &PasteRequest) -> Result<Vec<Block>> {
    let html = clean_clipboard_html(&request.html);
    let allow = request.allow_unfiltered_html;

    let blocks = if request.mode == PasteMode::Blocks {
        let content = if html.trim().is_empty() {
            request.plain_text.as_str()
        } else {
            html.as_str()
        };

        if has_block_delimiters(content) {
            tracing::debug!("Clipboard content carries block delimiters");
            let mut blocks = parse(content)?;
            if !allow {
                blocks.iter_mut().for_each(sanitize_block);
            }
            blocks
        } else if !html.trim().is_empty() {
            let html = if allow { html } else { sanitize_html(&html) };
            let blocks = html_to_blocks(&html, allow)?;
            if blocks.is_empty() {
                plain_text_to_blocks(&request.plain_text)
            } else {
                blocks
            }
        } else {
            plain_text_to_blocks(&request.plain_text)
        }
    } else if !html.trim().is_empty() {
        let html = if allow { html } else { sanitize_html(&html) };
        html_to_inline(&html).into_iter().collect()
    } else {
        plain_text_to_inline(&request.plain_text).into_iter().collect()
    };

    if blocks.is_empty() {
        return Err(Error::NothingToPaste);
    }
    Ok(blocks)
}

fn sanitize_block(block: &mut Block) {
    for piece in &mut block.inner_content {
        match piece {
            ContentPiece::Html(html) => *html = sanitize_html(html),
            ContentPiece::Block(inner) => sanitize_block(inner),
        }
    }
}
