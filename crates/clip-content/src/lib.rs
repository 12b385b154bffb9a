//! Block model, markup codec, and paste parsing for Block Clipboard
//!
//! Provides the portable representation of editor blocks: serializing an
//! ordered block sequence to comment-delimited markup, parsing that markup
//! back, and turning arbitrary clipboard HTML or plain text into blocks.
//!
//! # Markup
//!
//! ```text
//! <!-- block:heading {"level":2} -->
//! <h2>Title</h2>
//! <!-- /block:heading -->
//!
//! <!-- block:separator /-->
//! ```

pub mod block;
pub mod block_type;
pub mod codec;
pub mod error;
pub mod paste;
pub mod parser;
pub mod serializer;

pub use block::{Block, ClientId, ContentPiece};
pub use block_type::{BlockType, BlockTypeRegistry};
pub use codec::{BlockCodec, MarkupCodec, PasteMode, PasteRequest};
pub use error::{Error, Result};
pub use paste::parse_clipboard_content;
pub use parser::parse;
pub use serializer::{serialize, serialize_block};
