//! Codec trait consumed by the clipboard layer

use crate::block::Block;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Shape of the parser output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteMode {
    /// A sequence of blocks (clipboard paste over a block selection)
    #[default]
    Blocks,
    /// A single paragraph holding only inline content
    Inline,
}

/// Everything the paste parser needs from a clipboard event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PasteRequest {
    /// Content of the `text/html` channel
    pub html: String,
    /// Content of the `text/plain` channel
    pub plain_text: String,
    pub mode: PasteMode,
    /// Whether the current user may paste markup without filtering
    pub allow_unfiltered_html: bool,
}

impl PasteRequest {
    pub fn new(html: impl Into<String>, plain_text: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            plain_text: plain_text.into(),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: PasteMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn allow_unfiltered_html(mut self, allow: bool) -> Self {
        self.allow_unfiltered_html = allow;
        self
    }
}

/// Serializer and paste parser pair used by the clipboard interceptor
pub trait BlockCodec: Send + Sync {
    /// Serialize an ordered block sequence to the portable payload
    fn serialize(&self, blocks: &[Block]) -> String;

    /// Parse clipboard content into an ordered block sequence
    fn parse_clipboard_content(&self, request: &PasteRequest) -> Result<Vec<Block>>;
}

/// Codec backed by the comment-delimited block markup
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupCodec;

impl MarkupCodec {
    pub fn new() -> Self {
        Self
    }
}

impl BlockCodec for MarkupCodec {
    fn serialize(&self, blocks: &[Block]) -> String {
        crate::serializer::serialize(blocks)
    }

    fn parse_clipboard_content(&self, request: &PasteRequest) -> Result<Vec<Block>> {
        crate::paste::parse_clipboard_content(request)
    }
}
