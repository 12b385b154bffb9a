//! Block types and structural helpers

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uuid::Uuid;

/// Namespace assumed for block names written without one.
pub const DEFAULT_NAMESPACE: &str = "core";

/// Stable identifier of a block inside the editor store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One piece of a block's inner content, in document order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ContentPiece {
    /// Raw HTML owned by the block itself
    Html(String),
    /// A nested block
    Block(Block),
}

/// A structured content block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Identifier assigned by the store (fresh for parsed blocks)
    pub client_id: ClientId,
    /// Fully qualified block name, e.g. `core/paragraph`
    pub name: String,
    /// Block attributes as a JSON object
    pub attributes: Map<String, Value>,
    /// Inner HTML interleaved with nested blocks
    pub inner_content: Vec<ContentPiece>,
}

impl Block {
    /// Create a block with no attributes and no content
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            client_id: ClientId::new(),
            name: qualify_name(name.as_ref()),
            attributes: Map::new(),
            inner_content: Vec::new(),
        }
    }

    /// Create a leaf block holding a single HTML fragment
    pub fn with_html(name: impl AsRef<str>, html: impl Into<String>) -> Self {
        let html = html.into();
        let mut block = Self::new(name);
        if !html.is_empty() {
            block.inner_content.push(ContentPiece::Html(html));
        }
        block
    }

    /// Set an attribute, returning the block for chaining
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Append a nested block
    pub fn child(mut self, block: Block) -> Self {
        self.inner_content.push(ContentPiece::Block(block));
        self
    }

    /// Append an HTML fragment
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.inner_content.push(ContentPiece::Html(html.into()));
        self
    }

    /// Concatenation of the block's own HTML fragments (nested blocks excluded)
    pub fn inner_html(&self) -> String {
        self.inner_content
            .iter()
            .filter_map(|piece| match piece {
                ContentPiece::Html(html) => Some(html.as_str()),
                ContentPiece::Block(_) => None,
            })
            .collect()
    }

    /// Nested blocks in order
    pub fn inner_blocks(&self) -> impl Iterator<Item = &Block> {
        self.inner_content.iter().filter_map(|piece| match piece {
            ContentPiece::Block(block) => Some(block),
            ContentPiece::Html(_) => None,
        })
    }

    /// Short name without the default namespace (`core/quote` -> `quote`)
    pub fn short_name(&self) -> &str {
        self.name
            .strip_prefix(DEFAULT_NAMESPACE)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(&self.name)
    }

    /// Same name, attributes, and content tree, ignoring client ids.
    pub fn structurally_eq(&self, other: &Block) -> bool {
        self.name == other.name
            && self.attributes == other.attributes
            && self.inner_content.len() == other.inner_content.len()
            && self
                .inner_content
                .iter()
                .zip(&other.inner_content)
                .all(|pair| match pair {
                    (ContentPiece::Html(a), ContentPiece::Html(b)) => a == b,
                    (ContentPiece::Block(a), ContentPiece::Block(b)) => a.structurally_eq(b),
                    _ => false,
                })
    }
}

/// Prefix `core/` onto names that carry no namespace
pub fn qualify_name(name: &str) -> String {
    if name.contains('/') {
        name.to_string()
    } else {
        format!("{DEFAULT_NAMESPACE}/{name}")
    }
}
