//! Block type registry
//!
//! Maps block names to their display metadata. The clipboard layer uses the
//! title when announcing what was copied.

use crate::block::qualify_name;
use std::collections::HashMap;

/// Display metadata for a block type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockType {
    /// Fully qualified name, e.g. `core/paragraph`
    pub name: String,
    /// Human readable title, e.g. `Paragraph`
    pub title: String,
}

impl BlockType {
    pub fn new(name: impl AsRef<str>, title: impl Into<String>) -> Self {
        Self {
            name: qualify_name(name.as_ref()),
            title: title.into(),
        }
    }
}

/// Registry mapping block names to block types.
///
/// # Example
///
/// ```
/// use clip_content::BlockTypeRegistry;
///
/// let registry = BlockTypeRegistry::with_builtins();
/// assert_eq!(registry.get("core/paragraph").unwrap().title, "Paragraph");
/// assert_eq!(registry.get("paragraph").unwrap().title, "Paragraph");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BlockTypeRegistry {
    types: HashMap<String, BlockType>,
}

impl BlockTypeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Create a registry holding the block types the paste parser can produce.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, title) in [
            ("paragraph", "Paragraph"),
            ("heading", "Heading"),
            ("list", "List"),
            ("quote", "Quote"),
            ("image", "Image"),
            ("code", "Code"),
            ("separator", "Separator"),
            ("table", "Table"),
            ("html", "Custom HTML"),
            ("freeform", "Classic"),
            ("group", "Group"),
        ] {
            registry.register(BlockType::new(name, title));
        }
        registry
    }

    /// Register a block type, replacing any previous one with the same name.
    pub fn register(&mut self, block_type: BlockType) {
        self.types.insert(block_type.name.clone(), block_type);
    }

    /// Look up a block type; bare names resolve in the `core` namespace.
    pub fn get(&self, name: &str) -> Option<&BlockType> {
        self.types.get(&qualify_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sorted list of registered names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.keys().cloned().collect();
        names.sort();
        names
    }
}
