//! [`FixtureDocument`]: host document stand-in

use std::collections::HashMap;

use clip_core::{HostDocument, NodeId};

/// Root of the managed editor container
pub const CONTAINER: NodeId = NodeId::new(1);
/// A block's node inside the container
pub const BLOCK_NODE: NodeId = NodeId::new(2);
/// A node belonging to some other widget on the page
pub const FOREIGN_NODE: NodeId = NodeId::new(100);

/// Node tree plus native selection flags.
///
/// Starts with [`CONTAINER`] holding [`BLOCK_NODE`], and [`FOREIGN_NODE`]
/// outside it. No text is selected and no field has focus.
#[derive(Debug, Clone)]
pub struct FixtureDocument {
    parents: HashMap<NodeId, NodeId>,
    next_node: u64,
    /// A text range is selected in some editable field
    pub text_selection: bool,
    /// Some editable field has focus
    pub field_focus: bool,
}

impl Default for FixtureDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureDocument {
    pub fn new() -> Self {
        let mut parents = HashMap::new();
        parents.insert(BLOCK_NODE, CONTAINER);
        Self {
            parents,
            next_node: 1000,
            text_selection: false,
            field_focus: false,
        }
    }

    /// Document with a text range selected (implies field focus)
    pub fn with_text_selection() -> Self {
        Self {
            text_selection: true,
            field_focus: true,
            ..Self::new()
        }
    }

    /// Document with a collapsed caret in a field
    pub fn with_caret() -> Self {
        Self {
            field_focus: true,
            ..Self::new()
        }
    }

    /// Add a node under `parent` and return it
    pub fn add_node(&mut self, parent: NodeId) -> NodeId {
        let node = NodeId::new(self.next_node);
        self.next_node += 1;
        self.parents.insert(node, parent);
        node
    }

    pub fn clear_selection(&mut self) {
        self.text_selection = false;
        self.field_focus = false;
    }
}

impl HostDocument for FixtureDocument {
    fn contains(&self, container: NodeId, target: NodeId) -> bool {
        let mut node = Some(target);
        while let Some(current) = node {
            if current == container {
                return true;
            }
            node = self.parents.get(&current).copied();
        }
        false
    }

    fn has_text_selection(&self) -> bool {
        self.text_selection
    }

    fn has_selection(&self) -> bool {
        self.text_selection || self.field_focus
    }
}
