//! Read-side collaborators: the block selection and the host document

use clip_content::{Block, BlockType, ClientId};

use crate::error::Result;
use crate::event::ClipboardEventKind;

/// Opaque handle to a node in the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Read access to the editor's block store and selection
pub trait SelectionQuery {
    /// Selected block ids, in document order
    fn selected_block_ids(&self) -> Vec<ClientId>;

    /// Whether more than one block is selected as a unit
    fn has_multi_selection(&self) -> bool;

    /// Type metadata of a block.
    ///
    /// # Errors
    /// Returns `BlockNotFound` for an id the store doesn't know.
    fn block_type(&self, client_id: &ClientId) -> Result<BlockType>;

    /// Resolve ids to blocks, preserving order.
    ///
    /// # Errors
    /// Returns `BlockNotFound` if any id no longer resolves.
    fn blocks_by_ids(&self, client_ids: &[ClientId]) -> Result<Vec<Block>>;
}

/// Native selection state and node containment of the host document
pub trait HostDocument {
    /// Whether `target` is `container` or one of its descendants
    fn contains(&self, container: NodeId, target: NodeId) -> bool;

    /// Whether a non-collapsed text range is selected in an editable field
    fn has_text_selection(&self) -> bool;

    /// Whether any editable field holds a selection or a caret
    fn has_selection(&self) -> bool;
}

/// Selection state resolved once per clipboard event
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionSnapshot {
    pub selected: Vec<ClientId>,
    pub has_multi_selection: bool,
    /// Native selection that takes precedence over a single block selection
    pub has_native_text_selection: bool,
}

impl SelectionSnapshot {
    /// Query the selection and the native selection predicate for `kind`.
    ///
    /// Copy and cut only defer to a selected text range; paste defers to
    /// any field selection or focus.
    pub fn capture<S, D>(selection: &S, document: &D, kind: ClipboardEventKind) -> Self
    where
        S: SelectionQuery + ?Sized,
        D: HostDocument + ?Sized,
    {
        let has_native_text_selection = match kind {
            ClipboardEventKind::Copy | ClipboardEventKind::Cut => document.has_text_selection(),
            ClipboardEventKind::Paste => document.has_selection(),
        };
        Self {
            selected: selection.selected_block_ids(),
            has_multi_selection: selection.has_multi_selection(),
            has_native_text_selection,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }
}
