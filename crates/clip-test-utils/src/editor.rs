//! [`FixtureEditor`]: in-memory block store and command recorder

use clip_content::{Block, BlockType, BlockTypeRegistry, ClientId};
use clip_core::{EditorSink, Error, Notice, ReplaceBlocks, Result, SelectionQuery};

/// A command received by the editor, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCall {
    Remove(Vec<ClientId>),
    Replace(ReplaceBlocks),
    Notify(Notice),
}

/// Block store holding a flat block list and a selection.
///
/// Commands are applied to the store and also recorded in [`calls`].
///
/// [`calls`]: FixtureEditor::calls
///
/// # Example
///
/// ```rust
/// use clip_content::Block;
/// use clip_test_utils::FixtureEditor;
///
/// let mut editor = FixtureEditor::with_blocks(vec![Block::new("paragraph"), Block::new("quote")]);
/// editor.select_all();
/// assert_eq!(editor.selection().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FixtureEditor {
    blocks: Vec<Block>,
    selected: Vec<ClientId>,
    types: BlockTypeRegistry,
    calls: Vec<EditorCall>,
}

impl Default for FixtureEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureEditor {
    /// Empty store with the built-in block types registered
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            selected: Vec::new(),
            types: BlockTypeRegistry::with_builtins(),
            calls: Vec::new(),
        }
    }

    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            ..Self::new()
        }
    }

    /// Append a block, returning its id
    pub fn push(&mut self, block: Block) -> ClientId {
        let client_id = block.client_id;
        self.blocks.push(block);
        client_id
    }

    pub fn register_type(&mut self, block_type: BlockType) {
        self.types.register(block_type);
    }

    /// Select the given blocks; ids are not checked against the store
    pub fn select(&mut self, client_ids: &[ClientId]) {
        self.selected = client_ids.to_vec();
    }

    pub fn select_all(&mut self) {
        self.selected = self.block_ids();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    pub fn selection(&self) -> &[ClientId] {
        &self.selected
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block_ids(&self) -> Vec<ClientId> {
        self.blocks.iter().map(|b| b.client_id).collect()
    }

    /// Block names in document order
    pub fn block_names(&self) -> Vec<String> {
        self.blocks.iter().map(|b| b.name.clone()).collect()
    }

    pub fn calls(&self) -> &[EditorCall] {
        &self.calls
    }

    pub fn notices(&self) -> Vec<&Notice> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                EditorCall::Notify(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    pub fn replacements(&self) -> Vec<&ReplaceBlocks> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                EditorCall::Replace(replace) => Some(replace),
                _ => None,
            })
            .collect()
    }

    fn find(&self, client_id: &ClientId) -> Result<&Block> {
        self.blocks
            .iter()
            .find(|b| b.client_id == *client_id)
            .ok_or(Error::BlockNotFound {
                client_id: *client_id,
            })
    }
}

impl SelectionQuery for FixtureEditor {
    fn selected_block_ids(&self) -> Vec<ClientId> {
        self.selected.clone()
    }

    fn has_multi_selection(&self) -> bool {
        self.selected.len() > 1
    }

    fn block_type(&self, client_id: &ClientId) -> Result<BlockType> {
        let block = self.find(client_id)?;
        self.types
            .get(&block.name)
            .cloned()
            .ok_or_else(|| Error::UnknownBlockType {
                name: block.name.clone(),
            })
    }

    fn blocks_by_ids(&self, client_ids: &[ClientId]) -> Result<Vec<Block>> {
        client_ids
            .iter()
            .map(|id| self.find(id).cloned())
            .collect()
    }
}

impl EditorSink for FixtureEditor {
    fn remove_blocks(&mut self, client_ids: &[ClientId]) {
        self.blocks.retain(|b| !client_ids.contains(&b.client_id));
        self.selected.retain(|id| !client_ids.contains(id));
        self.calls.push(EditorCall::Remove(client_ids.to_vec()));
    }

    /// Insert the new blocks where the first target was and select the
    /// focused block
    fn replace_blocks(&mut self, replace: ReplaceBlocks) {
        let position = replace
            .targets
            .first()
            .and_then(|first| self.blocks.iter().position(|b| b.client_id == *first))
            .unwrap_or(self.blocks.len());

        self.blocks.retain(|b| !replace.targets.contains(&b.client_id));
        let position = position.min(self.blocks.len());
        self.blocks
            .splice(position..position, replace.blocks.iter().cloned());

        self.selected = replace
            .focused_block()
            .map(|b| vec![b.client_id])
            .unwrap_or_default();
        self.calls.push(EditorCall::Replace(replace));
    }

    fn notify(&mut self, notice: Notice) {
        self.calls.push(EditorCall::Notify(notice));
    }
}
