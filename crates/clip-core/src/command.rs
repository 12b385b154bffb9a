//! Commands produced for an intercepted event, and the sink that runs them

use clip_content::{Block, ClientId};

use crate::notice::Notice;

/// Where the caret lands inside the focused block after a replace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaretPosition {
    Start,
    #[default]
    End,
}

/// Replace a selection with new blocks and move focus
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceBlocks {
    /// Blocks being replaced, in selection order
    pub targets: Vec<ClientId>,
    pub blocks: Vec<Block>,
    /// Index into `blocks` of the block that receives focus
    pub focus_index: usize,
    pub caret: CaretPosition,
}

impl ReplaceBlocks {
    /// Replace `targets` with `blocks`, focusing the end of the last block
    pub fn new(targets: Vec<ClientId>, blocks: Vec<Block>) -> Self {
        let focus_index = blocks.len().saturating_sub(1);
        Self {
            targets,
            blocks,
            focus_index,
            caret: CaretPosition::End,
        }
    }

    pub fn focused_block(&self) -> Option<&Block> {
        self.blocks.get(self.focus_index)
    }
}

/// Clipboard write plus feedback for a copy or cut
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyCommand {
    /// Serialized selection, written to both text channels
    pub payload: String,
    pub notice: Notice,
    /// Block to highlight; set only when a single block is copied
    pub flash: Option<ClientId>,
}

/// What the interceptor does with an event it claimed
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Copy(CopyCommand),
    /// Copy, then remove the listed blocks
    Cut { copy: CopyCommand, remove: Vec<ClientId> },
    Replace(ReplaceBlocks),
}

impl Command {
    pub fn copy_part(&self) -> Option<&CopyCommand> {
        match self {
            Self::Copy(copy) | Self::Cut { copy, .. } => Some(copy),
            Self::Replace(_) => None,
        }
    }
}

/// Write side of the editor store plus its notice area
pub trait EditorSink {
    fn remove_blocks(&mut self, client_ids: &[ClientId]);

    fn replace_blocks(&mut self, replace: ReplaceBlocks);

    fn notify(&mut self, notice: Notice);
}
