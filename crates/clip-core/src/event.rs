//! Host clipboard events

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::selection::NodeId;
use crate::transfer::ClipboardTransfer;

/// The three clipboard gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardEventKind {
    Copy,
    Cut,
    Paste,
}

impl ClipboardEventKind {
    /// Whether the event writes the selection into the clipboard
    pub fn writes_clipboard(self) -> bool {
        matches!(self, Self::Copy | Self::Cut)
    }
}

impl fmt::Display for ClipboardEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Copy => write!(f, "copy"),
            Self::Cut => write!(f, "cut"),
            Self::Paste => write!(f, "paste"),
        }
    }
}

/// A clipboard event as delivered by the host
///
/// Copy and cut start with an empty transfer that handlers write into;
/// paste carries the clipboard contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEvent {
    kind: ClipboardEventKind,
    target: NodeId,
    clipboard_data: ClipboardTransfer,
    default_prevented: bool,
    claimed: bool,
}

impl ClipboardEvent {
    pub fn new(
        kind: ClipboardEventKind,
        target: NodeId,
        clipboard_data: ClipboardTransfer,
    ) -> Self {
        Self {
            kind,
            target,
            clipboard_data,
            default_prevented: false,
            claimed: false,
        }
    }

    pub fn copy(target: NodeId) -> Self {
        Self::new(ClipboardEventKind::Copy, target, ClipboardTransfer::new())
    }

    pub fn cut(target: NodeId) -> Self {
        Self::new(ClipboardEventKind::Cut, target, ClipboardTransfer::new())
    }

    pub fn paste(target: NodeId, clipboard_data: ClipboardTransfer) -> Self {
        Self::new(ClipboardEventKind::Paste, target, clipboard_data)
    }

    pub fn kind(&self) -> ClipboardEventKind {
        self.kind
    }

    /// Node the event originated from
    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn clipboard_data(&self) -> &ClipboardTransfer {
        &self.clipboard_data
    }

    pub fn clipboard_data_mut(&mut self) -> &mut ClipboardTransfer {
        &mut self.clipboard_data
    }

    /// Suppress the host's native clipboard action
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Mark the event as taken over at block level and suppress the default.
    pub fn claim(&mut self) {
        self.claimed = true;
        self.prevent_default();
    }

    /// Whether a block-level interceptor already took over this event
    pub fn is_claimed(&self) -> bool {
        self.claimed
    }
}
