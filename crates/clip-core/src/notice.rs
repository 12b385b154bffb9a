//! User-facing notices

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the host should present a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Short-lived, dismisses itself (a snackbar)
    #[default]
    Transient,
}

/// A success message shown after a clipboard operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn transient(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Transient,
        }
    }

    /// Notice for copying a single block, named by its type title
    pub fn copied_block(title: &str) -> Self {
        Self::transient(format!("Copied block \"{title}\" to clipboard."))
    }

    /// Notice for copying several blocks
    pub fn copied_blocks(count: usize) -> Self {
        Self::transient(format!("Copied {count} blocks to clipboard."))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
