//! Transient highlight of copied blocks
//!
//! [`FlashManager::flash`] highlights a block and spawns a timer task that
//! clears it. Timer handles are kept until the manager shuts down; shutdown
//! (or drop) aborts every pending timer so no highlight changes afterwards.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use clip_content::ClientId;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{Error, Result};

/// Receives highlight changes for blocks
pub trait BlockHighlighter: Send + Sync {
    fn set_highlighted(&self, client_id: &ClientId, highlighted: bool);
}

/// In-memory highlight flags keyed by block
#[derive(Debug, Default)]
pub struct FlashState {
    highlighted: Mutex<HashMap<ClientId, bool>>,
}

impl FlashState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_highlighted(&self, client_id: &ClientId) -> bool {
        self.highlighted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(client_id)
            .copied()
            .unwrap_or(false)
    }

    /// Currently highlighted blocks, sorted
    pub fn highlighted(&self) -> Vec<ClientId> {
        let map = self.highlighted.lock().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<ClientId> = map
            .iter()
            .filter(|(_, highlighted)| **highlighted)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }
}

impl BlockHighlighter for FlashState {
    fn set_highlighted(&self, client_id: &ClientId, highlighted: bool) {
        self.highlighted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(*client_id, highlighted);
    }
}

/// Owns the clear timers of flashed blocks
pub struct FlashManager {
    handle: Handle,
    duration: Duration,
    highlighter: Arc<dyn BlockHighlighter>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl FlashManager {
    /// Create a manager whose timers run on the current tokio runtime.
    ///
    /// # Errors
    /// Returns `NoRuntime` when called outside a runtime.
    pub fn new(highlighter: Arc<dyn BlockHighlighter>, duration: Duration) -> Result<Self> {
        let handle = Handle::try_current().map_err(|e| Error::NoRuntime(e.to_string()))?;
        Ok(Self::with_handle(handle, highlighter, duration))
    }

    pub fn with_handle(
        handle: Handle,
        highlighter: Arc<dyn BlockHighlighter>,
        duration: Duration,
    ) -> Self {
        Self {
            handle,
            duration,
            highlighter,
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Highlight a block and schedule the highlight to clear.
    ///
    /// Flashing a block again while its timer is pending adds a second
    /// timer; both clear the same flag.
    pub fn flash(&self, client_id: ClientId) {
        self.highlighter.set_highlighted(&client_id, true);

        let highlighter = Arc::clone(&self.highlighter);
        let duration = self.duration;
        let timer = self.handle.spawn(async move {
            tokio::time::sleep(duration).await;
            highlighter.set_highlighted(&client_id, false);
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|handle| !handle.is_finished());
        pending.push(timer);
        tracing::trace!(%client_id, pending = pending.len(), "Flashed block");
    }

    /// Number of timers that have not fired yet
    pub fn pending(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Abort every pending timer.
    ///
    /// Highlights that were still set stay set; the owner of the highlight
    /// state is expected to be going away with the manager.
    pub fn shutdown(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let count = pending.len();
        for handle in pending.drain(..) {
            handle.abort();
        }
        if count > 0 {
            tracing::debug!(count, "Cancelled pending flash timers");
        }
    }
}

impl Drop for FlashManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for FlashManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlashManager")
            .field("duration", &self.duration)
            .field("pending", &self.pending())
            .finish()
    }
}
