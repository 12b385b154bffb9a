//! Shared test fixtures for the Block Clipboard workspace.
//!
//! Dev-dependency only; never published.
//!
//! # Modules
//!
//! - [`editor`] - [`FixtureEditor`], an in-memory block store that records
//!   every command it receives
//! - [`document`] - [`FixtureDocument`], a node tree with switchable native
//!   selection state

pub mod document;
pub mod editor;

pub use document::{BLOCK_NODE, CONTAINER, FOREIGN_NODE, FixtureDocument};
pub use editor::{EditorCall, FixtureEditor};

use std::sync::Arc;

use clip_core::{ClipboardInterceptor, ClipboardSettings, FlashState};

/// Interceptor over the given fixtures, flashing into a fresh [`FlashState`].
///
/// Must be called inside a tokio runtime.
pub fn interceptor(
    editor: FixtureEditor,
    document: FixtureDocument,
    settings: ClipboardSettings,
) -> (ClipboardInterceptor<FixtureEditor, FixtureDocument>, Arc<FlashState>) {
    let state = Arc::new(FlashState::new());
    let interceptor =
        ClipboardInterceptor::new(editor, document, CONTAINER, state.clone(), settings)
            .expect("interceptor fixture needs a tokio runtime");
    (interceptor, state)
}
