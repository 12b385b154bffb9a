//! Selection-aware clipboard interception for Block Clipboard
//!
//! Decides whether a host `copy`, `cut` or `paste` event is handled at block
//! granularity or left to native text editing, and carries out the block
//! level operation: serializing the selection into the clipboard, removing
//! cut blocks, and replacing the selection with pasted blocks.
//!
//! # Architecture
//!
//! Each event goes through three stages:
//!
//! 1. **Decide** - [`decide`] is a pure function over a [`SelectionSnapshot`]
//!    and the event's [`EventFacts`]; it either declines or intercepts.
//! 2. **Plan** - [`plan`] turns an intercepted event into a [`Command`] using
//!    the selection and the block codec.
//! 3. **Execute** - [`ClipboardInterceptor`] writes the transfer, flashes the
//!    copied block, and sends notices and mutations to the [`EditorSink`].

pub mod command;
pub mod config;
pub mod decision;
pub mod error;
pub mod event;
pub mod flash;
pub mod interceptor;
pub mod logging;
pub mod notice;
pub mod plan;
pub mod selection;
pub mod transfer;

pub use command::{CaretPosition, Command, CopyCommand, EditorSink, ReplaceBlocks};
pub use config::{ClipboardSettings, ParseFailurePolicy};
pub use decision::{DeclineReason, Decision, EventFacts, decide};
pub use error::{Error, Result};
pub use event::{ClipboardEvent, ClipboardEventKind};
pub use flash::{BlockHighlighter, FlashManager, FlashState};
pub use interceptor::{ClipboardInterceptor, Outcome};
pub use notice::{Notice, NoticeKind};
pub use plan::plan;
pub use selection::{HostDocument, NodeId, SelectionQuery, SelectionSnapshot};
pub use transfer::{ClipboardTransfer, TEXT_HTML, TEXT_PLAIN, TransferFile};
