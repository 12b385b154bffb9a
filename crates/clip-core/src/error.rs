//! Error types for clip-core

use clip_content::ClientId;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Content error: {0}")]
    Content(#[from] clip_content::Error),

    #[error("Block not found: {client_id}")]
    BlockNotFound { client_id: ClientId },

    #[error("Unknown block type: {name}")]
    UnknownBlockType { name: String },

    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error("No async runtime available for flash timers: {0}")]
    NoRuntime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
