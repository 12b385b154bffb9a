//! Error types for clip-content

/// Result type for clip-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing block markup or clipboard content
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to parse {format} content: {message}")]
    ParseError { format: String, message: String },

    #[error("Invalid block delimiter at byte {position}: {message}")]
    InvalidBlockMarker { position: usize, message: String },

    #[error("Block \"{name}\" opened at byte {position} is never closed")]
    UnclosedBlock { name: String, position: usize },

    #[error("Unexpected closing delimiter for \"{name}\" at byte {position}")]
    UnexpectedCloser { name: String, position: usize },

    #[error("Clipboard content produced no blocks")]
    NothingToPaste,
}

impl Error {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ParseError {
            format: format.into(),
            message: message.into(),
        }
    }
}
