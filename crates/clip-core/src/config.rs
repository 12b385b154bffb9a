//! Clipboard settings
//!
//! Settings are read from a TOML file; every key is optional:
//!
//! ```toml
//! flash_duration_ms = 1000
//! can_user_use_unfiltered_html = false
//! on_parse_failure = "propagate"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default time a copied block stays highlighted.
pub const DEFAULT_FLASH_DURATION_MS: u64 = 1000;

/// What a paste does when the clipboard content cannot be parsed.
///
/// In both cases the host's default paste has already been suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseFailurePolicy {
    /// Return the parse error; the selection is left untouched.
    #[default]
    Propagate,
    /// Replace the selection with one freeform block holding the raw content.
    InsertRawText,
}

impl FromStr for ParseFailurePolicy {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "propagate" | "fail" => Ok(Self::Propagate),
            "insert-raw-text" | "raw" => Ok(Self::InsertRawText),
            _ => Err(Error::InvalidConfig {
                path: "<on_parse_failure>".into(),
                message: format!("unknown parse failure policy: {s}"),
            }),
        }
    }
}

impl fmt::Display for ParseFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Propagate => write!(f, "propagate"),
            Self::InsertRawText => write!(f, "insert-raw-text"),
        }
    }
}

/// Clipboard interceptor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardSettings {
    /// How long a copied block stays highlighted, in milliseconds
    #[serde(default = "default_flash_duration_ms")]
    pub flash_duration_ms: u64,
    /// Whether pasted markup may skip filtering
    #[serde(default)]
    pub can_user_use_unfiltered_html: bool,
    #[serde(default)]
    pub on_parse_failure: ParseFailurePolicy,
}

fn default_flash_duration_ms() -> u64 {
    DEFAULT_FLASH_DURATION_MS
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            flash_duration_ms: default_flash_duration_ms(),
            can_user_use_unfiltered_html: false,
            on_parse_failure: ParseFailurePolicy::default(),
        }
    }
}

impl ClipboardSettings {
    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_duration_ms)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::InvalidConfig {
            path: "<string>".into(),
            message: e.to_string(),
        })
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file doesn't exist and
    /// `InvalidConfig` if it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load settings from a file, falling back to defaults if it doesn't exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path) {
            Err(Error::ConfigNotFound { path }) => {
                tracing::debug!(?path, "No clipboard settings file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }
}
