//! Event-scoped clipboard data

use std::collections::BTreeMap;

use clip_content::PasteRequest;
use clip_content::paste::{clean_clipboard_html, escape_html};

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";

/// Image types turned into `<img>` markup when pasted without HTML
const PASTEABLE_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// A file attached to a clipboard transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFile {
    pub name: String,
    pub mime_type: String,
    /// Host URL the file's bytes can be loaded from
    pub url: String,
}

impl TransferFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            url: url.into(),
        }
    }

    pub fn is_pasteable_image(&self) -> bool {
        PASTEABLE_IMAGE_TYPES.contains(&self.mime_type.to_ascii_lowercase().as_str())
    }
}

/// Clipboard channels keyed by MIME type, plus attached files
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipboardTransfer {
    data: BTreeMap<String, String>,
    files: Vec<TransferFile>,
}

impl ClipboardTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transfer holding the given HTML and plain text
    pub fn with_content(html: impl Into<String>, plain_text: impl Into<String>) -> Self {
        let mut transfer = Self::new();
        transfer.set_data(TEXT_HTML, html);
        transfer.set_data(TEXT_PLAIN, plain_text);
        transfer
    }

    pub fn with_file(mut self, file: TransferFile) -> Self {
        self.files.push(file);
        self
    }

    pub fn set_data(&mut self, format: &str, data: impl Into<String>) {
        self.data.insert(format.to_ascii_lowercase(), data.into());
    }

    /// Data for a channel, or the empty string if the channel is unset
    pub fn get_data(&self, format: &str) -> &str {
        self.data
            .get(&format.to_ascii_lowercase())
            .map_or("", String::as_str)
    }

    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn files(&self) -> &[TransferFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.data.values().all(String::is_empty) && self.files.is_empty()
    }

    /// Build the paste parser input from this transfer.
    ///
    /// HTML is stripped of clipboard fragment markers and charset meta tags.
    /// With no HTML present, attached images become `<img>` markup and the
    /// plain text is dropped.
    pub fn paste_request(&self, allow_unfiltered_html: bool) -> PasteRequest {
        let mut html = clean_clipboard_html(self.get_data(TEXT_HTML));
        let mut plain_text = self.get_data(TEXT_PLAIN).to_string();

        if html.trim().is_empty() {
            let images: Vec<String> = self
                .files
                .iter()
                .filter(|file| file.is_pasteable_image())
                .map(|file| format!(r#"<img src="{}">"#, escape_html(&file.url)))
                .collect();
            if !images.is_empty() {
                tracing::debug!(count = images.len(), "Pasting attached images");
                html = images.concat();
                plain_text.clear();
            }
        }

        PasteRequest::new(html, plain_text).allow_unfiltered_html(allow_unfiltered_html)
    }
}
