// Write-only clipboard access. Failures are the caller's to downgrade into a
// warning; nothing here is allowed to abort an upload.

use anyhow::{Context, Result};

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The platform clipboard via arboard. The handle is opened lazily, so a
/// headless machine only fails when a copy is actually attempted.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().context("No clipboard available")?,
        };
        self.inner
            .insert(clipboard)
            .set_text(text)
            .context("Failed to write to clipboard")
    }
}
