//! System clipboard access.

use crate::app::{Result, V2exError};

/// Best-effort text clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The OS clipboard via arboard. A fresh handle is opened per write; some
/// platforms drop ownership when the handle is released, which is acceptable
/// for copying a single URL.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text))
            .map_err(|e| V2exError::Clipboard(e.to_string()))
    }
}
