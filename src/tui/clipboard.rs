//! System clipboard access
//!
//! A narrow seam so copy actions can be exercised without a real display
//! server. Copy failures surface as toasts and never change view state.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{ClearThinkError, Result};

pub trait ClipboardSink {
    /// Put `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns [`ClearThinkError::Clipboard`] when no clipboard is
    /// reachable or the write is refused.
    fn copy(&mut self, text: &str) -> Result<()>;
}

/// arboard-backed clipboard.
///
/// Opened fresh for each copy; a headless start does not disable copying
/// for the rest of the session if a display becomes available.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| ClearThinkError::Clipboard {
            reason: e.to_string(),
        })?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClearThinkError::Clipboard {
                reason: e.to_string(),
            })
    }
}

/// Capturing stand-in for tests and headless runs.
///
/// Clones share one log, so a test can keep a handle while the app owns
/// the boxed sink.
#[derive(Debug, Clone, Default)]
pub struct CapturingClipboard {
    copied: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl CapturingClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            copied: Arc::default(),
            fail: true,
        }
    }

    /// Everything copied so far, oldest first.
    pub fn copied(&self) -> Vec<String> {
        self.copied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ClipboardSink for CapturingClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if self.fail {
            return Err(ClearThinkError::Clipboard {
                reason: "clipboard unavailable".to_string(),
            });
        }
        self.copied
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capturing_clipboard_records_text() {
        let mut clipboard = CapturingClipboard::new();
        clipboard.copy("section text").unwrap();
        assert_eq!(clipboard.copied(), vec!["section text"]);
    }

    #[test]
    fn test_clones_share_the_copy_log() {
        let log = CapturingClipboard::new();
        let mut sink = log.clone();
        sink.copy("from the app side").unwrap();
        assert_eq!(log.copied(), vec!["from the app side"]);
    }

    #[test]
    fn test_failing_clipboard_reports_clipboard_error() {
        let mut clipboard = CapturingClipboard::failing();
        let err = clipboard.copy("anything").unwrap_err();
        assert_eq!(err.code(), "CT-030");
        assert!(clipboard.copied().is_empty());
    }
}
