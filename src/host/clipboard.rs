//! Clipboard bridges.

use crate::error::{Error, Result};
use crate::source::ClipboardBridge;
use std::cell::RefCell;
use std::rc::Rc;

/// System clipboard through arboard.
///
/// The arboard handle is kept alive for the bridge's lifetime; on X11 the
/// owner must stay around to serve paste requests.
pub struct SystemClipboard {
    clipboard: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard =
            arboard::Clipboard::new().map_err(|e| Error::ClipboardUnavailable(e.to_string()))?;
        Ok(Self { clipboard })
    }
}

fn map_arboard_error(err: arboard::Error) -> Error {
    match err {
        arboard::Error::ClipboardOccupied => Error::ClipboardDenied(err.to_string()),
        other => Error::ClipboardUnavailable(other.to_string()),
    }
}

impl ClipboardBridge for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).map_err(map_arboard_error)
    }

    fn read(&mut self) -> Result<String> {
        match self.clipboard.get_text() {
            Ok(text) => Ok(text),
            // Empty or non-text clipboard reads as empty text
            Err(arboard::Error::ContentNotAvailable) => Ok(String::new()),
            Err(err) => Err(map_arboard_error(err)),
        }
    }
}

#[derive(Debug, Default)]
struct ClipboardState {
    content: String,
    deny_remaining: u32,
}

/// Process-local clipboard shared between clones.
///
/// Every clone sees the same content. [`deny_next`](Self::deny_next) makes
/// the following operations fail as if another process held the clipboard.
#[derive(Debug, Clone, Default)]
pub struct SharedClipboard {
    state: Rc<RefCell<ClipboardState>>,
}

impl SharedClipboard {
    pub fn new(content: &str) -> Self {
        Self {
            state: Rc::new(RefCell::new(ClipboardState {
                content: content.to_string(),
                deny_remaining: 0,
            })),
        }
    }

    /// Fail the next `count` copy/read operations with a transient denial.
    pub fn deny_next(&self, count: u32) {
        self.state.borrow_mut().deny_remaining = count;
    }

    fn check_access(&self) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.deny_remaining > 0 {
            state.deny_remaining -= 1;
            return Err(Error::ClipboardDenied("clipboard is open in another window".into()));
        }
        Ok(())
    }
}

impl ClipboardBridge for SharedClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        self.check_access()?;
        self.state.borrow_mut().content = text.to_string();
        Ok(())
    }

    fn read(&mut self) -> Result<String> {
        self.check_access()?;
        Ok(self.state.borrow().content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_content() {
        let mut a = SharedClipboard::new("one");
        let mut b = a.clone();
        b.copy("two").unwrap();
        assert_eq!(a.read().unwrap(), "two");
    }

    #[test]
    fn test_denials_run_out() {
        let mut clipboard = SharedClipboard::new("x");
        clipboard.deny_next(2);
        assert!(clipboard.read().unwrap_err().is_transient());
        assert!(clipboard.copy("y").unwrap_err().is_transient());
        assert_eq!(clipboard.read().unwrap(), "x");
    }
}
