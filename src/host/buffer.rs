//! Plain line buffer with a caret, the direct-mode host.

use crate::error::Result;
use crate::source::{CaretProvider, Direction};

/// Lines of text and the line the caret is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
    caret: usize,
}

impl LineBuffer {
    /// Split `text` into lines and put the caret on `caret_line`, clamped to
    /// the last line.
    pub fn new(text: &str, caret_line: usize) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        let caret = caret_line.min(lines.len() - 1);
        Self { lines, caret }
    }

    pub fn caret_line(&self) -> usize {
        self.caret
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }
}

impl CaretProvider for LineBuffer {
    type Handle = usize;

    fn caret(&self) -> Result<usize> {
        Ok(self.caret)
    }

    fn move_by_line(&self, handle: &mut usize, direction: Direction) -> Result<bool> {
        match handle.checked_add_signed(direction.delta()) {
            Some(next) if next < self.lines.len() => {
                *handle = next;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn line_text(&self, handle: &usize) -> Result<String> {
        Ok(self.lines.get(*handle).cloned().unwrap_or_default())
    }

    fn update_caret(&mut self, handle: &usize) -> Result<()> {
        self.caret = (*handle).min(self.lines.len() - 1);
        Ok(())
    }
}
