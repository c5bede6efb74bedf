//! Keystroke-driven code editor, the side-channel host.
//!
//! The editor has no line API at all. It understands the handful of keys the
//! side channel presses (arrows, select-to-start, select-all, copy, go-to-line)
//! and publishes copies to its clipboard after a configurable number of
//! message-loop pumps. Copying an empty selection publishes empty text.

use crate::error::Result;
use crate::source::{Chord, ClipboardBridge, Key, KeystrokeSynth, Modifier};
use std::collections::HashSet;
use tracing::{trace, warn};

/// A position in text (line, column in chars)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPos {
    pub line: usize,
    pub col: usize,
}

impl TextPos {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Create a position at the start of a line
    pub fn line_start(line: usize) -> Self {
        Self { line, col: 0 }
    }
}

#[derive(Debug)]
struct PendingCopy {
    text: String,
    pumps_left: u32,
}

/// In-memory editor reachable only through keystrokes and a clipboard.
#[derive(Debug)]
pub struct EmulatedEditor<C: ClipboardBridge> {
    lines: Vec<String>,
    caret: TextPos,
    anchor: Option<TextPos>,
    clipboard: C,
    copy_latency: u32,
    pending_copy: Option<PendingCopy>,
    goto_digits: Option<String>,
    held: HashSet<Modifier>,
}

impl<C: ClipboardBridge> EmulatedEditor<C> {
    pub fn new(text: &str, clipboard: C) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
            caret: TextPos::line_start(0),
            anchor: None,
            clipboard,
            copy_latency: 0,
            pending_copy: None,
            goto_digits: None,
            held: HashSet::new(),
        }
    }

    /// Place the caret, clamped to the document.
    pub fn with_caret(mut self, line: usize, col: usize) -> Self {
        let line = line.min(self.lines.len() - 1);
        let col = col.min(self.line_len(line));
        self.caret = TextPos::new(line, col);
        self
    }

    /// Delay copies until the message loop has been pumped `pumps` times.
    pub fn with_copy_latency(mut self, pumps: u32) -> Self {
        self.copy_latency = pumps;
        self
    }

    /// Pretend the user is still holding `modifiers`.
    pub fn holding(mut self, modifiers: &[Modifier]) -> Self {
        self.held.extend(modifiers.iter().copied());
        self
    }

    pub fn caret(&self) -> TextPos {
        self.caret
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    fn end(&self) -> TextPos {
        let last = self.lines.len() - 1;
        TextPos::new(last, self.line_len(last))
    }

    fn selection(&self) -> Option<(TextPos, TextPos)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    fn text_between(&self, start: TextPos, end: TextPos) -> String {
        let slice = |line: usize, from: usize, to: Option<usize>| -> String {
            let chars = self.lines[line].chars().skip(from);
            match to {
                Some(to) => chars.take(to.saturating_sub(from)).collect(),
                None => chars.collect(),
            }
        };

        if start.line == end.line {
            return slice(start.line, start.col, Some(end.col));
        }
        let mut parts = vec![slice(start.line, start.col, None)];
        for line in start.line + 1..end.line {
            parts.push(self.lines[line].clone());
        }
        parts.push(slice(end.line, 0, Some(end.col)));
        parts.join("\n")
    }

    /// Left with a selection collapses it onto its start without moving further.
    fn move_left(&mut self) {
        if let Some((start, _)) = self.selection() {
            self.anchor = None;
            self.caret = start;
            return;
        }
        self.anchor = None;
        if self.caret.col > 0 {
            self.caret.col -= 1;
        } else if self.caret.line > 0 {
            let line = self.caret.line - 1;
            self.caret = TextPos::new(line, self.line_len(line));
        }
    }

    /// Right with a selection collapses it onto its end.
    fn move_right(&mut self) {
        if let Some((_, end)) = self.selection() {
            self.anchor = None;
            self.caret = end;
            return;
        }
        self.anchor = None;
        if self.caret.col < self.line_len(self.caret.line) {
            self.caret.col += 1;
        } else if self.caret.line + 1 < self.lines.len() {
            self.caret = TextPos::line_start(self.caret.line + 1);
        }
    }

    fn copy(&mut self) {
        // An empty selection copies as empty text
        let text = match self.selection() {
            Some((start, end)) => self.text_between(start, end),
            None => {
                trace!("copy with empty selection");
                String::new()
            }
        };
        if self.copy_latency == 0 {
            self.publish(&text);
        } else {
            self.pending_copy = Some(PendingCopy {
                text,
                pumps_left: self.copy_latency,
            });
        }
    }

    fn publish(&mut self, text: &str) {
        if let Err(err) = self.clipboard.copy(text) {
            warn!(%err, "editor could not place copied text on the clipboard");
        }
    }

    fn go_to_line(&mut self, digits: &str) {
        let requested = digits.parse::<usize>().unwrap_or(1);
        let line = requested.saturating_sub(1).min(self.lines.len() - 1);
        self.anchor = None;
        self.caret = TextPos::line_start(line);
    }
}

impl<C: ClipboardBridge> KeystrokeSynth for EmulatedEditor<C> {
    fn send(&mut self, chord: Chord) -> Result<()> {
        if let Some(mut digits) = self.goto_digits.take() {
            match chord.key {
                Key::Digit(d) if !chord.control && d < 10 => {
                    digits.push(char::from(b'0' + d));
                    self.goto_digits = Some(digits);
                    return Ok(());
                }
                Key::Enter => {
                    self.go_to_line(&digits);
                    return Ok(());
                }
                // Any other key dismisses the go-to-line prompt
                _ => {}
            }
        }

        match (chord.control, chord.shift, chord.key) {
            (false, false, Key::Left) => self.move_left(),
            (false, false, Key::Right) => self.move_right(),
            (true, true, Key::Home) => {
                self.anchor = Some(self.anchor.unwrap_or(self.caret));
                self.caret = TextPos::line_start(0);
            }
            (true, false, Key::Char('a')) => {
                self.anchor = Some(TextPos::line_start(0));
                self.caret = self.end();
            }
            (true, false, Key::Char('c')) => self.copy(),
            (true, false, Key::Char('g')) => self.goto_digits = Some(String::new()),
            _ => trace!(?chord, "key ignored by editor"),
        }
        Ok(())
    }

    fn is_held(&self, modifier: Modifier) -> bool {
        self.held.contains(&modifier)
    }

    fn release(&mut self, modifier: Modifier) -> Result<()> {
        self.held.remove(&modifier);
        Ok(())
    }

    fn pump(&mut self) {
        let Some(pending) = self.pending_copy.as_mut() else {
            return;
        };
        pending.pumps_left = pending.pumps_left.saturating_sub(1);
        if pending.pumps_left == 0
            && let Some(done) = self.pending_copy.take()
        {
            self.publish(&done.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SharedClipboard;

    fn open(text: &str) -> (EmulatedEditor<SharedClipboard>, SharedClipboard) {
        let clipboard = SharedClipboard::new("");
        (EmulatedEditor::new(text, clipboard.clone()), clipboard)
    }

    #[test]
    fn test_select_to_start_and_copy() {
        let (editor, mut clipboard) = open("ab\ncd\nef");
        let mut editor = editor.with_caret(1, 1);

        editor.send(Chord::ctrl_shift(Key::Home)).unwrap();
        editor.send(Chord::ctrl(Key::Char('c'))).unwrap();
        assert_eq!(clipboard.read().unwrap(), "ab\nc");
    }

    #[test]
    fn test_select_all_copies_document() {
        let (mut editor, mut clipboard) = open("ab\n  cd\n");
        editor.send(Chord::ctrl(Key::Char('a'))).unwrap();
        editor.send(Chord::ctrl(Key::Char('c'))).unwrap();
        assert_eq!(clipboard.read().unwrap(), "ab\n  cd\n");
    }

    #[test]
    fn test_empty_selection_copies_empty_text() {
        let mut clipboard = SharedClipboard::new("keep");
        let mut editor = EmulatedEditor::new("ab", clipboard.clone());
        editor.send(Chord::ctrl_shift(Key::Home)).unwrap();
        editor.send(Chord::ctrl(Key::Char('c'))).unwrap();
        assert_eq!(clipboard.read().unwrap(), "");
    }

    #[test]
    fn test_arrows_collapse_selection() {
        let (editor, _) = open("ab
cd
ef");
        let mut editor = editor.with_caret(2, 1);
        editor.send(Chord::ctrl_shift(Key::Home)).unwrap();
        editor.send(Chord::plain(Key::Right)).unwrap();
        assert_eq!(editor.caret(), TextPos::new(2, 1));

        editor.send(Chord::ctrl_shift(Key::Home)).unwrap();
        editor.send(Chord::plain(Key::Left)).unwrap();
        assert_eq!(editor.caret(), TextPos::line_start(0));
        // Collapsed, so the next Left moves normally
        editor.send(Chord::plain(Key::Left)).unwrap();
        assert_eq!(editor.caret(), TextPos::line_start(0));
    }

    #[test]
    fn test_go_to_line() {
        let (mut editor, _) = open("a\nb\nc\nd\ne\nf\ng\nh\ni\nj\nk\nl");
        editor.send(Chord::ctrl(Key::Char('g'))).unwrap();
        editor.send(Chord::plain(Key::Digit(1))).unwrap();
        editor.send(Chord::plain(Key::Digit(1))).unwrap();
        editor.send(Chord::plain(Key::Enter)).unwrap();
        assert_eq!(editor.caret(), TextPos::line_start(10));
    }

    #[test]
    fn test_arrows_wrap_lines() {
        let (editor, _) = open("ab\ncd");
        let mut editor = editor.with_caret(0, 2);
        editor.send(Chord::plain(Key::Right)).unwrap();
        assert_eq!(editor.caret(), TextPos::line_start(1));
        editor.send(Chord::plain(Key::Left)).unwrap();
        assert_eq!(editor.caret(), TextPos::new(0, 2));
    }

    #[test]
    fn test_copy_lands_after_pumps() {
        let (editor, mut clipboard) = open("ab");
        let mut editor = editor.with_copy_latency(2);
        editor.send(Chord::ctrl(Key::Char('a'))).unwrap();
        editor.send(Chord::ctrl(Key::Char('c'))).unwrap();
        assert_eq!(clipboard.read().unwrap(), "");
        editor.pump();
        assert_eq!(clipboard.read().unwrap(), "");
        editor.pump();
        assert_eq!(clipboard.read().unwrap(), "ab");
    }
}
