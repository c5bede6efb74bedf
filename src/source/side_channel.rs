//! Level source for editors that expose no per-line accessibility API.
//!
//! The whole document is pulled out once through the clipboard using
//! synthesized keystrokes, then walked in memory. The caret is moved with the
//! editor's own "go to line" command.
//!
//! Acquisition sequence:
//!
//! 1. Release any modifier the user is still holding from the gesture.
//! 2. Save the clipboard.
//! 3. Ctrl+Shift+Home and copy: the number of newlines in the copied prefix is
//!    the caret's line index. If this copy fails, Right collapses the
//!    selection back onto the caret.
//! 4. Ctrl+A and copy: the document lines. An empty document is one empty
//!    line.
//!
//! Release restores the clipboard and, if no relocation happened, moves the
//! caret back to its original line. It runs from `Drop` as well, so the host
//! is restored even when a scan fails half way.

use super::{Direction, LevelSource, Unit, UnitKind};
use crate::config::SideChannelConfig;
use crate::error::{Error, Result};
use crate::level::{indent_level, is_blank};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Placed on the clipboard before each copy so a completed copy can be
/// told apart from stale content (U+2789, circled sans-serif digit ten).
pub const SELECTION_MARKER: &str = "\u{2789}";

/// Plain-text clipboard as exposed by the host.
pub trait ClipboardBridge {
    /// Replace the clipboard content. Fails with [`Error::ClipboardDenied`]
    /// while another process holds the clipboard.
    fn copy(&mut self, text: &str) -> Result<()>;

    /// Current clipboard text, with the same contention behavior as `copy`.
    fn read(&mut self) -> Result<String>;
}

impl<T: ClipboardBridge + ?Sized> ClipboardBridge for Box<T> {
    fn copy(&mut self, text: &str) -> Result<()> {
        (**self).copy(text)
    }

    fn read(&mut self) -> Result<String> {
        (**self).read()
    }
}

/// Keys the side channel needs to press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Home,
    Enter,
    Digit(u8),
    Char(char),
}

/// Modifier keys that may still be down when a gesture handler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    LeftControl,
    RightControl,
    LeftShift,
    RightShift,
    LeftAlt,
    RightAlt,
    LeftMeta,
    RightMeta,
}

impl Modifier {
    pub const ALL: [Modifier; 8] = [
        Modifier::LeftControl,
        Modifier::RightControl,
        Modifier::LeftShift,
        Modifier::RightShift,
        Modifier::LeftAlt,
        Modifier::RightAlt,
        Modifier::LeftMeta,
        Modifier::RightMeta,
    ];
}

/// A key press with optional Control/Shift held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub key: Key,
    pub control: bool,
    pub shift: bool,
}

impl Chord {
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            control: false,
            shift: false,
        }
    }

    pub const fn ctrl(key: Key) -> Self {
        Self {
            key,
            control: true,
            shift: false,
        }
    }

    pub const fn ctrl_shift(key: Key) -> Self {
        Self {
            key,
            control: true,
            shift: true,
        }
    }
}

/// Synthetic keyboard plus access to the host's message loop.
pub trait KeystrokeSynth {
    fn send(&mut self, chord: Chord) -> Result<()>;

    /// Whether `modifier` is physically or virtually down right now.
    fn is_held(&self, modifier: Modifier) -> bool;

    /// Send a key-up for `modifier`.
    fn release(&mut self, modifier: Modifier) -> Result<()>;

    /// Let the host process pending messages. Copies complete asynchronously,
    /// so this is called between clipboard polls.
    fn pump(&mut self);
}

/// Timing knobs for the clipboard round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideChannelOptions {
    /// Budget for one copy round trip, and for retrying a denied clipboard.
    pub timeout: Duration,
}

impl Default for SideChannelOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
        }
    }
}

impl From<&SideChannelConfig> for SideChannelOptions {
    fn from(config: &SideChannelConfig) -> Self {
        Self {
            timeout: config.clipboard_timeout(),
        }
    }
}

/// In-memory line walker fed by a clipboard capture of the whole document.
pub struct SideChannelSource<'a, B: ClipboardBridge, K: KeystrokeSynth> {
    bridge: &'a mut B,
    keys: &'a mut K,
    options: SideChannelOptions,
    saved_clipboard: Option<String>,
    lines: Vec<String>,
    index: usize,
    original_index: Option<usize>,
    relocated: bool,
    released: bool,
}

impl<'a, B: ClipboardBridge, K: KeystrokeSynth> SideChannelSource<'a, B, K> {
    /// Capture the document and the caret line from the host.
    pub fn acquire(bridge: &'a mut B, keys: &'a mut K, options: SideChannelOptions) -> Result<Self> {
        release_held_modifiers(keys)?;
        let saved = retry_transient(keys, options.timeout, || bridge.read())?;

        let mut source = Self {
            bridge,
            keys,
            options,
            saved_clipboard: Some(saved),
            lines: Vec::new(),
            index: 0,
            original_index: None,
            relocated: false,
            released: false,
        };
        source.capture()?;
        Ok(source)
    }

    /// Captured document lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Caret line at acquisition time.
    pub fn original_line(&self) -> Option<usize> {
        self.original_index
    }

    fn capture(&mut self) -> Result<()> {
        // At the document start this selection is empty and copies as ""
        self.keys.send(Chord::ctrl_shift(Key::Home))?;
        let prefix = match self.copy_selection() {
            Ok(prefix) => prefix,
            Err(err) => {
                // The line is unknown, so release cannot go back to it. Right
                // collapses the selection onto the caret it grew from.
                if let Err(collapse_err) = self.keys.send(Chord::plain(Key::Right)) {
                    warn!(%collapse_err, "could not collapse selection");
                }
                return Err(err);
            }
        };
        let line = prefix.matches('\n').count();
        self.original_index = Some(line);

        self.keys.send(Chord::ctrl(Key::Char('a')))?;
        let document = self.copy_selection()?;
        self.lines = document
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect();
        self.index = line.min(self.lines.len().saturating_sub(1));

        debug!(
            lines = self.lines.len(),
            caret_line = line,
            "captured document through clipboard"
        );
        Ok(())
    }

    /// Copy the host selection, waiting for the copy to land on the clipboard.
    fn copy_selection(&mut self) -> Result<String> {
        self.write_clipboard(SELECTION_MARKER)?;
        self.keys.send(Chord::ctrl(Key::Char('c')))?;

        let started = Instant::now();
        loop {
            match self.bridge.read() {
                Ok(data) if data != SELECTION_MARKER => return Ok(data),
                Ok(_) => {}
                Err(err) if err.is_transient() => trace!(%err, "clipboard busy while polling"),
                Err(err) => return Err(err),
            }
            self.keys.pump();

            let waited = started.elapsed();
            if waited > self.options.timeout {
                return Err(Error::ClipboardTimeout {
                    waited_ms: waited.as_millis(),
                });
            }
        }
    }

    fn write_clipboard(&mut self, text: &str) -> Result<()> {
        let bridge = &mut *self.bridge;
        retry_transient(&mut *self.keys, self.options.timeout, || bridge.copy(text))
    }

    /// Ctrl+G, the 1-based line number, Enter.
    fn go_to_line(&mut self, line: usize) -> Result<()> {
        self.keys.send(Chord::ctrl(Key::Char('g')))?;
        for digit in (line + 1).to_string().bytes() {
            self.keys.send(Chord::plain(Key::Digit(digit - b'0')))?;
        }
        self.keys.send(Chord::plain(Key::Enter))
    }
}

impl<B: ClipboardBridge, K: KeystrokeSynth> LevelSource for SideChannelSource<'_, B, K> {
    type Position = usize;

    fn kind(&self) -> UnitKind {
        UnitKind::Editable
    }

    fn move_by(&mut self, direction: Direction) -> Result<bool> {
        let next = self.index.checked_add_signed(direction.delta());
        match next {
            Some(index) if index < self.lines.len() => {
                self.index = index;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn current(&mut self) -> Result<Unit<usize>> {
        let text = self.lines.get(self.index).cloned().unwrap_or_default();
        Ok(Unit {
            position: self.index,
            level: Some(indent_level(&text)),
            blank: is_blank(&text),
            text,
        })
    }

    fn relocate_to(&mut self, position: &usize) -> Result<()> {
        self.relocated = true;
        self.go_to_line(*position)
    }

    fn release(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        let restored = match self.saved_clipboard.take() {
            Some(saved) => self.write_clipboard(&saved),
            None => Ok(()),
        };
        let repositioned = match (self.relocated, self.original_index) {
            (false, Some(line)) => self.go_to_line(line),
            _ => Ok(()),
        };
        restored.and(repositioned)
    }
}

impl<B: ClipboardBridge, K: KeystrokeSynth> Drop for SideChannelSource<'_, B, K> {
    fn drop(&mut self) {
        if let Err(err) = self.release() {
            warn!(%err, "failed to restore editor state after navigation");
        }
    }
}

/// Lift any modifier still down from the triggering gesture, so synthesized
/// keys are not read as chords.
fn release_held_modifiers<K: KeystrokeSynth>(keys: &mut K) -> Result<()> {
    for modifier in Modifier::ALL {
        if keys.is_held(modifier) {
            trace!(?modifier, "releasing held modifier");
            keys.release(modifier)?;
        }
    }
    Ok(())
}

/// Run `op`, retrying transient failures until `timeout` has elapsed.
fn retry_transient<K, T>(
    keys: &mut K,
    timeout: Duration,
    mut op: impl FnMut() -> Result<T>,
) -> Result<T>
where
    K: KeystrokeSynth,
{
    let started = Instant::now();
    loop {
        match op() {
            Err(err) if err.is_transient() && started.elapsed() < timeout => {
                trace!(%err, "clipboard busy, retrying");
                keys.pump();
            }
            result => return result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{EmulatedEditor, SharedClipboard, TextPos};

    const DOC: &str = "def f():\n  a=1\n  b=2\nc=3";

    fn fast() -> SideChannelOptions {
        SideChannelOptions {
            timeout: Duration::from_millis(50),
        }
    }

    fn open_editor(line: usize, col: usize) -> (EmulatedEditor<SharedClipboard>, SharedClipboard) {
        let clipboard = SharedClipboard::new("user data");
        let editor = EmulatedEditor::new(DOC, clipboard.clone()).with_caret(line, col);
        (editor, clipboard)
    }

    #[test]
    fn test_captures_lines_and_caret_line() {
        let (mut editor, mut clipboard) = open_editor(2, 3);
        let source = SideChannelSource::acquire(&mut clipboard, &mut editor, fast()).unwrap();

        assert_eq!(source.lines().len(), 4);
        assert_eq!(source.lines()[1], "  a=1");
        assert_eq!(source.original_line(), Some(2));
    }

    #[test]
    fn test_release_without_relocation_restores_host() {
        let (mut editor, mut clipboard) = open_editor(1, 2);
        let mut bridge = clipboard.clone();
        {
            let mut source = SideChannelSource::acquire(&mut bridge, &mut editor, fast()).unwrap();
            assert!(source.move_by(Direction::Forward).unwrap());
            source.release().unwrap();
        }

        assert_eq!(clipboard.read().unwrap(), "user data");
        assert_eq!(editor.caret().line, 1);
    }

    #[test]
    fn test_relocation_is_not_undone() {
        let (mut editor, mut clipboard) = open_editor(1, 2);
        let mut bridge = clipboard.clone();
        {
            let mut source = SideChannelSource::acquire(&mut bridge, &mut editor, fast()).unwrap();
            source.relocate_to(&3).unwrap();
        }

        assert_eq!(editor.caret().line, 3);
        assert_eq!(clipboard.read().unwrap(), "user data");
    }

    #[test]
    fn test_moves_stay_in_memory() {
        let (mut editor, mut clipboard) = open_editor(0, 1);
        let mut source = SideChannelSource::acquire(&mut clipboard, &mut editor, fast()).unwrap();

        assert!(!source.move_by(Direction::Backward).unwrap());
        for _ in 0..3 {
            assert!(source.move_by(Direction::Forward).unwrap());
        }
        assert!(!source.move_by(Direction::Forward).unwrap());
        assert_eq!(source.current().unwrap().text, "c=3");
    }

    #[test]
    fn test_transient_denials_are_retried() {
        let (mut editor, mut clipboard) = open_editor(1, 1);
        clipboard.deny_next(3);
        let mut bridge = clipboard.clone();

        let source = SideChannelSource::acquire(&mut bridge, &mut editor, fast()).unwrap();
        assert_eq!(source.original_line(), Some(1));
    }

    #[test]
    fn test_slow_copy_is_awaited() {
        let clipboard = SharedClipboard::new("keep");
        let mut editor = EmulatedEditor::new(DOC, clipboard.clone())
            .with_caret(3, 1)
            .with_copy_latency(5);
        let mut bridge = clipboard.clone();

        let source = SideChannelSource::acquire(&mut bridge, &mut editor, fast()).unwrap();
        assert_eq!(source.original_line(), Some(3));
    }

    #[test]
    fn test_copy_timeout_is_a_hard_failure_and_restores_clipboard() {
        let mut clipboard = SharedClipboard::new("keep");
        let mut editor = EmulatedEditor::new(DOC, clipboard.clone())
            .with_caret(1, 1)
            .with_copy_latency(u32::MAX);
        let mut bridge = clipboard.clone();

        let timed_out = matches!(
            SideChannelSource::acquire(&mut bridge, &mut editor, fast()),
            Err(Error::ClipboardTimeout { .. })
        );
        assert!(timed_out);
        assert_eq!(clipboard.read().unwrap(), "keep");
        assert_eq!(editor.caret(), TextPos::new(1, 1));
    }

    #[test]
    fn test_caret_at_start_on_empty_first_line() {
        let mut clipboard = SharedClipboard::new("keep");
        let mut editor = EmulatedEditor::new("\n  a\n  b", clipboard.clone()).with_caret(0, 0);
        let mut bridge = clipboard.clone();
        {
            let mut source = SideChannelSource::acquire(&mut bridge, &mut editor, fast()).unwrap();
            assert_eq!(source.original_line(), Some(0));
            assert_eq!(source.current().unwrap().text, "");
            source.release().unwrap();
        }

        assert_eq!(editor.caret().line, 0);
        assert_eq!(clipboard.read().unwrap(), "keep");
    }

    #[test]
    fn test_empty_document_is_one_blank_line() {
        let clipboard = SharedClipboard::new("keep");
        let mut editor = EmulatedEditor::new("", clipboard.clone());
        let mut bridge = clipboard.clone();

        let mut source = SideChannelSource::acquire(&mut bridge, &mut editor, fast()).unwrap();
        assert_eq!(source.lines(), [String::new()]);
        assert_eq!(source.original_line(), Some(0));
        assert!(source.current().unwrap().blank);
        assert!(!source.move_by(Direction::Forward).unwrap());
        assert!(!source.move_by(Direction::Backward).unwrap());
    }

    #[test]
    fn test_held_modifiers_are_released_first() {
        let (editor, mut clipboard) = open_editor(1, 1);
        let mut editor = editor.holding(&[Modifier::LeftAlt, Modifier::RightControl]);

        {
            let _source =
                SideChannelSource::acquire(&mut clipboard, &mut editor, fast()).unwrap();
        }
        assert!(!editor.is_held(Modifier::LeftAlt));
        assert!(!editor.is_held(Modifier::RightControl));
    }
}
