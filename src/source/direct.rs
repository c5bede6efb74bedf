//! Level source over a native text caret.

use super::{Direction, LevelSource, Unit, UnitKind};
use crate::error::Result;
use crate::level::{indent_level, is_blank};
use std::fmt;

/// Host text control that can move a caret handle by whole lines.
pub trait CaretProvider {
    /// Copyable caret position, independent of the live caret.
    type Handle: Clone + fmt::Debug;

    /// Handle at the current caret position.
    fn caret(&self) -> Result<Self::Handle>;

    /// Move `handle` one line. Returns false if it could not move.
    fn move_by_line(&self, handle: &mut Self::Handle, direction: Direction) -> Result<bool>;

    /// Full text of the line containing `handle`.
    fn line_text(&self, handle: &Self::Handle) -> Result<String>;

    /// Put the live caret at `handle`.
    fn update_caret(&mut self, handle: &Self::Handle) -> Result<()>;
}

/// Reads lines straight from a [`CaretProvider`].
pub struct DirectSource<'a, C: CaretProvider> {
    host: &'a mut C,
    cursor: C::Handle,
}

impl<'a, C: CaretProvider> DirectSource<'a, C> {
    /// Start at the host's current caret.
    pub fn acquire(host: &'a mut C) -> Result<Self> {
        let cursor = host.caret()?;
        Ok(Self { host, cursor })
    }
}

impl<C: CaretProvider> LevelSource for DirectSource<'_, C> {
    type Position = C::Handle;

    fn kind(&self) -> UnitKind {
        UnitKind::Editable
    }

    fn move_by(&mut self, direction: Direction) -> Result<bool> {
        self.host.move_by_line(&mut self.cursor, direction)
    }

    fn current(&mut self) -> Result<Unit<C::Handle>> {
        let text = self.host.line_text(&self.cursor)?;
        Ok(Unit {
            position: self.cursor.clone(),
            level: Some(indent_level(&text)),
            blank: is_blank(&text),
            text,
        })
    }

    fn relocate_to(&mut self, position: &C::Handle) -> Result<()> {
        self.host.update_caret(position)
    }
}
