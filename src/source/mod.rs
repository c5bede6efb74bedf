//! Level sources: uniform (text, level) iteration over host documents.
//!
//! The navigator never talks to a host directly. It drives a [`LevelSource`],
//! one unit at a time, and asks it to relocate the caret once a target has
//! been found. Three realizations exist:
//!
//! - [`DirectSource`] moves a native caret handle line by line.
//! - [`SideChannelSource`] captures the whole document once through the
//!   clipboard and then walks an in-memory copy.
//! - [`TreeSource`] walks tree view items and reads their reported depth.
//!
//! Which one is used for a command is decided once, up front, by
//! [`SourceKind::select`].

mod direct;
mod side_channel;
mod tree;

pub use direct::{CaretProvider, DirectSource};
pub use side_channel::{
    Chord, ClipboardBridge, Key, KeystrokeSynth, Modifier, SELECTION_MARKER,
    SideChannelOptions, SideChannelSource,
};
pub use tree::{TreeProvider, TreeSource};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of travel through the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Signed unit step: `+1` forward, `-1` backward.
    pub fn delta(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// What a unit is: a line of editable text or a tree view item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Editable,
    Tree,
}

/// One navigable unit as seen by the navigator.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit<P> {
    /// Handle that can be passed back to [`LevelSource::relocate_to`].
    pub position: P,
    /// Line text, or the item label in tree mode.
    pub text: String,
    /// Structural level. `None` only for tree items without position info.
    pub level: Option<usize>,
    /// Whitespace-only line. Always false for tree items.
    pub blank: bool,
}

/// Scoped, step-by-step access to a host document.
///
/// A source is acquired right before a scan and released right after it.
/// [`release`](LevelSource::release) must be safe to call more than once.
pub trait LevelSource {
    type Position: Clone + fmt::Debug;

    fn kind(&self) -> UnitKind;

    /// Step one unit in `direction`. Returns false at the document edge.
    fn move_by(&mut self, direction: Direction) -> Result<bool>;

    /// The unit under the source's cursor.
    fn current(&mut self) -> Result<Unit<Self::Position>>;

    /// Move the host caret or focus to `position`.
    fn relocate_to(&mut self, position: &Self::Position) -> Result<()>;

    /// Tear down any host state borrowed for the scan.
    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Accessibility role reported by the host for the focused object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    EditableText,
    TreeViewItem,
    Other,
}

/// What the host tells us about the focused object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub role: Role,
    /// Name of the application that owns the focus, e.g. `code`.
    pub app_name: String,
    /// Native window class, when the host exposes one.
    pub window_class: Option<String>,
}

/// Level source strategy for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    Direct,
    SideChannel,
    Tree,
}

/// Editor window classes that behave as editable text whatever role they report.
const EDITOR_WINDOW_CLASSES: [&str; 2] = ["Scintilla", "AkelEditW"];

/// Applications whose editable text can only be read through the clipboard.
const SIDE_CHANNEL_APPS: [&str; 1] = ["code"];

impl SourceKind {
    /// Pick the strategy for the focused object, or `None` when indentation
    /// navigation does not apply to it.
    pub fn select(info: &HostInfo) -> Option<SourceKind> {
        let editor_window = info
            .window_class
            .as_deref()
            .is_some_and(|class| EDITOR_WINDOW_CLASSES.contains(&class));

        if editor_window || info.role == Role::EditableText {
            if SIDE_CHANNEL_APPS.contains(&info.app_name.as_str()) {
                Some(SourceKind::SideChannel)
            } else {
                Some(SourceKind::Direct)
            }
        } else if info.role == Role::TreeViewItem {
            Some(SourceKind::Tree)
        } else {
            None
        }
    }

    pub fn unit_kind(self) -> UnitKind {
        match self {
            SourceKind::Direct | SourceKind::SideChannel => UnitKind::Editable,
            SourceKind::Tree => UnitKind::Tree,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceKind::Direct => "direct",
            SourceKind::SideChannel => "side-channel",
            SourceKind::Tree => "tree",
        })
    }
}
