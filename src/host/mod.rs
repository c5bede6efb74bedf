//! In-memory host implementations.
//!
//! These stand in for the platform accessibility layer: a caret-addressable
//! line buffer, an editor that can only be driven through keystrokes and the
//! clipboard, and an outline tree built from markdown headings. The CLI runs
//! on top of them, and so do the tests.

mod buffer;
mod clipboard;
mod editor;
mod outline;

pub use buffer::LineBuffer;
pub use clipboard::{SharedClipboard, SystemClipboard};
pub use editor::{EmulatedEditor, TextPos};
pub use outline::{Outline, OutlineItem};
