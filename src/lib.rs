//! # indentnav
//!
//! Structural navigation by indentation level or tree depth, with audio
//! feedback for everything skipped along the way.
//!
//! A command such as "next sibling" walks the document one unit at a time
//! through a [`LevelSource`](source::LevelSource), comparing each unit's level
//! with the level it started on. When a target is found the caret moves there,
//! the line is spoken and the levels of the skipped units play as a short
//! crackle of tones. When nothing is found a chime plays instead.
//!
//! Three level sources are provided:
//!
//! - direct caret access to editable text
//! - a clipboard side channel for editors that only accept keystrokes
//! - tree view items, whose level is their depth
//!
//! ## Example
//!
//! ```rust
//! use indentnav::audio::RecordingPlayer;
//! use indentnav::commands::NavCommand;
//! use indentnav::speech::Transcript;
//! use indentnav::{Config, Session, Workspace};
//!
//! let code = "def f():\n    a = 1\n    if a:\n        pass\n    return a\n";
//! let mut workspace = Workspace::text(code, 1);
//! let mut session = Session::new(Config::default(), RecordingPlayer::new(), Transcript::new());
//!
//! let outcome = session.run(&mut workspace, NavCommand::NextSibling, 0).unwrap();
//! assert!(outcome.found);
//! assert_eq!(outcome.text.as_deref(), Some("    if a:"));
//! assert_eq!(workspace.position().line, 2);
//! ```

/// Tone generation and the crackle / chime encoder.
pub mod audio;

/// The navigation commands and their scan parameters.
pub mod commands;

/// Configuration module for persisting user preferences.
///
/// Volumes, tone mode, boundary announcements, clipboard timing and gestures.
pub mod config;

pub mod error;

/// Reference hosts: line buffer, emulated editor, clipboards and outline.
pub mod host;

/// Gesture table and repeat tracking.
pub mod keybindings;

/// Indentation level computation.
pub mod level;

/// The navigator scan and its feedback.
pub mod nav;

pub mod session;

/// Level sources over the supported hosts.
pub mod source;

/// Speech output.
pub mod speech;

pub mod workspace;

pub use config::Config;
pub use error::{Error, Result};
pub use session::Session;
pub use workspace::Workspace;
