//! Error types for indentnav operations.
//!
//! Reaching a document or block boundary is not an error: scans report it as
//! [`ScanResult::NotFound`](crate::nav::ScanResult::NotFound). The variants here
//! cover host bridge failures, bad configuration and programming defects.
//!
//! Clipboard denials are transient and retried inside the side-channel level
//! source before they ever reach a caller; see [`Error::is_transient`].

use thiserror::Error;

/// The error type for all fallible indentnav operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The host never delivered a copied selection within the retry budget.
    #[error("timed out after {waited_ms}ms waiting for the editor to copy its selection")]
    ClipboardTimeout { waited_ms: u128 },

    /// Another process holds the clipboard. Retried until the budget runs out.
    #[error("clipboard access denied: {0}")]
    ClipboardDenied(String),

    /// The clipboard bridge cannot be used at all.
    #[error("clipboard unavailable: {0}")]
    ClipboardUnavailable(String),

    /// A synthetic keystroke could not be delivered to the host.
    #[error("failed to send keystroke: {0}")]
    Keystroke(String),

    /// The host reported no focused unit to start from.
    #[error("no focused item to navigate from")]
    NoFocus,

    /// A chord string named a note outside the chromatic table.
    #[error("unknown note '{0}' in chord")]
    UnknownNote(String),

    /// Invalid configuration value or file.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("failed to write config: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Whether retrying the same operation shortly afterwards may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::ClipboardDenied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_denials_are_transient() {
        assert!(Error::ClipboardDenied("busy".into()).is_transient());
        assert!(!Error::ClipboardTimeout { waited_ms: 1000 }.is_transient());
        assert!(!Error::ClipboardUnavailable("gone".into()).is_transient());
        assert!(!Error::NoFocus.is_transient());
    }

    #[test]
    fn test_timeout_message_mentions_duration() {
        let err = Error::ClipboardTimeout { waited_ms: 1001 };
        assert!(err.to_string().contains("1001ms"));
    }
}
