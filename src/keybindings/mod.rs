//! Gesture table for indentnav
//!
//! Maps key gestures to [`Action`]s, separately for editable text and tree
//! views, and counts repeated presses for "speak parent".
//!
//! # Architecture
//!
//! - [`Action`] - All bindable actions
//! - [`KeybindingMode`] - Editable text or tree view
//! - [`Keybindings`] - The complete gesture table (backed by keybinds-rs)
//! - [`RepeatTracker`] - "How many times was this just pressed" counter
//!
//! # Configuration
//!
//! Gestures are configured in TOML format, organized by mode:
//!
//! ```toml
//! [keybindings.Editable]
//! "Alt+j" = "NextSibling"
//! "Alt+k" = "PreviousSibling"
//!
//! [keybindings.Tree]
//! "Alt+p" = "Parent"
//! ```

mod action;
mod defaults;
mod repeat;

pub use action::Action;
pub use defaults::NAVIGATION_GESTURES;
pub use repeat::{REPEAT_WINDOW, RepeatTracker};

use crate::error::{Error, Result};
use crate::source::UnitKind;
use keybinds::{KeyInput, Keybinds};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Modes that have their own keybinding sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum KeybindingMode {
    /// Lines of editable text
    Editable,
    /// Tree view items
    Tree,
}

impl KeybindingMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            KeybindingMode::Editable => "Editable text",
            KeybindingMode::Tree => "Tree view",
        }
    }
}

impl From<UnitKind> for KeybindingMode {
    fn from(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Editable => KeybindingMode::Editable,
            UnitKind::Tree => KeybindingMode::Tree,
        }
    }
}

/// Complete keybinding configuration
///
/// Wraps keybinds-rs dispatchers with mode-based organization.
#[derive(Debug)]
pub struct Keybindings {
    bindings: HashMap<KeybindingMode, Keybinds<Action>>,
}

impl Default for Keybindings {
    fn default() -> Self {
        defaults::default_keybindings()
    }
}

impl Keybindings {
    /// Create empty keybindings
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Get the action for a key input in a specific mode. Accepts crossterm
    /// `KeyEvent`s directly.
    pub fn dispatch(&mut self, mode: KeybindingMode, input: impl Into<KeyInput>) -> Option<Action> {
        self.bindings
            .get_mut(&mode)
            .and_then(|kb| kb.dispatch(input).copied())
    }

    /// Bind a key sequence to an action in a mode
    pub fn bind(
        &mut self,
        mode: KeybindingMode,
        key_sequence: &str,
        action: Action,
    ) -> Result<(), keybinds::Error> {
        self.bindings
            .entry(mode)
            .or_default()
            .bind(key_sequence, action)
    }

    /// Get all keys bound to an action in a mode
    pub fn keys_for_action(&self, mode: KeybindingMode, action: Action) -> Vec<String> {
        self.bindings
            .get(&mode)
            .map(|kb| {
                kb.as_slice()
                    .iter()
                    .filter(|bind| bind.action == action)
                    .map(|bind| format_key_sequence(&bind.seq))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Help entries for a mode (action -> keys), navigation first
    pub fn help_entries(&self, mode: KeybindingMode) -> Vec<(Action, Vec<String>)> {
        let mut action_keys: HashMap<Action, Vec<String>> = HashMap::new();

        if let Some(kb) = self.bindings.get(&mode) {
            for bind in kb.as_slice() {
                action_keys
                    .entry(bind.action)
                    .or_default()
                    .push(format_key_sequence(&bind.seq));
            }
        }

        let mut entries: Vec<_> = action_keys.into_iter().collect();
        entries.sort_by(|a, b| {
            a.0.category()
                .cmp(b.0.category())
                .then(a.0.description().cmp(b.0.description()))
        });
        entries
    }

    /// Merge user bindings into this set (user bindings take precedence)
    pub fn merge(&mut self, other: &KeybindingsConfig) -> Result<()> {
        for (mode, mode_bindings) in &other.0 {
            let kb = self.bindings.entry(*mode).or_default();
            for (key_str, action) in mode_bindings {
                kb.bind(key_str, *action)
                    .map_err(|e| Error::Config(format!("invalid key '{}': {}", key_str, e)))?;
            }
        }
        Ok(())
    }
}

/// Parse a space-separated gesture list such as `"Alt+Down Alt+i Alt+i"`.
pub fn parse_gestures(gestures: &str) -> Result<Vec<KeyInput>> {
    gestures
        .split_whitespace()
        .map(|gesture| {
            gesture
                .parse::<KeyInput>()
                .map_err(|e| Error::Config(format!("invalid gesture '{}': {}", gesture, e)))
        })
        .collect()
}

/// Format a key sequence for display
fn format_key_sequence(seq: &keybinds::KeySeq) -> String {
    seq.as_slice()
        .iter()
        .map(format_key_input)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a single key input the way gestures are written, e.g. `Ctrl+Alt+Down`
pub fn format_key_input(input: &KeyInput) -> String {
    let mut parts = Vec::new();

    let mods = input.mods();
    if mods.contains(keybinds::Mods::CTRL) {
        parts.push("Ctrl".to_string());
    }
    if mods.contains(keybinds::Mods::SHIFT) {
        parts.push("Shift".to_string());
    }
    if mods.contains(keybinds::Mods::ALT) {
        parts.push("Alt".to_string());
    }
    parts.push(format_key(input.key()));

    parts.join("+")
}

fn format_key(key: keybinds::Key) -> String {
    use keybinds::Key;
    match key {
        Key::Char(c) => c.to_string(),
        Key::Enter => "Enter".to_string(),
        Key::Esc => "Esc".to_string(),
        Key::Up => "Up".to_string(),
        Key::Down => "Down".to_string(),
        Key::Left => "Left".to_string(),
        Key::Right => "Right".to_string(),
        Key::Home => "Home".to_string(),
        Key::End => "End".to_string(),
        _ => "?".to_string(),
    }
}

/// Configuration format for keybindings (uses string keys for TOML compatibility)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeybindingsConfig(pub HashMap<KeybindingMode, HashMap<String, Action>>);

impl KeybindingsConfig {
    /// Convert to Keybindings, using defaults for any missing bindings
    pub fn to_keybindings(&self) -> Keybindings {
        let mut keybindings = Keybindings::default();

        // Invalid keys are rejected by Config::validate before we get here
        let _ = keybindings.merge(self);

        keybindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_parsed_gestures_dispatch() {
        let mut kb = Keybindings::default();
        let inputs = parse_gestures("Alt+Down  Shift+Alt+Up Alt+i").unwrap();
        let actions: Vec<_> = inputs
            .into_iter()
            .map(|input| kb.dispatch(KeybindingMode::Editable, input))
            .collect();
        assert_eq!(
            actions,
            vec![
                Some(Action::NextSibling),
                Some(Action::FirstSibling),
                Some(Action::SpeakParent)
            ]
        );
    }

    #[test]
    fn test_bad_gesture_is_rejected() {
        assert!(matches!(parse_gestures("Alt+Nope"), Err(Error::Config(_))));
    }

    #[test]
    fn test_user_bindings_merge() {
        let mut config = KeybindingsConfig::default();
        config.0.insert(
            KeybindingMode::Tree,
            HashMap::from([("Alt+p".to_string(), Action::Parent)]),
        );
        let mut kb = config.to_keybindings();

        assert_eq!(
            kb.dispatch(
                KeybindingMode::Tree,
                make_key_event(KeyCode::Char('p'), KeyModifiers::ALT)
            ),
            Some(Action::Parent)
        );
        // Defaults survive and other modes are untouched
        assert_eq!(
            kb.dispatch(
                KeybindingMode::Tree,
                make_key_event(KeyCode::Left, KeyModifiers::ALT)
            ),
            Some(Action::Parent)
        );
        assert_eq!(
            kb.dispatch(
                KeybindingMode::Editable,
                make_key_event(KeyCode::Char('p'), KeyModifiers::ALT)
            ),
            None
        );
    }

    #[test]
    fn test_merge_rejects_bad_key() {
        let mut config = KeybindingsConfig::default();
        config.0.insert(
            KeybindingMode::Editable,
            HashMap::from([("Alt+Nope".to_string(), Action::Child)]),
        );
        assert!(Keybindings::default().merge(&config).is_err());
    }

    #[test]
    fn test_keys_for_action() {
        let kb = Keybindings::default();
        assert_eq!(
            kb.keys_for_action(KeybindingMode::Editable, Action::LastSibling),
            vec!["Shift+Alt+Down".to_string()]
        );
    }

    #[test]
    fn test_help_lists_navigation_first() {
        let kb = Keybindings::default();
        let entries = kb.help_entries(KeybindingMode::Tree);
        assert_eq!(entries.len(), 11);
        assert_eq!(entries[0].0.category(), "Navigation");
        assert_eq!(entries[10].0.category(), "Session");
    }

    #[test]
    fn test_mode_from_unit_kind() {
        assert_eq!(KeybindingMode::from(UnitKind::Tree), KeybindingMode::Tree);
    }
}
