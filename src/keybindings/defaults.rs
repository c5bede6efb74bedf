//! Default gestures.
//!
//! Editable text and tree views share one gesture table. Uses keybinds-rs key
//! string syntax.

use super::{Action, KeybindingMode, Keybindings};

/// Gestures for the navigation commands.
pub const NAVIGATION_GESTURES: [(&str, Action); 9] = [
    ("Alt+Down", Action::NextSibling),
    ("Alt+Up", Action::PreviousSibling),
    ("Ctrl+Alt+Down", Action::NextSiblingForce),
    ("Ctrl+Alt+Up", Action::PreviousSiblingForce),
    ("Shift+Alt+Down", Action::LastSibling),
    ("Shift+Alt+Up", Action::FirstSibling),
    ("Alt+Right", Action::Child),
    ("Alt+Left", Action::Parent),
    ("Alt+i", Action::SpeakParent),
];

/// Create the default keybindings configuration
pub fn default_keybindings() -> Keybindings {
    let mut kb = Keybindings::new();

    for mode in [KeybindingMode::Editable, KeybindingMode::Tree] {
        for (key, action) in NAVIGATION_GESTURES {
            bind(&mut kb, mode, key, action);
        }
        add_session_keys(&mut kb, mode);
    }

    kb
}

/// Bind a key, panicking on invalid key syntax (only used for built-in defaults)
fn bind(kb: &mut Keybindings, mode: KeybindingMode, key: &str, action: Action) {
    kb.bind(mode, key, action)
        .unwrap_or_else(|e| panic!("Invalid default keybinding '{}': {}", key, e));
}

fn add_session_keys(kb: &mut Keybindings, mode: KeybindingMode) {
    bind(kb, mode, "q", Action::Quit);
    bind(kb, mode, "Esc", Action::Quit);
    bind(kb, mode, "Ctrl+c", Action::Quit);
    bind(kb, mode, "?", Action::ToggleHelp);
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
    fn test_default_gestures() {
        let mut kb = default_keybindings();

        assert_eq!(
            kb.dispatch(
                KeybindingMode::Editable,
                make_key_event(KeyCode::Down, KeyModifiers::ALT)
            ),
            Some(Action::NextSibling)
        );
        assert_eq!(
            kb.dispatch(
                KeybindingMode::Editable,
                make_key_event(KeyCode::Up, KeyModifiers::ALT | KeyModifiers::CONTROL)
            ),
            Some(Action::PreviousSiblingForce)
        );
        assert_eq!(
            kb.dispatch(
                KeybindingMode::Tree,
                make_key_event(KeyCode::Left, KeyModifiers::ALT)
            ),
            Some(Action::Parent)
        );
        assert_eq!(
            kb.dispatch(
                KeybindingMode::Tree,
                make_key_event(KeyCode::Char('i'), KeyModifiers::ALT)
            ),
            Some(Action::SpeakParent)
        );
        assert_eq!(
            kb.dispatch(
                KeybindingMode::Tree,
                make_key_event(KeyCode::Char('q'), KeyModifiers::NONE)
            ),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_plain_arrows_are_unbound() {
        let mut kb = default_keybindings();
        assert_eq!(
            kb.dispatch(
                KeybindingMode::Editable,
                make_key_event(KeyCode::Down, KeyModifiers::NONE)
            ),
            None
        );
    }
}
