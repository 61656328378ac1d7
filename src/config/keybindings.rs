//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crate::model::ViewTab;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps results-screen keyboard events to domain actions.
///
/// The search screen edits text directly and does not consult bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();

        // Direct tab selection
        for (digit, letter, tab) in [
            ('1', 'f', ViewTab::Flow),
            ('2', 'g', ViewTab::Graph),
            ('3', 'l', ViewTab::List),
        ] {
            bindings.insert(
                KeyEvent::new(KeyCode::Char(digit), KeyModifiers::NONE),
                KeyAction::SelectTab(tab),
            );
            bindings.insert(
                KeyEvent::new(KeyCode::Char(letter), KeyModifiers::NONE),
                KeyAction::SelectTab(tab),
            );
        }

        // Tab cycling
        bindings.insert(
            KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE),
            KeyAction::NextTab,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            KeyAction::PrevTab,
        );

        // Highlight movement, vim-style and arrows
        bindings.insert(
            KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE),
            KeyAction::CursorDown,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE),
            KeyAction::CursorUp,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            KeyAction::CursorDown,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            KeyAction::CursorUp,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Home, KeyModifiers::NONE),
            KeyAction::CursorHome,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::End, KeyModifiers::NONE),
            KeyAction::CursorEnd,
        );

        // Selection
        bindings.insert(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            KeyAction::Activate,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            KeyAction::Activate,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE),
            KeyAction::CloseDetail,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyAction::Dismiss,
        );

        // Back to search
        bindings.insert(
            KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE),
            KeyAction::Back,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            KeyAction::Back,
        );

        // Application controls
        bindings.insert(
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyAction::Quit,
        );
        bindings.insert(
            KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE),
            KeyAction::Help,
        );

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_and_letters_select_the_same_tabs() {
        let bindings = KeyBindings::default();
        for (a, b, tab) in [
            ('1', 'f', ViewTab::Flow),
            ('2', 'g', ViewTab::Graph),
            ('3', 'l', ViewTab::List),
        ] {
            assert_eq!(bindings.get(key(KeyCode::Char(a))), Some(KeyAction::SelectTab(tab)));
            assert_eq!(bindings.get(key(KeyCode::Char(b))), Some(KeyAction::SelectTab(tab)));
        }
    }

    #[test]
    fn esc_dismisses_and_x_closes_detail() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Esc)), Some(KeyAction::Dismiss));
        assert_eq!(bindings.get(key(KeyCode::Char('x'))), Some(KeyAction::CloseDetail));
    }

    #[test]
    fn shift_tab_cycles_backwards() {
        let bindings = KeyBindings::default();
        let event = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(bindings.get(event), Some(KeyAction::PrevTab));
    }

    #[test]
    fn unbound_key_returns_none() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.get(key(KeyCode::Char('z'))), None);
        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::CONTROL)),
            None
        );
    }
}
