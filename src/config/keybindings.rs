//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
///
/// Provides default vim-style bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<(KeyCode, KeyModifiers), KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the lookup; event kind and
    /// keyboard state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.code, key.modifiers)).copied()
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyAction::*;
        const NONE: KeyModifiers = KeyModifiers::NONE;

        let table = [
            // Vim-style scrolling
            (KeyCode::Char('j'), NONE, ScrollDown),
            (KeyCode::Char('k'), NONE, ScrollUp),
            (KeyCode::Char('g'), NONE, ScrollToTop),
            (KeyCode::Char('G'), KeyModifiers::SHIFT, ScrollToBottom),
            // Arrow keys
            (KeyCode::Down, NONE, ScrollDown),
            (KeyCode::Up, NONE, ScrollUp),
            (KeyCode::Home, NONE, ScrollToTop),
            (KeyCode::End, NONE, ScrollToBottom),
            // Page navigation
            (KeyCode::Char('d'), KeyModifiers::CONTROL, PageDown),
            (KeyCode::Char('u'), KeyModifiers::CONTROL, PageUp),
            (KeyCode::PageDown, NONE, PageDown),
            (KeyCode::PageUp, NONE, PageUp),
            // History
            (KeyCode::Enter, NONE, Open),
            (KeyCode::Char('l'), NONE, Open),
            (KeyCode::Right, NONE, Open),
            (KeyCode::Char('r'), NONE, ReplaceWith),
            (KeyCode::Backspace, NONE, Back),
            (KeyCode::Char('b'), NONE, Back),
            (KeyCode::Char('h'), NONE, Back),
            (KeyCode::Left, NONE, Back),
            (KeyCode::Char('f'), NONE, Forward),
            (KeyCode::Char('~'), NONE, Home),
            // Shell
            (KeyCode::Char('o'), NONE, ToggleConnectivity),
            (KeyCode::Char('c'), NONE, ClearToasts),
            (KeyCode::Char('s'), NONE, ToggleCompact),
            (KeyCode::Char('q'), NONE, Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, Quit),
        ];

        let bindings = table
            .into_iter()
            .map(|(code, modifiers, action)| ((code, modifiers), action))
            .collect();

        Self { bindings }
    }
}
