use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    JumpToTop,
    JumpToBottom,
    /// Simulate the browser window losing or regaining focus
    ToggleWindowFocus,
    /// Park the pointer over the carousel track, or take it away
    TogglePointerOnCarousel,
    /// Move the pointer across the hero from left to right
    SweepPointer,
    Remount,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => Action::ScrollDown,
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => Action::ScrollUp,
        (KeyCode::Char('J'), _) | (KeyCode::PageDown, _) => Action::PageDown,
        (KeyCode::Char('K'), _) | (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToBottom,

        (KeyCode::Char(' '), _) => Action::ToggleWindowFocus,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::TogglePointerOnCarousel,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::SweepPointer,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Remount,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Action::ScrollDown
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('k'), KeyModifiers::NONE)), Action::ScrollUp);
        // uppercase letters usually arrive with SHIFT set
        assert_eq!(
            handle_key_event(key(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            Action::PageDown
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('K'), KeyModifiers::NONE)), Action::PageUp);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Action::JumpToBottom
        );
    }

    #[test]
    fn test_signal_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            Action::ToggleWindowFocus
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('p'), KeyModifiers::NONE)),
            Action::TogglePointerOnCarousel
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('m'), KeyModifiers::NONE)),
            Action::SweepPointer
        );
        assert_eq!(handle_key_event(key(KeyCode::Char('r'), KeyModifiers::NONE)), Action::Remount);
    }

    #[test]
    fn test_quit_and_unbound() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE)), Action::None);
    }
}
