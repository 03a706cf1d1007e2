use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Cancel,
    NextField,
    PrevField,
    Submit,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    /// Switches between sign in and sign up.
    ToggleMode,
    Input(char),
    None,
}

/// Plain characters always come through as `Input`; whether `q` quits is
/// decided by the app, since a form may be capturing text.
pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => AppAction::Quit,
            KeyCode::Char('t') => AppAction::ToggleMode,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab => AppAction::NextField,
        KeyCode::BackTab => AppAction::PrevField,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::Up => AppAction::Up,
        KeyCode::Down => AppAction::Down,
        KeyCode::Left => AppAction::Left,
        KeyCode::Right => AppAction::Right,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_chords() {
        assert_eq!(map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), AppAction::Quit);
        assert_eq!(map_key(key(KeyCode::Char('t'), KeyModifiers::CONTROL)), AppAction::ToggleMode);
        assert_eq!(map_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), AppAction::None);
    }

    #[test]
    fn letters_are_input() {
        assert_eq!(map_key(key(KeyCode::Char('q'), KeyModifiers::NONE)), AppAction::Input('q'));
        assert_eq!(map_key(key(KeyCode::Char('Q'), KeyModifiers::SHIFT)), AppAction::Input('Q'));
        assert_eq!(map_key(key(KeyCode::BackTab, KeyModifiers::SHIFT)), AppAction::PrevField);
    }
}
