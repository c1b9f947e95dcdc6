//! Terminal events reduced to the inputs the dashboard understands

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// One discrete input for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Cursor up (picker)
    Up,
    /// Cursor down (picker)
    Down,
    /// Confirm selection or submit the input line
    Enter,
    /// Return to the picker (Ctrl+Q)
    Back,
    /// End the session (Ctrl+C)
    Quit,
    /// A typed character
    Char(char),
    /// Delete the last typed character
    Backspace,
    /// Terminal resized to width x height
    Resize(u16, u16),
    /// Anything else; ignored
    Other,
}

impl From<KeyEvent> for Input {
    fn from(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return Self::Other;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c' | 'C') => Self::Quit,
                KeyCode::Char('q' | 'Q') => Self::Back,
                _ => Self::Other,
            };
        }
        match key.code {
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,
            KeyCode::Enter => Self::Enter,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Char(c) => Self::Char(c),
            _ => Self::Other,
        }
    }
}

impl From<Event> for Input {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => key.into(),
            Event::Resize(width, height) => Self::Resize(width, height),
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Input {
        KeyEvent::new(code, modifiers).into()
    }

    #[test]
    fn test_control_chords() {
        assert_eq!(key(KeyCode::Char('c'), KeyModifiers::CONTROL), Input::Quit);
        assert_eq!(key(KeyCode::Char('q'), KeyModifiers::CONTROL), Input::Back);
        assert_eq!(key(KeyCode::Char('x'), KeyModifiers::CONTROL), Input::Other);
    }

    #[test]
    fn test_plain_keys() {
        assert_eq!(key(KeyCode::Char('q'), KeyModifiers::NONE), Input::Char('q'));
        assert_eq!(key(KeyCode::Char('A'), KeyModifiers::SHIFT), Input::Char('A'));
        assert_eq!(key(KeyCode::Up, KeyModifiers::NONE), Input::Up);
        assert_eq!(key(KeyCode::Enter, KeyModifiers::NONE), Input::Enter);
        assert_eq!(key(KeyCode::Esc, KeyModifiers::NONE), Input::Other);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(Input::from(Event::Resize(120, 40)), Input::Resize(120, 40));
        assert_eq!(Input::from(Event::FocusGained), Input::Other);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(Input::from(release), Input::Other);
    }
}
