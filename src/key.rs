use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A single key press as seen by a typing session
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// A character-producing key
    Char(char),
    Backspace,
    /// Modifiers, function keys, navigation, Enter...
    Other,
}

impl Key {
    /// Map a key name the way browsers report `KeyboardEvent.key`:
    /// a one-character name is a character key, "Backspace" erases,
    /// everything else ("Shift", "F5", "Enter") is ignored.
    pub fn from_name(name: &str) -> Self {
        if name == "Backspace" {
            return Key::Backspace;
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c),
            _ => Key::Other,
        }
    }

    pub fn is_char(&self) -> bool {
        matches!(self, Key::Char(_))
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        match event.code {
            // AltGr arrives as CONTROL | ALT and still types a character.
            KeyCode::Char(_)
                if event.modifiers.contains(KeyModifiers::CONTROL)
                    && !event.modifiers.contains(KeyModifiers::ALT) =>
            {
                Key::Other
            }
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Backspace => Key::Backspace,
            _ => Key::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Key::from_name("a"), Key::Char('a'));
        assert_eq!(Key::from_name(" "), Key::Char(' '));
        assert_eq!(Key::from_name("Backspace"), Key::Backspace);
        assert_eq!(Key::from_name("Shift"), Key::Other);
        assert_eq!(Key::from_name("Enter"), Key::Other);
        assert_eq!(Key::from_name(""), Key::Other);
    }

    #[test]
    fn test_from_name_multibyte_char() {
        assert_eq!(Key::from_name("é"), Key::Char('é'));
    }

    #[test]
    fn test_from_key_event() {
        let plain = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(Key::from(plain), Key::Char('x'));

        let shifted = KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT);
        assert_eq!(Key::from(shifted), Key::Char('X'));

        let ctrl = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from(ctrl), Key::Other);

        let alt = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(Key::from(alt), Key::Char('x'));

        let back = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(Key::from(back), Key::Backspace);

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(Key::from(enter), Key::Other);
    }

    #[test]
    fn test_altgr_characters_are_typed() {
        for c in ['@', '{', '\\'] {
            let altgr = KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::CONTROL | KeyModifiers::ALT,
            );
            assert_eq!(Key::from(altgr), Key::Char(c));
        }
    }
}
