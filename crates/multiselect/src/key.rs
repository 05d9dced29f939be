//! Keyboard input handling.
//!
//! Only the keys a form control cares about get their own [`KeyType`];
//! everything else arrives as [`KeyType::Runes`] or [`KeyType::Other`].

use std::fmt;

/// Keyboard key event message.
///
/// # Example
///
/// ```rust
/// use multiselect::{KeyMsg, KeyType};
///
/// let esc = KeyMsg::from_type(KeyType::Esc);
/// assert_eq!(esc.to_string(), "esc");
///
/// let x = KeyMsg::from_char('x').with_alt();
/// assert_eq!(x.to_string(), "alt+x");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMsg {
    /// The type of key pressed.
    pub key_type: KeyType,
    /// For `KeyType::Runes`, the characters typed.
    pub runes: Vec<char>,
    /// Whether Alt was held.
    pub alt: bool,
}

impl KeyMsg {
    /// Create a new key message from a key type.
    pub fn from_type(key_type: KeyType) -> Self {
        Self {
            key_type,
            runes: Vec::new(),
            alt: false,
        }
    }

    /// Create a new key message from a character.
    pub fn from_char(c: char) -> Self {
        Self {
            key_type: KeyType::Runes,
            runes: vec![c],
            alt: false,
        }
    }

    /// Set the alt modifier.
    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// Whether this is the Escape key.
    pub fn is_escape(&self) -> bool {
        self.key_type == KeyType::Esc
    }
}

impl fmt::Display for KeyMsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alt {
            write!(f, "alt+")?;
        }
        if self.key_type == KeyType::Runes {
            for c in &self.runes {
                write!(f, "{c}")?;
            }
            Ok(())
        } else {
            write!(f, "{}", self.key_type)
        }
    }
}

/// Key type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Regular character input.
    Runes,
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Tab.
    Tab,
    /// Shift+Tab.
    ShiftTab,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Ctrl+C.
    CtrlC,
    /// Any key without a dedicated variant.
    Other,
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyType::Runes => "runes",
            KeyType::Enter => "enter",
            KeyType::Space => " ",
            KeyType::Tab => "tab",
            KeyType::ShiftTab => "shift+tab",
            KeyType::Esc => "esc",
            KeyType::Backspace => "backspace",
            KeyType::Up => "up",
            KeyType::Down => "down",
            KeyType::Left => "left",
            KeyType::Right => "right",
            KeyType::Home => "home",
            KeyType::End => "end",
            KeyType::CtrlC => "ctrl+c",
            KeyType::Other => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Convert a crossterm key code and modifiers to a [`KeyMsg`].
pub fn from_crossterm_key(
    code: crossterm::event::KeyCode,
    modifiers: crossterm::event::KeyModifiers,
) -> KeyMsg {
    use crossterm::event::{KeyCode, KeyModifiers};

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    let alt = modifiers.contains(KeyModifiers::ALT);

    let (key_type, runes) = match code {
        KeyCode::Char('c' | 'C') if ctrl => (KeyType::CtrlC, Vec::new()),
        KeyCode::Char(_) if ctrl => (KeyType::Other, Vec::new()),
        KeyCode::Char(' ') => (KeyType::Space, Vec::new()),
        KeyCode::Char(c) => (KeyType::Runes, vec![c]),
        KeyCode::Enter => (KeyType::Enter, Vec::new()),
        KeyCode::Backspace => (KeyType::Backspace, Vec::new()),
        KeyCode::BackTab => (KeyType::ShiftTab, Vec::new()),
        KeyCode::Tab if shift => (KeyType::ShiftTab, Vec::new()),
        KeyCode::Tab => (KeyType::Tab, Vec::new()),
        KeyCode::Esc => (KeyType::Esc, Vec::new()),
        KeyCode::Up => (KeyType::Up, Vec::new()),
        KeyCode::Down => (KeyType::Down, Vec::new()),
        KeyCode::Left => (KeyType::Left, Vec::new()),
        KeyCode::Right => (KeyType::Right, Vec::new()),
        KeyCode::Home => (KeyType::Home, Vec::new()),
        KeyCode::End => (KeyType::End, Vec::new()),
        _ => (KeyType::Other, Vec::new()),
    };

    KeyMsg {
        key_type,
        runes,
        alt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_key_msg_display() {
        assert_eq!(KeyMsg::from_type(KeyType::Enter).to_string(), "enter");
        assert_eq!(KeyMsg::from_type(KeyType::Space).to_string(), " ");
        assert_eq!(KeyMsg::from_char('q').to_string(), "q");
        assert_eq!(KeyMsg::from_char('q').with_alt().to_string(), "alt+q");
    }

    #[test]
    fn test_is_escape() {
        assert!(KeyMsg::from_type(KeyType::Esc).is_escape());
        assert!(!KeyMsg::from_type(KeyType::Enter).is_escape());
    }

    #[test]
    fn test_from_crossterm_escape() {
        let key = from_crossterm_key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(key.key_type, KeyType::Esc);
    }

    #[test]
    fn test_from_crossterm_space_and_chars() {
        let space = from_crossterm_key(KeyCode::Char(' '), KeyModifiers::NONE);
        assert_eq!(space.key_type, KeyType::Space);

        let a = from_crossterm_key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(a.key_type, KeyType::Runes);
        assert_eq!(a.runes, vec!['a']);
    }

    #[test]
    fn test_from_crossterm_tab_variants() {
        let tab = from_crossterm_key(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(tab.key_type, KeyType::Tab);

        let shift_tab = from_crossterm_key(KeyCode::Tab, KeyModifiers::SHIFT);
        assert_eq!(shift_tab.key_type, KeyType::ShiftTab);

        let back_tab = from_crossterm_key(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert_eq!(back_tab.key_type, KeyType::ShiftTab);
    }

    #[test]
    fn test_from_crossterm_ctrl_c() {
        let key = from_crossterm_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key.key_type, KeyType::CtrlC);
        assert_eq!(key.to_string(), "ctrl+c");
    }
}
