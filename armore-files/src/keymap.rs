//! Editor keyboard shortcuts
//!
//! Every bound chord suppresses the host's default action for that chord.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Editor actions reachable from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Run,
    Save,
    OpenPicker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    /// Printable key, stored lowercase
    Char(char),
}

/// A key plus modifiers. `Cmd`/`Meta` count as `Ctrl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub key: Key,
}

impl KeyChord {
    pub const fn ctrl(key: Key) -> Self {
        KeyChord {
            ctrl: true,
            shift: false,
            alt: false,
            key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyParseError {
    #[error("Empty key chord")]
    Empty,

    #[error("Unknown modifier: {0}")]
    UnknownModifier(String),

    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

impl FromStr for KeyChord {
    type Err = KeyParseError;

    /// Parse chords like `Ctrl+S`, `cmd+enter` or `Ctrl+Shift+P`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let (key, modifiers) = match parts.split_last() {
            Some((key, modifiers)) if !key.is_empty() => (*key, modifiers),
            _ => return Err(KeyParseError::Empty),
        };

        let mut chord = KeyChord {
            ctrl: false,
            shift: false,
            alt: false,
            key: parse_key(key)?,
        };

        for modifier in modifiers {
            match modifier.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "meta" => chord.ctrl = true,
                "shift" => chord.shift = true,
                "alt" | "option" => chord.alt = true,
                _ => return Err(KeyParseError::UnknownModifier(modifier.to_string())),
            }
        }

        Ok(chord)
    }
}

fn parse_key(key: &str) -> Result<Key, KeyParseError> {
    match key.to_ascii_lowercase().as_str() {
        "enter" | "return" => return Ok(Key::Enter),
        "esc" | "escape" => return Ok(Key::Escape),
        _ => {}
    }

    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => Ok(Key::Char(c.to_ascii_lowercase())),
        _ => Err(KeyParseError::UnknownKey(key.to_string())),
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        if self.shift {
            f.write_str("Shift+")?;
        }
        match self.key {
            Key::Enter => f.write_str("Enter"),
            Key::Escape => f.write_str("Escape"),
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub chord: KeyChord,
    pub action: Action,
    pub prevent_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Keymap {
    pub fn empty() -> Self {
        Keymap {
            bindings: Vec::new(),
        }
    }

    /// Bind `chord` to `action`, replacing any earlier binding of the chord
    pub fn bind(&mut self, chord: KeyChord, action: Action) {
        self.bindings.retain(|b| b.chord != chord);
        self.bindings.push(Binding {
            chord,
            action,
            prevent_default: true,
        });
    }

    pub fn resolve(&self, chord: &KeyChord) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.chord == *chord)
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }
}

impl Default for Keymap {
    fn default() -> Self {
        let mut keymap = Keymap::empty();
        keymap.bind(KeyChord::ctrl(Key::Enter), Action::Run);
        keymap.bind(KeyChord::ctrl(Key::Char('s')), Action::Save);
        keymap.bind(KeyChord::ctrl(Key::Char('p')), Action::OpenPicker);
        keymap
    }
}
