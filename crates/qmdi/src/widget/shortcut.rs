//! Keyboard shortcuts and mnemonics for actions.
//!
//! - [`KeySequence`]: one to four [`KeyCombination`]s, parsed from strings
//!   like `"Ctrl+S"` or `"Ctrl+K, Ctrl+C"`
//! - [`parse_mnemonic`]: splits `"&Save"` into display text and mnemonic
//!
//! # Example
//!
//! ```
//! use qmdi::widget::{KeySequence, parse_mnemonic};
//!
//! let seq: KeySequence = "Ctrl+Shift+S".parse().unwrap();
//! assert_eq!(seq.to_string(), "Ctrl+Shift+S");
//!
//! let m = parse_mnemonic("Save &As");
//! assert_eq!(m.display_text, "Save As");
//! assert_eq!(m.mnemonic, Some('a'));
//! ```

use std::fmt;
use std::str::FromStr;

// =============================================================================
// Keys and Modifiers
// =============================================================================

/// A key that can take part in a shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable key, stored uppercase for letters (`'S'`, `'1'`, `'/'`).
    Char(char),
    /// Function key `F1`..`F24`.
    F(u8),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Backspace,
    Delete,
    Insert,
    Enter,
    Tab,
    Space,
    Escape,
}

impl Key {
    /// Build a character key, normalizing letters to uppercase.
    pub fn char(ch: char) -> Self {
        Key::Char(ch.to_ascii_uppercase())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(ch) => write!(f, "{ch}"),
            Key::F(n) => write!(f, "F{n}"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Backspace => f.write_str("Backspace"),
            Key::Delete => f.write_str("Delete"),
            Key::Insert => f.write_str("Insert"),
            Key::Enter => f.write_str("Enter"),
            Key::Tab => f.write_str("Tab"),
            Key::Space => f.write_str("Space"),
            Key::Escape => f.write_str("Escape"),
        }
    }
}

/// Modifier keys held during a key press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyboardModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Control and Shift.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
        meta: false,
    };
}

// =============================================================================
// Key Combination
// =============================================================================

/// A single chord like "Ctrl+S" or "Alt+F4".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    pub key: Key,
    pub modifiers: KeyboardModifiers,
}

impl KeyCombination {
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self { key, modifiers }
    }

    /// Create a Ctrl+key combination.
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::CTRL)
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifiers;
        for (held, name) in [
            (m.control, "Ctrl+"),
            (m.alt, "Alt+"),
            (m.shift, "Shift+"),
            (m.meta, "Meta+"),
        ] {
            if held {
                f.write_str(name)?;
            }
        }
        write!(f, "{}", self.key)
    }
}

// =============================================================================
// Key Sequence
// =============================================================================

/// Maximum number of key combinations in a sequence.
pub const MAX_KEY_SEQUENCE_LENGTH: usize = 4;

/// A keyboard shortcut: one to four key combinations pressed in order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeySequence {
    combinations: Vec<KeyCombination>,
}

impl KeySequence {
    /// A single-chord sequence.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            combinations: vec![KeyCombination::new(key, modifiers)],
        }
    }

    /// Build from several chords; fails on zero or more than four.
    pub fn from_combinations(
        combinations: Vec<KeyCombination>,
    ) -> Result<Self, KeySequenceParseError> {
        if combinations.is_empty() {
            return Err(KeySequenceParseError::Empty);
        }
        if combinations.len() > MAX_KEY_SEQUENCE_LENGTH {
            return Err(KeySequenceParseError::TooManyKeys);
        }
        Ok(Self { combinations })
    }

    /// Create a Ctrl+key shortcut.
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::CTRL)
    }

    pub fn count(&self) -> usize {
        self.combinations.len()
    }

    pub fn combinations(&self) -> &[KeyCombination] {
        &self.combinations
    }

    /// Check whether a single pressed chord triggers this sequence.
    pub fn matches(&self, key: Key, modifiers: KeyboardModifiers) -> bool {
        self.combinations.len() == 1
            && self.combinations[0] == KeyCombination::new(key, modifiers)
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, combo) in self.combinations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{combo}")?;
        }
        Ok(())
    }
}

/// Error type for parsing key sequences.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeySequenceParseError {
    #[error("empty key sequence")]
    Empty,
    #[error("no key specified (only modifiers)")]
    NoKey,
    #[error("unknown key: {0}")]
    UnknownKey(String),
    #[error("too many key combinations (max 4)")]
    TooManyKeys,
}

fn parse_key(s: &str) -> Result<Key, KeySequenceParseError> {
    let mut chars = s.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        if ch.is_ascii_graphic() {
            return Ok(Key::char(ch));
        }
    }

    let lower = s.to_ascii_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=24).contains(&n) {
            return Ok(Key::F(n));
        }
    }

    match lower.as_str() {
        "up" | "arrowup" => Ok(Key::Up),
        "down" | "arrowdown" => Ok(Key::Down),
        "left" | "arrowleft" => Ok(Key::Left),
        "right" | "arrowright" => Ok(Key::Right),
        "home" => Ok(Key::Home),
        "end" => Ok(Key::End),
        "pageup" | "pgup" => Ok(Key::PageUp),
        "pagedown" | "pgdn" => Ok(Key::PageDown),
        "backspace" => Ok(Key::Backspace),
        "delete" | "del" => Ok(Key::Delete),
        "insert" | "ins" => Ok(Key::Insert),
        "enter" | "return" => Ok(Key::Enter),
        "tab" => Ok(Key::Tab),
        "space" => Ok(Key::Space),
        "escape" | "esc" => Ok(Key::Escape),
        _ => Err(KeySequenceParseError::UnknownKey(s.to_string())),
    }
}

fn parse_key_combination(s: &str) -> Result<KeyCombination, KeySequenceParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(KeySequenceParseError::Empty);
    }

    let mut modifiers = KeyboardModifiers::NONE;
    let mut key = None;

    for part in s.split('+').map(str::trim) {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers.control = true,
            "alt" => modifiers.alt = true,
            "shift" => modifiers.shift = true,
            "meta" | "cmd" | "super" => modifiers.meta = true,
            "" => return Err(KeySequenceParseError::NoKey),
            _ => key = Some(parse_key(part)?),
        }
    }

    key.map(|k| KeyCombination::new(k, modifiers))
        .ok_or(KeySequenceParseError::NoKey)
}

impl FromStr for KeySequence {
    type Err = KeySequenceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(KeySequenceParseError::Empty);
        }

        let combinations = s
            .split(',')
            .map(parse_key_combination)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_combinations(combinations)
    }
}

// =============================================================================
// Mnemonic Utilities
// =============================================================================

/// Result of parsing text for a mnemonic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MnemonicText {
    /// The display text with '&' markers removed (and '&&' converted to '&').
    pub display_text: String,
    /// The mnemonic character (lowercase), if any.
    pub mnemonic: Option<char>,
    /// The byte index in display_text where the mnemonic character is located.
    pub mnemonic_index: Option<usize>,
}

/// Parse text containing an optional mnemonic marker.
///
/// - `"&Open"` -> display "Open", mnemonic 'o', index 0
/// - `"Fish && Chips"` -> display "Fish & Chips", no mnemonic
pub fn parse_mnemonic(text: &str) -> MnemonicText {
    let mut display_text = String::with_capacity(text.len());
    let mut mnemonic = None;
    let mut mnemonic_index = None;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '&' {
            display_text.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('&') => {
                display_text.push('&');
                chars.next();
            }
            Some(next) if next.is_alphanumeric() => {
                if mnemonic.is_none() {
                    mnemonic = Some(next.to_ascii_lowercase());
                    mnemonic_index = Some(display_text.len());
                }
                display_text.push(next);
                chars.next();
            }
            _ => display_text.push('&'),
        }
    }

    MnemonicText {
        display_text,
        mnemonic,
        mnemonic_index,
    }
}

/// Strip mnemonic markers, for comparing labels.
pub fn strip_mnemonic(text: &str) -> String {
    parse_mnemonic(text).display_text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single() {
        let seq: KeySequence = "Ctrl+S".parse().unwrap();
        assert_eq!(seq.count(), 1);
        assert!(seq.matches(Key::char('s'), KeyboardModifiers::CTRL));
        assert!(!seq.matches(Key::char('s'), KeyboardModifiers::NONE));
        assert_eq!(seq, KeySequence::ctrl(Key::Char('S')));
    }

    #[test]
    fn test_parse_chord() {
        let seq: KeySequence = "Ctrl+K, Ctrl+C".parse().unwrap();
        assert_eq!(seq.count(), 2);
        assert_eq!(seq.to_string(), "Ctrl+K, Ctrl+C");
        assert!(!seq.matches(Key::char('k'), KeyboardModifiers::CTRL));
    }

    #[test]
    fn test_parse_named_keys() {
        let seq: KeySequence = "Alt+F4".parse().unwrap();
        assert_eq!(seq.combinations()[0].key, Key::F(4));
        assert_eq!(seq.to_string(), "Alt+F4");

        let seq: KeySequence = "ctrl+shift+pgdn".parse().unwrap();
        assert_eq!(seq.to_string(), "Ctrl+Shift+PageDown");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<KeySequence>(), Err(KeySequenceParseError::Empty));
        assert_eq!("Ctrl".parse::<KeySequence>(), Err(KeySequenceParseError::NoKey));
        assert_eq!(
            "Ctrl+Banana".parse::<KeySequence>(),
            Err(KeySequenceParseError::UnknownKey("Banana".to_string()))
        );
        assert_eq!(
            "A, B, C, D, E".parse::<KeySequence>(),
            Err(KeySequenceParseError::TooManyKeys)
        );
        assert!("F25".parse::<KeySequence>().is_err());
    }

    #[test]
    fn test_parse_mnemonic() {
        let m = parse_mnemonic("&File");
        assert_eq!(m.display_text, "File");
        assert_eq!(m.mnemonic, Some('f'));
        assert_eq!(m.mnemonic_index, Some(0));

        let m = parse_mnemonic("Fish && Chips");
        assert_eq!(m.display_text, "Fish & Chips");
        assert_eq!(m.mnemonic, None);

        let m = parse_mnemonic("Save & Quit");
        assert_eq!(m.display_text, "Save & Quit");
        assert_eq!(m.mnemonic, None);
    }

    #[test]
    fn test_strip_mnemonic() {
        assert_eq!(strip_mnemonic("&Close this window"), "Close this window");
        assert_eq!(strip_mnemonic("Plain"), "Plain");
    }
}
