#![forbid(unsafe_code)]

//! Canonical input events.
//!
//! All events derive `Clone`, `PartialEq`, and `Eq` so reducers and tests
//! can pattern-match and compare them freely. A [`KeyEvent`] keeps the raw
//! byte sequence it was decoded from, which keeps unrecognized-but-decoded
//! input inspectable in logs.

use bitflags::bitflags;

/// An input event delivered to the dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A decoded key press.
    Key(KeyEvent),

    /// The terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// SIGINT/SIGTERM arrived.
    Interrupt,
}

/// A decoded keyboard event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The decoded key.
    pub code: KeyCode,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
    /// The raw bytes this event was decoded from.
    pub raw: Vec<u8>,
}

impl KeyEvent {
    /// Create a key event with no modifiers and an empty raw sequence.
    #[must_use]
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            raw: Vec::new(),
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Attach the raw byte sequence.
    #[must_use]
    pub fn with_raw(mut self, raw: Vec<u8>) -> Self {
        self.raw = raw;
        self
    }

    /// Check for a specific unmodified character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c) && self.modifiers.is_empty()
    }

    /// Whether Ctrl is held.
    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Whether Alt is held.
    #[must_use]
    pub fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Whether Shift is held.
    #[must_use]
    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    /// Shift+Tab.
    BackTab,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function key (F1–F12).
    F(u8),
}

bitflags! {
    /// Modifier keys held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b000;
        const SHIFT = 0b001;
        const ALT   = 0b010;
        const CTRL  = 0b100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_char_requires_no_modifiers() {
        assert!(KeyEvent::new(KeyCode::Char('q')).is_char('q'));
        assert!(
            !KeyEvent::new(KeyCode::Char('q'))
                .with_modifiers(Modifiers::CTRL)
                .is_char('q')
        );
    }

    #[test]
    fn modifier_queries() {
        let ev = KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        assert!(ev.ctrl());
        assert!(ev.shift());
        assert!(!ev.alt());
    }
}
