#![forbid(unsafe_code)]

//! Input decoder state machine.
//!
//! Turns raw terminal bytes into [`Event`]s. The decoder handles:
//!
//! - printable ASCII and control codes
//! - UTF-8 multi-byte sequences
//! - CSI sequences (`ESC [` … final byte) with `1;5A`-style modifier
//!   parameters
//! - SS3 sequences (`ESC O` …) for Home/End/F1–F4
//! - `ESC <char>` as Alt-chords
//!
//! A length cap on CSI parameter collection bounds memory against
//! adversarial input. Every emitted [`KeyEvent`] carries the exact bytes it
//! was decoded from.
//!
//! A bare ESC cannot be distinguished from the start of a sequence until the
//! next byte arrives; callers should invoke [`InputParser::flush`] after a
//! read chunk is exhausted to resolve a pending lone ESC into an Escape key,
//! since real terminals write whole sequences in one chunk.

use crate::event::{Event, KeyCode, KeyEvent, Modifiers};

/// Maximum bytes collected for one CSI sequence.
const MAX_CSI_LEN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Ground,
    Escape,
    Csi,
    Ss3,
    Utf8 {
        collected: u8,
        expected: u8,
    },
}

/// Terminal input decoder.
///
/// ```
/// use grind_core::input::InputParser;
/// use grind_core::event::{Event, KeyCode};
///
/// let mut parser = InputParser::new();
/// let events = parser.parse(b"\x1b[A");
/// assert!(matches!(&events[0], Event::Key(k) if k.code == KeyCode::Up));
/// ```
#[derive(Debug, Default)]
pub struct InputParser {
    state: State,
    /// CSI parameter bytes collected so far.
    params: Vec<u8>,
    /// UTF-8 bytes collected so far.
    utf8: [u8; 4],
    /// Raw bytes of the event currently being decoded.
    raw: Vec<u8>,
}

impl InputParser {
    /// Create a new decoder in the ground state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed `input` and return all completed events.
    pub fn parse(&mut self, input: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();
        for &byte in input {
            self.raw.push(byte);
            if let Some(event) = self.process(byte) {
                events.push(event);
            }
        }
        events
    }

    /// Resolve a pending lone ESC into an Escape key press.
    ///
    /// Call after a read chunk is fully consumed and no further bytes are
    /// immediately available.
    pub fn flush(&mut self) -> Option<Event> {
        if self.state == State::Escape {
            self.state = State::Ground;
            return Some(self.emit(KeyCode::Escape, Modifiers::NONE));
        }
        None
    }

    /// Build a key event carrying the raw bytes consumed so far, and reset
    /// the raw buffer for the next event.
    fn emit(&mut self, code: KeyCode, modifiers: Modifiers) -> Event {
        let raw = std::mem::take(&mut self.raw);
        Event::Key(KeyEvent::new(code).with_modifiers(modifiers).with_raw(raw))
    }

    /// Discard the current partial sequence.
    fn abort(&mut self) {
        self.state = State::Ground;
        self.params.clear();
        self.raw.clear();
    }

    fn process(&mut self, byte: u8) -> Option<Event> {
        match self.state {
            State::Ground => self.process_ground(byte),
            State::Escape => self.process_escape(byte),
            State::Csi => self.process_csi(byte),
            State::Ss3 => self.process_ss3(byte),
            State::Utf8 { collected, expected } => self.process_utf8(byte, collected, expected),
        }
    }

    fn process_ground(&mut self, byte: u8) -> Option<Event> {
        let event = match byte {
            0x1b => {
                self.state = State::Escape;
                return None;
            }
            0x09 => self.emit(KeyCode::Tab, Modifiers::NONE),
            0x0d => self.emit(KeyCode::Enter, Modifiers::NONE),
            // Ctrl+A..Ctrl+Z, minus Tab and Enter which have keys of their own.
            0x01..=0x08 | 0x0a..=0x0c | 0x0e..=0x1a => {
                let c = (byte + b'a' - 1) as char;
                self.emit(KeyCode::Char(c), Modifiers::CTRL)
            }
            0x7f => self.emit(KeyCode::Backspace, Modifiers::NONE),
            0x20..=0x7e => self.emit(KeyCode::Char(byte as char), Modifiers::NONE),
            0xc0..=0xdf => {
                self.utf8[0] = byte;
                self.state = State::Utf8 {
                    collected: 1,
                    expected: 2,
                };
                return None;
            }
            0xe0..=0xef => {
                self.utf8[0] = byte;
                self.state = State::Utf8 {
                    collected: 1,
                    expected: 3,
                };
                return None;
            }
            0xf0..=0xf7 => {
                self.utf8[0] = byte;
                self.state = State::Utf8 {
                    collected: 1,
                    expected: 4,
                };
                return None;
            }
            _ => {
                self.raw.clear();
                return None;
            }
        };
        Some(event)
    }

    fn process_escape(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'[' => {
                self.state = State::Csi;
                self.params.clear();
                None
            }
            b'O' => {
                self.state = State::Ss3;
                None
            }
            // ESC ESC: report the first as a plain Escape, stay armed.
            0x1b => {
                self.raw.pop();
                let event = self.emit(KeyCode::Escape, Modifiers::NONE);
                self.raw.push(0x1b);
                Some(event)
            }
            // Alt-chord.
            0x20..=0x7e => {
                self.state = State::Ground;
                Some(self.emit(KeyCode::Char(byte as char), Modifiers::ALT))
            }
            _ => {
                self.abort();
                None
            }
        }
    }

    fn process_csi(&mut self, byte: u8) -> Option<Event> {
        if self.params.len() >= MAX_CSI_LEN {
            self.abort();
            return None;
        }
        match byte {
            b'0'..=b'9' | b';' => {
                self.params.push(byte);
                None
            }
            // Final byte.
            0x40..=0x7e => {
                self.state = State::Ground;
                self.finish_csi(byte)
            }
            _ => {
                self.abort();
                None
            }
        }
    }

    /// Decode a completed CSI sequence from the collected parameters.
    fn finish_csi(&mut self, final_byte: u8) -> Option<Event> {
        let params = std::mem::take(&mut self.params);
        let fields: Vec<u16> = params
            .split(|&b| b == b';')
            .map(|field| {
                std::str::from_utf8(field)
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0)
            })
            .collect();

        // `CSI 1;<m> X` and `CSI <n>;<m> ~` carry a modifier parameter:
        // encoded value minus one is a shift/alt/ctrl bitfield.
        let modifiers = fields
            .get(1)
            .filter(|&&m| m > 0)
            .map_or(Modifiers::NONE, |&m| decode_modifier_param(m));

        let code = match final_byte {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'F' => KeyCode::End,
            b'H' => KeyCode::Home,
            b'Z' => KeyCode::BackTab,
            b'~' => match fields.first().copied().unwrap_or(0) {
                1 | 7 => KeyCode::Home,
                2 => KeyCode::Insert,
                3 => KeyCode::Delete,
                4 | 8 => KeyCode::End,
                5 => KeyCode::PageUp,
                6 => KeyCode::PageDown,
                15 => KeyCode::F(5),
                17..=21 => KeyCode::F((fields[0] - 11) as u8),
                23 => KeyCode::F(11),
                24 => KeyCode::F(12),
                _ => {
                    self.raw.clear();
                    return None;
                }
            },
            _ => {
                self.raw.clear();
                return None;
            }
        };
        Some(self.emit(code, modifiers))
    }

    fn process_ss3(&mut self, byte: u8) -> Option<Event> {
        self.state = State::Ground;
        let code = match byte {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'F' => KeyCode::End,
            b'H' => KeyCode::Home,
            b'P'..=b'S' => KeyCode::F(byte - b'P' + 1),
            _ => {
                self.raw.clear();
                return None;
            }
        };
        Some(self.emit(code, Modifiers::NONE))
    }

    fn process_utf8(&mut self, byte: u8, collected: u8, expected: u8) -> Option<Event> {
        // Continuation bytes are 0b10xxxxxx; anything else aborts.
        if byte & 0xc0 != 0x80 {
            self.abort();
            return None;
        }
        self.utf8[collected as usize] = byte;
        let collected = collected + 1;
        if collected < expected {
            self.state = State::Utf8 {
                collected,
                expected,
            };
            return None;
        }
        self.state = State::Ground;
        match std::str::from_utf8(&self.utf8[..expected as usize]) {
            Ok(s) => {
                let c = s.chars().next()?;
                Some(self.emit(KeyCode::Char(c), Modifiers::NONE))
            }
            Err(_) => {
                self.raw.clear();
                None
            }
        }
    }
}

/// Decode an xterm modifier parameter (`1` = none, then +1 shift, +2 alt,
/// +4 ctrl).
fn decode_modifier_param(param: u16) -> Modifiers {
    let bits = param.saturating_sub(1);
    let mut modifiers = Modifiers::NONE;
    if bits & 1 != 0 {
        modifiers |= Modifiers::SHIFT;
    }
    if bits & 2 != 0 {
        modifiers |= Modifiers::ALT;
    }
    if bits & 4 != 0 {
        modifiers |= Modifiers::CTRL;
    }
    modifiers
}
