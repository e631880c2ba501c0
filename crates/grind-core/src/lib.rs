#![forbid(unsafe_code)]

//! Terminal primitives for the grind TUI.
//!
//! This crate owns the boundary with the terminal itself:
//!
//! - [`event`] - canonical input events ([`Event`], [`KeyEvent`])
//! - [`input`] - the byte decoder turning raw terminal input into events
//! - [`session`] - RAII raw-mode/alternate-screen lifecycle with
//!   suspend/resume for external-process handoff
//! - [`source`] - the stdin-reader and signal-listener threads feeding one
//!   event callback
//!
//! Nothing here knows about application state; the runtime crate consumes
//! events and owns the dispatch loop.

pub mod event;
pub mod input;
pub mod session;
pub mod source;

pub use event::{Event, KeyCode, KeyEvent, Modifiers};
pub use input::InputParser;
pub use session::{SessionOptions, TerminalSession};
pub use source::EventSource;
