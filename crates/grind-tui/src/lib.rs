#![forbid(unsafe_code)]

//! Interactive terminal client for coding-practice problems.
//!
//! The application is a unidirectional-dataflow loop:
//!
//! ```text
//! input/resize/signal ─► Msg ─► update (pure) ─► (AppModel, Command)
//!        ▲                                            │
//!        │                                            ▼
//!   result Msg ◄── effect executor (worker threads, I/O)
//! ```
//!
//! - [`model`] - the root [`model::AppModel`] and shared context
//! - [`msg`] - everything that can change state
//! - [`command`] - the closed algebra of side-effect requests
//! - [`update`] - the root reducer: global keys, screen routing, the
//!   navigation history stack
//! - [`screens`] - one state machine per screen
//! - [`view`] - pure `AppModel -> String` frame rendering
//! - [`presenter`] - the line-diffing terminal writer
//! - [`effects`] - the command interpreter (network, stores, timer)
//! - [`runtime`] - the dispatch loop owning the one mutable model
//! - [`workspace`] - solution files, state dir, line diffs

pub mod command;
pub mod effects;
pub mod model;
pub mod msg;
pub mod presenter;
pub mod runtime;
pub mod screens;
pub mod update;
pub mod view;
pub mod workspace;
