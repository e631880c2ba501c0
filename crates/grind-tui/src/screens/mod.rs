#![forbid(unsafe_code)]

//! Screen state machines.
//!
//! Each screen owns a private sub-model and a key handler returning an
//! [`Outcome`]; the root reducer routes messages to whichever screen is
//! active and interprets the outcome (store a command, navigate, or fall
//! through to global handling). Exactly one [`ScreenState`] is active at a
//! time; the others live on the navigation history stack.

pub mod home;
pub mod list;
pub mod login;
pub mod problem;
pub mod profile;

use std::collections::BTreeSet;

use grind_client::AuthUser;
use grind_store::Config;

use crate::command::Command;

pub use home::HomeModel;
pub use list::ListModel;
pub use login::LoginModel;
pub use problem::{FocusRegion, Panel, ProblemModel};
pub use profile::ProfileModel;

/// Read/write context handed to screen reducers. Everything a screen needs
/// beyond its own sub-model: terminal size for layout-dependent clamping,
/// the signed-in user, config, and the bookmark set (the one piece of
/// shared state screens may flip directly).
pub struct Ctx<'a> {
    pub width: u16,
    pub height: u16,
    pub user: Option<&'a AuthUser>,
    pub config: &'a Config,
    pub bookmarks: &'a mut BTreeSet<u64>,
}

/// What a screen did with a key press.
#[derive(Debug)]
pub enum Outcome {
    /// Consumed; run this command.
    Command(Command),
    /// Not handled; the root reducer may apply global bindings.
    Ignored,
    /// The screen wants to navigate back.
    Back,
    /// Navigate to a new screen, running a command alongside.
    Push(ScreenState, Command),
}

/// Identifies a screen without its payload. Used by the runtime to detect
/// screen changes (which force a full repaint).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenTag {
    Home,
    List,
    Problem,
    Login,
    Profile,
    Help,
}

/// The help overlay's sub-model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpModel {
    pub scroll: usize,
}

/// The active screen and its private model.
#[derive(Debug)]
pub enum ScreenState {
    Home(HomeModel),
    List(ListModel),
    Problem(ProblemModel),
    Login(LoginModel),
    Profile(ProfileModel),
    Help(HelpModel),
}

impl ScreenState {
    /// A fresh home screen.
    #[must_use]
    pub fn home() -> Self {
        Self::Home(HomeModel::default())
    }

    /// A fresh help overlay.
    #[must_use]
    pub fn help() -> Self {
        Self::Help(HelpModel::default())
    }

    /// The screen's tag.
    #[must_use]
    pub fn tag(&self) -> ScreenTag {
        match self {
            Self::Home(_) => ScreenTag::Home,
            Self::List(_) => ScreenTag::List,
            Self::Problem(_) => ScreenTag::Problem,
            Self::Login(_) => ScreenTag::Login,
            Self::Profile(_) => ScreenTag::Profile,
            Self::Help(_) => ScreenTag::Help,
        }
    }

    /// Title shown in the header chrome.
    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home(_) => "home",
            Self::List(_) => "problems",
            Self::Problem(_) => "problem",
            Self::Login(_) => "sign in",
            Self::Profile(_) => "profile",
            Self::Help(_) => "help",
        }
    }

    /// Whether the screen is currently consuming raw text input. While
    /// true, global single-letter bindings (`q`, `?`) must not fire.
    #[must_use]
    pub fn captures_text_input(&self) -> bool {
        match self {
            Self::List(list) => list.is_searching(),
            Self::Login(_) => true,
            _ => false,
        }
    }
}
