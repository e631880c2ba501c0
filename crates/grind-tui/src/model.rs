#![forbid(unsafe_code)]

//! The root application model.

use std::collections::BTreeSet;

use grind_client::AuthUser;
use grind_store::Config;

use crate::screens::{ScreenState, ScreenTag};

/// State shared across screens: the signed-in user, the bookmark set, and
/// the workspace config. Screens read it through [`crate::screens::Ctx`];
/// only reducers mutate it.
#[derive(Debug, Clone, Default)]
pub struct Shared {
    pub user: Option<AuthUser>,
    pub bookmarks: BTreeSet<u64>,
    pub config: Config,
}

/// The whole application state.
///
/// The runtime owns the single instance; every change happens inside a
/// reducer call on the dispatch thread. `history` holds the screens
/// navigated away from, giving LIFO back semantics that terminate at the
/// home screen.
#[derive(Debug)]
pub struct AppModel {
    /// The active screen.
    pub screen: ScreenState,
    /// Screens navigated away from, innermost last.
    pub history: Vec<ScreenState>,
    /// Cross-screen state.
    pub shared: Shared,
    /// Screen-level error banner.
    pub error: Option<String>,
    /// Terminal width in columns.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
    /// Whether the frame must be re-rendered.
    pub needs_render: bool,
}

impl AppModel {
    /// Fresh model on the home screen.
    #[must_use]
    pub fn new(config: Config, bookmarks: BTreeSet<u64>) -> Self {
        Self {
            screen: ScreenState::home(),
            history: Vec::new(),
            shared: Shared {
                user: None,
                bookmarks,
                config,
            },
            error: None,
            width: 80,
            height: 24,
            needs_render: true,
        }
    }

    /// Push the current screen onto history and activate `screen`.
    pub fn navigate_to(&mut self, screen: ScreenState) {
        let outgoing = std::mem::replace(&mut self.screen, screen);
        self.history.push(outgoing);
    }

    /// Pop back to the previous screen, defaulting to home when the
    /// history is empty. Returns the screen navigated away from.
    pub fn go_back(&mut self) -> ScreenState {
        let incoming = self.history.pop().unwrap_or_else(ScreenState::home);
        std::mem::replace(&mut self.screen, incoming)
    }

    /// Tag of the active screen.
    #[must_use]
    pub fn screen_tag(&self) -> ScreenTag {
        self.screen.tag()
    }

    /// Rows available to the screen body (header and status chrome
    /// excluded).
    #[must_use]
    pub fn content_height(&self) -> usize {
        (self.height as usize).saturating_sub(2).max(1)
    }
}
