#![forbid(unsafe_code)]

//! The home menu.

use grind_client::ProblemFilters;
use grind_core::event::{KeyCode, KeyEvent};

use crate::command::Command;
use crate::screens::{Ctx, ListModel, Outcome, ProfileModel, ScreenState};

/// Menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEntry {
    Problems,
    Daily,
    Random,
    Profile,
    Auth,
    Help,
    Quit,
}

impl HomeEntry {
    pub const ALL: [Self; 7] = [
        Self::Problems,
        Self::Daily,
        Self::Random,
        Self::Profile,
        Self::Auth,
        Self::Help,
        Self::Quit,
    ];

    /// Menu label; the auth entry flips with sign-in state.
    #[must_use]
    pub fn label(self, signed_in: bool) -> &'static str {
        match self {
            Self::Problems => "browse problems",
            Self::Daily => "daily challenge",
            Self::Random => "random problem",
            Self::Profile => "profile",
            Self::Auth => {
                if signed_in {
                    "sign out"
                } else {
                    "sign in"
                }
            }
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

/// The home screen's sub-model.
#[derive(Debug, Clone, Default)]
pub struct HomeModel {
    pub cursor: usize,
    /// Label of an in-flight daily/random fetch, for the spinner line.
    pub pending: Option<&'static str>,
}

impl HomeModel {
    pub fn on_key(&mut self, key: &KeyEvent, ctx: &mut Ctx<'_>) -> Outcome {
        let max = HomeEntry::ALL.len() - 1;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(max);
                Outcome::Command(Command::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                Outcome::Command(Command::None)
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
                Outcome::Command(Command::None)
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = max;
                Outcome::Command(Command::None)
            }
            KeyCode::Enter => self.activate(ctx),
            _ => Outcome::Ignored,
        }
    }

    fn activate(&mut self, ctx: &mut Ctx<'_>) -> Outcome {
        match HomeEntry::ALL[self.cursor] {
            HomeEntry::Problems => {
                let (list, cmd) = ListModel::new(ctx);
                Outcome::Push(ScreenState::List(list), cmd)
            }
            HomeEntry::Daily => {
                self.pending = Some("daily challenge");
                Outcome::Command(Command::FetchDaily)
            }
            HomeEntry::Random => {
                self.pending = Some("random problem");
                Outcome::Command(Command::FetchRandom {
                    filters: ProblemFilters::default(),
                })
            }
            HomeEntry::Profile => match ctx.user {
                Some(user) => {
                    let username = user.username.clone();
                    Outcome::Push(
                        ScreenState::Profile(ProfileModel::loading(username.clone())),
                        Command::FetchProfile { username },
                    )
                }
                None => Outcome::Push(
                    ScreenState::Login(crate::screens::LoginModel::default()),
                    Command::None,
                ),
            },
            HomeEntry::Auth => {
                if ctx.user.is_some() {
                    Outcome::Command(Command::Logout)
                } else {
                    Outcome::Push(
                        ScreenState::Login(crate::screens::LoginModel::default()),
                        Command::None,
                    )
                }
            }
            HomeEntry::Help => Outcome::Push(ScreenState::help(), Command::None),
            HomeEntry::Quit => Outcome::Command(Command::Exit),
        }
    }
}
