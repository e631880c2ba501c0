#![forbid(unsafe_code)]

//! The profile screen.

use grind_client::{SkillStats, UserProfile};
use grind_core::event::{KeyCode, KeyEvent};

use crate::command::Command;
use crate::screens::{Ctx, Outcome};

/// The profile screen's sub-model.
#[derive(Debug, Clone, Default)]
pub struct ProfileModel {
    pub username: String,
    pub profile: Option<Box<UserProfile>>,
    pub skills: Option<Box<SkillStats>>,
    pub error: Option<String>,
    pub scroll: usize,
    pub loading: bool,
}

impl ProfileModel {
    /// Screen awaiting its fetch.
    #[must_use]
    pub fn loading(username: String) -> Self {
        Self {
            username,
            loading: true,
            ..Self::default()
        }
    }

    /// Number of content lines once loaded, used to clamp scrolling.
    #[must_use]
    pub fn line_count(&self) -> usize {
        let skills = self.skills.as_ref().map_or(0, |s| {
            s.fundamental.len() + s.intermediate.len() + s.advanced.len() + 6
        });
        // Profile block is a fixed handful of lines.
        8 + skills
    }

    pub fn on_key(&mut self, key: &KeyEvent, ctx: &mut Ctx<'_>) -> Outcome {
        let visible = (ctx.height as usize).saturating_sub(4).max(1);
        let max = self.line_count().saturating_sub(visible);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll = (self.scroll + 1).min(max);
                Outcome::Command(Command::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll = self.scroll.saturating_sub(1);
                Outcome::Command(Command::None)
            }
            KeyCode::Char('r') => {
                self.loading = true;
                self.error = None;
                Outcome::Command(Command::FetchProfile {
                    username: self.username.clone(),
                })
            }
            KeyCode::Escape => Outcome::Back,
            _ => Outcome::Ignored,
        }
    }

    /// Profile and skills arrived. Responses for another username are
    /// stale and dropped.
    pub fn on_loaded(&mut self, username: &str, profile: Box<UserProfile>, skills: Box<SkillStats>) {
        if username != self.username {
            return;
        }
        self.loading = false;
        self.profile = Some(profile);
        self.skills = Some(skills);
        self.error = None;
    }

    pub fn on_failed(&mut self, username: &str, error: String) {
        if username != self.username {
            return;
        }
        self.loading = false;
        self.error = Some(error);
    }
}
