#![forbid(unsafe_code)]

//! The problem-list screen.
//!
//! Cursor/scroll/pagination model: the cursor moves one row per key press
//! over the *visible* rows (the bookmark-only filter is applied
//! client-side after fetch), the scroll offset follows to keep the cursor
//! in the window, and crossing within a few rows of the end of the loaded
//! pages triggers an appending fetch that preserves the cursor. Changing
//! any filter resets cursor, scroll, and pages and issues a fresh fetch
//! tagged with a bumped generation counter; results carrying a stale
//! generation are discarded.

use std::collections::BTreeSet;

use grind_client::{Difficulty, ProblemFilters, ProblemPage, ProblemStatus, ProblemSummary};
use grind_core::event::{KeyCode, KeyEvent};

use crate::command::Command;
use crate::screens::{Ctx, Outcome, ScreenState};

/// Fetch the next page when the cursor comes within this many rows of the
/// end of the loaded list.
const NEAR_END_ROWS: usize = 5;

/// The list screen's sub-model.
#[derive(Debug, Clone, Default)]
pub struct ListModel {
    /// Loaded rows, append-only within one filter generation.
    pub problems: Vec<ProblemSummary>,
    /// Server-side total for the active filters.
    pub total: u64,
    /// Cursor over visible rows.
    pub cursor: usize,
    /// First visible row index.
    pub scroll: usize,
    pub difficulty: Option<Difficulty>,
    pub status: Option<ProblemStatus>,
    pub bookmarked_only: bool,
    /// Applied search text.
    pub search: String,
    /// In-progress search entry; `Some` while the search bar is focused.
    search_input: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    /// Filter generation; bumped on every non-appending fetch.
    pub generation: u64,
}

impl ListModel {
    /// Fresh list plus its initial fetch command.
    #[must_use]
    pub fn new(ctx: &Ctx<'_>) -> (Self, Command) {
        let mut list = Self::default();
        let cmd = list.reset_and_fetch(ctx);
        (list, cmd)
    }

    /// Whether the search bar is consuming text input.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.search_input.is_some()
    }

    /// The in-progress search entry, for rendering.
    #[must_use]
    pub fn search_draft(&self) -> Option<&str> {
        self.search_input.as_deref()
    }

    /// Rows after the client-side bookmark filter.
    #[must_use]
    pub fn visible<'a>(&'a self, bookmarks: &BTreeSet<u64>) -> Vec<&'a ProblemSummary> {
        self.problems
            .iter()
            .filter(|p| !self.bookmarked_only || bookmarks.contains(&p.id))
            .collect()
    }

    /// Rows of list body available at the current terminal size: total
    /// height minus chrome (2), filter line, column header, and the gap
    /// above the status line.
    #[must_use]
    pub fn page_height(height: u16) -> usize {
        (height as usize).saturating_sub(5).max(1)
    }

    /// Server-side filters for the next fetch.
    fn filters(&self, ctx: &Ctx<'_>, skip: u64) -> ProblemFilters {
        ProblemFilters {
            difficulty: self.difficulty,
            status: self.status,
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            skip,
            limit: ctx.config.page_size,
        }
    }

    /// Discard loaded pages and issue a fresh fetch under a new
    /// generation.
    fn reset_and_fetch(&mut self, ctx: &Ctx<'_>) -> Command {
        self.generation += 1;
        self.problems.clear();
        self.total = 0;
        self.cursor = 0;
        self.scroll = 0;
        self.loading = true;
        self.error = None;
        Command::FetchProblems {
            generation: self.generation,
            filters: self.filters(ctx, 0),
            append: false,
        }
    }

    /// Fetch the next page if the cursor is near the end of the loaded
    /// rows and the server has more.
    fn maybe_fetch_more(&mut self, ctx: &Ctx<'_>) -> Command {
        let visible_len = self.visible(ctx.bookmarks).len();
        let has_more = (self.problems.len() as u64) < self.total;
        if self.loading || !has_more || self.cursor + NEAR_END_ROWS < visible_len {
            return Command::None;
        }
        self.loading = true;
        Command::FetchProblems {
            generation: self.generation,
            filters: self.filters(ctx, self.problems.len() as u64),
            append: true,
        }
    }

    /// Clamp the cursor into the visible rows and pull the scroll window
    /// along.
    fn reclamp(&mut self, ctx: &Ctx<'_>) {
        let visible_len = self.visible(ctx.bookmarks).len();
        self.cursor = self.cursor.min(visible_len.saturating_sub(1));
        let page = Self::page_height(ctx.height);
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor + 1 > self.scroll + page {
            self.scroll = self.cursor + 1 - page;
        }
    }

    fn move_cursor(&mut self, delta: isize, ctx: &Ctx<'_>) -> Command {
        let visible_len = self.visible(ctx.bookmarks).len();
        if visible_len == 0 {
            self.cursor = 0;
            self.scroll = 0;
            return Command::None;
        }
        let max = visible_len - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
        self.reclamp(ctx);
        self.maybe_fetch_more(ctx)
    }

    pub fn on_key(&mut self, key: &KeyEvent, ctx: &mut Ctx<'_>) -> Outcome {
        if self.search_input.is_some() {
            return self.on_search_key(key, ctx);
        }

        let page = Self::page_height(ctx.height) as isize;
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => Outcome::Command(self.move_cursor(1, ctx)),
            KeyCode::Up | KeyCode::Char('k') => Outcome::Command(self.move_cursor(-1, ctx)),
            KeyCode::PageDown => Outcome::Command(self.move_cursor(page, ctx)),
            KeyCode::PageUp => Outcome::Command(self.move_cursor(-page, ctx)),
            KeyCode::Home | KeyCode::Char('g') => Outcome::Command(self.move_cursor(isize::MIN, ctx)),
            KeyCode::End | KeyCode::Char('G') => {
                let len = self.visible(ctx.bookmarks).len() as isize;
                Outcome::Command(self.move_cursor(len, ctx))
            }
            KeyCode::Enter => {
                let Some(selected) = self.visible(ctx.bookmarks).get(self.cursor).copied() else {
                    return Outcome::Command(Command::None);
                };
                let slug = selected.slug.clone();
                let screen =
                    ScreenState::Problem(crate::screens::ProblemModel::loading(slug.clone()));
                Outcome::Push(
                    screen,
                    Command::batch(vec![
                        Command::FetchProblem { slug },
                        Command::StartTimer,
                    ]),
                )
            }
            KeyCode::Char('d') => {
                self.difficulty = cycle_difficulty(self.difficulty);
                Outcome::Command(self.reset_and_fetch(ctx))
            }
            KeyCode::Char('s') => {
                self.status = cycle_status(self.status);
                Outcome::Command(self.reset_and_fetch(ctx))
            }
            KeyCode::Char('f') => {
                self.bookmarked_only = !self.bookmarked_only;
                Outcome::Command(self.reset_and_fetch(ctx))
            }
            KeyCode::Char('/') => {
                self.search_input = Some(self.search.clone());
                Outcome::Command(Command::None)
            }
            KeyCode::Char('r') => Outcome::Command(self.reset_and_fetch(ctx)),
            KeyCode::Escape => Outcome::Back,
            _ => Outcome::Ignored,
        }
    }

    /// Keys while the search bar is focused. Escape cancels the edit
    /// without touching the applied search; Enter applies and refetches.
    fn on_search_key(&mut self, key: &KeyEvent, ctx: &Ctx<'_>) -> Outcome {
        let Some(draft) = self.search_input.as_mut() else {
            return Outcome::Ignored;
        };
        match key.code {
            KeyCode::Escape => {
                self.search_input = None;
                Outcome::Command(Command::None)
            }
            KeyCode::Enter => {
                self.search = self.search_input.take().unwrap_or_default();
                Outcome::Command(self.reset_and_fetch(ctx))
            }
            KeyCode::Backspace => {
                draft.pop();
                Outcome::Command(Command::None)
            }
            KeyCode::Char(c) if !key.ctrl() && !key.alt() => {
                draft.push(c);
                Outcome::Command(Command::None)
            }
            _ => Outcome::Command(Command::None),
        }
    }

    /// A page arrived. Stale generations are dropped; appends preserve the
    /// cursor.
    pub fn on_page(&mut self, generation: u64, append: bool, page: ProblemPage, ctx: &Ctx<'_>) {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale page dropped");
            return;
        }
        self.loading = false;
        self.error = None;
        self.total = page.total;
        if append {
            self.problems.extend(page.problems);
        } else {
            self.problems = page.problems;
        }
        self.reclamp(ctx);
    }

    /// A fetch failed. Stale generations are dropped.
    pub fn on_fetch_error(&mut self, generation: u64, error: String) {
        if generation != self.generation {
            return;
        }
        self.loading = false;
        self.error = Some(error);
    }
}

fn cycle_difficulty(current: Option<Difficulty>) -> Option<Difficulty> {
    match current {
        None => Some(Difficulty::Easy),
        Some(Difficulty::Easy) => Some(Difficulty::Medium),
        Some(Difficulty::Medium) => Some(Difficulty::Hard),
        Some(Difficulty::Hard) => None,
    }
}

fn cycle_status(current: Option<ProblemStatus>) -> Option<ProblemStatus> {
    match current {
        None => Some(ProblemStatus::Solved),
        Some(ProblemStatus::Solved) => Some(ProblemStatus::Attempted),
        Some(ProblemStatus::Attempted) => Some(ProblemStatus::Todo),
        Some(ProblemStatus::Todo) => None,
    }
}
