#![forbid(unsafe_code)]

//! The problem-detail screen.
//!
//! Two regions: the statement body and an overlay drawer showing exactly
//! one panel at a time (hints, submissions, snapshots, note, diff, test
//! result, submit result, or a status message). `Tab` moves focus between
//! the regions; scroll keys act on whichever is focused. Opening a panel
//! resets its scroll and focuses the drawer; `Escape` closes an open panel
//! first and only navigates back once nothing is open.
//!
//! Panels that need data (submissions, snapshots, note, snapshot diff,
//! submission source) open empty and issue the matching fetch command;
//! their content arrives later as messages keyed by slug or problem id, so
//! a response for a problem no longer on screen is dropped.
//!
//! # Keys
//!
//! - `h` hints (then `n`/`p` to step), `s` submissions, `a` snapshots,
//!   `o` note
//! - `t` run tests, `S` submit, `b` bookmark, `e` edit, `w` save snapshot
//! - in the snapshots panel: `j`/`k` select, `Enter` diff, `x` delete
//! - in the submissions panel: `1`–`9` view that submission's code

use grind_client::{ProblemDetail, Submission, SubmitResult, TestResult};
use grind_core::event::{KeyCode, KeyEvent};
use grind_store::Snapshot;
use grind_text::wrap;

use crate::command::Command;
use crate::screens::{Ctx, Outcome};

/// Which region scroll keys act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusRegion {
    #[default]
    Body,
    Drawer,
}

/// The drawer's state: at most one panel is ever open.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Panel {
    #[default]
    None,
    Hint {
        index: usize,
        scroll: usize,
    },
    Submissions {
        items: Option<Vec<Submission>>,
        scroll: usize,
    },
    Snapshots {
        items: Option<Vec<Snapshot>>,
        cursor: usize,
        scroll: usize,
    },
    Note {
        text: Option<String>,
        scroll: usize,
    },
    /// Generic read-only text viewer, used for snapshot diffs and
    /// submission sources.
    Diff {
        title: String,
        text: Option<String>,
        scroll: usize,
    },
    TestResult {
        scroll: usize,
    },
    SubmitResult {
        scroll: usize,
    },
    Status {
        message: String,
    },
}

impl Panel {
    /// Short name for the drawer title.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::None => "",
            Self::Hint { .. } => "hints",
            Self::Submissions { .. } => "submissions",
            Self::Snapshots { .. } => "snapshots",
            Self::Note { .. } => "note",
            Self::Diff { title, .. } => title,
            Self::TestResult { .. } => "test result",
            Self::SubmitResult { .. } => "submit result",
            Self::Status { .. } => "status",
        }
    }

    /// Whether any panel is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// The problem screen's sub-model.
#[derive(Debug, Clone, Default)]
pub struct ProblemModel {
    pub slug: String,
    /// `None` while the detail fetch is in flight.
    pub detail: Option<Box<ProblemDetail>>,
    pub load_error: Option<String>,
    pub body_scroll: usize,
    pub focus: FocusRegion,
    pub panel: Panel,
    /// A test or submit is in flight.
    pub is_running: bool,
    /// Seconds spent on this problem, driven by the timer subscription.
    pub elapsed_secs: u64,
    pub test_result: Option<TestResult>,
    pub submit_result: Option<SubmitResult>,
}

impl ProblemModel {
    /// Screen awaiting its detail fetch.
    #[must_use]
    pub fn loading(slug: String) -> Self {
        Self {
            slug,
            ..Self::default()
        }
    }

    /// Screen for an already-fetched problem (daily/random arrivals).
    #[must_use]
    pub fn with_detail(detail: Box<ProblemDetail>) -> Self {
        Self {
            slug: detail.slug.clone(),
            detail: Some(detail),
            ..Self::default()
        }
    }

    /// Problem id, once the detail is loaded.
    #[must_use]
    pub fn problem_id(&self) -> Option<u64> {
        self.detail.as_ref().map(|d| d.id)
    }

    // ── layout ──────────────────────────────────────────────────────────

    /// Side-by-side body/drawer above this width; stacked below it.
    #[must_use]
    pub fn wide_layout(width: u16) -> bool {
        width >= 100
    }

    /// Columns available to wrapped body text.
    #[must_use]
    pub fn body_width(width: u16) -> usize {
        let total = width as usize;
        let cols = if Self::wide_layout(width) {
            total * 3 / 5
        } else {
            total
        };
        cols.saturating_sub(4).max(10)
    }

    /// Columns available to wrapped drawer content.
    #[must_use]
    pub fn drawer_width(width: u16) -> usize {
        let total = width as usize;
        let cols = if Self::wide_layout(width) {
            total - total * 3 / 5
        } else {
            total
        };
        cols.saturating_sub(4).max(10)
    }

    /// Rows of drawer content visible at this terminal size.
    #[must_use]
    pub fn drawer_height(width: u16, height: u16) -> usize {
        let content = (height as usize).saturating_sub(2);
        let rows = if Self::wide_layout(width) {
            // Full-height column next to the body.
            content.saturating_sub(3)
        } else {
            // Bottom half of a stacked layout.
            content / 2
        };
        rows.max(1)
    }

    /// Rows of body content visible at this terminal size.
    #[must_use]
    pub fn body_height(&self, width: u16, height: u16) -> usize {
        let content = (height as usize).saturating_sub(4);
        let rows = if !Self::wide_layout(width) && self.panel.is_open() {
            content.saturating_sub(Self::drawer_height(width, height) + 2)
        } else {
            content
        };
        rows.max(1)
    }

    // ── panel content (shared by update clamps and the view) ────────────

    /// The active panel's content, wrapped for the drawer width.
    #[must_use]
    pub fn panel_lines(&self, width: u16) -> Vec<String> {
        let cols = Self::drawer_width(width);
        match &self.panel {
            Panel::None => Vec::new(),
            Panel::Hint { index, .. } => {
                let hints = self.hints();
                match hints.get(*index) {
                    Some(hint) => {
                        let mut lines = vec![format!("hint {}/{}", index + 1, hints.len())];
                        lines.push(String::new());
                        lines.extend(wrap(hint, cols));
                        lines
                    }
                    None => vec!["no hints for this problem".to_string()],
                }
            }
            Panel::Submissions { items, .. } => match items {
                None => vec!["loading…".to_string()],
                Some(items) if items.is_empty() => vec!["no submissions yet".to_string()],
                Some(items) => items
                    .iter()
                    .enumerate()
                    .map(|(i, s)| {
                        format!(
                            "{}. {}  {}  {}  {}",
                            i + 1,
                            s.status,
                            s.lang,
                            s.runtime,
                            s.submitted_at
                        )
                    })
                    .collect(),
            },
            Panel::Snapshots { items, .. } => match items {
                None => vec!["loading…".to_string()],
                Some(items) if items.is_empty() => {
                    vec!["no snapshots yet, press w to save one".to_string()]
                }
                Some(items) => items
                    .iter()
                    .map(|s| format!("#{}  {}", s.id, s.label))
                    .collect(),
            },
            Panel::Note { text, .. } => match text {
                None => vec!["loading…".to_string()],
                Some(text) if text.is_empty() => vec!["empty note".to_string()],
                Some(text) => wrap(text, cols),
            },
            Panel::Diff { text, .. } => match text {
                None => vec!["loading…".to_string()],
                Some(text) => text.lines().map(str::to_string).collect(),
            },
            Panel::TestResult { .. } => match &self.test_result {
                None => vec!["no test run yet".to_string()],
                Some(result) => test_result_lines(result, cols),
            },
            Panel::SubmitResult { .. } => match &self.submit_result {
                None => vec!["no submission yet".to_string()],
                Some(result) => submit_result_lines(result, cols),
            },
            Panel::Status { message } => wrap(message, cols),
        }
    }

    /// Wrapped statement lines.
    #[must_use]
    pub fn body_lines(&self, width: u16) -> Vec<String> {
        let cols = Self::body_width(width);
        match (&self.detail, &self.load_error) {
            (Some(detail), _) => wrap(&detail.content, cols),
            (None, Some(error)) => wrap(&format!("failed to load problem: {error}"), cols),
            (None, None) => vec!["loading…".to_string()],
        }
    }

    fn hints(&self) -> &[String] {
        match &self.detail {
            Some(detail) => detail.hints.as_slice(),
            None => &[],
        }
    }

    fn max_panel_scroll(&self, ctx: &Ctx<'_>) -> usize {
        self.panel_lines(ctx.width)
            .len()
            .saturating_sub(Self::drawer_height(ctx.width, ctx.height))
    }

    fn max_body_scroll(&self, ctx: &Ctx<'_>) -> usize {
        self.body_lines(ctx.width)
            .len()
            .saturating_sub(self.body_height(ctx.width, ctx.height))
    }

    // ── transitions ─────────────────────────────────────────────────────

    /// Open a panel: the previous panel's transient state is discarded
    /// wholesale and focus moves to the drawer.
    fn open_panel(&mut self, panel: Panel) {
        self.panel = panel;
        self.focus = FocusRegion::Drawer;
    }

    fn close_panel(&mut self) {
        self.panel = Panel::None;
        self.focus = FocusRegion::Body;
    }

    /// Toggle a panel by label: pressing the open panel's key closes it.
    fn toggle(&mut self, panel: Panel) -> bool {
        if std::mem::discriminant(&self.panel) == std::mem::discriminant(&panel) {
            self.close_panel();
            false
        } else {
            self.open_panel(panel);
            true
        }
    }

    fn scroll_by(&mut self, delta: isize, ctx: &Ctx<'_>) {
        match self.focus {
            FocusRegion::Body => {
                let max = self.max_body_scroll(ctx);
                self.body_scroll = self.body_scroll.saturating_add_signed(delta).min(max);
            }
            FocusRegion::Drawer => {
                let max = self.max_panel_scroll(ctx);
                let scroll = match &mut self.panel {
                    Panel::Hint { scroll, .. }
                    | Panel::Submissions { scroll, .. }
                    | Panel::Note { scroll, .. }
                    | Panel::Diff { scroll, .. }
                    | Panel::TestResult { scroll }
                    | Panel::SubmitResult { scroll } => scroll,
                    Panel::Snapshots { .. } | Panel::Status { .. } | Panel::None => return,
                };
                *scroll = scroll.saturating_add_signed(delta).min(max);
            }
        }
    }

    /// Move the snapshot cursor, keeping it inside the list and the
    /// visible window.
    fn move_snapshot_cursor(&mut self, delta: isize, ctx: &Ctx<'_>) {
        let height = Self::drawer_height(ctx.width, ctx.height);
        if let Panel::Snapshots {
            items: Some(items),
            cursor,
            scroll,
        } = &mut self.panel
        {
            if items.is_empty() {
                *cursor = 0;
                *scroll = 0;
                return;
            }
            *cursor = cursor.saturating_add_signed(delta).min(items.len() - 1);
            if *cursor < *scroll {
                *scroll = *cursor;
            } else if *cursor + 1 > *scroll + height {
                *scroll = *cursor + 1 - height;
            }
        }
    }

    pub fn on_key(&mut self, key: &KeyEvent, ctx: &mut Ctx<'_>) -> Outcome {
        match key.code {
            KeyCode::Escape => {
                if self.panel.is_open() {
                    self.close_panel();
                    Outcome::Command(Command::None)
                } else {
                    Outcome::Back
                }
            }
            KeyCode::Tab => {
                if self.panel.is_open() {
                    self.focus = match self.focus {
                        FocusRegion::Body => FocusRegion::Drawer,
                        FocusRegion::Drawer => FocusRegion::Body,
                    };
                }
                Outcome::Command(Command::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.snapshot_list_focused() {
                    self.move_snapshot_cursor(1, ctx);
                } else {
                    self.scroll_by(1, ctx);
                }
                Outcome::Command(Command::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.snapshot_list_focused() {
                    self.move_snapshot_cursor(-1, ctx);
                } else {
                    self.scroll_by(-1, ctx);
                }
                Outcome::Command(Command::None)
            }
            KeyCode::PageDown => {
                self.scroll_by(10, ctx);
                Outcome::Command(Command::None)
            }
            KeyCode::PageUp => {
                self.scroll_by(-10, ctx);
                Outcome::Command(Command::None)
            }
            KeyCode::Char('h') => Outcome::Command(self.toggle_hints()),
            KeyCode::Char('n') => {
                self.step_hint(1);
                Outcome::Command(Command::None)
            }
            KeyCode::Char('p') => {
                self.step_hint(-1);
                Outcome::Command(Command::None)
            }
            KeyCode::Char('s') => Outcome::Command(self.toggle_submissions()),
            KeyCode::Char('a') => Outcome::Command(self.toggle_snapshots()),
            KeyCode::Char('o') => Outcome::Command(self.toggle_note()),
            KeyCode::Char('O') => Outcome::Command(self.edit_note()),
            KeyCode::Enter => Outcome::Command(self.snapshot_diff()),
            KeyCode::Char('x') => Outcome::Command(self.delete_snapshot()),
            KeyCode::Char(c @ '1'..='9') => {
                Outcome::Command(self.view_submission(c as usize - '1' as usize))
            }
            KeyCode::Char('t') => Outcome::Command(self.run_tests()),
            KeyCode::Char('S') => Outcome::Command(self.submit()),
            KeyCode::Char('b') => Outcome::Command(self.toggle_bookmark(ctx)),
            KeyCode::Char('e') => Outcome::Command(self.open_editor(ctx)),
            KeyCode::Char('w') => Outcome::Command(self.save_snapshot()),
            _ => Outcome::Ignored,
        }
    }

    fn snapshot_list_focused(&self) -> bool {
        self.focus == FocusRegion::Drawer && matches!(self.panel, Panel::Snapshots { .. })
    }

    fn toggle_hints(&mut self) -> Command {
        if self.detail.is_none() {
            return Command::None;
        }
        self.toggle(Panel::Hint {
            index: 0,
            scroll: 0,
        });
        Command::None
    }

    /// Step the active hint, clamped to `[0, hints-1]`.
    fn step_hint(&mut self, delta: isize) {
        let count = self.hints().len();
        if let Panel::Hint { index, scroll } = &mut self.panel {
            if count == 0 {
                return;
            }
            *index = index.saturating_add_signed(delta).min(count - 1);
            *scroll = 0;
        }
    }

    fn toggle_submissions(&mut self) -> Command {
        if self.detail.is_none() {
            return Command::None;
        }
        if self.toggle(Panel::Submissions {
            items: None,
            scroll: 0,
        }) {
            Command::FetchSubmissions {
                slug: self.slug.clone(),
            }
        } else {
            Command::None
        }
    }

    fn toggle_snapshots(&mut self) -> Command {
        let Some(problem_id) = self.problem_id() else {
            return Command::None;
        };
        if self.toggle(Panel::Snapshots {
            items: None,
            cursor: 0,
            scroll: 0,
        }) {
            Command::FetchSnapshots { problem_id }
        } else {
            Command::None
        }
    }

    fn toggle_note(&mut self) -> Command {
        let Some(problem_id) = self.problem_id() else {
            return Command::None;
        };
        if self.toggle(Panel::Note {
            text: None,
            scroll: 0,
        }) {
            Command::FetchNote { problem_id }
        } else {
            Command::None
        }
    }

    /// `Enter` in the snapshots panel: diff the selected snapshot against
    /// the current solution file.
    fn snapshot_diff(&mut self) -> Command {
        let Some(problem_id) = self.problem_id() else {
            return Command::None;
        };
        if let Panel::Snapshots {
            items: Some(items),
            cursor,
            ..
        } = &self.panel
        {
            let Some(snapshot) = items.get(*cursor) else {
                return Command::None;
            };
            let snapshot_id = snapshot.id;
            self.open_panel(Panel::Diff {
                title: "diff".to_string(),
                text: None,
                scroll: 0,
            });
            return Command::ComputeSnapshotDiff {
                problem_id,
                snapshot_id,
                slug: self.slug.clone(),
            };
        }
        Command::None
    }

    /// `x` in the snapshots panel.
    fn delete_snapshot(&mut self) -> Command {
        let Some(problem_id) = self.problem_id() else {
            return Command::None;
        };
        if let Panel::Snapshots {
            items: Some(items),
            cursor,
            ..
        } = &self.panel
        {
            if let Some(snapshot) = items.get(*cursor) {
                return Command::DeleteSnapshot {
                    problem_id,
                    snapshot_id: snapshot.id,
                };
            }
        }
        Command::None
    }

    /// `1`–`9` in the submissions panel: view that submission's code.
    fn view_submission(&mut self, index: usize) -> Command {
        if let Panel::Submissions {
            items: Some(items), ..
        } = &self.panel
        {
            if let Some(submission) = items.get(index) {
                let id = submission.id;
                self.open_panel(Panel::Diff {
                    title: "submission".to_string(),
                    text: None,
                    scroll: 0,
                });
                return Command::FetchSubmissionDetail {
                    slug: self.slug.clone(),
                    id,
                };
            }
        }
        Command::None
    }

    fn run_tests(&mut self) -> Command {
        let Some(detail) = &self.detail else {
            return Command::None;
        };
        if self.is_running {
            return Command::None;
        }
        self.is_running = true;
        self.test_result = None;
        Command::TestSolution {
            slug: self.slug.clone(),
            question_id: detail.id,
        }
    }

    fn submit(&mut self) -> Command {
        let Some(detail) = &self.detail else {
            return Command::None;
        };
        if self.is_running {
            return Command::None;
        }
        self.is_running = true;
        self.submit_result = None;
        Command::SubmitSolution {
            slug: self.slug.clone(),
            question_id: detail.id,
        }
    }

    /// Pure local flip plus fire-and-forget persistence.
    fn toggle_bookmark(&mut self, ctx: &mut Ctx<'_>) -> Command {
        let Some(problem_id) = self.problem_id() else {
            return Command::None;
        };
        let bookmarked = if ctx.bookmarks.contains(&problem_id) {
            ctx.bookmarks.remove(&problem_id);
            false
        } else {
            ctx.bookmarks.insert(problem_id);
            true
        };
        Command::PersistBookmark {
            problem_id,
            bookmarked,
        }
    }

    fn open_editor(&mut self, ctx: &Ctx<'_>) -> Command {
        let Some(detail) = &self.detail else {
            return Command::None;
        };
        let seed = detail
            .snippet_for(&ctx.config.lang)
            .map(|s| s.code.clone())
            .unwrap_or_default();
        Command::OpenEditor(crate::command::EditorTarget::Solution {
            slug: self.slug.clone(),
            seed,
        })
    }

    /// `O`: edit the per-problem note in the external editor.
    fn edit_note(&mut self) -> Command {
        let Some(problem_id) = self.problem_id() else {
            return Command::None;
        };
        Command::OpenEditor(crate::command::EditorTarget::Note { problem_id })
    }

    fn save_snapshot(&mut self) -> Command {
        let Some(problem_id) = self.problem_id() else {
            return Command::None;
        };
        Command::SaveSnapshot {
            problem_id,
            slug: self.slug.clone(),
        }
    }

    // ── result messages ─────────────────────────────────────────────────

    /// Detail arrived. Responses for a different slug are stale and
    /// dropped.
    pub fn on_detail(&mut self, slug: &str, detail: Box<ProblemDetail>) {
        if slug != self.slug {
            tracing::debug!(slug, current = %self.slug, "stale detail dropped");
            return;
        }
        self.detail = Some(detail);
        self.load_error = None;
        self.body_scroll = 0;
    }

    pub fn on_detail_error(&mut self, slug: &str, error: String) {
        if slug != self.slug {
            return;
        }
        self.load_error = Some(error);
    }

    pub fn on_submissions(&mut self, slug: &str, submissions: Vec<Submission>) {
        if slug != self.slug {
            return;
        }
        if let Panel::Submissions { items, .. } = &mut self.panel {
            *items = Some(submissions);
        }
    }

    pub fn on_snapshots(&mut self, problem_id: u64, snapshots: Vec<Snapshot>) {
        if self.problem_id() != Some(problem_id) {
            return;
        }
        if let Panel::Snapshots { items, cursor, .. } = &mut self.panel {
            *cursor = (*cursor).min(snapshots.len().saturating_sub(1));
            *items = Some(snapshots);
        }
    }

    /// A snapshot was saved: refresh the open panel, or confirm via the
    /// status panel.
    pub fn on_snapshot_saved(&mut self, problem_id: u64, snapshots: Vec<Snapshot>) {
        if self.problem_id() != Some(problem_id) {
            return;
        }
        match &mut self.panel {
            Panel::Snapshots { items, .. } => *items = Some(snapshots),
            _ => {
                self.open_panel(Panel::Status {
                    message: format!("snapshot saved ({} total)", snapshots.len()),
                });
            }
        }
    }

    pub fn on_note(&mut self, problem_id: u64, note: String) {
        if self.problem_id() != Some(problem_id) {
            return;
        }
        if let Panel::Note { text, .. } = &mut self.panel {
            *text = Some(note);
        }
    }

    pub fn on_diff(&mut self, problem_id: u64, diff: String) {
        if self.problem_id() != Some(problem_id) {
            return;
        }
        if let Panel::Diff { text, .. } = &mut self.panel {
            *text = Some(diff);
        }
    }

    pub fn on_submission_detail(&mut self, slug: &str, code: String) {
        if slug != self.slug {
            return;
        }
        if let Panel::Diff { text, .. } = &mut self.panel {
            *text = Some(code);
        }
    }

    pub fn on_test_finished(&mut self, slug: &str, result: Result<TestResult, String>) {
        if slug != self.slug {
            return;
        }
        self.is_running = false;
        match result {
            Ok(result) => {
                self.test_result = Some(result);
                self.open_panel(Panel::TestResult { scroll: 0 });
            }
            Err(error) => self.open_panel(Panel::Status {
                message: format!("test run failed: {error}"),
            }),
        }
    }

    pub fn on_submit_finished(&mut self, slug: &str, result: Result<SubmitResult, String>) {
        if slug != self.slug {
            return;
        }
        self.is_running = false;
        match result {
            Ok(result) => {
                self.submit_result = Some(result);
                self.open_panel(Panel::SubmitResult { scroll: 0 });
            }
            Err(error) => self.open_panel(Panel::Status {
                message: format!("submit failed: {error}"),
            }),
        }
    }

    /// Generic operation failure: surface in the status panel.
    pub fn on_operation_error(&mut self, error: String) {
        self.open_panel(Panel::Status { message: error });
    }

    pub fn on_timer_tick(&mut self) {
        self.elapsed_secs += 1;
    }
}

fn test_result_lines(result: &TestResult, cols: usize) -> Vec<String> {
    let mut lines = vec![
        result.status.clone(),
        format!(
            "{}/{} testcases passed",
            result.passed_testcases, result.total_testcases
        ),
    ];
    if let Some(error) = &result.runtime_error {
        lines.push(String::new());
        lines.extend(wrap(error, cols));
    }
    if !result.code_output.is_empty() {
        lines.push(String::new());
        lines.push("output:".to_string());
        lines.extend(result.code_output.iter().cloned());
        lines.push("expected:".to_string());
        lines.extend(result.expected_output.iter().cloned());
    }
    lines
}

fn submit_result_lines(result: &SubmitResult, cols: usize) -> Vec<String> {
    let mut lines = vec![
        result.status.clone(),
        format!(
            "{}/{} testcases passed",
            result.passed_testcases, result.total_testcases
        ),
    ];
    if let (Some(runtime), Some(memory)) = (&result.runtime, &result.memory) {
        lines.push(format!("runtime {runtime}, memory {memory}"));
    }
    if let Some(input) = &result.failed_input {
        lines.push(String::new());
        lines.push("failed on input:".to_string());
        lines.extend(wrap(input, cols));
    }
    if let Some(error) = &result.runtime_error {
        lines.push(String::new());
        lines.extend(wrap(error, cols));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use grind_client::Difficulty;
    use grind_store::Config;
    use std::collections::BTreeSet;

    fn detail(hints: usize) -> Box<ProblemDetail> {
        Box::new(ProblemDetail {
            id: 1,
            slug: "two-sum".into(),
            title: "Two Sum".into(),
            difficulty: Difficulty::Easy,
            content: "Given an array of integers, return indices of the two numbers.".into(),
            hints: (0..hints).map(|i| format!("hint {i}")).collect(),
            example_testcases: "[2,7,11,15]\n9".into(),
            code_snippets: vec![],
            acceptance_rate: 49.0,
            likes: 1,
            dislikes: 0,
        })
    }

    struct Fixture {
        config: Config,
        bookmarks: BTreeSet<u64>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: Config::default(),
                bookmarks: BTreeSet::new(),
            }
        }

        fn ctx(&mut self) -> Ctx<'_> {
            Ctx {
                width: 120,
                height: 40,
                user: None,
                config: &self.config,
                bookmarks: &mut self.bookmarks,
            }
        }
    }

    fn loaded(hints: usize) -> ProblemModel {
        ProblemModel::with_detail(detail(hints))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code)
    }

    #[test]
    fn hint_panel_opens_and_closes_on_toggle() {
        let mut fx = Fixture::new();
        let mut screen = loaded(2);
        screen.on_key(&key(KeyCode::Char('h')), &mut fx.ctx());
        assert!(matches!(screen.panel, Panel::Hint { index: 0, .. }));
        assert_eq!(screen.focus, FocusRegion::Drawer);

        screen.on_key(&key(KeyCode::Char('h')), &mut fx.ctx());
        assert!(!screen.panel.is_open());
        assert_eq!(screen.focus, FocusRegion::Body);
    }

    #[test]
    fn hint_index_clamps_to_bounds() {
        let mut fx = Fixture::new();
        let mut screen = loaded(1);
        screen.on_key(&key(KeyCode::Char('h')), &mut fx.ctx());
        for _ in 0..10 {
            screen.on_key(&key(KeyCode::Char('n')), &mut fx.ctx());
        }
        assert!(matches!(screen.panel, Panel::Hint { index: 0, .. }));
    }

    #[test]
    fn hint_steps_and_clamps_down() {
        let mut fx = Fixture::new();
        let mut screen = loaded(3);
        screen.on_key(&key(KeyCode::Char('h')), &mut fx.ctx());
        screen.on_key(&key(KeyCode::Char('n')), &mut fx.ctx());
        screen.on_key(&key(KeyCode::Char('n')), &mut fx.ctx());
        screen.on_key(&key(KeyCode::Char('n')), &mut fx.ctx());
        assert!(matches!(screen.panel, Panel::Hint { index: 2, .. }));
        for _ in 0..5 {
            screen.on_key(&key(KeyCode::Char('p')), &mut fx.ctx());
        }
        assert!(matches!(screen.panel, Panel::Hint { index: 0, .. }));
    }

    #[test]
    fn escape_closes_panel_before_navigating_back() {
        let mut fx = Fixture::new();
        let mut screen = loaded(2);
        screen.on_key(&key(KeyCode::Char('h')), &mut fx.ctx());
        assert!(screen.panel.is_open());

        let outcome = screen.on_key(&key(KeyCode::Escape), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Command(Command::None)));
        assert!(!screen.panel.is_open());

        let outcome = screen.on_key(&key(KeyCode::Escape), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Back));
    }

    #[test]
    fn opening_a_panel_discards_the_previous_ones_state() {
        let mut fx = Fixture::new();
        let mut screen = loaded(3);
        screen.on_key(&key(KeyCode::Char('h')), &mut fx.ctx());
        screen.on_key(&key(KeyCode::Char('n')), &mut fx.ctx());
        assert!(matches!(screen.panel, Panel::Hint { index: 1, .. }));

        // Snapshots replaces hints wholesale; reopening hints starts at 0.
        screen.on_key(&key(KeyCode::Char('a')), &mut fx.ctx());
        assert!(matches!(screen.panel, Panel::Snapshots { .. }));
        screen.on_key(&key(KeyCode::Char('h')), &mut fx.ctx());
        assert!(matches!(screen.panel, Panel::Hint { index: 0, .. }));
    }

    #[test]
    fn tab_toggles_focus_without_touching_panel() {
        let mut fx = Fixture::new();
        let mut screen = loaded(2);
        screen.on_key(&key(KeyCode::Char('h')), &mut fx.ctx());
        assert_eq!(screen.focus, FocusRegion::Drawer);
        screen.on_key(&key(KeyCode::Tab), &mut fx.ctx());
        assert_eq!(screen.focus, FocusRegion::Body);
        assert!(matches!(screen.panel, Panel::Hint { .. }));
        screen.on_key(&key(KeyCode::Tab), &mut fx.ctx());
        assert_eq!(screen.focus, FocusRegion::Drawer);
    }

    #[test]
    fn submissions_open_issues_fetch_once() {
        let mut fx = Fixture::new();
        let mut screen = loaded(0);
        let outcome = screen.on_key(&key(KeyCode::Char('s')), &mut fx.ctx());
        assert!(matches!(
            outcome,
            Outcome::Command(Command::FetchSubmissions { .. })
        ));
        // Closing must not refetch.
        let outcome = screen.on_key(&key(KeyCode::Char('s')), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Command(Command::None)));
    }

    #[test]
    fn test_run_sets_running_and_blocks_reentry() {
        let mut fx = Fixture::new();
        let mut screen = loaded(0);
        let outcome = screen.on_key(&key(KeyCode::Char('t')), &mut fx.ctx());
        assert!(screen.is_running);
        assert!(matches!(
            outcome,
            Outcome::Command(Command::TestSolution { question_id: 1, .. })
        ));
        let outcome = screen.on_key(&key(KeyCode::Char('t')), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Command(Command::None)));
    }

    #[test]
    fn test_completion_opens_result_panel() {
        let mut fx = Fixture::new();
        let mut screen = loaded(0);
        screen.on_key(&key(KeyCode::Char('t')), &mut fx.ctx());
        screen.on_test_finished(
            "two-sum",
            Ok(TestResult {
                passed: true,
                status: "Accepted".into(),
                passed_testcases: 3,
                total_testcases: 3,
                code_output: vec![],
                expected_output: vec![],
                runtime_error: None,
            }),
        );
        assert!(!screen.is_running);
        assert!(matches!(screen.panel, Panel::TestResult { .. }));
        assert!(screen.test_result.as_ref().unwrap().passed);
    }

    #[test]
    fn test_failure_opens_status_panel() {
        let mut fx = Fixture::new();
        let mut screen = loaded(0);
        screen.on_key(&key(KeyCode::Char('t')), &mut fx.ctx());
        screen.on_test_finished("two-sum", Err("network down".into()));
        assert!(!screen.is_running);
        assert!(matches!(screen.panel, Panel::Status { .. }));
    }

    #[test]
    fn stale_results_are_dropped() {
        let mut screen = loaded(0);
        screen.on_detail("other-problem", detail(0));
        screen.on_test_finished("other-problem", Err("late".into()));
        assert!(!screen.panel.is_open());
        screen.on_submissions("other-problem", vec![]);
        assert!(!screen.panel.is_open());
    }

    #[test]
    fn bookmark_flips_locally_and_persists() {
        let mut fx = Fixture::new();
        let mut screen = loaded(0);
        let outcome = screen.on_key(&key(KeyCode::Char('b')), &mut fx.ctx());
        assert!(fx.bookmarks.contains(&1));
        assert!(matches!(
            outcome,
            Outcome::Command(Command::PersistBookmark {
                problem_id: 1,
                bookmarked: true,
            })
        ));
        let outcome = screen.on_key(&key(KeyCode::Char('b')), &mut fx.ctx());
        assert!(!fx.bookmarks.contains(&1));
        assert!(matches!(
            outcome,
            Outcome::Command(Command::PersistBookmark {
                bookmarked: false,
                ..
            })
        ));
    }

    #[test]
    fn snapshot_cursor_clamps() {
        let mut fx = Fixture::new();
        let mut screen = loaded(0);
        screen.on_key(&key(KeyCode::Char('a')), &mut fx.ctx());
        screen.on_snapshots(
            1,
            vec![
                Snapshot {
                    id: 1,
                    problem_id: 1,
                    label: "a".into(),
                    created_at: 0,
                    code: String::new(),
                },
                Snapshot {
                    id: 2,
                    problem_id: 1,
                    label: "b".into(),
                    created_at: 1,
                    code: String::new(),
                },
            ],
        );
        for _ in 0..10 {
            screen.on_key(&key(KeyCode::Char('j')), &mut fx.ctx());
        }
        assert!(matches!(screen.panel, Panel::Snapshots { cursor: 1, .. }));
    }

    #[test]
    fn snapshot_enter_opens_diff_and_fetches() {
        let mut fx = Fixture::new();
        let mut screen = loaded(0);
        screen.on_key(&key(KeyCode::Char('a')), &mut fx.ctx());
        screen.on_snapshots(
            1,
            vec![Snapshot {
                id: 9,
                problem_id: 1,
                label: "a".into(),
                created_at: 0,
                code: String::new(),
            }],
        );
        let outcome = screen.on_key(&key(KeyCode::Enter), &mut fx.ctx());
        assert!(matches!(screen.panel, Panel::Diff { .. }));
        assert!(matches!(
            outcome,
            Outcome::Command(Command::ComputeSnapshotDiff { snapshot_id: 9, .. })
        ));
        screen.on_diff(1, "-old\n+new".into());
        assert!(
            matches!(&screen.panel, Panel::Diff { text: Some(t), .. } if t.contains("+new"))
        );
    }

    #[test]
    fn loading_screen_ignores_action_keys() {
        let mut fx = Fixture::new();
        let mut screen = ProblemModel::loading("two-sum".into());
        let outcome = screen.on_key(&key(KeyCode::Char('t')), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Command(Command::None)));
        assert!(!screen.is_running);
        let outcome = screen.on_key(&key(KeyCode::Char('h')), &mut fx.ctx());
        assert!(matches!(outcome, Outcome::Command(Command::None)));
        assert!(!screen.panel.is_open());
    }

    #[test]
    fn timer_accumulates() {
        let mut screen = loaded(0);
        for _ in 0..61 {
            screen.on_timer_tick();
        }
        assert_eq!(screen.elapsed_secs, 61);
    }

    #[test]
    fn body_scroll_clamps_to_content() {
        let mut fx = Fixture::new();
        let mut screen = loaded(0);
        // Short statement: scrolling down cannot move past the end.
        for _ in 0..50 {
            screen.on_key(&key(KeyCode::Char('j')), &mut fx.ctx());
        }
        let max = screen.max_body_scroll(&fx.ctx());
        assert!(screen.body_scroll <= max);
    }
}
