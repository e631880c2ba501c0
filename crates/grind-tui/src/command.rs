#![forbid(unsafe_code)]

//! The command algebra.
//!
//! A [`Command`] is an inert description of a side effect, produced by
//! reducers and interpreted by the effect executor (or, for
//! [`Command::OpenEditor`] and [`Command::Exit`], by the runtime itself).
//! Reducers never perform I/O; they return one of these values instead,
//! which keeps every state transition synchronously testable.

use grind_client::ProblemFilters;
use grind_store::Config;

/// A side-effect request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Command {
    /// Nothing to do.
    #[default]
    None,

    /// Execute several commands.
    Batch(Vec<Command>),

    /// Fetch one page of the problem list. `generation` is echoed back in
    /// the result message so stale pages can be discarded; `append` keeps
    /// already-loaded rows.
    FetchProblems {
        generation: u64,
        filters: ProblemFilters,
        append: bool,
    },

    /// Fetch full detail for one problem.
    FetchProblem { slug: String },

    /// Fetch today's daily challenge.
    FetchDaily,

    /// Fetch a random problem matching the filters.
    FetchRandom { filters: ProblemFilters },

    /// Fetch profile and skill stats for a user.
    FetchProfile { username: String },

    /// Fetch the submission history for a problem.
    FetchSubmissions { slug: String },

    /// Fetch the source of one submission.
    FetchSubmissionDetail { slug: String, id: u64 },

    /// Load the note for a problem.
    FetchNote { problem_id: u64 },

    /// Load the snapshot list for a problem.
    FetchSnapshots { problem_id: u64 },

    /// Save the current solution file as a new snapshot.
    SaveSnapshot { problem_id: u64, slug: String },

    /// Delete a snapshot and reload the list.
    DeleteSnapshot { problem_id: u64, snapshot_id: u64 },

    /// Compute the diff between a snapshot and the current solution file.
    ComputeSnapshotDiff {
        problem_id: u64,
        snapshot_id: u64,
        slug: String,
    },

    /// Run the solution file against the example testcases.
    TestSolution { slug: String, question_id: u64 },

    /// Submit the solution file for judging.
    SubmitSolution { slug: String, question_id: u64 },

    /// Persist a bookmark flip. Fire-and-forget: no result message.
    PersistBookmark { problem_id: u64, bookmarked: bool },

    /// Validate stored credentials and identify the user.
    CheckAuth,

    /// Store credentials and re-run the auth check.
    Login { session: String, csrf: String },

    /// Clear stored credentials.
    Logout,

    /// Persist the workspace config.
    SaveConfig(Config),

    /// Start the 1 s solve-timer subscription. A new start cancels any
    /// prior timer; at most one is ever active.
    StartTimer,

    /// Stop the solve-timer subscription.
    StopTimer,

    /// Suspend the TUI and open a file in the external editor.
    OpenEditor(EditorTarget),

    /// Leave the main loop.
    Exit,
}

/// What the external editor should open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorTarget {
    /// The solution file for a problem, seeded with `seed` when absent.
    Solution { slug: String, seed: String },
    /// The note file for a problem.
    Note { problem_id: u64 },
}

impl Command {
    /// No-op command.
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Combine commands, flattening trivial cases.
    #[must_use]
    pub fn batch(commands: Vec<Self>) -> Self {
        let mut flat: Vec<Self> = commands
            .into_iter()
            .filter(|c| !matches!(c, Self::None))
            .collect();
        match flat.len() {
            0 => Self::None,
            1 => flat.remove(0),
            _ => Self::Batch(flat),
        }
    }

    /// Stable name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Batch(_) => "batch",
            Self::FetchProblems { .. } => "fetch-problems",
            Self::FetchProblem { .. } => "fetch-problem",
            Self::FetchDaily => "fetch-daily",
            Self::FetchRandom { .. } => "fetch-random",
            Self::FetchProfile { .. } => "fetch-profile",
            Self::FetchSubmissions { .. } => "fetch-submissions",
            Self::FetchSubmissionDetail { .. } => "fetch-submission-detail",
            Self::FetchNote { .. } => "fetch-note",
            Self::FetchSnapshots { .. } => "fetch-snapshots",
            Self::SaveSnapshot { .. } => "save-snapshot",
            Self::DeleteSnapshot { .. } => "delete-snapshot",
            Self::ComputeSnapshotDiff { .. } => "compute-snapshot-diff",
            Self::TestSolution { .. } => "test-solution",
            Self::SubmitSolution { .. } => "submit-solution",
            Self::PersistBookmark { .. } => "persist-bookmark",
            Self::CheckAuth => "check-auth",
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::SaveConfig(_) => "save-config",
            Self::StartTimer => "start-timer",
            Self::StopTimer => "stop-timer",
            Self::OpenEditor(_) => "open-editor",
            Self::Exit => "exit",
        }
    }
}
