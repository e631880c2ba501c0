#![forbid(unsafe_code)]

//! Everything that can change state.
//!
//! A [`Msg`] is produced either by the input/signal threads (key, resize,
//! interrupt) or by the effect executor when an asynchronous command
//! finishes. Each message is consumed exactly once by the root reducer.
//! Result messages carry enough identity (generation counter, slug,
//! problem id) for the reducer to discard responses that arrive after the
//! state they were fetched for is gone.

use grind_client::{
    AuthUser, ProblemDetail, ProblemPage, SkillStats, Submission, SubmissionDetail, SubmitResult,
    TestResult, UserProfile,
};
use grind_core::event::{Event, KeyEvent};
use grind_store::Snapshot;

/// An event value describing something that happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A decoded key press.
    Key(KeyEvent),

    /// The terminal was resized.
    Resize { width: u16, height: u16 },

    /// SIGINT/SIGTERM arrived.
    Interrupt,

    /// The solve timer ticked (1 s cadence).
    TimerTick,

    /// The startup (or post-login) auth check finished.
    AuthChecked(Result<AuthUser, String>),

    /// A login attempt finished.
    LoginFinished(Result<AuthUser, String>),

    /// Credentials were cleared.
    LoggedOut,

    /// A problem-list page arrived.
    ProblemsLoaded {
        generation: u64,
        append: bool,
        page: ProblemPage,
    },

    /// A problem-list fetch failed.
    ProblemsFailed { generation: u64, error: String },

    /// Detail arrived for the problem screen showing `slug`.
    ProblemLoaded {
        slug: String,
        detail: Box<ProblemDetail>,
    },

    /// Detail fetch failed for the problem screen showing `slug`.
    ProblemFailed { slug: String, error: String },

    /// A daily/random problem arrived; the reducer navigates to it.
    ProblemReady(Box<ProblemDetail>),

    /// A daily/random fetch failed.
    ProblemReadyFailed { error: String },

    /// Submission history arrived.
    SubmissionsLoaded {
        slug: String,
        submissions: Vec<Submission>,
    },

    /// Submission history fetch failed.
    SubmissionsFailed { slug: String, error: String },

    /// One submission's source arrived.
    SubmissionDetailLoaded {
        slug: String,
        detail: Box<SubmissionDetail>,
    },

    /// Submission source fetch failed.
    SubmissionDetailFailed { slug: String, error: String },

    /// The note for a problem arrived.
    NoteLoaded { problem_id: u64, text: String },

    /// Note load failed.
    NoteFailed { problem_id: u64, error: String },

    /// The snapshot list for a problem arrived.
    SnapshotsLoaded {
        problem_id: u64,
        snapshots: Vec<Snapshot>,
    },

    /// A snapshot was saved; carries the refreshed list.
    SnapshotSaved {
        problem_id: u64,
        snapshots: Vec<Snapshot>,
    },

    /// Snapshot save failed.
    SnapshotSaveFailed { problem_id: u64, error: String },

    /// A snapshot diff was computed.
    DiffReady { problem_id: u64, diff: String },

    /// Snapshot diff computation failed.
    DiffFailed { problem_id: u64, error: String },

    /// A test run finished.
    TestFinished {
        slug: String,
        result: Result<TestResult, String>,
    },

    /// A submission finished judging.
    SubmitFinished {
        slug: String,
        result: Result<SubmitResult, String>,
    },

    /// Profile and skill stats arrived.
    ProfileLoaded {
        username: String,
        profile: Box<UserProfile>,
        skills: Box<SkillStats>,
    },

    /// Profile fetch failed.
    ProfileFailed { username: String, error: String },
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) => Self::Key(key),
            Event::Resize { width, height } => Self::Resize { width, height },
            Event::Interrupt => Self::Interrupt,
        }
    }
}

impl Msg {
    /// Stable name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Key(_) => "key",
            Self::Resize { .. } => "resize",
            Self::Interrupt => "interrupt",
            Self::TimerTick => "timer-tick",
            Self::AuthChecked(_) => "auth-checked",
            Self::LoginFinished(_) => "login-finished",
            Self::LoggedOut => "logged-out",
            Self::ProblemsLoaded { .. } => "problems-loaded",
            Self::ProblemsFailed { .. } => "problems-failed",
            Self::ProblemLoaded { .. } => "problem-loaded",
            Self::ProblemFailed { .. } => "problem-failed",
            Self::ProblemReady(_) => "problem-ready",
            Self::ProblemReadyFailed { .. } => "problem-ready-failed",
            Self::SubmissionsLoaded { .. } => "submissions-loaded",
            Self::SubmissionsFailed { .. } => "submissions-failed",
            Self::SubmissionDetailLoaded { .. } => "submission-detail-loaded",
            Self::SubmissionDetailFailed { .. } => "submission-detail-failed",
            Self::NoteLoaded { .. } => "note-loaded",
            Self::NoteFailed { .. } => "note-failed",
            Self::SnapshotsLoaded { .. } => "snapshots-loaded",
            Self::SnapshotSaved { .. } => "snapshot-saved",
            Self::SnapshotSaveFailed { .. } => "snapshot-save-failed",
            Self::DiffReady { .. } => "diff-ready",
            Self::DiffFailed { .. } => "diff-failed",
            Self::TestFinished { .. } => "test-finished",
            Self::SubmitFinished { .. } => "submit-finished",
            Self::ProfileLoaded { .. } => "profile-loaded",
            Self::ProfileFailed { .. } => "profile-failed",
        }
    }
}
