#![forbid(unsafe_code)]

//! Remote problem-data client.
//!
//! This crate is the boundary with the coding-practice service: typed
//! payloads, the [`ProblemApi`] trait the effect executor calls, and a
//! blocking HTTP implementation. Every call is synchronous and fallible;
//! the TUI runtime only ever invokes them from effect-executor worker
//! threads, and every error is normalized to a message before it reaches a
//! reducer.

pub mod api;
pub mod http;
pub mod types;

pub use api::{ProblemApi, RunRequest};
pub use http::{HttpApi, SessionTokens};
pub use types::{
    AuthUser, CodeSnippet, Difficulty, ProblemDetail, ProblemFilters, ProblemPage, ProblemStatus,
    ProblemSummary, SkillStat, SkillStats, Submission, SubmissionDetail, SubmitResult, TestResult,
    UserProfile,
};

/// Errors from the remote service boundary.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status.
    #[error("server returned status {0}")]
    Status(u16),

    /// The service answered but reported an error of its own.
    #[error("service error: {0}")]
    Api(String),

    /// Response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The call requires a signed-in session.
    #[error("not signed in")]
    Unauthenticated,
}

/// Result alias for client calls.
pub type ClientResult<T> = Result<T, ClientError>;
