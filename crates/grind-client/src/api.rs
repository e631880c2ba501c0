#![forbid(unsafe_code)]

//! The `ProblemApi` trait.
//!
//! The effect executor holds a `ProblemApi` trait object, so tests can
//! substitute a scripted fake and never touch the network.

use crate::ClientResult;
use crate::types::{
    AuthUser, ProblemDetail, ProblemFilters, ProblemPage, SkillStats, Submission,
    SubmissionDetail, SubmitResult, TestResult, UserProfile,
};

/// A solution run request, shared by test and submit calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub slug: String,
    pub question_id: u64,
    pub lang: String,
    pub code: String,
    /// Testcase input for test runs; `None` uses the problem's examples.
    pub testcases: Option<String>,
}

/// Synchronous client boundary to the problem service.
///
/// Implementations may block; callers run them on worker threads.
pub trait ProblemApi: Send + Sync {
    /// Validate the stored session and identify the signed-in user.
    fn check_auth(&self) -> ClientResult<AuthUser>;

    /// Fetch one page of the problem list.
    fn problems(&self, filters: &ProblemFilters) -> ClientResult<ProblemPage>;

    /// Fetch full detail for a problem by slug.
    fn problem_by_slug(&self, slug: &str) -> ClientResult<ProblemDetail>;

    /// Fetch full detail for a problem by numeric id.
    fn problem_by_id(&self, id: u64) -> ClientResult<ProblemDetail>;

    /// Today's daily challenge.
    fn daily_challenge(&self) -> ClientResult<ProblemDetail>;

    /// A random problem matching `filters` (skip/limit ignored).
    fn random_problem(&self, filters: &ProblemFilters) -> ClientResult<ProblemDetail>;

    /// Public profile for `username`.
    fn user_profile(&self, username: &str) -> ClientResult<UserProfile>;

    /// Per-tag skill stats for `username`.
    fn skill_stats(&self, username: &str) -> ClientResult<SkillStats>;

    /// Most recent submissions for a problem, newest first.
    fn submissions(&self, slug: &str, limit: u32) -> ClientResult<Vec<Submission>>;

    /// One submission with its code.
    fn submission_detail(&self, id: u64) -> ClientResult<SubmissionDetail>;

    /// Run a solution against example testcases.
    fn test_solution(&self, request: &RunRequest) -> ClientResult<TestResult>;

    /// Submit a solution for judging.
    fn submit_solution(&self, request: &RunRequest) -> ClientResult<SubmitResult>;
}
