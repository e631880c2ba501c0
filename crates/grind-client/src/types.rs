#![forbid(unsafe_code)]

//! Wire types for the problem service.

use serde::{Deserialize, Serialize};

/// Problem difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// All tiers in ascending order.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];
}

/// The signed-in user's progress on a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemStatus {
    Solved,
    Attempted,
    Todo,
}

impl ProblemStatus {
    /// Single-glyph marker used in list rows.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::Solved => "✔",
            Self::Attempted => "✎",
            Self::Todo => " ",
        }
    }
}

/// One row of the problem list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemSummary {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub status: Option<ProblemStatus>,
    #[serde(default)]
    pub paid_only: bool,
    #[serde(default)]
    pub acceptance_rate: f64,
}

/// A page of problem summaries plus the server-side total for the active
/// filter set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemPage {
    pub problems: Vec<ProblemSummary>,
    pub total: u64,
}

/// Starter code for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub lang: String,
    pub code: String,
}

/// Full problem detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetail {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub difficulty: Difficulty,
    /// Statement text. May contain markup; rendered as plain text.
    pub content: String,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub example_testcases: String,
    #[serde(default)]
    pub code_snippets: Vec<CodeSnippet>,
    #[serde(default)]
    pub acceptance_rate: f64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub dislikes: u64,
}

impl ProblemDetail {
    /// Starter code for `lang`, if the service ships one.
    #[must_use]
    pub fn snippet_for(&self, lang: &str) -> Option<&CodeSnippet> {
        self.code_snippets
            .iter()
            .find(|s| s.lang.eq_ignore_ascii_case(lang))
    }
}

/// Server-side list filters. All fields combine as a conjunction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProblemFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProblemStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub skip: u64,
    pub limit: u64,
}

/// One entry of a problem's submission history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub status: String,
    pub lang: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub memory: String,
    #[serde(default)]
    pub submitted_at: String,
}

/// A submission with its source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionDetail {
    pub id: u64,
    pub status: String,
    pub lang: String,
    pub code: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub memory: String,
}

/// Outcome of running a solution against example testcases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub passed: bool,
    pub status: String,
    #[serde(default)]
    pub passed_testcases: u32,
    #[serde(default)]
    pub total_testcases: u32,
    #[serde(default)]
    pub code_output: Vec<String>,
    #[serde(default)]
    pub expected_output: Vec<String>,
    #[serde(default)]
    pub runtime_error: Option<String>,
}

/// Outcome of a full submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub accepted: bool,
    pub status: String,
    #[serde(default)]
    pub passed_testcases: u32,
    #[serde(default)]
    pub total_testcases: u32,
    #[serde(default)]
    pub runtime: Option<String>,
    #[serde(default)]
    pub memory: Option<String>,
    #[serde(default)]
    pub failed_input: Option<String>,
    #[serde(default)]
    pub runtime_error: Option<String>,
}

/// The signed-in account, as reported by the auth check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
    #[serde(default)]
    pub is_premium: bool,
}

/// Public profile data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    #[serde(default)]
    pub real_name: Option<String>,
    #[serde(default)]
    pub ranking: Option<u64>,
    #[serde(default)]
    pub solved_easy: u32,
    #[serde(default)]
    pub solved_medium: u32,
    #[serde(default)]
    pub solved_hard: u32,
    #[serde(default)]
    pub total_easy: u32,
    #[serde(default)]
    pub total_medium: u32,
    #[serde(default)]
    pub total_hard: u32,
}

impl UserProfile {
    /// Total problems solved across all tiers.
    #[must_use]
    pub fn solved_total(&self) -> u32 {
        self.solved_easy + self.solved_medium + self.solved_hard
    }
}

/// Solved-problem count for one topic tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillStat {
    pub tag: String,
    pub problems_solved: u32,
}

/// Per-tag skill breakdown, grouped the way the service reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillStats {
    #[serde(default)]
    pub fundamental: Vec<SkillStat>,
    #[serde(default)]
    pub intermediate: Vec<SkillStat>,
    #[serde(default)]
    pub advanced: Vec<SkillStat>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Easy).unwrap(),
            "\"EASY\""
        );
    }

    #[test]
    fn filters_omit_unset_fields() {
        let json = serde_json::to_value(ProblemFilters {
            skip: 0,
            limit: 50,
            ..Default::default()
        })
        .unwrap();
        assert!(json.get("difficulty").is_none());
        assert!(json.get("search").is_none());
        assert_eq!(json["limit"], 50);
    }

    #[test]
    fn filters_serialize_set_fields() {
        let json = serde_json::to_value(ProblemFilters {
            difficulty: Some(Difficulty::Easy),
            search: Some("two sum".into()),
            skip: 50,
            limit: 50,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["difficulty"], "EASY");
        assert_eq!(json["search"], "two sum");
        assert_eq!(json["skip"], 50);
    }

    #[test]
    fn problem_detail_tolerates_missing_optionals() {
        let detail: ProblemDetail = serde_json::from_value(serde_json::json!({
            "id": 1,
            "slug": "two-sum",
            "title": "Two Sum",
            "difficulty": "EASY",
            "content": "Given an array...",
        }))
        .unwrap();
        assert!(detail.hints.is_empty());
        assert!(detail.snippet_for("rust").is_none());
    }

    #[test]
    fn snippet_lookup_is_case_insensitive() {
        let detail: ProblemDetail = serde_json::from_value(serde_json::json!({
            "id": 1,
            "slug": "two-sum",
            "title": "Two Sum",
            "difficulty": "EASY",
            "content": "",
            "code_snippets": [{"lang": "Rust", "code": "fn main() {}"}],
        }))
        .unwrap();
        assert!(detail.snippet_for("rust").is_some());
    }

    #[test]
    fn profile_totals() {
        let profile = UserProfile {
            username: "u".into(),
            real_name: None,
            ranking: None,
            solved_easy: 3,
            solved_medium: 2,
            solved_hard: 1,
            total_easy: 10,
            total_medium: 10,
            total_hard: 10,
        };
        assert_eq!(profile.solved_total(), 6);
    }
}
