#![forbid(unsafe_code)]

//! Blocking HTTP implementation of [`ProblemApi`].
//!
//! Calls are operation-name + variables JSON envelopes posted to a single
//! query endpoint. Responses arrive as `{"data": …}` or `{"errors": […]}`;
//! both service-reported errors and transport failures normalize into
//! [`ClientError`] so the executor boundary only ever sees one error type.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::api::{ProblemApi, RunRequest};
use crate::types::{
    AuthUser, ProblemDetail, ProblemFilters, ProblemPage, SkillStats, Submission,
    SubmissionDetail, SubmitResult, TestResult, UserProfile,
};
use crate::{ClientError, ClientResult};

const USER_AGENT: &str = concat!("grind/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Session cookie pair captured at login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub session: String,
    pub csrf: String,
}

/// Response envelope shared by every operation.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Blocking HTTP client for the problem service.
pub struct HttpApi {
    endpoint: String,
    http: reqwest::blocking::Client,
    tokens: Option<SessionTokens>,
}

impl HttpApi {
    /// Build a client for `base_url`, optionally carrying session tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(base_url: &str, tokens: Option<SessionTokens>) -> ClientResult<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            endpoint: format!("{}/query", base_url.trim_end_matches('/')),
            http,
            tokens,
        })
    }

    /// Post one operation and decode its payload.
    fn call<T: DeserializeOwned>(
        &self,
        operation: &str,
        variables: serde_json::Value,
    ) -> ClientResult<T> {
        tracing::debug!(operation, "remote call");
        let mut request = self.http.post(&self.endpoint).json(&json!({
            "operation": operation,
            "variables": variables,
        }));

        if let Some(tokens) = &self.tokens {
            request = request
                .header(
                    "cookie",
                    format!("session={}; csrftoken={}", tokens.session, tokens.csrf),
                )
                .header("x-csrftoken", tokens.csrf.clone());
        }

        let response = request.send()?;
        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ClientError::Unauthenticated);
        }
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let envelope: Envelope<T> = response.json()?;
        if let Some(error) = envelope.errors.first() {
            return Err(ClientError::Api(error.message.clone()));
        }
        envelope
            .data
            .ok_or_else(|| ClientError::Api(format!("{operation}: empty response")))
    }
}

impl ProblemApi for HttpApi {
    fn check_auth(&self) -> ClientResult<AuthUser> {
        if self.tokens.is_none() {
            return Err(ClientError::Unauthenticated);
        }
        self.call("currentUser", json!({}))
    }

    fn problems(&self, filters: &ProblemFilters) -> ClientResult<ProblemPage> {
        self.call("problemList", serde_json::to_value(filters)?)
    }

    fn problem_by_slug(&self, slug: &str) -> ClientResult<ProblemDetail> {
        self.call("problemDetail", json!({ "slug": slug }))
    }

    fn problem_by_id(&self, id: u64) -> ClientResult<ProblemDetail> {
        self.call("problemDetail", json!({ "id": id }))
    }

    fn daily_challenge(&self) -> ClientResult<ProblemDetail> {
        self.call("dailyChallenge", json!({}))
    }

    fn random_problem(&self, filters: &ProblemFilters) -> ClientResult<ProblemDetail> {
        let mut variables = serde_json::to_value(filters)?;
        if let Some(map) = variables.as_object_mut() {
            map.remove("skip");
            map.remove("limit");
        }
        self.call("randomProblem", variables)
    }

    fn user_profile(&self, username: &str) -> ClientResult<UserProfile> {
        self.call("userProfile", json!({ "username": username }))
    }

    fn skill_stats(&self, username: &str) -> ClientResult<SkillStats> {
        self.call("skillStats", json!({ "username": username }))
    }

    fn submissions(&self, slug: &str, limit: u32) -> ClientResult<Vec<Submission>> {
        #[derive(Deserialize)]
        struct Payload {
            submissions: Vec<Submission>,
        }
        let payload: Payload = self.call("submissionList", json!({
            "slug": slug,
            "limit": limit,
        }))?;
        Ok(payload.submissions)
    }

    fn submission_detail(&self, id: u64) -> ClientResult<SubmissionDetail> {
        self.call("submissionDetail", json!({ "id": id }))
    }

    fn test_solution(&self, request: &RunRequest) -> ClientResult<TestResult> {
        self.call("testSolution", json!({
            "slug": request.slug,
            "questionId": request.question_id,
            "lang": request.lang,
            "code": request.code,
            "testcases": request.testcases,
        }))
    }

    fn submit_solution(&self, request: &RunRequest) -> ClientResult<SubmitResult> {
        self.call("submitSolution", json!({
            "slug": request.slug,
            "questionId": request.question_id,
            "lang": request.lang,
            "code": request.code,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_data() {
        let envelope: Envelope<ProblemPage> = serde_json::from_str(
            r#"{"data": {"problems": [], "total": 7}}"#,
        )
        .unwrap();
        assert_eq!(envelope.data.unwrap().total, 7);
    }

    #[test]
    fn envelope_decodes_errors() {
        let envelope: Envelope<ProblemPage> =
            serde_json::from_str(r#"{"errors": [{"message": "rate limited"}]}"#).unwrap();
        assert!(envelope.data.is_none());
        assert_eq!(envelope.errors[0].message, "rate limited");
    }

    #[test]
    fn endpoint_normalizes_trailing_slash() {
        let api = HttpApi::new("https://example.test/", None).unwrap();
        assert_eq!(api.endpoint, "https://example.test/query");
    }

    #[test]
    fn check_auth_without_tokens_short_circuits() {
        let api = HttpApi::new("https://example.test", None).unwrap();
        assert!(matches!(
            api.check_auth(),
            Err(ClientError::Unauthenticated)
        ));
    }
}
