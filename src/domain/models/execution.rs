#[cfg(test)]
#[path = "execution_test.rs"]
mod tests;

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::null_as_default;
use super::Language;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Verdict {
    /// Every test case passed.
    Accepted,
    WrongAnswer,
    /// The request never produced a judged result.
    Error,
    /// Backend supplied verdicts outside of the three above, such as `TLE`.
    Other(String),
}

impl Verdict {
    pub fn parse(text: &str) -> Verdict {
        let trimmed = text.trim();
        let normalized = trimmed.to_uppercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "AC" | "ACCEPTED" => return Verdict::Accepted,
            "WA" | "WRONG ANSWER" => return Verdict::WrongAnswer,
            "ERROR" => return Verdict::Error,
            _ => return Verdict::Other(trimmed.to_string()),
        }
    }

    pub fn is_accepted(&self) -> bool {
        return *self == Verdict::Accepted;
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Verdict::Accepted => return write!(f, "AC"),
            Verdict::WrongAnswer => return write!(f, "WA"),
            Verdict::Error => return write!(f, "ERROR"),
            Verdict::Other(text) => return write!(f, "{text}"),
        }
    }
}

impl From<String> for Verdict {
    fn from(text: String) -> Verdict {
        return Verdict::parse(&text);
    }
}

impl From<Verdict> for String {
    fn from(verdict: Verdict) -> String {
        return verdict.to_string();
    }
}

/// Body of `POST /api/code/test`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRequest {
    pub code: String,
    pub language: Language,
    pub problem_identifier: String,
    pub include_details: bool,
    pub run_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contest_id: Option<String>,
}

impl ExecutionRequest {
    /// Hidden test cases only ever run on submit.
    pub fn new(
        code: &str,
        language: Language,
        problem_identifier: &str,
        is_submit: bool,
        contest_id: Option<String>,
    ) -> ExecutionRequest {
        return ExecutionRequest {
            code: code.to_string(),
            language,
            problem_identifier: problem_identifier.to_string(),
            include_details: true,
            run_hidden: is_submit,
            contest_id,
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub input: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub expected_output: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actual_output: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passed: bool,
    #[serde(default, alias = "executionTime", deserialize_with = "null_as_default")]
    pub execution_time_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_hidden: bool,
}

impl CaseResult {
    pub fn from_error(message: &str) -> CaseResult {
        return CaseResult {
            error: Some(message.to_string()),
            ..CaseResult::default()
        };
    }
}

/// Raw judge response. Nothing in here is shown before it has been reconciled
/// against the locally held test cases.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_passed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tests: Option<usize>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CaseResult>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub verdict: Verdict,
    pub passed_count: usize,
    pub total_tests: usize,
    pub per_case: Vec<CaseResult>,
}

impl ExecutionResult {
    /// Renderable result for any request that failed before judging.
    pub fn from_error(message: &str) -> ExecutionResult {
        return ExecutionResult {
            verdict: Verdict::Error,
            passed_count: 0,
            total_tests: 0,
            per_case: vec![CaseResult::from_error(message)],
        };
    }
}
