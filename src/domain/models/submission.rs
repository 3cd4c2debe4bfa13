use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use super::null_as_default;
use super::string_or_number;
use super::Verdict;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default = "pending_verdict", deserialize_with = "verdict_or_pending")]
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passed_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tests: Option<usize>,
    #[serde(default, alias = "submittedAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn pending_verdict() -> Verdict {
    return Verdict::Other("PENDING".to_string());
}

fn verdict_or_pending<'de, D>(deserializer: D) -> Result<Verdict, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(text) if !text.trim().is_empty() => return Ok(Verdict::parse(&text)),
        _ => return Ok(pending_verdict()),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(
        default,
        alias = "username",
        alias = "userName",
        deserialize_with = "null_as_default"
    )]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Body of `POST /api/discussions`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub problem_identifier: String,
    pub content: String,
}
