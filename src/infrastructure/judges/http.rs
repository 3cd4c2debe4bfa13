#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::Response;
use serde::Deserialize;
use serde::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Comment;
use crate::domain::models::CommentRequest;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::Identity;
use crate::domain::models::Judge;
use crate::domain::models::Problem;
use crate::domain::models::Submission;
use crate::domain::models::TestRunResponse;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<T>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn with_auth(req: RequestBuilder, identity: Option<&Identity>) -> RequestBuilder {
    if let Some(id) = identity {
        if !id.token.is_empty() {
            return req.bearer_auth(&id.token);
        }
    }

    return req;
}

/// Pulls the backend's own error message out of a failed response, falling
/// back to the status code.
async fn failure_message(res: Response, action: &str) -> String {
    let status = res.status().as_u16();
    let body = res.json::<ErrorResponse>().await.unwrap_or_default();
    if let Some(msg) = body.message.or(body.error) {
        if !msg.is_empty() {
            return msg;
        }
    }

    return format!("{action} failed with status {status}");
}

pub struct HttpJudge {
    url: String,
    client: reqwest::Client,
}

impl Default for HttpJudge {
    fn default() -> HttpJudge {
        let timeout = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .unwrap_or(0);

        return HttpJudge::new(Config::get(ConfigKey::ApiURL), timeout);
    }
}

impl HttpJudge {
    /// A `timeout_ms` of zero leaves reqwest's defaults in place.
    pub fn new(url: String, timeout_ms: u64) -> HttpJudge {
        let mut builder = reqwest::Client::builder();
        if timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }

        return HttpJudge {
            url: url.trim_end_matches('/').to_string(),
            client: builder.build().unwrap_or_default(),
        };
    }
}

#[async_trait]
impl Judge for HttpJudge {
    #[allow(clippy::implicit_return)]
    async fn fetch_problem(&self, identity: Option<&Identity>, problem_id: &str) -> Result<Problem> {
        let req = self
            .client
            .get(format!("{url}/api/problems/{problem_id}", url = self.url));
        let res = with_auth(req, identity).send().await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                problem = problem_id,
                "Failed to load problem"
            );
            bail!(failure_message(res, "Loading the problem").await);
        }

        let body = res.json::<Envelope<Problem>>().await?;
        if body.success != Some(true) {
            bail!(format!("Problem {problem_id} was not found or failed to load"));
        }

        if let Some(mut problem) = body.data {
            if problem.id.is_empty() {
                problem.id = problem_id.to_string();
            }
            tracing::debug!(
                problem = problem.id,
                test_cases = problem.test_cases.len(),
                "Loaded problem"
            );
            return Ok(problem);
        }

        bail!(format!("Problem {problem_id} was not found or failed to load"));
    }

    #[allow(clippy::implicit_return)]
    async fn test_code(
        &self,
        identity: &Identity,
        request: &ExecutionRequest,
    ) -> Result<TestRunResponse> {
        let req = self
            .client
            .post(format!("{url}/api/code/test", url = self.url))
            .json(request);
        let res = with_auth(req, Some(identity)).send().await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make test request to the judge"
            );
            bail!(failure_message(res, "Running tests").await);
        }

        let body = res.json::<TestRunResponse>().await?;
        tracing::debug!(body = ?body, "Test response");

        return Ok(body);
    }

    #[allow(clippy::implicit_return)]
    async fn list_submissions(
        &self,
        identity: &Identity,
        problem_identifier: &str,
    ) -> Result<Vec<Submission>> {
        let req = self.client.get(format!(
            "{url}/api/code/submissions/{problem_identifier}",
            url = self.url
        ));
        let res = with_auth(req, Some(identity)).send().await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to load submission history"
            );
            bail!(failure_message(res, "Loading submissions").await);
        }

        let body = res.json::<Envelope<Vec<Submission>>>().await?;
        return Ok(body.data.unwrap_or_default());
    }

    #[allow(clippy::implicit_return)]
    async fn list_comments(
        &self,
        identity: Option<&Identity>,
        problem_identifier: &str,
    ) -> Result<Vec<Comment>> {
        let req = self.client.get(format!(
            "{url}/api/discussions/{problem_identifier}",
            url = self.url
        ));
        let res = with_auth(req, identity).send().await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Failed to load discussion");
            bail!(failure_message(res, "Loading the discussion").await);
        }

        let body = res.json::<Envelope<Vec<Comment>>>().await?;
        return Ok(body.data.unwrap_or_default());
    }

    #[allow(clippy::implicit_return)]
    async fn post_comment(&self, identity: &Identity, request: &CommentRequest) -> Result<()> {
        let req = self
            .client
            .post(format!("{url}/api/discussions", url = self.url))
            .json(request);
        let res = with_auth(req, Some(identity)).send().await?;

        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "Failed to post comment");
            bail!(failure_message(res, "Posting the comment").await);
        }

        return Ok(());
    }
}
