use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::Comment;
use super::CommentRequest;
use super::ExecutionRequest;
use super::Identity;
use super::Problem;
use super::Submission;
use super::TestRunResponse;

#[async_trait]
pub trait Judge {
    /// Loads a problem definition including its full test case list. Fails
    /// when the payload is missing `success` or `data`.
    async fn fetch_problem(&self, identity: Option<&Identity>, problem_id: &str) -> Result<Problem>;

    /// Compiles and runs code against the problem's test cases. Hidden cases
    /// are only included when `request.run_hidden` is set.
    async fn test_code(
        &self,
        identity: &Identity,
        request: &ExecutionRequest,
    ) -> Result<TestRunResponse>;

    /// Submission history of the identity for one problem.
    async fn list_submissions(
        &self,
        identity: &Identity,
        problem_identifier: &str,
    ) -> Result<Vec<Submission>>;

    async fn list_comments(
        &self,
        identity: Option<&Identity>,
        problem_identifier: &str,
    ) -> Result<Vec<Comment>>;

    async fn post_comment(&self, identity: &Identity, request: &CommentRequest) -> Result<()>;
}

pub type JudgeBox = Arc<dyn Judge + Send + Sync>;
