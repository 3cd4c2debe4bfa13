use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Notify;

use crate::domain::models::Comment;
use crate::domain::models::CommentRequest;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::Identity;
use crate::domain::models::Judge;
use crate::domain::models::Problem;
use crate::domain::models::Submission;
use crate::domain::models::TestRunResponse;

/// In-memory judge for exercising the session flow without a server. Test
/// runs for a problem can be held back with `gate` to simulate slow requests.
#[derive(Default)]
pub struct ScriptedJudge {
    problems: DashMap<String, Problem>,
    test_responses: DashMap<String, TestRunResponse>,
    test_failure: Mutex<Option<String>>,
    gates: DashMap<String, Arc<Notify>>,
    requests: Mutex<Vec<ExecutionRequest>>,
    submissions: DashMap<String, Vec<Submission>>,
    submission_fetches: AtomicUsize,
    comments: DashMap<String, Vec<Comment>>,
    comments_failure: Mutex<Option<String>>,
}

impl ScriptedJudge {
    pub fn add_problem(&self, problem: Problem) {
        self.problems.insert(problem.id.to_string(), problem);
    }

    pub fn set_test_response(&self, problem_id: &str, response: TestRunResponse) {
        self.test_responses.insert(problem_id.to_string(), response);
    }

    pub fn fail_test_code(&self, message: &str) {
        *self.test_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn fail_comments(&self, message: &str) {
        *self.comments_failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn set_submissions(&self, problem_id: &str, submissions: Vec<Submission>) {
        self.submissions.insert(problem_id.to_string(), submissions);
    }

    /// Holds every test run for the problem until the returned handle is
    /// notified, once per request.
    pub fn gate(&self, problem_id: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.insert(problem_id.to_string(), notify.clone());
        return notify;
    }

    pub fn requests(&self) -> Vec<ExecutionRequest> {
        return self.requests.lock().unwrap().clone();
    }

    pub fn submission_fetches(&self) -> usize {
        return self.submission_fetches.load(Ordering::SeqCst);
    }
}

#[async_trait]
impl Judge for ScriptedJudge {
    async fn fetch_problem(&self, _identity: Option<&Identity>, problem_id: &str) -> Result<Problem> {
        return self
            .problems
            .get(problem_id)
            .map(|problem| return problem.clone())
            .ok_or_else(|| return anyhow!("Problem {problem_id} not found"));
    }

    async fn test_code(
        &self,
        _identity: &Identity,
        request: &ExecutionRequest,
    ) -> Result<TestRunResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let gate = self
            .gates
            .get(&request.problem_identifier)
            .map(|gate| return gate.clone());
        if let Some(notify) = gate {
            notify.notified().await;
        }

        let failure = self.test_failure.lock().unwrap().clone();
        if let Some(message) = failure {
            bail!(message);
        }

        return self
            .test_responses
            .get(&request.problem_identifier)
            .map(|res| return res.clone())
            .ok_or_else(|| return anyhow!("No scripted response"));
    }

    async fn list_submissions(
        &self,
        _identity: &Identity,
        problem_identifier: &str,
    ) -> Result<Vec<Submission>> {
        self.submission_fetches.fetch_add(1, Ordering::SeqCst);
        return Ok(self
            .submissions
            .get(problem_identifier)
            .map(|list| return list.clone())
            .unwrap_or_default());
    }

    async fn list_comments(
        &self,
        _identity: Option<&Identity>,
        problem_identifier: &str,
    ) -> Result<Vec<Comment>> {
        let failure = self.comments_failure.lock().unwrap().clone();
        if let Some(message) = failure {
            bail!(message);
        }

        return Ok(self
            .comments
            .get(problem_identifier)
            .map(|list| return list.clone())
            .unwrap_or_default());
    }

    async fn post_comment(&self, identity: &Identity, request: &CommentRequest) -> Result<()> {
        let mut thread = self
            .comments
            .entry(request.problem_identifier.to_string())
            .or_default();
        let id = thread.len() + 1;
        thread.push(Comment {
            id: id.to_string(),
            author: identity.user_id.to_string(),
            content: request.content.to_string(),
            created_at: None,
        });

        return Ok(());
    }
}
