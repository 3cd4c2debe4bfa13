#[cfg(test)]
#[path = "workspace_test.rs"]
mod tests;

use std::future::Future;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::CodeBuffer;
use super::ExecutionCoordinator;
use super::Templates;
use crate::domain::models::BusyState;
use crate::domain::models::Comment;
use crate::domain::models::CommentRequest;
use crate::domain::models::Event;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::ExecutionResult;
use crate::domain::models::Identity;
use crate::domain::models::JudgeBox;
use crate::domain::models::Language;
use crate::domain::models::LoadState;
use crate::domain::models::Problem;
use crate::domain::models::SessionKey;
use crate::domain::models::SessionTag;
use crate::domain::models::Submission;

/// Editing session for one problem and one user. All state lives here and is
/// only touched from the owning task. Network calls run in the background and
/// report back through `Event`s, which are dropped unless they carry the
/// current session tag.
pub struct Workspace {
    judge: JudgeBox,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    workers: Vec<JoinHandle<Result<()>>>,

    epoch: u64,
    key: SessionKey,
    identity: Option<Identity>,
    contest_id: Option<String>,
    language: Language,

    buffer: CodeBuffer,
    problem: Option<Problem>,
    load_state: LoadState,
    result: Option<ExecutionResult>,
    busy: BusyState,
    submissions: Vec<Submission>,
    comments: Vec<Comment>,
    submissions_error: Option<String>,
    comments_error: Option<String>,
}

impl Workspace {
    pub fn new(judge: JudgeBox, language: Language) -> Workspace {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        return Workspace {
            judge,
            tx,
            rx,
            workers: vec![],
            epoch: 0,
            key: SessionKey::default(),
            identity: None,
            contest_id: None,
            language,
            buffer: CodeBuffer::default(),
            problem: None,
            load_state: LoadState::Idle,
            result: None,
            busy: BusyState::default(),
            submissions: vec![],
            comments: vec![],
            submissions_error: None,
            comments_error: None,
        };
    }

    pub fn tag(&self) -> SessionTag {
        return SessionTag {
            key: self.key.clone(),
            epoch: self.epoch,
        };
    }

    pub fn key(&self) -> &SessionKey {
        return &self.key;
    }

    pub fn identity(&self) -> Option<&Identity> {
        return self.identity.as_ref();
    }

    pub fn language(&self) -> &Language {
        return &self.language;
    }

    pub fn code(&self) -> &str {
        return self.buffer.text();
    }

    pub fn buffer(&self) -> &CodeBuffer {
        return &self.buffer;
    }

    pub fn problem(&self) -> Option<&Problem> {
        return self.problem.as_ref();
    }

    pub fn load_state(&self) -> &LoadState {
        return &self.load_state;
    }

    pub fn result(&self) -> Option<&ExecutionResult> {
        return self.result.as_ref();
    }

    pub fn busy(&self) -> BusyState {
        return self.busy;
    }

    pub fn submissions(&self) -> &[Submission] {
        return &self.submissions;
    }

    pub fn comments(&self) -> &[Comment] {
        return &self.comments;
    }

    /// Why the last submission history fetch failed, if it did.
    pub fn submissions_error(&self) -> Option<&str> {
        return self.submissions_error.as_deref();
    }

    /// Why the last comment fetch or post failed, if it did.
    pub fn comments_error(&self) -> Option<&str> {
        return self.comments_error.as_deref();
    }

    pub fn set_contest(&mut self, contest_id: Option<String>) {
        self.contest_id = contest_id.filter(|id| return !id.is_empty());
    }

    /// Moves to a new problem and/or identity. Returns false when the key did
    /// not change, in which case only a refreshed token is picked up.
    pub fn switch_session(&mut self, problem_id: &str, identity: Option<Identity>) -> bool {
        let key = SessionKey::new(
            problem_id,
            identity.as_ref().map(|id| return id.user_id.as_str()),
        );

        if self.epoch > 0 && key == self.key {
            self.identity = identity;
            return false;
        }

        self.start(key, identity);
        return true;
    }

    /// Starts the current session over, e.g. after a failed load.
    pub fn reload(&mut self) {
        let key = self.key.clone();
        let identity = self.identity.clone();
        self.start(key, identity);
    }

    fn start(&mut self, key: SessionKey, identity: Option<Identity>) {
        self.reset(key, identity);
        self.load_problem();
        self.refresh_submissions();
        self.load_comments();
    }

    /// Discards every piece of state belonging to the current session before
    /// anything from the next one is dispatched.
    fn reset(&mut self, key: SessionKey, identity: Option<Identity>) {
        for worker in self.workers.drain(..) {
            worker.abort();
        }

        self.buffer.clear();
        self.problem = None;
        self.load_state = LoadState::Idle;
        self.result = None;
        self.busy = BusyState::default();
        self.submissions.clear();
        self.comments.clear();
        self.submissions_error = None;
        self.comments_error = None;

        self.epoch += 1;
        self.key = key;
        self.identity = identity;

        tracing::debug!(session = self.key.to_string(), epoch = self.epoch, "Session reset");
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.seed_template();
    }

    pub fn edit(&mut self, text: &str) {
        self.buffer.edit(text);
    }

    fn seed_template(&mut self) {
        if let Some(problem) = &self.problem {
            let template = Templates::resolve(&self.language, problem);
            if !self.buffer.reseed(template) {
                tracing::debug!(
                    language = self.language.to_string(),
                    "Keeping user edited code over template"
                );
            }
        }
    }

    fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        self.workers.retain(|worker| return !worker.is_finished());
        self.workers.push(tokio::spawn(future));
    }

    fn load_problem(&mut self) {
        if self.key.problem_id.is_empty() {
            return;
        }

        self.load_state = LoadState::Loading;

        let judge = self.judge.clone();
        let tx = self.tx.clone();
        let tag = self.tag();
        let identity = self.identity.clone();

        self.spawn(async move {
            let res = judge
                .fetch_problem(identity.as_ref(), &tag.key.problem_id)
                .await
                .map_err(|err| return err.to_string());
            tx.send(Event::ProblemLoaded(tag, res))?;
            return Ok(());
        });
    }

    fn problem_identifier(&self) -> String {
        if let Some(problem) = &self.problem {
            if !problem.id.is_empty() {
                return problem.id.to_string();
            }
        }

        return self.key.problem_id.to_string();
    }

    /// Fetches submission history in the background. A no-op without an
    /// identity.
    pub fn refresh_submissions(&mut self) {
        let identity = match &self.identity {
            Some(identity) => identity.clone(),
            None => return,
        };
        if self.key.problem_id.is_empty() {
            return;
        }

        let judge = self.judge.clone();
        let tx = self.tx.clone();
        let tag = self.tag();
        let problem_identifier = self.problem_identifier();

        self.spawn(async move {
            let res = judge
                .list_submissions(&identity, &problem_identifier)
                .await
                .map_err(|err| return err.to_string());
            tx.send(Event::SubmissionsLoaded(tag, res))?;
            return Ok(());
        });
    }

    pub fn load_comments(&mut self) {
        if self.key.problem_id.is_empty() {
            return;
        }

        let judge = self.judge.clone();
        let tx = self.tx.clone();
        let tag = self.tag();
        let identity = self.identity.clone();
        let problem_identifier = self.problem_identifier();

        self.spawn(async move {
            let res = judge
                .list_comments(identity.as_ref(), &problem_identifier)
                .await
                .map_err(|err| return err.to_string());
            tx.send(Event::CommentsLoaded(tag, res))?;
            return Ok(());
        });
    }

    /// Returns false without sending anything when signed out or the text is
    /// blank.
    pub fn post_comment(&mut self, content: &str) -> bool {
        let identity = match &self.identity {
            Some(identity) => identity.clone(),
            None => return false,
        };
        if content.trim().is_empty() || self.key.problem_id.is_empty() {
            return false;
        }

        let judge = self.judge.clone();
        let tx = self.tx.clone();
        let tag = self.tag();
        let request = CommentRequest {
            problem_identifier: self.problem_identifier(),
            content: content.trim().to_string(),
        };

        self.spawn(async move {
            let res = judge
                .post_comment(&identity, &request)
                .await
                .map_err(|err| return err.to_string());
            tx.send(Event::CommentPosted(tag, res))?;
            return Ok(());
        });

        return true;
    }

    /// Dispatches a run (`is_submit == false`) or a submission. Needs an
    /// identity and a loaded problem, otherwise nothing is sent and false is
    /// returned.
    pub fn execute(&mut self, is_submit: bool) -> bool {
        let identity = match &self.identity {
            Some(identity) => identity.clone(),
            None => {
                tracing::debug!("Skipping execution without an identity");
                return false;
            }
        };
        let test_cases = match (&self.problem, &self.load_state) {
            (Some(problem), LoadState::Loaded) => problem.test_cases.clone(),
            _ => {
                tracing::debug!("Skipping execution before the problem has loaded");
                return false;
            }
        };

        let request = ExecutionRequest::new(
            self.buffer.text(),
            self.language.clone(),
            &self.problem_identifier(),
            is_submit,
            self.contest_id.clone(),
        );

        self.busy.start(is_submit);

        let judge = self.judge.clone();
        let tx = self.tx.clone();
        let tag = self.tag();

        self.spawn(async move {
            let res = ExecutionCoordinator::execute(&judge, &identity, &request, &test_cases).await;
            tx.send(Event::ExecutionFinished(tag, is_submit, res))?;
            return Ok(());
        });

        return true;
    }

    /// Applies a background result. Events dispatched by an earlier session
    /// are discarded and false is returned.
    pub fn handle_event(&mut self, event: Event) -> bool {
        if *event.tag() != self.tag() {
            tracing::warn!(
                event_session = event.tag().key.to_string(),
                event_epoch = event.tag().epoch,
                session = self.key.to_string(),
                epoch = self.epoch,
                "Discarding stale event"
            );
            return false;
        }

        match event {
            Event::ProblemLoaded(_, Ok(problem)) => {
                self.problem = Some(problem);
                self.load_state = LoadState::Loaded;
                self.seed_template();
            }
            Event::ProblemLoaded(_, Err(err)) => {
                tracing::error!(error = err.as_str(), "Failed to load problem");
                self.load_state = LoadState::Failed(err);
            }
            Event::ExecutionFinished(_, is_submit, res) => {
                self.busy.finish(is_submit);
                let accepted = is_submit && res.verdict.is_accepted();
                self.result = Some(res);
                if accepted {
                    self.refresh_submissions();
                }
            }
            Event::SubmissionsLoaded(_, Ok(submissions)) => {
                self.submissions = submissions;
                self.submissions_error = None;
            }
            Event::CommentsLoaded(_, Ok(comments)) => {
                self.comments = comments;
                self.comments_error = None;
            }
            Event::CommentPosted(_, Ok(())) => {
                self.comments_error = None;
                self.load_comments();
            }
            Event::SubmissionsLoaded(_, Err(err)) => {
                tracing::error!(error = err.as_str(), "Failed to load submission history");
                self.submissions_error = Some(err);
            }
            Event::CommentsLoaded(_, Err(err)) | Event::CommentPosted(_, Err(err)) => {
                tracing::error!(error = err.as_str(), "Discussion request failed");
                self.comments_error = Some(err);
            }
        }

        return true;
    }

    /// Waits for the next background result without applying it.
    #[cfg(test)]
    pub async fn next_event(&mut self) -> Option<Event> {
        return self.rx.recv().await;
    }

    /// Applies results until no background work is left, including work that
    /// results themselves start.
    pub async fn wait_until_idle(&mut self) {
        loop {
            let workers = std::mem::take(&mut self.workers);
            for worker in workers {
                match worker.await {
                    Ok(Err(err)) => tracing::error!(error = ?err, "Background worker failed"),
                    Err(err) if !err.is_cancelled() => {
                        tracing::error!(error = ?err, "Background worker panicked")
                    }
                    _ => {}
                }
            }

            while let Ok(event) = self.rx.try_recv() {
                self.handle_event(event);
            }

            if self.workers.is_empty() {
                return;
            }
        }
    }
}
