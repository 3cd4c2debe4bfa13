use std::fmt;

/// The active problem and the user looking at it. Any change to either half
/// starts a fresh editing session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SessionKey {
    pub problem_id: String,
    pub user_id: Option<String>,
}

impl SessionKey {
    pub fn new(problem_id: &str, user_id: Option<&str>) -> SessionKey {
        return SessionKey {
            problem_id: problem_id.to_string(),
            user_id: user_id.map(|id| return id.to_string()),
        };
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let user = self.user_id.as_deref().unwrap_or("anonymous");
        return write!(f, "{}@{}", self.problem_id, user);
    }
}

/// Captured at dispatch time by every asynchronous request. The epoch grows
/// on every reset, so revisiting the same key never revives results from an
/// earlier visit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionTag {
    pub key: SessionKey,
    pub epoch: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub token: String,
}

impl Identity {
    pub fn new(user_id: &str, token: &str) -> Identity {
        return Identity {
            user_id: user_id.to_string(),
            token: token.to_string(),
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// In-flight flags. `running` disables both buttons, the other two mark which
/// one is busy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusyState {
    pub running: bool,
    pub running_tests: bool,
    pub submitting: bool,
}

impl BusyState {
    pub fn start(&mut self, is_submit: bool) {
        self.running = true;
        if is_submit {
            self.submitting = true;
        } else {
            self.running_tests = true;
        }
    }

    pub fn finish(&mut self, is_submit: bool) {
        if is_submit {
            self.submitting = false;
        } else {
            self.running_tests = false;
        }
        self.running = self.submitting || self.running_tests;
    }
}
