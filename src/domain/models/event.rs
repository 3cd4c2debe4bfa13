use super::Comment;
use super::ExecutionResult;
use super::Problem;
use super::SessionTag;
use super::Submission;

/// Results of background requests. Each one carries the tag of the session
/// that dispatched it and is dropped if that session is no longer active.
#[derive(Debug)]
pub enum Event {
    ProblemLoaded(SessionTag, Result<Problem, String>),
    ExecutionFinished(SessionTag, bool, ExecutionResult),
    SubmissionsLoaded(SessionTag, Result<Vec<Submission>, String>),
    CommentsLoaded(SessionTag, Result<Vec<Comment>, String>),
    CommentPosted(SessionTag, Result<(), String>),
}

impl Event {
    pub fn tag(&self) -> &SessionTag {
        match self {
            Event::ProblemLoaded(tag, _) => return tag,
            Event::ExecutionFinished(tag, _, _) => return tag,
            Event::SubmissionsLoaded(tag, _) => return tag,
            Event::CommentsLoaded(tag, _) => return tag,
            Event::CommentPosted(tag, _) => return tag,
        }
    }
}
