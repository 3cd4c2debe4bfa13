mod event;
mod execution;
mod judge;
mod language;
mod problem;
mod session;
mod submission;

pub use event::*;
pub use execution::*;
pub use judge::*;
pub use language::*;
pub use problem::*;
pub use session::*;
pub use submission::*;
