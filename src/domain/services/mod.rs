mod code_buffer;
mod execution;
mod templates;
mod workspace;

pub use code_buffer::*;
pub use execution::*;
pub use templates::*;
pub use workspace::*;
