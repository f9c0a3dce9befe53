//! Command execution on top of the task list and storage.

mod help;
mod session;

pub use help::help_text;
pub use session::{Response, Session, SessionState, ASSISTANT_NAME, LOADING_ERROR_NOTICE};
