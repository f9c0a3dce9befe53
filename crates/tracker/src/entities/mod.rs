//! Core data structures for task tracking.

mod list;
mod task;

pub use list::TaskList;
pub use task::{Task, TaskKind, TaskType, DISPLAY_DATE_FORMAT, STORAGE_DATE_FORMAT};
