//! Storage trait definitions.

use crate::entities::TaskList;
use crate::errors::TrackerResult;

/// Storage interface for task persistence
pub trait Storage: Send + Sync {
    /// Get storage type identifier
    fn storage_type(&self) -> &'static str;

    /// Load the whole task list, creating empty storage if none exists yet
    fn load(&self) -> TrackerResult<TaskList>;

    /// Replace everything stored with `tasks`, in list order
    fn save(&self, tasks: &TaskList) -> TrackerResult<()>;
}
