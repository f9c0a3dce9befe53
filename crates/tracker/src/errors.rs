//! Error types for the tracker crate.

use thiserror::Error;

/// Error types for command parsing, task list access and persistence
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    // Command errors
    /// Malformed command text. The message is shown to the user verbatim.
    #[error("{message}")]
    Parse { message: String },

    #[error("Task number {number} does not exist. You have {size} task(s) in the list.")]
    IndexOutOfRange { number: i64, size: usize },

    // Task errors
    #[error("Task description must not be empty")]
    EmptyDescription,

    #[error("Unknown task type code: '{code}'")]
    InvalidTaskType { code: String },

    // Storage errors
    #[error("Storage error: {reason}")]
    StorageError { reason: String },

    #[error("Failed to read file '{path}': {reason}")]
    FileReadError { path: String, reason: String },

    #[error("Failed to write file '{path}': {reason}")]
    FileWriteError { path: String, reason: String },

    // Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("Failed to parse JSON: {reason}")]
    JsonParseError { reason: String },
}

impl TrackerError {
    /// Build a user-facing parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Whether this error came from reading or writing the storage file
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::StorageError { .. } | Self::FileReadError { .. } | Self::FileWriteError { .. }
        )
    }
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        Self::StorageError {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParseError {
            reason: err.to_string(),
        }
    }
}

/// Result type alias for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
