//! Task entity and related types.

use chrono::NaiveDate;

use crate::errors::{TrackerError, TrackerResult};

/// Date layout used on disk and accepted from the command line
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date layout used when rendering a deadline for display (e.g. `Dec 31 2024`)
pub const DISPLAY_DATE_FORMAT: &str = "%b %-d %Y";

/// Task type codes, as written in the storage file and display tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    ToDo,
    Deadline,
    Event,
}

impl TaskType {
    /// Single-letter code (`T`, `D` or `E`)
    pub fn code(self) -> &'static str {
        match self {
            Self::ToDo => "T",
            Self::Deadline => "D",
            Self::Event => "E",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for TaskType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "T" => Ok(Self::ToDo),
            "D" => Ok(Self::Deadline),
            "E" => Ok(Self::Event),
            _ => Err(TrackerError::InvalidTaskType {
                code: s.to_string(),
            }),
        }
    }
}

/// Payload specific to each task type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    ToDo,
    Deadline { by: NaiveDate },
    Event { from: String, to: String },
}

impl TaskKind {
    pub fn task_type(&self) -> TaskType {
        match self {
            Self::ToDo => TaskType::ToDo,
            Self::Deadline { .. } => TaskType::Deadline,
            Self::Event { .. } => TaskType::Event,
        }
    }
}

/// A trackable item: description, completion state and type payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    /// Create a task of the given kind, not yet done.
    ///
    /// Fails with [`TrackerError::EmptyDescription`] when the description is
    /// empty or whitespace only.
    pub fn new(description: impl Into<String>, kind: TaskKind) -> TrackerResult<Self> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(TrackerError::EmptyDescription);
        }

        Ok(Self {
            description,
            done: false,
            kind,
        })
    }

    /// Create a plain to-do
    pub fn todo(description: impl Into<String>) -> TrackerResult<Self> {
        Self::new(description, TaskKind::ToDo)
    }

    /// Create a task due on `by`
    pub fn deadline(description: impl Into<String>, by: NaiveDate) -> TrackerResult<Self> {
        Self::new(description, TaskKind::Deadline { by })
    }

    /// Create a task spanning `from` to `to` (free-form text, not parsed)
    pub fn event(
        description: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> TrackerResult<Self> {
        Self::new(
            description,
            TaskKind::Event {
                from: from.into(),
                to: to.into(),
            },
        )
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn task_type(&self) -> TaskType {
        self.kind.task_type()
    }

    /// Mark the task as done. Marking a done task again is a no-op.
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Mark the task as not done. Unmarking an open task again is a no-op.
    pub fn mark_not_done(&mut self) {
        self.done = false;
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    /// `X` when done, a space otherwise
    pub fn status_icon(&self) -> char {
        if self.done {
            'X'
        } else {
            ' '
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.task_type(),
            self.status_icon(),
            self.description
        )?;

        match &self.kind {
            TaskKind::ToDo => Ok(()),
            TaskKind::Deadline { by } => {
                write!(f, " (by: {})", by.format(DISPLAY_DATE_FORMAT))
            }
            TaskKind::Event { from, to } => write!(f, " (from: {from} to: {to})"),
        }
    }
}
