//! Command executor: applies parsed commands to the task list.

use std::sync::Arc;

use tracing::{debug, warn};

use super::help::help_text;
use crate::entities::{Task, TaskKind, TaskList};
use crate::errors::{TrackerError, TrackerResult};
use crate::parser::{self, Command};
use crate::storage::Storage;

/// Notice shown once when the storage file could not be read at startup
pub const LOADING_ERROR_NOTICE: &str = "I/O Error occurred when loading from memory";

/// Name the assistant introduces itself with
pub const ASSISTANT_NAME: &str = "Tracker";

/// Session lifecycle. The only transition is Running -> Terminated on `bye`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Running,
    Terminated,
}

/// Outcome of handling one input line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Response {
    /// Text to show the user
    pub text: String,

    /// Non-fatal problem encountered after the command took effect
    pub warning: Option<String>,

    /// Whether `text` describes a rejected command
    pub is_error: bool,

    /// Whether the session has ended
    pub exit: bool,
}

impl Response {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn error(err: &TrackerError) -> Self {
        Self {
            text: format!(" {err}"),
            is_error: true,
            ..Self::default()
        }
    }

    /// Text plus warning, as one block
    pub fn full_text(&self) -> String {
        match &self.warning {
            Some(warning) => format!("{}\n {warning}", self.text),
            None => self.text.clone(),
        }
    }
}

/// A running conversation: owns the task list and its storage
pub struct Session {
    tasks: TaskList,
    storage: Arc<dyn Storage>,
    state: SessionState,
    load_error: Option<TrackerError>,
}

impl Session {
    /// Create a session over an already loaded task list
    pub fn new(storage: Arc<dyn Storage>, tasks: TaskList) -> Self {
        Self {
            tasks,
            storage,
            state: SessionState::Running,
            load_error: None,
        }
    }

    /// Load tasks from `storage` and start a session.
    ///
    /// A load failure is not fatal: the session starts empty and the error
    /// is kept for [`Session::load_error`].
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        match storage.load() {
            Ok(tasks) => Self::new(storage, tasks),
            Err(e) => {
                warn!(error = %e, "Failed to load tasks, starting with an empty list");
                let mut session = Self::new(storage, TaskList::new());
                session.load_error = Some(e);
                session
            }
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// Error from the initial load, if it failed
    pub fn load_error(&self) -> Option<&TrackerError> {
        self.load_error.as_ref()
    }

    /// Greeting shown before the first command
    pub fn welcome_message(&self) -> String {
        format!(" Hello! I'm {ASSISTANT_NAME}\n What can I do for you?")
    }

    /// Parse and execute one input line. Errors become user-facing text.
    pub fn respond(&mut self, input: &str) -> Response {
        match parser::parse(input).and_then(|command| self.execute(command)) {
            Ok(response) => response,
            Err(e) => {
                debug!(error = %e, "Command rejected");
                Response::error(&e)
            }
        }
    }

    /// Execute a parsed command.
    ///
    /// Mutating commands save before returning. A failed save is reported as
    /// a warning on the response; the in-memory change is kept.
    pub fn execute(&mut self, command: Command) -> TrackerResult<Response> {
        debug!(?command, "Executing command");

        let exit = command.is_exit();
        let mutating = command.is_mutating();

        let mut response = match command {
            Command::Exit => {
                self.state = SessionState::Terminated;
                Response::ok(" Bye. Hope to see you again soon!")
            }
            Command::List => Response::ok(self.render_list()),
            Command::Help => Response::ok(help_text()),
            Command::Find { keyword } => Response::ok(self.render_find(&keyword)),
            Command::AddToDo { description } => self.add(Task::new(description, TaskKind::ToDo)?),
            Command::AddDeadline { description, by } => {
                self.add(Task::new(description, TaskKind::Deadline { by })?)
            }
            Command::AddEvent {
                description,
                from,
                to,
            } => self.add(Task::new(description, TaskKind::Event { from, to })?),
            Command::Mark { index } => {
                let task = self.set_done(index, true)?;
                Response::ok(format!(" Nice! I've marked this task as done:\n   {task}"))
            }
            Command::Unmark { index } => {
                let task = self.set_done(index, false)?;
                Response::ok(format!(
                    " OK, I've marked this task as not done yet:\n   {task}"
                ))
            }
            Command::Delete { index } => {
                let index = self.tasks.validate_index(index)?;
                let removed = self.tasks.remove(index)?;
                Response::ok(format!(
                    " Noted. I've removed this task:\n   {removed}\n Now you have {} tasks in the list.",
                    self.tasks.len()
                ))
            }
        };

        response.exit = exit;
        if mutating {
            response.warning = self.persist();
        }
        Ok(response)
    }

    fn add(&mut self, task: Task) -> Response {
        let text = format!(" Got it. I've added this task:\n   {task}");
        self.tasks.add(task);
        Response::ok(format!(
            "{text}\n Now you have {} tasks in the list.",
            self.tasks.len()
        ))
    }

    fn set_done(&mut self, index: i64, done: bool) -> TrackerResult<Task> {
        let index = self.tasks.validate_index(index)?;
        let task = self.tasks.get_mut(index)?;
        if done {
            task.mark_done();
        } else {
            task.mark_not_done();
        }
        Ok(task.clone())
    }

    /// Save the whole list; returns the warning to show on failure
    fn persist(&self) -> Option<String> {
        match self.storage.save(&self.tasks) {
            Ok(()) => None,
            Err(e) => {
                warn!(
                    storage = self.storage.storage_type(),
                    error = %e,
                    "Failed to save tasks"
                );
                Some(format!("Could not save: {e}"))
            }
        }
    }

    fn render_list(&self) -> String {
        let mut out = String::from(" Here are the tasks in your list:");
        for (i, task) in self.tasks.iter().enumerate() {
            out.push_str(&format!("\n {}. {task}", i + 1));
        }
        out
    }

    fn render_find(&self, keyword: &str) -> String {
        let matches = self.tasks.find(keyword);
        if matches.is_empty() {
            return " No matching tasks found.".to_string();
        }

        let mut out = String::from(" Here are the matching tasks in your list:");
        for (i, task) in matches.iter().enumerate() {
            out.push_str(&format!("\n {}. {task}", i + 1));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::storage::codec;

    /// In-memory store recording what was last saved
    #[derive(Default)]
    struct RecordingStorage {
        saved: Mutex<Option<String>>,
        save_count: Mutex<usize>,
        fail_saves: bool,
        fail_load: bool,
    }

    impl Storage for RecordingStorage {
        fn storage_type(&self) -> &'static str {
            "memory"
        }

        fn load(&self) -> TrackerResult<TaskList> {
            if self.fail_load {
                return Err(TrackerError::FileReadError {
                    path: "mem".to_string(),
                    reason: "boom".to_string(),
                });
            }
            Ok(TaskList::new())
        }

        fn save(&self, tasks: &TaskList) -> TrackerResult<()> {
            *self.save_count.lock().unwrap() += 1;
            if self.fail_saves {
                return Err(TrackerError::StorageError {
                    reason: "disk full".to_string(),
                });
            }
            *self.saved.lock().unwrap() = Some(codec::encode_all(tasks));
            Ok(())
        }
    }

    fn session_with(storage: RecordingStorage) -> (Arc<RecordingStorage>, Session) {
        let storage = Arc::new(storage);
        let session = Session::open(Arc::clone(&storage) as Arc<dyn Storage>);
        (storage, session)
    }

    fn saved(storage: &RecordingStorage) -> Option<String> {
        storage.saved.lock().unwrap().clone()
    }

    #[test]
    fn test_add_todo_saves_and_reports_size() {
        let (storage, mut session) = session_with(RecordingStorage::default());

        let response = session.respond("todo read book");

        assert_eq!(
            response.text,
            " Got it. I've added this task:\n   [T][ ] read book\n Now you have 1 tasks in the list."
        );
        assert!(!response.exit);
        assert!(!response.is_error);
        assert_eq!(saved(&storage).unwrap(), "T | 0 | read book\n");
    }

    #[test]
    fn test_mark_then_unmark_restores_rendering() {
        let (_storage, mut session) = session_with(RecordingStorage::default());
        session.respond("event party /from 8pm /to late");
        let before = session.tasks().get(0).unwrap().to_string();

        let marked = session.respond("mark 1");
        assert_eq!(
            marked.text,
            " Nice! I've marked this task as done:\n   [E][X] party (from: 8pm to: late)"
        );

        let unmarked = session.respond("unmark 1");
        assert_eq!(
            unmarked.text,
            " OK, I've marked this task as not done yet:\n   [E][ ] party (from: 8pm to: late)"
        );
        assert_eq!(session.tasks().get(0).unwrap().to_string(), before);
    }

    #[test]
    fn test_double_mark_is_accepted() {
        let (_storage, mut session) = session_with(RecordingStorage::default());
        session.respond("todo a");
        session.respond("mark 1");

        let response = session.respond("mark 1");

        assert!(!response.is_error);
        assert!(session.tasks().get(0).unwrap().is_done());
    }

    #[test]
    fn test_out_of_range_index_leaves_list_unchanged() {
        let (storage, mut session) = session_with(RecordingStorage::default());
        session.respond("todo a");
        let before = session.tasks().clone();
        let saved_before = saved(&storage);

        for input in ["mark 2", "unmark 0", "delete 5", "delete -3"] {
            let response = session.respond(input);
            assert!(response.is_error, "{input} should fail");
            assert!(response.text.contains("does not exist"));
        }

        assert_eq!(session.tasks(), &before);
        assert_eq!(saved(&storage), saved_before);
    }

    #[test]
    fn test_delete_reports_removed_task() {
        let (_storage, mut session) = session_with(RecordingStorage::default());
        session.respond("todo a");
        session.respond("todo b");

        let response = session.respond("delete 1");

        assert_eq!(
            response.text,
            " Noted. I've removed this task:\n   [T][ ] a\n Now you have 1 tasks in the list."
        );
        assert_eq!(session.tasks().get(0).unwrap().description(), "b");
    }

    #[test]
    fn test_list_and_find_do_not_save() {
        let (storage, mut session) = session_with(RecordingStorage::default());
        session.respond("todo Read book");
        session.respond("todo write essay");
        *storage.saved.lock().unwrap() = None;

        let list = session.respond("list");
        assert_eq!(
            list.text,
            " Here are the tasks in your list:\n 1. [T][ ] Read book\n 2. [T][ ] write essay"
        );

        let found = session.respond("find book");
        assert_eq!(
            found.text,
            " Here are the matching tasks in your list:\n 1. [T][ ] Read book"
        );

        let none = session.respond("find xyz");
        assert_eq!(none.text, " No matching tasks found.");

        assert!(saved(&storage).is_none());
    }

    #[test]
    fn test_only_changing_commands_save() {
        let (storage, mut session) = session_with(RecordingStorage::default());
        let save_count = || *storage.save_count.lock().unwrap();

        for (line, expected) in [
            ("todo read book", 1),
            ("deadline submit /by 2024-12-31", 2),
            ("event party /from 8pm /to late", 3),
            ("mark 1", 4),
            ("unmark 1", 5),
            ("delete 2", 6),
            ("list", 6),
            ("find book", 6),
            ("help", 6),
            ("mark 9", 6),
            ("bye", 6),
        ] {
            session.respond(line);
            assert_eq!(save_count(), expected, "after {line}");
        }
    }

    #[test]
    fn test_parse_errors_are_reported() {
        let (_storage, mut session) = session_with(RecordingStorage::default());

        let response = session.respond("");
        assert!(response.is_error);
        assert_eq!(response.text, " Nothing was commanded");
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_save_failure_is_a_warning() {
        let (_storage, mut session) = session_with(RecordingStorage {
            fail_saves: true,
            ..RecordingStorage::default()
        });

        let response = session.respond("todo read book");

        assert!(!response.is_error);
        assert_eq!(
            response.warning.as_deref(),
            Some("Could not save: Storage error: disk full")
        );
        assert!(response.full_text().ends_with("\n Could not save: Storage error: disk full"));
        assert_eq!(session.tasks().len(), 1);
    }

    #[test]
    fn test_load_failure_starts_empty() {
        let (_storage, session) = session_with(RecordingStorage {
            fail_load: true,
            ..RecordingStorage::default()
        });

        assert!(session.tasks().is_empty());
        assert!(session.load_error().is_some());
        assert_eq!(session.state(), SessionState::Running);
    }

    #[test]
    fn test_bye_terminates_without_saving() {
        let (storage, mut session) = session_with(RecordingStorage::default());

        let response = session.respond("bye");

        assert!(response.exit);
        assert_eq!(response.text, " Bye. Hope to see you again soon!");
        assert!(session.is_terminated());
        assert!(saved(&storage).is_none());
    }

    #[test]
    fn test_help_does_not_change_state() {
        let (_storage, mut session) = session_with(RecordingStorage::default());
        let response = session.respond("h");
        assert!(response.text.starts_with(" Available Commands"));
        assert!(session.tasks().is_empty());
    }
}
