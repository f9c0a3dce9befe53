//! Command grammar: turns one raw input line into a [`Command`].
//!
//! The keyword is the first whitespace-delimited token. Parameters for
//! `deadline` and `event` are split on the padded separators ` /by `,
//! ` /from ` and ` /to `, so a description that merely contains "by" is
//! left alone.

use chrono::NaiveDate;

use crate::entities::STORAGE_DATE_FORMAT;
use crate::errors::{TrackerError, TrackerResult};

const DEADLINE_SEPARATOR: &str = " /by ";
const EVENT_FROM_SEPARATOR: &str = " /from ";
const EVENT_TO_SEPARATOR: &str = " /to ";

const EMPTY_INPUT: &str = "Nothing was commanded";
const EMPTY_TODO: &str = "Todo what? It's an empty todo";
const EMPTY_FIND: &str = "Find what? Provide a keyword!";
const MISSING_NUMBER: &str = "No number was inputted";
const INVALID_NUMBER: &str = "Not a valid number";
const DEADLINE_FORMAT: &str = "Wrong format. Input: deadline <description> /by <deadline>";
const DEADLINE_EMPTY: &str =
    "Description/Date is empty. Input: deadline <description> /by <deadline>";
const INVALID_DATE: &str = "Invalid date format. Enter like yyyy-MM-dd";
const EVENT_FORMAT: &str = "Wrong format. Input: event <description> /from <start> /to <end>";
const EVENT_EMPTY: &str =
    "Description/Dates are empty. Input: event <description> /from <start> /to <end>";

/// A parsed command intent.
///
/// Index-carrying variants hold the 0-based index (user number minus one).
/// It may be negative or past the end; range checks happen against the
/// task list at execution time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    List,
    Help,
    AddToDo {
        description: String,
    },
    AddDeadline {
        description: String,
        by: NaiveDate,
    },
    AddEvent {
        description: String,
        from: String,
        to: String,
    },
    Mark {
        index: i64,
    },
    Unmark {
        index: i64,
    },
    Delete {
        index: i64,
    },
    Find {
        keyword: String,
    },
}

impl Command {
    /// Whether executing this command ends the session
    pub fn is_exit(&self) -> bool {
        matches!(self, Self::Exit)
    }

    /// Whether executing this command changes the task list
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::AddToDo { .. }
                | Self::AddDeadline { .. }
                | Self::AddEvent { .. }
                | Self::Mark { .. }
                | Self::Unmark { .. }
                | Self::Delete { .. }
        )
    }
}

impl std::str::FromStr for Command {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parse one line of user input
pub fn parse(line: &str) -> TrackerResult<Command> {
    let input = line.trim();

    if input.is_empty() {
        return Err(TrackerError::parse(EMPTY_INPUT));
    }

    match input {
        "bye" => return Ok(Command::Exit),
        "list" => return Ok(Command::List),
        "help" | "h" => return Ok(Command::Help),
        _ => {}
    }

    let (keyword, rest) = input
        .split_once(char::is_whitespace)
        .map_or((input, ""), |(k, r)| (k, r.trim()));

    match keyword {
        "mark" => parse_index(rest).map(|index| Command::Mark { index }),
        "unmark" => parse_index(rest).map(|index| Command::Unmark { index }),
        "delete" => parse_index(rest).map(|index| Command::Delete { index }),
        "find" => parse_find(rest),
        "todo" => parse_todo(rest),
        "deadline" => parse_deadline(rest),
        "event" => parse_event(rest),
        _ => Err(TrackerError::parse(format!("Unknown command: {input}"))),
    }
}

/// Parse a 1-based task number into a 0-based index. Task numbers are
/// 32-bit; anything wider is not a valid number.
fn parse_index(arg: &str) -> TrackerResult<i64> {
    if arg.is_empty() {
        return Err(TrackerError::parse(MISSING_NUMBER));
    }

    let number: i32 = arg
        .parse()
        .map_err(|_| TrackerError::parse(INVALID_NUMBER))?;

    Ok(i64::from(number) - 1)
}

fn parse_find(arg: &str) -> TrackerResult<Command> {
    if arg.is_empty() {
        return Err(TrackerError::parse(EMPTY_FIND));
    }

    Ok(Command::Find {
        keyword: arg.to_string(),
    })
}

fn parse_todo(arg: &str) -> TrackerResult<Command> {
    if arg.is_empty() {
        return Err(TrackerError::parse(EMPTY_TODO));
    }

    Ok(Command::AddToDo {
        description: arg.to_string(),
    })
}

fn parse_deadline(body: &str) -> TrackerResult<Command> {
    let by_idx = body
        .find(DEADLINE_SEPARATOR)
        .ok_or_else(|| TrackerError::parse(DEADLINE_FORMAT))?;

    let description = body[..by_idx].trim();
    let by = body[by_idx + DEADLINE_SEPARATOR.len()..].trim();

    if description.is_empty() || by.is_empty() {
        return Err(TrackerError::parse(DEADLINE_EMPTY));
    }

    let by = NaiveDate::parse_from_str(by, STORAGE_DATE_FORMAT)
        .map_err(|_| TrackerError::parse(INVALID_DATE))?;

    Ok(Command::AddDeadline {
        description: description.to_string(),
        by,
    })
}

fn parse_event(body: &str) -> TrackerResult<Command> {
    let (from_idx, to_idx) = match (body.find(EVENT_FROM_SEPARATOR), body.find(EVENT_TO_SEPARATOR))
    {
        (Some(from_idx), Some(to_idx)) if to_idx > from_idx => (from_idx, to_idx),
        _ => return Err(TrackerError::parse(EVENT_FORMAT)),
    };

    let description = body[..from_idx].trim();
    // The separators share a space in "a /from /to b"; there is no start text then.
    let from_start = from_idx + EVENT_FROM_SEPARATOR.len();
    let from = body.get(from_start..to_idx).map_or("", str::trim);
    let to = body[to_idx + EVENT_TO_SEPARATOR.len()..].trim();

    if description.is_empty() || from.is_empty() || to.is_empty() {
        return Err(TrackerError::parse(EVENT_EMPTY));
    }

    Ok(Command::AddEvent {
        description: description.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    })
}
