//! Line codec for the storage file.
//!
//! One task per line, pipe-delimited, whitespace around fields ignored:
//!
//! ```text
//! T | 0 | buy milk
//! D | 1 | submit | 2024-12-31
//! E | 0 | meeting | 2pm | 3pm
//! ```

use chrono::NaiveDate;
use tracing::debug;

use crate::entities::{Task, TaskKind, TaskList, TaskType, STORAGE_DATE_FORMAT};

const FIELD_SEPARATOR: &str = " | ";
const DONE_FLAG: &str = "1";
const NOT_DONE_FLAG: &str = "0";

const MIN_TASK_FIELDS: usize = 3;
const MIN_DEADLINE_FIELDS: usize = 4;
const MIN_EVENT_FIELDS: usize = 5;

/// Encode one task as a storage record (no line terminator)
pub fn encode(task: &Task) -> String {
    let flag = if task.is_done() {
        DONE_FLAG
    } else {
        NOT_DONE_FLAG
    };

    let mut fields = vec![
        task.task_type().code().to_string(),
        flag.to_string(),
        task.description().to_string(),
    ];

    match task.kind() {
        TaskKind::ToDo => {}
        TaskKind::Deadline { by } => fields.push(by.format(STORAGE_DATE_FORMAT).to_string()),
        TaskKind::Event { from, to } => {
            fields.push(from.clone());
            fields.push(to.clone());
        }
    }

    fields.join(FIELD_SEPARATOR)
}

/// Decode one storage record.
///
/// Returns `None` for anything malformed: too few fields for the type, an
/// unknown type code, an empty description or an unparseable date.
pub fn decode(line: &str) -> Option<Task> {
    let fields: Vec<&str> = line.split('|').map(str::trim).collect();
    if fields.len() < MIN_TASK_FIELDS {
        return None;
    }

    let task_type: TaskType = fields[0].parse().ok()?;
    let done = fields[1] == DONE_FLAG;
    let description = fields[2];

    let kind = match task_type {
        TaskType::ToDo => TaskKind::ToDo,
        TaskType::Deadline => {
            if fields.len() < MIN_DEADLINE_FIELDS {
                return None;
            }
            let by = NaiveDate::parse_from_str(fields[3], STORAGE_DATE_FORMAT).ok()?;
            TaskKind::Deadline { by }
        }
        TaskType::Event => {
            if fields.len() < MIN_EVENT_FIELDS {
                return None;
            }
            TaskKind::Event {
                from: fields[3].to_string(),
                to: fields[4].to_string(),
            }
        }
    };

    let mut task = Task::new(description, kind).ok()?;
    task.set_done(done);
    Some(task)
}

/// Result of decoding a whole storage file
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub tasks: TaskList,
    pub skipped: usize,
}

/// Decode every line of `content`, dropping malformed records.
///
/// Lines are split on raw bytes so a record that is not valid UTF-8 is
/// skipped on its own instead of failing the whole file.
pub fn decode_all(content: &[u8]) -> Decoded {
    let mut decoded = Decoded::default();

    let mut lines: Vec<&[u8]> = content.split(|&b| b == b'\n').collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }

    for (line_no, raw) in lines.into_iter().enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw).ok().and_then(decode) {
            Some(task) => decoded.tasks.add(task),
            None => {
                debug!(line = line_no + 1, "Skipping malformed storage record");
                decoded.skipped += 1;
            }
        }
    }

    decoded
}

/// Encode every task, one record per line, each line terminated
pub fn encode_all(tasks: &TaskList) -> String {
    let mut out = String::new();
    for task in tasks {
        out.push_str(&encode(task));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_encode_each_kind() {
        let todo = Task::todo("buy milk").unwrap();
        assert_eq!(encode(&todo), "T | 0 | buy milk");

        let mut deadline = Task::deadline("submit", date(2024, 12, 31)).unwrap();
        deadline.mark_done();
        assert_eq!(encode(&deadline), "D | 1 | submit | 2024-12-31");

        let event = Task::event("meeting", "2pm", "3pm").unwrap();
        assert_eq!(encode(&event), "E | 0 | meeting | 2pm | 3pm");
    }

    #[test]
    fn test_decode_ignores_surrounding_whitespace() {
        let task = decode("D|1|  submit report |2024-01-05").unwrap();
        assert_eq!(task.description(), "submit report");
        assert!(task.is_done());
        assert_eq!(task.kind(), &TaskKind::Deadline { by: date(2024, 1, 5) });
    }

    #[test]
    fn test_decode_event() {
        let task = decode("E | 0 | meeting | Mon 2pm | Mon 4pm").unwrap();
        assert!(!task.is_done());
        assert_eq!(
            task.kind(),
            &TaskKind::Event {
                from: "Mon 2pm".to_string(),
                to: "Mon 4pm".to_string()
            }
        );
    }

    #[test]
    fn test_decode_rejects_malformed_records() {
        assert!(decode("").is_none());
        assert!(decode("T | 0").is_none());
        assert!(decode("X | 0 | mystery").is_none());
        assert!(decode("D | 1 | x").is_none());
        assert!(decode("D | 0 | x | 31/12/2024").is_none());
        assert!(decode("E | 0 | meeting | 2pm").is_none());
        assert!(decode("T | 0 |   ").is_none());
    }

    #[test]
    fn test_decode_all_skips_bad_lines() {
        let content = "T | 0 | read book\nD | 1 | x\n\ngarbage\nE | 1 | party | 8pm | late\n";
        let decoded = decode_all(content.as_bytes());

        assert_eq!(decoded.tasks.len(), 2);
        assert_eq!(decoded.skipped, 3);
        assert_eq!(decoded.tasks.get(0).unwrap().to_string(), "[T][ ] read book");
        assert_eq!(
            decoded.tasks.get(1).unwrap().to_string(),
            "[E][X] party (from: 8pm to: late)"
        );
    }

    #[test]
    fn test_decode_all_accepts_crlf() {
        let decoded = decode_all(b"T | 1 | a\r\nT | 0 | b\r\n");
        assert_eq!(decoded.tasks.len(), 2);
        assert_eq!(decoded.tasks.get(1).unwrap().description(), "b");
    }

    #[test]
    fn test_decode_all_skips_invalid_utf8_line_only() {
        let decoded = decode_all(b"T | 0 | keep one\nT | 0 | bad \xff byte\nT | 1 | keep two\n");

        assert_eq!(decoded.skipped, 1);
        assert_eq!(decoded.tasks.len(), 2);
        assert_eq!(decoded.tasks.get(1).unwrap().to_string(), "[T][X] keep two");
    }

    #[test]
    fn test_decode_all_empty_content() {
        let decoded = decode_all(b"");
        assert!(decoded.tasks.is_empty());
        assert_eq!(decoded.skipped, 0);
    }

    #[test]
    fn test_encode_then_decode_preserves_tasks() {
        let mut done_event = Task::event("conference", "Jan 3", "Jan 5").unwrap();
        done_event.mark_done();
        let tasks = TaskList::from(vec![
            Task::todo("read book").unwrap(),
            Task::deadline("tax return", date(2025, 4, 30)).unwrap(),
            done_event,
        ]);

        let decoded = decode_all(encode_all(&tasks).as_bytes());
        assert_eq!(decoded.skipped, 0);
        assert_eq!(decoded.tasks, tasks);
    }
}
