//! Static command reference shown by `help`.

use std::fmt::Write;

const USAGE_COLUMN_WIDTH: usize = 32;

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "TASK MANAGEMENT",
        &[
            ("todo <desc>", "Add a new todo task"),
            ("deadline <desc> /by yyyy-MM-dd", "Add a task with a deadline"),
            (
                "event <desc> /from <start> /to <end>",
                "Add an event with a time range",
            ),
        ],
    ),
    (
        "TASK OPERATIONS",
        &[
            ("list", "Show all tasks"),
            ("find <keyword>", "Search tasks by keyword"),
            ("mark <index>", "Mark task as done"),
            ("unmark <index>", "Mark task as not done"),
            ("delete <index>", "Delete task at index"),
        ],
    ),
    (
        "MISC",
        &[
            ("help (or h)", "Show this help message"),
            ("bye", "Exit the program"),
        ],
    ),
];

/// Render the command reference
pub fn help_text() -> String {
    let mut out = String::from(" Available Commands\n");

    for (title, entries) in SECTIONS {
        let _ = writeln!(out, "\n {title}");
        for (usage, summary) in *entries {
            let _ = writeln!(out, "  {usage:<USAGE_COLUMN_WIDTH$} {summary}");
        }
    }

    out.trim_end().to_string()
}
