//! Terminal UI helpers for the conversation loop.
//!
//! This module uses println! for CLI output, which is appropriate
//! for terminal user interfaces.

#![allow(clippy::disallowed_macros)]

use std::io::{self, BufRead};

use colored::Colorize;

use crate::domain::Response;

const DIVIDER_WIDTH: usize = 66;

/// Horizontal rule framing every reply
pub fn divider() -> String {
    "_".repeat(DIVIDER_WIDTH)
}

/// Enable or disable colored output globally
pub fn set_color(enabled: bool) {
    colored::control::set_override(enabled);
}

/// Read the next command line, without its line terminator.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
/// garbled line still reaches the parser. Returns `None` at end of input.
pub fn read_command(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }

    let line = String::from_utf8_lossy(buf);
    let line = line.strip_suffix('\n').unwrap_or(&line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    Ok(Some(line.to_string()))
}

/// Print text between two dividers
pub fn print_block(text: &str) {
    println!("{}", divider().dimmed());
    println!("{text}");
    println!("{}", divider().dimmed());
}

/// Print error text between two dividers
pub fn print_error(message: &str) {
    println!("{}", divider().dimmed());
    println!("{}", message.red());
    println!("{}", divider().dimmed());
}

/// Print a warning line
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

/// Print a command response in the matching style
pub fn print_response(response: &Response) {
    if response.is_error {
        print_error(&response.text);
        return;
    }

    match &response.warning {
        Some(warning) => {
            println!("{}", divider().dimmed());
            println!("{}", response.text);
            print_warning(warning);
            println!("{}", divider().dimmed());
        }
        None => print_block(&response.text),
    }
}
