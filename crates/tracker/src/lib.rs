#![warn(clippy::pedantic)]
// Allow common pedantic lints that don't affect correctness
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

//! # Tracker
//!
//! A personal task tracker driven by single-line text commands.
//!
//! This crate provides:
//! - Three task kinds: to-do, deadline (dated) and event (time range)
//! - A command grammar (`todo`, `deadline`, `event`, `mark`, `find`, ...)
//! - A session that executes commands and saves after every change
//! - Plain-text storage, one pipe-delimited record per line
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tracker::{FileStorage, Session};
//!
//! let storage = Arc::new(FileStorage::new("data/tasks.txt"));
//! let mut session = Session::open(storage);
//!
//! let response = session.respond("todo read book");
//! println!("{}", response.text);
//! ```

// Core entities
pub mod entities;

// Error types
pub mod errors;

// Command grammar
pub mod parser;

// Storage layer
pub mod storage;

// Command execution
pub mod domain;

// Configuration
pub mod config;

// Terminal UI helpers
pub mod ui;

// Re-export key types for convenience
pub use config::TrackerConfig;
pub use domain::{Response, Session, SessionState};
pub use entities::{Task, TaskKind, TaskList, TaskType};
pub use errors::{TrackerError, TrackerResult};
pub use parser::{parse, Command};
pub use storage::{FileStorage, Storage};
