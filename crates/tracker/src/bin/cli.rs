//! Tracker CLI - conversational task tracking in the terminal.

#![warn(clippy::pedantic)]
#![allow(clippy::disallowed_macros)]
#![allow(clippy::uninlined_format_args)]

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tracker::domain::LOADING_ERROR_NOTICE;
use tracker::storage::FileStorage;
use tracker::config::{log_filter, DEFAULT_LOG_FILTER};
use tracker::{ui, Session, TrackerConfig};

#[derive(Parser)]
#[command(name = "tracker")]
#[command(about = "Personal task tracker driven by text commands", long_about = None)]
#[command(version)]
struct Cli {
    /// Task storage file
    #[arg(long, env = "TRACKER_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, default_value = "tracker.json")]
    config: PathBuf,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = log_filter(cli.verbose, rust_log.as_deref());
    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli) {
        ui::print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = TrackerConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?
        .with_overrides(cli.data_file, cli.no_color);
    ui::set_color(config.color);

    tracing::debug!(data_file = %config.data_file.display(), "Starting session");

    let storage = Arc::new(FileStorage::new(&config.data_file));
    let mut session = Session::open(storage);

    ui::print_block(&session.welcome_message());
    if session.load_error().is_some() {
        ui::print_error(&format!(" {LOADING_ERROR_NOTICE}"));
    }

    let mut stdin = io::stdin().lock();
    let mut buf = Vec::new();
    while let Some(line) = ui::read_command(&mut stdin, &mut buf).context("reading command")? {
        let response = session.respond(&line);
        ui::print_response(&response);

        if response.exit {
            break;
        }
    }

    Ok(())
}
