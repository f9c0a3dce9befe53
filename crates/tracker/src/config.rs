//! Tracker configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{TrackerError, TrackerResult};
use crate::storage::DEFAULT_DATA_FILE;

/// Log filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Log filter used when `RUST_LOG` is unset and verbose output is on
pub const VERBOSE_LOG_FILTER: &str = "debug";

/// Pick the tracing filter directive. A non-empty `RUST_LOG` wins over the
/// verbose flag.
pub fn log_filter(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ if verbose => VERBOSE_LOG_FILTER.to_string(),
        _ => DEFAULT_LOG_FILTER.to_string(),
    }
}

/// Settings read from an optional JSON file, then overridden from the
/// command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackerConfig {
    /// Path of the task storage file
    pub data_file: PathBuf,

    /// Colorize terminal output
    pub color: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            color: true,
        }
    }
}

impl TrackerConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => {
                let config: Self = serde_json::from_str(&content)?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(TrackerError::ConfigError {
                reason: format!("cannot read '{}': {e}", path.display()),
            }),
        }
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, data_file: Option<PathBuf>, no_color: bool) -> Self {
        if let Some(data_file) = data_file {
            self.data_file = data_file;
        }
        if no_color {
            self.color = false;
        }
        self
    }
}
