//! File-based storage implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::codec;
use super::traits::Storage;
use crate::entities::TaskList;
use crate::errors::{TrackerError, TrackerResult};

/// Default storage location, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data/tasks.txt";

/// Plain-text storage file, one record per line
pub struct FileStorage {
    /// Path to the storage file
    path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage instance. Nothing touches the disk until
    /// the first load or save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the storage file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the storage file
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn ensure_parent_dir(&self) -> TrackerResult<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| TrackerError::StorageError {
            reason: format!("cannot create '{}': {e}", dir.display()),
        })
    }

    fn read_error(&self, e: &std::io::Error) -> TrackerError {
        TrackerError::FileReadError {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        }
    }

    fn write_error(&self, e: &std::io::Error) -> TrackerError {
        TrackerError::FileWriteError {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        }
    }
}

impl Storage for FileStorage {
    fn storage_type(&self) -> &'static str {
        "file"
    }

    fn load(&self) -> TrackerResult<TaskList> {
        self.ensure_parent_dir()?;

        if !self.path.exists() {
            fs::File::create(&self.path).map_err(|e| self.write_error(&e))?;
            info!(path = %self.path.display(), "Created empty storage file");
            return Ok(TaskList::new());
        }

        let content = fs::read(&self.path).map_err(|e| self.read_error(&e))?;
        let decoded = codec::decode_all(&content);

        info!(
            path = %self.path.display(),
            loaded = decoded.tasks.len(),
            "Loaded tasks"
        );
        if decoded.skipped > 0 {
            debug!(skipped = decoded.skipped, "Dropped malformed storage records");
        }

        Ok(decoded.tasks)
    }

    fn save(&self, tasks: &TaskList) -> TrackerResult<()> {
        self.ensure_parent_dir()?;

        // Write beside the target and rename over it, so a failed write
        // leaves the previous file intact.
        let mut tmp = NamedTempFile::new_in(self.parent_dir()).map_err(|e| self.write_error(&e))?;
        tmp.write_all(codec::encode_all(tasks).as_bytes())
            .map_err(|e| self.write_error(&e))?;
        if let Ok(existing) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(|e| self.write_error(&e))?;
        }
        tmp.persist(&self.path)
            .map_err(|e| self.write_error(&e.error))?;

        debug!(path = %self.path.display(), count = tasks.len(), "Saved tasks");
        Ok(())
    }
}
