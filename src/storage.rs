//! Persistence for the task collection.
//!
//! The whole collection lives in one pretty-printed JSON array and is
//! rewritten in full on every save. There is no locking: two processes that
//! mutate the same file at the same time race, and the last save wins.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Task;

/// Default tasks file, relative to the working directory.
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// What `load` does with a tasks file it cannot make sense of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryPolicy {
    /// Warn, copy the file aside to `<file>.corrupt` (or `<file>.corrupt.N`)
    /// and carry on with an empty collection. The next save replaces the original file.
    #[default]
    Recover,
    /// Refuse to continue with `Error::StorageUnreadable`.
    Strict,
}

/// Handle to the backing tasks file.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
    recovery: RecoveryPolicy,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Storage {
        Storage {
            path: path.into(),
            recovery: RecoveryPolicy::default(),
        }
    }

    pub fn with_recovery(mut self, recovery: RecoveryPolicy) -> Storage {
        self.recovery = recovery;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable tasks file is copied before it gets replaced.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".corrupt");
        PathBuf::from(name)
    }

    /// Loads all tasks from the storage file.
    ///
    /// A missing or blank file is an empty collection. Content that does not
    /// parse into valid tasks is handled according to the recovery policy.
    pub fn load(&self) -> Result<Vec<Task>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no tasks file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(Error::StorageUnreadable {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })
            }
        };

        let content = match std::str::from_utf8(&bytes) {
            Ok(content) => content,
            Err(e) => return self.recover(&bytes, format!("not valid UTF-8: {}", e)),
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match parse_tasks(content) {
            Ok(tasks) => {
                debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
                Ok(tasks)
            }
            Err(reason) => self.recover(&bytes, reason),
        }
    }

    fn recover(&self, bytes: &[u8], reason: String) -> Result<Vec<Task>> {
        if self.recovery == RecoveryPolicy::Strict {
            return Err(Error::StorageUnreadable {
                path: self.path.clone(),
                reason,
            });
        }

        match self.keep_backup(bytes) {
            Ok(backup) => warn!(
                path = %self.path.display(),
                backup = %backup.display(),
                %reason,
                "tasks file is unreadable, continuing with an empty task list; \
                 the next change will overwrite it (a copy was kept)"
            ),
            Err(e) => warn!(
                path = %self.path.display(),
                %reason,
                backup_error = %e,
                "tasks file is unreadable and could not be backed up, continuing with an \
                 empty task list; the next change will overwrite it"
            ),
        }
        Ok(Vec::new())
    }

    /// Writes `bytes` to the first free backup slot (`<file>.corrupt`,
    /// `<file>.corrupt.1`, ...). A slot already holding the same bytes is
    /// reused, so repeated loads of one broken file keep a single copy and
    /// earlier backups are never overwritten.
    fn keep_backup(&self, bytes: &[u8]) -> io::Result<PathBuf> {
        let base = self.backup_path();
        for n in 0u32.. {
            let candidate = if n == 0 {
                base.clone()
            } else {
                let mut name = base.as_os_str().to_os_string();
                name.push(format!(".{}", n));
                PathBuf::from(name)
            };
            match fs::read(&candidate) {
                Ok(existing) if existing == bytes => return Ok(candidate),
                Ok(_) => continue,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    fs::write(&candidate, bytes)?;
                    return Ok(candidate);
                }
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::other("no free backup slot"))
    }

    /// Replaces the storage file with the given tasks.
    ///
    /// The new content is written to a temporary file next to the target and
    /// renamed over it, so the old content survives any failure.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        let write = || -> io::Result<()> {
            let mut json = serde_json::to_string_pretty(tasks).map_err(io::Error::from)?;
            json.push('\n');
            self.write_atomic(json.as_bytes())
        };
        write().map_err(|source| Error::StorageWriteFailure {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn write_atomic(&self, data: &[u8]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Parses and validates the content of a tasks file.
fn parse_tasks(content: &str) -> std::result::Result<Vec<Task>, String> {
    let tasks: Vec<Task> = serde_json::from_str(content).map_err(|e| e.to_string())?;

    let mut seen = HashSet::new();
    for task in &tasks {
        if task.id == 0 {
            return Err("task ids must be positive, found 0".to_string());
        }
        if !seen.insert(task.id) {
            return Err(format!("duplicate task id {}", task.id));
        }
        if task.description.trim().is_empty() {
            return Err(format!("task {} has an empty description", task.id));
        }
    }
    Ok(tasks)
}
