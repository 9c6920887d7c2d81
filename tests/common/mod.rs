#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use task_tracker::storage::Storage;
use task_tracker::store::TaskStore;
use tempfile::TempDir;

/// A task store backed by `tasks.json` in its own temporary directory.
pub struct TestDb {
    dir: TempDir,
}

impl TestDb {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("tasks.json")
    }

    pub fn storage(&self) -> Storage {
        Storage::new(self.path())
    }

    pub fn store(&self) -> TaskStore {
        TaskStore::new(self.storage())
    }

    pub fn write(&self, contents: &str) {
        fs::write(self.path(), contents).expect("failed to write tasks file");
    }

    pub fn read_bytes(&self) -> Vec<u8> {
        fs::read(self.path()).expect("failed to read tasks file")
    }
}
