//! Error types for task-tracker
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (empty description, unknown status, missing task)
//! - 4: Storage failure (tasks file unreadable or not writable)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the task-tracker CLI
pub mod exit_codes {
    pub const USER_ERROR: i32 = 2;
    pub const STORAGE_FAILED: i32 = 4;
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Task {0} not found")]
    NotFound(u64),

    #[error("Tasks file {} is unreadable: {reason}", .path.display())]
    StorageUnreadable { path: PathBuf, reason: String },

    #[error("Failed to save tasks to {}: {source}", .path.display())]
    StorageWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidInput(_) | Error::NotFound(_) => exit_codes::USER_ERROR,
            Error::StorageUnreadable { .. } | Error::StorageWriteFailure { .. } => {
                exit_codes::STORAGE_FAILED
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
