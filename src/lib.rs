//! Personal task tracker.
//!
//! Tasks live in a JSON file (`tasks.json` in the working directory unless
//! `--file` or `TASKS_DB` says otherwise). Each invocation loads the file,
//! applies one command and, if something changed, writes the file back.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod storage;
pub mod store;
