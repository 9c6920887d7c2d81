use std::path::PathBuf;

use crate::storage::{RecoveryPolicy, Storage, DEFAULT_TASKS_FILE};

/// Environment variable that switches loading to fail-closed.
pub const STRICT_ENV: &str = "TASKS_STRICT";

/// Runtime settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tasks_file: PathBuf,
    pub recovery: RecoveryPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tasks_file: PathBuf::from(DEFAULT_TASKS_FILE),
            recovery: RecoveryPolicy::Recover,
        }
    }
}

impl Config {
    /// Builds the config from command line values.
    ///
    /// `file` already includes the `TASKS_DB` fallback (clap reads it). Strict
    /// mode is on when the flag is given or `TASKS_STRICT` is truthy.
    pub fn resolve(file: Option<PathBuf>, strict: bool) -> Config {
        let strict = strict || env_flag(STRICT_ENV);
        Config {
            tasks_file: file.unwrap_or_else(|| PathBuf::from(DEFAULT_TASKS_FILE)),
            recovery: if strict {
                RecoveryPolicy::Strict
            } else {
                RecoveryPolicy::Recover
            },
        }
    }

    pub fn storage(&self) -> Storage {
        Storage::new(&self.tasks_file).with_recovery(self.recovery)
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
