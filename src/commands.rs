use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use crate::config::Config;
use crate::error::Result;
use crate::models::{Status, Task};
use crate::store::TaskStore;

#[derive(Parser, Debug)]
#[command(name = "task-tracker")]
#[command(about = "Track small tasks from the terminal", long_about = None)]
pub struct Cli {
    /// Tasks file to use [default: ./tasks.json]
    #[arg(short, long, global = true, env = "TASKS_DB")]
    pub file: Option<PathBuf>,

    /// Fail instead of starting over when the tasks file is unreadable
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn run(self) -> Result<Outcome> {
        let config = Config::resolve(self.file, self.strict);
        let store = TaskStore::new(config.storage());
        self.command.run(&store)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new task
    Add {
        /// Task description (quoted if it has spaces)
        description: String,
    },
    /// Change a task's description
    Update {
        id: u64,
        /// New description
        description: String,
    },
    /// Remove a task
    Delete { id: u64 },
    /// List tasks, optionally only those with one status
    List {
        /// todo, in-progress or done
        status: Option<String>,
    },
    /// Set a task's status
    Mark {
        id: u64,
        /// todo, in-progress or done
        status: String,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

/// Result of a command, ready to be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Added(Task),
    Updated(Task),
    Marked(Task),
    Deleted(Task),
    Listed {
        tasks: Vec<Task>,
        filter: Option<Status>,
    },
    Completions(String),
}

impl Command {
    pub fn run(self, store: &TaskStore) -> Result<Outcome> {
        match self {
            Command::Add { description } => store.add(description).map(Outcome::Added),
            Command::Update { id, description } => {
                store.update(id, description).map(Outcome::Updated)
            }
            Command::Delete { id } => store.delete(id).map(Outcome::Deleted),
            Command::List { status } => {
                let filter = status.as_deref().map(str::parse::<Status>).transpose()?;
                let tasks = store.list(filter)?;
                Ok(Outcome::Listed { tasks, filter })
            }
            Command::Mark { id, status } => {
                let status: Status = status.parse()?;
                store.change_status(id, status).map(Outcome::Marked)
            }
            Command::Completions { shell } => {
                let mut buf = Vec::new();
                generate(shell, &mut Cli::command(), "task-tracker", &mut buf);
                Ok(Outcome::Completions(String::from_utf8_lossy(&buf).into_owned()))
            }
        }
    }
}
