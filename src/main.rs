//! # task-tracker
//!
//! Record short tasks, move them between `todo`, `in-progress` and `done`,
//! and list them.
//!
//! ```bash
//! task-tracker add "Buy milk"
//! task-tracker update 1 "Buy oat milk"
//! task-tracker mark 1 in-progress
//! task-tracker list done
//! task-tracker delete 1
//! ```
//!
//! Set `RUST_LOG=debug` to see what each command does to the tasks file.

use std::io::IsTerminal;

use clap::Parser;
use task_tracker::commands::Cli;
use task_tracker::render::render;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Warnings are always on so a corrupt tasks file never goes unnoticed.
    let filter = std::env::var("RUST_LOG")
        .ok()
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .without_time(),
        )
        .with(filter)
        .init();

    let cli = Cli::parse();
    match cli.run() {
        Ok(outcome) => println!("{}", render(&outcome)),
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(err.exit_code());
        }
    }
}
