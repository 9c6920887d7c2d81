use chrono::{DateTime, Local, Utc};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::commands::Outcome;
use crate::models::{Status, Task};

/// Turns a command outcome into the text shown to the user.
pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Added(task) => format!("Task added successfully (ID: {})", task.id),
        Outcome::Updated(task) => format!("Task {} updated.", task.id),
        Outcome::Marked(task) => format!("Task {} marked as {}.", task.id, task.status),
        Outcome::Deleted(task) => format!("Task {} deleted.", task.id),
        Outcome::Listed { tasks, filter } => render_list(tasks, *filter),
        Outcome::Completions(script) => script.clone(),
    }
}

fn render_list(tasks: &[Task], filter: Option<Status>) -> String {
    if tasks.is_empty() {
        return match filter {
            Some(status) => format!("No tasks with status '{}'.", status),
            None => "No tasks found.".to_string(),
        };
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Description").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Created").add_attribute(Attribute::Bold),
            Cell::new("Updated").add_attribute(Attribute::Bold),
        ]);

    for t in tasks {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.description),
            Cell::new(t.status).fg(status_color(t.status)),
            Cell::new(local_time(&t.created_at)),
            Cell::new(local_time(&t.updated_at)),
        ]);
    }

    table.to_string()
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Yellow,
        Status::InProgress => Color::Cyan,
        Status::Done => Color::Green,
    }
}

fn local_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
