//! Task operations over the persisted collection.
//!
//! Every operation loads the collection, applies one change in memory and
//! saves it back. Operations that fail leave the tasks file untouched.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{now, Status, Task};
use crate::storage::Storage;

/// Next free identifier: one past the highest id present, or 1 when empty.
///
/// Ids freed below the current maximum are never handed out again. The file
/// keeps no high-water mark, so deleting the highest task makes its id the
/// next one assigned.
pub fn next_id(tasks: &[Task]) -> Result<u64> {
    tasks
        .iter()
        .map(|t| t.id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| Error::InvalidInput("no task ids left".to_string()))
}

fn validate_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(Error::InvalidInput("task description cannot be empty".to_string()));
    }
    Ok(())
}

pub struct TaskStore {
    storage: Storage,
}

impl TaskStore {
    pub fn new(storage: Storage) -> TaskStore {
        TaskStore { storage }
    }

    /// Adds a new `todo` task at the end of the collection.
    pub fn add(&self, description: String) -> Result<Task> {
        validate_description(&description)?;

        let mut tasks = self.storage.load()?;
        let task = Task::new(next_id(&tasks)?, description, now());
        tasks.push(task.clone());
        self.storage.save(&tasks)?;

        debug!(id = task.id, "task added");
        Ok(task)
    }

    /// Replaces the description of an existing task.
    pub fn update(&self, id: u64, description: String) -> Result<Task> {
        validate_description(&description)?;
        self.modify(id, |task| task.description = description)
    }

    /// Sets the status of an existing task. Any status may follow any other.
    pub fn change_status(&self, id: u64, status: Status) -> Result<Task> {
        self.modify(id, |task| task.status = status)
    }

    /// Removes a task. The remaining tasks keep their order.
    pub fn delete(&self, id: u64) -> Result<Task> {
        let mut tasks = self.storage.load()?;
        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;
        let removed = tasks.remove(index);
        self.storage.save(&tasks)?;

        debug!(id, "task deleted");
        Ok(removed)
    }

    /// Tasks in storage order, optionally only those with the given status.
    pub fn list(&self, status: Option<Status>) -> Result<Vec<Task>> {
        let mut tasks = self.storage.load()?;
        if let Some(status) = status {
            tasks.retain(|t| t.status == status);
        }
        Ok(tasks)
    }

    fn modify<F>(&self, id: u64, change: F) -> Result<Task>
    where
        F: FnOnce(&mut Task),
    {
        let mut tasks = self.storage.load()?;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::NotFound(id))?;
        change(task);
        task.touch(now());
        let updated = task.clone();
        self.storage.save(&tasks)?;

        debug!(id, status = %updated.status, "task updated");
        Ok(updated)
    }
}
