//! Task list persistence.
//!
//! The whole list lives under one key as a JSON array. The Auto Plan undo
//! snapshot lives under a second key until it is restored.

use chrono::NaiveDate;

use super::task::Task;
use crate::error::MypaError;
use crate::storage::{load_optional, load_or_default, remove_logged, save_logged, KeyValueStore};

/// Key holding the task list.
pub const TASKS_KEY: &str = "mypa.tasks";
/// Key holding the pre-replan snapshot.
pub const UNDO_KEY: &str = "mypa.plan.undo";

/// Task list backed by a [`KeyValueStore`].
pub struct TaskStore<'a> {
    store: &'a dyn KeyValueStore,
}

impl<'a> TaskStore<'a> {
    pub fn new(store: &'a dyn KeyValueStore) -> Self {
        Self { store }
    }

    /// Load every task. A missing or corrupt list reads as empty.
    #[must_use]
    pub fn load(&self) -> Vec<Task> {
        load_or_default(self.store, TASKS_KEY)
    }

    /// Replace the stored list.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::PersistenceWrite`] if the list was not written.
    pub fn save(&self, tasks: &[Task]) -> Result<(), MypaError> {
        if save_logged(self.store, TASKS_KEY, tasks) {
            Ok(())
        } else {
            Err(MypaError::PersistenceWrite("task list was not saved".to_string()))
        }
    }

    /// Tasks on `date`, ordered by start time.
    #[must_use]
    pub fn for_date(&self, date: NaiveDate) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.load().into_iter().filter(|t| t.date == date).collect();
        tasks.sort_by_key(|t| t.time);
        tasks
    }

    /// Append a task and persist the list.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::PersistenceWrite`] if the list was not written.
    pub fn add(&self, task: Task) -> Result<Task, MypaError> {
        let mut tasks = self.load();
        tasks.push(task.clone());
        self.save(&tasks)?;
        log::info!("added task {} \"{}\" on {}", task.short_id(), task.title, task.date);
        Ok(task)
    }

    /// Find a task by full id or unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::NotFound`] if nothing matches, or
    /// [`MypaError::InvalidState`] if the prefix is ambiguous.
    pub fn find(&self, id: &str) -> Result<Task, MypaError> {
        find_in(&self.load(), id).cloned()
    }

    /// Mark a task completed and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not resolve to exactly one task.
    pub fn complete(&self, id: &str) -> Result<Task, MypaError> {
        self.update(id, |task| task.completed = true)
    }

    /// Delete a task and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the id does not resolve to exactly one task.
    pub fn remove(&self, id: &str) -> Result<Task, MypaError> {
        let mut tasks = self.load();
        let target = find_in(&tasks, id)?.id.clone();
        let index = tasks
            .iter()
            .position(|t| t.id == target)
            .ok_or_else(|| MypaError::NotFound(format!("task {id}")))?;
        let removed = tasks.remove(index);
        self.save(&tasks)?;
        log::info!("removed task {}", removed.short_id());
        Ok(removed)
    }

    fn update(&self, id: &str, change: impl FnOnce(&mut Task)) -> Result<Task, MypaError> {
        let mut tasks = self.load();
        let target = find_in(&tasks, id)?.id.clone();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == target)
            .ok_or_else(|| MypaError::NotFound(format!("task {id}")))?;
        change(task);
        let updated = task.clone();
        self.save(&tasks)?;
        Ok(updated)
    }

    /// Commit a replanned list, keeping `snapshot` for [`Self::undo`].
    ///
    /// The snapshot is written first, so a failed list write leaves the old
    /// list in place with a harmless undo.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::PersistenceWrite`] if either write fails.
    pub fn commit_replan(&self, tasks: &[Task], snapshot: &[Task]) -> Result<(), MypaError> {
        if !save_logged(self.store, UNDO_KEY, snapshot) {
            return Err(MypaError::PersistenceWrite(
                "Auto Plan undo snapshot was not saved".to_string(),
            ));
        }
        self.save(tasks)
    }

    /// Whether an undo snapshot is waiting.
    #[must_use]
    pub fn has_undo(&self) -> bool {
        matches!(self.store.get(UNDO_KEY), Ok(Some(_)))
    }

    /// Restore the last replan snapshot and drop it.
    ///
    /// # Errors
    ///
    /// Returns [`MypaError::NotFound`] if there is nothing to undo, or
    /// [`MypaError::PersistenceWrite`] if the restore was not written. The
    /// snapshot is kept in that case.
    pub fn undo(&self) -> Result<Vec<Task>, MypaError> {
        let snapshot: Vec<Task> = load_optional(self.store, UNDO_KEY)
            .ok_or_else(|| MypaError::NotFound("no Auto Plan to undo".to_string()))?;
        self.save(&snapshot)?;
        remove_logged(self.store, UNDO_KEY);
        log::info!("restored {} tasks from undo snapshot", snapshot.len());
        Ok(snapshot)
    }
}

fn find_in<'t>(tasks: &'t [Task], id: &str) -> Result<&'t Task, MypaError> {
    if let Some(task) = tasks.iter().find(|t| t.id == id) {
        return Ok(task);
    }

    let mut matches = tasks.iter().filter(|t| !id.is_empty() && t.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(task), None) => Ok(task),
        (Some(_), Some(_)) => Err(MypaError::InvalidState(format!(
            "task id prefix '{id}' is ambiguous"
        ))),
        (None, _) => Err(MypaError::NotFound(format!("task {id}"))),
    }
}
