// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use todo_model::{NewTask, Task, TaskPatch};

/// Tasks in insertion order. Every lookup is a linear scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
}

impl TaskRegistry {
    #[must_use]
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks, or only those of `list_id` when it is given and non-empty.
    #[must_use]
    pub fn list_by_filter(&self, list_id: Option<&str>) -> Vec<Task> {
        match list_id.filter(|id| !id.is_empty()) {
            Some(id) => self
                .tasks
                .iter()
                .filter(|t| t.list_id == id)
                .cloned()
                .collect(),
            None => self.tasks.clone(),
        }
    }

    pub fn create(&mut self, new: NewTask, id: String, now: &str) -> Task {
        let task = new.into_task(id, now);
        self.tasks.push(task.clone());
        task
    }

    pub fn update(&mut self, id: &str, patch: TaskPatch, now: &str) -> Result<Task, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::task_not_found(id))?;
        patch.apply(task, now);
        Ok(task.clone())
    }

    pub fn remove(&mut self, id: &str) -> Result<Task, StoreError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::task_not_found(id))?;
        Ok(self.tasks.remove(idx))
    }

    /// Cascade step of a list delete. Returns how many tasks went away.
    pub fn remove_by_list(&mut self, list_id: &str) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.list_id != list_id);
        before - self.tasks.len()
    }
}
