// SPDX-License-Identifier: Apache-2.0

use crate::document::{load_document, save_document, LoadOutcome};
use crate::{DataPaths, ListRegistry, StoreError, StoreErrorCode, TaskRegistry};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use todo_model::{
    now_timestamp, IdGenerator, ListPatch, NewList, NewTask, Task, TaskList, TaskPatch,
};
use tracing::{info, warn};

struct StoreState {
    lists: ListRegistry,
    tasks: TaskRegistry,
}

/// Lists and tasks behind one lock, mirrored to `lists.json` and `tasks.json`.
///
/// Every operation holds the lock for its whole duration, disk write
/// included. When a write fails the in-memory change is undone, so memory
/// always matches what is on disk.
pub struct TodoStore {
    paths: DataPaths,
    ids: IdGenerator,
    state: Mutex<StoreState>,
}

impl TodoStore {
    /// Creates `data_dir` if needed and loads both documents. A missing or
    /// unparsable file falls back to its default; inside a readable document
    /// each record is rebuilt on its own and only records without an id are
    /// dropped. `lists.json` is written when the inbox had to be seeded,
    /// unless the file on disk was unparsable.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).map_err(|e| {
            StoreError::new(
                StoreErrorCode::Io,
                format!("create data dir {}: {e}", data_dir.display()),
            )
        })?;
        let paths = DataPaths::new(data_dir);
        let now = now_timestamp();

        let (lists, lists_outcome) = load_document::<Vec<Value>>(&paths.lists_file, Vec::new());
        let (tasks, tasks_outcome) = load_document::<Vec<Value>>(&paths.tasks_file, Vec::new());
        let mut lists = ListRegistry::new(decode_records(
            &paths.lists_file,
            lists,
            TaskList::from_record,
        ));
        let tasks = TaskRegistry::new(decode_records(&paths.tasks_file, tasks, Task::from_record));

        let repaired = lists.ensure_inbox(&now);
        if repaired && lists_outcome == LoadOutcome::File {
            warn!(path = %paths.lists_file.display(), "inbox list was missing; restored");
        }
        if repaired && lists_outcome != LoadOutcome::Corrupt {
            save_document(&paths.lists_file, lists.as_slice())?;
        }
        info!(
            data_dir = %paths.root.display(),
            lists = lists.len(),
            tasks = tasks.len(),
            lists_fallback = lists_outcome.used_fallback(),
            tasks_fallback = tasks_outcome.used_fallback(),
            "todo store opened"
        );

        Ok(Self {
            paths,
            ids: IdGenerator::new(),
            state: Mutex::new(StoreState { lists, tasks }),
        })
    }

    #[must_use]
    pub fn paths(&self) -> &DataPaths {
        &self.paths
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreState>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "store lock poisoned"))
    }

    pub fn list_lists(&self) -> Result<Vec<TaskList>, StoreError> {
        Ok(self.lock()?.lists.as_slice().to_vec())
    }

    pub fn create_list(&self, new: NewList) -> Result<TaskList, StoreError> {
        let mut state = self.lock()?;
        let before = state.lists.clone();
        let list = state.lists.create(new, self.ids.next_id(), &now_timestamp());
        self.persist_lists(&mut state, before)?;
        Ok(list)
    }

    pub fn update_list(&self, id: &str, patch: &ListPatch) -> Result<TaskList, StoreError> {
        let mut state = self.lock()?;
        let before = state.lists.clone();
        let list = state.lists.update(id, patch, &now_timestamp())?;
        self.persist_lists(&mut state, before)?;
        Ok(list)
    }

    /// Deletes a list and every task whose `listId` names it.
    ///
    /// An unknown id is not an error: tasks pointing at it are still swept.
    /// `tasks.json` is written before `lists.json`, so an interrupted delete
    /// leaves at worst an empty list, never orphaned tasks.
    pub fn delete_list(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let lists_before = state.lists.clone();
        let tasks_before = state.tasks.clone();
        let removed = state.lists.remove(id)?;
        let swept = state.tasks.remove_by_list(id);

        if swept > 0 {
            if let Err(e) = save_document(&self.paths.tasks_file, state.tasks.as_slice()) {
                state.lists = lists_before;
                state.tasks = tasks_before;
                return Err(e);
            }
        }
        if removed.is_some() {
            self.persist_lists(&mut state, lists_before)?;
        }
        info!(
            list_id = id,
            found = removed.is_some(),
            tasks_removed = swept,
            "list deleted"
        );
        Ok(())
    }

    pub fn list_tasks(&self, list_id: Option<&str>) -> Result<Vec<Task>, StoreError> {
        Ok(self.lock()?.tasks.list_by_filter(list_id))
    }

    pub fn create_task(&self, new: NewTask) -> Result<Task, StoreError> {
        let mut state = self.lock()?;
        let before = state.tasks.clone();
        let task = state.tasks.create(new, self.ids.next_id(), &now_timestamp());
        self.persist_tasks(&mut state, before)?;
        Ok(task)
    }

    pub fn update_task(&self, id: &str, patch: TaskPatch) -> Result<Task, StoreError> {
        let mut state = self.lock()?;
        let before = state.tasks.clone();
        let task = state.tasks.update(id, patch, &now_timestamp())?;
        self.persist_tasks(&mut state, before)?;
        Ok(task)
    }

    pub fn delete_task(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let before = state.tasks.clone();
        state.tasks.remove(id)?;
        self.persist_tasks(&mut state, before)
    }

    fn persist_lists(
        &self,
        state: &mut StoreState,
        before: ListRegistry,
    ) -> Result<(), StoreError> {
        save_document(&self.paths.lists_file, state.lists.as_slice()).inspect_err(|_| {
            state.lists = before;
        })
    }

    fn persist_tasks(
        &self,
        state: &mut StoreState,
        before: TaskRegistry,
    ) -> Result<(), StoreError> {
        save_document(&self.paths.tasks_file, state.tasks.as_slice()).inspect_err(|_| {
            state.tasks = before;
        })
    }
}

/// Keeps every record `decode` accepts, in document order.
fn decode_records<T>(
    path: &Path,
    records: Vec<Value>,
    decode: fn(&Value) -> Option<T>,
) -> Vec<T> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            let decoded = decode(record);
            if decoded.is_none() {
                warn!(path = %path.display(), index, "record without a string id dropped");
            }
            decoded
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use todo_model::INBOX_LIST_ID;

    #[test]
    fn open_seeds_inbox_on_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TodoStore::open(&dir.path().join("data")).expect("open");
        let lists = store.list_lists().expect("lists");
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].id, INBOX_LIST_ID);
        assert!(store.paths().lists_file.exists());
        assert!(!store.paths().tasks_file.exists());
    }

    #[test]
    fn failed_write_rolls_back_memory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = dir.path().join("data");
        let store = TodoStore::open(&data).expect("open");
        fs::remove_dir_all(&data).expect("remove data dir");
        fs::write(&data, b"not a directory").expect("block data dir");

        let new = NewTask::from_json(&json!({"title": "doomed"})).expect("valid");
        let err = store.create_task(new).expect_err("write must fail");
        assert_eq!(err.code, StoreErrorCode::Io);
        assert!(err.is_fault());
        assert!(store.list_tasks(None).expect("tasks").is_empty());
    }

    #[test]
    fn failed_cascade_write_restores_lists_and_tasks() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data = dir.path().join("data");
        let store = TodoStore::open(&data).expect("open");
        let work = store
            .create_list(NewList::from_json(&json!({"name": "Work"})).expect("valid"))
            .expect("list");
        let task = NewTask::from_json(&json!({"title": "w1", "listId": work.id})).expect("valid");
        store.create_task(task).expect("task");
        let lists_before = store.list_lists().expect("lists");
        let tasks_before = store.list_tasks(None).expect("tasks");

        fs::remove_dir_all(&data).expect("remove data dir");
        fs::write(&data, b"not a directory").expect("block data dir");

        let err = store.delete_list(&work.id).expect_err("write must fail");
        assert_eq!(err.code, StoreErrorCode::Io);
        assert_eq!(store.list_lists().expect("lists"), lists_before);
        assert_eq!(store.list_tasks(None).expect("tasks"), tasks_before);
    }
}
