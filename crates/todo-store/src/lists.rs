// SPDX-License-Identifier: Apache-2.0

use crate::{StoreError, StoreErrorCode};
use todo_model::{ListPatch, NewList, TaskList, INBOX_LIST_ID};

/// Lists in insertion order. Pure in-memory; persistence is the caller's job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRegistry {
    lists: Vec<TaskList>,
}

impl ListRegistry {
    #[must_use]
    pub fn new(lists: Vec<TaskList>) -> Self {
        Self { lists }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[TaskList] {
        &self.lists
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id == id)
    }

    /// Puts the inbox back at the front if it is missing. Returns whether
    /// anything changed.
    pub fn ensure_inbox(&mut self, now: &str) -> bool {
        if self.get(INBOX_LIST_ID).is_some() {
            return false;
        }
        self.lists.insert(0, TaskList::inbox(now));
        true
    }

    pub fn create(&mut self, new: NewList, id: String, now: &str) -> TaskList {
        let list = new.into_list(id, now);
        self.lists.push(list.clone());
        list
    }

    pub fn update(
        &mut self,
        id: &str,
        patch: &ListPatch,
        now: &str,
    ) -> Result<TaskList, StoreError> {
        let list = self
            .lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::list_not_found(id))?;
        patch.apply(list, now);
        Ok(list.clone())
    }

    /// Removes the list if present. The inbox is refused.
    pub fn remove(&mut self, id: &str) -> Result<Option<TaskList>, StoreError> {
        if id == INBOX_LIST_ID {
            return Err(StoreError::new(
                StoreErrorCode::ProtectedList,
                "the inbox list cannot be deleted",
            ));
        }
        let idx = self.lists.iter().position(|l| l.id == id);
        Ok(idx.map(|idx| self.lists.remove(idx)))
    }
}
