// SPDX-License-Identifier: Apache-2.0

use crate::list::expect_object;
use crate::{string_member, JsonObject, ValidationError, INBOX_LIST_ID};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_TASK_STATUS: &str = "todo";
pub const DEFAULT_TASK_PRIORITY: &str = "none";
pub const DEFAULT_TASK_RECURRENCE: &str = "none";

/// Unit of work belonging to one list.
///
/// `list_id` is a soft reference: it is never checked against the lists
/// collection. `subtasks` entries are opaque to the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub list_id: String,
    pub title: String,
    pub notes: String,
    pub status: String,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<String>,
    pub recurrence: String,
    pub tags: Vec<String>,
    pub subtasks: Vec<Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: String::new(),
            list_id: INBOX_LIST_ID.to_string(),
            title: String::new(),
            notes: String::new(),
            status: DEFAULT_TASK_STATUS.to_string(),
            priority: DEFAULT_TASK_PRIORITY.to_string(),
            due_date: None,
            reminder: None,
            recurrence: DEFAULT_TASK_RECURRENCE.to_string(),
            tags: Vec::new(),
            subtasks: Vec::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

impl Task {
    /// Rebuilds a stored record member by member. Anything missing or of the
    /// wrong type takes its default; only a record without a string `id` is
    /// unusable.
    #[must_use]
    pub fn from_record(record: &Value) -> Option<Self> {
        let obj = record.as_object()?;
        let id = string_member(obj, "id")?;
        let defaults = Self::default();
        let text = |key: &str, default: String| string_member(obj, key).unwrap_or(default);
        Some(Self {
            id,
            list_id: text("listId", defaults.list_id),
            title: text("title", defaults.title),
            notes: text("notes", defaults.notes),
            status: text("status", defaults.status),
            priority: text("priority", defaults.priority),
            due_date: string_member(obj, "dueDate"),
            reminder: string_member(obj, "reminder"),
            recurrence: text("recurrence", defaults.recurrence),
            tags: string_items(obj, "tags"),
            subtasks: value_items(obj, "subtasks"),
            created_at: text("createdAt", defaults.created_at),
            updated_at: text("updatedAt", defaults.updated_at),
        })
    }
}

fn string_items(obj: &JsonObject, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn value_items(obj: &JsonObject, key: &str) -> Vec<Value> {
    obj.get(key)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Validated `POST /api/tasks` payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub list_id: String,
    pub title: String,
    pub notes: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<String>,
    pub reminder: Option<String>,
    pub recurrence: String,
    pub tags: Vec<String>,
    pub subtasks: Vec<Value>,
}

impl NewTask {
    /// `title` must be a string. Every other member falls back to its
    /// default when missing or of the wrong type; `dueDate` and `reminder`
    /// stay unset instead.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = expect_object(body)?;
        let title = string_member(obj, "title")
            .ok_or_else(|| ValidationError("title must be a string".to_string()))?;
        let or_default = |key: &str, default: &str| {
            string_member(obj, key).unwrap_or_else(|| default.to_string())
        };
        Ok(Self {
            list_id: or_default("listId", INBOX_LIST_ID),
            title,
            notes: or_default("notes", ""),
            status: or_default("status", DEFAULT_TASK_STATUS),
            priority: or_default("priority", DEFAULT_TASK_PRIORITY),
            due_date: string_member(obj, "dueDate"),
            reminder: string_member(obj, "reminder"),
            recurrence: or_default("recurrence", DEFAULT_TASK_RECURRENCE),
            tags: string_items(obj, "tags"),
            subtasks: value_items(obj, "subtasks"),
        })
    }

    #[must_use]
    pub fn into_task(self, id: String, now: &str) -> Task {
        Task {
            id,
            list_id: self.list_id,
            title: self.title,
            notes: self.notes,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            reminder: self.reminder,
            recurrence: self.recurrence,
            tags: self.tags,
            subtasks: self.subtasks,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}

/// Partial update for a task, one optional member per known attribute.
///
/// `id`, `createdAt`, `updatedAt` and unknown members are dropped during
/// deserialization. `dueDate: null` and `reminder: null` clear the field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    pub list_id: Option<String>,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::nullable::deserialize")]
    pub due_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::serde_helpers::nullable::deserialize")]
    pub reminder: Option<Option<String>>,
    pub recurrence: Option<String>,
    pub tags: Option<Vec<String>>,
    pub subtasks: Option<Vec<Value>>,
}

impl TaskPatch {
    /// Known members with the wrong JSON type are rejected as a whole.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        expect_object(body)?;
        Self::deserialize(body).map_err(|e| ValidationError(format!("invalid task patch: {e}")))
    }

    /// Overwrites the present fields and refreshes `updated_at`.
    pub fn apply(self, task: &mut Task, now: &str) {
        if let Some(v) = self.list_id {
            task.list_id = v;
        }
        if let Some(v) = self.title {
            task.title = v;
        }
        if let Some(v) = self.notes {
            task.notes = v;
        }
        if let Some(v) = self.status {
            task.status = v;
        }
        if let Some(v) = self.priority {
            task.priority = v;
        }
        if let Some(v) = self.due_date {
            task.due_date = v;
        }
        if let Some(v) = self.reminder {
            task.reminder = v;
        }
        if let Some(v) = self.recurrence {
            task.recurrence = v;
        }
        if let Some(v) = self.tags {
            task.tags = v;
        }
        if let Some(v) = self.subtasks {
            task.subtasks = v;
        }
        task.updated_at = now.to_string();
    }
}
