#![forbid(unsafe_code)]
//! Todo model SSOT.
//!
//! Entities persisted by the store, the payloads used to create them, and the
//! typed patches used to update them. The wire shape is camelCase JSON.

mod id;
mod list;
pub mod serde_helpers;
mod task;
mod time;

use std::fmt::{Display, Formatter};

pub use id::IdGenerator;
pub use list::{
    ListPatch, NewList, TaskList, DEFAULT_LIST_COLOR, DEFAULT_LIST_ICON, INBOX_LIST_ICON,
    INBOX_LIST_ID, INBOX_LIST_NAME,
};
pub use task::{
    NewTask, Task, TaskPatch, DEFAULT_TASK_PRIORITY, DEFAULT_TASK_RECURRENCE,
    DEFAULT_TASK_STATUS,
};
pub use time::{format_timestamp, now_timestamp, TIMESTAMP_FORMAT};

pub const CRATE_NAME: &str = "todo-model";

/// Malformed or missing request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

pub(crate) type JsonObject = serde_json::Map<String, serde_json::Value>;

pub(crate) fn string_member(obj: &JsonObject, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}
