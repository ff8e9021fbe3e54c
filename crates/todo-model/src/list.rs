// SPDX-License-Identifier: Apache-2.0

use crate::{string_member, JsonObject, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const INBOX_LIST_ID: &str = "inbox";
pub const INBOX_LIST_NAME: &str = "Inbox";
pub const INBOX_LIST_ICON: &str = "📥";
pub const DEFAULT_LIST_ICON: &str = "🗂️";
pub const DEFAULT_LIST_COLOR: &str = "#3b82f6";

/// Named container that tasks belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaskList {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for TaskList {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            icon: DEFAULT_LIST_ICON.to_string(),
            color: DEFAULT_LIST_COLOR.to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}

impl TaskList {
    /// Rebuilds a stored record. Missing or non-string members take their
    /// defaults; a record without a string `id` yields `None`.
    #[must_use]
    pub fn from_record(record: &Value) -> Option<Self> {
        let obj = record.as_object()?;
        let id = string_member(obj, "id")?;
        let defaults = Self::default();
        let text = |key: &str, default: String| string_member(obj, key).unwrap_or(default);
        Some(Self {
            id,
            name: text("name", defaults.name),
            icon: text("icon", defaults.icon),
            color: text("color", defaults.color),
            created_at: text("createdAt", defaults.created_at),
            updated_at: text("updatedAt", defaults.updated_at),
        })
    }

    /// The protected list every store starts with.
    #[must_use]
    pub fn inbox(now: &str) -> Self {
        Self {
            id: INBOX_LIST_ID.to_string(),
            name: INBOX_LIST_NAME.to_string(),
            icon: INBOX_LIST_ICON.to_string(),
            color: DEFAULT_LIST_COLOR.to_string(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    #[must_use]
    pub fn is_inbox(&self) -> bool {
        self.id == INBOX_LIST_ID
    }
}

/// Validated `POST /api/lists` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewList {
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl NewList {
    /// `name` must be a string; a missing or non-string `icon`/`color` falls
    /// back to the defaults.
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = expect_object(body)?;
        let name = string_member(obj, "name")
            .ok_or_else(|| ValidationError("name must be a string".to_string()))?;
        Ok(Self {
            name,
            icon: string_member(obj, "icon").unwrap_or_else(|| DEFAULT_LIST_ICON.to_string()),
            color: string_member(obj, "color").unwrap_or_else(|| DEFAULT_LIST_COLOR.to_string()),
        })
    }

    #[must_use]
    pub fn into_list(self, id: String, now: &str) -> TaskList {
        TaskList {
            id,
            name: self.name,
            icon: self.icon,
            color: self.color,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}

/// Partial update for a list. Only string-typed members are taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

impl ListPatch {
    pub fn from_json(body: &Value) -> Result<Self, ValidationError> {
        let obj = expect_object(body)?;
        Ok(Self {
            name: string_member(obj, "name"),
            icon: string_member(obj, "icon"),
            color: string_member(obj, "color"),
        })
    }

    /// Overwrites the present fields and refreshes `updated_at`.
    pub fn apply(&self, list: &mut TaskList, now: &str) {
        if let Some(name) = &self.name {
            list.name.clone_from(name);
        }
        if let Some(icon) = &self.icon {
            list.icon.clone_from(icon);
        }
        if let Some(color) = &self.color {
            list.color.clone_from(color);
        }
        list.updated_at = now.to_string();
    }
}

pub(crate) fn expect_object(body: &Value) -> Result<&JsonObject, ValidationError> {
    body.as_object()
        .ok_or_else(|| ValidationError("request body must be a JSON object".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_list_defaults_icon_and_color() {
        let new = NewList::from_json(&json!({"name": "Work", "icon": 7})).expect("valid");
        assert_eq!(new.name, "Work");
        assert_eq!(new.icon, DEFAULT_LIST_ICON);
        assert_eq!(new.color, DEFAULT_LIST_COLOR);
    }

    #[test]
    fn new_list_requires_string_name() {
        assert!(NewList::from_json(&json!({})).is_err());
        assert!(NewList::from_json(&json!({"name": 3})).is_err());
        assert!(NewList::from_json(&json!(["name"])).is_err());
    }

    #[test]
    fn patch_ignores_non_string_members_and_keeps_created_at() {
        let mut list = TaskList::inbox("2024-01-01T00:00:00Z");
        let patch = ListPatch::from_json(&json!({"name": "Home", "color": false})).expect("patch");
        patch.apply(&mut list, "2024-01-02T00:00:00Z");
        assert_eq!(list.name, "Home");
        assert_eq!(list.color, DEFAULT_LIST_COLOR);
        assert_eq!(list.created_at, "2024-01-01T00:00:00Z");
        assert_eq!(list.updated_at, "2024-01-02T00:00:00Z");
    }

    #[test]
    fn from_record_tolerates_wrong_member_types() {
        let list = TaskList::from_record(&json!({"id": "2_1", "name": "Work", "color": 5}))
            .expect("usable record");
        assert_eq!(list.name, "Work");
        assert_eq!(list.icon, DEFAULT_LIST_ICON);
        assert_eq!(list.color, DEFAULT_LIST_COLOR);
        assert!(TaskList::from_record(&json!({"name": "no id"})).is_none());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(TaskList::inbox("t")).expect("json");
        assert_eq!(
            value,
            json!({
                "id": "inbox",
                "name": "Inbox",
                "icon": "📥",
                "color": "#3b82f6",
                "createdAt": "t",
                "updatedAt": "t"
            })
        );
    }
}
