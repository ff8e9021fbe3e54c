#![forbid(unsafe_code)]

use std::fmt::{Display, Formatter};
use todo_api::ApiErrorCode;

mod document;
mod lists;
mod paths;
mod store;
mod tasks;

pub use document::{load_document, save_document, LoadOutcome};
pub use lists::ListRegistry;
pub use paths::{DataPaths, LISTS_FILE_NAME, TASKS_FILE_NAME};
pub use store::TodoStore;
pub use tasks::TaskRegistry;

pub const CRATE_NAME: &str = "todo-store";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    Validation,
    ListNotFound,
    TaskNotFound,
    ProtectedList,
    Io,
    Serialize,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::ListNotFound => "list_not_found",
            Self::TaskNotFound => "task_not_found",
            Self::ProtectedList => "protected_list",
            Self::Io => "io_error",
            Self::Serialize => "serialize_error",
            Self::Internal => "internal_error",
        }
    }

    #[must_use]
    pub const fn as_api_code(self) -> ApiErrorCode {
        match self {
            Self::Validation => ApiErrorCode::ValidationFailed,
            Self::ListNotFound => ApiErrorCode::ListNotFound,
            Self::TaskNotFound => ApiErrorCode::TaskNotFound,
            Self::ProtectedList => ApiErrorCode::ProtectedList,
            Self::Io | Self::Serialize => ApiErrorCode::StoreUnavailable,
            Self::Internal => ApiErrorCode::Internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn list_not_found(id: &str) -> Self {
        Self::new(StoreErrorCode::ListNotFound, format!("list not found: {id}"))
    }

    #[must_use]
    pub fn task_not_found(id: &str) -> Self {
        Self::new(StoreErrorCode::TaskNotFound, format!("task not found: {id}"))
    }

    /// Persistence faults, as opposed to caller mistakes.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(
            self.code,
            StoreErrorCode::Io | StoreErrorCode::Serialize | StoreErrorCode::Internal
        )
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<todo_model::ValidationError> for StoreError {
    fn from(err: todo_model::ValidationError) -> Self {
        Self::new(StoreErrorCode::Validation, err.0)
    }
}
