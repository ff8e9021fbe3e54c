#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

mod error_mapping;

pub use error_mapping::{map_error, ApiErrorMapping};

pub const CRATE_NAME: &str = "todo-api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    InvalidJsonBody,
    ProtectedList,
    ListNotFound,
    TaskNotFound,
    RouteNotFound,
    PayloadTooLarge,
    StoreUnavailable,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationFailed => "ValidationFailed",
            Self::InvalidJsonBody => "InvalidJsonBody",
            Self::ProtectedList => "ProtectedList",
            Self::ListNotFound => "ListNotFound",
            Self::TaskNotFound => "TaskNotFound",
            Self::RouteNotFound => "RouteNotFound",
            Self::PayloadTooLarge => "PayloadTooLarge",
            Self::StoreUnavailable => "StoreUnavailable",
            Self::Internal => "Internal",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
    pub details: Value,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    #[must_use]
    pub fn validation_failed(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::ValidationFailed,
            "validation failed",
            json!({"reason": reason}),
        )
    }

    #[must_use]
    pub fn invalid_json_body(reason: &str) -> Self {
        Self::new(
            ApiErrorCode::InvalidJsonBody,
            "request body is not a JSON object",
            json!({"reason": reason}),
        )
    }

    #[must_use]
    pub fn route_not_found(method: &str, path: &str) -> Self {
        Self::new(
            ApiErrorCode::RouteNotFound,
            format!("no route for {method} {path}"),
            json!({"method": method, "path": path}),
        )
    }

    /// Wire envelope: `{"error": {...}}`.
    #[must_use]
    pub fn to_envelope(&self) -> Value {
        json!({"error": self})
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_serialize_as_their_names() {
        for code in [
            ApiErrorCode::ValidationFailed,
            ApiErrorCode::ProtectedList,
            ApiErrorCode::TaskNotFound,
            ApiErrorCode::StoreUnavailable,
        ] {
            let encoded = serde_json::to_value(code).expect("encode");
            assert_eq!(encoded, Value::String(code.as_str().to_string()));
        }
    }

    #[test]
    fn envelope_wraps_error_object() {
        let err = ApiError::route_not_found("PATCH", "/api/lists");
        let env = err.to_envelope();
        assert_eq!(env["error"]["code"], "RouteNotFound");
        assert_eq!(env["error"]["details"]["path"], "/api/lists");
        let back: ApiError = serde_json::from_value(env["error"].clone()).expect("decode");
        assert_eq!(back, err);
    }
}
