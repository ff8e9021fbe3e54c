// SPDX-License-Identifier: Apache-2.0

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use todo_api::{map_error, ApiError, ApiErrorCode};
use todo_store::StoreError;
use tracing::{error, warn};

#[must_use]
pub(crate) fn api_error_response(err: &ApiError) -> Response {
    let mapping = map_error(err);
    let status =
        StatusCode::from_u16(mapping.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut resp = (status, Json(err.to_envelope())).into_response();
    if mapping.retryable {
        resp.headers_mut()
            .insert("retry-after", HeaderValue::from_static("1"));
    }
    resp
}

#[must_use]
pub(crate) fn store_error_response(err: &StoreError) -> Response {
    if err.is_fault() {
        error!(code = err.code.as_str(), error = %err.message, "store operation failed");
    }
    let api = ApiError::new(
        err.code.as_api_code(),
        err.message.clone(),
        json!({"store_code": err.code.as_str()}),
    );
    api_error_response(&api)
}

#[must_use]
pub(crate) fn validation_response(err: &todo_model::ValidationError) -> Response {
    api_error_response(&ApiError::validation_failed(&err.0))
}

/// 200 with an empty body, used by deletes.
#[must_use]
pub(crate) fn empty_ok() -> Response {
    StatusCode::OK.into_response()
}

/// Decodes a request body as a JSON value regardless of `Content-Type`.
pub(crate) fn parse_json_body(body: Result<Bytes, BytesRejection>) -> Result<Value, Response> {
    let bytes = body.map_err(|rejection| {
        let status = rejection.status();
        warn!(status = status.as_u16(), "request body rejected");
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            api_error_response(&ApiError::new(
                ApiErrorCode::PayloadTooLarge,
                "request body too large",
                json!({}),
            ))
        } else {
            api_error_response(&ApiError::invalid_json_body(&rejection.body_text()))
        }
    })?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| api_error_response(&ApiError::invalid_json_body(&e.to_string())))?;
    if !value.is_object() {
        return Err(api_error_response(&ApiError::invalid_json_body(
            "expected a JSON object",
        )));
    }
    Ok(value)
}
