// SPDX-License-Identifier: Apache-2.0

use super::response_contract::{empty_ok, parse_json_body, validation_response};
use super::with_store;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::collections::HashMap;
use todo_model::{NewTask, TaskPatch};
use tracing::info;

pub(crate) async fn list_tasks_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let list_id = params.get("listId").cloned();
    match with_store(&state, move |store| store.list_tasks(list_id.as_deref())).await {
        Ok(tasks) => Json(tasks).into_response(),
        Err(resp) => resp,
    }
}

pub(crate) async fn create_task_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let new = match parse_json_body(body).map(|v| NewTask::from_json(&v)) {
        Ok(Ok(new)) => new,
        Ok(Err(e)) => return validation_response(&e),
        Err(resp) => return resp,
    };
    match with_store(&state, move |store| store.create_task(new)).await {
        Ok(task) => {
            info!(task_id = %task.id, list_id = %task.list_id, "task created");
            Json(task).into_response()
        }
        Err(resp) => resp,
    }
}

pub(crate) async fn update_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let patch = match parse_json_body(body).map(|v| TaskPatch::from_json(&v)) {
        Ok(Ok(patch)) => patch,
        Ok(Err(e)) => return validation_response(&e),
        Err(resp) => return resp,
    };
    match with_store(&state, move |store| store.update_task(&id, patch)).await {
        Ok(task) => Json(task).into_response(),
        Err(resp) => resp,
    }
}

pub(crate) async fn delete_task_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match with_store(&state, move |store| store.delete_task(&id)).await {
        Ok(()) => empty_ok(),
        Err(resp) => resp,
    }
}
