// SPDX-License-Identifier: Apache-2.0

use super::response_contract::{empty_ok, parse_json_body, validation_response};
use super::with_store;
use crate::AppState;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use todo_model::{ListPatch, NewList};
use tracing::info;

pub(crate) async fn list_lists_handler(State(state): State<AppState>) -> Response {
    match with_store(&state, |store| store.list_lists()).await {
        Ok(lists) => Json(lists).into_response(),
        Err(resp) => resp,
    }
}

pub(crate) async fn create_list_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let new = match parse_json_body(body).map(|v| NewList::from_json(&v)) {
        Ok(Ok(new)) => new,
        Ok(Err(e)) => return validation_response(&e),
        Err(resp) => return resp,
    };
    match with_store(&state, move |store| store.create_list(new)).await {
        Ok(list) => {
            info!(list_id = %list.id, "list created");
            Json(list).into_response()
        }
        Err(resp) => resp,
    }
}

pub(crate) async fn update_list_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let patch = match parse_json_body(body).map(|v| ListPatch::from_json(&v)) {
        Ok(Ok(patch)) => patch,
        Ok(Err(e)) => return validation_response(&e),
        Err(resp) => return resp,
    };
    match with_store(&state, move |store| store.update_list(&id, &patch)).await {
        Ok(list) => Json(list).into_response(),
        Err(resp) => resp,
    }
}

pub(crate) async fn delete_list_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    match with_store(&state, move |store| store.delete_list(&id)).await {
        Ok(()) => empty_ok(),
        Err(resp) => resp,
    }
}
