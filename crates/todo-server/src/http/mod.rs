// SPDX-License-Identifier: Apache-2.0

pub(crate) mod health;
pub(crate) mod lists;
pub(crate) mod response_contract;
pub(crate) mod static_files;
pub(crate) mod tasks;

use crate::AppState;
use axum::http::{Method, Uri};
use axum::response::Response;
use response_contract::{api_error_response, store_error_response};
use std::sync::Arc;
use todo_api::ApiError;
use todo_store::{StoreError, StoreErrorCode, TodoStore};

pub(crate) async fn method_not_routed_handler(method: Method, uri: Uri) -> Response {
    api_error_response(&ApiError::route_not_found(method.as_str(), uri.path()))
}

/// Runs a store operation on the blocking pool; the store holds a std mutex
/// across a synchronous file write.
pub(crate) async fn with_store<T, F>(state: &AppState, op: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&TodoStore) -> Result<T, StoreError> + Send + 'static,
{
    let store: Arc<TodoStore> = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || op(&store))
        .await
        .map_err(|e| StoreError::new(StoreErrorCode::Internal, format!("store task failed: {e}")))
        .and_then(|result| result)
        .map_err(|e| store_error_response(&e))
}
