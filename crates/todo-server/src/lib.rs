#![forbid(unsafe_code)]

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, put};
use axum::Router;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use todo_store::TodoStore;

mod config;
mod http;
mod middleware;

pub use config::{
    ApiConfig, ServerConfig, CONFIG_SCHEMA_VERSION, ENV_BIND, ENV_DATA_DIR, ENV_LOG_JSON,
    ENV_MAX_BODY_BYTES, ENV_SHUTDOWN_DRAIN_MS, ENV_STATIC_DIR,
};

pub const CRATE_NAME: &str = "todo-server";

/// Shared by every handler. The store is injected, never global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TodoStore>,
    pub api: ApiConfig,
    pub(crate) request_id_seed: Arc<AtomicU64>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self::with_config(store, ApiConfig::default())
    }

    #[must_use]
    pub fn with_config(store: Arc<TodoStore>, api: ApiConfig) -> Self {
        Self {
            store,
            api,
            request_id_seed: Arc::new(AtomicU64::new(1)),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(http::health::healthz_handler))
        .route("/api/version", get(http::health::version_handler))
        .route(
            "/api/lists",
            get(http::lists::list_lists_handler)
                .post(http::lists::create_list_handler)
                .fallback(http::method_not_routed_handler),
        )
        .route(
            "/api/lists/:id",
            put(http::lists::update_list_handler)
                .delete(http::lists::delete_list_handler)
                .fallback(http::method_not_routed_handler),
        )
        .route(
            "/api/tasks",
            get(http::tasks::list_tasks_handler)
                .post(http::tasks::create_task_handler)
                .fallback(http::method_not_routed_handler),
        )
        .route(
            "/api/tasks/:id",
            put(http::tasks::update_task_handler)
                .delete(http::tasks::delete_task_handler)
                .fallback(http::method_not_routed_handler),
        )
        .fallback(http::static_files::static_fallback_handler)
        .layer(from_fn_with_state(
            state.clone(),
            middleware::request_tracing::request_tracing_middleware,
        ))
        .layer(DefaultBodyLimit::max(state.api.max_body_bytes))
        .with_state(state)
}
