use axum::Json;
use serde_json::{json, Value};

pub(crate) async fn healthz_handler() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

pub(crate) async fn version_handler() -> Json<Value> {
    Json(json!({
        "name": crate::CRATE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "config_schema_version": crate::CONFIG_SCHEMA_VERSION,
    }))
}
