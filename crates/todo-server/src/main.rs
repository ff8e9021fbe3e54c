#![forbid(unsafe_code)]

use std::sync::Arc;
use todo_server::{build_router, AppState, ServerConfig};
use todo_store::TodoStore;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let (Ok(mut sigterm), Ok(mut sigint)) = (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) else {
            let _ = tokio::signal::ctrl_c().await;
            return;
        };
        tokio::select! {
            _ = sigterm.recv() => {}
            _ = sigint.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cfg = ServerConfig::from_env()?;
    init_tracing(cfg.log_json);
    match serde_json::to_string(&cfg) {
        Ok(resolved) => info!(config = %resolved, "config resolved"),
        Err(e) => warn!(error = %e, "config not serializable"),
    }

    let store = TodoStore::open(&cfg.data_dir).map_err(|e| format!("open store: {e}"))?;
    let state = AppState::with_config(Arc::new(store), cfg.api.clone());
    let app = build_router(state);

    let listener = TcpListener::bind(cfg.bind_addr)
        .await
        .map_err(|e| format!("bind {} failed: {e}", cfg.bind_addr))?;
    info!(
        bind = %cfg.bind_addr,
        data_dir = %cfg.data_dir.display(),
        static_dir = ?cfg.api.static_dir,
        "todo-server listening"
    );
    let drain = cfg.shutdown_drain;
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            wait_for_shutdown_signal().await;
            info!(drain_ms = drain.as_millis() as u64, "shutdown requested");
            tokio::time::sleep(drain).await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
