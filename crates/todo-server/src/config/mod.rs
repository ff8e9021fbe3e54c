use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: &str = "1";

pub const ENV_BIND: &str = "TODO_BIND";
pub const ENV_DATA_DIR: &str = "TODO_DATA_DIR";
pub const ENV_STATIC_DIR: &str = "TODO_STATIC_DIR";
pub const ENV_LOG_JSON: &str = "TODO_LOG_JSON";
pub const ENV_MAX_BODY_BYTES: &str = "TODO_MAX_BODY_BYTES";
pub const ENV_SHUTDOWN_DRAIN_MS: &str = "TODO_SHUTDOWN_DRAIN_MS";

/// Knobs the router reads on every request.
#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub static_dir: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
            static_dir: Some(PathBuf::from("static")),
        }
    }
}

/// Process-level settings resolved once at startup.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub log_json: bool,
    pub shutdown_drain: Duration,
    pub api: ApiConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            data_dir: PathBuf::from("data"),
            log_json: true,
            shutdown_drain: Duration::ZERO,
            api: ApiConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unset or unparsable numeric/bool values keep their defaults; an
    /// unparsable bind address is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let bind_addr = match lookup(ENV_BIND) {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| format!("invalid {ENV_BIND} {raw}: {e}"))?,
            None => defaults.bind_addr,
        };
        let data_dir = lookup(ENV_DATA_DIR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map_or(defaults.data_dir, PathBuf::from);
        let static_dir = match lookup(ENV_STATIC_DIR) {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(PathBuf::from(raw.trim())),
            None => defaults.api.static_dir,
        };

        Ok(Self {
            bind_addr,
            data_dir,
            log_json: env_bool(&lookup, ENV_LOG_JSON, defaults.log_json),
            shutdown_drain: Duration::from_millis(env_u64(&lookup, ENV_SHUTDOWN_DRAIN_MS, 0)),
            api: ApiConfig {
                max_body_bytes: env_usize(
                    &lookup,
                    ENV_MAX_BODY_BYTES,
                    defaults.api.max_body_bytes,
                ),
                static_dir,
            },
        })
    }
}

fn env_bool<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str, default: bool) -> bool {
    lookup(name)
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str, default: u64) -> u64 {
    lookup(name)
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize<F: Fn(&str) -> Option<String>>(lookup: &F, name: &str, default: usize) -> usize {
    lookup(name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<ServerConfig, String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_match_documented_values() {
        let cfg = from_pairs(&[]).expect("defaults");
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.api.static_dir, Some(PathBuf::from("static")));
        assert!(cfg.log_json);
        assert_eq!(cfg.api.max_body_bytes, 65536);
    }

    #[test]
    fn overrides_are_applied() {
        let cfg = from_pairs(&[
            (ENV_BIND, "127.0.0.1:9000"),
            (ENV_DATA_DIR, "/tmp/todo"),
            (ENV_STATIC_DIR, ""),
            (ENV_LOG_JSON, "no"),
            (ENV_MAX_BODY_BYTES, "1024"),
            (ENV_SHUTDOWN_DRAIN_MS, "250"),
        ])
        .expect("config");
        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.data_dir, PathBuf::from("/tmp/todo"));
        assert_eq!(cfg.api.static_dir, None);
        assert!(!cfg.log_json);
        assert_eq!(cfg.api.max_body_bytes, 1024);
        assert_eq!(cfg.shutdown_drain, Duration::from_millis(250));
    }

    #[test]
    fn resolved_config_serializes_for_the_startup_log() {
        let cfg = from_pairs(&[(ENV_STATIC_DIR, "")]).expect("config");
        let value = serde_json::to_value(&cfg).expect("serialize");
        assert_eq!(value["bind_addr"], "0.0.0.0:8080");
        assert_eq!(value["data_dir"], "data");
        assert_eq!(value["api"]["max_body_bytes"], 65536);
        assert!(value["api"]["static_dir"].is_null());
    }

    #[test]
    fn garbage_numbers_keep_defaults_but_bad_bind_fails() {
        let cfg = from_pairs(&[(ENV_MAX_BODY_BYTES, "lots"), (ENV_LOG_JSON, "maybe")])
            .expect("config");
        assert_eq!(cfg.api.max_body_bytes, 65536);
        assert!(cfg.log_json);
        assert!(from_pairs(&[(ENV_BIND, "localhost")]).is_err());
    }
}
