// SPDX-License-Identifier: Apache-2.0

use super::response_contract::api_error_response;
use crate::AppState;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use std::path::{Component, Path, PathBuf};
use todo_api::ApiError;
use tracing::debug;

/// Catch-all: API paths get a JSON 404, everything else is looked up in the
/// static directory.
pub(crate) async fn static_fallback_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    let not_found = || {
        api_error_response(&ApiError::route_not_found(
            method.as_str(),
            uri.path(),
        ))
    };
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        return not_found();
    }
    if method != Method::GET && method != Method::HEAD {
        return not_found();
    }
    let Some(root) = state.api.static_dir.as_deref() else {
        return not_found();
    };
    let Some(file) = resolve_static_path(root, path) else {
        return not_found();
    };
    match tokio::fs::read(&file).await {
        Ok(bytes) => {
            let mut resp = (StatusCode::OK, bytes).into_response();
            let headers = resp.headers_mut();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(content_type_for(&file)),
            );
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
            resp
        }
        Err(e) => {
            debug!(path = %file.display(), error = %e, "static file unavailable");
            not_found()
        }
    }
}

/// Maps a request path under `root`. `/` and trailing slashes resolve to
/// `index.html`; any `..`, root or prefix component is refused.
pub(crate) fn resolve_static_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let mut resolved = root.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    if relative.is_empty() || relative.ends_with('/') {
        resolved.push("index.html");
    }
    Some(resolved)
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("webmanifest") => "application/manifest+json",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_directories_map_to_index() {
        let root = Path::new("static");
        assert_eq!(
            resolve_static_path(root, "/"),
            Some(PathBuf::from("static/index.html"))
        );
        assert_eq!(
            resolve_static_path(root, "/app/"),
            Some(PathBuf::from("static/app/index.html"))
        );
        assert_eq!(
            resolve_static_path(root, "/css/site.css"),
            Some(PathBuf::from("static/css/site.css"))
        );
    }

    #[test]
    fn traversal_is_refused() {
        let root = Path::new("static");
        assert_eq!(resolve_static_path(root, "/../secret"), None);
        assert_eq!(resolve_static_path(root, "/a/../../etc/passwd"), None);
    }

    #[test]
    fn content_types_follow_extension() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
    }
}
