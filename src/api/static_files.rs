//! Landing page and static file serving
//!
//! Files are looked up in the configured static directory first, then in the
//! copy of `public/` embedded at build time.

use std::path::{Component, Path};

use axum::{
    extract::State,
    http::{header, Method, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;
use tokio::fs;

use crate::api::middleware::{ApiError, AppState};

/// Embedded landing page assets
#[derive(RustEmbed)]
#[folder = "public/"]
struct PublicAssets;

/// GET / - the landing page
pub async fn serve_index(State(state): State<AppState>) -> Response {
    match find_file(&state.static_dir, "index.html").await {
        Some(response) => response,
        None => route_not_found(),
    }
}

/// Fallback for every unmatched request
pub async fn serve_static(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return route_not_found();
    }

    let path = uri.path();
    let decoded = urlencoding::decode(path).unwrap_or_else(|_| path.into());
    if decoded == "/api" || decoded.starts_with("/api/") {
        return route_not_found();
    }

    let Some(relative) = sanitize_path(&decoded) else {
        tracing::debug!(path = %decoded, "Rejected static path");
        return route_not_found();
    };

    match find_file(&state.static_dir, &relative).await {
        Some(response) => response,
        None => route_not_found(),
    }
}

/// 404 for anything no route or file answers
pub fn route_not_found() -> Response {
    ApiError::not_found("Route not found").into_response()
}

async fn find_file(static_dir: &Path, relative: &str) -> Option<Response> {
    if let Ok(contents) = fs::read(static_dir.join(relative)).await {
        return Some(build_response(relative, contents));
    }

    PublicAssets::get(relative).map(|content| build_response(relative, content.data.into_owned()))
}

/// Reduce a request path to a relative path that cannot leave the static root.
///
/// Returns `None` for `..`, absolute or empty paths.
fn sanitize_path(path: &str) -> Option<String> {
    let mut parts = Vec::new();
    for component in Path::new(path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn build_response(path: &str, data: Vec<u8>) -> Response {
    let content_type = get_content_type(path);
    let cache_control = if content_type.starts_with("text/html") {
        "no-cache"
    } else {
        "public, max-age=3600"
    };

    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, cache_control),
        ],
        data,
    )
        .into_response()
}

/// Get content type from file extension
fn get_content_type(path: &str) -> &'static str {
    match path.rsplit('.').next().unwrap_or("") {
        "html" => "text/html; charset=utf-8",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff2" => "font/woff2",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
