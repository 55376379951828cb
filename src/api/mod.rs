//! API layer - HTTP handlers and routing
//!
//! Record endpoints live under `/api`:
//! - Contact message endpoints
//! - Blog post endpoints
//! - Gallery endpoints
//! - Health check
//!
//! `GET /` serves the landing page and other paths fall back to static files.

pub mod blogs;
pub mod common;
pub mod contacts;
pub mod gallery;
pub mod health;
pub mod json;
pub mod middleware;
pub mod static_files;

#[cfg(test)]
mod tests;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use json::JsonBody;
pub use middleware::{ApiError, AppState};

/// Build the `/api` router
pub fn build_api_router() -> Router<AppState> {
    Router::new()
        .nest("/contacts", contacts::router())
        .nest("/blogs", blogs::router())
        .nest("/gallery", gallery::router())
        .nest("/health", health::router())
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    Router::new()
        .route("/", get(static_files::serve_index))
        .nest("/api", build_api_router())
        .fallback(static_files::serve_static)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origin)),
        )
        .with_state(state)
}

/// `*` allows any origin; anything else is a single allowed origin
fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origin == "*" {
        return cors.allow_origin(Any);
    }

    match origin.parse::<HeaderValue>() {
        Ok(value) => cors.allow_origin(value),
        Err(e) => {
            tracing::warn!(origin, error = %e, "Invalid CORS origin, allowing any origin");
            cors.allow_origin(Any)
        }
    }
}
