//! Liveness endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::api::middleware::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

/// GET /api/health - never touches storage
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running",
    })
}
