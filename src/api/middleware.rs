//! Shared request state and the error envelope returned by every handler

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::db::repositories::{
    BlogRepository, ContactRepository, GalleryRepository, SqlxBlogRepository,
    SqlxContactRepository, SqlxGalleryRepository,
};
use crate::db::DynDatabasePool;
use crate::models::ValidationError;

/// Message sent for every storage or server failure
pub const SERVER_ERROR: &str = "Server error";

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub gallery: Arc<dyn GalleryRepository>,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    /// Wire the sqlx repositories onto one pool
    pub fn new(pool: DynDatabasePool, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            contacts: SqlxContactRepository::boxed(pool.clone()),
            blogs: SqlxBlogRepository::boxed(pool.clone()),
            gallery: SqlxGalleryRepository::boxed(pool),
            static_dir: Arc::new(static_dir.into()),
        }
    }
}

/// Error response for API errors, rendered as `{"error": message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Storage failures never leak their cause to the client
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "Request failed");
        Self::internal_error(SERVER_ERROR)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::validation_error(err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_error_envelope() {
        let (status, body) = body_json(ApiError::not_found("Blog not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Blog not found" }));
    }

    #[tokio::test]
    async fn test_anyhow_error_is_generic() {
        let err = anyhow::anyhow!("no such table: blogs").context("Failed to list blogs");
        let (status, body) = body_json(ApiError::from(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Server error" }));
    }

    #[test]
    fn test_validation_error_is_bad_request() {
        let error = ApiError::from(ValidationError::new("All fields are required"));
        assert_eq!(error.status, StatusCode::BAD_REQUEST);
        assert_eq!(error.message, "All fields are required");
    }
}
