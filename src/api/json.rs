//! JSON body extractor whose rejections use the API error envelope

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::api::middleware::ApiError;

/// Like [`axum::Json`], but a malformed body or a missing
/// `Content-Type: application/json` header becomes a 400 `{"error": ...}`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::validation_error(rejection.body_text())
    }
}
