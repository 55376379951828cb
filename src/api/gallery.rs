//! Gallery endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde_json::json;

use crate::api::common::{parse_record_id, CategoryQuery};
use crate::api::json::JsonBody;
use crate::api::middleware::{ApiError, AppState};
use crate::models::{CreateGalleryInput, GalleryCategory, GalleryItem};

/// Build the gallery router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_gallery).post(create_gallery_item))
        .route("/{id}", delete(delete_gallery_item))
}

/// GET /api/gallery
async fn list_gallery(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<GalleryItem>>, ApiError> {
    let items = state.gallery.list(query.parse::<GalleryCategory>()).await?;
    Ok(Json(items))
}

/// POST /api/gallery
async fn create_gallery_item(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateGalleryInput>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.gallery.create(&GalleryItem::from(input)).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// DELETE /api/gallery/{id}
async fn delete_gallery_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_record_id(&id)?;
    state.gallery.delete(id).await?;
    Ok(Json(json!({ "message": "Gallery item deleted" })))
}
