//! Blog post endpoints
//!
//! - GET /api/blogs?category= - List posts, newest first
//! - GET /api/blogs/{id} - Get one post
//! - POST /api/blogs - Create a post
//! - PUT /api/blogs/{id} - Merge fields into a post
//! - DELETE /api/blogs/{id} - Remove a post

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::api::common::{parse_record_id, CategoryQuery};
use crate::api::json::JsonBody;
use crate::api::middleware::{ApiError, AppState};
use crate::models::{BlogCategory, BlogPost, CreateBlogInput, UpdateBlogInput};

const NOT_FOUND: &str = "Blog not found";

/// Build the blogs router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_blogs).post(create_blog))
        .route("/{id}", get(get_blog).put(update_blog).delete(delete_blog))
}

/// GET /api/blogs
async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<Json<Vec<BlogPost>>, ApiError> {
    let posts = state.blogs.list(query.parse::<BlogCategory>()).await?;
    Ok(Json(posts))
}

/// GET /api/blogs/{id}
async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    let id = parse_record_id(&id)?;
    state
        .blogs
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// POST /api/blogs
///
/// Required fields are left to the storage schema; a post missing one fails
/// as a server error.
async fn create_blog(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateBlogInput>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.blogs.create(&input.into_draft()).await?;

    tracing::info!(id = %post.id, category = %post.category, "Blog post created");

    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /api/blogs/{id}
///
/// An unknown id is a 404 rather than a 200 with a `null` body.
async fn update_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateBlogInput>,
) -> Result<Json<BlogPost>, ApiError> {
    let id = parse_record_id(&id)?;
    state
        .blogs
        .update(id, &input)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// DELETE /api/blogs/{id}
async fn delete_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_record_id(&id)?;
    if state.blogs.delete(id).await? {
        tracing::info!(%id, "Blog post deleted");
    }

    Ok(Json(json!({ "message": "Blog deleted" })))
}
