//! Contact message endpoints
//!
//! - POST /api/contacts - Submit a message
//! - GET /api/contacts - List messages, newest first
//! - GET /api/contacts/{id} - Get one message
//! - PUT /api/contacts/{id} - Change a message's status

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::api::common::parse_record_id;
use crate::api::json::JsonBody;
use crate::api::middleware::{ApiError, AppState};
use crate::models::{Contact, CreateContactInput, UpdateContactInput};

const NOT_FOUND: &str = "Contact not found";
const RECEIVED: &str = "Message received! Thank you for contacting us.";

/// Response for a successful submission
#[derive(Debug, Serialize)]
pub struct ContactCreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub contact: Contact,
}

/// Build the contacts router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contacts).post(create_contact))
        .route("/{id}", get(get_contact).put(update_contact))
}

/// POST /api/contacts
async fn create_contact(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateContactInput>,
) -> Result<impl IntoResponse, ApiError> {
    let submission = input.validate()?;
    let contact = state.contacts.create(&Contact::new(submission)).await?;

    tracing::info!(id = %contact.id, "Contact message received");

    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            success: true,
            message: RECEIVED,
            contact,
        }),
    ))
}

/// GET /api/contacts
async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.contacts.list().await?))
}

/// GET /api/contacts/{id}
async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_record_id(&id)?;
    state
        .contacts
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

/// PUT /api/contacts/{id}
///
/// Only `status` is updatable; a body without it returns the record as is.
/// An unknown id is a 404 rather than a 200 with a `null` body.
async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateContactInput>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_record_id(&id)?;
    let contact = match input.status {
        Some(status) => state.contacts.update_status(id, status).await?,
        None => state.contacts.get_by_id(id).await?,
    };

    contact.map(Json).ok_or_else(|| ApiError::not_found(NOT_FOUND))
}
