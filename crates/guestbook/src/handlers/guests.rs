//! Guest CRUD handlers.
//!
//! These handlers use the repository trait object from [`AppState`]; which
//! backend sits behind it is decided at startup.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use guestbook_core::guest::{
    CreateGuestRequest, CreateGuestResponse, DeleteGuestQuery, DeleteGuestResponse, GuestRecord,
    NewGuest,
};
use guestbook_core::storage::RepositoryError;

use crate::{handlers::ApiError, state::AppState};

pub const NAME_AND_IMAGE_REQUIRED: &str = "Name and image are required";
pub const INVALID_IMAGE: &str = "Invalid image payload";
pub const BODY_TOO_LARGE: &str = "Request body too large";
pub const GUEST_ID_REQUIRED: &str = "Guest ID is required";
pub const GUEST_NOT_FOUND: &str = "Guest not found";
pub const FETCH_GUESTS_FAILED: &str = "Failed to fetch guests";
pub const FETCH_GUEST_FAILED: &str = "Failed to fetch guest";
pub const CREATE_GUEST_FAILED: &str = "Failed to create guest";
pub const DELETE_GUEST_FAILED: &str = "Failed to delete guest";

/// List all guests, newest first (GET /guests).
pub async fn list_guests(
    State(state): State<AppState>,
) -> Result<Json<Vec<GuestRecord>>, ApiError> {
    let guests = state
        .guests
        .list_guests()
        .await
        .map_err(ApiError::repository(FETCH_GUESTS_FAILED))?;

    tracing::debug!(count = guests.len(), "Listed guests");

    Ok(Json(guests))
}

/// Create a guest (POST /guests).
///
/// The body is validated before the store is touched. Any body that cannot
/// be read as `{name, image}` gets the same 400 as a missing field.
pub async fn create_guest(
    State(state): State<AppState>,
    payload: Result<Json<CreateGuestRequest>, JsonRejection>,
) -> Result<Json<CreateGuestResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(BODY_TOO_LARGE)
        } else {
            tracing::debug!(error = %rejection.body_text(), "Unreadable create body");
            ApiError::BadRequest(NAME_AND_IMAGE_REQUIRED)
        }
    })?;

    let (Some(name), Some(image)) = (request.name, request.image) else {
        return Err(ApiError::BadRequest(NAME_AND_IMAGE_REQUIRED));
    };

    let guest =
        NewGuest::new(name, image).map_err(|_| ApiError::BadRequest(NAME_AND_IMAGE_REQUIRED))?;

    let record = state
        .guests
        .create_guest(guest)
        .await
        .map_err(|err| match err {
            RepositoryError::InvalidData(reason) => {
                tracing::warn!(%reason, "Rejected guest image");
                ApiError::BadRequest(INVALID_IMAGE)
            }
            other => ApiError::repository(CREATE_GUEST_FAILED)(other),
        })?;

    tracing::info!(guest_id = %record.id, name = %record.name, "Created guest");

    Ok(Json(record.into()))
}

/// Get a single guest by ID (GET /guests/{id}).
pub async fn get_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GuestRecord>, ApiError> {
    state
        .guests
        .get_guest(&id)
        .await
        .map_err(ApiError::repository(FETCH_GUEST_FAILED))?
        .map(Json)
        .ok_or(ApiError::NotFound(GUEST_NOT_FOUND))
}

/// Delete a guest named by the query string (DELETE /guests?id={id}).
pub async fn delete_guest_by_query(
    State(state): State<AppState>,
    Query(query): Query<DeleteGuestQuery>,
) -> Result<Json<DeleteGuestResponse>, ApiError> {
    let id = query.id.ok_or(ApiError::BadRequest(GUEST_ID_REQUIRED))?;
    delete_guest_impl(&state, &id).await
}

/// Delete a guest by ID (DELETE /guests/{id}).
pub async fn delete_guest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteGuestResponse>, ApiError> {
    delete_guest_impl(&state, &id).await
}

async fn delete_guest_impl(
    state: &AppState,
    id: &str,
) -> Result<Json<DeleteGuestResponse>, ApiError> {
    let deleted = state
        .guests
        .delete_guest(id)
        .await
        .map_err(ApiError::repository(DELETE_GUEST_FAILED))?;

    if !deleted {
        return Err(ApiError::NotFound(GUEST_NOT_FOUND));
    }

    tracing::info!(guest_id = %id, "Deleted guest");

    Ok(Json(DeleteGuestResponse { success: true }))
}
