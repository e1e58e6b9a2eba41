//! Serves image blobs written by the blob-backed repository.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};

use crate::{handlers::ApiError, state::AppState};

pub const IMAGE_NOT_FOUND: &str = "Image not found";
pub const FETCH_IMAGE_FAILED: &str = "Failed to fetch image";

/// Blob keys are never reused, so responses can be cached forever.
const IMMUTABLE: &str = "public, max-age=31536000, immutable";

/// Image bytes never run as a document on this origin.
const IMAGE_CSP: &str = "default-src 'none'; style-src 'unsafe-inline'; sandbox";

/// GET /images/{key} - raw image bytes with their stored content type.
pub async fn get_image(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let Some(blobs) = state.blobs.as_ref() else {
        return Err(ApiError::NotFound(IMAGE_NOT_FOUND));
    };

    let blob = blobs
        .get(&key)
        .await
        .map_err(ApiError::repository(FETCH_IMAGE_FAILED))?
        .ok_or(ApiError::NotFound(IMAGE_NOT_FOUND))?;

    Ok((
        [
            (header::CONTENT_TYPE, blob.content_type),
            (header::CACHE_CONTROL, IMMUTABLE.to_string()),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
            (header::CONTENT_SECURITY_POLICY, IMAGE_CSP.to_string()),
        ],
        blob.data,
    )
        .into_response())
}
