//! API payload types for guest operations.
//!
//! Shared between the server and the client so both sides agree on the wire
//! format. Pure data, no I/O.

use serde::{Deserialize, Serialize};

use crate::serde::deserialize_optional_string;

use super::types::GuestRecord;

/// Body of `POST /guests`.
///
/// Both fields are optional at the wire level so a missing field becomes a
/// validation error instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGuestRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub image: Option<String>,
}

impl CreateGuestRequest {
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            image: Some(image.into()),
        }
    }
}

/// Response of `POST /guests`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGuestResponse {
    pub id: String,
    pub name: String,
    pub image: String,
}

impl From<GuestRecord> for CreateGuestResponse {
    fn from(record: GuestRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            image: record.image,
        }
    }
}

/// Response of `DELETE /guests`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteGuestResponse {
    pub success: bool,
}

/// Query string of `DELETE /guests?id=<id>`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteGuestQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub id: Option<String>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
