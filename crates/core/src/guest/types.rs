use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::id::generate_guest_id;

/// A guest invited to the event.
///
/// Records are immutable once created; the only mutation a store supports is
/// deleting the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    /// Public lookup key, embedded in the thank-you link.
    pub id: String,
    pub name: String,
    /// Inline `data:` URL or a URL pointing at externally hosted bytes.
    pub image: String,
    pub created_at: DateTime<Utc>,
}

impl GuestRecord {
    /// Materializes a validated [`NewGuest`] with a fresh id and the current time.
    pub fn create(guest: NewGuest) -> Self {
        Self::create_at(guest, Utc::now())
    }

    /// Same as [`GuestRecord::create`] with an explicit creation time.
    pub fn create_at(guest: NewGuest, created_at: DateTime<Utc>) -> Self {
        Self {
            id: generate_guest_id(created_at),
            name: guest.name,
            image: guest.image,
            created_at,
        }
    }

    /// Sets a specific ID for this record (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// Validated input for creating a guest.
///
/// The fields are private so a `NewGuest` can only exist once both the name
/// and the image have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    name: String,
    image: String,
}

impl NewGuest {
    /// Validates the raw create input.
    ///
    /// A name or image that is empty after trimming is rejected. The name is
    /// stored exactly as given.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }

        let image = image.into();
        if image.trim().is_empty() {
            return Err(ValidationError::MissingImage);
        }

        Ok(Self { name, image })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Returns a copy of this guest pointing at a different image.
    ///
    /// Used by stores that move image bytes out of band and keep only a URL.
    pub fn with_image(&self, image: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            image: image.into(),
        }
    }
}
