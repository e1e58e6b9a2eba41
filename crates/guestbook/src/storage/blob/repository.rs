//! Blob-backed guest repository decorator.
//!
//! Moves inline image bytes into a `BlobStore` so the wrapped repository only
//! ever stores short URLs.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use guestbook_core::guest::{
    is_image_content_type, parse_image, GuestRecord, ImageError, ImagePayload, NewGuest,
};
use guestbook_core::storage::{BlobStore, GuestRepository, RepositoryError, Result};

/// Blob-backed guest repository decorator.
///
/// - **Create**: inline `data:` images are decoded and uploaded first, then
///   the record is stored with the blob URL. If the record cannot be stored
///   the blob is removed again. Only `image/*` payloads are accepted, and a
///   URL that already points into the blob store is rejected so every blob
///   has exactly one owning record.
/// - **Delete**: the record is removed first, then its blob. A blob that
///   cannot be removed is logged and left behind; the delete still succeeds.
/// - **Reads** pass straight through.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `B` - The blob store implementation
pub struct BlobBackedRepository<R, B>
where
    R: GuestRepository + ?Sized,
    B: BlobStore + ?Sized,
{
    repository: Arc<R>,
    blobs: Arc<B>,
}

impl<R, B> BlobBackedRepository<R, B>
where
    R: GuestRepository + ?Sized,
    B: BlobStore + ?Sized,
{
    pub fn new(repository: Arc<R>, blobs: Arc<B>) -> Self {
        Self { repository, blobs }
    }
}

fn new_blob_key() -> String {
    Uuid::new_v4().simple().to_string()
}

#[async_trait]
impl<R, B> GuestRepository for BlobBackedRepository<R, B>
where
    R: GuestRepository + ?Sized + 'static,
    B: BlobStore + ?Sized + 'static,
{
    async fn list_guests(&self) -> Result<Vec<GuestRecord>> {
        self.repository.list_guests().await
    }

    async fn get_guest(&self, id: &str) -> Result<Option<GuestRecord>> {
        self.repository.get_guest(id).await
    }

    async fn create_guest(&self, guest: NewGuest) -> Result<GuestRecord> {
        let (content_type, data) = match parse_image(guest.image())? {
            ImagePayload::Reference(url) => {
                // Blob URLs are owned by the record that uploaded them.
                if self.blobs.key_for_url(&url).is_some() {
                    return Err(RepositoryError::InvalidData(format!(
                        "Image URL points into the blob store: {url}"
                    )));
                }
                return self.repository.create_guest(guest).await;
            }
            ImagePayload::Inline { content_type, data } => (content_type, data),
        };

        if !is_image_content_type(&content_type) {
            return Err(ImageError::NotAnImage(content_type).into());
        }

        let key = new_blob_key();
        let url = self.blobs.put(&key, &content_type, data).await?;

        match self.repository.create_guest(guest.with_image(url)).await {
            Ok(record) => {
                tracing::debug!(
                    guest_id = %record.id,
                    blob_key = %key,
                    "Stored guest image out of band"
                );
                Ok(record)
            }
            Err(err) => {
                if let Err(cleanup) = self.blobs.delete(&key).await {
                    tracing::warn!(
                        blob_key = %key,
                        error = %cleanup,
                        "Failed to remove orphaned blob"
                    );
                }
                Err(err)
            }
        }
    }

    async fn delete_guest(&self, id: &str) -> Result<bool> {
        let Some(record) = self.repository.get_guest(id).await? else {
            return Ok(false);
        };

        if !self.repository.delete_guest(id).await? {
            return Ok(false);
        }

        if let Some(key) = self.blobs.key_for_url(&record.image) {
            match self.blobs.delete(&key).await {
                Ok(true) => {
                    tracing::debug!(guest_id = %id, blob_key = %key, "Deleted guest image")
                }
                Ok(false) => {
                    tracing::warn!(guest_id = %id, blob_key = %key, "Guest image was already gone")
                }
                Err(e) => tracing::warn!(
                    guest_id = %id,
                    blob_key = %key,
                    error = %e,
                    "Failed to delete guest image"
                ),
            }
        }

        Ok(true)
    }
}
