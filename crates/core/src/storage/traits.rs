use async_trait::async_trait;

use crate::guest::{GuestRecord, NewGuest};

use super::{Result, StoredBlob};

/// Repository for guest records.
///
/// Every backend (in-memory, JSON file, SQLite, blob-backed decorator)
/// implements this trait; the server picks one at startup and only ever talks
/// to it through `Arc<dyn GuestRepository>`.
#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Lists all guests, newest first by `created_at`.
    async fn list_guests(&self) -> Result<Vec<GuestRecord>>;

    /// Gets a guest by its ID. A missing guest is `Ok(None)`, not an error.
    async fn get_guest(&self, id: &str) -> Result<Option<GuestRecord>>;

    /// Creates a guest with a fresh ID and the current time.
    ///
    /// Either the whole record is stored or nothing is.
    async fn create_guest(&self, guest: NewGuest) -> Result<GuestRecord>;

    /// Deletes a guest by its ID, returning whether a record was removed.
    async fn delete_guest(&self, id: &str) -> Result<bool>;
}

/// Out-of-band storage for image bytes.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `data` under `key` and returns the public URL of the blob.
    async fn put(&self, key: &str, content_type: &str, data: Vec<u8>) -> Result<String>;

    /// Fetches a blob by key.
    async fn get(&self, key: &str) -> Result<Option<StoredBlob>>;

    /// Deletes a blob by key, returning whether it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Recovers the key from a URL previously returned by [`BlobStore::put`].
    ///
    /// Returns `None` for URLs this store did not hand out.
    fn key_for_url(&self, url: &str) -> Option<String>;
}
