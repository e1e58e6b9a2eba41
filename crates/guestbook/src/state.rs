//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The guest store is picked at startup from [`Config`]
//! and handlers only see it as a `GuestRepository` trait object.

use std::sync::Arc;

use guestbook_core::storage::{BlobStore, GuestRepository};

use crate::config::{Config, StorageBackend};
use crate::storage::{BlobBackedRepository, FileRepository, FsBlobStore, InMemoryRepository};

#[cfg(not(feature = "sqlite"))]
use crate::config::ConfigError;
#[cfg(feature = "sqlite")]
use crate::storage::SqliteRepository;

/// Shared application state.
///
/// Cloned for each request handler; every field is a cheap `Arc` handle.
#[derive(Clone)]
pub struct AppState {
    /// Guest store (blob-backed when `BLOB_DIR` is set).
    pub guests: Arc<dyn GuestRepository>,
    /// Blob store serving `/images/{key}`, if out-of-band images are enabled.
    pub blobs: Option<Arc<dyn BlobStore>>,
    /// Backend the guest store was built on, reported by `/healthz`.
    pub backend: StorageBackend,
}

impl AppState {
    /// Creates an AppState from already-built stores.
    pub fn build(
        guests: Arc<dyn GuestRepository>,
        blobs: Option<Arc<dyn BlobStore>>,
        backend: StorageBackend,
    ) -> Self {
        Self {
            guests,
            blobs,
            backend,
        }
    }

    /// Opens the configured backend and, if requested, wraps it with blob storage.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let base: Arc<dyn GuestRepository> = match config.storage_backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; guests are lost on restart");
                Arc::new(InMemoryRepository::new())
            }
            StorageBackend::File => {
                let repo = FileRepository::open(&config.guests_file).await?;
                tracing::info!(path = %repo.path().display(), "Using JSON file storage");
                Arc::new(repo)
            }
            #[cfg(feature = "sqlite")]
            StorageBackend::Sqlite => Arc::new(SqliteRepository::new(&config.sqlite_path).await?),
            #[cfg(not(feature = "sqlite"))]
            StorageBackend::Sqlite => {
                return Err(ConfigError::BackendUnavailable(StorageBackend::Sqlite).into());
            }
        };

        let Some(blob_dir) = &config.blob_dir else {
            tracing::info!(backend = %config.storage_backend, "Storing images inline");
            return Ok(Self::build(base, None, config.storage_backend));
        };

        let blobs: Arc<dyn BlobStore> =
            Arc::new(FsBlobStore::new(blob_dir, &config.public_base_url).await?);
        let guests = Arc::new(BlobBackedRepository::new(base, blobs.clone()));

        tracing::info!(
            backend = %config.storage_backend,
            blob_dir = %blob_dir.display(),
            "Storing images out of band"
        );

        Ok(Self::build(guests, Some(blobs), config.storage_backend))
    }

    /// Human-readable description of the storage stack.
    pub fn backend_label(&self) -> String {
        if self.blobs.is_some() {
            format!("{}+blob", self.backend)
        } else {
            self.backend.to_string()
        }
    }
}

impl Default for AppState {
    /// In-memory store without blob storage, used by tests.
    fn default() -> Self {
        Self::build(
            Arc::new(InMemoryRepository::new()),
            None,
            StorageBackend::Memory,
        )
    }
}
