//! Out-of-band image storage.
//!
//! [`BlobBackedRepository`] decorates any guest repository so that inline
//! images are uploaded to a [`BlobStore`](guestbook_core::storage::BlobStore)
//! and only their URL is kept in the record. [`FsBlobStore`] is the bundled
//! blob store, writing one file per image.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! let repo = Arc::new(SqliteRepository::new("guests.db").await?);
//! let blobs = Arc::new(FsBlobStore::new("images", "https://party.example").await?);
//!
//! let guests = BlobBackedRepository::new(repo, blobs);
//! ```

mod fs;
mod repository;

pub use fs::FsBlobStore;
pub use repository::BlobBackedRepository;
