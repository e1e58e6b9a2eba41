//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `guestbook_core::storage`. The backend is picked at startup from
//! `STORAGE_BACKEND` (see [`crate::config::StorageBackend`]); the SQLite
//! backend is compiled only with the `sqlite` feature (on by default).
//!
//! | Backend  | Durable | Notes                                   |
//! |----------|---------|-----------------------------------------|
//! | memory   | no      | tests and demos                         |
//! | file     | yes     | single JSON document, atomic rewrites   |
//! | sqlite   | yes     | one row per guest                       |
//!
//! Any backend can be wrapped in [`BlobBackedRepository`] to keep image bytes
//! out of the guest records.
//!
//! # Examples
//!
//! Build without SQLite:
//! ```bash
//! cargo build -p guestbook --no-default-features
//! ```

pub mod blob;
pub mod file;
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use blob::{BlobBackedRepository, FsBlobStore};
pub use file::FileRepository;
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
