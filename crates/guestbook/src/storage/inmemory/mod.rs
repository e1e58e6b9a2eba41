//! In-memory storage backend.
//!
//! Guests live in a `Vec` wrapped in `Arc<RwLock<_>>`, owned by the
//! process. Nothing is persisted: every guest is lost on restart, so this
//! backend is meant for tests, demos and throwaway deployments.
//!
//! # Example
//!
//! ```rust,ignore
//! use guestbook::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::InMemoryRepository;
