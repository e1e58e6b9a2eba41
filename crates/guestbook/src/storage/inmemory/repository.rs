//! In-memory repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use guestbook_core::guest::{sort_newest_first, GuestRecord, NewGuest};
use guestbook_core::storage::{GuestRepository, RepositoryError, Result};

/// In-memory storage backend.
///
/// Records are kept in insertion order; listing sorts a copy.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    guests: Arc<RwLock<Vec<GuestRecord>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuestRepository for InMemoryRepository {
    async fn list_guests(&self) -> Result<Vec<GuestRecord>> {
        let guests = self.guests.read().await;
        Ok(sort_newest_first(guests.clone()))
    }

    async fn get_guest(&self, id: &str) -> Result<Option<GuestRecord>> {
        let guests = self.guests.read().await;
        Ok(guests.iter().find(|g| g.id == id).cloned())
    }

    async fn create_guest(&self, guest: NewGuest) -> Result<GuestRecord> {
        let record = GuestRecord::create(guest);

        let mut guests = self.guests.write().await;
        if guests.iter().any(|g| g.id == record.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Guest",
                id: record.id,
            });
        }
        guests.push(record.clone());
        Ok(record)
    }

    async fn delete_guest(&self, id: &str) -> Result<bool> {
        let mut guests = self.guests.write().await;
        let before = guests.len();
        guests.retain(|g| g.id != id);
        Ok(guests.len() < before)
    }
}
