//! JSON file repository implementation.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};

use guestbook_core::guest::{sort_newest_first, GuestRecord, NewGuest};
use guestbook_core::storage::{GuestRepository, RepositoryError, Result};

use super::document::{parse_document, render_document, GuestDocument};

/// Guest repository persisted to a single JSON file.
///
/// The file is the source of truth at startup; afterwards the in-memory copy
/// is authoritative and every mutation rewrites the file while holding the
/// write lock. The in-memory copy only changes once the file write succeeded.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
    guests: Arc<RwLock<Vec<GuestRecord>>>,
}

impl FileRepository {
    /// Opens (or creates) the guests file at `path`.
    ///
    /// Missing parent directories are created. A missing file starts empty
    /// and is written immediately so misconfigured paths fail at startup.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                RepositoryError::ConnectionFailed(format!(
                    "Cannot create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let document = match fs::read(&path).await {
            Ok(bytes) => parse_document(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let empty = GuestDocument::default();
                write_document(&path, &empty).await?;
                empty
            }
            Err(e) => {
                return Err(RepositoryError::ConnectionFailed(format!(
                    "Cannot read {}: {e}",
                    path.display()
                )))
            }
        };

        tracing::debug!(
            path = %path.display(),
            guests = document.guests.len(),
            "Loaded guests file"
        );

        Ok(Self {
            path,
            guests: Arc::new(RwLock::new(document.guests)),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes the document to a temp file next to `path` and renames it into place.
async fn write_document(path: &Path, document: &GuestDocument) -> Result<()> {
    let bytes = render_document(document)?;

    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, bytes).await.map_err(|e| {
        RepositoryError::QueryFailed(format!("Cannot write {}: {e}", tmp.display()))
    })?;
    fs::rename(&tmp, path).await.map_err(|e| {
        RepositoryError::QueryFailed(format!("Cannot replace {}: {e}", path.display()))
    })
}

#[async_trait]
impl GuestRepository for FileRepository {
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

        let mut next = GuestDocument {
            guests: guests.clone(),
        };
        next.guests.push(record.clone());
        write_document(&self.path, &next).await?;

        *guests = next.guests;
        Ok(record)
    }

    async fn delete_guest(&self, id: &str) -> Result<bool> {
        let mut guests = self.guests.write().await;
        if !guests.iter().any(|g| g.id == id) {
            return Ok(false);
        }

        let next = GuestDocument {
            guests: guests.iter().filter(|g| g.id != id).cloned().collect(),
        };
        write_document(&self.path, &next).await?;

        *guests = next.guests;
        Ok(true)
    }
}
