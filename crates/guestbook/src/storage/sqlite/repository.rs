//! SQLite repository implementation.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use guestbook_core::guest::{GuestRecord, NewGuest};
use guestbook_core::storage::{GuestRepository, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_guest};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based guest repository.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        tracing::debug!(path, "Opened SQLite guest database");

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl GuestRepository for SqliteRepository {
    async fn list_guests(&self) -> Result<Vec<GuestRecord>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_GUESTS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_guest).map_err(wrap_err)?;

                let mut guests = Vec::new();
                for row_result in rows {
                    guests.push(row_result.map_err(wrap_err)?);
                }
                Ok(guests)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ""))
    }

    async fn get_guest(&self, id: &str) -> Result<Option<GuestRecord>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_GUEST_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_guest) {
                    Ok(guest) => Ok(Some(guest)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, id))
    }

    async fn create_guest(&self, guest: NewGuest) -> Result<GuestRecord> {
        let record = GuestRecord::create(guest);

        let id = record.id.clone();
        let name = record.name.clone();
        let image = record.image.clone();
        let created_at = format_datetime(&record.created_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_GUEST,
                    rusqlite::params![id, name, image, created_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, &record.id))?;

        Ok(record)
    }

    async fn delete_guest(&self, id: &str) -> Result<bool> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_GUEST, [&id_str])
                    .map_err(wrap_err)?;
                Ok(rows > 0)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, id))
    }
}
