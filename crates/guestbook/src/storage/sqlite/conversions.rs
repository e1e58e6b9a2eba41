//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use guestbook_core::guest::GuestRecord;

/// Convert a SQLite row to a GuestRecord.
///
/// Expected columns: id, name, image, created_at
pub fn row_to_guest(row: &Row) -> rusqlite::Result<GuestRecord> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let image: String = row.get(2)?;
    let created_at: String = row.get(3)?;

    Ok(GuestRecord {
        id,
        name,
        image,
        created_at: parse_datetime(&created_at)?,
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Always nine fractional digits so lexical order matches time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}
