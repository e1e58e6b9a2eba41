//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create the guests table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS guests (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    image TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_guests_created_at ON guests(created_at);
"#;

pub const INSERT_GUEST: &str = r#"
INSERT INTO guests (id, name, image, created_at)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_GUEST_BY_ID: &str = r#"
SELECT id, name, image, created_at
FROM guests
WHERE id = ?1
"#;

// `created_at` is stored with fixed-width fractional seconds, so text order
// is time order. `rowid` breaks ties in favor of the later insert.
pub const SELECT_ALL_GUESTS: &str = r#"
SELECT id, name, image, created_at
FROM guests
ORDER BY created_at DESC, rowid DESC
"#;

pub const DELETE_GUEST: &str = r#"
DELETE FROM guests
WHERE id = ?1
"#;
