//! On-disk layout of the guests file.
//!
//! Pure functions, no I/O, so the format is testable without touching disk.

use serde::{Deserialize, Serialize};

use guestbook_core::guest::GuestRecord;
use guestbook_core::storage::{RepositoryError, Result};

/// The whole guests file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDocument {
    #[serde(default)]
    pub guests: Vec<GuestRecord>,
}

/// Parses file contents. An empty (or whitespace-only) file holds no guests.
pub fn parse_document(bytes: &[u8]) -> Result<GuestDocument> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(GuestDocument::default());
    }

    serde_json::from_slice(bytes).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Renders the document as pretty-printed JSON.
pub fn render_document(document: &GuestDocument) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(document).map_err(|e| RepositoryError::Serialization(e.to_string()))
}
