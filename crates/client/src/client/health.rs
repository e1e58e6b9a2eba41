//! Health check operations.

use serde::{Deserialize, Serialize};

use super::GuestbookClient;
use crate::error::Result;

/// Storage health as reported by `/healthz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StorageHealth {
    pub status: String,
    pub backend: String,
    #[serde(default)]
    pub guests: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GuestbookClient {
    /// Check storage health.
    ///
    /// A 503 still carries a health body, so it is returned rather than
    /// turned into an error.
    pub async fn health(&self) -> Result<StorageHealth> {
        let response = self.client.get(self.url("/healthz")).send().await?;
        if response.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Ok(response.json().await?);
        }
        self.handle_response(response, "Health endpoint").await
    }
}
