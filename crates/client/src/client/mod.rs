//! HTTP client for the guestbook API.

pub mod guests;
pub mod health;

use guestbook_core::guest::ErrorResponse;

use crate::error::{ClientError, Result};

/// Default server address when neither `--base-url` nor `GUESTBOOK_URL` is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// HTTP client for the guestbook API.
#[derive(Debug, Clone)]
pub struct GuestbookClient {
    client: reqwest::Client,
    base_url: String,
}

impl GuestbookClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a success body, or turn an error status into a [`ClientError`].
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(ClientError::from)
        } else {
            Err(error_from_response(response, resource).await)
        }
    }
}

/// Maps a non-success response to a [`ClientError`].
///
/// The server answers `{"error": "<message>"}`; anything else is kept as text.
async fn error_from_response(response: reqwest::Response, resource: &str) -> ClientError {
    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return ClientError::NotFound {
            resource: resource.to_string(),
        };
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    ClientError::ServerError {
        status: status.as_u16(),
        message,
    }
}
