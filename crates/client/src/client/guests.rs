//! Guest API operations.

use guestbook_core::guest::{
    CreateGuestRequest, CreateGuestResponse, DeleteGuestResponse, GuestRecord,
};

use super::{error_from_response, GuestbookClient};
use crate::error::{ClientError, Result};

impl GuestbookClient {
    /// List all guests, newest first.
    pub async fn list_guests(&self) -> Result<Vec<GuestRecord>> {
        let response = self.client.get(self.url("/guests")).send().await?;
        self.handle_response(response, "Guests").await
    }

    /// Get guest by ID.
    pub async fn get_guest(&self, id: &str) -> Result<GuestRecord> {
        let response = self
            .client
            .get(self.url(&format!("/guests/{}", urlencoding::encode(id))))
            .send()
            .await?;
        self.handle_response(response, &format!("Guest {id}")).await
    }

    /// Create a new guest.
    ///
    /// `image` is sent as-is: either a URL or a `data:` URL.
    pub async fn create_guest(&self, name: &str, image: &str) -> Result<CreateGuestResponse> {
        let response = self
            .client
            .post(self.url("/guests"))
            .json(&CreateGuestRequest::new(name, image))
            .send()
            .await?;
        self.handle_response(response, "Guest").await
    }

    /// Delete guest by ID.
    pub async fn delete_guest(&self, id: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url("/guests"))
            .query(&[("id", id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response, &format!("Guest {id}")).await);
        }

        let body: DeleteGuestResponse = response.json().await?;
        if body.success {
            Ok(())
        } else {
            Err(ClientError::InvalidResponse(format!(
                "Server did not confirm deletion of guest {id}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_server;

    #[tokio::test]
    async fn test_guest_round_trip() {
        let client = GuestbookClient::new(test_server::spawn().await);

        assert!(client.list_guests().await.unwrap().is_empty());

        let alice = client
            .create_guest("Alice", "https://img.example/alice.jpg")
            .await
            .unwrap();
        let bob = client
            .create_guest("Bob", "https://img.example/bob.jpg")
            .await
            .unwrap();

        let names: Vec<String> = client
            .list_guests()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.name)
            .collect();
        assert_eq!(names, vec!["Bob", "Alice"]);

        let fetched = client.get_guest(&alice.id).await.unwrap();
        assert_eq!(fetched.name, "Alice");
        assert_eq!(fetched.image, "https://img.example/alice.jpg");

        client.delete_guest(&alice.id).await.unwrap();

        let remaining = client.list_guests().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, bob.id);
    }

    #[tokio::test]
    async fn test_missing_guest_is_not_found() {
        let client = GuestbookClient::new(test_server::spawn().await);

        let get = client.get_guest("nope").await;
        assert!(matches!(get, Err(ClientError::NotFound { .. })));

        let delete = client.delete_guest("nope").await;
        assert!(matches!(delete, Err(ClientError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_validation_error_surfaces_message() {
        let client = GuestbookClient::new(test_server::spawn().await);

        match client.create_guest("", "https://img.example/a.jpg").await {
            Err(ClientError::ServerError { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "Name and image are required");
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }
}
