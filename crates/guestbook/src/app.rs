use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        guests::{create_guest, delete_guest, delete_guest_by_query, get_guest, list_guests},
        health::{healthz, livez},
        images::get_image,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// `max_upload_bytes` caps request bodies; inline images travel as JSON.
pub fn create_app(state: AppState, max_upload_bytes: usize) -> Router {
    // The admin page may be served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route(
            "/guests",
            get(list_guests)
                .post(create_guest)
                .delete(delete_guest_by_query),
        )
        .route("/guests/{id}", get(get_guest).delete(delete_guest))
        .route("/images/{key}", get(get_image))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors);

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use guestbook_core::guest::{GuestRecord, NewGuest};
    use guestbook_core::storage::{GuestRepository, RepositoryError, Result as RepoResult};

    use crate::config::{StorageBackend, DEFAULT_MAX_UPLOAD_BYTES};
    use crate::storage::{BlobBackedRepository, FsBlobStore, InMemoryRepository};

    const ALICE_IMAGE: &str = "data:image/jpeg;base64,/9j/4AAQ";
    const BOB_IMAGE: &str = "data:image/jpeg;base64,/9j/4AAR";

    fn app() -> Router {
        create_app(AppState::default(), DEFAULT_MAX_UPLOAD_BYTES)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn delete_req(uri: &str) -> Request<Body> {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn post_json(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/guests")
            .header("Content-Type", "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn create(app: &Router, name: &str, image: &str) -> Value {
        let body = json!({ "name": name, "image": image }).to_string();
        let response = send(app, post_json(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    /// Repository whose every operation fails.
    struct FailingRepository;

    #[async_trait]
    impl GuestRepository for FailingRepository {
        async fn list_guests(&self) -> RepoResult<Vec<GuestRecord>> {
            Err(RepositoryError::ConnectionFailed("unreachable".to_string()))
        }

        async fn get_guest(&self, _id: &str) -> RepoResult<Option<GuestRecord>> {
            Err(RepositoryError::ConnectionFailed("unreachable".to_string()))
        }

        async fn create_guest(&self, _guest: NewGuest) -> RepoResult<GuestRecord> {
            Err(RepositoryError::QueryFailed("disk full".to_string()))
        }

        async fn delete_guest(&self, _id: &str) -> RepoResult<bool> {
            Err(RepositoryError::QueryFailed("disk full".to_string()))
        }
    }

    fn failing_app() -> Router {
        let state = AppState::build(Arc::new(FailingRepository), None, StorageBackend::File);
        create_app(state, DEFAULT_MAX_UPLOAD_BYTES)
    }

    #[tokio::test]
    async fn test_list_guests_empty() {
        let response = send(&app(), get_req("/guests")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_guest_lifecycle() {
        let app = app();

        let alice = create(&app, "Alice", ALICE_IMAGE).await;
        let alice_id = alice["id"].as_str().unwrap().to_string();
        assert_eq!(alice["name"], "Alice");
        assert_eq!(alice["image"], ALICE_IMAGE);
        assert!(alice.get("created_at").is_none());

        let bob = create(&app, "Bob", BOB_IMAGE).await;
        let bob_id = bob["id"].as_str().unwrap().to_string();

        // Newest first.
        let list = body_json(send(&app, get_req("/guests")).await).await;
        let names: Vec<&str> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Bob", "Alice"]);

        // Lookup by id, as the thank-you page does.
        let response = send(&app, get_req(&format!("/guests/{alice_id}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let fetched = body_json(response).await;
        assert_eq!(fetched["id"], alice_id.as_str());
        assert_eq!(fetched["name"], "Alice");
        assert_eq!(fetched["image"], ALICE_IMAGE);
        assert!(fetched["created_at"].is_string());

        // Delete Alice via the query form.
        let response = send(&app, delete_req(&format!("/guests?id={alice_id}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "success": true }));

        let list = body_json(send(&app, get_req("/guests")).await).await;
        assert_eq!(list.as_array().unwrap().len(), 1);
        assert_eq!(list[0]["id"], bob_id.as_str());

        // Deleting again is a 404.
        let response = send(&app, delete_req(&format!("/guests?id={alice_id}"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Guest not found" }));

        // Path form works too.
        let response = send(&app, delete_req(&format!("/guests/{bob_id}"))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let list = body_json(send(&app, get_req("/guests")).await).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_create_keeps_name_whitespace() {
        let app = app();
        let guest = create(&app, "  Alice ", ALICE_IMAGE).await;
        assert_eq!(guest["name"], "  Alice ");

        let id = guest["id"].as_str().unwrap();
        let fetched = body_json(send(&app, get_req(&format!("/guests/{id}"))).await).await;
        assert_eq!(fetched["name"], "  Alice ");
    }

    #[tokio::test]
    async fn test_create_rejects_missing_fields() {
        let app = app();

        for body in [
            json!({ "name": "Alice" }),
            json!({ "image": ALICE_IMAGE }),
            json!({ "name": "", "image": ALICE_IMAGE }),
            json!({ "name": "   ", "image": ALICE_IMAGE }),
            json!({ "name": "Alice", "image": "" }),
            json!({}),
        ] {
            let response = send(&app, post_json(body.to_string())).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Name and image are required" })
            );
        }

        let list = body_json(send(&app, get_req("/guests")).await).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_create_rejects_unparseable_body() {
        let app = app();

        let response = send(&app, post_json("{not json")).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Name and image are required" })
        );

        let response = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/guests")
                .body(Body::from("name=Alice"))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_oversized_body() {
        let app = create_app(AppState::default(), 64);
        let image = format!("data:image/jpeg;base64,{}", "A".repeat(128));

        let body = json!({ "name": "Alice", "image": image }).to_string();
        let response = send(&app, post_json(body)).await;

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Request body too large" })
        );
    }

    #[tokio::test]
    async fn test_get_unknown_guest() {
        let response = send(&app(), get_req("/guests/does-not-exist")).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Guest not found" }));
    }

    #[tokio::test]
    async fn test_delete_without_id() {
        let app = app();

        for uri in ["/guests", "/guests?id=", "/guests?other=1"] {
            let response = send(&app, delete_req(uri)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {uri}");
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Guest ID is required" })
            );
        }
    }

    #[tokio::test]
    async fn test_backend_failures_are_generic_500s() {
        let app = failing_app();

        let response = send(&app, get_req("/guests")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "Failed to fetch guests" }));

        let body = json!({ "name": "Alice", "image": ALICE_IMAGE }).to_string();
        let response = send(&app, post_json(body)).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "Failed to create guest" }));

        let response = send(&app, delete_req("/guests?id=abc")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "Failed to delete guest" }));

        let response = send(&app, get_req("/guests/abc")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await, json!({ "error": "Failed to fetch guest" }));
    }

    #[tokio::test]
    async fn test_validation_runs_before_storage() {
        // A failing store must not turn a bad request into a 500.
        let body = json!({ "name": "Alice" }).to_string();
        let response = send(&failing_app(), post_json(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let response = send(
            &app(),
            Request::builder()
                .method("OPTIONS")
                .uri("/guests")
                .header("Origin", "https://admin.example")
                .header("Access-Control-Request-Method", "DELETE")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app();
        create(&app, "Alice", ALICE_IMAGE).await;

        let response = send(&app, get_req("/livez")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get_req("/healthz")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "status": "ok", "backend": "memory", "guests": 1 })
        );

        let response = send(&failing_app(), get_req("/healthz")).await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = body_json(response).await;
        assert_eq!(body["status"], "unavailable");
        assert_eq!(body["error"], "Storage unavailable");
    }

    #[tokio::test]
    async fn test_images_without_blob_store() {
        let response = send(&app(), get_req("/images/abc")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, json!({ "error": "Image not found" }));
    }

    #[tokio::test]
    async fn test_blob_backed_create_serve_delete() {
        let dir = std::env::temp_dir().join(format!("guestbook_app_{}", uuid::Uuid::new_v4()));
        let blobs = Arc::new(FsBlobStore::new(&dir, "").await.unwrap());
        let guests = Arc::new(BlobBackedRepository::new(
            Arc::new(InMemoryRepository::new()),
            blobs.clone(),
        ));
        let state = AppState::build(guests, Some(blobs), StorageBackend::Memory);
        let app = create_app(state, DEFAULT_MAX_UPLOAD_BYTES);

        let alice = create(&app, "Alice", ALICE_IMAGE).await;
        let image_url = alice["image"].as_str().unwrap().to_string();
        assert!(image_url.starts_with("/images/"));

        let response = send(&app, get_req(&image_url)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/jpeg");
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert!(response.headers().contains_key("content-security-policy"));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes.as_ref(), &[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]);

        for image in [
            "data:image/png;base64,@@",
            "data:text/html;base64,PHNjcmlwdD5hbGVydCgxKTwvc2NyaXB0Pg==",
            image_url.as_str(),
        ] {
            let body = json!({ "name": "Eve", "image": image }).to_string();
            let response = send(&app, post_json(body)).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "image: {image}");
            assert_eq!(
                body_json(response).await,
                json!({ "error": "Invalid image payload" })
            );
        }
        let list = body_json(send(&app, get_req("/guests")).await).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let id = alice["id"].as_str().unwrap();
        let response = send(&app, delete_req(&format!("/guests/{id}"))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, get_req(&image_url)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
