//! Health check endpoints for Kubernetes-style probes.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Storage probe (lists guests once)

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::state::AppState;

/// Reported by `/healthz` when the store fails; the cause is only logged.
pub const STORAGE_UNAVAILABLE: &str = "Storage unavailable";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guests: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting connections.
#[axum::debug_handler]
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Storage health.
///
/// Returns 200 with the guest count when the store answers, 503 otherwise.
#[axum::debug_handler]
pub async fn healthz(State(state): State<AppState>) -> Response {
    let backend = state.backend_label();

    match state.guests.list_guests().await {
        Ok(guests) => (
            StatusCode::OK,
            Json(HealthStatus {
                status: "ok",
                backend,
                guests: Some(guests.len()),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    status: "unavailable",
                    backend,
                    guests: None,
                    error: Some(STORAGE_UNAVAILABLE.to_string()),
                }),
            )
                .into_response()
        }
    }
}
