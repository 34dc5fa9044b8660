//! Health endpoints
//!
//! - `/healthz` - Liveness probe (200 OK while the server is running)
//! - `/readyz`  - Readiness probe (the gateway is stateless; ready as
//!   soon as it is serving)

use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Optional message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Create health check router
pub fn health_router() -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

async fn healthz() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: None,
    })
}

async fn readyz() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ready".to_string(),
        message: None,
    })
}
