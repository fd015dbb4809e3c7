//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use strata_service::TierStatus;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
}

/// Readiness response with per-tier detail.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub store: TierStatus,
    pub cache: TierStatus,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(liveness_check))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
}

/// Liveness endpoint. Answers as long as the process serves HTTP.
pub async fn liveness_check() -> &'static str {
    "Strata profile service"
}

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check endpoint. 503 unless both tiers answer.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let readiness = state.profile_service.readiness().await;
    let ready = readiness.is_ready();

    let body = ReadinessResponse {
        status: if ready { "ready" } else { "not_ready" },
        store: readiness.store,
        cache: readiness.cache,
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}
