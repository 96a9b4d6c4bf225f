use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the spreadsheet backend is reachable.
    pub sheet_healthy: bool,
}

/// GET /health -- returns service and spreadsheet health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let sheet_healthy = state.catalog.inner().ping().await.is_ok();

    let status = if sheet_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        sheet_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
