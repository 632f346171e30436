use axum::extract::State;
use axum::http::StatusCode;
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
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET /health -- liveness plus a non-failing database round-trip.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = mealmax_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// GET /health/db -- 200 when the database answers, 503 otherwise.
async fn db_health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    match mealmax_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "database": "healthy" })),
        ),
        Err(err) => {
            tracing::error!(error = %err, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "database": "unhealthy" })),
            )
        }
    }
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/db", get(db_health_check))
}
