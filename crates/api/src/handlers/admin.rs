//! Administrative catalog operations.

use axum::extract::State;
use axum::http::StatusCode;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/admin/reset
///
/// Recreates the meals table and empties the arena, since staged meals would
/// refer to ids that no longer exist.
pub async fn reset(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.catalog.reset().await?;
    state.battle.lock().await.clear();
    tracing::info!("Meal catalog reset");
    Ok(StatusCode::NO_CONTENT)
}
