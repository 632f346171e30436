//! Handlers for the `/battle` resource: the two-slot arena.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use mealmax_battle::BattleReport;
use mealmax_core::types::DbId;
use mealmax_db::models::meal::Meal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /battle/combatants`: exactly one of `meal_id` or `name`.
#[derive(Debug, Deserialize)]
pub struct StageCombatantRequest {
    pub meal_id: Option<DbId>,
    pub name: Option<String>,
}

/// GET /api/v1/battle/combatants
pub async fn list_combatants(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Meal>>>> {
    let engine = state.battle.lock().await;
    Ok(Json(DataResponse {
        data: engine.combatants().to_vec(),
    }))
}

/// POST /api/v1/battle/combatants
///
/// Returns the staged list after the push.
pub async fn stage_combatant(
    State(state): State<AppState>,
    AppJson(input): AppJson<StageCombatantRequest>,
) -> AppResult<Json<DataResponse<Vec<Meal>>>> {
    let mut engine = state.battle.lock().await;
    match (input.meal_id, input.name) {
        (Some(id), None) => {
            engine.stage_by_id(id).await?;
        }
        (None, Some(name)) => {
            let meal = state.catalog.get_by_name(&name).await?;
            engine.stage(meal)?;
        }
        _ => {
            return Err(AppError::BadRequest(
                "Provide exactly one of 'meal_id' or 'name'".into(),
            ));
        }
    }
    Ok(Json(DataResponse {
        data: engine.combatants().to_vec(),
    }))
}

/// DELETE /api/v1/battle/combatants
pub async fn clear_combatants(State(state): State<AppState>) -> StatusCode {
    state.battle.lock().await.clear();
    StatusCode::NO_CONTENT
}

/// POST /api/v1/battle
///
/// The body carries `winner` (the winning meal's name) alongside the scores
/// and the random draw.
pub async fn run(State(state): State<AppState>) -> AppResult<Json<BattleReport>> {
    let engine = state.battle.lock().await;
    let report = engine.fight().await?;
    Ok(Json(report))
}
