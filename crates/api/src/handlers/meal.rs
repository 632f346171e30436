//! Handlers for the `/meals` and `/leaderboard` resources.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use mealmax_core::meal::{coerce_price, NewMeal};
use mealmax_core::types::DbId;
use mealmax_db::models::meal::{LeaderboardEntry, Meal};
use serde::Deserialize;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::LeaderboardParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /meals`.
///
/// `price` is accepted as a JSON number or a numeric string and checked by
/// [`coerce_price`]; `difficulty` is parsed by [`NewMeal::new`].
#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub cuisine: String,
    pub price: serde_json::Value,
    pub difficulty: String,
}

/// POST /api/v1/meals
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateMealRequest>,
) -> AppResult<(StatusCode, Json<Meal>)> {
    let price = coerce_price(&input.price)?;
    let new_meal = NewMeal::new(input.name, input.cuisine, price, &input.difficulty)?;
    let meal = state.catalog.create(&new_meal).await?;
    Ok((StatusCode::CREATED, Json(meal)))
}

/// GET /api/v1/meals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Meal>> {
    let meal = state.catalog.get_by_id(id).await?;
    Ok(Json(meal))
}

/// GET /api/v1/meals/by-name/{name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Meal>> {
    let meal = state.catalog.get_by_name(&name).await?;
    Ok(Json(meal))
}

/// DELETE /api/v1/meals/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    state.catalog.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/leaderboard?sort=wins|win_pct
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(params): Query<LeaderboardParams>,
) -> AppResult<Json<DataResponse<Vec<LeaderboardEntry>>>> {
    let entries = state.catalog.leaderboard_by(params.sort_key()).await?;
    Ok(Json(DataResponse { data: entries }))
}
