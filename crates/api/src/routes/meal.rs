use axum::routing::{get, post};
use axum::Router;

use crate::handlers::meal;
use crate::state::AppState;

/// Meal and leaderboard routes, merged at the `/api/v1` root.
///
/// ```text
/// POST   /meals                  -> create
/// GET    /meals/{id}             -> get_by_id
/// DELETE /meals/{id}             -> delete
/// GET    /meals/by-name/{name}   -> get_by_name
/// GET    /leaderboard            -> leaderboard
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meals", post(meal::create))
        .route("/meals/{id}", get(meal::get_by_id).delete(meal::delete))
        .route("/meals/by-name/{name}", get(meal::get_by_name))
        .route("/leaderboard", get(meal::leaderboard))
}
