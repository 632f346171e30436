pub mod admin;
pub mod battle;
pub mod health;
pub mod meal;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /meals                     create (POST)
/// /meals/{id}                get, delete
/// /meals/by-name/{name}      get
/// /leaderboard               ranked live meals (?sort=wins|win_pct)
///
/// /battle                    run a battle (POST)
/// /battle/combatants         list, stage, clear
///
/// /admin/reset               recreate the catalog (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(meal::router())
        .nest("/battle", battle::router())
        .nest("/admin", admin::router())
}
