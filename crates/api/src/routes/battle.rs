use axum::routing::{get, post};
use axum::Router;

use crate::handlers::battle;
use crate::state::AppState;

/// Routes mounted at `/battle`.
///
/// ```text
/// POST   /               -> run
/// GET    /combatants     -> list_combatants
/// POST   /combatants     -> stage_combatant
/// DELETE /combatants     -> clear_combatants
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(battle::run)).route(
        "/combatants",
        get(battle::list_combatants)
            .post(battle::stage_combatant)
            .delete(battle::clear_combatants),
    )
}
