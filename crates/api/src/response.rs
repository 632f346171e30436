//! Shared response envelope for list-shaped API payloads.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Used for collections (leaderboard, staged combatants); single meals are
/// returned bare.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
