//! Query parameter types for API handlers.

use serde::Deserialize;

/// `?sort=wins|win_pct` on the leaderboard.
///
/// Kept as a raw string so an unknown key surfaces the catalog's own
/// validation message rather than a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct LeaderboardParams {
    pub sort: Option<String>,
}

impl LeaderboardParams {
    pub fn sort_key(&self) -> &str {
        self.sort.as_deref().unwrap_or("wins")
    }
}
