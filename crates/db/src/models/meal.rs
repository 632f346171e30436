//! Meal entity model, row mapping and leaderboard DTO.

use mealmax_core::error::CoreError;
use mealmax_core::meal::{win_pct, Difficulty, MealStatus};
use mealmax_core::types::{DbId, StatCount, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Raw row from the `meals` table.
///
/// `difficulty` is TEXT and `deleted` a plain flag here; [`Meal`] carries the
/// typed versions.
#[derive(Debug, Clone, FromRow)]
pub struct MealRow {
    pub id: DbId,
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: String,
    pub battles: StatCount,
    pub wins: StatCount,
    pub deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A meal as seen by the catalog and the battle engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub id: DbId,
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: StatCount,
    pub wins: StatCount,
    pub status: MealStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Meal {
    pub fn is_deleted(&self) -> bool {
        self.status.is_deleted()
    }

    pub fn win_pct(&self) -> f64 {
        win_pct(self.wins, self.battles)
    }
}

impl TryFrom<MealRow> for Meal {
    type Error = CoreError;

    fn try_from(row: MealRow) -> Result<Self, Self::Error> {
        // The CHECK constraint keeps this from failing on a migrated schema.
        let difficulty = row.difficulty.parse::<Difficulty>().map_err(|_| {
            CoreError::Internal(format!(
                "Meal {} has unknown difficulty '{}'",
                row.id, row.difficulty
            ))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            cuisine: row.cuisine,
            price: row.price,
            difficulty,
            battles: row.battles,
            wins: row.wins,
            status: MealStatus::from_deleted_flag(row.deleted),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// One leaderboard line: a live meal plus its computed win percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub id: DbId,
    pub name: String,
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
    pub battles: StatCount,
    pub wins: StatCount,
    /// `wins / battles`, `0.0` when the meal has not battled.
    pub win_pct: f64,
}

impl From<Meal> for LeaderboardEntry {
    fn from(meal: Meal) -> Self {
        let win_pct = meal.win_pct();
        Self {
            id: meal.id,
            name: meal.name,
            cuisine: meal.cuisine,
            price: meal.price,
            difficulty: meal.difficulty,
            battles: meal.battles,
            wins: meal.wins,
            win_pct,
        }
    }
}
