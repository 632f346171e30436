//! The slice of the meal catalog the battle engine is allowed to touch.

use async_trait::async_trait;
use mealmax_core::error::CoreError;
use mealmax_core::meal::BattleOutcome;
use mealmax_core::types::DbId;
use mealmax_db::models::meal::Meal;
use mealmax_db::MealCatalog;

/// Catalog operations used by [`BattleEngine`](crate::engine::BattleEngine).
///
/// The engine never creates, deletes or ranks meals; it only looks combatants
/// up and records results.
#[async_trait]
pub trait CombatantStore: Send + Sync {
    /// Fetch a live meal. Deleted meals fail with `Deleted`.
    async fn get_by_id(&self, id: DbId) -> Result<Meal, CoreError>;

    /// Record one battle result against a live meal.
    async fn update_stats(&self, id: DbId, outcome: BattleOutcome) -> Result<(), CoreError>;

    /// Record a finished battle: a win for `winner`, then a loss for `loser`.
    ///
    /// The default issues the two updates in order. Stores that can should
    /// apply both atomically so a failure leaves neither recorded.
    async fn record_battle(&self, winner: DbId, loser: DbId) -> Result<(), CoreError> {
        self.update_stats(winner, BattleOutcome::Win).await?;
        self.update_stats(loser, BattleOutcome::Loss).await
    }
}

#[async_trait]
impl CombatantStore for MealCatalog {
    async fn get_by_id(&self, id: DbId) -> Result<Meal, CoreError> {
        MealCatalog::get_by_id(self, id).await
    }

    async fn update_stats(&self, id: DbId, outcome: BattleOutcome) -> Result<(), CoreError> {
        MealCatalog::update_stats(self, id, outcome).await.map(|_| ())
    }

    async fn record_battle(&self, winner: DbId, loser: DbId) -> Result<(), CoreError> {
        MealCatalog::record_battle(self, winner, loser).await.map(|_| ())
    }
}
