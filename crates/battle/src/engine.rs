//! Battle engine: stages two meals, scores them, draws a random delta and
//! records the result in the catalog.

use std::sync::Arc;

use mealmax_core::battle::{self, CombatantSlot, Verdict};
use mealmax_core::error::CoreError;
use mealmax_core::meal::MEAL_ENTITY;
use mealmax_core::random::RandomSource;
use mealmax_core::types::DbId;
use mealmax_db::models::meal::Meal;
use serde::Serialize;

use crate::store::CombatantStore;

/// Summary of a finished battle.
#[derive(Debug, Clone, Serialize)]
pub struct BattleReport {
    pub winner_id: DbId,
    pub winner: String,
    pub loser_id: DbId,
    pub loser: String,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// Holds the combatant slot and the collaborators a battle needs.
///
/// State machine: empty → one staged → two staged via [`stage`](Self::stage);
/// [`battle`](Self::battle) leaves the slot as it is; [`clear`](Self::clear)
/// empties it from any state.
pub struct BattleEngine {
    store: Arc<dyn CombatantStore>,
    random: Arc<dyn RandomSource>,
    combatants: CombatantSlot<Meal>,
}

impl BattleEngine {
    pub fn new(store: Arc<dyn CombatantStore>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            store,
            random,
            combatants: CombatantSlot::new(),
        }
    }

    /// Stage an already-fetched meal.
    ///
    /// Fails with `Deleted` for a soft-deleted meal and `Capacity` when two
    /// combatants are already staged.
    pub fn stage(&mut self, meal: Meal) -> Result<(), CoreError> {
        if meal.is_deleted() {
            return Err(CoreError::Deleted {
                entity: MEAL_ENTITY,
                id: meal.id,
            });
        }

        let name = meal.name.clone();
        if let Err(err) = self.combatants.push(meal) {
            tracing::error!(meal = %name, "Attempted to add combatant but combatants list is full");
            return Err(err);
        }

        tracing::info!(
            meal = %name,
            staged = ?self.combatant_names(),
            "Combatant added"
        );
        Ok(())
    }

    /// Look a meal up in the catalog and stage it.
    pub async fn stage_by_id(&mut self, id: DbId) -> Result<Meal, CoreError> {
        let meal = self.store.get_by_id(id).await?;
        self.stage(meal.clone())?;
        Ok(meal)
    }

    /// Empty the slot. Safe to call repeatedly.
    pub fn clear(&mut self) {
        tracing::info!(cleared = self.combatants.len(), "Clearing combatants");
        self.combatants.clear();
    }

    /// Staged meals in insertion order.
    pub fn combatants(&self) -> &[Meal] {
        self.combatants.as_slice()
    }

    /// Battle score of a single meal.
    pub fn score(meal: &Meal) -> f64 {
        let score = battle::battle_score(meal.price, &meal.cuisine, meal.difficulty);
        tracing::debug!(
            meal = %meal.name,
            price = meal.price,
            cuisine = %meal.cuisine,
            difficulty = %meal.difficulty,
            score,
            "Battle score computed"
        );
        score
    }

    /// Run a battle and return the winner's name.
    pub async fn battle(&self) -> Result<String, CoreError> {
        self.fight().await.map(|report| report.winner)
    }

    /// Run a battle between the two staged meals.
    ///
    /// Both combatants must still be live in the store. Stats are recorded
    /// winner first, then loser, through [`CombatantStore::record_battle`]; a
    /// failure records nothing. The slot is left intact.
    pub async fn fight(&self) -> Result<BattleReport, CoreError> {
        let (first, second) = self.combatants.pair().inspect_err(|_| {
            tracing::error!(staged = self.combatants.len(), "Not enough combatants to start a battle");
        })?;
        tracing::info!(first = %first.name, second = %second.name, "Battle started");

        // Staged copies may be stale; both must still be live before anything is written.
        for combatant in [first, second] {
            self.store.get_by_id(combatant.id).await.inspect_err(|e| {
                tracing::error!(meal = %combatant.name, error = %e, "Staged combatant is no longer available");
            })?;
        }

        let score_a = Self::score(first);
        let score_b = Self::score(second);

        let random_delta = self.random.draw().await?;
        let verdict = battle::resolve(score_a, score_b, random_delta);
        tracing::info!(
            score_a,
            score_b,
            normalized_diff = verdict.normalized_diff,
            random_delta,
            upset = verdict.upset,
            "Battle resolved"
        );

        let pair = [first, second];
        let winner = pair[verdict.winner];
        let loser = pair[verdict.loser];

        self.store.record_battle(winner.id, loser.id).await?;

        tracing::info!(winner = %winner.name, loser = %loser.name, "Battle finished");
        Ok(BattleReport {
            winner_id: winner.id,
            winner: winner.name.clone(),
            loser_id: loser.id,
            loser: loser.name.clone(),
            verdict,
        })
    }

    fn combatant_names(&self) -> Vec<&str> {
        self.combatants
            .as_slice()
            .iter()
            .map(|m| m.name.as_str())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
