//! Meal catalog: the domain-facing boundary over [`MealRepo`].
//!
//! Every operation returns [`CoreError`]. Storage failures are classified
//! here so callers never see raw `sqlx::Error` values, and soft-deleted rows
//! are reported as `Deleted` rather than `NotFound`.

use mealmax_core::error::CoreError;
use mealmax_core::meal::{BattleOutcome, LeaderboardSort, NewMeal, MEAL_ENTITY};
use mealmax_core::types::DbId;

use crate::models::meal::{LeaderboardEntry, Meal, MealRow};
use crate::repositories::meal_repo::LIVE_NAME_CONSTRAINT;
use crate::repositories::MealRepo;
use crate::DbPool;

/// PostgreSQL unique_violation.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL query_canceled, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";

/// Persistent catalog of meals. Cheap to clone (wraps the pool).
#[derive(Clone)]
pub struct MealCatalog {
    pool: DbPool,
}

impl MealCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Persist a new meal with zeroed counters.
    ///
    /// Fails with `Conflict` when a live meal already uses the name.
    pub async fn create(&self, input: &NewMeal) -> Result<Meal, CoreError> {
        let row = MealRepo::create(&self.pool, input).await.map_err(|err| {
            if is_live_name_violation(&err) {
                tracing::warn!(name = %input.name, "Duplicate meal name rejected");
                CoreError::Conflict(format!("Meal with name '{}' already exists", input.name))
            } else {
                storage_error(err)
            }
        })?;

        let meal = Meal::try_from(row)?;
        tracing::info!(
            meal_id = meal.id,
            name = %meal.name,
            cuisine = %meal.cuisine,
            price = meal.price,
            difficulty = %meal.difficulty,
            "Meal created"
        );
        Ok(meal)
    }

    /// Fetch a live meal by id.
    pub async fn get_by_id(&self, id: DbId) -> Result<Meal, CoreError> {
        tracing::debug!(meal_id = id, "Fetching meal by id");
        let row = MealRepo::find_by_id_include_deleted(&self.pool, id)
            .await
            .map_err(storage_error)?;
        live_by_id(id, row)
    }

    /// Fetch a live meal by name.
    pub async fn get_by_name(&self, name: &str) -> Result<Meal, CoreError> {
        tracing::debug!(name, "Fetching meal by name");
        let row = MealRepo::find_by_name_include_deleted(&self.pool, name)
            .await
            .map_err(storage_error)?;

        match row {
            None => Err(CoreError::NameNotFound {
                entity: MEAL_ENTITY,
                name: name.to_string(),
            }),
            Some(row) if row.deleted => Err(CoreError::NameDeleted {
                entity: MEAL_ENTITY,
                name: name.to_string(),
            }),
            Some(row) => Meal::try_from(row),
        }
    }

    /// Soft-delete a meal.
    ///
    /// The visibility check and the update are separate statements; a
    /// concurrent delete in between surfaces as `Deleted`.
    pub async fn delete(&self, id: DbId) -> Result<(), CoreError> {
        self.get_by_id(id).await?;

        let deleted = MealRepo::soft_delete(&self.pool, id)
            .await
            .map_err(storage_error)?;
        if !deleted {
            return Err(deleted_error(id));
        }

        tracing::info!(meal_id = id, "Meal soft-deleted");
        Ok(())
    }

    /// Record a battle outcome against a live meal.
    pub async fn update_stats(&self, id: DbId, outcome: BattleOutcome) -> Result<Meal, CoreError> {
        self.get_by_id(id).await?;
        self.apply_outcome(id, outcome).await
    }

    /// Like [`update_stats`](Self::update_stats) but takes the raw outcome
    /// token. The deleted / not-found check runs before the token is parsed,
    /// so a deleted meal reports `Deleted` even for a bad token.
    pub async fn update_stats_token(&self, id: DbId, token: &str) -> Result<Meal, CoreError> {
        self.get_by_id(id).await?;
        let outcome = token.parse::<BattleOutcome>()?;
        self.apply_outcome(id, outcome).await
    }

    /// Record both sides of a battle in one transaction: a win for `winner`,
    /// then a loss for `loser`.
    ///
    /// If either meal is missing or deleted the transaction is rolled back and
    /// neither counter moves.
    pub async fn record_battle(&self, winner: DbId, loser: DbId) -> Result<(Meal, Meal), CoreError> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let won = MealRepo::record_outcome(&mut *tx, winner, BattleOutcome::Win)
            .await
            .map_err(storage_error)?;
        let Some(won) = won else {
            tx.rollback().await.map_err(storage_error)?;
            return Err(self.unmatched_update(winner).await);
        };

        let lost = MealRepo::record_outcome(&mut *tx, loser, BattleOutcome::Loss)
            .await
            .map_err(storage_error)?;
        let Some(lost) = lost else {
            tx.rollback().await.map_err(storage_error)?;
            tracing::warn!(winner, loser, "Battle result rolled back");
            return Err(self.unmatched_update(loser).await);
        };

        tx.commit().await.map_err(storage_error)?;

        let (won, lost) = (Meal::try_from(won)?, Meal::try_from(lost)?);
        tracing::info!(
            winner,
            loser,
            winner_wins = won.wins,
            loser_battles = lost.battles,
            "Battle result recorded"
        );
        Ok((won, lost))
    }

    /// Live meals ranked by `sort`, descending, each with its win percentage.
    pub async fn leaderboard(&self, sort: LeaderboardSort) -> Result<Vec<LeaderboardEntry>, CoreError> {
        let rows = MealRepo::leaderboard(&self.pool, sort)
            .await
            .map_err(storage_error)?;

        tracing::debug!(sort = sort.as_str(), count = rows.len(), "Leaderboard computed");
        rows.into_iter()
            .map(|row| Meal::try_from(row).map(LeaderboardEntry::from))
            .collect()
    }

    /// Parse `sort_by` and return the leaderboard.
    pub async fn leaderboard_by(&self, sort_by: &str) -> Result<Vec<LeaderboardEntry>, CoreError> {
        let sort = sort_by.parse::<LeaderboardSort>()?;
        self.leaderboard(sort).await
    }

    /// Drop and recreate the whole catalog. Test and bootstrap use only.
    pub async fn reset(&self) -> Result<(), CoreError> {
        MealRepo::reset(&self.pool).await.map_err(storage_error)?;
        tracing::warn!("Meal catalog reset: all meals purged");
        Ok(())
    }

    async fn apply_outcome(&self, id: DbId, outcome: BattleOutcome) -> Result<Meal, CoreError> {
        let row = MealRepo::record_outcome(&self.pool, id, outcome)
            .await
            .map_err(storage_error)?;

        let Some(row) = row else {
            return Err(self.unmatched_update(id).await);
        };

        let meal = Meal::try_from(row)?;
        tracing::info!(
            meal_id = id,
            outcome = %outcome,
            battles = meal.battles,
            wins = meal.wins,
            "Meal stats updated"
        );
        Ok(meal)
    }

    /// Explain why a stats update matched no live row: the meal was deleted
    /// (or purged) after the visibility check.
    async fn unmatched_update(&self, id: DbId) -> CoreError {
        let current = match MealRepo::find_by_id_include_deleted(&self.pool, id).await {
            Ok(current) => current,
            Err(err) => return storage_error(err),
        };
        match live_by_id(id, current) {
            Err(err) => err,
            Ok(_) => CoreError::Internal(format!("Stats update for meal {id} matched no rows")),
        }
    }
}

fn live_by_id(id: DbId, row: Option<MealRow>) -> Result<Meal, CoreError> {
    match row {
        None => Err(CoreError::NotFound {
            entity: MEAL_ENTITY,
            id,
        }),
        Some(row) if row.deleted => Err(deleted_error(id)),
        Some(row) => Meal::try_from(row),
    }
}

fn deleted_error(id: DbId) -> CoreError {
    CoreError::Deleted {
        entity: MEAL_ENTITY,
        id,
    }
}

fn is_live_name_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err.constraint() == Some(LIVE_NAME_CONSTRAINT)
        }
        _ => false,
    }
}

/// Classify a sqlx error into the domain taxonomy.
///
/// - Unique violations map to `Conflict`.
/// - Pool acquisition timeouts and cancelled statements map to `Timeout`.
/// - Transport failures (I/O, TLS, closed pool) map to `Runtime`.
/// - Everything else is `Internal`.
pub fn storage_error(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            CoreError::Conflict(format!(
                "Duplicate value violates unique constraint: {constraint}"
            ))
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(QUERY_CANCELED) => {
            tracing::error!(error = %db_err, "Database statement timed out");
            CoreError::Timeout("Database statement timed out".to_string())
        }
        sqlx::Error::PoolTimedOut => {
            tracing::error!("Timed out waiting for a database connection");
            CoreError::Timeout("Timed out waiting for a database connection".to_string())
        }
        transport @ (sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolClosed) => {
            tracing::error!(error = %transport, "Database transport error");
            CoreError::Runtime(format!("Database request failed: {transport}"))
        }
        other => {
            tracing::error!(error = %other, "Database error");
            CoreError::Internal(format!("Database error: {other}"))
        }
    }
}
