//! Repository for the `meals` table.
//!
//! Plain SQL returning raw rows and `sqlx::Error`. Soft-delete visibility
//! rules and domain errors are applied one level up in
//! [`MealCatalog`](crate::catalog::MealCatalog).

use mealmax_core::meal::{BattleOutcome, LeaderboardSort, NewMeal};
use mealmax_core::types::DbId;
use sqlx::{Executor, PgExecutor, PgPool};

use crate::models::meal::MealRow;

/// Column list shared across queries.
const COLUMNS: &str =
    "id, name, cuisine, price, difficulty, battles, wins, deleted, created_at, updated_at";

/// Schema for the `meals` table, replayed by [`MealRepo::reset`].
const MEALS_SCHEMA: &str = include_str!("../../../../db/migrations/20260101000001_create_meals.sql");

/// Name of the partial unique index guarding live meal names.
pub const LIVE_NAME_CONSTRAINT: &str = "uq_meals_name_live";

pub struct MealRepo;

impl MealRepo {
    /// Insert a new meal with zeroed counters, returning the created row.
    ///
    /// A live meal with the same name violates `uq_meals_name_live`.
    pub async fn create(pool: &PgPool, input: &NewMeal) -> Result<MealRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO meals (name, cuisine, price, difficulty)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MealRow>(&query)
            .bind(&input.name)
            .bind(&input.cuisine)
            .bind(input.price)
            .bind(input.difficulty.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a meal by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MealRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM meals WHERE id = $1");
        sqlx::query_as::<_, MealRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a meal by name, including soft-deleted rows.
    ///
    /// A name may belong to one live row and any number of deleted ones; the
    /// live row wins, then the most recently created deleted row.
    pub async fn find_by_name_include_deleted(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<MealRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM meals
             WHERE name = $1
             ORDER BY deleted ASC, id DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, MealRow>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a meal. Returns `true` if a live row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE meals SET deleted = TRUE, updated_at = NOW()
             WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a battle outcome in a single statement: `battles + 1`, and
    /// `wins + 1` on a win.
    ///
    /// Returns `None` if no live row with the given `id` exists. Accepts a
    /// pool or an open transaction.
    pub async fn record_outcome<'e, E>(
        executor: E,
        id: DbId,
        outcome: BattleOutcome,
    ) -> Result<Option<MealRow>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE meals SET
                battles = battles + 1,
                wins = wins + CASE WHEN $2 THEN 1 ELSE 0 END,
                updated_at = NOW()
             WHERE id = $1 AND deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MealRow>(&query)
            .bind(id)
            .bind(outcome.is_win())
            .fetch_optional(executor)
            .await
    }

    /// Live meals ordered by the requested metric, descending. Ties fall back
    /// to insertion order.
    pub async fn leaderboard(
        pool: &PgPool,
        sort: LeaderboardSort,
    ) -> Result<Vec<MealRow>, sqlx::Error> {
        let order_by = match sort {
            LeaderboardSort::Wins => "wins DESC, id ASC",
            LeaderboardSort::WinPct => {
                "(CASE WHEN battles = 0 THEN 0 ELSE wins::float8 / battles END) DESC, id ASC"
            }
        };
        let query = format!(
            "SELECT {COLUMNS} FROM meals
             WHERE deleted = FALSE
             ORDER BY {order_by}"
        );
        sqlx::query_as::<_, MealRow>(&query).fetch_all(pool).await
    }

    /// Drop and recreate the `meals` table in one transaction. Every row,
    /// deleted or not, is purged and ids restart at 1.
    pub async fn reset(pool: &PgPool) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("DROP TABLE IF EXISTS meals")
            .execute(&mut *tx)
            .await?;
        (&mut *tx).execute(sqlx::raw_sql(MEALS_SCHEMA)).await?;
        tx.commit().await
    }
}
