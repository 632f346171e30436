use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub mod catalog;
pub mod models;
pub mod repositories;

pub use catalog::MealCatalog;

pub type DbPool = sqlx::PgPool;

/// Connection settings for the meal store.
///
/// Built by the binary from the environment and passed in explicitly; the
/// library never reads environment variables itself.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Postgres connection URL.
    pub url: String,
    /// Pool size (default: `10`).
    pub max_connections: u32,
    /// How long a caller waits for a pooled connection before the operation
    /// fails with a timeout (default: 5 seconds).
    pub acquire_timeout: Duration,
    /// Server-side `statement_timeout` applied to every connection. A query
    /// running past it is cancelled and surfaces as a timeout (default: 5 seconds).
    pub statement_timeout: Duration,
}

impl DbConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Self::DEFAULT_ACQUIRE_TIMEOUT,
            statement_timeout: Self::DEFAULT_STATEMENT_TIMEOUT,
        }
    }
}

/// Create a connection pool from the given configuration.
pub async fn create_pool(config: &DbConfig) -> Result<DbPool, sqlx::Error> {
    let options = with_statement_timeout(
        PgConnectOptions::from_str(&config.url)?,
        config.statement_timeout,
    );
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
}

/// Set the session `statement_timeout` (milliseconds) on every connection
/// opened with `options`.
pub fn with_statement_timeout(options: PgConnectOptions, timeout: Duration) -> PgConnectOptions {
    options.options([("statement_timeout", timeout.as_millis().to_string())])
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
