use std::str::FromStr;
use std::time::Duration;

use mealmax_battle::RandomOrgConfig;
use mealmax_core::error::CoreError;
use mealmax_db::DbConfig;

/// Server configuration loaded from environment variables.
///
/// Everything except `DATABASE_URL` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub database: DbConfig,
    pub random: RandomOrgConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `DATABASE_URL`            | required                   |
    /// | `DB_MAX_CONNECTIONS`      | `10`                       |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `5`                        |
    /// | `DB_STATEMENT_TIMEOUT_SECS` | `5`                      |
    /// | `RANDOM_ORG_URL`          | random.org decimal fractions |
    /// | `RANDOM_TIMEOUT_SECS`     | `5`                        |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = parse_or(&lookup, "PORT", 3000)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CoreError::Validation("DATABASE_URL must be set".into()))?;
        let database = DbConfig {
            url: database_url,
            max_connections: parse_or(
                &lookup,
                "DB_MAX_CONNECTIONS",
                DbConfig::DEFAULT_MAX_CONNECTIONS,
            )?,
            acquire_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_ACQUIRE_TIMEOUT_SECS",
                DbConfig::DEFAULT_ACQUIRE_TIMEOUT.as_secs(),
            )?),
            statement_timeout: Duration::from_secs(parse_or(
                &lookup,
                "DB_STATEMENT_TIMEOUT_SECS",
                DbConfig::DEFAULT_STATEMENT_TIMEOUT.as_secs(),
            )?),
        };

        let defaults = RandomOrgConfig::default();
        let random = RandomOrgConfig {
            url: lookup("RANDOM_ORG_URL").unwrap_or(defaults.url),
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "RANDOM_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database,
            random,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, CoreError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| CoreError::Validation(format!("{key} is invalid ('{raw}'): {e}"))),
    }
}
