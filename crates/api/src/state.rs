use std::sync::Arc;

use mealmax_battle::BattleEngine;
use mealmax_db::MealCatalog;
use tokio::sync::Mutex;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and catalog are handles, the rest sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mealmax_db::DbPool,
    /// Meal catalog over the same pool.
    pub catalog: MealCatalog,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The single battle arena. Staging and fighting are serialized through the lock.
    pub battle: Arc<Mutex<BattleEngine>>,
}

impl AppState {
    pub fn new(pool: mealmax_db::DbPool, config: ServerConfig, engine: BattleEngine) -> Self {
        Self {
            catalog: MealCatalog::new(pool.clone()),
            pool,
            config: Arc::new(config),
            battle: Arc::new(Mutex::new(engine)),
        }
    }
}
