//! Meal battles: the engine that stages and fights two meals, the catalog
//! seam it records results through, and the random.org random source.

pub mod engine;
pub mod random_org;
pub mod store;

pub use engine::{BattleEngine, BattleReport};
pub use random_org::{RandomOrgClient, RandomOrgConfig};
pub use store::CombatantStore;
