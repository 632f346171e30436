//! Meal domain vocabulary: difficulty levels, soft-delete status, battle
//! outcomes, leaderboard ordering, and input validation.
//!
//! No database access. The db crate converts rows into these types and the
//! HTTP layer parses request tokens through the `FromStr` impls here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::StatCount;

/// Entity label used in error messages.
pub const MEAL_ENTITY: &str = "Meal";

/// Maximum length of a meal name.
pub const MAX_NAME_LEN: u64 = 255;

/// Maximum length of a cuisine label.
pub const MAX_CUISINE_LEN: u64 = 100;

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

/// How demanding a meal is to cook. Stored as `LOW` / `MED` / `HIGH` text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Med,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Med, Difficulty::High];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Low => "LOW",
            Difficulty::Med => "MED",
            Difficulty::High => "HIGH",
        }
    }

    /// Amount subtracted from a meal's battle score.
    pub fn score_modifier(self) -> f64 {
        match self {
            Difficulty::Low => 1.0,
            Difficulty::Med => 2.0,
            Difficulty::High => 3.0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CoreError;

    /// Exact, case-sensitive match against `LOW`, `MED`, `HIGH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid difficulty level: {s}. Must be 'LOW', 'MED', or 'HIGH'."
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Soft-delete status
// ---------------------------------------------------------------------------

/// Visibility tag of a meal row. Every read path checks it explicitly so that
/// "never existed" and "deleted" produce different errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MealStatus {
    Active,
    Deleted,
}

impl MealStatus {
    pub fn from_deleted_flag(deleted: bool) -> Self {
        if deleted {
            MealStatus::Deleted
        } else {
            MealStatus::Active
        }
    }

    pub fn is_deleted(self) -> bool {
        self == MealStatus::Deleted
    }
}

// ---------------------------------------------------------------------------
// Battle outcome
// ---------------------------------------------------------------------------

/// Result recorded against a meal after a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleOutcome {
    Win,
    Loss,
}

impl BattleOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            BattleOutcome::Win => "win",
            BattleOutcome::Loss => "loss",
        }
    }

    pub fn is_win(self) -> bool {
        self == BattleOutcome::Win
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BattleOutcome {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(BattleOutcome::Win),
            "loss" => Ok(BattleOutcome::Loss),
            other => Err(CoreError::Validation(format!(
                "Invalid result: {other}. Expected 'win' or 'loss'."
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Leaderboard ordering
// ---------------------------------------------------------------------------

/// Metric the leaderboard is sorted by (descending).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    #[default]
    Wins,
    WinPct,
}

impl LeaderboardSort {
    pub fn as_str(self) -> &'static str {
        match self {
            LeaderboardSort::Wins => "wins",
            LeaderboardSort::WinPct => "win_pct",
        }
    }
}

impl FromStr for LeaderboardSort {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wins" => Ok(LeaderboardSort::Wins),
            "win_pct" => Ok(LeaderboardSort::WinPct),
            other => Err(CoreError::Validation(format!(
                "Invalid sort_by parameter: {other}"
            ))),
        }
    }
}

/// `wins / battles`, or `0.0` for a meal that has never battled.
pub fn win_pct(wins: StatCount, battles: StatCount) -> f64 {
    if battles <= 0 {
        return 0.0;
    }
    f64::from(wins) / f64::from(battles)
}

// ---------------------------------------------------------------------------
// Price validation
// ---------------------------------------------------------------------------

fn invalid_price(raw: impl fmt::Display) -> CoreError {
    CoreError::Validation(format!(
        "Invalid price: {raw}. Price must be a positive number."
    ))
}

/// Accept only finite prices strictly greater than zero.
pub fn validate_price(price: f64) -> Result<f64, CoreError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(invalid_price(price))
    }
}

/// Coerce a loosely typed JSON price (number or numeric string) into a
/// validated `f64`. The error carries the raw value as received.
pub fn coerce_price(raw: &serde_json::Value) -> Result<f64, CoreError> {
    let parsed = match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(match raw {
            serde_json::Value::String(s) => invalid_price(s),
            other => invalid_price(other),
        }),
    }
}

// ---------------------------------------------------------------------------
// New meal input
// ---------------------------------------------------------------------------

/// Validated input for creating a meal.
///
/// Construct through [`NewMeal::new`], which checks price, then difficulty,
/// then the length rules declared on the fields.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewMeal {
    #[validate(length(min = 1, max = MAX_NAME_LEN))]
    pub name: String,
    #[validate(length(max = MAX_CUISINE_LEN))]
    pub cuisine: String,
    pub price: f64,
    pub difficulty: Difficulty,
}

impl NewMeal {
    pub fn new(
        name: impl Into<String>,
        cuisine: impl Into<String>,
        price: f64,
        difficulty: &str,
    ) -> Result<Self, CoreError> {
        let price = validate_price(price)?;
        let difficulty = difficulty.parse::<Difficulty>()?;

        let meal = Self {
            name: name.into(),
            cuisine: cuisine.into(),
            price,
            difficulty,
        };
        meal.validate().map_err(|e| {
            CoreError::Validation(format!(
                "Invalid meal '{}' (name 1-{MAX_NAME_LEN} chars, cuisine up to {MAX_CUISINE_LEN} chars): {e}",
                meal.name
            ))
        })?;
        Ok(meal)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    // -- Difficulty ------------------------------------------------------------

    #[test]
    fn difficulty_parses_exact_tokens() {
        assert_eq!("LOW".parse::<Difficulty>().unwrap(), Difficulty::Low);
        assert_eq!("MED".parse::<Difficulty>().unwrap(), Difficulty::Med);
        assert_eq!("HIGH".parse::<Difficulty>().unwrap(), Difficulty::High);
    }

    #[test]
    fn difficulty_rejects_unknown_tokens() {
        let err = "SUPER".parse::<Difficulty>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid difficulty level: SUPER. Must be 'LOW', 'MED', or 'HIGH'."
        );
        assert_matches!("1".parse::<Difficulty>(), Err(CoreError::Validation(_)));
        assert_matches!("med".parse::<Difficulty>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn difficulty_modifiers() {
        assert_eq!(Difficulty::Low.score_modifier(), 1.0);
        assert_eq!(Difficulty::Med.score_modifier(), 2.0);
        assert_eq!(Difficulty::High.score_modifier(), 3.0);
    }

    #[test]
    fn difficulty_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Difficulty::Med).unwrap(), json!("MED"));
    }

    // -- Outcome / sort ----------------------------------------------------------

    #[test]
    fn outcome_tokens() {
        assert_eq!("win".parse::<BattleOutcome>().unwrap(), BattleOutcome::Win);
        assert_eq!("loss".parse::<BattleOutcome>().unwrap(), BattleOutcome::Loss);
        let err = "tie".parse::<BattleOutcome>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid result: tie. Expected 'win' or 'loss'.");
    }

    #[test]
    fn leaderboard_sort_tokens() {
        assert_eq!("wins".parse::<LeaderboardSort>().unwrap(), LeaderboardSort::Wins);
        assert_eq!(
            "win_pct".parse::<LeaderboardSort>().unwrap(),
            LeaderboardSort::WinPct
        );
        let err = "loss".parse::<LeaderboardSort>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid sort_by parameter: loss");
    }

    #[test]
    fn win_pct_is_zero_without_battles() {
        assert_eq!(win_pct(0, 0), 0.0);
        assert!((win_pct(3, 4) - 0.75).abs() < 1e-9);
    }

    // -- Price -----------------------------------------------------------------

    #[test]
    fn price_must_be_positive_and_finite() {
        assert_matches!(validate_price(0.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_price(-5.0), Err(CoreError::Validation(_)));
        assert_matches!(validate_price(f64::NAN), Err(CoreError::Validation(_)));
        assert_matches!(validate_price(f64::INFINITY), Err(CoreError::Validation(_)));
        assert_eq!(validate_price(10.99).unwrap(), 10.99);
    }

    #[test]
    fn coerce_price_accepts_numeric_strings() {
        assert_eq!(coerce_price(&json!(12.5)).unwrap(), 12.5);
        assert_eq!(coerce_price(&json!(" 7.25 ")).unwrap(), 7.25);
    }

    #[test]
    fn coerce_price_reports_raw_value() {
        let err = coerce_price(&json!("invalid")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid price: invalid. Price must be a positive number."
        );
        assert_matches!(coerce_price(&json!(null)), Err(CoreError::Validation(_)));
        assert_matches!(coerce_price(&json!(-1)), Err(CoreError::Validation(_)));
    }

    // -- NewMeal ---------------------------------------------------------------

    #[test]
    fn new_meal_validates_price_before_difficulty() {
        let err = NewMeal::new("Soup", "French", -1.0, "SUPER").unwrap_err();
        assert!(err.to_string().starts_with("Invalid price"));
    }

    #[test]
    fn new_meal_rejects_empty_name() {
        assert_matches!(
            NewMeal::new("", "French", 3.0, "LOW"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn new_meal_length_limits_follow_constants() {
        let name = |n: u64| "n".repeat(n as usize);
        let cuisine = |n: u64| "c".repeat(n as usize);

        assert!(NewMeal::new(name(MAX_NAME_LEN), cuisine(MAX_CUISINE_LEN), 1.0, "LOW").is_ok());
        assert_matches!(
            NewMeal::new(name(MAX_NAME_LEN + 1), "French", 1.0, "LOW"),
            Err(CoreError::Validation(msg)) if msg.contains("name 1-255 chars")
        );
        assert_matches!(
            NewMeal::new("Soup", cuisine(MAX_CUISINE_LEN + 1), 1.0, "LOW"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn new_meal_accepts_valid_input() {
        let meal = NewMeal::new("Pasta", "Italian", 10.99, "MED").unwrap();
        assert_eq!(meal.difficulty, Difficulty::Med);
        assert_eq!(meal.name, "Pasta");
    }

    #[test]
    fn status_from_flag() {
        assert!(MealStatus::from_deleted_flag(true).is_deleted());
        assert!(!MealStatus::from_deleted_flag(false).is_deleted());
    }
}
