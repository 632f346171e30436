//! Battle scoring, winner resolution, and the combatant slot.
//!
//! Pure functions only. The engine in `mealmax-battle` supplies the random
//! draw and persists the result.

use serde::Serialize;

use crate::error::CoreError;
use crate::meal::Difficulty;

/// A battle always has exactly this many combatants.
pub const MAX_COMBATANTS: usize = 2;

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// `price * chars(cuisine) - difficulty modifier`.
///
/// No bounds check: any finite inputs yield a finite score, which may be
/// negative for cheap meals with short cuisine labels.
pub fn battle_score(price: f64, cuisine: &str, difficulty: Difficulty) -> f64 {
    price * cuisine.chars().count() as f64 - difficulty.score_modifier()
}

/// `|a - b| / (a + b)` clamped to `[0, 1]`.
///
/// Returns `0.0` when the ratio is not a finite number (both scores zero, or
/// opposite scores summing to zero).
pub fn normalized_difference(score_a: f64, score_b: f64) -> f64 {
    let ratio = (score_a - score_b).abs() / (score_a + score_b);
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// Winner resolution
// ---------------------------------------------------------------------------

/// Positions (within the combatant slot) of the winner and loser, plus the
/// inputs that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    pub winner: usize,
    pub loser: usize,
    pub score_a: f64,
    pub score_b: f64,
    pub normalized_diff: f64,
    pub random_delta: f64,
    /// True when the lower-scoring combatant won.
    pub upset: bool,
}

/// Decide a battle between combatant 0 (`score_a`) and combatant 1
/// (`score_b`) given a random draw in `[0, 1)`.
///
/// The higher scorer wins when `random_delta < normalized_diff`, otherwise the
/// lower scorer wins. Equal scores treat combatant 0 as the higher scorer.
pub fn resolve(score_a: f64, score_b: f64, random_delta: f64) -> Verdict {
    let normalized_diff = normalized_difference(score_a, score_b);
    let (higher, lower) = if score_a >= score_b { (0, 1) } else { (1, 0) };
    let favourite_holds = random_delta < normalized_diff;

    let (winner, loser) = if favourite_holds {
        (higher, lower)
    } else {
        (lower, higher)
    };

    Verdict {
        winner,
        loser,
        score_a,
        score_b,
        normalized_diff,
        random_delta,
        upset: !favourite_holds,
    }
}

// ---------------------------------------------------------------------------
// Combatant slot
// ---------------------------------------------------------------------------

/// Ordered staging area holding at most [`MAX_COMBATANTS`] entries.
#[derive(Debug, Clone)]
pub struct CombatantSlot<T> {
    entries: Vec<T>,
}

impl<T> Default for CombatantSlot<T> {
    fn default() -> Self {
        Self {
            entries: Vec::with_capacity(MAX_COMBATANTS),
        }
    }
}

impl<T> CombatantSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, failing with `Capacity` once the slot is full.
    pub fn push(&mut self, entry: T) -> Result<(), CoreError> {
        if self.is_full() {
            return Err(CoreError::Capacity(
                "Combatant list is full, cannot add more combatants.".to_string(),
            ));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_COMBATANTS
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    /// Both combatants, or `Precondition` when fewer than two are staged.
    pub fn pair(&self) -> Result<(&T, &T), CoreError> {
        match self.entries.as_slice() {
            [a, b] => Ok((a, b)),
            _ => Err(CoreError::Precondition(
                "Two combatants must be prepped for a battle.".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
