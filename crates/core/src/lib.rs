//! Domain core for the meal battle service.
//!
//! Holds everything that needs no I/O: the error taxonomy, meal vocabulary
//! and validation, battle scoring, and the random source contract.

pub mod battle;
pub mod error;
pub mod meal;
pub mod random;
pub mod types;
