//! Random source contract used to perturb battle outcomes.
//!
//! Implementations return one uniformly distributed fraction in `[0, 1)` per
//! call. The HTTP-backed implementation lives in `mealmax-battle`.

use async_trait::async_trait;

use crate::error::CoreError;

/// Supplies the random delta for a battle.
#[async_trait]
pub trait RandomSource: Send + Sync {
    /// Draw one value in `[0, 1)`.
    ///
    /// Fails with `Validation` for malformed payloads, `Runtime` for transport
    /// failures and `Timeout` when the call exceeds its budget.
    async fn draw(&self) -> Result<f64, CoreError>;
}

/// Parse a plain-text payload into a fraction in `[0, 1)`.
///
/// `provider` names the upstream in the error message.
pub fn parse_fraction(provider: &str, payload: &str) -> Result<f64, CoreError> {
    let trimmed = payload.trim();
    let value: f64 = trimmed.parse().map_err(|_| {
        CoreError::Validation(format!("Invalid response from {provider}: {trimmed}"))
    })?;

    if !(0.0..1.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "Invalid response from {provider}: {trimmed} is outside [0, 1)"
        )));
    }
    Ok(value)
}

/// A source that always returns the same value. Used where a battle must be
/// reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub f64);

#[async_trait]
impl RandomSource for FixedRandom {
    async fn draw(&self) -> Result<f64, CoreError> {
        if (0.0..1.0).contains(&self.0) {
            Ok(self.0)
        } else {
            Err(CoreError::Validation(format!(
                "Fixed random value {} is outside [0, 1)",
                self.0
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_trimmed_fraction() {
        assert_eq!(parse_fraction("random.org", "0.42\n").unwrap(), 0.42);
        assert_eq!(parse_fraction("random.org", "0").unwrap(), 0.0);
    }

    #[test]
    fn rejects_non_numeric_payload_with_raw_text() {
        let err = parse_fraction("random.org", "invalid_response").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid response from random.org: invalid_response"
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert_matches!(parse_fraction("x", "1.0"), Err(CoreError::Validation(_)));
        assert_matches!(parse_fraction("x", "-0.1"), Err(CoreError::Validation(_)));
        assert_matches!(parse_fraction("x", "NaN"), Err(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn fixed_random_returns_its_value() {
        assert_eq!(FixedRandom(0.1).draw().await.unwrap(), 0.1);
        assert_matches!(FixedRandom(1.5).draw().await, Err(CoreError::Validation(_)));
    }
}
