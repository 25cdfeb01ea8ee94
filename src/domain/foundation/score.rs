//! Score value object for evaluation dimensions (0 to 10 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Maximum score on the evaluation scale.
pub const MAX_SCORE: u8 = 10;

/// Bounded integer score: 0 (no signal) to 10 (exceptional).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Creates a Score, returning an error if out of range.
    pub fn try_new(value: u8) -> Result<Self, ValidationError> {
        if value > MAX_SCORE {
            return Err(ValidationError::out_of_range(
                "score",
                0,
                MAX_SCORE as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Creates a Score from an arbitrary float by rounding then clamping.
    ///
    /// This is the normalization path for model-produced values: NaN and
    /// negatives collapse to 0, anything above 10 collapses to 10.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0);
        }
        Self(value.round().clamp(0.0, MAX_SCORE as f64) as u8)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as f64, for averaging.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/10", self.0)
    }
}
