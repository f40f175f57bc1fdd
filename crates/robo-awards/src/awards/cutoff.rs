use std::fmt;

use serde::{Deserialize, Serialize};

const BASIS: u32 = 10_000;

/// Share of a population that counts as "top N%", stored in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Threshold(u32);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("threshold {0} must be strictly between 0 and 1")]
    OutOfRange(f64),
}

impl Threshold {
    pub const ALL_AROUND: Threshold = Threshold(5_000);
    pub const EXCELLENCE: Threshold = Threshold(4_000);

    pub fn from_fraction(fraction: f64) -> Result<Self, ThresholdError> {
        if !fraction.is_finite() || fraction <= 0.0 || fraction >= 1.0 {
            return Err(ThresholdError::OutOfRange(fraction));
        }

        let basis_points = (fraction * BASIS as f64).round() as u32;
        if basis_points == 0 || basis_points >= BASIS {
            return Err(ThresholdError::OutOfRange(fraction));
        }

        Ok(Self(basis_points))
    }

    pub fn from_percent(percent: u8) -> Result<Self, ThresholdError> {
        Self::from_fraction(f64::from(percent) / 100.0)
    }

    pub fn basis_points(&self) -> u32 {
        self.0
    }

    pub fn fraction(&self) -> f64 {
        f64::from(self.0) / BASIS as f64
    }
}

impl TryFrom<f64> for Threshold {
    type Error = ThresholdError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_fraction(value)
    }
}

impl From<Threshold> for f64 {
    fn from(value: Threshold) -> Self {
        value.fraction()
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.fraction() * 100.0)
    }
}

/// Worst rank (inclusive) still inside the threshold: `max(1, ceil(population * threshold))`.
///
/// Computed in integer arithmetic so boundaries never drift with float error. An empty
/// population still yields 1; nobody occupies that slot.
pub fn cutoff(population: usize, threshold: Threshold) -> u32 {
    let scaled = population as u64 * u64::from(threshold.0);
    let rounded_up = scaled.div_ceil(u64::from(BASIS));
    u32::try_from(rounded_up).unwrap_or(u32::MAX).max(1)
}
