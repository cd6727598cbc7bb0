//! Percentile bands and spread indices of ensemble rows.
//!
//! ## Purpose
//!
//! For each ensemble row (all members at one timestamp) this module computes
//! the percentile band at levels 10, 20, ..., 90 and the four normalized
//! inter-percentile spreads derived from it.
//!
//! ## Key concepts
//!
//! ```text
//! SI_90_10 = (P90 - P10) / mean
//! SI_80_20 = (P80 - P20) / mean
//! SI_70_30 = (P70 - P30) / mean
//! SI_60_40 = (P60 - P40) / mean
//! ```
//!
//! ## Invariants
//!
//! * Band levels are distinct and ascending; band values are non-decreasing.
//! * With a positive row mean, `SI_90_10 >= SI_80_20 >= SI_70_30 >= SI_60_40`.
//! * Rows are processed independently; no windowing is involved.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::moments::mean;
use crate::math::percentile::{sort_samples, PercentileEstimator};
use crate::primitives::errors::UncertaintyError;

/// Percentile levels of a band.
pub const PERCENTILE_LEVELS: [u32; 9] = [10, 20, 30, 40, 50, 60, 70, 80, 90];

/// Column names of a percentile band table.
pub const PERCENTILE_NAMES: [&str; 9] = [
    "P10", "P20", "P30", "P40", "P50", "P60", "P70", "P80", "P90",
];

/// Column names of a spread-index table.
pub const SPREAD_INDEX_NAMES: [&str; 4] = ["SI_90_10", "SI_80_20", "SI_70_30", "SI_60_40"];

// ============================================================================
// Percentile Band
// ============================================================================

/// Values of one ensemble row at the fixed percentile levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileBand<T> {
    values: [T; 9],
}

impl<T: Float> PercentileBand<T> {
    /// Band of an ensemble row.
    pub fn from_members(
        members: &[T],
        estimator: &PercentileEstimator,
    ) -> Result<Self, UncertaintyError> {
        if members.is_empty() {
            return Err(UncertaintyError::EmptyInput);
        }

        let sorted = sort_samples(members);
        let mut values = [T::zero(); 9];
        for (slot, &level) in values.iter_mut().zip(PERCENTILE_LEVELS.iter()) {
            *slot = estimator.calculate_sorted(&sorted, T::from(level).unwrap());
        }
        Ok(Self { values })
    }

    /// Value at `level`, if it is one of the band levels.
    pub fn get(&self, level: u32) -> Option<T> {
        PERCENTILE_LEVELS
            .iter()
            .position(|&l| l == level)
            .map(|i| self.values[i])
    }

    /// Band values in ascending level order.
    pub fn values(&self) -> &[T; 9] {
        &self.values
    }

    /// The four symmetric spreads `P(100-k) - P(k)` for `k = 10, 20, 30, 40`.
    pub fn spreads(&self) -> [T; 4] {
        let v = &self.values;
        [v[8] - v[0], v[7] - v[1], v[6] - v[2], v[5] - v[3]]
    }
}

// ============================================================================
// Spread Index
// ============================================================================

/// Spread indices of one ensemble row, ordered as [`SPREAD_INDEX_NAMES`].
pub fn spread_index_row<T: Float>(
    members: &[T],
    estimator: &PercentileEstimator,
) -> Result<[T; 4], UncertaintyError> {
    let band = PercentileBand::from_members(members, estimator)?;
    let mu = mean(members);
    Ok(band.spreads().map(|spread| spread / mu))
}
