//! Order-statistic percentile estimation.
//!
//! ## Purpose
//!
//! This module computes the value at an arbitrary percentile level of a
//! finite sample using the `(n + 1)` rank convention:
//! `rank = p / 100 * (n + 1)`, 1-indexed into the sorted sample.
//!
//! ## Design notes
//!
//! * **Integral rank**: Returns the order statistic at that rank.
//! * **Fractional rank**: Interpolates between ranks `floor(rank)` and
//!   `floor(rank) + 1`, linearly by default.
//! * **Clamping**: A rank below 1 returns the minimum and a rank above `n`
//!   returns the maximum. Small samples at extreme levels therefore saturate
//!   instead of indexing out of bounds.
//! * **NaN**: Non-finite samples sort as equal to their neighbours; the result
//!   is unspecified but never panics.
//!
//! ## Key concepts
//!
//! * [`PercentileInterpolation::Linear`]: `lo + frac * (hi - lo)`.
//! * [`PercentileInterpolation::Midpoint`]: `(lo + hi) / 2` regardless of the
//!   fractional part.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::UncertaintyError;

// ============================================================================
// Interpolation Policy
// ============================================================================

/// Rule for values between two order statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PercentileInterpolation {
    /// Linear interpolation by the fractional part of the rank.
    #[default]
    Linear,

    /// Average of the two bracketing order statistics.
    Midpoint,
}

// ============================================================================
// Estimator
// ============================================================================

/// Percentile estimator over unsorted or pre-sorted samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PercentileEstimator {
    /// Interpolation rule for fractional ranks.
    pub interpolation: PercentileInterpolation,
}

impl PercentileEstimator {
    /// Create an estimator with the given interpolation rule.
    pub fn new(interpolation: PercentileInterpolation) -> Self {
        Self { interpolation }
    }

    /// Value at percentile `p` of `samples`.
    pub fn calculate<T: Float>(&self, samples: &[T], p: T) -> Result<T, UncertaintyError> {
        Self::validate_level(p)?;
        if samples.is_empty() {
            return Err(UncertaintyError::EmptyInput);
        }

        let sorted = sort_samples(samples);
        Ok(self.calculate_sorted(&sorted, p))
    }

    /// Value at percentile `p` of an ascending, non-empty sample.
    ///
    /// The level is assumed valid; see [`PercentileEstimator::calculate`].
    pub fn calculate_sorted<T: Float>(&self, sorted: &[T], p: T) -> T {
        let n = sorted.len();
        let hundred = T::from(100.0).unwrap();
        let rank = p * T::from(n + 1).unwrap() / hundred;

        if rank <= T::one() {
            return sorted[0];
        }
        if rank >= T::from(n).unwrap() {
            return sorted[n - 1];
        }

        let floor = rank.floor();
        // Both ranks are now within [1, n - 1].
        let lower = floor.to_usize().unwrap_or(1).clamp(1, n - 1);
        let lo = sorted[lower - 1];
        let hi = sorted[lower];
        let frac = rank - floor;

        if frac == T::zero() {
            return lo;
        }

        match self.interpolation {
            PercentileInterpolation::Linear => lo + frac * (hi - lo),
            PercentileInterpolation::Midpoint => (lo + hi) / T::from(2.0).unwrap(),
        }
    }

    /// Check that `p` lies strictly between 0 and 100.
    pub fn validate_level<T: Float>(p: T) -> Result<(), UncertaintyError> {
        let hundred = T::from(100.0).unwrap();
        if !p.is_finite() || p <= T::zero() || p >= hundred {
            return Err(UncertaintyError::InvalidPercentile(
                p.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }
}

/// Ascending copy of `samples`.
pub fn sort_samples<T: Float>(samples: &[T]) -> Vec<T> {
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    sorted
}
