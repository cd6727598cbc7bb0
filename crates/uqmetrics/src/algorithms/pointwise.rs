//! Per-window scalar reducers.
//!
//! ## Purpose
//!
//! This module implements the stateless reductions applied to each window:
//! dispersion measures over all window values, and error measures between an
//! actual and a predicted column.
//!
//! ## Design notes
//!
//! * **Never raises**: Zero denominators propagate as NaN or infinity.
//! * **Range fallback**: NRMSE and NMAE divide by [`RANGE_FALLBACK`] when the
//!   actual values in a window are constant.
//! * **MAPE exclusion**: Rows whose actual value is exactly zero are dropped
//!   from the mean, not imputed.
//!
//! ## Key concepts
//!
//! * Turbulence intensity: `std / mean`.
//! * Variability index: `(max - min) / mean`.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::moments::{extrema, mean, pearson, population_std};

/// Denominator used by NRMSE and NMAE when `max(actual) == min(actual)`.
pub const RANGE_FALLBACK: f64 = 0.001;

/// Population standard deviation of all window values.
pub fn standard_deviation<T: Float>(values: &[T]) -> T {
    population_std(values)
}

/// Standard deviation relative to the mean.
pub fn turbulence_intensity<T: Float>(values: &[T]) -> T {
    population_std(values) / mean(values)
}

/// Peak-to-peak spread relative to the mean.
pub fn variability_index<T: Float>(values: &[T]) -> T {
    let (lo, hi) = extrema(values);
    (hi - lo) / mean(values)
}

/// Pearson correlation between actual and predicted values.
pub fn correlation<T: Float>(actual: &[T], predicted: &[T]) -> T {
    pearson(actual, predicted)
}

/// Mean absolute percentage error over rows with non-zero actual values.
pub fn mape<T: Float>(actual: &[T], predicted: &[T]) -> T {
    let (sum, count) = actual
        .iter()
        .zip(predicted)
        .filter(|(&a, _)| a != T::zero())
        .fold((T::zero(), 0usize), |(sum, count), (&a, &p)| {
            (sum + ((a - p) / a).abs(), count + 1)
        });

    sum / T::from(count).unwrap()
}

/// Root-mean-squared error normalized by the range of the actual values.
pub fn nrmse<T: Float>(actual: &[T], predicted: &[T]) -> T {
    let mse = mean(&squared_errors(actual, predicted));
    mse.sqrt() / normalizing_range(actual)
}

/// Mean absolute error normalized by the range of the actual values.
pub fn nmae<T: Float>(actual: &[T], predicted: &[T]) -> T {
    let abs_errors: Vec<T> = actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| (a - p).abs())
        .collect();
    mean(&abs_errors) / normalizing_range(actual)
}

fn squared_errors<T: Float>(actual: &[T], predicted: &[T]) -> Vec<T> {
    actual
        .iter()
        .zip(predicted)
        .map(|(&a, &p)| (a - p) * (a - p))
        .collect()
}

/// `max(actual) - min(actual)`, or [`RANGE_FALLBACK`] when that is zero.
pub fn normalizing_range<T: Float>(actual: &[T]) -> T {
    let (lo, hi) = extrema(actual);
    let range = hi - lo;
    if range == T::zero() {
        T::from(RANGE_FALLBACK).unwrap()
    } else {
        range
    }
}
