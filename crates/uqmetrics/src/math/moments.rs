//! Descriptive statistics over slices.
//!
//! ## Purpose
//!
//! Small reductions shared by the metric reducers: arithmetic mean,
//! population standard deviation, extrema and Pearson correlation.
//!
//! ## Design notes
//!
//! * **Degenerate input**: Empty slices yield NaN rather than an error; a
//!   zero-variance column yields a NaN correlation (0 / 0).
//! * **Population**: Standard deviation divides by `n`, not `n - 1`.

// External dependencies
use num_traits::Float;

/// Arithmetic mean; NaN for an empty slice.
pub fn mean<T: Float>(values: &[T]) -> T {
    if values.is_empty() {
        return T::nan();
    }
    let sum = values.iter().fold(T::zero(), |acc, &v| acc + v);
    sum / T::from(values.len()).unwrap()
}

/// Population standard deviation; NaN for an empty slice.
pub fn population_std<T: Float>(values: &[T]) -> T {
    let mu = mean(values);
    if mu.is_nan() {
        return mu;
    }
    let ss = values.iter().fold(T::zero(), |acc, &v| {
        let d = v - mu;
        acc + d * d
    });
    (ss / T::from(values.len()).unwrap()).sqrt()
}

/// Minimum and maximum; `(NaN, NaN)` for an empty slice.
pub fn extrema<T: Float>(values: &[T]) -> (T, T) {
    if values.is_empty() {
        return (T::nan(), T::nan());
    }
    values
        .iter()
        .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Pearson correlation coefficient of two aligned slices.
pub fn pearson<T: Float>(x: &[T], y: &[T]) -> T {
    let n = x.len().min(y.len());
    if n == 0 {
        return T::nan();
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mx = mean(x);
    let my = mean(y);

    let mut sxy = T::zero();
    let mut sxx = T::zero();
    let mut syy = T::zero();
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mx;
        let dy = yi - my;
        sxy = sxy + dx * dy;
        sxx = sxx + dx * dx;
        syy = syy + dy * dy;
    }

    sxy / (sxx * syy).sqrt()
}
