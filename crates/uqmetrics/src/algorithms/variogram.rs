//! Spatial semivariogram construction and fitting.
//!
//! ## Purpose
//!
//! For one timestamp, this module turns a set of `(longitude, latitude,
//! value)` samples into empirical semivariance points and fits the
//! exponential-type model
//!
//! ```text
//! gamma(h) = nugget + sill * (1 - exp(-3 h^2 / range^2))
//! ```
//!
//! by nonlinear least squares.
//!
//! ## Design notes
//!
//! * **Semivariance**: Each ordered pair `(i, j)`, self-pairs included,
//!   contributes `(h_ij, 0.5 * h_ij^2 + (v_i - v_j)^2)`, `N^2` points in all.
//!   The distance term is part of the construct and is kept as is.
//! * **Symmetry**: The model depends on `range^2` only; the fitted range is
//!   reported as its absolute value.
//! * **Identifiability**: A sample with fewer distinct lags than model
//!   parameters (e.g. co-located sites) is rejected before fitting with
//!   [`FitFailure::Singular`].
//! * **Validity**: A converged fit with `sill < 0` or `range == 0` is reported
//!   as [`FitFailure::InvalidModel`].
//!
//! ## Key concepts
//!
//! * [`InitialGuess::DataDriven`]: nugget = min semivariance, sill = spread of
//!   the semivariance, range = half the largest distance.
//! * [`InitialGuess::Fixed`]: a caller-supplied `[nugget, range, sill]`.
//! * [`InitialGuess::Grid`]: multi-start over `(range, sill)` candidate pairs
//!   with a data-driven nugget; the start with the lowest residual wins.

// External dependencies
use core::cmp::Ordering::Equal;
use std::sync::Arc;

use num_traits::Float;

// Internal dependencies
use crate::algorithms::fitting::{CurveFitter, FitSolution, ParametricModel};
use crate::math::distance::DistanceMatrix;
use crate::math::moments::extrema;
use crate::primitives::errors::{FitFailure, UncertaintyError};

// ============================================================================
// Data Types
// ============================================================================

/// Coordinates and values of all sites at one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct SpatialSample<T> {
    /// Site coordinates as `[longitude, latitude]`.
    pub coordinates: Vec<[T; 2]>,

    /// Observed value per site.
    pub values: Vec<T>,
}

impl<T: Float> SpatialSample<T> {
    /// Build a sample from parallel longitude, latitude and value slices.
    pub fn new(longitude: &[T], latitude: &[T], values: &[T]) -> Result<Self, UncertaintyError> {
        let n = values.len();
        for (name, len) in [("longitude", longitude.len()), ("latitude", latitude.len())] {
            if len != n {
                return Err(UncertaintyError::MismatchedLength {
                    column: name.to_string(),
                    expected: n,
                    got: len,
                });
            }
        }

        Ok(Self {
            coordinates: longitude
                .iter()
                .zip(latitude)
                .map(|(&lon, &lat)| [lon, lat])
                .collect(),
            values: values.to_vec(),
        })
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the sample has no sites.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Empirical `(distance, semivariance)` points over all ordered site pairs.
    pub fn semivariance(&self) -> (Vec<T>, Vec<T>) {
        let n = self.len();
        let distances = DistanceMatrix::pairwise_euclidean(&self.coordinates);
        let half = T::from(0.5).unwrap();

        let mut lags = Vec::with_capacity(n * n);
        let mut gamma = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                let h = distances.get(i, j);
                let dv = self.values[i] - self.values[j];
                lags.push(h);
                gamma.push(half * h * h + dv * dv);
            }
        }

        (lags, gamma)
    }
}

/// Fitted variogram parameters for one timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariogramModel<T> {
    /// Semivariance at zero lag.
    pub nugget: T,

    /// Correlation distance.
    pub range: T,

    /// Asymptotic increase over the nugget.
    pub sill: T,
}

impl<T: Float> VariogramModel<T> {
    /// Model semivariance at lag `h`.
    pub fn evaluate(&self, h: T) -> T {
        ExponentialVariogram.evaluate(h, &[self.nugget, self.range, self.sill])
    }
}

// ============================================================================
// Model
// ============================================================================

/// `nugget + sill * (1 - exp(-3 h^2 / range^2))` with parameters
/// `[nugget, range, sill]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExponentialVariogram;

impl<T: Float> ParametricModel<T> for ExponentialVariogram {
    fn n_params(&self) -> usize {
        3
    }

    fn evaluate(&self, h: T, params: &[T]) -> T {
        let (nugget, range, sill) = (params[0], params[1], params[2]);
        if h == T::zero() {
            return nugget;
        }
        let three = T::from(3.0).unwrap();
        nugget + sill * (T::one() - (-three * h * h / (range * range)).exp())
    }

    fn gradient(&self, h: T, params: &[T], out: &mut [T]) {
        out[0] = T::one();
        if h == T::zero() {
            out[1] = T::zero();
            out[2] = T::zero();
            return;
        }

        let (range, sill) = (params[1], params[2]);
        let three = T::from(3.0).unwrap();
        let six = T::from(6.0).unwrap();
        let e = (-three * h * h / (range * range)).exp();
        out[1] = if e == T::zero() {
            T::zero()
        } else {
            -six * sill * h * h * e / (range * range * range)
        };
        out[2] = T::one() - e;
    }
}

// ============================================================================
// Initial Guess
// ============================================================================

/// Starting point of the variogram fit.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InitialGuess<T> {
    /// Derived from the empirical points of each timestamp.
    #[default]
    DataDriven,

    /// Fixed `[nugget, range, sill]`.
    Fixed([T; 3]),

    /// Every `(range, sill)` pair from the axis values, with a data-driven
    /// nugget; zero ranges are skipped.
    Grid(Vec<T>),
}

impl<T: Float> InitialGuess<T> {
    /// Data-driven `[nugget, range, sill]` for the given points.
    pub fn data_driven(lags: &[T], gamma: &[T]) -> [T; 3] {
        let (lo, hi) = extrema(gamma);
        let (_, max_lag) = extrema(lags);

        let sill = if hi - lo > T::zero() { hi - lo } else { T::one() };
        let range = if max_lag > T::zero() {
            max_lag / T::from(2.0).unwrap()
        } else {
            T::one()
        };
        [lo, range, sill]
    }

    /// Starting points for the given empirical points.
    pub fn candidates(&self, lags: &[T], gamma: &[T]) -> Vec<[T; 3]> {
        match self {
            InitialGuess::DataDriven => vec![Self::data_driven(lags, gamma)],
            InitialGuess::Fixed(p) => vec![*p],
            InitialGuess::Grid(axis) => {
                let nugget = Self::data_driven(lags, gamma)[0];
                axis.iter()
                    .filter(|r| **r != T::zero())
                    .flat_map(|&r| axis.iter().map(move |&s| [nugget, r, s]))
                    .collect()
            }
        }
    }
}

// ============================================================================
// Fitter
// ============================================================================

/// Per-timestamp variogram fitter.
#[derive(Debug, Clone)]
pub struct VariogramFitter<T> {
    /// Nonlinear least-squares strategy.
    pub curve_fitter: Arc<dyn CurveFitter<T>>,

    /// Starting-point strategy.
    pub initial_guess: InitialGuess<T>,
}

impl<T: Float> VariogramFitter<T> {
    /// Fitter with the given strategies.
    pub fn new(curve_fitter: Arc<dyn CurveFitter<T>>, initial_guess: InitialGuess<T>) -> Self {
        Self {
            curve_fitter,
            initial_guess,
        }
    }

    /// Fit the variogram model of one timestamp.
    pub fn fit(&self, sample: &SpatialSample<T>) -> Result<VariogramModel<T>, FitFailure> {
        let (lags, gamma) = sample.semivariance();
        let model = ExponentialVariogram;
        if distinct_lags(&lags) < ParametricModel::<T>::n_params(&model) {
            return Err(FitFailure::Singular);
        }

        let mut best: Option<FitSolution<T>> = None;
        let mut last_failure = FitFailure::NonFinite;
        for start in self.initial_guess.candidates(&lags, &gamma) {
            match self.curve_fitter.fit(&model, &lags, &gamma, &start) {
                Ok(solution) => {
                    let better = best
                        .as_ref()
                        .map_or(true, |b| solution.residual_sum < b.residual_sum);
                    if better {
                        best = Some(solution);
                    }
                }
                Err(failure) => last_failure = failure,
            }
        }

        let solution = best.ok_or(last_failure)?;
        Self::to_model(&solution.params)
    }

    fn to_model(params: &[T]) -> Result<VariogramModel<T>, FitFailure> {
        if params.len() != 3 || params.iter().any(|p| !p.is_finite()) {
            return Err(FitFailure::NonFinite);
        }

        let model = VariogramModel {
            nugget: params[0],
            range: params[1].abs(),
            sill: params[2],
        };
        if model.sill < T::zero() || model.range == T::zero() {
            return Err(FitFailure::InvalidModel {
                range: model.range.to_f64().unwrap_or(f64::NAN),
                sill: model.sill.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(model)
    }
}

/// Number of distinct finite lags.
fn distinct_lags<T: Float>(lags: &[T]) -> usize {
    let mut sorted: Vec<T> = lags.iter().copied().filter(|h| h.is_finite()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Equal));
    sorted.dedup();
    sorted.len()
}
