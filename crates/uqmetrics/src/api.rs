//! High-level API for uncertainty metrics.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the shared parameters and selects a data-shape adapter
//! (single series, ensemble or multiple series).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Marker types transition to specialized adapter builders.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//! * **Type-Safe**: Generic over `Float` types.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`UncertaintyBuilder`] via `Uncertainty::new()`.
//! 2. Chain configuration methods (`.window_size()`, `.interpolation()`, etc.).
//! 3. Select an adapter via `.adapter(Ensemble)` to get a processor builder.
//! 4. Call `.build()` and run metrics on a [`TimeSeriesTable`].
//!
//! Settings that do not apply to the selected adapter are ignored.

// External dependencies
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::adapters::ensemble::EnsembleBuilder;
use crate::adapters::multiple::MultiSeriesBuilder;
use crate::adapters::single::SingleSeriesBuilder;
use crate::engine::executor::{FitPassFn, IndexPassFn};

// Publicly re-exported types
pub use crate::adapters::ensemble::EnsembleMetrics;
pub use crate::adapters::multiple::MultiSeriesMetrics;
pub use crate::adapters::single::SingleSeriesMetrics;
pub use crate::algorithms::crps::{CrpsEstimator, EnsembleCrps};
pub use crate::algorithms::fitting::{CurveFitter, FitSolution, LevenbergMarquardt, ParametricModel};
pub use crate::algorithms::spectral::{SpectralEntropyEstimator, WelchEntropy};
pub use crate::algorithms::spread::PercentileBand;
pub use crate::algorithms::variogram::{InitialGuess, SpatialSample, VariogramModel};
pub use crate::engine::output::{MetricSeries, MetricTable, TimestampFit, VariogramReport};
pub use crate::math::percentile::{PercentileEstimator, PercentileInterpolation};
pub use crate::primitives::errors::{FitFailure, UncertaintyError};
pub use crate::primitives::table::TimeSeriesTable;
pub use crate::primitives::window::WindowSpan;

/// Marker types for selecting data-shape adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Ensemble, MultiSeries, SingleSeries};
}

/// Fluent builder for configuring uncertainty metrics.
#[derive(Debug, Clone)]
pub struct UncertaintyBuilder<T> {
    /// Window size (default 12, at least 2).
    pub window_size: Option<usize>,

    /// Rows covered by each window (default `Truncated`).
    pub window_span: Option<WindowSpan>,

    /// Percentile interpolation rule (default `Linear`).
    pub interpolation: Option<PercentileInterpolation>,

    /// Actual column of pairwise metrics.
    pub actual_column: Option<String>,

    /// Predicted column of pairwise metrics.
    pub predicted_column: Option<String>,

    /// Observation column of CRPS.
    pub observation_column: Option<String>,

    /// Spectral-entropy strategy (SingleSeries only).
    pub spectral_entropy: Option<Arc<dyn SpectralEntropyEstimator<T>>>,

    /// CRPS strategy (Ensemble only).
    pub crps_estimator: Option<Arc<dyn CrpsEstimator<T>>>,

    /// Curve-fitting strategy (MultiSeries only).
    pub curve_fitter: Option<Arc<dyn CurveFitter<T>>>,

    /// Initial guess of the variogram fit (MultiSeries only).
    pub initial_guess: Option<InitialGuess<T>>,

    /// Iteration budget of the default fitter (MultiSeries only).
    pub max_iterations: Option<usize>,

    /// Convergence tolerance of the default fitter (MultiSeries only).
    pub tolerance: Option<T>,

    // ======================================
    // DEV
    // ======================================
    /// Custom pass over windows and rows.
    #[doc(hidden)]
    pub custom_index_pass: Option<IndexPassFn<T>>,

    /// Custom pass over variogram timestamps.
    #[doc(hidden)]
    pub custom_fit_pass: Option<FitPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float + 'static> Default for UncertaintyBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + 'static> UncertaintyBuilder<T> {
    /// Select a data-shape adapter to transition to a processor builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: UncertaintyAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            window_size: None,
            window_span: None,
            interpolation: None,
            actual_column: None,
            predicted_column: None,
            observation_column: None,
            spectral_entropy: None,
            crps_estimator: None,
            curve_fitter: None,
            initial_guess: None,
            max_iterations: None,
            tolerance: None,
            custom_index_pass: None,
            custom_fit_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the window size.
    pub fn window_size(mut self, window_size: usize) -> Self {
        if self.window_size.is_some() {
            self.duplicate_param = Some("window_size");
        }
        self.window_size = Some(window_size);
        self
    }

    /// Set the rows covered by each window.
    pub fn window_span(mut self, span: WindowSpan) -> Self {
        if self.window_span.is_some() {
            self.duplicate_param = Some("window_span");
        }
        self.window_span = Some(span);
        self
    }

    /// Set the percentile interpolation rule.
    pub fn interpolation(mut self, interpolation: PercentileInterpolation) -> Self {
        if self.interpolation.is_some() {
            self.duplicate_param = Some("interpolation");
        }
        self.interpolation = Some(interpolation);
        self
    }

    /// Name the actual column of pairwise metrics.
    pub fn actual_column(mut self, name: &str) -> Self {
        if self.actual_column.is_some() {
            self.duplicate_param = Some("actual_column");
        }
        self.actual_column = Some(name.to_string());
        self
    }

    /// Name the predicted column of pairwise metrics.
    pub fn predicted_column(mut self, name: &str) -> Self {
        if self.predicted_column.is_some() {
            self.duplicate_param = Some("predicted_column");
        }
        self.predicted_column = Some(name.to_string());
        self
    }

    /// Name the observation column of CRPS.
    pub fn observation_column(mut self, name: &str) -> Self {
        if self.observation_column.is_some() {
            self.duplicate_param = Some("observation_column");
        }
        self.observation_column = Some(name.to_string());
        self
    }

    /// Set the spectral-entropy strategy.
    pub fn spectral_entropy(mut self, estimator: Arc<dyn SpectralEntropyEstimator<T>>) -> Self {
        if self.spectral_entropy.is_some() {
            self.duplicate_param = Some("spectral_entropy");
        }
        self.spectral_entropy = Some(estimator);
        self
    }

    /// Set the CRPS strategy.
    pub fn crps_estimator(mut self, estimator: Arc<dyn CrpsEstimator<T>>) -> Self {
        if self.crps_estimator.is_some() {
            self.duplicate_param = Some("crps_estimator");
        }
        self.crps_estimator = Some(estimator);
        self
    }

    /// Set the curve-fitting strategy of the variogram fit.
    pub fn curve_fitter(mut self, fitter: Arc<dyn CurveFitter<T>>) -> Self {
        if self.curve_fitter.is_some() {
            self.duplicate_param = Some("curve_fitter");
        }
        self.curve_fitter = Some(fitter);
        self
    }

    /// Set the initial guess of the variogram fit.
    pub fn initial_guess(mut self, guess: InitialGuess<T>) -> Self {
        if self.initial_guess.is_some() {
            self.duplicate_param = Some("initial_guess");
        }
        self.initial_guess = Some(guess);
        self
    }

    /// Set the iteration budget of the default fitter.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the convergence tolerance of the default fitter.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    // ==========================
    // Development Options
    // ==========================

    /// Set a custom pass over windows and rows (only for dev)
    #[doc(hidden)]
    pub fn custom_index_pass(mut self, pass: IndexPassFn<T>) -> Self {
        self.custom_index_pass = Some(pass);
        self
    }

    /// Set a custom pass over variogram timestamps (only for dev)
    #[doc(hidden)]
    pub fn custom_fit_pass(mut self, pass: FitPassFn<T>) -> Self {
        self.custom_fit_pass = Some(pass);
        self
    }

    /// Set parallel execution hint (only for dev)
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }
}

/// Trait for transitioning from the generic builder to an adapter builder.
pub trait UncertaintyAdapter<T: Float> {
    /// The output adapter builder.
    type Output;

    /// Convert a generic [`UncertaintyBuilder`] into an adapter builder.
    fn convert(builder: UncertaintyBuilder<T>) -> Self::Output;
}

/// Marker for single-series metrics.
#[derive(Debug, Clone, Copy)]
pub struct SingleSeries;

impl<T: Float + 'static> UncertaintyAdapter<T> for SingleSeries {
    type Output = SingleSeriesBuilder<T>;

    fn convert(builder: UncertaintyBuilder<T>) -> Self::Output {
        let mut result = SingleSeriesBuilder::default();

        if let Some(ws) = builder.window_size {
            result.window_size = ws;
        }
        if let Some(span) = builder.window_span {
            result.window_span = span;
        }
        if let Some(se) = builder.spectral_entropy {
            result.spectral_entropy = se;
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(ip) = builder.custom_index_pass {
            result.custom_index_pass = Some(ip);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for ensemble metrics.
#[derive(Debug, Clone, Copy)]
pub struct Ensemble;

impl<T: Float + 'static> UncertaintyAdapter<T> for Ensemble {
    type Output = EnsembleBuilder<T>;

    fn convert(builder: UncertaintyBuilder<T>) -> Self::Output {
        let mut result = EnsembleBuilder::default();

        if let Some(ws) = builder.window_size {
            result.window_size = ws;
        }
        if let Some(span) = builder.window_span {
            result.window_span = span;
        }
        if let Some(interp) = builder.interpolation {
            result.interpolation = interp;
        }
        result.actual_column = builder.actual_column;
        result.predicted_column = builder.predicted_column;
        result.observation_column = builder.observation_column;
        if let Some(crps) = builder.crps_estimator {
            result.crps_estimator = crps;
        }

        // ======================================
        // DEV
        // ======================================
        if let Some(ip) = builder.custom_index_pass {
            result.custom_index_pass = Some(ip);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for multiple-series metrics and spatial variograms.
#[derive(Debug, Clone, Copy)]
pub struct MultiSeries;

impl<T: Float + 'static> UncertaintyAdapter<T> for MultiSeries {
    type Output = MultiSeriesBuilder<T>;

    fn convert(builder: UncertaintyBuilder<T>) -> Self::Output {
        let mut result = MultiSeriesBuilder::default();

        if let Some(ws) = builder.window_size {
            result.window_size = ws;
        }
        if let Some(span) = builder.window_span {
            result.window_span = span;
        }
        if let Some(interp) = builder.interpolation {
            result.interpolation = interp;
        }
        result.actual_column = builder.actual_column;
        result.predicted_column = builder.predicted_column;
        result.curve_fitter = builder.curve_fitter;
        if let Some(guess) = builder.initial_guess {
            result.initial_guess = guess;
        }
        result.max_iterations = builder.max_iterations;
        result.tolerance = builder.tolerance;

        // ======================================
        // DEV
        // ======================================
        if let Some(ip) = builder.custom_index_pass {
            result.custom_index_pass = Some(ip);
        }
        if let Some(fp) = builder.custom_fit_pass {
            result.custom_fit_pass = Some(fp);
        }
        if let Some(p) = builder.parallel {
            result.parallel = Some(p);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
