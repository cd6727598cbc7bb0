//! Single-series adapter: dispersion and information metrics per window.
//!
//! ## Purpose
//!
//! This module provides the processor for one (or several pooled) series.
//! Every metric reduces all values of a window, flattened row by row, to a
//! scalar.
//!
//! ## Design notes
//!
//! * **Windowing**: Windows of the configured span, `N - w + 1` per table.
//! * **Strategy**: Spectral entropy is delegated to an injectable
//!   [`SpectralEntropyEstimator`], [`WelchEntropy`] by default.
//!
//! ## Invariants
//!
//! * The standard deviation series is never negative.
//! * Zero-mean windows yield NaN or infinity, never an error.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::algorithms::pointwise;
use crate::algorithms::spectral::{SpectralEntropyEstimator, WelchEntropy};
use crate::engine::executor::{ExecutorConfig, IndexPassFn, MetricExecutor};
use crate::engine::output::MetricSeries;
use crate::engine::validator::Validator;
use crate::math::percentile::PercentileEstimator;
use crate::primitives::errors::UncertaintyError;
use crate::primitives::table::TimeSeriesTable;
use crate::primitives::window::WindowSpan;

// ============================================================================
// Single-Series Builder
// ============================================================================

/// Builder for the single-series processor.
#[derive(Debug, Clone)]
pub struct SingleSeriesBuilder<T: Float> {
    /// Window size `w`.
    pub window_size: usize,

    /// Rows per window relative to `w`.
    pub window_span: WindowSpan,

    /// Spectral-entropy strategy.
    pub spectral_entropy: Arc<dyn SpectralEntropyEstimator<T>>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom pass over windows.
    #[doc(hidden)]
    pub custom_index_pass: Option<IndexPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float + 'static> Default for SingleSeriesBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + 'static> SingleSeriesBuilder<T> {
    fn new() -> Self {
        Self {
            window_size: super::DEFAULT_WINDOW_SIZE,
            window_span: WindowSpan::default(),
            spectral_entropy: Arc::new(WelchEntropy::default()),
            custom_index_pass: None,
            parallel: None,
            duplicate_param: None,
        }
    }

    /// Set the window size.
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Set the rows covered by each window.
    pub fn window_span(mut self, span: WindowSpan) -> Self {
        self.window_span = span;
        self
    }

    /// Set the spectral-entropy strategy.
    pub fn spectral_entropy(mut self, estimator: Arc<dyn SpectralEntropyEstimator<T>>) -> Self {
        self.spectral_entropy = estimator;
        self
    }

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++

    /// Set parallel execution hint.
    #[doc(hidden)]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    /// Set a custom pass over windows.
    #[doc(hidden)]
    pub fn custom_index_pass(mut self, pass: IndexPassFn<T>) -> Self {
        self.custom_index_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the single-series processor.
    pub fn build(self) -> Result<SingleSeriesMetrics<T>, UncertaintyError>
    where
        T: Debug + Send + Sync,
    {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_window_size(self.window_size)?;

        let executor = MetricExecutor::new(ExecutorConfig {
            window_size: self.window_size,
            window_span: self.window_span,
            percentile: PercentileEstimator::default(),
            custom_index_pass: self.custom_index_pass,
            custom_fit_pass: None,
            parallel: self.parallel.unwrap_or(false),
        });

        Ok(SingleSeriesMetrics {
            executor,
            spectral_entropy: self.spectral_entropy,
        })
    }
}

// ============================================================================
// Single-Series Processor
// ============================================================================

/// Windowed metrics over a single series.
#[derive(Debug, Clone)]
pub struct SingleSeriesMetrics<T: Float> {
    executor: MetricExecutor<T>,
    spectral_entropy: Arc<dyn SpectralEntropyEstimator<T>>,
}

impl<T: Float + Debug + Send + Sync + 'static> SingleSeriesMetrics<T> {
    /// Population standard deviation of each window.
    pub fn standard_deviation(&self, table: &TimeSeriesTable<T>) -> MetricSeries<T> {
        self.executor.windowed(table, "standard_deviation", |w| {
            pointwise::standard_deviation(w.flat())
        })
    }

    /// Standard deviation over mean of each window.
    pub fn turbulence_intensity(&self, table: &TimeSeriesTable<T>) -> MetricSeries<T> {
        self.executor.windowed(table, "turbulence_intensity", |w| {
            pointwise::turbulence_intensity(w.flat())
        })
    }

    /// Peak-to-peak spread over mean of each window.
    pub fn variability_index(&self, table: &TimeSeriesTable<T>) -> MetricSeries<T> {
        self.executor.windowed(table, "variability_index", |w| {
            pointwise::variability_index(w.flat())
        })
    }

    /// Normalized spectral entropy of each window.
    pub fn spectral_entropy(&self, table: &TimeSeriesTable<T>) -> MetricSeries<T> {
        let estimator = &self.spectral_entropy;
        self.executor
            .windowed(table, "spectral_entropy", |w| estimator.entropy(w.flat()))
    }

    /// Window size in use.
    pub fn window_size(&self) -> usize {
        self.executor.config().window_size
    }
}
