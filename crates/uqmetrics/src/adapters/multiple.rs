//! Multiple-series adapter: cross-series metrics and spatial variograms.
//!
//! ## Purpose
//!
//! This module provides the processor for several aligned series, typically
//! one column per site. Besides the pairwise and spread metrics it fits a
//! spatial semivariogram per timestamp.
//!
//! ## Design notes
//!
//! * **Variogram layout**: Rows are sites. Each value column is one timestamp
//!   and the coordinate columns give every site's longitude and latitude.
//! * **Isolation**: A timestamp whose fit fails is recorded in the report;
//!   the other timestamps are unaffected.
//! * **Strategies**: The curve fitter and its initial guess are injectable.
//!   Iteration and tolerance settings configure the default fitter only.
//!
//! ## Invariants
//!
//! * Report entry `i` corresponds to the `i`-th requested value column.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::algorithms::fitting::{CurveFitter, LevenbergMarquardt};
use crate::algorithms::pointwise;
use crate::algorithms::variogram::{InitialGuess, SpatialSample, VariogramFitter};
use crate::engine::executor::{ExecutorConfig, FitPassFn, IndexPassFn, MetricExecutor};
use crate::engine::output::{MetricSeries, MetricTable, VariogramReport};
use crate::engine::validator::Validator;
use crate::math::percentile::{PercentileEstimator, PercentileInterpolation};
use crate::primitives::errors::UncertaintyError;
use crate::primitives::table::TimeSeriesTable;
use crate::primitives::window::WindowSpan;

// ============================================================================
// Multi-Series Builder
// ============================================================================

/// Builder for the multiple-series processor.
#[derive(Debug, Clone)]
pub struct MultiSeriesBuilder<T: Float> {
    /// Window size `w`.
    pub window_size: usize,

    /// Rows per window relative to `w`.
    pub window_span: WindowSpan,

    /// Interpolation rule for percentile bands.
    pub interpolation: PercentileInterpolation,

    /// Name of the actual column of pairwise metrics.
    pub actual_column: Option<String>,

    /// Name of the predicted column of pairwise metrics.
    pub predicted_column: Option<String>,

    /// Curve-fitting strategy; Levenberg-Marquardt when unset.
    pub curve_fitter: Option<Arc<dyn CurveFitter<T>>>,

    /// Starting-point strategy of the variogram fit.
    pub initial_guess: InitialGuess<T>,

    /// Iteration budget of the default fitter.
    pub max_iterations: Option<usize>,

    /// Convergence tolerance of the default fitter.
    pub tolerance: Option<T>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom pass over windows and rows.
    #[doc(hidden)]
    pub custom_index_pass: Option<IndexPassFn<T>>,

    /// Custom pass over variogram timestamps.
    #[doc(hidden)]
    pub custom_fit_pass: Option<FitPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float + 'static> Default for MultiSeriesBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + 'static> MultiSeriesBuilder<T> {
    fn new() -> Self {
        Self {
            window_size: super::DEFAULT_WINDOW_SIZE,
            window_span: WindowSpan::default(),
            interpolation: PercentileInterpolation::default(),
            actual_column: None,
            predicted_column: None,
            curve_fitter: None,
            initial_guess: InitialGuess::default(),
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
        self.window_size = window_size;
        self
    }

    /// Set the rows covered by each window.
    pub fn window_span(mut self, span: WindowSpan) -> Self {
        self.window_span = span;
        self
    }

    /// Set the percentile interpolation rule.
    pub fn interpolation(mut self, interpolation: PercentileInterpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Name the actual column of pairwise metrics.
    pub fn actual_column(mut self, name: &str) -> Self {
        self.actual_column = Some(name.to_string());
        self
    }

    /// Name the predicted column of pairwise metrics.
    pub fn predicted_column(mut self, name: &str) -> Self {
        self.predicted_column = Some(name.to_string());
        self
    }

    /// Set the curve-fitting strategy.
    pub fn curve_fitter(mut self, fitter: Arc<dyn CurveFitter<T>>) -> Self {
        self.curve_fitter = Some(fitter);
        self
    }

    /// Set the initial-guess strategy.
    pub fn initial_guess(mut self, guess: InitialGuess<T>) -> Self {
        self.initial_guess = guess;
        self
    }

    /// Set the iteration budget of the default fitter.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the convergence tolerance of the default fitter.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = Some(tolerance);
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

    /// Set a custom pass over windows and rows.
    #[doc(hidden)]
    pub fn custom_index_pass(mut self, pass: IndexPassFn<T>) -> Self {
        self.custom_index_pass = Some(pass);
        self
    }

    /// Set a custom pass over variogram timestamps.
    #[doc(hidden)]
    pub fn custom_fit_pass(mut self, pass: FitPassFn<T>) -> Self {
        self.custom_fit_pass = Some(pass);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the multiple-series processor.
    pub fn build(self) -> Result<MultiSeriesMetrics<T>, UncertaintyError>
    where
        T: Debug + Send + Sync,
    {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_window_size(self.window_size)?;
        Validator::validate_initial_guess(&self.initial_guess)?;
        if let Some(iterations) = self.max_iterations {
            Validator::validate_iterations(iterations)?;
        }
        if let Some(tol) = self.tolerance {
            Validator::validate_tolerance(tol)?;
        }

        let curve_fitter: Arc<dyn CurveFitter<T>> = match self.curve_fitter {
            Some(fitter) => fitter,
            None => {
                let mut lm = LevenbergMarquardt::new();
                if let Some(iterations) = self.max_iterations {
                    lm = lm.max_iterations(iterations);
                }
                if let Some(tol) = self.tolerance {
                    lm = lm.tolerance(tol);
                }
                Arc::new(lm)
            }
        };

        let executor = MetricExecutor::new(ExecutorConfig {
            window_size: self.window_size,
            window_span: self.window_span,
            percentile: PercentileEstimator::new(self.interpolation),
            custom_index_pass: self.custom_index_pass,
            custom_fit_pass: self.custom_fit_pass,
            parallel: self.parallel.unwrap_or(false),
        });

        Ok(MultiSeriesMetrics {
            executor,
            actual_column: self.actual_column,
            predicted_column: self.predicted_column,
            fitter: VariogramFitter::new(curve_fitter, self.initial_guess),
        })
    }
}

// ============================================================================
// Multi-Series Processor
// ============================================================================

/// Metrics over several aligned series, including spatial variograms.
#[derive(Debug, Clone)]
pub struct MultiSeriesMetrics<T: Float> {
    executor: MetricExecutor<T>,
    actual_column: Option<String>,
    predicted_column: Option<String>,
    fitter: VariogramFitter<T>,
}

impl<T: Float + Debug + Send + Sync + 'static> MultiSeriesMetrics<T> {
    fn pair(
        &self,
        table: &TimeSeriesTable<T>,
        operation: &'static str,
    ) -> Result<(usize, usize), UncertaintyError> {
        Validator::pair_columns(
            table,
            self.actual_column.as_deref(),
            self.predicted_column.as_deref(),
            operation,
        )
    }

    /// Pearson correlation between two series per window.
    pub fn correlation(
        &self,
        table: &TimeSeriesTable<T>,
    ) -> Result<MetricSeries<T>, UncertaintyError> {
        let columns = self.pair(table, "correlation")?;
        Ok(self
            .executor
            .windowed_pair(table, columns, "correlation", pointwise::correlation))
    }

    /// Mean absolute percentage error between two series per window.
    pub fn mape(&self, table: &TimeSeriesTable<T>) -> Result<MetricSeries<T>, UncertaintyError> {
        let columns = self.pair(table, "mape")?;
        Ok(self
            .executor
            .windowed_pair(table, columns, "mape", pointwise::mape))
    }

    /// Spread indices across all series, per row.
    pub fn spread_index(&self, table: &TimeSeriesTable<T>) -> MetricTable<T> {
        self.executor.spread_index(table)
    }

    /// Predictability indices derived from the spread indices of `table`.
    pub fn predictability_index(
        &self,
        table: &TimeSeriesTable<T>,
    ) -> Result<MetricTable<T>, UncertaintyError> {
        let spread = self.executor.spread_index(table);
        self.executor.predictability_index(&spread)
    }

    // ========================================================================
    // Variogram
    // ========================================================================

    /// Fit a semivariogram for each value column.
    ///
    /// Rows of `table` are sites located by the `longitude` and `latitude`
    /// columns. Unknown column names abort the call; fit failures are
    /// recorded per timestamp.
    pub fn kriging_variogram(
        &self,
        table: &TimeSeriesTable<T>,
        value_columns: &[&str],
        latitude: &str,
        longitude: &str,
    ) -> Result<VariogramReport<T>, UncertaintyError> {
        let lat = table.column_by_name(latitude)?;
        let lon = table.column_by_name(longitude)?;

        let mut samples = Vec::with_capacity(value_columns.len());
        for name in value_columns {
            let values = table.column_by_name(name)?;
            samples.push(SpatialSample::new(&lon, &lat, &values)?);
        }
        let labels: Vec<String> = value_columns.iter().map(|c| c.to_string()).collect();

        Ok(self
            .executor
            .fit_variograms(&samples, Some(&labels), &self.fitter))
    }

    /// Fit a semivariogram for each prepared sample.
    pub fn fit_batch(&self, samples: &[SpatialSample<T>]) -> VariogramReport<T> {
        self.executor.fit_variograms(samples, None, &self.fitter)
    }
}
