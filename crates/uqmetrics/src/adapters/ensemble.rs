//! Ensemble adapter: error metrics, spread indices and CRPS.
//!
//! ## Purpose
//!
//! This module provides the processor for ensemble data: tables whose
//! columns are ensemble members (spread and predictability indices), an
//! actual/predicted pair (windowed error metrics), or nine members plus one
//! observation (CRPS).
//!
//! ## Design notes
//!
//! * **Column roles**: Actual, predicted and observation columns are named
//!   explicitly, or inferred from the column count when unambiguous.
//! * **Row-wise**: Percentile bands, spread indices and CRPS are computed per
//!   row without windowing.
//! * **Chained**: The predictability index windows the spread-index table
//!   again with the configured window size.
//!
//! ## Invariants
//!
//! * Shape violations are reported before any computation starts.
//! * Output row `i` corresponds to input row or window `i`.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;
use std::sync::Arc;

// Internal dependencies
use crate::algorithms::crps::{CrpsEstimator, EnsembleCrps};
use crate::algorithms::pointwise;
use crate::engine::executor::{ExecutorConfig, IndexPassFn, MetricExecutor};
use crate::engine::output::{MetricSeries, MetricTable};
use crate::engine::validator::Validator;
use crate::math::percentile::{PercentileEstimator, PercentileInterpolation};
use crate::primitives::errors::UncertaintyError;
use crate::primitives::table::TimeSeriesTable;
use crate::primitives::window::WindowSpan;

// ============================================================================
// Ensemble Builder
// ============================================================================

/// Builder for the ensemble processor.
#[derive(Debug, Clone)]
pub struct EnsembleBuilder<T: Float> {
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

    /// Name of the observation column of CRPS.
    pub observation_column: Option<String>,

    /// CRPS strategy.
    pub crps_estimator: Arc<dyn CrpsEstimator<T>>,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom pass over windows and rows.
    #[doc(hidden)]
    pub custom_index_pass: Option<IndexPassFn<T>>,

    /// Parallel execution hint.
    #[doc(hidden)]
    pub parallel: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float + 'static> Default for EnsembleBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + 'static> EnsembleBuilder<T> {
    fn new() -> Self {
        Self {
            window_size: super::DEFAULT_WINDOW_SIZE,
            window_span: WindowSpan::default(),
            interpolation: PercentileInterpolation::default(),
            actual_column: None,
            predicted_column: None,
            observation_column: None,
            crps_estimator: Arc::new(EnsembleCrps),
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

    /// Name the observation column of CRPS.
    pub fn observation_column(mut self, name: &str) -> Self {
        self.observation_column = Some(name.to_string());
        self
    }

    /// Set the CRPS strategy.
    pub fn crps_estimator(mut self, estimator: Arc<dyn CrpsEstimator<T>>) -> Self {
        self.crps_estimator = estimator;
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

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the ensemble processor.
    pub fn build(self) -> Result<EnsembleMetrics<T>, UncertaintyError>
    where
        T: Debug + Send + Sync,
    {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        Validator::validate_window_size(self.window_size)?;

        let executor = MetricExecutor::new(ExecutorConfig {
            window_size: self.window_size,
            window_span: self.window_span,
            percentile: PercentileEstimator::new(self.interpolation),
            custom_index_pass: self.custom_index_pass,
            custom_fit_pass: None,
            parallel: self.parallel.unwrap_or(false),
        });

        Ok(EnsembleMetrics {
            executor,
            actual_column: self.actual_column,
            predicted_column: self.predicted_column,
            observation_column: self.observation_column,
            crps_estimator: self.crps_estimator,
        })
    }
}

// ============================================================================
// Ensemble Processor
// ============================================================================

/// Metrics over ensemble members and actual/predicted pairs.
#[derive(Debug, Clone)]
pub struct EnsembleMetrics<T: Float> {
    executor: MetricExecutor<T>,
    actual_column: Option<String>,
    predicted_column: Option<String>,
    observation_column: Option<String>,
    crps_estimator: Arc<dyn CrpsEstimator<T>>,
}

impl<T: Float + Debug + Send + Sync + 'static> EnsembleMetrics<T> {
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

    // ========================================================================
    // Windowed Pairwise Metrics
    // ========================================================================

    /// Pearson correlation of actual and predicted per window.
    pub fn correlation(
        &self,
        table: &TimeSeriesTable<T>,
    ) -> Result<MetricSeries<T>, UncertaintyError> {
        let columns = self.pair(table, "correlation")?;
        Ok(self
            .executor
            .windowed_pair(table, columns, "correlation", pointwise::correlation))
    }

    /// Mean absolute percentage error per window, excluding zero actuals.
    pub fn mape(&self, table: &TimeSeriesTable<T>) -> Result<MetricSeries<T>, UncertaintyError> {
        let columns = self.pair(table, "mape")?;
        Ok(self
            .executor
            .windowed_pair(table, columns, "mape", pointwise::mape))
    }

    /// Range-normalized RMSE per window.
    pub fn nrmse(&self, table: &TimeSeriesTable<T>) -> Result<MetricSeries<T>, UncertaintyError> {
        let columns = self.pair(table, "nrmse")?;
        Ok(self
            .executor
            .windowed_pair(table, columns, "nrmse", pointwise::nrmse))
    }

    /// Range-normalized MAE per window.
    pub fn nmae(&self, table: &TimeSeriesTable<T>) -> Result<MetricSeries<T>, UncertaintyError> {
        let columns = self.pair(table, "nmae")?;
        Ok(self
            .executor
            .windowed_pair(table, columns, "nmae", pointwise::nmae))
    }

    // ========================================================================
    // Row-wise Metrics
    // ========================================================================

    /// CRPS of the nine ensemble columns against the observation, per row.
    pub fn crps(&self, table: &TimeSeriesTable<T>) -> Result<MetricSeries<T>, UncertaintyError> {
        let (members, obs) = Validator::crps_columns(table, self.observation_column.as_deref())?;
        let estimator = &self.crps_estimator;

        Ok(self.executor.per_row(table, "crps", |row| {
            let ensemble: Vec<T> = members.iter().map(|&j| row[j]).collect();
            estimator.score(&ensemble, row[obs])
        }))
    }

    /// Percentile band of every row over all columns.
    pub fn percentile_bands(&self, table: &TimeSeriesTable<T>) -> MetricTable<T> {
        self.executor.percentile_bands(table)
    }

    /// Spread indices of every row over all columns.
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

    /// Predictability indices of an existing spread-index table.
    pub fn predictability_index_from(
        &self,
        spread: &MetricTable<T>,
    ) -> Result<MetricTable<T>, UncertaintyError> {
        self.executor.predictability_index(spread)
    }
}
