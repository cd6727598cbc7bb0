//! Ensemble adapter with parallel row and window evaluation.
//!
//! ## Purpose
//!
//! This module provides the ensemble processor of `fastUqmetrics`. Percentile
//! bands, spread indices, CRPS rows and predictability windows are evaluated
//! on all available CPU cores.
//!
//! ## Design notes
//!
//! * **Delegation**: Wraps the `uqmetrics` ensemble builder.
//! * **Parallelism**: Injects the rayon index pass (fastUqmetrics extension).
//! * **Input**: Every metric accepts any [`TableInput`].
//!
//! ## Invariants
//!
//! * Results are identical to the sequential `uqmetrics` processor.

// Feature-gated imports
#[cfg(feature = "cpu")]
use log::debug;
#[cfg(feature = "cpu")]
use crate::engine::executor::index_pass_parallel;

// External dependencies
use num_traits::Float;
use std::fmt::Debug;
use std::result::Result;
use std::sync::Arc;

// Export dependencies from uqmetrics crate
use uqmetrics::internals::adapters::ensemble::{EnsembleBuilder, EnsembleMetrics};
use uqmetrics::internals::algorithms::crps::CrpsEstimator;
use uqmetrics::internals::engine::output::{MetricSeries, MetricTable};
use uqmetrics::internals::math::percentile::PercentileInterpolation;
use uqmetrics::internals::primitives::errors::UncertaintyError;
use uqmetrics::internals::primitives::window::WindowSpan;

// Internal dependencies
use crate::input::TableInput;

// ============================================================================
// Extended Ensemble Builder
// ============================================================================

/// Builder for the ensemble processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelEnsembleBuilder<T: Float> {
    /// Base builder from the uqmetrics crate
    pub base: EnsembleBuilder<T>,
}

impl<T: Float + 'static> Default for ParallelEnsembleBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + 'static> ParallelEnsembleBuilder<T> {
    fn new() -> Self {
        let base = EnsembleBuilder::default().parallel(true);
        Self { base }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the window size.
    pub fn window_size(mut self, window_size: usize) -> Self {
        self.base = self.base.window_size(window_size);
        self
    }

    /// Set the rows covered by each window.
    pub fn window_span(mut self, span: WindowSpan) -> Self {
        self.base = self.base.window_span(span);
        self
    }

    /// Set the percentile interpolation rule.
    pub fn interpolation(mut self, interpolation: PercentileInterpolation) -> Self {
        self.base = self.base.interpolation(interpolation);
        self
    }

    /// Name the actual column of pairwise metrics.
    pub fn actual_column(mut self, name: &str) -> Self {
        self.base = self.base.actual_column(name);
        self
    }

    /// Name the predicted column of pairwise metrics.
    pub fn predicted_column(mut self, name: &str) -> Self {
        self.base = self.base.predicted_column(name);
        self
    }

    // ========================================================================
    // Ensemble-Specific Setters
    // ========================================================================

    /// Name the observation column of CRPS.
    pub fn observation_column(mut self, name: &str) -> Self {
        self.base = self.base.observation_column(name);
        self
    }

    /// Set the CRPS strategy.
    pub fn crps_estimator(mut self, estimator: Arc<dyn CrpsEstimator<T>>) -> Self {
        self.base = self.base.crps_estimator(estimator);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the ensemble processor.
    pub fn build(self) -> Result<ParallelEnsembleMetrics<T>, UncertaintyError>
    where
        T: Debug + Send + Sync,
    {
        let mut builder = self.base;

        #[cfg(feature = "cpu")]
        {
            if builder.parallel.unwrap_or(true) {
                debug!("ensemble: rayon passes enabled");
                builder = builder.custom_index_pass(index_pass_parallel);
            } else {
                builder.custom_index_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            builder.custom_index_pass = None;
        }

        Ok(ParallelEnsembleMetrics {
            inner: builder.build()?,
        })
    }
}

// ============================================================================
// Extended Ensemble Processor
// ============================================================================

/// Ensemble processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelEnsembleMetrics<T: Float> {
    inner: EnsembleMetrics<T>,
}

impl<T: Float + Debug + Send + Sync + 'static> ParallelEnsembleMetrics<T> {
    /// Pearson correlation between actual and predicted per window.
    pub fn correlation<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        self.inner.correlation(&table)
    }

    /// Mean absolute percentage error per window.
    pub fn mape<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        self.inner.mape(&table)
    }

    /// Normalized root mean squared error per window.
    pub fn nrmse<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        self.inner.nrmse(&table)
    }

    /// Normalized mean absolute error per window.
    pub fn nmae<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        self.inner.nmae(&table)
    }

    /// Continuous ranked probability score of every row.
    pub fn crps<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        self.inner.crps(&table)
    }

    /// Percentile band of every row over all columns.
    pub fn percentile_bands<I>(&self, input: &I) -> Result<MetricTable<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        Ok(self.inner.percentile_bands(&table))
    }

    /// Spread indices of every row over all columns.
    pub fn spread_index<I>(&self, input: &I) -> Result<MetricTable<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        Ok(self.inner.spread_index(&table))
    }

    /// Predictability indices derived from the spread indices of the input.
    pub fn predictability_index<I>(&self, input: &I) -> Result<MetricTable<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        self.inner.predictability_index(&table)
    }

    /// Predictability indices of an existing spread-index table.
    pub fn predictability_index_from(
        &self,
        spread: &MetricTable<T>,
    ) -> Result<MetricTable<T>, UncertaintyError> {
        self.inner.predictability_index_from(spread)
    }
}
