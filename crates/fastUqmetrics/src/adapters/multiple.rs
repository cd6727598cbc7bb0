//! Multiple-series adapter with parallel variogram fitting.
//!
//! ## Purpose
//!
//! This module provides the multiple-series processor of `fastUqmetrics`.
//! Each timestamp's semivariogram is fitted on its own CPU core; spread and
//! predictability passes run in parallel as well.
//!
//! ## Design notes
//!
//! * **Delegation**: Wraps the `uqmetrics` multiple-series builder.
//! * **Parallelism**: Injects the rayon index and fit passes (fastUqmetrics extension).
//! * **Isolation**: A failed timestamp never affects the fits of the others.
//!
//! ## Invariants
//!
//! * Report entry `i` corresponds to the `i`-th requested value column.
//! * Results are identical to the sequential `uqmetrics` processor.
//!
//! ## Non-goals
//!
//! * This adapter does not choose the parallel granularity; one timestamp is one task.

// Feature-gated imports
#[cfg(feature = "cpu")]
use log::debug;
#[cfg(feature = "cpu")]
use crate::engine::executor::{fit_pass_parallel, index_pass_parallel};

// External dependencies
use num_traits::Float;
use std::fmt::Debug;
use std::result::Result;
use std::sync::Arc;

// Export dependencies from uqmetrics crate
use uqmetrics::internals::adapters::multiple::{MultiSeriesBuilder, MultiSeriesMetrics};
use uqmetrics::internals::algorithms::fitting::CurveFitter;
use uqmetrics::internals::algorithms::variogram::{InitialGuess, SpatialSample};
use uqmetrics::internals::engine::output::{MetricSeries, MetricTable, VariogramReport};
use uqmetrics::internals::math::percentile::PercentileInterpolation;
use uqmetrics::internals::primitives::errors::UncertaintyError;
use uqmetrics::internals::primitives::window::WindowSpan;

// Internal dependencies
use crate::input::TableInput;

// ============================================================================
// Extended Multi-Series Builder
// ============================================================================

/// Builder for the multiple-series processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelMultiSeriesBuilder<T: Float> {
    /// Base builder from the uqmetrics crate
    pub base: MultiSeriesBuilder<T>,
}

impl<T: Float + 'static> Default for ParallelMultiSeriesBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + 'static> ParallelMultiSeriesBuilder<T> {
    fn new() -> Self {
        let base = MultiSeriesBuilder::default().parallel(true);
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
    // Variogram Setters
    // ========================================================================

    /// Set the curve-fitting strategy.
    pub fn curve_fitter(mut self, fitter: Arc<dyn CurveFitter<T>>) -> Self {
        self.base = self.base.curve_fitter(fitter);
        self
    }

    /// Set the initial-guess strategy.
    pub fn initial_guess(mut self, guess: InitialGuess<T>) -> Self {
        self.base = self.base.initial_guess(guess);
        self
    }

    /// Set the iteration limit of the default fitter.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.base = self.base.max_iterations(iterations);
        self
    }

    /// Set the convergence tolerance of the default fitter.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.base = self.base.tolerance(tolerance);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the multiple-series processor.
    pub fn build(self) -> Result<ParallelMultiSeriesMetrics<T>, UncertaintyError>
    where
        T: Debug + Send + Sync,
    {
        let mut builder = self.base;

        #[cfg(feature = "cpu")]
        {
            if builder.parallel.unwrap_or(true) {
                debug!("multiple-series: rayon passes enabled");
                builder = builder
                    .custom_index_pass(index_pass_parallel)
                    .custom_fit_pass(fit_pass_parallel);
            } else {
                builder.custom_index_pass = None;
                builder.custom_fit_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            builder.custom_index_pass = None;
            builder.custom_fit_pass = None;
        }

        Ok(ParallelMultiSeriesMetrics {
            inner: builder.build()?,
        })
    }
}

// ============================================================================
// Extended Multi-Series Processor
// ============================================================================

/// Multiple-series processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelMultiSeriesMetrics<T: Float> {
    inner: MultiSeriesMetrics<T>,
}

impl<T: Float + Debug + Send + Sync + 'static> ParallelMultiSeriesMetrics<T> {
    /// Pearson correlation between two series per window.
    pub fn correlation<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        self.inner.correlation(&table)
    }

    /// Mean absolute percentage error between two series per window.
    pub fn mape<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        self.inner.mape(&table)
    }

    /// Spread indices across all series, per row.
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

    /// Fit a semivariogram for each value column, one timestamp per task.
    pub fn kriging_variogram<I>(
        &self,
        input: &I,
        value_columns: &[&str],
        latitude: &str,
        longitude: &str,
    ) -> Result<VariogramReport<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        self.inner
            .kriging_variogram(&table, value_columns, latitude, longitude)
    }

    /// Fit a semivariogram for each prepared sample.
    pub fn fit_batch(&self, samples: &[SpatialSample<T>]) -> VariogramReport<T> {
        self.inner.fit_batch(samples)
    }
}
