//! Single-series adapter with parallel window evaluation.
//!
//! ## Purpose
//!
//! This module provides the single-series processor of `fastUqmetrics`.
//! It evaluates the windows of a series on all available CPU cores and
//! accepts tables, slices, vectors and `ndarray` arrays.
//!
//! ## Design notes
//!
//! * **Delegation**: Wraps the `uqmetrics` single-series builder.
//! * **Parallelism**: Injects the rayon window pass (fastUqmetrics extension).
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * Results are identical to the sequential `uqmetrics` processor.
//!
//! ## Non-goals
//!
//! * This adapter does not compare series (use the ensemble adapter).

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
use uqmetrics::internals::adapters::single::{SingleSeriesBuilder, SingleSeriesMetrics};
use uqmetrics::internals::algorithms::spectral::SpectralEntropyEstimator;
use uqmetrics::internals::engine::output::MetricSeries;
use uqmetrics::internals::primitives::errors::UncertaintyError;
use uqmetrics::internals::primitives::window::WindowSpan;

// Internal dependencies
use crate::input::TableInput;

// ============================================================================
// Extended Single-Series Builder
// ============================================================================

/// Builder for the single-series processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelSingleSeriesBuilder<T: Float> {
    /// Base builder from the uqmetrics crate
    pub base: SingleSeriesBuilder<T>,
}

impl<T: Float + 'static> Default for ParallelSingleSeriesBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float + 'static> ParallelSingleSeriesBuilder<T> {
    fn new() -> Self {
        let base = SingleSeriesBuilder::default().parallel(true);
        Self { base }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.base = self.base.parallel(parallel);
        self
    }

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

    /// Set the spectral-entropy strategy.
    pub fn spectral_entropy(mut self, estimator: Arc<dyn SpectralEntropyEstimator<T>>) -> Self {
        self.base = self.base.spectral_entropy(estimator);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the single-series processor.
    pub fn build(self) -> Result<ParallelSingleSeriesMetrics<T>, UncertaintyError>
    where
        T: Debug + Send + Sync,
    {
        let mut builder = self.base;

        #[cfg(feature = "cpu")]
        {
            if builder.parallel.unwrap_or(true) {
                debug!("single-series: rayon passes enabled");
                builder = builder.custom_index_pass(index_pass_parallel);
            } else {
                builder.custom_index_pass = None;
            }
        }
        #[cfg(not(feature = "cpu"))]
        {
            builder.custom_index_pass = None;
        }

        Ok(ParallelSingleSeriesMetrics {
            inner: builder.build()?,
        })
    }
}

// ============================================================================
// Extended Single-Series Processor
// ============================================================================

/// Single-series processor with parallel support.
#[derive(Debug, Clone)]
pub struct ParallelSingleSeriesMetrics<T: Float> {
    inner: SingleSeriesMetrics<T>,
}

impl<T: Float + Debug + Send + Sync + 'static> ParallelSingleSeriesMetrics<T> {
    /// Population standard deviation of each window.
    pub fn standard_deviation<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        Ok(self.inner.standard_deviation(&table))
    }

    /// Standard deviation over mean of each window.
    pub fn turbulence_intensity<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        Ok(self.inner.turbulence_intensity(&table))
    }

    /// Peak-to-peak spread over mean of each window.
    pub fn variability_index<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        Ok(self.inner.variability_index(&table))
    }

    /// Normalized spectral entropy of each window.
    pub fn spectral_entropy<I>(&self, input: &I) -> Result<MetricSeries<T>, UncertaintyError>
    where
        I: TableInput<T> + ?Sized,
    {
        let table = input.as_table()?;
        Ok(self.inner.spectral_entropy(&table))
    }

    /// Window size in use.
    pub fn window_size(&self) -> usize {
        self.inner.window_size()
    }
}
