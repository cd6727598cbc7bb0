//! High-level API for uncertainty metrics with parallel execution support.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point of
//! `fastUqmetrics`. It extends the `uqmetrics` API with adapters that spread
//! independent windows, rows and variogram timestamps over all CPU cores.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `uqmetrics` builder pattern.
//! * **Parallel-First**: Every adapter defaults to parallel execution.
//! * **Transparent**: Marker types (SingleSeries, Ensemble, MultiSeries) select the parallel builders.
//!
//! ## Key concepts
//!
//! * **Parallel Support**: Uses `rayon` for acceleration.
//! * **Feature-Gated**: Parallelism is configurable via the `cpu` feature.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`UncertaintyBuilder`] via `Uncertainty::new()`.
//! 2. Chain configuration methods (`.window_size()`, `.interpolation()`, etc.).
//! 3. Select an adapter via `.adapter(Ensemble)` to get a parallel execution builder.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::adapters::ensemble::ParallelEnsembleBuilder;
use crate::adapters::multiple::ParallelMultiSeriesBuilder;
use crate::adapters::single::ParallelSingleSeriesBuilder;

// Import base marker types for delegation
use uqmetrics::internals::api::Ensemble as BaseEnsemble;
use uqmetrics::internals::api::MultiSeries as BaseMultiSeries;
use uqmetrics::internals::api::SingleSeries as BaseSingleSeries;

// Publicly re-exported types
pub use crate::adapters::ensemble::ParallelEnsembleMetrics;
pub use crate::adapters::multiple::ParallelMultiSeriesMetrics;
pub use crate::adapters::single::ParallelSingleSeriesMetrics;
pub use crate::input::{table_from_array, TableInput};
pub use uqmetrics::internals::api::{UncertaintyAdapter, UncertaintyBuilder};
pub use uqmetrics::internals::api::{
    CrpsEstimator, CurveFitter, EnsembleCrps, FitFailure, FitSolution, InitialGuess,
    LevenbergMarquardt, MetricSeries, MetricTable, ParametricModel, PercentileBand,
    PercentileEstimator, PercentileInterpolation, SpatialSample, SpectralEntropyEstimator,
    TimeSeriesTable, TimestampFit, UncertaintyError, VariogramModel, VariogramReport,
    WelchEntropy, WindowSpan,
};

// ============================================================================
// Adapter Module
// ============================================================================

/// Adapter selection namespace.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Ensemble, MultiSeries, SingleSeries};
}

// ============================================================================
// Adapter Marker Types
// ============================================================================

/// Marker for parallel single-series metrics.
#[derive(Debug, Clone, Copy)]
pub struct SingleSeries;

impl<T: Float + 'static> UncertaintyAdapter<T> for SingleSeries {
    type Output = ParallelSingleSeriesBuilder<T>;

    fn convert(builder: UncertaintyBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BaseSingleSeries as UncertaintyAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelSingleSeriesBuilder { base }
    }
}

/// Marker for parallel ensemble metrics.
#[derive(Debug, Clone, Copy)]
pub struct Ensemble;

impl<T: Float + 'static> UncertaintyAdapter<T> for Ensemble {
    type Output = ParallelEnsembleBuilder<T>;

    fn convert(builder: UncertaintyBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BaseEnsemble as UncertaintyAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelEnsembleBuilder { base }
    }
}

/// Marker for parallel multiple-series metrics and variograms.
#[derive(Debug, Clone, Copy)]
pub struct MultiSeries;

impl<T: Float + 'static> UncertaintyAdapter<T> for MultiSeries {
    type Output = ParallelMultiSeriesBuilder<T>;

    fn convert(builder: UncertaintyBuilder<T>) -> Self::Output {
        // Determine parallel mode: user choice OR default to true
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to base implementation to create base builder
        let mut base = <BaseMultiSeries as UncertaintyAdapter<T>>::convert(builder);
        base = base.parallel(parallel);

        // Wrap with extension fields
        ParallelMultiSeriesBuilder { base }
    }
}
