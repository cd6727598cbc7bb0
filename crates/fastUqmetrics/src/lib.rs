//! # fastUqmetrics - Parallel Uncertainty Quantification Metrics
//!
//! A multi-threaded front end to [`uqmetrics`]. Sliding windows, ensemble
//! rows, predictability windows and per-timestamp variogram fits are
//! independent units of work; `fastUqmetrics` spreads them over all CPU
//! cores with [rayon](https://docs.rs/rayon) and produces exactly the results
//! of the sequential crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastUqmetrics::prelude::*;
//! use ndarray::Array1;
//!
//! let wind = Array1::from_vec(vec![5.0, 5.4, 6.1, 5.8, 6.4, 7.0, 6.6, 6.9, 7.5, 7.1]);
//!
//! // Parallel by default
//! let metrics = Uncertainty::new()
//!     .window_size(4)
//!     .adapter(SingleSeries)
//!     .build()?;
//!
//! // Accepts &Array1<f64>, &[f64], Vec<f64> or a TimeSeriesTable
//! let std = metrics.standard_deviation(&wind)?;
//! assert_eq!(std.len(), 7);
//! # Result::<(), UncertaintyError>::Ok(())
//! ```
//!
//! ### ndarray Integration
//!
//! Two-dimensional arrays are read row by row. Their columns are named
//! `c0, c1, ...`; use [`table_from_array`](prelude::table_from_array) to
//! give them names.
//!
//! ```rust
//! use fastUqmetrics::prelude::*;
//! use ndarray::array;
//!
//! let members = array![
//!     [10.0, 11.0, 12.0, 13.0],
//!     [10.5, 11.5, 12.0, 14.0],
//!     [11.0, 12.5, 13.0, 15.0],
//! ];
//!
//! let metrics = Uncertainty::new()
//!     .window_size(2)
//!     .adapter(Ensemble)
//!     .build()?;
//!
//! let spread = metrics.spread_index(&members)?;
//! assert_eq!(spread.n_rows(), 3);
//!
//! let named = table_from_array(&["m1", "m2", "m3", "m4"], &members)?;
//! assert_eq!(named.columns()[0], "m1");
//! # Result::<(), UncertaintyError>::Ok(())
//! ```
//!
//! Arrays must be contiguous in row-major order; a transposed view is
//! rejected with [`UncertaintyError::InvalidInput`](prelude::UncertaintyError::InvalidInput).
//!
//! ## Sequential Execution
//!
//! Call `.parallel(false)` on any adapter builder, or build without the
//! default `cpu` feature, to fall back to the sequential passes of
//! `uqmetrics`.
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

#![allow(non_snake_case)]

// Layer 4: Engine - parallel passes.
mod engine;

// Layer 5: Adapters - parallel data-shape adapters.
mod adapters;

// High-level fluent API for parallel uncertainty metrics.
mod api;

// Input data handling.
mod input;

// Standard fastUqmetrics prelude.
pub mod prelude {
    pub use crate::api::{
        table_from_array,
        Adapter::{Ensemble, MultiSeries, SingleSeries},
        CrpsEstimator, CurveFitter, EnsembleCrps, FitFailure, FitSolution, InitialGuess,
        LevenbergMarquardt, MetricSeries, MetricTable, ParallelEnsembleMetrics,
        ParallelMultiSeriesMetrics, ParallelSingleSeriesMetrics, ParametricModel,
        PercentileBand, PercentileEstimator,
        PercentileInterpolation::Linear,
        PercentileInterpolation::Midpoint,
        SpatialSample, SpectralEntropyEstimator, TableInput, TimeSeriesTable, TimestampFit,
        UncertaintyBuilder as Uncertainty, UncertaintyError, VariogramModel, VariogramReport,
        WelchEntropy,
        WindowSpan::Full,
        WindowSpan::Truncated,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod input {
        pub use crate::input::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
