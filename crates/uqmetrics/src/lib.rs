//! # uqmetrics - Uncertainty Quantification Metrics for Rust
//!
//! Sliding-window and per-row metrics that describe how uncertain a
//! time series or an ensemble forecast is: dispersion and spectral
//! complexity of a single series, error and spread metrics of ensembles,
//! the continuous ranked probability score, and spatial semivariograms of
//! multi-site data.
//!
//! ## Data Shapes
//!
//! All metrics read a [`TimeSeriesTable`](prelude::TimeSeriesTable): an
//! ordered sequence of numeric rows with named columns. Three adapters cover
//! the three data shapes:
//!
//! | Adapter        | Input                               | Metrics                                                       |
//! |----------------|-------------------------------------|---------------------------------------------------------------|
//! | `SingleSeries` | one series (or pooled columns)      | standard deviation, turbulence intensity, variability index, spectral entropy |
//! | `Ensemble`     | members, actual/predicted, 9 + obs  | correlation, MAPE, NRMSE, NMAE, percentile bands, spread and predictability indices, CRPS |
//! | `MultiSeries`  | one column per site                 | correlation, MAPE, spread and predictability indices, kriging variogram |
//!
//! ## Quick Start
//!
//! ```rust
//! use uqmetrics::prelude::*;
//!
//! let wind = vec![5.0, 5.4, 6.1, 5.8, 6.4, 7.0, 6.6, 6.9, 7.5, 7.1];
//! let table = TimeSeriesTable::univariate("wind_speed", &wind);
//!
//! let metrics = Uncertainty::new()
//!     .window_size(4)
//!     .adapter(SingleSeries)
//!     .build()?;
//!
//! let std = metrics.standard_deviation(&table);
//! assert_eq!(std.len(), 7);
//! assert!(std.iter().all(|s| *s >= 0.0));
//!
//! println!("{}", std);
//! # Result::<(), UncertaintyError>::Ok(())
//! ```
//!
//! ### Ensembles
//!
//! ```rust
//! use uqmetrics::prelude::*;
//!
//! let table = TimeSeriesTable::from_rows(
//!     &["m1", "m2", "m3", "m4"],
//!     &[
//!         [10.0, 11.0, 12.0, 13.0],
//!         [10.5, 11.5, 12.0, 14.0],
//!         [11.0, 12.5, 13.0, 15.0],
//!     ],
//! )?;
//!
//! let metrics = Uncertainty::new()
//!     .window_size(2)
//!     .interpolation(Linear)
//!     .adapter(Ensemble)
//!     .build()?;
//!
//! let spread = metrics.spread_index(&table);
//! assert_eq!(spread.columns(), &["SI_90_10", "SI_80_20", "SI_70_30", "SI_60_40"]);
//! assert_eq!(spread.n_rows(), 3);
//!
//! // Windows the spread indices again: len - w rows.
//! let predictability = metrics.predictability_index(&table)?;
//! assert_eq!(predictability.n_rows(), 1);
//! # Result::<(), UncertaintyError>::Ok(())
//! ```
//!
//! ### Spatial Variograms
//!
//! ```rust
//! use uqmetrics::prelude::*;
//!
//! let table = TimeSeriesTable::from_columns(&[
//!     ("lon", vec![0.0, 0.05, 0.10, 0.0, 0.12, 0.07]),
//!     ("lat", vec![0.0, 0.02, 0.0, 0.09, 0.11, 0.06]),
//!     ("t0", vec![8.1, 8.4, 7.9, 9.0, 8.7, 8.3]),
//! ])?;
//!
//! let metrics = Uncertainty::new().adapter(MultiSeries).build()?;
//! let report = metrics.kriging_variogram(&table, &["t0"], "lat", "lon")?;
//!
//! assert_eq!(report.len(), 1);
//! println!("{}", report);
//! # Result::<(), UncertaintyError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! Configuration problems surface from `.build()`; shape problems (wrong
//! column count, unknown column names) surface from the metric call before
//! any computation. Numerical degeneracies such as a zero-mean window yield
//! NaN or infinity in the output instead of an error. Variogram fits that do
//! not converge are recorded per timestamp in the
//! [`VariogramReport`](prelude::VariogramReport) without aborting the batch.
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: a `debug!` record per metric
//! pass, `warn!` for empty outputs and failed variogram fits, and an `info!`
//! summary per variogram batch. Install any logger (e.g. `env_logger`) to
//! see them.
//!
//! ## References
//!
//! - Welch, P. (1967). "The use of fast Fourier transform for the estimation of power spectra"
//! - Gneiting, T. & Raftery, A. E. (2007). "Strictly Proper Scoring Rules, Prediction, and Estimation"
//! - Cressie, N. (1993). "Statistics for Spatial Data"
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

// Layer 1: Primitives - tables, windows and errors.
mod primitives;

// Layer 2: Math - percentiles, moments and distances.
mod math;

// Layer 3: Algorithms - metric kernels and the variogram fit.
mod algorithms;

// Layer 4: Engine - orchestration and execution control.
mod engine;

// Layer 5: Adapters - data-shape adapters.
mod adapters;

// High-level fluent API for uncertainty metrics.
mod api;

// Standard uqmetrics prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Ensemble, MultiSeries, SingleSeries},
        CrpsEstimator, CurveFitter, EnsembleCrps, EnsembleMetrics, FitFailure, FitSolution,
        InitialGuess, LevenbergMarquardt, MetricSeries, MetricTable, MultiSeriesMetrics,
        ParametricModel, PercentileBand, PercentileEstimator,
        PercentileInterpolation::Linear,
        PercentileInterpolation::Midpoint,
        SingleSeriesMetrics, SpatialSample, SpectralEntropyEstimator, TimeSeriesTable,
        TimestampFit, UncertaintyBuilder as Uncertainty, UncertaintyError, VariogramModel,
        VariogramReport, WelchEntropy,
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
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
