//! Layer 5: Adapters
//!
//! This layer wraps the `uqmetrics` processors with parallel execution and
//! flexible input types:
//!
//! - **SingleSeries**: Windowed dispersion and entropy metrics
//! - **Ensemble**: Percentile bands, spread, predictability and CRPS
//! - **MultiSeries**: Cross-series metrics and per-timestamp variograms

// Single-series adapter.
pub mod single;

// Ensemble adapter.
pub mod ensemble;

// Multiple-series adapter with variogram fitting.
pub mod multiple;
