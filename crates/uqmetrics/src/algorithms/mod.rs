//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the metric algorithms: per-window reducers, the
//! spread-index and predictability-index chain, the spatial variogram fit,
//! and the strategy interfaces for the pluggable estimators (spectral
//! entropy, CRPS, nonlinear least squares).
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Per-window scalar reducers.
pub mod pointwise;

/// Percentile bands and spread indices.
pub mod spread;

/// Predictability index over spread-index windows.
pub mod predictability;

/// Spatial semivariogram construction and fit.
pub mod variogram;

/// Nonlinear least-squares fitting.
pub mod fitting;

/// Spectral entropy estimation.
pub mod spectral;

/// Continuous Ranked Probability Score.
pub mod crps;
