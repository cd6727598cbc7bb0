//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure numerical building blocks: percentile estimation,
//! descriptive moments and pairwise distances. Functions here know nothing
//! about windows, tables or configuration.
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
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Order-statistic percentile estimation.
pub mod percentile;

/// Mean, standard deviation, extrema, correlation.
pub mod moments;

/// Pairwise Euclidean distances.
pub mod distance;
