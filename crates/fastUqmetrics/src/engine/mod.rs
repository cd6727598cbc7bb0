//! Layer 4: Engine
//!
//! This layer provides the parallel execution engine for uncertainty metrics.
//! It distributes independent windows, rows and variogram timestamps across
//! CPU cores.

// Parallel execution engine using CPU threads
pub mod executor;
