//! Layer 5: Adapters
//!
//! # Purpose
//!
//! This layer provides one processor per data shape: a single series, an
//! ensemble (members, actual/predicted pairs, CRPS rows) and multiple aligned
//! series with spatial variograms. Each adapter resolves its column roles and
//! delegates the passes to the engine.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters ← You are here
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Default window size of every adapter.
pub const DEFAULT_WINDOW_SIZE: usize = 12;

/// Single-series adapter.
pub mod single;

/// Ensemble adapter.
pub mod ensemble;

/// Multiple-series adapter.
pub mod multiple;
