//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer orchestrates metric computation: it drives the windowed and
//! per-row passes over a table, isolates per-timestamp variogram failures,
//! validates configuration and shapes, and defines the result types.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Adapters
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Pass execution and shared operations.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for metric operations.
pub mod output;
