//! Parallel execution engine for uncertainty metric passes.
//!
//! ## Purpose
//!
//! This module provides the parallel pass functions that are injected into
//! the `uqmetrics` execution engine. Windows, ensemble rows, predictability
//! windows and variogram timestamps are independent units, so each pass
//! distributes them across CPU cores.
//!
//! ## Design notes
//!
//! * **Implementation**: Drop-in replacements for the sequential passes.
//! * **Parallelism**: Uses `rayon` for data-parallel execution across CPU cores.
//! * **Ordering**: Unit `i` writes slot `i`, so output order is independent
//!   of scheduling and matches the sequential pass exactly.
//!
//! ## Key concepts
//!
//! * **Integration**: Plugs into the `uqmetrics` executor via the
//!   `IndexPassFn` and `FitPassFn` hooks.
//!
//! ## Non-goals
//!
//! * This module does not decide what a unit computes (handled by `uqmetrics::executor`).
//! * This module does not validate input data.

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// Export dependencies from uqmetrics crate
#[cfg(feature = "cpu")]
use uqmetrics::internals::algorithms::variogram::VariogramModel;
#[cfg(feature = "cpu")]
use uqmetrics::internals::primitives::errors::FitFailure;

// ============================================================================
// Parallel Passes
// ============================================================================

/// Fill `units` fixed-width output slots in parallel.
#[cfg(feature = "cpu")]
pub fn index_pass_parallel<T>(
    units: usize,
    width: usize,
    fill: &(dyn Fn(usize, &mut [T]) + Sync),
    out: &mut [T],
) where
    T: Send + Sync,
{
    if width == 0 || units == 0 {
        return;
    }

    out.par_chunks_mut(width)
        .take(units)
        .enumerate()
        .for_each(|(i, slot)| fill(i, slot));
}

/// Fit every variogram timestamp in parallel, preserving timestamp order.
#[cfg(feature = "cpu")]
pub fn fit_pass_parallel<T>(
    units: usize,
    fit: &(dyn Fn(usize) -> Result<VariogramModel<T>, FitFailure> + Sync),
) -> Vec<Result<VariogramModel<T>, FitFailure>>
where
    T: Send + Sync,
{
    (0..units).into_par_iter().map(fit).collect()
}
