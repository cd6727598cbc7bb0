//! Execution engine for windowed and per-row metric passes.
//!
//! ## Purpose
//!
//! This module provides the shared "reduce over units" machinery used by all
//! adapters. A unit is one window, one ensemble row, one predictability
//! window or one variogram timestamp; each unit fills a fixed-width slot of an
//! output buffer. The executor also hosts the operations shared by several
//! adapters (pairwise error metrics, spread and predictability indices,
//! variogram batches).
//!
//! ## Design notes
//!
//! * **Injectable passes**: The loop over units is a plain function pointer,
//!   sequential by default. The parallel crate swaps in a rayon pass through
//!   the same hook.
//! * **Ordered**: Unit `i` always writes slot `i`, so results are aligned with
//!   the input regardless of execution order.
//! * **Isolation**: Variogram fits return one `Result` per timestamp.
//!
//! ## Invariants
//!
//! * Output buffers are pre-filled with NaN; a unit that cannot produce a
//!   value leaves its slot as NaN.
//! * Windows are produced by [`Windows`], so window counts follow the shared
//!   `N - w + 1` rule.
//!
//! ## Non-goals
//!
//! * This module does not validate configuration (handled by `validator`).
//! * This module does not spawn threads itself.

// External dependencies
use core::fmt::Debug;
use log::{debug, info, warn};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::predictability::{
    predictability_window_count, window_drift, PREDICTABILITY_INDEX_NAMES,
};
use crate::algorithms::spread::{
    spread_index_row, PercentileBand, PERCENTILE_NAMES, SPREAD_INDEX_NAMES,
};
use crate::algorithms::variogram::{SpatialSample, VariogramFitter, VariogramModel};
use crate::engine::output::{MetricSeries, MetricTable, TimestampFit, VariogramReport};
use crate::math::percentile::PercentileEstimator;
use crate::primitives::errors::{FitFailure, UncertaintyError};
use crate::primitives::table::{RowBlock, TimeSeriesTable};
use crate::primitives::window::{WindowSpan, Windows};

// ============================================================================
// Type Definitions
// ============================================================================

/// Signature for a custom pass over independent units.
#[doc(hidden)]
pub type IndexPassFn<T> = fn(
    usize,                              // number of units
    usize,                              // values written per unit
    &(dyn Fn(usize, &mut [T]) + Sync),  // fills the slot of unit i
    &mut [T],                           // output (units * width)
);

/// Signature for a custom pass over variogram timestamps.
#[doc(hidden)]
pub type FitPassFn<T> = fn(
    usize,                                                          // number of timestamps
    &(dyn Fn(usize) -> Result<VariogramModel<T>, FitFailure> + Sync), // fits timestamp i
) -> Vec<Result<VariogramModel<T>, FitFailure>>;

/// Sequential pass over units in index order.
pub fn index_pass_sequential<T>(
    units: usize,
    width: usize,
    fill: &(dyn Fn(usize, &mut [T]) + Sync),
    out: &mut [T],
) {
    if width == 0 {
        return;
    }
    for (i, slot) in out.chunks_mut(width).take(units).enumerate() {
        fill(i, slot);
    }
}

/// Sequential pass over timestamps in index order.
pub fn fit_pass_sequential<T>(
    units: usize,
    fit: &(dyn Fn(usize) -> Result<VariogramModel<T>, FitFailure> + Sync),
) -> Vec<Result<VariogramModel<T>, FitFailure>> {
    (0..units).map(fit).collect()
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration shared by all metric passes.
#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig<T> {
    /// Configured window size `w`.
    pub window_size: usize,

    /// Rows per window relative to `w`.
    pub window_span: WindowSpan,

    /// Percentile estimator for bands and spread indices.
    pub percentile: PercentileEstimator,

    // ++++++++++++++++++++++++++++++++++++++
    // +               DEV                  +
    // ++++++++++++++++++++++++++++++++++++++
    /// Custom pass over windows and rows.
    #[doc(hidden)]
    pub custom_index_pass: Option<IndexPassFn<T>>,

    /// Custom pass over variogram timestamps.
    #[doc(hidden)]
    pub custom_fit_pass: Option<FitPassFn<T>>,

    /// Whether custom passes should be used.
    #[doc(hidden)]
    pub parallel: bool,
}

// ============================================================================
// Executor
// ============================================================================

/// Runs metric passes according to an [`ExecutorConfig`].
#[derive(Debug, Clone, Copy)]
pub struct MetricExecutor<T> {
    config: ExecutorConfig<T>,
}

impl<T: Float + Debug + Send + Sync + 'static> MetricExecutor<T> {
    /// Create an executor.
    pub fn new(config: ExecutorConfig<T>) -> Self {
        Self { config }
    }

    /// Configuration in use.
    pub fn config(&self) -> &ExecutorConfig<T> {
        &self.config
    }

    /// Run `fill` over `units` slots of `width` values each.
    pub fn run_indexed(
        &self,
        units: usize,
        width: usize,
        fill: &(dyn Fn(usize, &mut [T]) + Sync),
    ) -> Vec<T> {
        let mut out = vec![T::nan(); units * width];
        match self.config.custom_index_pass {
            Some(pass) if self.config.parallel => pass(units, width, fill, &mut out),
            _ => index_pass_sequential(units, width, fill, &mut out),
        }
        out
    }

    // ========================================================================
    // Windowed Passes
    // ========================================================================

    /// Reduce every window of `table` to a scalar.
    pub fn windowed<F>(&self, table: &TimeSeriesTable<T>, name: &str, reduce: F) -> MetricSeries<T>
    where
        F: Fn(RowBlock<'_, T>) -> T + Sync,
    {
        let windows = Windows::new(table, self.config.window_size, self.config.window_span);
        let count = windows.count_total();
        if count == 0 {
            warn!(
                "{}: window size {} exceeds {} rows, returning an empty series",
                name,
                self.config.window_size,
                table.n_rows()
            );
        }
        debug!("{}: reducing {} windows", name, count);

        let values = self.run_indexed(count, 1, &|i: usize, slot: &mut [T]| {
            slot[0] = reduce(windows.window(i));
        });
        MetricSeries::new(name, values)
    }

    /// Reduce every window of an actual/predicted column pair to a scalar.
    pub fn windowed_pair(
        &self,
        table: &TimeSeriesTable<T>,
        columns: (usize, usize),
        name: &str,
        metric: fn(&[T], &[T]) -> T,
    ) -> MetricSeries<T> {
        let (actual, predicted) = columns;
        self.windowed(table, name, |window| {
            metric(&window.column(actual), &window.column(predicted))
        })
    }

    // ========================================================================
    // Per-Row Passes
    // ========================================================================

    /// Map every row of `table` to a scalar.
    pub fn per_row<F>(&self, table: &TimeSeriesTable<T>, name: &str, f: F) -> MetricSeries<T>
    where
        F: Fn(&[T]) -> T + Sync,
    {
        debug!("{}: scoring {} rows", name, table.n_rows());
        let values = self.run_indexed(table.n_rows(), 1, &|i: usize, slot: &mut [T]| {
            slot[0] = f(table.row(i));
        });
        MetricSeries::new(name, values)
    }

    /// Percentile band of every row, columns `P10..P90`.
    pub fn percentile_bands(&self, table: &TimeSeriesTable<T>) -> MetricTable<T> {
        debug!("percentile_bands: {} rows", table.n_rows());
        let estimator = self.config.percentile;
        let values = self.run_indexed(table.n_rows(), 9, &|i: usize, slot: &mut [T]| {
            if let Ok(band) = PercentileBand::from_members(table.row(i), &estimator) {
                slot.copy_from_slice(band.values());
            }
        });
        MetricTable::new(&PERCENTILE_NAMES, values)
    }

    /// Spread indices of every row, columns `SI_90_10..SI_60_40`.
    pub fn spread_index(&self, table: &TimeSeriesTable<T>) -> MetricTable<T> {
        debug!("spread_index: {} rows", table.n_rows());
        let estimator = self.config.percentile;
        let values = self.run_indexed(table.n_rows(), 4, &|i: usize, slot: &mut [T]| {
            if let Ok(si) = spread_index_row(table.row(i), &estimator) {
                slot.copy_from_slice(&si);
            }
        });
        MetricTable::new(&SPREAD_INDEX_NAMES, values)
    }

    /// Predictability indices over a spread-index table, columns
    /// `PI_90_10..PI_60_40`.
    pub fn predictability_index(
        &self,
        spread: &MetricTable<T>,
    ) -> Result<MetricTable<T>, UncertaintyError> {
        let width = SPREAD_INDEX_NAMES.len();
        if spread.n_cols() != width {
            return Err(UncertaintyError::ColumnCount {
                operation: "predictability_index",
                expected: width,
                got: spread.n_cols(),
            });
        }

        let w = self.config.window_size;
        let count = predictability_window_count(spread.n_rows(), w);
        if count == 0 {
            warn!(
                "predictability_index: window size {} leaves no windows over {} rows",
                w,
                spread.n_rows()
            );
        }
        debug!("predictability_index: {} windows", count);

        let rows = spread.as_slice();
        let values = self.run_indexed(count, width, &|i: usize, slot: &mut [T]| {
            window_drift(&rows[i * width..(i + w) * width], width, slot);
        });
        Ok(MetricTable::new(&PREDICTABILITY_INDEX_NAMES, values))
    }

    // ========================================================================
    // Variogram Batch
    // ========================================================================

    /// Fit every sample independently; failures are recorded per timestamp.
    pub fn fit_variograms(
        &self,
        samples: &[SpatialSample<T>],
        labels: Option<&[String]>,
        fitter: &VariogramFitter<T>,
    ) -> VariogramReport<T> {
        debug!("kriging_variogram: fitting {} timestamps", samples.len());

        let fit = |i: usize| fitter.fit(&samples[i]);
        let outcomes = match self.config.custom_fit_pass {
            Some(pass) if self.config.parallel => pass(samples.len(), &fit),
            _ => fit_pass_sequential(samples.len(), &fit),
        };

        let fits: Vec<TimestampFit<T>> = outcomes
            .into_iter()
            .enumerate()
            .map(|(timestamp, outcome)| {
                let column = labels.and_then(|l| l.get(timestamp)).cloned();
                let outcome = outcome.map_err(|reason| {
                    warn!(
                        "kriging_variogram: timestamp {} ({}) failed: {}",
                        timestamp,
                        column.as_deref().unwrap_or("-"),
                        reason
                    );
                    UncertaintyError::FitNonConvergence {
                        timestamp,
                        column: column.clone(),
                        reason,
                    }
                });
                TimestampFit {
                    timestamp,
                    column,
                    outcome,
                }
            })
            .collect();

        let converged = fits.iter().filter(|f| f.is_ok()).count();
        info!(
            "kriging_variogram: {} of {} timestamps converged",
            converged,
            fits.len()
        );

        VariogramReport { fits }
    }
}
