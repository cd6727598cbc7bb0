#![cfg(feature = "dev")]
//! Tests for the ensemble and single-series adapters.
//!
//! These tests verify complete workflows through the fluent API:
//! - Windowed single-series metrics and their window counts
//! - Pairwise metrics with inferred and named column roles
//! - Percentile bands, spread indices and predictability indices
//! - CRPS with default and named observation columns
//! - Shape errors reported before any computation
//!
//! ## Test Organization
//!
//! 1. **Single Series** - Counts, spans, spectral entropy
//! 2. **Pairwise** - Correlation, MAPE, column roles
//! 3. **Spread** - Bands and spread indices
//! 4. **Predictability** - Drift windows
//! 5. **CRPS** - Scoring and shape checks

use approx::assert_relative_eq;

use uqmetrics::prelude::*;

fn ramp(n: usize) -> TimeSeriesTable<f64> {
    let values: Vec<f64> = (1..=n).map(|i| i as f64).collect();
    TimeSeriesTable::univariate("x", &values)
}

fn pair_table() -> TimeSeriesTable<f64> {
    TimeSeriesTable::from_columns(&[
        ("actual", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]),
        ("predicted", vec![2.0, 4.0, 6.0, 8.0, 10.0, 12.0]),
    ])
    .unwrap()
}

fn crps_table(observation_first: bool) -> TimeSeriesTable<f64> {
    let members = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
    let names = ["e1", "e2", "e3", "e4", "e5", "e6", "e7", "e8", "e9"];

    let mut columns: Vec<String> = names.iter().map(|n| n.to_string()).collect();
    let mut row = members.to_vec();
    if observation_first {
        columns.insert(0, "obs".to_string());
        row.insert(0, 5.0);
    } else {
        columns.push("obs".to_string());
        row.push(5.0);
    }
    TimeSeriesTable::from_rows(&columns, &[row.clone(), row]).unwrap()
}

// ============================================================================
// Single-Series Tests
// ============================================================================

/// Test every windowed metric emits `N - w + 1` values.
#[test]
fn test_single_series_window_counts() {
    let table = ramp(20);
    let metrics = Uncertainty::new()
        .window_size(5)
        .adapter(SingleSeries)
        .build()
        .unwrap();

    assert_eq!(metrics.window_size(), 5);
    assert_eq!(metrics.standard_deviation(&table).len(), 16);
    assert_eq!(metrics.variability_index(&table).len(), 16);

    // Window i holds i+1..=i+4: std sqrt(1.25), mean i + 2.5.
    let ti = metrics.turbulence_intensity(&table);
    assert_eq!(ti.len(), 16);
    for (i, &v) in ti.iter().enumerate() {
        assert_relative_eq!(v, 1.25f64.sqrt() / (i as f64 + 2.5), epsilon = 1e-12);
    }
    assert_eq!(metrics.spectral_entropy(&table).len(), 16);
}

/// Test truncated windows hold `w - 1` rows and full windows hold `w`.
#[test]
fn test_single_series_window_span() {
    let table = ramp(6);

    let truncated = Uncertainty::new()
        .window_size(3)
        .adapter(SingleSeries)
        .build()
        .unwrap();
    // Windows of two consecutive integers.
    let std = truncated.standard_deviation(&table);
    assert!(std.iter().all(|&s| (s - 0.5).abs() < 1e-12));

    let full = Uncertainty::new()
        .window_size(3)
        .window_span(Full)
        .adapter(SingleSeries)
        .build()
        .unwrap();
    // Windows of three consecutive integers.
    let vi = full.variability_index(&table);
    assert_eq!(vi.len(), 4);
    assert_relative_eq!(vi.as_slice()[0], 2.0 / 2.0);
    assert_relative_eq!(vi.as_slice()[3], 2.0 / 5.0);
}

/// Test a window larger than the series yields an empty output.
#[test]
fn test_single_series_oversized_window() {
    let metrics = Uncertainty::new()
        .window_size(12)
        .adapter(SingleSeries)
        .build()
        .unwrap();

    let std = metrics.standard_deviation(&ramp(5));
    assert!(std.is_empty());
    assert_eq!(std.name, "standard_deviation");
}

/// Test spectral entropy of an alternating window.
#[test]
fn test_single_series_spectral_entropy() {
    let table = TimeSeriesTable::univariate("x", &[1.0, -1.0, 1.0, -1.0, 1.0]);
    let metrics = Uncertainty::new()
        .window_size(5)
        .adapter(SingleSeries)
        .build()
        .unwrap();

    let h = metrics.spectral_entropy(&table);
    assert_eq!(h.len(), 1);
    assert_relative_eq!(h.as_slice()[0], 0.579380164285695, epsilon = 1e-9);
}

// ============================================================================
// Pairwise Tests
// ============================================================================

/// Test correlation and MAPE with inferred column roles.
#[test]
fn test_pairwise_inferred_columns() {
    let metrics = Uncertainty::new()
        .window_size(3)
        .adapter(Ensemble)
        .build()
        .unwrap();
    let table = pair_table();

    let corr = metrics.correlation(&table).unwrap();
    assert_eq!(corr.len(), 4);
    for &c in corr.iter() {
        assert_relative_eq!(c, 1.0, epsilon = 1e-12);
    }

    let mape = metrics.mape(&table).unwrap();
    for &m in mape.iter() {
        assert_relative_eq!(m, 1.0, epsilon = 1e-12);
    }
}

/// Test named roles swap actual and predicted.
#[test]
fn test_pairwise_named_columns() {
    let metrics = Uncertainty::new()
        .window_size(3)
        .actual_column("predicted")
        .predicted_column("actual")
        .adapter(Ensemble)
        .build()
        .unwrap();

    // |(2a - a) / 2a| = 0.5
    let mape = metrics.mape(&pair_table()).unwrap();
    for &m in mape.iter() {
        assert_relative_eq!(m, 0.5, epsilon = 1e-12);
    }
}

/// Test the NRMSE range fallback through the adapter.
#[test]
fn test_pairwise_nrmse_constant_actual() {
    let table = TimeSeriesTable::from_columns(&[
        ("a", vec![5.0, 5.0, 5.0]),
        ("p", vec![5.0, 6.0, 5.0]),
    ])
    .unwrap();
    let metrics = Uncertainty::new()
        .window_size(3)
        .window_span(Full)
        .adapter(Ensemble)
        .build()
        .unwrap();

    let nrmse = metrics.nrmse(&table).unwrap();
    assert_relative_eq!(nrmse.as_slice()[0], (1.0_f64 / 3.0).sqrt() / 0.001, epsilon = 1e-9);
    let nmae = metrics.nmae(&table).unwrap();
    assert_relative_eq!(nmae.as_slice()[0], (1.0 / 3.0) / 0.001, epsilon = 1e-9);
}

/// Test pairwise metrics reject tables without two columns.
#[test]
fn test_pairwise_shape_error() {
    let table = TimeSeriesTable::from_rows(&["a", "b", "c"], &[[1.0, 2.0, 3.0]]).unwrap();
    let metrics = Uncertainty::new().adapter(Ensemble).build().unwrap();

    assert_eq!(
        metrics.correlation(&table).unwrap_err(),
        UncertaintyError::ColumnCount {
            operation: "correlation",
            expected: 2,
            got: 3
        }
    );

    let named = Uncertainty::new()
        .actual_column("a")
        .predicted_column("z")
        .adapter(Ensemble)
        .build()
        .unwrap();
    assert_eq!(
        named.mape(&table).unwrap_err(),
        UncertaintyError::UnknownColumn("z".to_string())
    );
}

// ============================================================================
// Spread Tests
// ============================================================================

/// Test percentile bands and spread indices of a four-member row.
#[test]
fn test_spread_index_values() {
    let table =
        TimeSeriesTable::from_rows(&["m1", "m2", "m3", "m4"], &[[10.0, 11.0, 12.0, 13.0]])
            .unwrap();
    let metrics = Uncertainty::new().adapter(Ensemble).build().unwrap();

    let bands = metrics.percentile_bands(&table);
    assert_eq!(bands.columns()[0], "P10");
    assert_eq!(
        bands.row(0),
        &[10.0, 10.0, 10.5, 11.0, 11.5, 12.0, 12.5, 13.0, 13.0]
    );

    let si = metrics.spread_index(&table);
    assert_eq!(si.columns(), &["SI_90_10", "SI_80_20", "SI_70_30", "SI_60_40"]);
    let row = si.row(0);
    assert_relative_eq!(row[0], 3.0 / 11.5, epsilon = 1e-12);
    assert_relative_eq!(row[1], 3.0 / 11.5, epsilon = 1e-12);
    assert_relative_eq!(row[2], 2.0 / 11.5, epsilon = 1e-12);
    assert_relative_eq!(row[3], 1.0 / 11.5, epsilon = 1e-12);
}

/// Test spread indices are non-increasing across the columns.
#[test]
fn test_spread_index_monotonic() {
    let rows: Vec<[f64; 7]> = (0..10)
        .map(|i| {
            let s = 1.0 + i as f64 * 0.3;
            [20.0 - 3.0 * s, 20.0 - s, 19.5, 20.0, 20.4, 20.0 + 2.0 * s, 20.0 + 5.0 * s]
        })
        .collect();
    let names = ["a", "b", "c", "d", "e", "f", "g"];
    let table = TimeSeriesTable::from_rows(&names, &rows).unwrap();

    let metrics = Uncertainty::new()
        .interpolation(Midpoint)
        .adapter(Ensemble)
        .build()
        .unwrap();
    let si = metrics.spread_index(&table);

    assert_eq!(si.n_rows(), 10);
    for i in 0..si.n_rows() {
        let row = si.row(i);
        for k in 0..3 {
            assert!(row[k] >= row[k + 1], "row {} not monotonic: {:?}", i, row);
        }
    }
}

/// Test a single-member ensemble has zero spread.
#[test]
fn test_spread_index_single_member() {
    let table = TimeSeriesTable::univariate("m", &[4.0, 5.0]);
    let metrics = Uncertainty::new().adapter(Ensemble).build().unwrap();

    let si = metrics.spread_index(&table);
    assert!(si.as_slice().iter().all(|&v| v == 0.0));
}

// ============================================================================
// Predictability Tests
// ============================================================================

/// Test drift windows: mean of the window minus its first row.
#[test]
fn test_predictability_drift() {
    let spread = MetricTable::new(
        &["SI_90_10", "SI_80_20", "SI_70_30", "SI_60_40"],
        vec![
            1.0, 2.0, 3.0, 4.0, //
            3.0, 4.0, 5.0, 6.0, //
            5.0, 6.0, 7.0, 8.0, //
            5.0, 6.0, 7.0, 8.0, //
            9.0, 9.0, 9.0, 9.0,
        ],
    );
    let metrics = Uncertainty::new()
        .window_size(2)
        .adapter(Ensemble)
        .build()
        .unwrap();

    let pi = metrics.predictability_index_from(&spread).unwrap();
    assert_eq!(pi.columns(), &["PI_90_10", "PI_80_20", "PI_70_30", "PI_60_40"]);
    // len - w windows
    assert_eq!(pi.n_rows(), 3);
    assert_eq!(pi.row(0), &[1.0, 1.0, 1.0, 1.0]);
    assert_eq!(pi.row(1), &[1.0, 1.0, 1.0, 1.0]);
    assert_eq!(pi.row(2), &[0.0, 0.0, 0.0, 0.0]);
}

/// Test predictability chained from an ensemble table.
#[test]
fn test_predictability_from_ensemble() {
    let rows: Vec<[f64; 4]> = (0..8)
        .map(|i| {
            let s = 1.0 + i as f64;
            [10.0 - s, 10.0, 10.0, 10.0 + s]
        })
        .collect();
    let table = TimeSeriesTable::from_rows(&["a", "b", "c", "d"], &rows).unwrap();
    let metrics = Uncertainty::new()
        .window_size(3)
        .adapter(Ensemble)
        .build()
        .unwrap();

    let pi = metrics.predictability_index(&table).unwrap();
    assert_eq!(pi.n_rows(), 5);
    // Spread grows every row, so the drift is positive.
    assert!(pi.row(0)[0] > 0.0);
}

/// Test predictability rejects tables without four spread columns.
#[test]
fn test_predictability_shape_error() {
    let spread = MetricTable::new(&["a", "b", "c"], vec![1.0, 2.0, 3.0]);
    let metrics = Uncertainty::new().adapter(Ensemble).build().unwrap();

    assert_eq!(
        metrics.predictability_index_from(&spread).unwrap_err(),
        UncertaintyError::ColumnCount {
            operation: "predictability_index",
            expected: 4,
            got: 3
        }
    );
}

/// Test a spread table not longer than the window yields no rows.
#[test]
fn test_predictability_short_input() {
    let spread = MetricTable::new(&["a", "b", "c", "d"], vec![1.0; 8]);
    let metrics = Uncertainty::new()
        .window_size(2)
        .adapter(Ensemble)
        .build()
        .unwrap();

    assert!(metrics.predictability_index_from(&spread).unwrap().is_empty());
}

// ============================================================================
// CRPS Tests
// ============================================================================

/// Test CRPS with the observation in the last column.
#[test]
fn test_crps_default_observation() {
    let metrics = Uncertainty::new().adapter(Ensemble).build().unwrap();
    let crps = metrics.crps(&crps_table(false)).unwrap();

    assert_eq!(crps.len(), 2);
    assert_relative_eq!(crps.as_slice()[0], 20.0 / 27.0, epsilon = 1e-12);
}

/// Test CRPS with a named observation column.
#[test]
fn test_crps_named_observation() {
    let metrics = Uncertainty::new()
        .observation_column("obs")
        .adapter(Ensemble)
        .build()
        .unwrap();
    let crps = metrics.crps(&crps_table(true)).unwrap();

    assert_relative_eq!(crps.as_slice()[1], 20.0 / 27.0, epsilon = 1e-12);
}

/// Test CRPS rejects anything but ten columns.
#[test]
fn test_crps_shape_error() {
    let table = TimeSeriesTable::from_rows(&["a", "b", "c"], &[[1.0, 2.0, 3.0]]).unwrap();
    let metrics = Uncertainty::new().adapter(Ensemble).build().unwrap();

    assert_eq!(
        metrics.crps(&table).unwrap_err(),
        UncertaintyError::ColumnCount {
            operation: "crps",
            expected: 10,
            got: 3
        }
    );
}
