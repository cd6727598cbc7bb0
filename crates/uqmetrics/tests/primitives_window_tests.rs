#![cfg(feature = "dev")]
//! Tests for tables and the sliding-window iterator.
//!
//! These tests verify the data primitives every metric is built on:
//! - Table construction from rows and from columns
//! - Shape errors (ragged rows, mismatched columns, duplicate names)
//! - Window counts and window contents for both spans
//!
//! ## Test Organization
//!
//! 1. **Table Construction** - Rows, columns, univariate
//! 2. **Table Errors** - Ragged, mismatched, duplicate, empty
//! 3. **Windows** - Counts, spans, restartability

use uqmetrics::internals::primitives::errors::UncertaintyError;
use uqmetrics::internals::primitives::table::TimeSeriesTable;
use uqmetrics::internals::primitives::window::{window_count, WindowSpan, Windows};

fn ramp(n: usize) -> TimeSeriesTable<f64> {
    let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
    TimeSeriesTable::univariate("x", &values)
}

// ============================================================================
// Table Construction Tests
// ============================================================================

/// Test row-major construction keeps the header and row order.
#[test]
fn test_table_from_rows() {
    let table =
        TimeSeriesTable::from_rows(&["a", "b"], &[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();

    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.n_cols(), 2);
    assert_eq!(table.columns(), &["a", "b"]);
    assert_eq!(table.row(1), &[3.0, 4.0]);
    assert_eq!(table.column(1), vec![2.0, 4.0, 6.0]);
}

/// Test column construction transposes into the same layout.
#[test]
fn test_table_from_columns() {
    let table = TimeSeriesTable::from_columns(&[
        ("a", vec![1.0, 3.0, 5.0]),
        ("b", vec![2.0, 4.0, 6.0]),
    ])
    .unwrap();

    assert_eq!(table.row(2), &[5.0, 6.0]);
    assert_eq!(table.column_by_name("b").unwrap(), vec![2.0, 4.0, 6.0]);
    assert_eq!(table.column_index("a").unwrap(), 0);
}

/// Test univariate tables have one column and no rows when empty.
#[test]
fn test_table_univariate_empty() {
    let table = TimeSeriesTable::<f64>::univariate("x", &[]);
    assert_eq!(table.n_cols(), 1);
    assert_eq!(table.n_rows(), 0);
}

// ============================================================================
// Table Error Tests
// ============================================================================

/// Test a ragged row is reported with its index.
#[test]
fn test_table_ragged_row() {
    let rows: Vec<Vec<f64>> = vec![vec![1.0, 2.0], vec![3.0]];
    let err = TimeSeriesTable::from_rows(&["a", "b"], &rows).unwrap_err();

    assert_eq!(
        err,
        UncertaintyError::RaggedRow {
            row: 1,
            expected: 2,
            got: 1
        }
    );
}

/// Test columns of unequal length are rejected.
#[test]
fn test_table_mismatched_columns() {
    let err = TimeSeriesTable::from_columns(&[("a", vec![1.0, 2.0]), ("b", vec![1.0])])
        .unwrap_err();

    assert!(matches!(
        err,
        UncertaintyError::MismatchedLength { ref column, expected: 2, got: 1 } if column == "b"
    ));
}

/// Test duplicate and unknown column names.
#[test]
fn test_table_column_names() {
    let err = TimeSeriesTable::from_rows(&["a", "a"], &[[1.0, 2.0]]).unwrap_err();
    assert_eq!(err, UncertaintyError::DuplicateColumn("a".to_string()));

    let empty: [&str; 0] = [];
    let rows: [[f64; 0]; 0] = [];
    let err = TimeSeriesTable::from_rows(&empty, &rows).unwrap_err();
    assert_eq!(err, UncertaintyError::EmptyInput);

    let table = ramp(3);
    assert_eq!(
        table.column_by_name("y").unwrap_err(),
        UncertaintyError::UnknownColumn("y".to_string())
    );
}

// ============================================================================
// Window Tests
// ============================================================================

/// Test the `N - w + 1` window count.
#[test]
fn test_window_count() {
    assert_eq!(window_count(20, 5), 16);
    assert_eq!(window_count(5, 5), 1);
    assert_eq!(window_count(4, 5), 0);
    assert_eq!(window_count(0, 2), 0);
}

/// Test truncated windows hold `w - 1` rows starting at consecutive rows.
#[test]
fn test_windows_truncated_span() {
    let table = ramp(20);
    let windows: Vec<_> = Windows::new(&table, 5, WindowSpan::Truncated).collect();

    assert_eq!(windows.len(), 16);
    for (i, window) in windows.iter().enumerate() {
        assert_eq!(window.start, i);
        assert_eq!(window.len(), 4);
        assert_eq!(window.flat()[0], i as f64);
    }
    assert_eq!(windows[15].flat(), &[15.0, 16.0, 17.0, 18.0]);
}

/// Test full windows hold `w` rows and the last one reaches the final row.
#[test]
fn test_windows_full_span() {
    let table = ramp(20);
    let windows = Windows::new(&table, 5, WindowSpan::Full);

    assert_eq!(windows.len(), 16);
    let last = windows.last().unwrap();
    assert_eq!(last.flat(), &[15.0, 16.0, 17.0, 18.0, 19.0]);
}

/// Test oversized windows produce nothing and passes restart from scratch.
#[test]
fn test_windows_empty_and_restartable() {
    let table = ramp(3);
    assert_eq!(Windows::new(&table, 5, WindowSpan::Truncated).count(), 0);

    let table = ramp(6);
    let first: Vec<f64> = Windows::new(&table, 3, WindowSpan::Full)
        .map(|w| w.flat()[0])
        .collect();
    let second: Vec<f64> = Windows::new(&table, 3, WindowSpan::Full)
        .map(|w| w.flat()[0])
        .collect();
    assert_eq!(first, second);
    assert_eq!(first, vec![0.0, 1.0, 2.0, 3.0]);
}

/// Test multi-column windows flatten row by row.
#[test]
fn test_windows_multi_column() {
    let table =
        TimeSeriesTable::from_rows(&["a", "b"], &[[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]])
            .unwrap();
    let window = Windows::new(&table, 2, WindowSpan::Full).window(1);

    assert_eq!(window.flat(), &[2.0, 20.0, 3.0, 30.0]);
    assert_eq!(window.column(1), vec![20.0, 30.0]);
    assert_eq!(window.row(0), &[2.0, 20.0]);
}
