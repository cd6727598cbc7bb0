#![cfg(feature = "dev")]
//! Metric inputs: tables, slices, vectors and ndarray arrays.

use approx::assert_abs_diff_eq;
use fastUqmetrics::prelude::*;
use ndarray::{array, Array1, Array2};

#[test]
fn test_one_dimensional_inputs_agree() {
    let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0, 3.0, 1.0];
    let table = TimeSeriesTable::univariate("x", &values);
    let array = Array1::from_vec(values.clone());

    let metrics = Uncertainty::new()
        .window_size(8)
        .window_span(Full)
        .adapter(SingleSeries)
        .build()
        .unwrap();

    let from_table = metrics.standard_deviation(&table).unwrap();
    let from_vec = metrics.standard_deviation(&values).unwrap();
    let from_slice = metrics.standard_deviation(&values[..]).unwrap();
    let from_array = metrics.standard_deviation(&array).unwrap();

    assert_eq!(from_table.len(), 3);
    assert_abs_diff_eq!(from_table.as_slice()[0], 2.0, epsilon = 1e-12);
    assert_eq!(from_table, from_vec);
    assert_eq!(from_table, from_slice);
    assert_eq!(from_table, from_array);
}

#[test]
fn test_array_view_input() {
    let array = Array1::from_vec((0..16).map(|i| i as f64).collect());
    let view = array.slice(ndarray::s![4..]);

    let metrics = Uncertainty::new()
        .window_size(4)
        .window_span(Full)
        .adapter(SingleSeries)
        .build()
        .unwrap();
    let h = metrics.variability_index(&view).unwrap();

    assert_eq!(h.len(), 9);
    // Window [4, 5, 6, 7]: (7 - 4) / 5.5
    assert_abs_diff_eq!(h.as_slice()[0], 3.0 / 5.5, epsilon = 1e-12);
}

#[test]
fn test_two_dimensional_input() {
    let members: Array2<f64> = array![
        [10.0, 11.0, 12.0, 13.0],
        [10.5, 11.5, 12.0, 14.0],
        [11.0, 12.5, 13.0, 15.0],
    ];
    let table = table_from_array(&["m1", "m2", "m3", "m4"], &members).unwrap();

    assert_eq!(table.n_rows(), 3);
    assert_eq!(table.n_cols(), 4);
    assert_eq!(table.row(1), &[10.5, 11.5, 12.0, 14.0]);

    let metrics = Uncertainty::new()
        .window_size(2)
        .adapter(Ensemble)
        .build()
        .unwrap();
    assert_eq!(
        metrics.spread_index(&members).unwrap(),
        metrics.spread_index(&table).unwrap()
    );
}

#[test]
fn test_generated_column_names() {
    let data: Array2<f64> = array![[1.0, 2.0], [2.0, 4.1], [3.0, 5.9], [4.0, 8.2]];

    let metrics = Uncertainty::new()
        .window_size(3)
        .actual_column("c0")
        .predicted_column("c1")
        .adapter(Ensemble)
        .build()
        .unwrap();
    let r = metrics.correlation(&data).unwrap();

    assert_eq!(r.len(), 2);
    assert!(r.iter().all(|v| *v > 0.99));
}

#[test]
fn test_non_contiguous_array_rejected() {
    let data: Array2<f64> = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
    let transposed = data.t();

    let metrics = Uncertainty::new()
        .window_size(2)
        .adapter(Ensemble)
        .build()
        .unwrap();
    let err = metrics.spread_index(&transposed).unwrap_err();
    assert!(matches!(err, UncertaintyError::InvalidInput(_)));

    let column = data.column(1);
    let single = Uncertainty::new()
        .window_size(2)
        .adapter(SingleSeries)
        .build()
        .unwrap();
    let err = single.standard_deviation(&column).unwrap_err();
    assert!(matches!(err, UncertaintyError::InvalidInput(_)));
}

#[test]
fn test_table_from_array_errors() {
    let data: Array2<f64> = array![[1.0, 2.0], [3.0, 4.0]];

    let err = table_from_array(&["a"], &data).unwrap_err();
    assert_eq!(
        err,
        UncertaintyError::ColumnCount {
            operation: "table_from_array",
            expected: 2,
            got: 1,
        }
    );

    let empty = Array2::<f64>::zeros((3, 0));
    let names: [&str; 0] = [];
    assert_eq!(
        table_from_array(&names, &empty).unwrap_err(),
        UncertaintyError::EmptyInput
    );
}
