#![cfg(feature = "dev")]
//! Parallel passes must reproduce the sequential results exactly.

use approx::assert_abs_diff_eq;
use fastUqmetrics::prelude::*;

fn wind_series(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 6.0 + (i as f64 * 0.37).sin() + 0.1 * (i % 7) as f64)
        .collect()
}

fn ensemble_table(n: usize) -> TimeSeriesTable<f64> {
    let names: Vec<String> = (0..9).map(|j| format!("m{}", j)).collect();
    let rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            (0..9)
                .map(|j| 10.0 + (i as f64 * 0.2).cos() * j as f64 + 0.05 * (i * j % 5) as f64)
                .collect()
        })
        .collect();
    TimeSeriesTable::from_rows(&names, &rows).unwrap()
}

#[test]
fn test_single_series_consistency() {
    let values = wind_series(200);
    let table = TimeSeriesTable::univariate("wind", &values);

    let seq = Uncertainty::new()
        .window_size(24)
        .adapter(SingleSeries)
        .parallel(false)
        .build()
        .unwrap();
    let par = Uncertainty::new()
        .window_size(24)
        .adapter(SingleSeries)
        .parallel(true)
        .build()
        .unwrap();

    let pairs = [
        (
            seq.standard_deviation(&table).unwrap(),
            par.standard_deviation(&table).unwrap(),
        ),
        (
            seq.turbulence_intensity(&table).unwrap(),
            par.turbulence_intensity(&table).unwrap(),
        ),
        (
            seq.variability_index(&table).unwrap(),
            par.variability_index(&table).unwrap(),
        ),
        (
            seq.spectral_entropy(&table).unwrap(),
            par.spectral_entropy(&table).unwrap(),
        ),
    ];

    for (s, p) in pairs.iter() {
        assert_eq!(s.len(), 177);
        assert_eq!(s.name, p.name);
        for (a, b) in s.iter().zip(p.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_ensemble_consistency() {
    let table = ensemble_table(120);

    let seq = Uncertainty::new()
        .window_size(10)
        .adapter(Ensemble)
        .parallel(false)
        .build()
        .unwrap();
    let par = Uncertainty::new()
        .window_size(10)
        .adapter(Ensemble)
        .build()
        .unwrap();

    assert_eq!(
        seq.percentile_bands(&table).unwrap(),
        par.percentile_bands(&table).unwrap()
    );
    assert_eq!(
        seq.spread_index(&table).unwrap(),
        par.spread_index(&table).unwrap()
    );

    let seq_pi = seq.predictability_index(&table).unwrap();
    let par_pi = par.predictability_index(&table).unwrap();
    assert_eq!(seq_pi.n_rows(), 110);
    assert_eq!(seq_pi.columns(), par_pi.columns());
    for (a, b) in seq_pi.as_slice().iter().zip(par_pi.as_slice()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
    }
}

#[test]
fn test_crps_consistency() {
    let mut names: Vec<String> = (0..9).map(|j| format!("m{}", j)).collect();
    names.push("obs".to_string());
    let rows: Vec<Vec<f64>> = (0..64)
        .map(|i| {
            (0..10)
                .map(|j| ((i * 31 + j * 17) % 23) as f64 * 0.5)
                .collect()
        })
        .collect();
    let table = TimeSeriesTable::from_rows(&names, &rows).unwrap();

    let seq = Uncertainty::new()
        .adapter(Ensemble)
        .parallel(false)
        .build()
        .unwrap();
    let par = Uncertainty::new().adapter(Ensemble).build().unwrap();

    let s = seq.crps(&table).unwrap();
    let p = par.crps(&table).unwrap();
    assert_eq!(s.len(), 64);
    assert_eq!(s, p);
    assert!(s.iter().all(|v| *v >= 0.0));
}

#[test]
fn test_variogram_consistency() {
    let lon: Vec<f64> = (0..12).map(|i| (i % 4) as f64 * 0.04).collect();
    let lat: Vec<f64> = (0..12).map(|i| (i / 4) as f64 * 0.05).collect();
    let mut columns = vec![("lon".to_string(), lon), ("lat".to_string(), lat)];
    for t in 0..8 {
        let values: Vec<f64> = (0..12)
            .map(|i| 7.0 + ((i * 5 + t * 3) % 11) as f64 * 0.2)
            .collect();
        columns.push((format!("t{}", t), values));
    }
    let table = TimeSeriesTable::from_columns(&columns).unwrap();
    let names: Vec<String> = (0..8).map(|t| format!("t{}", t)).collect();
    let value_columns: Vec<&str> = names.iter().map(|s| s.as_str()).collect();

    let seq = Uncertainty::new()
        .adapter(MultiSeries)
        .parallel(false)
        .build()
        .unwrap();
    let par = Uncertainty::new().adapter(MultiSeries).build().unwrap();

    let s = seq
        .kriging_variogram(&table, &value_columns, "lat", "lon")
        .unwrap();
    let p = par
        .kriging_variogram(&table, &value_columns, "lat", "lon")
        .unwrap();

    assert_eq!(s.len(), 8);
    assert_eq!(s, p);
    for (i, fit) in p.fits.iter().enumerate() {
        assert_eq!(fit.timestamp, i);
        assert_eq!(fit.column.as_deref(), Some(value_columns[i]));
    }
}

#[test]
fn test_builder_errors_survive_wrapping() {
    let err = Uncertainty::<f64>::new()
        .window_size(1)
        .adapter(Ensemble)
        .build()
        .unwrap_err();
    assert_eq!(err, UncertaintyError::InvalidWindowSize(1));

    let err = Uncertainty::<f64>::new()
        .tolerance(-1.0)
        .adapter(MultiSeries)
        .build()
        .unwrap_err();
    assert_eq!(err, UncertaintyError::InvalidTolerance(-1.0));
}
