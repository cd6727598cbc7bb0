//! fastUqmetrics Parallel Metrics Examples
//!
//! This example demonstrates features specific to `fastUqmetrics`:
//! - Parallel window evaluation using `rayon`
//! - Sequential fallback
//! - `ndarray` ensemble input
//! - Parallel per-timestamp variogram fits

use fastUqmetrics::prelude::*;
use ndarray::Array2;
use std::time::Instant;

fn main() -> Result<(), UncertaintyError> {
    println!("{}", "=".repeat(80));
    println!("fastUqmetrics Parallel Metrics Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_parallel_windows()?;
    example_2_sequential_fallback()?;
    example_3_ndarray_ensemble()?;
    example_4_parallel_variograms()?;

    Ok(())
}

fn long_series(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            20.0 + 5.0 * (t * 0.01).sin() + (t * 0.37).cos()
        })
        .collect()
}

/// Example 1: Parallel Windows
/// Spectral entropy of many overlapping windows
fn example_1_parallel_windows() -> Result<(), UncertaintyError> {
    println!("Example 1: Parallel Windows");
    println!("{}", "-".repeat(80));

    let series = long_series(50_000);

    let start = Instant::now();
    let metrics = Uncertainty::new()
        .window_size(256)
        .adapter(SingleSeries) // Parallel by default
        .build()?;
    let entropy = metrics.spectral_entropy(&series)?;
    let duration = start.elapsed();

    println!("Processed {} windows in {:?}", entropy.len(), duration);
    println!("{}", entropy);

    println!();
    Ok(())
}

/// Example 2: Sequential Fallback
/// The same computation with parallelism disabled
fn example_2_sequential_fallback() -> Result<(), UncertaintyError> {
    println!("Example 2: Sequential Fallback");
    println!("{}", "-".repeat(80));

    let series = long_series(50_000);

    let start = Instant::now();
    let metrics = Uncertainty::new()
        .window_size(256)
        .adapter(SingleSeries)
        .parallel(false)
        .build()?;
    let entropy = metrics.spectral_entropy(&series)?;
    let duration = start.elapsed();

    println!("Processed {} windows in {:?}", entropy.len(), duration);
    println!("Execution mode: Sequential");

    println!();
    Ok(())
}

/// Example 3: ndarray Ensemble
/// Spread and predictability indices of a 9-member ensemble matrix
fn example_3_ndarray_ensemble() -> Result<(), UncertaintyError> {
    println!("Example 3: ndarray Ensemble");
    println!("{}", "-".repeat(80));

    let n = 2_000;
    let members = Array2::from_shape_fn((n, 9), |(i, j)| {
        let t = i as f64;
        100.0 + 10.0 * (t * 0.05).sin() + (j as f64 - 4.0) * (1.0 + 0.001 * t)
    });

    let metrics = Uncertainty::new()
        .window_size(24)
        .interpolation(Linear)
        .adapter(Ensemble)
        .build()?;

    let spread = metrics.spread_index(&members)?;
    let predictability = metrics.predictability_index_from(&spread)?;

    println!("{}", spread);
    println!("{}", predictability);

    println!();
    Ok(())
}

/// Example 4: Parallel Variograms
/// One semivariogram fit per timestamp, spread across cores
fn example_4_parallel_variograms() -> Result<(), UncertaintyError> {
    println!("Example 4: Parallel Variograms");
    println!("{}", "-".repeat(80));

    let sites = 25;
    let timestamps = 48;
    let lon: Vec<f64> = (0..sites).map(|i| (i % 5) as f64 * 0.03).collect();
    let lat: Vec<f64> = (0..sites).map(|i| (i / 5) as f64 * 0.03).collect();

    let mut columns = vec![("lon".to_string(), lon), ("lat".to_string(), lat)];
    for t in 0..timestamps {
        let values: Vec<f64> = (0..sites)
            .map(|i| 8.0 + ((i * 7 + t * 3) % 13) as f64 * 0.1)
            .collect();
        columns.push((format!("t{}", t), values));
    }
    let table = TimeSeriesTable::from_columns(&columns)?;

    let names: Vec<String> = (0..timestamps).map(|t| format!("t{}", t)).collect();
    let value_columns: Vec<&str> = names.iter().map(|s| s.as_str()).collect();

    let metrics = Uncertainty::new().adapter(MultiSeries).build()?;
    let report = metrics.kriging_variogram(&table, &value_columns, "lat", "lon")?;

    println!("{}", report);

    println!();
    Ok(())
}
