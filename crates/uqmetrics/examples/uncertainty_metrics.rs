//! uqmetrics Examples
//!
//! This example demonstrates the three data-shape adapters:
//! - Single-series dispersion and spectral entropy
//! - Ensemble spread, predictability and CRPS
//! - Spatial variograms with per-timestamp failure isolation
//!
//! Set `RUST_LOG=debug` to see the per-pass log records.

use uqmetrics::prelude::*;

fn main() -> Result<(), UncertaintyError> {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    println!("{}", "=".repeat(80));
    println!("uqmetrics Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_single_series()?;
    example_2_ensemble()?;
    example_3_crps()?;
    example_4_variogram()?;

    Ok(())
}

/// Example 1: Single Series
/// Windowed dispersion metrics of a noisy daily cycle
fn example_1_single_series() -> Result<(), UncertaintyError> {
    println!("Example 1: Single Series");
    println!("{}", "-".repeat(80));

    let n = 96;
    let load: Vec<f64> = (0..n)
        .map(|i| {
            let t = i as f64;
            50.0 + 10.0 * (t * std::f64::consts::PI / 12.0).sin() + (t * 1.7).cos()
        })
        .collect();
    let table = TimeSeriesTable::univariate("load", &load);

    let metrics = Uncertainty::new()
        .window_size(24)
        .adapter(SingleSeries)
        .build()?;

    println!("{}", metrics.turbulence_intensity(&table));
    println!("{}", metrics.spectral_entropy(&table));

    println!();
    Ok(())
}

/// Example 2: Ensemble Spread
/// Spread indices and their predictability drift
fn example_2_ensemble() -> Result<(), UncertaintyError> {
    println!("Example 2: Ensemble Spread");
    println!("{}", "-".repeat(80));

    let members = ["m1", "m2", "m3", "m4", "m5"];
    let rows: Vec<[f64; 5]> = (0..30)
        .map(|i| {
            let base = 20.0 + i as f64 * 0.2;
            let widen = 1.0 + i as f64 * 0.05;
            [
                base - 2.0 * widen,
                base - widen,
                base,
                base + widen,
                base + 2.0 * widen,
            ]
        })
        .collect();
    let table = TimeSeriesTable::from_rows(&members, &rows)?;

    let metrics = Uncertainty::new()
        .window_size(6)
        .interpolation(Linear)
        .adapter(Ensemble)
        .build()?;

    println!("{}", metrics.spread_index(&table));
    println!("{}", metrics.predictability_index(&table)?);

    println!();
    Ok(())
}

/// Example 3: CRPS
/// Nine members scored against the observation column
fn example_3_crps() -> Result<(), UncertaintyError> {
    println!("Example 3: CRPS");
    println!("{}", "-".repeat(80));

    let columns = ["e1", "e2", "e3", "e4", "e5", "e6", "e7", "e8", "e9", "observed"];
    let rows = [
        [1.0, 1.2, 1.1, 0.9, 1.3, 1.0, 1.05, 0.95, 1.15, 1.1],
        [2.0, 2.4, 1.8, 2.2, 2.1, 1.9, 2.3, 2.0, 2.05, 2.6],
        [0.5, 0.4, 0.6, 0.55, 0.45, 0.5, 0.52, 0.48, 0.5, 0.1],
    ];
    let table = TimeSeriesTable::from_rows(&columns, &rows)?;

    let metrics = Uncertainty::new()
        .observation_column("observed")
        .adapter(Ensemble)
        .build()?;

    println!("{}", metrics.crps(&table)?);

    println!();
    Ok(())
}

/// Example 4: Kriging Variogram
/// One fit per timestamp column; a degenerate timestamp does not abort the batch
fn example_4_variogram() -> Result<(), UncertaintyError> {
    println!("Example 4: Kriging Variogram");
    println!("{}", "-".repeat(80));

    let table = TimeSeriesTable::from_columns(&[
        ("lon", vec![0.0, 0.05, 0.10, 0.0, 0.12, 0.07]),
        ("lat", vec![0.0, 0.02, 0.0, 0.09, 0.11, 0.06]),
        ("t0", vec![8.1, 8.4, 7.9, 9.0, 8.7, 8.3]),
        ("t1", vec![5.0, 5.5, 6.1, 4.8, 5.9, 5.2]),
        ("t2", vec![10.2, 10.0, 9.1, 9.8, 9.5, 10.6]),
    ])?;

    let metrics = Uncertainty::new()
        .initial_guess(InitialGuess::DataDriven)
        .max_iterations(800)
        .adapter(MultiSeries)
        .build()?;

    let report = metrics.kriging_variogram(&table, &["t0", "t1", "t2"], "lat", "lon")?;
    println!("{}", report);

    println!();
    Ok(())
}
