#![cfg(feature = "dev")]
//! Tests for the per-window reducers, spectral entropy and CRPS.
//!
//! These tests verify the scalar kernels behind the single-series and
//! pairwise metrics:
//! - Dispersion reducers and their zero-mean behaviour
//! - MAPE exclusion of zero actuals and the range fallback of NRMSE/NMAE
//! - Welch spectral entropy of periodic and degenerate signals
//! - Ensemble CRPS
//!
//! ## Test Organization
//!
//! 1. **Dispersion** - Standard deviation, turbulence, variability
//! 2. **Error Metrics** - MAPE, NRMSE, NMAE
//! 3. **Spectral Entropy** - Welch estimator
//! 4. **CRPS** - Ensemble estimator

use approx::assert_relative_eq;

use uqmetrics::internals::algorithms::crps::{CrpsEstimator, EnsembleCrps};
use uqmetrics::internals::algorithms::pointwise::{
    correlation, mape, nmae, normalizing_range, nrmse, standard_deviation, turbulence_intensity,
    variability_index,
};
use uqmetrics::internals::algorithms::spectral::{SpectralEntropyEstimator, WelchEntropy};

// ============================================================================
// Dispersion Tests
// ============================================================================

/// Test dispersion reducers on a small window.
#[test]
fn test_dispersion_reducers() {
    let window = [1.0_f64, 2.0, 3.0];
    let std = (2.0_f64 / 3.0).sqrt();

    assert_relative_eq!(standard_deviation(&window), std, epsilon = 1e-12);
    assert_relative_eq!(turbulence_intensity(&window), std / 2.0, epsilon = 1e-12);
    assert_relative_eq!(variability_index(&window), 1.0, epsilon = 1e-12);
}

/// Test a zero-mean window yields a non-finite ratio instead of a panic.
#[test]
fn test_zero_mean_window() {
    let window = [-1.0_f64, 1.0];
    assert!(!turbulence_intensity(&window).is_finite());
    assert!(!variability_index(&window).is_finite());
    assert_relative_eq!(standard_deviation(&window), 1.0);
}

/// Test a constant window has zero dispersion.
#[test]
fn test_constant_window() {
    let window = [4.0_f64; 6];
    assert_eq!(standard_deviation(&window), 0.0);
    assert_eq!(turbulence_intensity(&window), 0.0);
    assert!(correlation(&window, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).is_nan());
}

// ============================================================================
// Error Metric Tests
// ============================================================================

/// Test MAPE skips rows whose actual value is zero.
#[test]
fn test_mape_excludes_zero_actuals() {
    let actual = [0.0_f64, 2.0, 4.0];
    let predicted = [1.0, 1.0, 5.0];
    assert_relative_eq!(mape(&actual, &predicted), 0.375, epsilon = 1e-12);
}

/// Test MAPE of an all-zero actual window is NaN.
#[test]
fn test_mape_all_zero_actuals() {
    assert!(mape(&[0.0_f64, 0.0], &[1.0, 2.0]).is_nan());
}

/// Test NRMSE and NMAE normalize by the actual range.
#[test]
fn test_normalized_errors() {
    let actual = [1.0_f64, 2.0, 3.0, 5.0];
    let predicted = [1.0, 3.0, 3.0, 3.0];

    assert_relative_eq!(normalizing_range(&actual), 4.0);
    assert_relative_eq!(nrmse(&actual, &predicted), (5.0_f64 / 4.0).sqrt() / 4.0, epsilon = 1e-12);
    assert_relative_eq!(nmae(&actual, &predicted), 0.75 / 4.0, epsilon = 1e-12);
}

/// Test a constant actual window falls back to a range of 0.001.
#[test]
fn test_normalized_errors_range_fallback() {
    let actual = [5.0_f64, 5.0, 5.0];
    let predicted = [5.0, 5.0, 6.0];

    assert_relative_eq!(normalizing_range(&actual), 0.001);
    assert_relative_eq!(nrmse(&actual, &predicted), (1.0_f64 / 3.0).sqrt() / 0.001, epsilon = 1e-9);
    assert_relative_eq!(nmae(&actual, &predicted), (1.0 / 3.0) / 0.001, epsilon = 1e-9);
}

/// Test perfect predictions have zero error.
#[test]
fn test_perfect_predictions() {
    let actual = [1.0_f64, 2.0, 4.0];
    assert_eq!(mape(&actual, &actual), 0.0);
    assert_eq!(nrmse(&actual, &actual), 0.0);
    assert_eq!(nmae(&actual, &actual), 0.0);
    assert_relative_eq!(correlation(&actual, &actual), 1.0, epsilon = 1e-12);
}

// ============================================================================
// Spectral Entropy Tests
// ============================================================================

/// Test entropy of an alternating signal concentrated at Nyquist.
#[test]
fn test_welch_alternating_signal() {
    let est = WelchEntropy::default();
    let h: f64 = est.entropy(&[1.0, -1.0, 1.0, -1.0]);
    assert_relative_eq!(h, 0.579380164285695, epsilon = 1e-9);
}

/// Test entropy of a pure sinusoid is low.
#[test]
fn test_welch_sinusoid() {
    let est = WelchEntropy::default();
    let signal: Vec<f64> = (0..32)
        .map(|i| (2.0 * std::f64::consts::PI * i as f64 / 8.0).sin())
        .collect();

    let h = est.entropy(&signal);
    assert_relative_eq!(h, 0.30621175433241465, epsilon = 1e-9);
    assert!((0.0..=1.0).contains(&h));
}

/// Test two-point and constant signals.
#[test]
fn test_welch_degenerate_signals() {
    let est = WelchEntropy::default();

    assert_relative_eq!(est.entropy(&[1.0_f64, 2.0]), 1.0, epsilon = 1e-12);
    assert!(est.entropy(&[3.0_f64; 16]).is_nan(), "constant signal has no power");
    assert!(est.entropy(&[3.0_f64]).is_nan());
}

/// Test the estimator is generic over the float type.
#[test]
fn test_welch_f32() {
    let est = WelchEntropy::default();
    let h: f32 = est.entropy(&[1.0f32, -1.0, 1.0, -1.0]);
    assert_relative_eq!(h, 0.579_380_2, epsilon = 1e-5);
}

// ============================================================================
// CRPS Tests
// ============================================================================

/// Test a collapsed ensemble on the observation scores zero.
#[test]
fn test_crps_perfect_ensemble() {
    let score = EnsembleCrps.score(&[2.5_f64; 9], 2.5);
    assert_eq!(score, 0.0);
}

/// Test a collapsed ensemble scores the absolute error.
#[test]
fn test_crps_collapsed_ensemble() {
    assert_relative_eq!(EnsembleCrps.score(&[1.0_f64; 9], 3.0), 2.0);
}

/// Test a spread ensemble centred on the observation.
#[test]
fn test_crps_spread_ensemble() {
    let ensemble = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
    let score: f64 = EnsembleCrps.score(&ensemble, 5.0);
    assert_relative_eq!(score, 20.0 / 27.0, epsilon = 1e-12);
    assert!(score >= 0.0);
}
