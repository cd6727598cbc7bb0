//! Spectral entropy of a real signal.
//!
//! ## Purpose
//!
//! This module defines the [`SpectralEntropyEstimator`] strategy used by the
//! single-series adapter, and [`WelchEntropy`], the default estimator based on
//! a Welch power spectral density.
//!
//! ## Design notes
//!
//! * **Segments**: `nperseg = min(256, n)` with 50% overlap; each segment has
//!   its mean removed and is tapered by a periodic Hann window.
//! * **One-sided**: Bins `0..=nperseg / 2`; every bin except DC and the
//!   Nyquist bin (even `nperseg`) is doubled.
//! * **Normalized**: Shannon entropy in bits divided by `log2(n_bins)`, so the
//!   result lies in `[0, 1]`.
//! * **Precision**: The transform runs in `f64` regardless of `T`.
//!
//! ## Invariants
//!
//! * Signals shorter than 2 samples, or with zero total power (constant
//!   signals), yield NaN.

// External dependencies
use core::f64::consts::PI;
use core::fmt::Debug;
use num_traits::Float;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Strategy computing a normalized spectral entropy.
pub trait SpectralEntropyEstimator<T>: Debug + Send + Sync {
    /// Entropy of `signal` in `[0, 1]`, or NaN for degenerate input.
    fn entropy(&self, signal: &[T]) -> T;
}

// ============================================================================
// Welch Estimator
// ============================================================================

/// Maximum segment length of the Welch estimate.
pub const MAX_SEGMENT_LENGTH: usize = 256;

/// Welch-method spectral entropy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WelchEntropy {
    /// Sampling frequency in Hz. Normalization makes the entropy independent
    /// of it; it only scales the frequency axis.
    pub sampling_rate: f64,
}

impl Default for WelchEntropy {
    fn default() -> Self {
        Self {
            sampling_rate: 100.0,
        }
    }
}

impl WelchEntropy {
    /// One-sided Welch power spectrum of `signal`, summed over segments.
    pub fn power_spectrum(&self, signal: &[f64]) -> Vec<f64> {
        let n = signal.len();
        let nperseg = n.min(MAX_SEGMENT_LENGTH);
        let noverlap = nperseg / 2;
        let step = nperseg - noverlap;
        let n_segments = (n - noverlap) / step;
        let n_bins = nperseg / 2 + 1;

        let taper: Vec<f64> = (0..nperseg)
            .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / nperseg as f64).cos())
            .collect();

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(nperseg);

        let mut psd = vec![0.0; n_bins];
        let mut buffer = vec![Complex::new(0.0, 0.0); nperseg];
        for s in 0..n_segments {
            let segment = &signal[s * step..s * step + nperseg];
            let mu = segment.iter().sum::<f64>() / nperseg as f64;
            for (slot, (&v, &w)) in buffer.iter_mut().zip(segment.iter().zip(&taper)) {
                *slot = Complex::new((v - mu) * w, 0.0);
            }
            fft.process(&mut buffer);

            for (k, bin) in psd.iter_mut().enumerate() {
                let mut power = buffer[k].norm_sqr();
                let nyquist = nperseg % 2 == 0 && k == nperseg / 2;
                if k > 0 && !nyquist {
                    power *= 2.0;
                }
                *bin += power;
            }
        }

        psd
    }
}

impl<T: Float> SpectralEntropyEstimator<T> for WelchEntropy {
    fn entropy(&self, signal: &[T]) -> T {
        if signal.len() < 2 {
            return T::nan();
        }

        let samples: Vec<f64> = signal
            .iter()
            .map(|v| v.to_f64().unwrap_or(f64::NAN))
            .collect();
        let psd = self.power_spectrum(&samples);

        let total: f64 = psd.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return T::nan();
        }

        let h = psd
            .iter()
            .filter(|&&p| p > 0.0)
            .map(|&p| {
                let q = p / total;
                -q * q.log2()
            })
            .sum::<f64>();

        T::from(h / (psd.len() as f64).log2()).unwrap_or_else(T::nan)
    }
}
