//! Continuous Ranked Probability Score.
//!
//! ## Purpose
//!
//! This module defines the [`CrpsEstimator`] strategy and [`EnsembleCrps`],
//! the default empirical-distribution estimator.
//!
//! ## Key concepts
//!
//! For ensemble members `x_1..x_m` and observation `y`:
//!
//! ```text
//! CRPS = (1/m) * sum |x_i - y|  -  (1 / (2 m^2)) * sum_i sum_j |x_i - x_j|
//! ```
//!
//! A perfect deterministic forecast scores 0; lower is better.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

/// Number of ensemble values expected per CRPS row.
pub const ENSEMBLE_MEMBERS: usize = 9;

/// Strategy scoring an ensemble forecast against one observation.
pub trait CrpsEstimator<T>: Debug + Send + Sync {
    /// Score of `ensemble` against `observation`.
    fn score(&self, ensemble: &[T], observation: T) -> T;
}

/// CRPS of the empirical distribution of the ensemble members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnsembleCrps;

impl<T: Float> CrpsEstimator<T> for EnsembleCrps {
    fn score(&self, ensemble: &[T], observation: T) -> T {
        let m = ensemble.len();
        if m == 0 {
            return T::nan();
        }
        let m_t = T::from(m).unwrap();

        let skill = ensemble
            .iter()
            .fold(T::zero(), |acc, &x| acc + (x - observation).abs())
            / m_t;

        let mut spread = T::zero();
        for &xi in ensemble {
            for &xj in ensemble {
                spread = spread + (xi - xj).abs();
            }
        }
        let spread = spread / (T::from(2.0).unwrap() * m_t * m_t);

        skill - spread
    }
}
