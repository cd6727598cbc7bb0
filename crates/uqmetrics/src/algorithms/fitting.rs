//! Nonlinear least-squares curve fitting.
//!
//! ## Purpose
//!
//! This module defines the curve-fitting strategy used by the variogram
//! fitter: a [`ParametricModel`] describes `y = f(x; params)` and its
//! gradient, and a [`CurveFitter`] recovers the parameters from observed
//! `(x, y)` pairs and an initial guess.
//!
//! ## Design notes
//!
//! * **Default fitter**: [`LevenbergMarquardt`], a damped Gauss-Newton solver
//!   with Marquardt diagonal scaling of the normal matrix.
//! * **Acceptance**: A step is accepted only if it strictly lowers the sum of
//!   squared residuals; otherwise the damping grows by 10x.
//! * **Convergence**: Relative reduction of the objective below `ftol`, or a
//!   step smaller than `xtol` relative to the parameter norm. A damping factor
//!   above `1e16` means no descent direction remains and the current point is
//!   taken as converged.
//! * **Result**: The converged parameters are returned as found; checking them
//!   against a model's valid domain is left to the caller.
//!
//! ## Invariants
//!
//! * At least as many observations as parameters are required.
//! * The returned parameters produce a finite objective.

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FitFailure;

// ============================================================================
// Strategy Traits
// ============================================================================

/// A model `y = f(x; params)` with an analytic gradient.
pub trait ParametricModel<T>: Sync {
    /// Number of parameters.
    fn n_params(&self) -> usize;

    /// Model value at `x`.
    fn evaluate(&self, x: T, params: &[T]) -> T;

    /// Partial derivatives with respect to each parameter at `x`.
    fn gradient(&self, x: T, params: &[T], out: &mut [T]);
}

/// Result of a successful fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitSolution<T> {
    /// Best-fit parameters.
    pub params: Vec<T>,

    /// Sum of squared residuals at `params`.
    pub residual_sum: T,

    /// Iterations performed.
    pub iterations: usize,
}

/// Strategy fitting a parametric model to observed pairs.
pub trait CurveFitter<T>: Debug + Send + Sync {
    /// Fit `model` to `(x, y)` starting from `initial`.
    fn fit(
        &self,
        model: &dyn ParametricModel<T>,
        x: &[T],
        y: &[T],
        initial: &[T],
    ) -> Result<FitSolution<T>, FitFailure>;
}

// ============================================================================
// Levenberg-Marquardt
// ============================================================================

/// Default relative tolerance on the objective and on the step.
pub const DEFAULT_TOLERANCE: f64 = 1.49012e-8;

/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 800;

const INITIAL_DAMPING: f64 = 1e-3;
const MIN_DAMPING: f64 = 1e-12;
const MAX_DAMPING: f64 = 1e16;
const PIVOT_EPSILON: f64 = 1e-12;

/// Levenberg-Marquardt least-squares solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevenbergMarquardt<T> {
    /// Maximum number of accepted-step iterations.
    pub max_iterations: usize,

    /// Relative reduction of the objective that counts as converged.
    pub ftol: T,

    /// Relative step size that counts as converged.
    pub xtol: T,
}

impl<T: Float> Default for LevenbergMarquardt<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> LevenbergMarquardt<T> {
    /// Solver with the default tolerances and iteration budget.
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            ftol: T::from(DEFAULT_TOLERANCE).unwrap(),
            xtol: T::from(DEFAULT_TOLERANCE).unwrap(),
        }
    }

    /// Set the iteration budget.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set both convergence tolerances.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.ftol = tolerance;
        self.xtol = tolerance;
        self
    }

    /// Normal equations `J^T J` and `J^T r` at `params`.
    fn normal_equations(
        model: &dyn ParametricModel<T>,
        x: &[T],
        y: &[T],
        params: &[T],
        grad: &mut [T],
    ) -> (Vec<T>, Vec<T>) {
        let k = params.len();
        let mut a = vec![T::zero(); k * k];
        let mut g = vec![T::zero(); k];

        for (&xi, &yi) in x.iter().zip(y) {
            model.gradient(xi, params, grad);
            let r = yi - model.evaluate(xi, params);
            for p in 0..k {
                g[p] = g[p] + grad[p] * r;
                for q in 0..k {
                    a[p * k + q] = a[p * k + q] + grad[p] * grad[q];
                }
            }
        }

        (a, g)
    }
}

impl<T: Float + Debug + Send + Sync> CurveFitter<T> for LevenbergMarquardt<T> {
    fn fit(
        &self,
        model: &dyn ParametricModel<T>,
        x: &[T],
        y: &[T],
        initial: &[T],
    ) -> Result<FitSolution<T>, FitFailure> {
        let k = model.n_params();
        let m = x.len().min(y.len());
        if m < k {
            return Err(FitFailure::InsufficientData {
                points: m,
                params: k,
            });
        }
        let (x, y) = (&x[..m], &y[..m]);

        let mut params = initial.to_vec();
        let mut sse = residual_sum(model, x, y, &params);
        if !sse.is_finite() {
            return Err(FitFailure::NonFinite);
        }

        let min_damping = T::from(MIN_DAMPING).unwrap();
        let max_damping = T::from(MAX_DAMPING).unwrap();
        let ten = T::from(10.0).unwrap();
        let mut damping = T::from(INITIAL_DAMPING).unwrap();
        let mut grad = vec![T::zero(); k];
        let mut trial = vec![T::zero(); k];

        for iteration in 1..=self.max_iterations {
            let (a, g) = Self::normal_equations(model, x, y, &params, &mut grad);

            let converged = loop {
                let mut damped = a.clone();
                for p in 0..k {
                    let diag = a[p * k + p].max(min_damping);
                    damped[p * k + p] = damped[p * k + p] + damping * diag;
                }

                if let Some(step) = solve_linear(damped, g.clone(), k) {
                    for p in 0..k {
                        trial[p] = params[p] + step[p];
                    }
                    let trial_sse = residual_sum(model, x, y, &trial);

                    if trial_sse.is_finite() && trial_sse < sse {
                        let reduction = sse - trial_sse;
                        let step_norm = norm(&step);
                        let param_norm = norm(&params);

                        params.copy_from_slice(&trial);
                        sse = trial_sse;
                        damping = (damping / ten).max(min_damping);

                        break reduction <= self.ftol * (sse + reduction)
                            || step_norm <= self.xtol * (param_norm + self.xtol);
                    }
                }

                damping = damping * ten;
                if damping > max_damping {
                    break true;
                }
            };

            if converged {
                return Ok(FitSolution {
                    params,
                    residual_sum: sse,
                    iterations: iteration,
                });
            }
        }

        Err(FitFailure::MaxIterations(self.max_iterations))
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Sum of squared residuals of `model` at `params`.
pub fn residual_sum<T: Float>(
    model: &dyn ParametricModel<T>,
    x: &[T],
    y: &[T],
    params: &[T],
) -> T {
    x.iter().zip(y).fold(T::zero(), |acc, (&xi, &yi)| {
        let r = yi - model.evaluate(xi, params);
        acc + r * r
    })
}

fn norm<T: Float>(v: &[T]) -> T {
    v.iter().fold(T::zero(), |acc, &x| acc + x * x).sqrt()
}

/// Solve the dense `k x k` system `a * x = b` by Gaussian elimination with
/// partial pivoting. Returns `None` when a pivot is negligible relative to
/// the largest diagonal entry.
pub fn solve_linear<T: Float>(mut a: Vec<T>, mut b: Vec<T>, k: usize) -> Option<Vec<T>> {
    let scale = (0..k).fold(T::zero(), |acc, i| acc.max(a[i * k + i].abs()));
    if scale == T::zero() || !scale.is_finite() {
        return None;
    }
    let threshold = T::from(PIVOT_EPSILON).unwrap() * scale;

    for col in 0..k {
        let mut pivot = col;
        for row in (col + 1)..k {
            if a[row * k + col].abs() > a[pivot * k + col].abs() {
                pivot = row;
            }
        }
        if a[pivot * k + col].abs() <= threshold {
            return None;
        }
        if pivot != col {
            for q in 0..k {
                a.swap(col * k + q, pivot * k + q);
            }
            b.swap(col, pivot);
        }

        for row in (col + 1)..k {
            let factor = a[row * k + col] / a[col * k + col];
            for q in col..k {
                a[row * k + q] = a[row * k + q] - factor * a[col * k + q];
            }
            b[row] = b[row] - factor * b[col];
        }
    }

    let mut x = vec![T::zero(); k];
    for row in (0..k).rev() {
        let tail = ((row + 1)..k).fold(T::zero(), |acc, q| acc + a[row * k + q] * x[q]);
        x[row] = (b[row] - tail) / a[row * k + row];
    }
    Some(x)
}
