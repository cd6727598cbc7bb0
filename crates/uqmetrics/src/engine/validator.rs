//! Validation of configuration and input shapes.
//!
//! ## Purpose
//!
//! This module checks builder parameters when a processor is built, and
//! resolves column roles against a table when an operation is called.
//! Shape violations surface immediately and abort only the offending call.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Named roles**: Explicit column names take precedence; positional roles
//!   are only inferred when the column count leaves no ambiguity.
//!
//! ## Non-goals
//!
//! * This module does not check values for finiteness; NaN and infinity
//!   propagate through the metrics.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::crps::ENSEMBLE_MEMBERS;
use crate::algorithms::variogram::InitialGuess;
use crate::primitives::errors::UncertaintyError;
use crate::primitives::table::TimeSeriesTable;

/// Upper bound on the fitter iteration budget.
pub const MAX_FIT_ITERATIONS: usize = 100_000;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for uncertainty metric configuration and inputs.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the window size (at least 2).
    pub fn validate_window_size(window_size: usize) -> Result<(), UncertaintyError> {
        if window_size < 2 {
            return Err(UncertaintyError::InvalidWindowSize(window_size));
        }
        Ok(())
    }

    /// Validate a convergence tolerance (positive and finite).
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), UncertaintyError> {
        if !tol.is_finite() || tol <= T::zero() {
            return Err(UncertaintyError::InvalidTolerance(
                tol.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the fitter iteration budget.
    pub fn validate_iterations(iterations: usize) -> Result<(), UncertaintyError> {
        if iterations == 0 || iterations > MAX_FIT_ITERATIONS {
            return Err(UncertaintyError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate an initial-guess strategy.
    pub fn validate_initial_guess<T: Float>(
        guess: &InitialGuess<T>,
    ) -> Result<(), UncertaintyError> {
        match guess {
            InitialGuess::DataDriven => Ok(()),
            InitialGuess::Fixed(p) => {
                if p.iter().any(|v| !v.is_finite()) {
                    return Err(UncertaintyError::InvalidInitialGuess(
                        "parameters must be finite".to_string(),
                    ));
                }
                if p[1] == T::zero() {
                    return Err(UncertaintyError::InvalidInitialGuess(
                        "range must be non-zero".to_string(),
                    ));
                }
                Ok(())
            }
            InitialGuess::Grid(axis) => {
                if axis.iter().any(|v| !v.is_finite()) {
                    return Err(UncertaintyError::InvalidInitialGuess(
                        "grid values must be finite".to_string(),
                    ));
                }
                if !axis.iter().any(|v| *v != T::zero()) {
                    return Err(UncertaintyError::InvalidInitialGuess(
                        "grid must contain a non-zero range".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }

    /// Fail if any parameter was set more than once.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), UncertaintyError> {
        if let Some(parameter) = duplicate_param {
            return Err(UncertaintyError::DuplicateParameter { parameter });
        }
        Ok(())
    }

    // ========================================================================
    // Column Roles
    // ========================================================================

    /// Resolve the actual and predicted columns of a pairwise metric.
    ///
    /// Named roles are looked up directly. Otherwise the table must have
    /// exactly two columns: column 0 is actual and column 1 is predicted, and
    /// a single named role takes the remaining column as its partner.
    pub fn pair_columns<T: Float>(
        table: &TimeSeriesTable<T>,
        actual: Option<&str>,
        predicted: Option<&str>,
        operation: &'static str,
    ) -> Result<(usize, usize), UncertaintyError> {
        let shape_error = || UncertaintyError::ColumnCount {
            operation,
            expected: 2,
            got: table.n_cols(),
        };

        match (actual, predicted) {
            (Some(a), Some(p)) => Ok((table.column_index(a)?, table.column_index(p)?)),
            (Some(a), None) => {
                if table.n_cols() != 2 {
                    return Err(shape_error());
                }
                let a = table.column_index(a)?;
                Ok((a, 1 - a))
            }
            (None, Some(p)) => {
                if table.n_cols() != 2 {
                    return Err(shape_error());
                }
                let p = table.column_index(p)?;
                Ok((1 - p, p))
            }
            (None, None) => {
                if table.n_cols() != 2 {
                    return Err(shape_error());
                }
                Ok((0, 1))
            }
        }
    }

    /// Resolve the ensemble columns and the observation column for CRPS.
    ///
    /// The table must have exactly 9 ensemble columns plus one observation,
    /// which is the named column or, by default, the last one.
    pub fn crps_columns<T: Float>(
        table: &TimeSeriesTable<T>,
        observation: Option<&str>,
    ) -> Result<(Vec<usize>, usize), UncertaintyError> {
        let expected = ENSEMBLE_MEMBERS + 1;
        if table.n_cols() != expected {
            return Err(UncertaintyError::ColumnCount {
                operation: "crps",
                expected,
                got: table.n_cols(),
            });
        }

        let obs = match observation {
            Some(name) => table.column_index(name)?,
            None => expected - 1,
        };
        let members = (0..expected).filter(|&j| j != obs).collect();
        Ok((members, obs))
    }
}
