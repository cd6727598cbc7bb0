//! Error types for uncertainty metric operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while computing
//! windowed uncertainty metrics, including table construction, column role
//! resolution, parameter validation and per-timestamp variogram fits.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (expected vs. actual
//!   column counts, row index, parameter value).
//! * **Deferred**: Builder misconfiguration is recorded and surfaced by `build()`.
//! * **Isolated**: Fit failures are stored per timestamp inside a report and
//!   never abort a batch.
//!
//! ## Key concepts
//!
//! 1. **Shape errors**: Wrong column count for an operation, ragged rows.
//! 2. **Parameter errors**: Window size, percentile level, fitter tolerances.
//! 3. **Fit failures**: Why a nonlinear least-squares fit produced no model.
//!
//! ## Non-goals
//!
//! * Degenerate windows (zero mean, zero range) are not errors; they
//!   propagate as NaN or infinity in the metric series.

// External dependencies
use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Fit Failure
// ============================================================================

/// Reason a curve fit did not yield a usable parameter vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitFailure {
    /// Fewer observations than model parameters.
    InsufficientData {
        /// Number of observations supplied.
        points: usize,
        /// Number of model parameters.
        params: usize,
    },

    /// The iteration budget was exhausted before convergence.
    MaxIterations(usize),

    /// Fewer distinct lags than model parameters: the parameters are not identifiable.
    Singular,

    /// The objective evaluated to NaN or infinity.
    NonFinite,

    /// The fit converged to parameters outside the model's valid domain.
    InvalidModel {
        /// Fitted range.
        range: f64,
        /// Fitted sill.
        sill: f64,
    },
}

impl Display for FitFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FitFailure::InsufficientData { points, params } => write!(
                f,
                "Insufficient data: {} observations for {} parameters",
                points, params
            ),
            FitFailure::MaxIterations(iterations) => {
                write!(f, "No convergence after {} iterations", iterations)
            }
            FitFailure::Singular => {
                write!(f, "Too few distinct lags: parameters are not identifiable")
            }
            FitFailure::NonFinite => write!(f, "Objective is not finite"),
            FitFailure::InvalidModel { range, sill } => write!(
                f,
                "Invalid model: range = {} (must be > 0), sill = {} (must be >= 0)",
                range, sill
            ),
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Error type for uncertainty metric operations.
#[derive(Debug, Clone, PartialEq)]
pub enum UncertaintyError {
    /// The input has no columns, or an estimator received no samples.
    EmptyInput,

    /// A table row has a different width than the header.
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Number of columns declared.
        expected: usize,
        /// Number of values found in the row.
        got: usize,
    },

    /// A column has a different length than the first column.
    MismatchedLength {
        /// Name of the offending column.
        column: String,
        /// Length of the first column.
        expected: usize,
        /// Length of the offending column.
        got: usize,
    },

    /// An operation received a table with the wrong number of columns.
    ColumnCount {
        /// Name of the operation that rejected the input.
        operation: &'static str,
        /// Required column count.
        expected: usize,
        /// Column count supplied.
        got: usize,
    },

    /// A named column does not exist in the table.
    UnknownColumn(String),

    /// A column name appears more than once in a table header.
    DuplicateColumn(String),

    /// The input container cannot be read as a table.
    InvalidInput(String),

    /// Window size must be at least 2.
    InvalidWindowSize(usize),

    /// Percentile level must lie strictly between 0 and 100.
    InvalidPercentile(f64),

    /// Fitter tolerance must be positive and finite.
    InvalidTolerance(f64),

    /// Fitter iteration budget must be in 1..=100000.
    InvalidIterations(usize),

    /// Initial guess for the variogram fit is unusable.
    InvalidInitialGuess(String),

    /// A builder parameter was set multiple times.
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },

    /// The variogram fit for one timestamp failed.
    FitNonConvergence {
        /// Zero-based timestamp index within the batch.
        timestamp: usize,
        /// Value column of the timestamp, when known.
        column: Option<String>,
        /// Underlying fit failure.
        reason: FitFailure,
    },
}

impl Display for UncertaintyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            UncertaintyError::EmptyInput => write!(f, "Empty input: no data to process"),
            UncertaintyError::RaggedRow { row, expected, got } => write!(
                f,
                "Ragged row {}: expected {} values, got {}",
                row, expected, got
            ),
            UncertaintyError::MismatchedLength {
                column,
                expected,
                got,
            } => write!(
                f,
                "Mismatched column '{}': expected {} values, got {}",
                column, expected, got
            ),
            UncertaintyError::ColumnCount {
                operation,
                expected,
                got,
            } => write!(
                f,
                "Invalid shape for {}: expected {} columns, got {}",
                operation, expected, got
            ),
            UncertaintyError::UnknownColumn(name) => write!(f, "Unknown column: '{}'", name),
            UncertaintyError::DuplicateColumn(name) => {
                write!(f, "Duplicate column: '{}'", name)
            }
            UncertaintyError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            UncertaintyError::InvalidWindowSize(size) => {
                write!(f, "Invalid window size: {} (must be >= 2)", size)
            }
            UncertaintyError::InvalidPercentile(p) => {
                write!(f, "Invalid percentile: {} (must be > 0 and < 100)", p)
            }
            UncertaintyError::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {} (must be > 0 and finite)", tol)
            }
            UncertaintyError::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {} (must be 1-100000)", iter)
            }
            UncertaintyError::InvalidInitialGuess(msg) => {
                write!(f, "Invalid initial guess: {}", msg)
            }
            UncertaintyError::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
            UncertaintyError::FitNonConvergence {
                timestamp,
                column,
                reason,
            } => match column {
                Some(name) => write!(
                    f,
                    "Variogram fit failed at timestamp {} ('{}'): {}",
                    timestamp, name, reason
                ),
                None => write!(
                    f,
                    "Variogram fit failed at timestamp {}: {}",
                    timestamp, reason
                ),
            },
        }
    }
}

impl Error for UncertaintyError {}
