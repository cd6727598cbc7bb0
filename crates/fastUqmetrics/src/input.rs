//! Input abstractions for uncertainty metrics.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for metric inputs, allowing
//! every metric method to accept tables, slices, vectors and `ndarray`
//! arrays through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: Tables are borrowed as-is; other containers
//!   are copied into a table once per call.
//! * **Interoperability**: One-dimensional containers become a single column
//!   named `x`; two-dimensional arrays keep their rows, with columns named
//!   `c0, c1, ...` unless names are supplied.
//! * **Fail-fast validation**: Arrays must be contiguous in row-major order.
//!
//! ## Invariants
//!
//! * The resulting table holds every element of the input container.
//!
//! ## Non-goals
//!
//! * This module does not perform data cleaning or imputation.

// External dependencies
use ndarray::{ArrayBase, Data, Ix1, Ix2};
use num_traits::Float;
use std::borrow::Cow;

// Export dependencies from uqmetrics crate
use uqmetrics::internals::primitives::errors::UncertaintyError;
use uqmetrics::internals::primitives::table::TimeSeriesTable;

/// Column name given to one-dimensional inputs.
const SERIES_COLUMN: &str = "x";

/// Trait for types that can be used as input for uncertainty metrics.
pub trait TableInput<T: Float> {
    /// View or convert the input as a table.
    fn as_table(&self) -> Result<Cow<'_, TimeSeriesTable<T>>, UncertaintyError>;
}

impl<T: Float> TableInput<T> for TimeSeriesTable<T> {
    fn as_table(&self) -> Result<Cow<'_, TimeSeriesTable<T>>, UncertaintyError> {
        Ok(Cow::Borrowed(self))
    }
}

impl<T: Float> TableInput<T> for [T] {
    fn as_table(&self) -> Result<Cow<'_, TimeSeriesTable<T>>, UncertaintyError> {
        Ok(Cow::Owned(TimeSeriesTable::univariate(SERIES_COLUMN, self)))
    }
}

impl<T: Float> TableInput<T> for Vec<T> {
    fn as_table(&self) -> Result<Cow<'_, TimeSeriesTable<T>>, UncertaintyError> {
        self.as_slice().as_table()
    }
}

impl<T: Float, S> TableInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_table(&self) -> Result<Cow<'_, TimeSeriesTable<T>>, UncertaintyError> {
        let values = self.as_slice().ok_or_else(|| {
            UncertaintyError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })?;
        Ok(Cow::Owned(TimeSeriesTable::univariate(SERIES_COLUMN, values)))
    }
}

impl<T: Float, S> TableInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_table(&self) -> Result<Cow<'_, TimeSeriesTable<T>>, UncertaintyError> {
        let names: Vec<String> = (0..self.ncols()).map(|j| format!("c{}", j)).collect();
        table_from_array(&names, self).map(Cow::Owned)
    }
}

/// Build a table from a row-major two-dimensional array and column names.
pub fn table_from_array<T, S, N>(
    names: &[N],
    array: &ArrayBase<S, Ix2>,
) -> Result<TimeSeriesTable<T>, UncertaintyError>
where
    T: Float,
    S: Data<Elem = T>,
    N: AsRef<str>,
{
    if names.len() != array.ncols() {
        return Err(UncertaintyError::ColumnCount {
            operation: "table_from_array",
            expected: array.ncols(),
            got: names.len(),
        });
    }
    if array.ncols() == 0 {
        return Err(UncertaintyError::EmptyInput);
    }

    let values = array.as_slice().ok_or_else(|| {
        UncertaintyError::InvalidInput(
            "ndarray input must be contiguous in row-major order".to_string(),
        )
    })?;
    let rows: Vec<&[T]> = values.chunks_exact(array.ncols()).collect();
    TimeSeriesTable::from_rows(names, &rows)
}
