//! Immutable in-memory time-series table.
//!
//! ## Purpose
//!
//! This module provides [`TimeSeriesTable`], the ordered row sequence every
//! metric operates on, together with the borrowed [`RowBlock`] view used for
//! windows and for single rows.
//!
//! ## Design notes
//!
//! * **Row-major**: Values are stored contiguously row after row, so a window
//!   of consecutive rows is a single contiguous slice.
//! * **Named columns**: Column roles are resolved by name; positional access
//!   is only used where a role is implied by the column count.
//! * **Immutable**: A table is never mutated after construction.
//!
//! ## Invariants
//!
//! * Every row has exactly `n_cols()` values.
//! * Column names are unique.
//! * A table has at least one column; it may have zero rows.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::UncertaintyError;

// ============================================================================
// Table
// ============================================================================

/// Ordered sequence of numeric rows with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable<T> {
    columns: Vec<String>,
    values: Vec<T>,
    n_rows: usize,
}

impl<T: Float> TimeSeriesTable<T> {
    /// Build a table from a header and row-major rows.
    pub fn from_rows<S, R>(columns: &[S], rows: &[R]) -> Result<Self, UncertaintyError>
    where
        S: AsRef<str>,
        R: AsRef<[T]>,
    {
        let columns = Self::check_header(columns.iter().map(|c| c.as_ref().to_string()))?;
        let n_cols = columns.len();

        let mut values = Vec::with_capacity(rows.len() * n_cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n_cols {
                return Err(UncertaintyError::RaggedRow {
                    row: i,
                    expected: n_cols,
                    got: row.len(),
                });
            }
            values.extend_from_slice(row);
        }

        Ok(Self {
            columns,
            values,
            n_rows: rows.len(),
        })
    }

    /// Build a table from named columns of equal length.
    pub fn from_columns<S, C>(columns: &[(S, C)]) -> Result<Self, UncertaintyError>
    where
        S: AsRef<str>,
        C: AsRef<[T]>,
    {
        let names = Self::check_header(columns.iter().map(|(name, _)| name.as_ref().to_string()))?;
        let n_rows = columns[0].1.as_ref().len();

        for (name, data) in columns {
            if data.as_ref().len() != n_rows {
                return Err(UncertaintyError::MismatchedLength {
                    column: name.as_ref().to_string(),
                    expected: n_rows,
                    got: data.as_ref().len(),
                });
            }
        }

        let n_cols = names.len();
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for i in 0..n_rows {
            values.extend(columns.iter().map(|(_, data)| data.as_ref()[i]));
        }

        Ok(Self {
            columns: names,
            values,
            n_rows,
        })
    }

    /// Build a single-column table.
    pub fn univariate(name: &str, values: &[T]) -> Self {
        Self {
            columns: vec![name.to_string()],
            values: values.to_vec(),
            n_rows: values.len(),
        }
    }

    fn check_header<I>(names: I) -> Result<Vec<String>, UncertaintyError>
    where
        I: Iterator<Item = String>,
    {
        let mut columns: Vec<String> = Vec::new();
        for name in names {
            if columns.contains(&name) {
                return Err(UncertaintyError::DuplicateColumn(name));
            }
            columns.push(name);
        }
        if columns.is_empty() {
            return Err(UncertaintyError::EmptyInput);
        }
        Ok(columns)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a named column.
    pub fn column_index(&self, name: &str) -> Result<usize, UncertaintyError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| UncertaintyError::UnknownColumn(name.to_string()))
    }

    /// Values of row `i`.
    pub fn row(&self, i: usize) -> &[T] {
        let n_cols = self.n_cols();
        &self.values[i * n_cols..(i + 1) * n_cols]
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Vec<T> {
        self.rows(0, self.n_rows).column(j)
    }

    /// Copy of a named column.
    pub fn column_by_name(&self, name: &str) -> Result<Vec<T>, UncertaintyError> {
        Ok(self.column(self.column_index(name)?))
    }

    /// Borrowed view of rows `[start, end)`.
    pub fn rows(&self, start: usize, end: usize) -> RowBlock<'_, T> {
        let n_cols = self.n_cols();
        RowBlock {
            start,
            values: &self.values[start * n_cols..end * n_cols],
            n_cols,
        }
    }
}

// ============================================================================
// Row Block
// ============================================================================

/// Borrowed view over a contiguous run of table rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowBlock<'a, T> {
    /// Index of the first row in the source table.
    pub start: usize,
    values: &'a [T],
    n_cols: usize,
}

impl<'a, T: Float> RowBlock<'a, T> {
    /// Number of rows in the block.
    pub fn len(&self) -> usize {
        if self.n_cols == 0 {
            0
        } else {
            self.values.len() / self.n_cols
        }
    }

    /// Whether the block contains no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// All values flattened in row-major order.
    pub fn flat(&self) -> &'a [T] {
        self.values
    }

    /// Values of row `i` relative to the block.
    pub fn row(&self, i: usize) -> &'a [T] {
        &self.values[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Copy of column `j` within the block.
    pub fn column(&self, j: usize) -> Vec<T> {
        self.values
            .chunks_exact(self.n_cols)
            .map(|row| row[j])
            .collect()
    }
}
