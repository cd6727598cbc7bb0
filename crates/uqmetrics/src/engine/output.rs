//! Output types for uncertainty metric operations.
//!
//! ## Purpose
//!
//! This module defines the result containers returned by every operation:
//! named scalar series, named multi-column tables, and the per-timestamp
//! variogram report.
//!
//! ## Design notes
//!
//! * **Aligned**: Entry `i` of a series or row `i` of a table corresponds to
//!   the window or row starting at input index `i`.
//! * **Exportable**: Tables are row-major with named columns.
//! * **Isolated failures**: A variogram report keeps one entry per timestamp,
//!   successful or not.
//!
//! ## Non-goals
//!
//! * This module does not compute metrics or persist results.

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::variogram::VariogramModel;
use crate::primitives::errors::UncertaintyError;

/// Rows shown in full before a table display is elided.
const DISPLAY_ROWS: usize = 20;

/// Row indices to display: all of them, or the first and last 10.
fn display_rows(n: usize) -> Vec<usize> {
    if n <= DISPLAY_ROWS {
        (0..n).collect()
    } else {
        (0..10).chain(n - 10..n).collect()
    }
}

// ============================================================================
// Metric Series
// ============================================================================

/// Named scalar series, one entry per window or row.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSeries<T> {
    /// Metric name.
    pub name: String,

    /// Metric values in input order.
    pub values: Vec<T>,
}

impl<T: Float> MetricSeries<T> {
    /// Create a named series.
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no entries.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entry `i`, if present.
    pub fn get(&self, i: usize) -> Option<T> {
        self.values.get(i).copied()
    }

    /// Values as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Iterate over the values.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: Float + Display> Display for MetricSeries<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Metric:  {}", self.name)?;
        writeln!(f, "  Entries: {}", self.values.len())?;
        writeln!(f)?;

        let width = self.name.len().max(12);
        writeln!(f, "{:>8} {:>width$}", "Index", self.name, width = width)?;
        writeln!(f, "{:-<w$}", "", w = width + 9)?;

        let mut prev_idx = 0;
        for (i, &idx) in display_rows(self.values.len()).iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;
            writeln!(f, "{:>8} {:>width$.6}", idx, self.values[idx], width = width)?;
        }

        Ok(())
    }
}

// ============================================================================
// Metric Table
// ============================================================================

/// Named multi-column result, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricTable<T> {
    columns: Vec<String>,
    values: Vec<T>,
}

impl<T: Float> MetricTable<T> {
    /// Create a table from column names and row-major values.
    ///
    /// `values.len()` must be a multiple of the column count.
    pub fn new<S: AsRef<str>>(columns: &[S], values: Vec<T>) -> Self {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        debug_assert!(!columns.is_empty() && values.len() % columns.len() == 0);
        Self { columns, values }
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.values.len() / self.columns.len().max(1)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values of row `i`.
    pub fn row(&self, i: usize) -> &[T] {
        let k = self.n_cols();
        &self.values[i * k..(i + 1) * k]
    }

    /// All values, row-major.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// A named column as a series.
    pub fn column(&self, name: &str) -> Option<MetricSeries<T>> {
        let j = self.columns.iter().position(|c| c == name)?;
        let values = self
            .values
            .chunks_exact(self.n_cols())
            .map(|row| row[j])
            .collect();
        Some(MetricSeries::new(name, values))
    }
}

impl<T: Float + Display> Display for MetricTable<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Rows:    {}", self.n_rows())?;
        writeln!(f, "  Columns: {}", self.n_cols())?;
        writeln!(f)?;

        write!(f, "{:>8}", "Index")?;
        for name in &self.columns {
            write!(f, " {:>12}", name)?;
        }
        writeln!(f)?;
        writeln!(f, "{:-<w$}", "", w = 8 + 13 * self.n_cols())?;

        let mut prev_idx = 0;
        for (i, &idx) in display_rows(self.n_rows()).iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8}", idx)?;
            for v in self.row(idx) {
                write!(f, " {:>12.6}", v)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

// ============================================================================
// Variogram Report
// ============================================================================

/// Outcome of the variogram fit for one timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampFit<T> {
    /// Zero-based timestamp index within the batch.
    pub timestamp: usize,

    /// Value column of the timestamp, when fitted from a table.
    pub column: Option<String>,

    /// Fitted model, or the recorded failure.
    pub outcome: core::result::Result<VariogramModel<T>, UncertaintyError>,
}

impl<T> TimestampFit<T> {
    /// Whether the fit produced a model.
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Per-timestamp variogram fits in batch order.
#[derive(Debug, Clone, PartialEq)]
pub struct VariogramReport<T> {
    /// One entry per timestamp.
    pub fits: Vec<TimestampFit<T>>,
}

impl<T: Float> VariogramReport<T> {
    /// Number of timestamps.
    pub fn len(&self) -> usize {
        self.fits.len()
    }

    /// Whether the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.fits.is_empty()
    }

    /// Successful fits as `(timestamp, model)`.
    pub fn models(&self) -> Vec<(usize, VariogramModel<T>)> {
        self.fits
            .iter()
            .filter_map(|fit| fit.outcome.as_ref().ok().map(|m| (fit.timestamp, *m)))
            .collect()
    }

    /// Recorded failures.
    pub fn failures(&self) -> Vec<&UncertaintyError> {
        self.fits
            .iter()
            .filter_map(|fit| fit.outcome.as_ref().err())
            .collect()
    }

    /// Nugget per timestamp; NaN where the fit failed.
    pub fn nuggets(&self) -> Vec<T> {
        self.parameter(|m| m.nugget)
    }

    /// Range per timestamp; NaN where the fit failed.
    pub fn ranges(&self) -> Vec<T> {
        self.parameter(|m| m.range)
    }

    /// Sill per timestamp; NaN where the fit failed.
    pub fn sills(&self) -> Vec<T> {
        self.parameter(|m| m.sill)
    }

    fn parameter(&self, pick: impl Fn(&VariogramModel<T>) -> T) -> Vec<T> {
        self.fits
            .iter()
            .map(|fit| fit.outcome.as_ref().map_or(T::nan(), &pick))
            .collect()
    }

    /// Parameters as a `nugget`, `range`, `sill` table; NaN rows for failures.
    pub fn to_table(&self) -> MetricTable<T> {
        let mut values = Vec::with_capacity(self.fits.len() * 3);
        for fit in &self.fits {
            match &fit.outcome {
                Ok(m) => values.extend([m.nugget, m.range, m.sill]),
                Err(_) => values.extend([T::nan(); 3]),
            }
        }
        MetricTable::new(&["nugget", "range", "sill"], values)
    }
}

impl<T: Float + Display + Debug> Display for VariogramReport<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let failed = self.fits.iter().filter(|fit| !fit.is_ok()).count();
        writeln!(f, "Summary:")?;
        writeln!(f, "  Timestamps: {}", self.fits.len())?;
        writeln!(f, "  Converged:  {}", self.fits.len() - failed)?;
        writeln!(f, "  Failed:     {}", failed)?;
        writeln!(f)?;

        writeln!(
            f,
            "{:>8} {:>12} {:>12} {:>12} {:>12}",
            "Index", "Column", "Nugget", "Range", "Sill"
        )?;
        writeln!(f, "{:-<60}", "")?;

        let mut prev_idx = 0;
        for (i, &idx) in display_rows(self.fits.len()).iter().enumerate() {
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            let fit = &self.fits[idx];
            let column = fit.column.as_deref().unwrap_or("-");
            match &fit.outcome {
                Ok(m) => writeln!(
                    f,
                    "{:>8} {:>12} {:>12.6} {:>12.6} {:>12.6}",
                    fit.timestamp, column, m.nugget, m.range, m.sill
                )?,
                Err(err) => writeln!(f, "{:>8} {:>12} {}", fit.timestamp, column, err)?,
            }
        }

        Ok(())
    }
}
