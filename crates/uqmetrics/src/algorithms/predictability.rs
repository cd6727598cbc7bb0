//! Predictability index: drift of the spread index over a window.
//!
//! ## Purpose
//!
//! The spread-index series is windowed again; for each window the index is
//! the mean of each spread column minus its value at the window's first row.
//!
//! ## Design notes
//!
//! * **Window bound**: Windows start at `i = 0..len - w`, i.e. `len - w`
//!   windows of `w` full rows. This is one fewer window than the generic
//!   iterator yields, so the final full window is never evaluated.
//! * **Alignment**: Entry `i` corresponds to the window starting at row `i`.

// External dependencies
use num_traits::Float;

/// Column names of a predictability-index table.
pub const PREDICTABILITY_INDEX_NAMES: [&str; 4] =
    ["PI_90_10", "PI_80_20", "PI_70_30", "PI_60_40"];

/// Number of predictability windows over `len` spread-index rows.
#[inline]
pub fn predictability_window_count(len: usize, window_size: usize) -> usize {
    len.saturating_sub(window_size)
}

/// Drift of one window of spread-index rows, per column.
///
/// `rows` holds `w` consecutive rows of `width` values, row-major.
pub fn window_drift<T: Float>(rows: &[T], width: usize, out: &mut [T]) {
    let n_rows = rows.len() / width;
    let n = T::from(n_rows).unwrap();

    for (j, slot) in out.iter_mut().enumerate().take(width) {
        let sum = (0..n_rows).fold(T::zero(), |acc, i| acc + rows[i * width + j]);
        *slot = sum / n - rows[j];
    }
}
