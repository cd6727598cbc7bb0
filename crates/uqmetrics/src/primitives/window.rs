//! Sliding windows over table rows.
//!
//! ## Purpose
//!
//! This module provides the lazy window iterator shared by every windowed
//! metric. A window is a borrowed [`RowBlock`] starting at row `i`; windows
//! share storage with the table and never copy it.
//!
//! ## Design notes
//!
//! * **Count**: `N - w + 1` windows for `N >= w`, none otherwise.
//! * **Span**: A window holds `w - 1` rows by default ([`WindowSpan::Truncated`])
//!   or `w` rows ([`WindowSpan::Full`]). The window count is the same for
//!   both spans.
//! * **Restartable**: Each call to [`Windows::new`] starts from row 0; the
//!   iterator is `Clone`.
//!
//! ## Invariants
//!
//! * Window `i` starts at row `i`.
//! * Window size is at least 2, so a truncated window holds at least one row.

// External dependencies
use core::iter::FusedIterator;
use num_traits::Float;

// Internal dependencies
use crate::primitives::table::{RowBlock, TimeSeriesTable};

// ============================================================================
// Window Span
// ============================================================================

/// Number of rows each window covers relative to the configured size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowSpan {
    /// Rows `[i, i + w - 1)`.
    #[default]
    Truncated,

    /// Rows `[i, i + w)`.
    Full,
}

impl WindowSpan {
    /// Rows held by a window of configured size `window_size`.
    #[inline]
    pub fn rows(self, window_size: usize) -> usize {
        match self {
            WindowSpan::Truncated => window_size.saturating_sub(1),
            WindowSpan::Full => window_size,
        }
    }
}

/// Number of windows produced over `n_rows` rows.
#[inline]
pub fn window_count(n_rows: usize, window_size: usize) -> usize {
    if window_size == 0 || window_size > n_rows {
        0
    } else {
        n_rows - window_size + 1
    }
}

// ============================================================================
// Window Iterator
// ============================================================================

/// Lazy iterator over the sliding windows of a table.
#[derive(Debug, Clone)]
pub struct Windows<'a, T> {
    table: &'a TimeSeriesTable<T>,
    rows_per_window: usize,
    next: usize,
    count: usize,
}

impl<'a, T: Float> Windows<'a, T> {
    /// Start a fresh pass over `table`.
    pub fn new(table: &'a TimeSeriesTable<T>, window_size: usize, span: WindowSpan) -> Self {
        Self {
            table,
            rows_per_window: span.rows(window_size),
            next: 0,
            count: window_count(table.n_rows(), window_size),
        }
    }

    /// Window starting at row `i`, independent of the iterator position.
    pub fn window(&self, i: usize) -> RowBlock<'a, T> {
        self.table.rows(i, i + self.rows_per_window)
    }

    /// Total number of windows in the pass.
    pub fn count_total(&self) -> usize {
        self.count
    }
}

impl<'a, T: Float> Iterator for Windows<'a, T> {
    type Item = RowBlock<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let window = self.window(self.next);
        self.next += 1;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<T: Float> ExactSizeIterator for Windows<'_, T> {}

impl<T: Float> FusedIterator for Windows<'_, T> {}
