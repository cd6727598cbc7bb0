//! Pairwise Euclidean distances between planar points.
//!
//! ## Purpose
//!
//! This module builds the full `N x N` distance matrix over a set of 2-D
//! coordinates, used to construct empirical semivariograms.
//!
//! ## Invariants
//!
//! * The matrix is symmetric with an exact zero diagonal.
//! * Entry `(i, j)` is stored row-major at `i * n + j`.

// External dependencies
use num_traits::Float;

/// Dense symmetric distance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<T> {
    n: usize,
    values: Vec<T>,
}

impl<T: Float> DistanceMatrix<T> {
    /// Euclidean distances between every pair of `points`.
    pub fn pairwise_euclidean(points: &[[T; 2]]) -> Self {
        let n = points.len();
        let mut values = vec![T::zero(); n * n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i][0] - points[j][0];
                let dy = points[i][1] - points[j][1];
                let d = dx.hypot(dy);
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }

        Self { n, values }
    }

    /// Number of points.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Distance between points `i` and `j`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> T {
        self.values[i * self.n + j]
    }

    /// All `N * N` entries in row-major order.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}
