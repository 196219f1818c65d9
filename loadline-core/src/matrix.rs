//! Square distance matrices in kilometres.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coordinate, Stop, haversine_km};

/// Errors returned by [`DistanceMatrix::try_from_rows`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// A row did not have as many columns as the matrix has rows.
    #[error("row {row} has {len} columns but {expected} expected (matrix must be square)")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Number of columns found in the row.
        len: usize,
        /// Number of rows in the matrix.
        expected: usize,
    },
    /// An entry was negative, NaN or infinite.
    #[error("entry [{row}][{col}] = {value} is not a finite non-negative distance")]
    InvalidEntry {
        /// Row index of the entry.
        row: usize,
        /// Column index of the entry.
        col: usize,
        /// Rejected value.
        value: f64,
    },
    /// A diagonal entry was not zero.
    #[error("diagonal entry [{index}][{index}] = {value} must be zero")]
    NonZeroDiagonal {
        /// Index of the diagonal entry.
        index: usize,
        /// Rejected value.
        value: f64,
    },
}

/// Pairwise distances between an ordered list of nodes.
///
/// `matrix.get(i, j)` is the distance from node `i` to node `j`. The diagonal
/// is always zero. Matrices built from coordinates are symmetric; matrices
/// supplied by a road network may not be.
///
/// # Examples
/// ```
/// use loadline_core::{Coordinate, DistanceMatrix};
///
/// let matrix = DistanceMatrix::from_coordinates(&[
///     Coordinate::new(0.0, 0.0),
///     Coordinate::new(0.0, 1.0),
/// ]);
/// assert_eq!(matrix.len(), 2);
/// assert_eq!(matrix.get(0, 0), Some(0.0));
/// assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    rows: Vec<Vec<f64>>,
}

impl DistanceMatrix {
    /// Build a great-circle matrix for `points`.
    #[must_use]
    pub fn from_coordinates(points: &[Coordinate]) -> Self {
        let rows = points
            .iter()
            .enumerate()
            .map(|(i, from)| {
                points
                    .iter()
                    .enumerate()
                    .map(|(j, to)| if i == j { 0.0 } else { haversine_km(*from, *to) })
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Build a great-circle matrix for the locations of `stops`.
    #[must_use]
    pub fn from_stops(stops: &[Stop]) -> Self {
        let points: Vec<Coordinate> = stops.iter().map(|stop| stop.location).collect();
        Self::from_coordinates(&points)
    }

    /// Validate and wrap a precomputed matrix.
    ///
    /// # Errors
    /// Returns [`MatrixError`] when the input is not square, contains a
    /// negative or non-finite entry, or has a non-zero diagonal.
    pub fn try_from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MatrixError> {
        let expected = rows.len();
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(MatrixError::NotSquare {
                    row: row_idx,
                    len: row.len(),
                    expected,
                });
            }
            for (col_idx, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(MatrixError::InvalidEntry {
                        row: row_idx,
                        col: col_idx,
                        value,
                    });
                }
                if row_idx == col_idx && value != 0.0 {
                    return Err(MatrixError::NonZeroDiagonal {
                        index: row_idx,
                        value,
                    });
                }
            }
        }
        Ok(Self { rows })
    }

    /// Number of nodes covered by the matrix.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Return `true` when the matrix covers no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distance from node `from` to node `to`, if both are in range.
    #[must_use]
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        self.rows.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Distance from `from` to `to`, treating out-of-range lookups as zero.
    ///
    /// Solvers check dimensions before calling this; a miss is logged and
    /// trips a debug assertion.
    #[must_use]
    pub fn leg(&self, from: usize, to: usize) -> f64 {
        self.get(from, to).unwrap_or_else(|| {
            log::warn!("matrix lookup [{from}][{to}] out of range; treating leg as zero");
            debug_assert!(false, "matrix lookup [{from}][{to}] out of range");
            0.0
        })
    }

    /// Sum of consecutive legs along `path`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "path length accumulates floating-point distances"
    )]
    pub fn path_length(&self, path: &[usize]) -> f64 {
        path.windows(2)
            .filter_map(|pair| match pair {
                [from, to] => Some(self.leg(*from, *to)),
                _ => None,
            })
            .sum()
    }

    /// Leading `n`×`n` sub-matrix, or a copy when `n` exceeds the size.
    #[must_use]
    pub fn truncated(&self, n: usize) -> Self {
        let rows = self
            .rows
            .iter()
            .take(n)
            .map(|row| row.iter().take(n).copied().collect())
            .collect();
        Self { rows }
    }

    /// Borrow the underlying rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = MatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::try_from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        matrix.rows
    }
}
