//! Produce distance matrices for a list of coordinates.
//!
//! The [`DistanceProvider`] trait abstracts where pairwise distances come
//! from. [`HaversineProvider`] computes great-circle distances locally; road
//! network providers live in other crates and implement the same trait, so
//! solvers never care which source produced their matrix.
//!
//! Providers must return an error for empty input rather than an empty
//! matrix.

mod error;
mod haversine;

pub use error::DistanceError;
pub use haversine::HaversineProvider;

use crate::{Coordinate, DistanceMatrix};

/// Fetch pairwise distances for a set of coordinates.
///
/// Implementers must return a square `n×n` matrix where
/// `n == points.len()`; `matrix.get(i, j)` is the distance from `points[i]`
/// to `points[j]` in kilometres.
///
/// # Examples
///
/// ```rust
/// use loadline_core::{
///     Coordinate, DistanceError, DistanceMatrix, DistanceProvider, HaversineProvider,
/// };
///
/// let provider = HaversineProvider;
/// let matrix = provider.distance_matrix(&[
///     Coordinate::new(13.0827, 80.2707),
///     Coordinate::new(12.9716, 77.5946),
/// ])?;
/// assert_eq!(matrix.len(), 2);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait DistanceProvider: Send + Sync {
    /// Return a matrix of distances for `points`.
    ///
    /// # Errors
    /// Implementations must return [`DistanceError::EmptyInput`] when `points`
    /// is empty, and a transport-specific variant when the source fails.
    fn distance_matrix(&self, points: &[Coordinate]) -> Result<DistanceMatrix, DistanceError>;
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for Box<P> {
    fn distance_matrix(&self, points: &[Coordinate]) -> Result<DistanceMatrix, DistanceError> {
        (**self).distance_matrix(points)
    }
}

impl<P: DistanceProvider + ?Sized> DistanceProvider for std::sync::Arc<P> {
    fn distance_matrix(&self, points: &[Coordinate]) -> Result<DistanceMatrix, DistanceError> {
        (**self).distance_matrix(points)
    }
}
