//! Great-circle distance provider.

use crate::{Coordinate, DistanceMatrix};

use super::{DistanceError, DistanceProvider};

/// Computes distances with the haversine formula.
///
/// This is the default provider: it needs no network access and never fails
/// for non-empty input.
#[derive(Debug, Default, Clone, Copy)]
pub struct HaversineProvider;

impl DistanceProvider for HaversineProvider {
    fn distance_matrix(&self, points: &[Coordinate]) -> Result<DistanceMatrix, DistanceError> {
        if points.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        Ok(DistanceMatrix::from_coordinates(points))
    }
}
