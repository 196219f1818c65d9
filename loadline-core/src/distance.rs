//! Great-circle distance between coordinates.
//!
//! Distances are computed with the haversine formula on a sphere of radius
//! [`EARTH_RADIUS_KM`], so every result is expressed in kilometres. Inputs are
//! not validated here; callers check ranges at the request boundary.

use geo::{Distance, HaversineMeasure, Point};

use crate::Coordinate;

/// Mean Earth radius used for all great-circle calculations.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between `a` and `b` in kilometres.
///
/// The result is symmetric and exactly `0.0` when both inputs are equal.
///
/// # Examples
/// ```
/// use loadline_core::{Coordinate, haversine_km};
///
/// let chennai = Coordinate::new(13.0827, 80.2707);
/// let bangalore = Coordinate::new(12.9716, 77.5946);
/// let km = haversine_km(chennai, bangalore);
/// assert!((285.0..295.0).contains(&km));
/// assert_eq!(haversine_km(chennai, chennai), 0.0);
/// ```
#[must_use]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let km = HaversineMeasure::new(EARTH_RADIUS_KM).distance(Point::from(a), Point::from(b));
    km.max(0.0)
}

/// Sum of consecutive-leg distances along `points`.
///
/// Fewer than two points yield `0.0`.
///
/// # Examples
/// ```
/// use loadline_core::{Coordinate, path_length_km};
///
/// assert_eq!(path_length_km(&[Coordinate::new(0.0, 0.0)]), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "path length accumulates floating-point leg distances"
)]
pub fn path_length_km(points: &[Coordinate]) -> f64 {
    points
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(haversine_km(*from, *to)),
            _ => None,
        })
        .sum()
}
