//! Geographic coordinates in WGS84 degrees.

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair.
///
/// Latitude is expected in `-90.0..=90.0` and longitude in
/// `-180.0..=180.0`. Construction never validates; request validation checks
/// ranges with [`Coordinate::is_valid`] before any computation runs.
///
/// # Examples
/// ```
/// use loadline_core::Coordinate;
///
/// let chennai = Coordinate::new(13.0827, 80.2707);
/// assert!(chennai.is_valid());
/// assert!(!Coordinate::new(91.0, 0.0).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Return `true` when both components are finite.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Return `true` when the coordinate is finite and inside WGS84 bounds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_finite() && (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(value: Coordinate) -> Self {
        Self::new(value.lng, value.lat)
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, true)]
    #[case(90.0, 180.0, true)]
    #[case(-90.0, -180.0, true)]
    #[case(90.5, 0.0, false)]
    #[case(0.0, -180.5, false)]
    #[case(f64::NAN, 0.0, false)]
    #[case(0.0, f64::INFINITY, false)]
    fn validates_ranges(#[case] lat: f64, #[case] lng: f64, #[case] expected: bool) {
        assert_eq!(Coordinate::new(lat, lng).is_valid(), expected);
    }

    #[rstest]
    fn converts_to_geo_point_with_longitude_as_x() {
        let point: Point<f64> = Coordinate::new(51.5, -0.1).into();
        assert_eq!(point.x(), -0.1);
        assert_eq!(point.y(), 51.5);
    }

    #[rstest]
    fn round_trips_through_geo_coord() {
        let original = Coordinate::new(12.9716, 77.5946);
        let coord: Coord<f64> = original.into();
        assert_eq!(Coordinate::from(coord), original);
    }

    #[rstest]
    fn deserialises_lat_lng_keys() {
        let coordinate: Coordinate =
            serde_json::from_str(r#"{"lat": 17.385, "lng": 78.4867}"#).expect("valid json");
        assert_eq!(coordinate, Coordinate::new(17.385, 78.4867));
    }
}
