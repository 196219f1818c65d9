//! Compatibility between a shipment and a route with spare capacity.

use loadline_core::{Coordinate, haversine_km, round_tenth};
use serde::{Deserialize, Serialize};

use crate::MatchConfig;

/// A consignment looking for a ride.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    /// Caller-supplied identifier.
    pub id: String,
    /// Pickup point.
    pub origin: Coordinate,
    /// Drop-off point.
    pub destination: Coordinate,
    /// Weight or unit count to carry.
    pub weight: f64,
}

/// A planned route that can take extra load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRoute {
    /// Caller-supplied identifier.
    pub id: String,
    /// Where the route starts.
    pub origin: Coordinate,
    /// Where the route ends.
    pub destination: Coordinate,
    /// Spare capacity, in the same unit as [`Shipment::weight`].
    pub available_capacity: f64,
}

/// How well one shipment fits one candidate route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// The shipment being placed.
    pub shipment_id: String,
    /// The route it could join.
    pub candidate_route_id: String,
    /// Pickup detour, rounded to 0.1 km.
    pub origin_deviation_km: f64,
    /// Drop-off detour, rounded to 0.1 km.
    pub destination_deviation_km: f64,
    /// Score in `0..=100`; zero when the route lacks capacity.
    pub compatibility_score: u8,
    /// Whether the route has room and the deviation is acceptable.
    pub is_compatible: bool,
}

/// Score `shipment` against `route`.
///
/// The deviation score falls linearly from 100 at no detour to 0 once the
/// combined origin and destination detours reach `max_deviation_km`. A route
/// without room for the shipment always scores zero and is never
/// compatible.
///
/// # Examples
/// ```
/// use loadline_core::Coordinate;
/// use loadline_matching::{CandidateRoute, MatchConfig, Shipment, score};
///
/// let here = Coordinate::new(13.0827, 80.2707);
/// let there = Coordinate::new(12.9716, 77.5946);
/// let shipment = Shipment { id: "s1".into(), origin: here, destination: there, weight: 200.0 };
/// let route = CandidateRoute {
///     id: "r1".into(),
///     origin: here,
///     destination: there,
///     available_capacity: 500.0,
/// };
/// let candidate = score(&shipment, &route, &MatchConfig::default());
/// assert_eq!(candidate.compatibility_score, 100);
/// assert!(candidate.is_compatible);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "deviation score scales floating-point distances"
)]
pub fn score(shipment: &Shipment, route: &CandidateRoute, config: &MatchConfig) -> MatchCandidate {
    let origin_dev = haversine_km(shipment.origin, route.origin);
    let dest_dev = haversine_km(shipment.destination, route.destination);
    let has_capacity = route.available_capacity >= shipment.weight;
    let deviation_score =
        (100.0 - ((origin_dev + dest_dev) / config.max_deviation_km) * 100.0).max(0.0);
    MatchCandidate {
        shipment_id: shipment.id.clone(),
        candidate_route_id: route.id.clone(),
        origin_deviation_km: round_tenth(origin_dev),
        destination_deviation_km: round_tenth(dest_dev),
        compatibility_score: if has_capacity {
            percent(deviation_score)
        } else {
            0
        },
        is_compatible: has_capacity && deviation_score > config.compatibility_threshold,
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is clamped to 0..=100 before the cast"
)]
fn percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
