//! Wire shape of an optimisation answer.

use serde::{Deserialize, Serialize};

use crate::{SolveResult, SolverKind, Stop};

/// Round `value` to one decimal place.
///
/// # Examples
/// ```
/// use loadline_core::round_tenth;
///
/// assert_eq!(round_tenth(12.345), 12.3);
/// assert_eq!(round_tenth(0.05), 0.1);
/// ```
#[must_use]
#[expect(clippy::float_arithmetic, reason = "rounding scales by ten")]
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One vehicle's route expressed with stop identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Position of the vehicle in the expanded fleet.
    pub vehicle_index: usize,
    /// Stop identifiers in visiting order.
    pub order: Vec<String>,
    /// Route length in kilometres, rounded to 0.1.
    pub distance_km: f64,
    /// Total demand carried.
    pub load: f64,
}

/// Answer to an [`OptimizeRequest`](crate::OptimizeRequest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
    /// Strategy that produced the routes.
    pub solver: SolverKind,
    /// Routes for vehicles that serve at least one stop.
    pub routes: Vec<RouteSummary>,
    /// Sum of route distances, rounded to 0.1.
    pub total_distance_km: f64,
    /// Stops no vehicle could take.
    #[serde(default)]
    pub unassigned_stops: Vec<String>,
    /// Improvement over visiting stops in request order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_percentage: Option<i64>,
    /// Driving time for the total distance, rounded to 0.1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_hours: Option<f64>,
}

impl OptimizeResponse {
    /// Translate node indices in `result` back to stop identifiers.
    ///
    /// Node `i` in `1..=stops.len()` is `stops[i - 1]`; the origin and
    /// destination nodes are omitted from `order`.
    #[must_use]
    pub fn from_result(result: &SolveResult, stops: &[Stop]) -> Self {
        let stop_id = |node: usize| {
            node.checked_sub(1)
                .and_then(|idx| stops.get(idx))
                .map(|stop| stop.id.clone())
        };
        let routes = result
            .routes
            .iter()
            .map(|route| RouteSummary {
                vehicle_index: route.vehicle_index,
                order: route.visits.iter().filter_map(|&node| stop_id(node)).collect(),
                distance_km: round_tenth(route.distance_km),
                load: route.load,
            })
            .collect();
        Self {
            solver: result.solver,
            routes,
            total_distance_km: round_tenth(result.total_distance_km),
            unassigned_stops: result.unassigned.iter().filter_map(|&node| stop_id(node)).collect(),
            savings_percentage: None,
            estimated_time_hours: None,
        }
    }

    /// Attach a savings figure.
    #[must_use]
    pub const fn with_savings(mut self, savings: Option<i64>) -> Self {
        self.savings_percentage = savings;
        self
    }

    /// Attach a driving-time estimate, rounding it to 0.1 hours.
    #[must_use]
    pub fn with_estimated_time(mut self, hours: Option<f64>) -> Self {
        self.estimated_time_hours = hours.map(round_tenth);
        self
    }
}
