//! Stops, vehicles and solved routes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// A place a vehicle must visit.
///
/// On the wire the coordinate is flattened, so a stop reads
/// `{"id": "s1", "lat": 12.9, "lng": 77.5, "demand": 400}`. `demand` is a
/// weight or unit count and defaults to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Caller-supplied identifier, unique within a request.
    pub id: String,
    /// Where the stop is.
    #[serde(flatten)]
    pub location: Coordinate,
    /// Optional human-readable address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Load picked up at this stop.
    #[serde(default)]
    pub demand: f64,
}

impl Stop {
    /// Create a stop with zero demand and no address.
    #[must_use]
    pub fn new(id: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id: id.into(),
            location,
            address: None,
            demand: 0.0,
        }
    }

    /// Set the stop's demand.
    #[must_use]
    pub const fn with_demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }

    /// Set the stop's address label.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// A class of identical vehicles.
///
/// # Examples
/// ```
/// use loadline_core::VehicleSpec;
///
/// let fleet = [VehicleSpec::new(1000.0, 2), VehicleSpec::new(500.0, 1)];
/// assert_eq!(VehicleSpec::fleet_size(&fleet), 3);
/// assert_eq!(VehicleSpec::capacity_of(&fleet, 1), Some(1000.0));
/// assert_eq!(VehicleSpec::capacity_of(&fleet, 2), Some(500.0));
/// assert_eq!(VehicleSpec::capacity_of(&fleet, 3), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSpec {
    /// Capacity of each vehicle in the class.
    pub capacity: f64,
    /// Number of vehicles in the class.
    pub count: u32,
}

impl VehicleSpec {
    /// Describe `count` vehicles of the given capacity.
    #[must_use]
    pub const fn new(capacity: f64, count: u32) -> Self {
        Self { capacity, count }
    }

    /// Number of fleet positions the class occupies.
    #[must_use]
    pub fn vehicle_count(&self) -> usize {
        usize::try_from(self.count).unwrap_or(usize::MAX)
    }

    /// Total number of vehicles across `specs`, saturating at `usize::MAX`.
    #[must_use]
    pub fn fleet_size(specs: &[Self]) -> usize {
        specs
            .iter()
            .fold(0_usize, |total, spec| total.saturating_add(spec.vehicle_count()))
    }

    /// Capacity of the vehicle at `vehicle_index` in the expanded fleet.
    ///
    /// Walks the classes in order without materialising one entry per vehicle.
    #[must_use]
    pub fn capacity_of(specs: &[Self], vehicle_index: usize) -> Option<f64> {
        let mut offset = vehicle_index;
        for spec in specs {
            match offset.checked_sub(spec.vehicle_count()) {
                Some(rest) => offset = rest,
                None => return Some(spec.capacity),
            }
        }
        None
    }
}

/// The stops one vehicle serves, as node indices into a distance matrix.
///
/// `visits` starts at the depot. Closed routes also end there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Position of the vehicle in the expanded fleet.
    pub vehicle_index: usize,
    /// Matrix indices in visiting order.
    pub visits: Vec<usize>,
    /// Total demand carried.
    pub load: f64,
    /// Sum of matrix entries along `visits`.
    pub distance_km: f64,
}

impl Route {
    /// Node indices visited between the depot legs.
    #[must_use]
    pub fn served(&self, depot: usize) -> impl Iterator<Item = usize> + '_ {
        self.visits.iter().copied().filter(move |&node| node != depot)
    }
}

/// Identifies the strategy that produced a [`SolveResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// The remote optimiser answered.
    External,
    /// The local capacity-constrained heuristic ran.
    LocalFallback,
    /// One unconstrained vehicle was sequenced by nearest neighbour.
    SingleVehicleNearestNeighbor,
}

impl SolverKind {
    /// Wire name of the solver.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::External => "external",
            Self::LocalFallback => "local_fallback",
            Self::SingleVehicleNearestNeighbor => "single_vehicle_nearest_neighbor",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routes produced for a problem plus the stops nobody could take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// One entry per vehicle that serves at least one stop.
    pub routes: Vec<Route>,
    /// Sum of route distances.
    pub total_distance_km: f64,
    /// Node indices left unserved.
    pub unassigned: Vec<usize>,
    /// Strategy that produced this result.
    pub solver: SolverKind,
}
