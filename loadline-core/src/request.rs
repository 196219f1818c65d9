//! Optimisation requests and their boundary validation.
//!
//! Every check that can reject a request runs here, before a matrix is built
//! or a solver is chosen. Solvers downstream assume a validated request.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coordinate, Stop, VehicleSpec};

/// A route optimisation call.
///
/// Missing `origin` or `destination` deserialise to `None` so validation can
/// report them precisely instead of failing inside the decoder.
///
/// # Examples
/// ```
/// use loadline_core::OptimizeRequest;
///
/// let request: OptimizeRequest = serde_json::from_str(r#"{
///     "origin": {"lat": 13.0827, "lng": 80.2707},
///     "destination": {"lat": 13.0827, "lng": 80.2707},
///     "stops": [{"id": "blr", "lat": 12.9716, "lng": 77.5946, "demand": 400}],
///     "vehicles": [{"capacity": 1000, "count": 1}]
/// }"#)?;
/// assert!(request.validate().is_ok());
/// assert_eq!(request.node_count(), 3);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OptimizeRequest {
    /// Where every vehicle starts.
    #[serde(default)]
    pub origin: Option<Coordinate>,
    /// Where a single open route ends.
    #[serde(default)]
    pub destination: Option<Coordinate>,
    /// Intermediate stops to visit.
    #[serde(default)]
    pub stops: Vec<Stop>,
    /// Available fleet.
    #[serde(default)]
    pub vehicles: Vec<VehicleSpec>,
    /// Precomputed matrix over `[origin, stops…, destination]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_matrix: Option<Vec<Vec<f64>>>,
    /// Close every route back at the origin.
    #[serde(default)]
    pub return_to_origin: bool,
}

/// Reasons a request is rejected before solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestValidationError {
    /// The request has no origin.
    #[error("origin is required")]
    MissingOrigin,
    /// The request has no destination.
    #[error("destination is required")]
    MissingDestination,
    /// A coordinate was non-finite or outside WGS84 bounds.
    #[error("{field} has invalid coordinate ({lat}, {lng})")]
    InvalidCoordinate {
        /// Which coordinate failed, e.g. `origin` or `stops[2]`.
        field: String,
        /// Rejected latitude.
        lat: f64,
        /// Rejected longitude.
        lng: f64,
    },
    /// No stops were supplied.
    #[error("at least one stop is required")]
    EmptyStops,
    /// A stop had an empty identifier.
    #[error("stop at position {index} has an empty id")]
    EmptyStopId {
        /// Position of the stop in the request.
        index: usize,
    },
    /// Two stops shared an identifier.
    #[error("stop id `{id}` appears more than once")]
    DuplicateStopId {
        /// The repeated identifier.
        id: String,
    },
    /// A stop's demand was negative or non-finite.
    #[error("stop `{id}` has invalid demand {demand}")]
    InvalidDemand {
        /// Identifier of the offending stop.
        id: String,
        /// Rejected demand.
        demand: f64,
    },
    /// No vehicle classes were supplied.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// A vehicle class had a zero, negative or non-finite capacity.
    #[error("vehicle class {index} has non-positive capacity {capacity}")]
    NonPositiveCapacity {
        /// Position of the vehicle class.
        index: usize,
        /// Rejected capacity.
        capacity: f64,
    },
    /// A vehicle class had a zero count.
    #[error("vehicle class {index} has zero count")]
    ZeroVehicleCount {
        /// Position of the vehicle class.
        index: usize,
    },
    /// A supplied matrix did not cover `[origin, stops…, destination]`.
    #[error("distance matrix must be {expected}x{expected} but has {rows} rows")]
    MatrixSize {
        /// Required dimension.
        expected: usize,
        /// Rows supplied.
        rows: usize,
    },
}

impl OptimizeRequest {
    /// Number of matrix nodes: origin, each stop, then destination.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        self.stops.len() + 2
    }

    /// Matrix index of the destination node.
    #[must_use]
    pub const fn destination_index(&self) -> usize {
        self.stops.len() + 1
    }

    /// Coordinates in matrix order, or `None` when origin or destination is
    /// missing.
    #[must_use]
    pub fn nodes(&self) -> Option<Vec<Coordinate>> {
        let origin = self.origin?;
        let destination = self.destination?;
        let mut nodes = Vec::with_capacity(self.node_count());
        nodes.push(origin);
        nodes.extend(self.stops.iter().map(|stop| stop.location));
        nodes.push(destination);
        Some(nodes)
    }

    /// Total demand over all stops.
    #[must_use]
    pub fn total_demand(&self) -> f64 {
        self.stops.iter().map(|stop| stop.demand).sum()
    }

    /// Check the request against every boundary rule.
    ///
    /// # Errors
    /// Returns the first [`RequestValidationError`] encountered.
    pub fn validate(&self) -> Result<(), RequestValidationError> {
        let origin = self.origin.ok_or(RequestValidationError::MissingOrigin)?;
        let destination = self
            .destination
            .ok_or(RequestValidationError::MissingDestination)?;
        check_coordinate("origin", origin)?;
        check_coordinate("destination", destination)?;
        self.validate_stops()?;
        self.validate_vehicles()?;
        self.validate_matrix_size()
    }

    fn validate_stops(&self) -> Result<(), RequestValidationError> {
        if self.stops.is_empty() {
            return Err(RequestValidationError::EmptyStops);
        }
        let mut seen = HashSet::with_capacity(self.stops.len());
        for (index, stop) in self.stops.iter().enumerate() {
            if stop.id.is_empty() {
                return Err(RequestValidationError::EmptyStopId { index });
            }
            if !seen.insert(stop.id.as_str()) {
                return Err(RequestValidationError::DuplicateStopId {
                    id: stop.id.clone(),
                });
            }
            check_coordinate(&format!("stops[{index}]"), stop.location)?;
            if !stop.demand.is_finite() || stop.demand < 0.0 {
                return Err(RequestValidationError::InvalidDemand {
                    id: stop.id.clone(),
                    demand: stop.demand,
                });
            }
        }
        Ok(())
    }

    fn validate_vehicles(&self) -> Result<(), RequestValidationError> {
        if self.vehicles.is_empty() {
            return Err(RequestValidationError::NoVehicles);
        }
        for (index, vehicle) in self.vehicles.iter().enumerate() {
            if !vehicle.capacity.is_finite() || vehicle.capacity <= 0.0 {
                return Err(RequestValidationError::NonPositiveCapacity {
                    index,
                    capacity: vehicle.capacity,
                });
            }
            if vehicle.count == 0 {
                return Err(RequestValidationError::ZeroVehicleCount { index });
            }
        }
        Ok(())
    }

    fn validate_matrix_size(&self) -> Result<(), RequestValidationError> {
        let Some(rows) = &self.distance_matrix else {
            return Ok(());
        };
        let expected = self.node_count();
        if rows.len() != expected {
            return Err(RequestValidationError::MatrixSize {
                expected,
                rows: rows.len(),
            });
        }
        Ok(())
    }
}

fn check_coordinate(field: &str, coordinate: Coordinate) -> Result<(), RequestValidationError> {
    if coordinate.is_valid() {
        Ok(())
    } else {
        Err(RequestValidationError::InvalidCoordinate {
            field: field.to_owned(),
            lat: coordinate.lat,
            lng: coordinate.lng,
        })
    }
}
