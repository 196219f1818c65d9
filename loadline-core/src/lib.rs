//! Core domain types for the Loadline route and load engine.
//!
//! This crate holds everything the solvers share: coordinates and
//! great-circle distances, distance matrices and the providers that build
//! them, the optimisation request and response wire types, the savings
//! estimator, and the [`RouteSolver`] strategy interface with its
//! [`FallbackChain`].
//!
//! Nothing here performs I/O. Road-network providers and the remote
//! optimiser adapter live in `loadline-external`.

#![forbid(unsafe_code)]

mod coordinate;
mod distance;
mod matrix;
mod model;
pub mod provider;
mod request;
mod response;
mod savings;
mod solver;
mod strategy;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use coordinate::Coordinate;
pub use distance::{EARTH_RADIUS_KM, haversine_km, path_length_km};
pub use matrix::{DistanceMatrix, MatrixError};
pub use model::{Route, SolveResult, SolverKind, Stop, VehicleSpec};
pub use provider::{DistanceError, DistanceProvider, HaversineProvider};
pub use request::{OptimizeRequest, RequestValidationError};
pub use response::{OptimizeResponse, RouteSummary, round_tenth};
pub use savings::{estimated_time_hours, savings_from_distances, savings_percentage};
pub use solver::{RouteSolver, RoutingProblem, SolveError};
pub use strategy::{CancellationPolicy, FallbackChain};
