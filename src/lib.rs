//! Facade crate for the Loadline route and load optimisation engine.
//!
//! This crate re-exports the core domain types and the local planner, and
//! exposes the HTTP collaborators and the load matcher behind feature flags.

#![forbid(unsafe_code)]

pub use loadline_core::{
    CancellationPolicy, Coordinate, DistanceError, DistanceMatrix, DistanceProvider,
    FallbackChain, HaversineProvider, MatrixError, OptimizeRequest, OptimizeResponse,
    RequestValidationError, Route, RouteSolver, RouteSummary, RoutingProblem, SolveError,
    SolveResult, SolverKind, Stop, VehicleSpec, haversine_km,
};
pub use loadline_solver::{CapacitySolver, PlanError, Planner, PlannerConfig};

#[cfg(feature = "external")]
pub use loadline_external::{
    ClientBuildError, ExternalOptimizer, ExternalOptimizerConfig, OsrmDistanceProvider,
    OsrmProviderConfig,
};

#[cfg(feature = "matching")]
pub use loadline_matching::{
    ChainError, ChainPlan, ChainRequest, LoadMatcher, MatchConfig, MatchError, MatchReport,
    MatchRequest, Transporter, match_shipments, plan_chains,
};
