//! Deterministic fixtures shared by unit, behaviour and downstream tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    Coordinate, DistanceError, DistanceMatrix, DistanceProvider, Route, RouteSolver,
    RoutingProblem, SolveError, SolveResult, SolverKind, Stop, VehicleSpec,
};

/// Build a stop with the given id, position and demand.
#[must_use]
pub fn stop(id: &str, lat: f64, lng: f64, demand: f64) -> Stop {
    Stop::new(id, Coordinate::new(lat, lng)).with_demand(demand)
}

/// A one-stop problem at the equator, served by one small vehicle.
#[must_use]
pub fn single_stop_problem() -> RoutingProblem {
    problem_for(
        Coordinate::new(0.0, 0.0),
        vec![stop("only", 0.0, 0.1, 1.0)],
        vec![VehicleSpec::new(10.0, 1)],
    )
}

/// Build a great-circle problem returning to `origin`.
///
/// # Panics
/// Does not panic: the matrix is built from the problem's own nodes.
#[must_use]
#[expect(clippy::expect_used, reason = "fixture matrix always matches node count")]
pub fn problem_for(origin: Coordinate, stops: Vec<Stop>, vehicles: Vec<VehicleSpec>) -> RoutingProblem {
    let mut points = vec![origin];
    points.extend(stops.iter().map(|s| s.location));
    points.push(origin);
    let matrix = DistanceMatrix::from_coordinates(&points);
    RoutingProblem::new(origin, origin, stops, vehicles, matrix).expect("fixture problem is valid")
}

/// Solver returning a canned outcome and counting calls.
#[derive(Debug)]
pub struct StubSolver {
    kind: SolverKind,
    outcome: Result<(), SolveError>,
    calls: AtomicUsize,
}

impl StubSolver {
    /// A solver that serves every stop with vehicle 0 in input order.
    #[must_use]
    pub const fn succeeding(kind: SolverKind) -> Self {
        Self {
            kind,
            outcome: Ok(()),
            calls: AtomicUsize::new(0),
        }
    }

    /// A solver that always fails with `error`.
    #[must_use]
    pub const fn failing(kind: SolverKind, error: SolveError) -> Self {
        Self {
            kind,
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times [`RouteSolver::solve`] was invoked.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteSolver for StubSolver {
    fn kind(&self) -> SolverKind {
        self.kind
    }

    fn solve(&self, problem: &RoutingProblem) -> Result<SolveResult, SolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()?;
        let matrix = problem.depot_matrix();
        let mut visits = vec![RoutingProblem::DEPOT];
        visits.extend(1..=problem.stops().len());
        visits.push(RoutingProblem::DEPOT);
        let distance_km = matrix.path_length(&visits);
        let load = problem.demands().iter().sum();
        Ok(SolveResult {
            routes: vec![Route {
                vehicle_index: 0,
                visits,
                load,
                distance_km,
            }],
            total_distance_km: distance_km,
            unassigned: Vec::new(),
            solver: self.kind,
        })
    }
}

/// Provider returning a fixed matrix or a fixed error.
#[derive(Debug, Clone)]
pub struct FixedMatrixProvider {
    outcome: Result<DistanceMatrix, DistanceError>,
}

impl FixedMatrixProvider {
    /// Always return `matrix`.
    #[must_use]
    pub const fn with_matrix(matrix: DistanceMatrix) -> Self {
        Self { outcome: Ok(matrix) }
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn with_error(error: DistanceError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl DistanceProvider for FixedMatrixProvider {
    fn distance_matrix(&self, points: &[Coordinate]) -> Result<DistanceMatrix, DistanceError> {
        if points.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        self.outcome.clone()
    }
}
