//! The routing strategy interface.

use thiserror::Error;

use crate::{Coordinate, DistanceMatrix, SolveResult, SolverKind, Stop, VehicleSpec};

/// A validated multi-vehicle routing problem.
///
/// Nodes follow the request layout: `0` is the origin (the depot), node
/// `i + 1` is `stops[i]`, and the last node is the destination. The matrix
/// covers all `stops.len() + 2` nodes.
///
/// # Examples
/// ```
/// use loadline_core::{Coordinate, DistanceMatrix, RoutingProblem, Stop, VehicleSpec};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let stops = vec![Stop::new("a", Coordinate::new(0.0, 1.0)).with_demand(3.0)];
/// let matrix = DistanceMatrix::from_coordinates(&[origin, stops[0].location, origin]);
/// let problem = RoutingProblem::new(origin, origin, stops, vec![VehicleSpec::new(5.0, 1)], matrix)?;
/// assert_eq!(problem.demands(), vec![0.0, 3.0]);
/// assert_eq!(problem.depot_matrix().len(), 2);
/// # Ok::<(), loadline_core::SolveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingProblem {
    origin: Coordinate,
    destination: Coordinate,
    stops: Vec<Stop>,
    vehicles: Vec<VehicleSpec>,
    matrix: DistanceMatrix,
}

impl RoutingProblem {
    /// Index of the depot node.
    pub const DEPOT: usize = 0;

    /// Assemble a problem, checking the matrix covers every node.
    ///
    /// # Errors
    /// Returns [`SolveError::InvalidProblem`] when the matrix size is not
    /// `stops.len() + 2`.
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        stops: Vec<Stop>,
        vehicles: Vec<VehicleSpec>,
        matrix: DistanceMatrix,
    ) -> Result<Self, SolveError> {
        let expected = stops.len() + 2;
        if matrix.len() != expected {
            return Err(SolveError::InvalidProblem {
                reason: format!(
                    "matrix covers {} nodes but the problem has {expected}",
                    matrix.len()
                ),
            });
        }
        Ok(Self {
            origin,
            destination,
            stops,
            vehicles,
            matrix,
        })
    }

    /// Start and end point of every vehicle.
    #[must_use]
    pub const fn origin(&self) -> Coordinate {
        self.origin
    }

    /// Requested destination.
    #[must_use]
    pub const fn destination(&self) -> Coordinate {
        self.destination
    }

    /// Stops to serve.
    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Fleet classes in the order vehicles are used.
    #[must_use]
    pub fn vehicles(&self) -> &[VehicleSpec] {
        &self.vehicles
    }

    /// Full matrix over origin, stops and destination.
    #[must_use]
    pub const fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Matrix over the depot and stops only.
    #[must_use]
    pub fn depot_matrix(&self) -> DistanceMatrix {
        self.matrix.truncated(self.stops.len() + 1)
    }

    /// Demand per depot-matrix node; the depot carries none.
    #[must_use]
    pub fn demands(&self) -> Vec<f64> {
        std::iter::once(0.0)
            .chain(self.stops.iter().map(|stop| stop.demand))
            .collect()
    }

    /// Depot-matrix node index of the stop with `id`.
    #[must_use]
    pub fn node_of(&self, id: &str) -> Option<usize> {
        self.stops
            .iter()
            .position(|stop| stop.id == id)
            .map(|idx| idx + 1)
    }
}

/// Errors returned by [`RouteSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The remote optimiser could not produce a usable answer.
    ///
    /// Covers unreachable hosts, timeouts, non-success statuses, malformed
    /// bodies and answers that break routing invariants. A fallback chain
    /// treats this as a signal to try the next strategy.
    #[error("external optimizer unavailable: {reason}")]
    ExternalUnavailable {
        /// What went wrong.
        reason: String,
    },
    /// The caller cancelled the solve.
    #[error("solve cancelled")]
    Cancelled,
    /// The problem violates a solver precondition.
    #[error("invalid problem: {reason}")]
    InvalidProblem {
        /// Which precondition failed.
        reason: String,
    },
}

impl SolveError {
    /// Build an [`SolveError::ExternalUnavailable`] from any message.
    #[must_use]
    pub fn external(reason: impl Into<String>) -> Self {
        Self::ExternalUnavailable {
            reason: reason.into(),
        }
    }

    /// Build an [`SolveError::InvalidProblem`] from any message.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidProblem {
            reason: reason.into(),
        }
    }
}

/// Assign and order stops across a fleet.
///
/// Implementations should return [`SolveError`] for failures rather than
/// panicking, and must be `Send + Sync` so one instance can serve concurrent
/// requests.
pub trait RouteSolver: Send + Sync {
    /// Which strategy this solver represents.
    fn kind(&self) -> SolverKind;

    /// Solve `problem`.
    ///
    /// Route visits are depot-matrix indices as described on
    /// [`RoutingProblem`].
    ///
    /// # Errors
    /// Returns [`SolveError`] when no result can be produced.
    fn solve(&self, problem: &RoutingProblem) -> Result<SolveResult, SolveError>;
}

impl<S: RouteSolver + ?Sized> RouteSolver for Box<S> {
    fn kind(&self) -> SolverKind {
        (**self).kind()
    }

    fn solve(&self, problem: &RoutingProblem) -> Result<SolveResult, SolveError> {
        (**self).solve(problem)
    }
}

impl<S: RouteSolver + ?Sized> RouteSolver for std::sync::Arc<S> {
    fn kind(&self) -> SolverKind {
        (**self).kind()
    }

    fn solve(&self, problem: &RoutingProblem) -> Result<SolveResult, SolveError> {
        (**self).solve(problem)
    }
}
