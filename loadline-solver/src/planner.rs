//! End-to-end handling of an optimisation request.
//!
//! The planner validates the request, obtains a distance matrix over
//! `[origin, stops…, destination]`, picks a solving mode and maps the result
//! back to stop identifiers.
//!
//! One vehicle whose capacity covers every demand is sequenced directly by
//! nearest neighbour. Everything else goes through a [`FallbackChain`] of the
//! external optimiser, when one is configured, followed by [`CapacitySolver`].

use std::sync::Arc;

use loadline_core::{
    CancellationPolicy, DistanceError, DistanceMatrix, DistanceProvider, FallbackChain,
    HaversineProvider, MatrixError, OptimizeRequest, OptimizeResponse, RequestValidationError,
    Route, RouteSolver, RoutingProblem, SolveError, SolveResult, SolverKind, VehicleSpec,
    estimated_time_hours, savings_from_distances,
};
use log::{debug, info};
use thiserror::Error;

use crate::{CapacitySolver, SequenceError, sequence, sequence_to};

/// Default speed used for time estimates.
const DEFAULT_AVERAGE_SPEED_KMH: f64 = 50.0;

/// Tunables for [`Planner`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerConfig {
    /// Speed used to turn total distance into `estimated_time_hours`.
    pub average_speed_kmh: f64,
    /// How the fallback chain treats a cancelled external call.
    pub cancellation: CancellationPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            cancellation: CancellationPolicy::default(),
        }
    }
}

impl PlannerConfig {
    /// Override the average speed.
    #[must_use]
    pub const fn with_average_speed_kmh(mut self, speed: f64) -> Self {
        self.average_speed_kmh = speed;
        self
    }

    /// Override the cancellation policy.
    #[must_use]
    pub const fn with_cancellation(mut self, policy: CancellationPolicy) -> Self {
        self.cancellation = policy;
        self
    }
}

/// Errors returned by [`Planner::plan`].
#[derive(Debug, Error)]
pub enum PlanError {
    /// The request failed boundary validation.
    #[error(transparent)]
    Validation(#[from] RequestValidationError),
    /// A supplied matrix was malformed.
    #[error("invalid distance matrix: {0}")]
    Matrix(#[from] MatrixError),
    /// The distance provider failed.
    #[error("distance lookup failed: {0}")]
    Distance(#[from] DistanceError),
    /// Single-vehicle sequencing failed.
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    /// Every routing strategy failed.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl PlanError {
    /// Return `true` when the caller sent a bad request.
    ///
    /// Everything else is a failure on the engine's side of the boundary.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Orchestrates validation, distance lookup, solving and response mapping.
///
/// # Examples
/// ```
/// use loadline_core::{OptimizeRequest, SolverKind};
/// use loadline_solver::Planner;
///
/// let request: OptimizeRequest = serde_json::from_str(r#"{
///     "origin": {"lat": 13.0827, "lng": 80.2707},
///     "destination": {"lat": 13.0827, "lng": 80.2707},
///     "stops": [
///         {"id": "hyd", "lat": 17.3850, "lng": 78.4867},
///         {"id": "blr", "lat": 12.9716, "lng": 77.5946}
///     ],
///     "vehicles": [{"capacity": 1000, "count": 1}],
///     "return_to_origin": true
/// }"#)?;
/// let response = Planner::default().plan(&request)?;
/// assert_eq!(response.solver, SolverKind::SingleVehicleNearestNeighbor);
/// assert_eq!(response.routes[0].order, vec!["blr", "hyd"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Planner {
    config: PlannerConfig,
    provider: Box<dyn DistanceProvider>,
    external: Option<Arc<dyn RouteSolver>>,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl std::fmt::Debug for Planner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Planner")
            .field("config", &self.config)
            .field("external", &self.external.as_ref().map(|s| s.kind()))
            .finish_non_exhaustive()
    }
}

impl Planner {
    /// Create a planner using great-circle distances and no external solver.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            provider: Box::new(HaversineProvider),
            external: None,
        }
    }

    /// Use `provider` for requests that carry no matrix.
    #[must_use]
    pub fn with_provider(mut self, provider: impl DistanceProvider + 'static) -> Self {
        self.provider = Box::new(provider);
        self
    }

    /// Try `solver` before the local capacity solver.
    #[must_use]
    pub fn with_external(mut self, solver: impl RouteSolver + 'static) -> Self {
        self.external = Some(Arc::new(solver));
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Solve `request` and describe the result with stop identifiers.
    ///
    /// # Errors
    /// Returns [`PlanError::Validation`] for a bad request and another
    /// [`PlanError`] variant when distances cannot be obtained or every
    /// routing strategy fails.
    pub fn plan(&self, request: &OptimizeRequest) -> Result<OptimizeResponse, PlanError> {
        request.validate()?;
        let matrix = self.matrix_for(request)?;

        let sole_capacity = (VehicleSpec::fleet_size(&request.vehicles) == 1)
            .then(|| VehicleSpec::capacity_of(&request.vehicles, 0))
            .flatten();
        let (result, savings) = match sole_capacity {
            Some(capacity) if request.total_demand() <= capacity => {
                debug!("single vehicle covers all demand; sequencing directly");
                let (result, original) = single_vehicle(request, &matrix)?;
                let savings = savings_from_distances(original, result.total_distance_km);
                (result, Some(savings))
            }
            _ => (self.fleet(request, matrix)?, None),
        };

        if !result.unassigned.is_empty() {
            info!(
                "{} of {} stops unassigned by {}",
                result.unassigned.len(),
                request.stops.len(),
                result.solver
            );
        }
        let hours = estimated_time_hours(result.total_distance_km, self.config.average_speed_kmh);
        Ok(OptimizeResponse::from_result(&result, &request.stops)
            .with_savings(savings)
            .with_estimated_time(hours))
    }

    fn matrix_for(&self, request: &OptimizeRequest) -> Result<DistanceMatrix, PlanError> {
        if let Some(rows) = &request.distance_matrix {
            return Ok(DistanceMatrix::try_from_rows(rows.clone())?);
        }
        let nodes = request
            .nodes()
            .ok_or(RequestValidationError::MissingOrigin)?;
        Ok(self.provider.distance_matrix(&nodes)?)
    }

    fn fleet(
        &self,
        request: &OptimizeRequest,
        matrix: DistanceMatrix,
    ) -> Result<SolveResult, PlanError> {
        let (Some(origin), Some(destination)) = (request.origin, request.destination) else {
            return Err(RequestValidationError::MissingOrigin.into());
        };
        let problem = RoutingProblem::new(
            origin,
            destination,
            request.stops.clone(),
            request.vehicles.clone(),
            matrix,
        )?;
        Ok(self.chain().solve(&problem)?)
    }

    fn chain(&self) -> FallbackChain {
        let mut chain = FallbackChain::new().with_policy(self.config.cancellation);
        if let Some(external) = &self.external {
            chain.push(Box::new(Arc::clone(external)));
        }
        chain.with_strategy(CapacitySolver)
    }
}

/// Sequence one vehicle; also returns the request-order distance.
fn single_vehicle(
    request: &OptimizeRequest,
    matrix: &DistanceMatrix,
) -> Result<(SolveResult, f64), PlanError> {
    let stop_count = request.stops.len();
    let (tour, end) = if request.return_to_origin {
        let tour = sequence(&matrix.truncated(stop_count + 1), RoutingProblem::DEPOT, true)?;
        (tour, RoutingProblem::DEPOT)
    } else {
        let end = request.destination_index();
        (sequence_to(matrix, RoutingProblem::DEPOT, end)?, end)
    };
    let original: Vec<usize> = (0..=stop_count).chain(std::iter::once(end)).collect();
    let original_km = matrix.path_length(&original);

    let route = Route {
        vehicle_index: 0,
        visits: tour.order,
        load: request.total_demand(),
        distance_km: tour.total_distance_km,
    };
    let result = SolveResult {
        total_distance_km: route.distance_km,
        routes: vec![route],
        unassigned: Vec::new(),
        solver: SolverKind::SingleVehicleNearestNeighbor,
    };
    Ok((result, original_km))
}
