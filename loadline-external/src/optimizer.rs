//! Remote optimiser adapter.
//!
//! One POST per solve, no retries. Whatever goes wrong on the way, the
//! caller sees [`SolveError::ExternalUnavailable`] and the fallback chain
//! moves on to the local solver.

use std::collections::HashSet;
use std::time::Duration;

use loadline_core::{
    OptimizeRequest, Route, RouteSolver, RoutingProblem, SolveError, SolveResult, SolverKind,
    VehicleSpec,
};
use log::{debug, info};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::DEFAULT_USER_AGENT;
use crate::blocking::{BlockingClient, ClientBuildError};
use crate::wire::ExternalResponse;

/// Base URL used when none is configured.
pub const DEFAULT_OPTIMIZER_URL: &str = "http://localhost:8000";

const DEFAULT_ENDPOINT: &str = "/optimize";
const DEFAULT_TIMEOUT_MS: u64 = 3_000;

/// Configuration for [`ExternalOptimizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalOptimizerConfig {
    /// Scheme and authority of the optimiser, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Path appended to `base_url`.
    pub endpoint: String,
    /// Connect and total request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for ExternalOptimizerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPTIMIZER_URL.to_owned(),
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl ExternalOptimizerConfig {
    /// Create a configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the endpoint path.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    fn url(&self) -> Result<Url, ClientBuildError> {
        let joined = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        );
        Url::parse(&joined).map_err(|source| ClientBuildError::InvalidUrl {
            url: joined,
            source,
        })
    }
}

/// [`RouteSolver`] backed by a remote optimisation service.
///
/// The request body is an [`OptimizeRequest`] with the problem's full matrix
/// filled in and `return_to_origin` set. The answer is checked before it is
/// trusted: every stop id must be known and appear at most once, every
/// `vehicle_index` must exist in the expanded fleet, and no route may exceed
/// its vehicle's capacity. Distances and loads are then recomputed from the
/// local matrix. Stops the service leaves out are reported as unassigned.
///
/// # Examples
/// ```
/// use loadline_core::{RouteSolver, SolverKind};
/// use loadline_external::{ExternalOptimizer, ExternalOptimizerConfig};
///
/// let optimizer = ExternalOptimizer::with_config(ExternalOptimizerConfig::default())?;
/// assert_eq!(optimizer.kind(), SolverKind::External);
/// assert_eq!(optimizer.url().as_str(), "http://localhost:8000/optimize");
/// # Ok::<(), loadline_external::ClientBuildError>(())
/// ```
#[derive(Debug)]
pub struct ExternalOptimizer {
    client: BlockingClient,
    url: Url,
    cancellation: Option<CancellationToken>,
}

impl ExternalOptimizer {
    /// Create an optimiser client for `base_url` with default settings.
    ///
    /// # Errors
    /// Returns [`ClientBuildError`] when the URL is invalid or the HTTP client
    /// or runtime cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(ExternalOptimizerConfig::new(base_url))
    }

    /// Create an optimiser client from explicit configuration.
    ///
    /// # Errors
    /// Returns [`ClientBuildError`] when the URL is invalid or the HTTP client
    /// or runtime cannot be built.
    pub fn with_config(config: ExternalOptimizerConfig) -> Result<Self, ClientBuildError> {
        let url = config.url()?;
        let client = BlockingClient::new(config.timeout, &config.user_agent)?;
        Ok(Self {
            client,
            url,
            cancellation: None,
        })
    }

    /// Abort in-flight calls when `token` is cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Endpoint the optimiser posts to.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    async fn post(&self, body: &OptimizeRequest) -> Result<ExternalResponse, SolveError> {
        let response = self
            .client
            .client()
            .post(self.url.clone())
            .json(body)
            .send()
            .await
            .map_err(|err| describe(&err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SolveError::external(format!("HTTP {}", status.as_u16())));
        }
        let bytes = response.bytes().await.map_err(|err| describe(&err))?;
        serde_json::from_slice(&bytes)
            .map_err(|err| SolveError::external(format!("malformed response: {err}")))
    }

    async fn post_cancellable(
        &self,
        body: &OptimizeRequest,
    ) -> Result<ExternalResponse, SolveError> {
        let Some(token) = &self.cancellation else {
            return self.post(body).await;
        };
        tokio::select! {
            biased;
            () = token.cancelled() => Err(SolveError::Cancelled),
            result = self.post(body) => result,
        }
    }
}

fn describe(error: &reqwest::Error) -> SolveError {
    if error.is_timeout() {
        return SolveError::external(format!("timed out: {error}"));
    }
    if error.is_connect() {
        return SolveError::external(format!("connection failed: {error}"));
    }
    SolveError::external(error.to_string())
}

fn payload(problem: &RoutingProblem) -> OptimizeRequest {
    OptimizeRequest {
        origin: Some(problem.origin()),
        destination: Some(problem.destination()),
        stops: problem.stops().to_vec(),
        vehicles: problem.vehicles().to_vec(),
        distance_matrix: Some(problem.matrix().rows().to_vec()),
        return_to_origin: true,
    }
}

/// Check an optimiser answer against the problem and rebuild it locally.
fn accept(
    problem: &RoutingProblem,
    response: ExternalResponse,
) -> Result<SolveResult, SolveError> {
    let demands = problem.demands();
    let matrix = problem.depot_matrix();
    let mut seen_stops = HashSet::new();
    let mut seen_vehicles = HashSet::new();
    let mut routes = Vec::with_capacity(response.routes.len());

    for external in response.routes {
        let capacity = VehicleSpec::capacity_of(problem.vehicles(), external.vehicle_index)
            .ok_or_else(|| {
                SolveError::external(format!(
                    "vehicle_index {} outside a fleet of {}",
                    external.vehicle_index,
                    VehicleSpec::fleet_size(problem.vehicles())
                ))
            })?;
        if !seen_vehicles.insert(external.vehicle_index) {
            return Err(SolveError::external(format!(
                "vehicle_index {} used by more than one route",
                external.vehicle_index
            )));
        }
        if external.order.is_empty() {
            continue;
        }
        let mut visits = Vec::with_capacity(external.order.len() + 2);
        visits.push(RoutingProblem::DEPOT);
        for id in &external.order {
            let node = problem
                .node_of(id)
                .ok_or_else(|| SolveError::external(format!("unknown stop id `{id}`")))?;
            if !seen_stops.insert(node) {
                return Err(SolveError::external(format!(
                    "stop id `{id}` assigned more than once"
                )));
            }
            visits.push(node);
        }
        visits.push(RoutingProblem::DEPOT);

        let load: f64 = visits
            .iter()
            .filter_map(|&node| demands.get(node).copied())
            .sum();
        if load > capacity {
            return Err(SolveError::external(format!(
                "vehicle {} carries {load} over capacity {capacity}",
                external.vehicle_index
            )));
        }
        routes.push(Route {
            vehicle_index: external.vehicle_index,
            distance_km: matrix.path_length(&visits),
            visits,
            load,
        });
    }

    let unassigned: Vec<usize> = (1..=problem.stops().len())
        .filter(|node| !seen_stops.contains(node))
        .collect();
    if !unassigned.is_empty() {
        info!(
            "external optimizer left {} stops unassigned",
            unassigned.len()
        );
    }
    let total_distance_km = routes.iter().map(|route| route.distance_km).sum();
    Ok(SolveResult {
        routes,
        total_distance_km,
        unassigned,
        solver: SolverKind::External,
    })
}

impl RouteSolver for ExternalOptimizer {
    fn kind(&self) -> SolverKind {
        SolverKind::External
    }

    fn solve(&self, problem: &RoutingProblem) -> Result<SolveResult, SolveError> {
        debug!(
            "posting {} stops to external optimizer at {}",
            problem.stops().len(),
            self.url
        );
        let body = payload(problem);
        let response = self.client.block_on(self.post_cancellable(&body))?;
        accept(problem, response)
    }
}
