//! Behavioural tests for [`ExternalOptimizer`] behind the planner.
//!
//! A local stub server plays the optimiser so every failure mode can be
//! exercised without a real service.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use loadline_core::test_support::stop;
use loadline_core::{Coordinate, OptimizeRequest, OptimizeResponse, VehicleSpec};
use loadline_external::{ExternalOptimizer, ExternalOptimizerConfig};
use loadline_solver::{PlanError, Planner};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

mod support;

use support::{Reply, StubServer, closed_base_url};

const TIMEOUT: Duration = Duration::from_millis(400);

#[derive(Debug, Default)]
struct OptimizerWorld {
    request: RefCell<OptimizeRequest>,
    server: RefCell<Option<StubServer>>,
    base_url: RefCell<String>,
    outcome: RefCell<Option<Result<OptimizeResponse, PlanError>>>,
    elapsed: RefCell<Duration>,
}

impl OptimizerWorld {
    fn serve(&self, reply: Reply) {
        let server = StubServer::start(reply);
        self.base_url.replace(server.base_url());
        self.server.replace(Some(server));
    }

    fn serve_json(&self, status: u16, body: &str) {
        self.serve(Reply::Json {
            status,
            body: body.to_owned(),
        });
    }

    fn response(&self) -> OptimizeResponse {
        let outcome = self.outcome.borrow();
        match outcome.as_ref().expect("request should be planned first") {
            Ok(response) => response.clone(),
            Err(err) => panic!("planning failed: {err}"),
        }
    }
}

#[fixture]
fn world() -> OptimizerWorld {
    OptimizerWorld::default()
}

#[given("a request for three stops shared by two vehicles")]
fn request(world: &OptimizerWorld) {
    let chennai = Coordinate::new(13.0827, 80.2707);
    world.request.replace(OptimizeRequest {
        origin: Some(chennai),
        destination: Some(chennai),
        stops: vec![
            stop("a", 13.20, 80.30, 400.0),
            stop("b", 12.90, 80.10, 400.0),
            stop("c", 13.00, 79.90, 400.0),
        ],
        vehicles: vec![VehicleSpec::new(1000.0, 2)],
        distance_matrix: None,
        return_to_origin: true,
    });
}

#[given("the optimiser answers with a valid plan")]
fn valid_plan(world: &OptimizerWorld) {
    world.serve_json(
        200,
        r#"{"solver": "external", "routes": [
            {"vehicle_index": 0, "order": ["b", "a"], "distance_km": 1.0, "load": 800},
            {"vehicle_index": 1, "order": ["c"], "distance_km": 1.0, "load": 400}
        ], "total_distance_km": 2.0, "unassigned_stops": []}"#,
    );
}

#[given("the optimiser answers with a server error")]
fn server_error(world: &OptimizerWorld) {
    world.serve_json(500, r#"{"detail": "solver crashed"}"#);
}

#[given("the optimiser answers with malformed JSON")]
fn malformed(world: &OptimizerWorld) {
    world.serve_json(200, r#"{"routes": [{"vehicle_index": "zero""#);
}

#[given("the optimiser answers with an overloaded plan")]
fn overloaded(world: &OptimizerWorld) {
    world.serve_json(
        200,
        r#"{"routes": [{"vehicle_index": 0, "order": ["a", "b", "c"]}]}"#,
    );
}

#[given("the optimiser never answers")]
fn silent(world: &OptimizerWorld) {
    world.serve(Reply::Silent(Duration::from_secs(5)));
}

#[given("no optimiser is listening")]
fn unreachable(world: &OptimizerWorld) {
    world.base_url.replace(closed_base_url());
}

#[when("the request is planned")]
fn plan(world: &OptimizerWorld) {
    let config =
        ExternalOptimizerConfig::new(world.base_url.borrow().clone()).with_timeout(TIMEOUT);
    let optimizer = ExternalOptimizer::with_config(config).expect("optimizer should build");
    let planner = Planner::default().with_external(optimizer);
    let started = Instant::now();
    let outcome = planner.plan(&world.request.borrow());
    world.elapsed.replace(started.elapsed());
    world.outcome.replace(Some(outcome));
}

#[then("the response solver is {kind:word}")]
fn solver_is(world: &OptimizerWorld, kind: String) {
    assert_eq!(world.response().solver.as_str(), kind);
}

#[then("every stop is routed")]
fn every_stop_routed(world: &OptimizerWorld) {
    let response = world.response();
    assert!(response.unassigned_stops.is_empty());
    let mut routed: Vec<String> = response
        .routes
        .iter()
        .flat_map(|route| route.order.iter().cloned())
        .collect();
    routed.sort();
    assert_eq!(routed, vec!["a", "b", "c"]);
}

#[then("the optimiser received the full distance matrix")]
fn received_matrix(world: &OptimizerWorld) {
    let server = world.server.borrow();
    let bodies = server.as_ref().expect("stub server running").bodies();
    assert_eq!(bodies.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&bodies[0]).expect("JSON request body");
    assert_eq!(body["return_to_origin"], true);
    let rows = body["distance_matrix"].as_array().expect("matrix rows");
    assert_eq!(rows.len(), 5);
    assert_eq!(body["stops"][0]["id"], "a");
}

#[then("planning finished within two seconds")]
fn finished_quickly(world: &OptimizerWorld) {
    let elapsed = *world.elapsed.borrow();
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
}

#[scenario(path = "tests/features/external_optimizer.feature", index = 0)]
fn valid_plan_is_used(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/external_optimizer.feature", index = 1)]
fn server_error_falls_back(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/external_optimizer.feature", index = 2)]
fn malformed_body_falls_back(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/external_optimizer.feature", index = 3)]
fn overloaded_plan_is_discarded(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/external_optimizer.feature", index = 4)]
fn silent_optimizer_times_out(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/external_optimizer.feature", index = 5)]
fn unreachable_optimizer_falls_back(world: OptimizerWorld) {
    let _ = world;
}
