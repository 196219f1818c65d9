//! Behavioural tests for optimisation request validation.

use std::cell::RefCell;

use loadline_core::test_support::stop;
use loadline_core::{Coordinate, OptimizeRequest, RequestValidationError, VehicleSpec};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Default)]
struct ValidationWorld {
    request: RefCell<OptimizeRequest>,
    outcome: RefCell<Option<Result<(), RequestValidationError>>>,
}

impl ValidationWorld {
    fn outcome(&self) -> Result<(), RequestValidationError> {
        self.outcome
            .borrow()
            .clone()
            .expect("validation should run before assertions")
    }
}

#[fixture]
fn world() -> ValidationWorld {
    ValidationWorld::default()
}

#[given("a request with two stops and one vehicle")]
fn complete_request(world: &ValidationWorld) {
    world.request.replace(OptimizeRequest {
        origin: Some(Coordinate::new(13.0827, 80.2707)),
        destination: Some(Coordinate::new(13.0827, 80.2707)),
        stops: vec![
            stop("blr", 12.9716, 77.5946, 400.0),
            stop("hyd", 17.3850, 78.4867, 300.0),
        ],
        vehicles: vec![VehicleSpec::new(1000.0, 1)],
        distance_matrix: None,
        return_to_origin: true,
    });
}

#[given("the origin is missing")]
fn origin_missing(world: &ValidationWorld) {
    world.request.borrow_mut().origin = None;
}

#[given("the vehicle capacity is zero")]
fn zero_capacity(world: &ValidationWorld) {
    if let Some(vehicle) = world.request.borrow_mut().vehicles.first_mut() {
        vehicle.capacity = 0.0;
    }
}

#[when("the request is validated")]
fn validate(world: &ValidationWorld) {
    let outcome = world.request.borrow().validate();
    world.outcome.replace(Some(outcome));
}

#[then("the request is accepted")]
fn accepted(world: &ValidationWorld) {
    assert_eq!(world.outcome(), Ok(()));
}

#[then("the request is rejected because the origin is missing")]
fn rejected_missing_origin(world: &ValidationWorld) {
    assert_eq!(world.outcome(), Err(RequestValidationError::MissingOrigin));
}

#[then("the request is rejected for non-positive capacity")]
fn rejected_capacity(world: &ValidationWorld) {
    assert!(matches!(
        world.outcome(),
        Err(RequestValidationError::NonPositiveCapacity { index: 0, .. })
    ));
}

#[scenario(path = "tests/features/request_validation.feature", index = 0)]
fn complete_request_accepted(world: ValidationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_validation.feature", index = 1)]
fn missing_origin_rejected(world: ValidationWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/request_validation.feature", index = 2)]
fn zero_capacity_rejected(world: ValidationWorld) {
    let _ = world;
}
