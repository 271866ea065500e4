#![expect(
    clippy::expect_used,
    clippy::indexing_slicing,
    reason = "behaviour steps fail loudly on missing state"
)]

//! Behavioural tests for `FallbackPlanner`.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use wayfare_core::test_support::{StubRoutePlanner, sample_cities};
use wayfare_core::{
    FallbackPlanner, Location, PlanError, PlanMethod, PlanRequest, PlannedRoute, RoutePlanner,
};

/// World state for fallback scenarios.
#[derive(Default)]
struct PlannerWorld {
    planner: RefCell<Option<FallbackPlanner<StubRoutePlanner>>>,
    result: RefCell<Option<Result<PlannedRoute, PlanError>>>,
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

fn plan(world: &PlannerWorld, request: &PlanRequest) {
    let borrowed = world.planner.borrow();
    let planner = borrowed.as_ref().expect("a planner should be configured");
    world.result.replace(Some(planner.plan(request)));
}

fn with_route<T>(world: &PlannerWorld, check: impl FnOnce(&PlannedRoute) -> T) -> T {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("planning should have run");
    check(result.as_ref().expect("planning should succeed"))
}

#[given("a backend planner that is unavailable")]
fn given_unavailable(world: &PlannerWorld) {
    let stub = StubRoutePlanner::with_error(PlanError::Unavailable {
        message: "connection refused".into(),
    });
    world.planner.replace(Some(FallbackPlanner::new(stub)));
}

#[given("a backend planner that answers in input order without distances")]
fn given_incomplete(world: &PlannerWorld) {
    let stub = StubRoutePlanner::with_route(PlannedRoute {
        route: sample_cities(),
        distances: Vec::new(),
        total_distance: 0.0,
        optimized: true,
        method: PlanMethod::Backend("remote".into()),
    });
    world.planner.replace(Some(FallbackPlanner::new(stub)));
}

#[when("I plan a route from Paris over the sample capitals")]
fn when_plan_from_paris(world: &PlannerWorld) {
    let cities = sample_cities();
    let request = PlanRequest {
        starting_city: cities[0].clone(),
        cities,
    };
    plan(world, &request);
}

#[when("I plan a route from a blank starting city")]
fn when_plan_blank(world: &PlannerWorld) {
    let request = PlanRequest {
        starting_city: Location::without_coordinates(0, ""),
        cities: sample_cities(),
    };
    plan(world, &request);
}

#[then("the plan method is {label}")]
fn then_method(world: &PlannerWorld, label: String) {
    with_route(world, |route| assert_eq!(route.method.to_string(), label));
}

#[then("the route order is {names}")]
fn then_order(world: &PlannerWorld, names: String) {
    let expected: Vec<&str> = names.split(',').map(str::trim).collect();
    with_route(world, |route| assert_eq!(route.names(), expected));
}

#[then("the distances are {values}")]
fn then_distances(world: &PlannerWorld, values: String) {
    let expected: Vec<f64> = values
        .split(',')
        .map(|value| value.trim().parse().expect("numeric distance"))
        .collect();
    with_route(world, |route| assert_eq!(route.distances, expected));
}

#[then("planning fails because the request is empty")]
fn then_empty_request(world: &PlannerWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("planning should have run");
    assert_eq!(result.as_ref().err(), Some(&PlanError::EmptyRequest));
}

#[scenario(path = "tests/features/fallback_planner.feature", index = 0)]
fn backend_unavailable(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fallback_planner.feature", index = 1)]
fn backend_without_distances(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/fallback_planner.feature", index = 2)]
fn blank_starting_city(world: PlannerWorld) {
    let _ = world;
}
