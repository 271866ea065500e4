#![expect(
    clippy::expect_used,
    reason = "regression tests use expect for readable failures"
)]

//! Golden route regression tests for the nearest-neighbour optimiser.
//!
//! Each fixture pins the exact visiting order, every rounded leg and the
//! rounded total for a real city set. Any change to the distance formula,
//! the rounding or the tie-break shows up here first.

use std::fs;
use std::path::PathBuf;

use rstest::rstest;
use serde::Deserialize;
use wayfare_core::{Location, LocationId, optimize_route, route_distances};

/// Deserialised golden route case.
#[derive(Debug, Deserialize)]
struct GoldenRoute {
    name: String,
    #[expect(dead_code, reason = "kept for documentation in JSON files")]
    description: String,
    start_id: u64,
    cities: Vec<Location>,
    expected: ExpectedRoute,
}

/// Expected optimiser output.
#[derive(Debug, Deserialize)]
struct ExpectedRoute {
    route: Vec<String>,
    distances: Vec<f64>,
    total_distance: f64,
}

fn load_golden_route(filename: &str) -> GoldenRoute {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden_routes/data")
        .join(filename);
    let content = fs::read_to_string(&path).expect("failed to read golden route file");
    serde_json::from_str(&content).expect("failed to parse golden route JSON")
}

/// Find the start among the fixture's cities or the shared catalogue.
fn start_of(golden: &GoldenRoute) -> Location {
    let id = LocationId::Numeric(golden.start_id);
    golden
        .cities
        .iter()
        .find(|city| city.id == id)
        .cloned()
        .or_else(|| {
            load_golden_route("thirteen_cities_from_paris.json")
                .cities
                .into_iter()
                .find(|city| city.id == id)
        })
        .expect("golden start id resolves to a city")
}

#[rstest]
#[case("five_capitals.json")]
#[case("core_cities_from_paris.json")]
#[case("thirteen_cities_from_paris.json")]
#[case("london_five_stops.json")]
fn optimiser_reproduces_golden_route(#[case] filename: &str) {
    let golden = load_golden_route(filename);
    let start = start_of(&golden);

    let optimized = optimize_route(&start, &golden.cities);

    assert_eq!(optimized.names(), golden.expected.route, "{}", golden.name);
    assert_eq!(optimized.distances, golden.expected.distances, "{}", golden.name);
    assert_eq!(
        optimized.total_distance, golden.expected.total_distance,
        "{}",
        golden.name
    );
}

#[rstest]
#[case("five_capitals.json")]
#[case("thirteen_cities_from_paris.json")]
fn remeasuring_golden_order_agrees(#[case] filename: &str) {
    let golden = load_golden_route(filename);
    let optimized = optimize_route(&start_of(&golden), &golden.cities);

    let measured = route_distances(&optimized.route);

    assert_eq!(measured.distances, optimized.distances);
    assert_eq!(measured.total_distance, optimized.total_distance);
}
