#![expect(
    clippy::expect_used,
    clippy::indexing_slicing,
    reason = "property tests index generated routes and fail loudly"
)]

//! Property-based tests for the distance engine and the route optimiser.
//!
//! # Invariants tested
//!
//! - **Symmetry:** `haversine_distance(a, b) == haversine_distance(b, a)`.
//! - **Identity:** a point is zero kilometres from itself.
//! - **Completeness:** the route holds the start plus every other input once.
//! - **Segment count:** one distance per consecutive pair.
//! - **Total consistency:** the total is the rounded sum of the legs.
//! - **Greedy choice:** no later stop was nearer than the one chosen.
//! - **Determinism:** identical input gives identical output.


use geo::Coord;
use proptest::prelude::*;
use wayfare_core::distance::round_km;
use wayfare_core::{Location, haversine_distance, optimize_route, route_distances};

use proptest_support::{city_set_strategy, coordinate_strategy, sorted_ids};

fn coord((latitude, longitude): (f64, f64)) -> Coord<f64> {
    Coord {
        x: longitude,
        y: latitude,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn haversine_is_symmetric(a in coordinate_strategy(), b in coordinate_strategy()) {
        prop_assert_eq!(
            haversine_distance(coord(a), coord(b)),
            haversine_distance(coord(b), coord(a))
        );
    }

    #[test]
    fn haversine_identity_is_zero(a in coordinate_strategy()) {
        prop_assert_eq!(haversine_distance(coord(a), coord(a)), 0.0);
    }

    #[test]
    fn haversine_is_non_negative_and_bounded(a in coordinate_strategy(), b in coordinate_strategy()) {
        let distance = haversine_distance(coord(a), coord(b));
        prop_assert!(distance >= 0.0);
        // Half the Earth's circumference, plus rounding slack.
        prop_assert!(distance <= 20_015.09);
    }

    /// Property: every input city appears exactly once after the start.
    #[test]
    fn route_is_complete(cities in city_set_strategy(1, 12, 4)) {
        let (start, rest) = cities.split_first().expect("at least one city");
        let optimized = optimize_route(start, &cities);

        prop_assert_eq!(&optimized.route[0], start);
        prop_assert_eq!(sorted_ids(&optimized.route), sorted_ids(&cities));
        prop_assert_eq!(optimized.route.len(), rest.len() + 1);
    }

    #[test]
    fn segment_count_and_total_are_consistent(cities in city_set_strategy(1, 12, 4)) {
        let optimized = optimize_route(&cities[0], &cities);

        prop_assert_eq!(optimized.distances.len(), optimized.route.len() - 1);
        prop_assert_eq!(
            optimized.total_distance,
            round_km(optimized.distances.iter().sum())
        );
    }

    /// Property: each chosen stop was at least as near as any stop visited later.
    #[test]
    fn each_hop_is_greedy(cities in city_set_strategy(2, 10, 0)) {
        let optimized = optimize_route(&cities[0], &cities);
        let route: Vec<&Location> = optimized.route.iter().collect();

        for (hop, leg) in optimized.distances.iter().enumerate() {
            let from = route[hop].coordinates().expect("generated with coordinates");
            for later in &route[hop + 2..] {
                let alternative = haversine_distance(
                    from,
                    later.coordinates().expect("generated with coordinates"),
                );
                prop_assert!(*leg <= alternative);
            }
        }
    }

    #[test]
    fn measurable_routes_remeasure_identically(cities in city_set_strategy(2, 10, 0)) {
        let optimized = optimize_route(&cities[0], &cities);
        let measured = route_distances(&optimized.route);

        prop_assert_eq!(measured.distances, optimized.distances);
        prop_assert_eq!(measured.total_distance, optimized.total_distance);
    }

    #[test]
    fn optimiser_is_deterministic(cities in city_set_strategy(1, 12, 4)) {
        prop_assert_eq!(
            optimize_route(&cities[0], &cities),
            optimize_route(&cities[0], &cities)
        );
    }
}
