//! Core domain types and algorithms for the Wayfare trip planner.
//!
//! The crate is synchronous and free of IO. It measures great-circle
//! distances between [`Location`]s, orders cities with a greedy
//! nearest-neighbour heuristic and summarises trip costs. Data sources and
//! remote planners plug in through the [`CityProvider`] and [`RoutePlanner`]
//! traits.
//!
//! Missing data never causes a failure here: legs touching a location without
//! coordinates are recorded as zero and reported through the `log` facade.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
mod location;
mod optimizer;
mod planner;
mod provider;
mod summary;
mod tour;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::{
    DistanceResult, Segment, SegmentStatus, haversine_distance, measure_segments, route_distances,
};
pub use location::{FoodItem, Location, LocationId};
pub use optimizer::{OptimizedRoute, optimize_route};
pub use planner::{
    FallbackPlanner, NEAREST_NEIGHBOUR_LABEL, NearestNeighbourPlanner, PlanError, PlanMethod,
    PlanRequest, PlannedRoute, RoutePlanner,
};
pub use provider::{CityProvider, CityProviderError, find_city};
pub use summary::{CitySpending, FoodSelection, TripSummary};
pub use tour::{CityPool, MAX_LONDON_TOUR_CITIES, TourError, TourRequest, TripType};
