//! Facade crate for the Wayfare trip planner.
//!
//! This crate re-exports the core domain types and algorithms, and exposes the
//! file and HTTP adapters behind the `data` feature.

#![forbid(unsafe_code)]

pub use wayfare_core::{
    CityPool, CityProvider, CityProviderError, DistanceResult, FallbackPlanner, FoodItem,
    FoodSelection, Location, LocationId, NearestNeighbourPlanner, OptimizedRoute, PlanError,
    PlanMethod, PlanRequest, PlannedRoute, RoutePlanner, Segment, SegmentStatus, TourError,
    TourRequest, TripSummary, TripType, find_city, haversine_distance, measure_segments,
    optimize_route, route_distances,
};

#[cfg(feature = "data")]
pub use wayfare_data::{
    BackendConfig, BackendError, CatalogueError, HttpBackend, JsonFileCatalogue,
};

#[cfg(feature = "test-support")]
pub use wayfare_core::test_support;
