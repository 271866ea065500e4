//! Wire types for the trip-planning backend.
//!
//! `POST /api/routes/optimize` accepts `{ startingCity, cities }` and answers
//! with city *names* in visiting order plus optional distance data.

use serde::{Deserialize, Serialize};
use wayfare_core::{Location, PlanRequest};

/// Body of an optimisation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest<'a> {
    /// Where the route begins.
    pub starting_city: &'a Location,
    /// Cities to order.
    pub cities: &'a [Location],
}

impl<'a> From<&'a PlanRequest> for OptimizeRequest<'a> {
    fn from(request: &'a PlanRequest) -> Self {
        Self {
            starting_city: &request.starting_city,
            cities: &request.cities,
        }
    }
}

/// Body of an optimisation response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    /// City names in visiting order, starting city first.
    pub route: Vec<String>,
    /// Leg lengths in kilometres; may be absent.
    #[serde(default)]
    pub distances: Vec<f64>,
    /// Total length in kilometres; may be absent.
    #[serde(default)]
    pub total_distance: Option<f64>,
    /// Whether the backend reordered the cities.
    #[serde(default = "optimized_by_default")]
    pub optimized: bool,
    /// Label of the backend's algorithm.
    #[serde(default)]
    pub method: Option<String>,
}

const fn optimized_by_default() -> bool {
    true
}
