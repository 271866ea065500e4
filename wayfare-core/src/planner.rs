//! Route planning seam.
//!
//! A [`RoutePlanner`] turns a [`PlanRequest`] into a [`PlannedRoute`]. The
//! local [`NearestNeighbourPlanner`] never fails; remote planners can be
//! wrapped in a [`FallbackPlanner`] so a failing backend degrades to the local
//! result instead of surfacing an error.

use std::fmt;

use thiserror::Error;

use crate::distance::route_distances;
use crate::{Location, OptimizedRoute, optimize_route};

/// Method label reported for routes ordered by [`optimize_route`].
pub const NEAREST_NEIGHBOUR_LABEL: &str = "nearest_neighbour";

/// Parameters for a planning request.
///
/// `cities` may or may not contain `starting_city`; planners drop any entry
/// whose identifier matches it.
///
/// # Examples
/// ```rust
/// use wayfare_core::{Location, PlanRequest};
///
/// let request = PlanRequest {
///     starting_city: Location::new(1, "Paris", 48.8566, 2.3522),
///     cities: vec![Location::new(2, "London", 51.5074, -0.1278)],
/// };
/// assert_eq!(request.cities.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlanRequest {
    /// Where the route begins.
    pub starting_city: Location,
    /// Cities to visit, in any order.
    pub cities: Vec<Location>,
}

impl PlanRequest {
    /// Reject a request whose starting city has a blank name.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::EmptyRequest`].
    pub fn ensure_starting_city(&self) -> Result<(), PlanError> {
        if self.starting_city.name.trim().is_empty() {
            return Err(PlanError::EmptyRequest);
        }
        Ok(())
    }
}

/// How a [`PlannedRoute`] was ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum PlanMethod {
    /// Ordered locally by the greedy optimiser.
    NearestNeighbour,
    /// Ordered by a remote service, carrying the label it reported.
    Backend(String),
}

impl fmt::Display for PlanMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NearestNeighbour => f.write_str(NEAREST_NEIGHBOUR_LABEL),
            Self::Backend(label) => f.write_str(label),
        }
    }
}

impl From<String> for PlanMethod {
    fn from(label: String) -> Self {
        if label == NEAREST_NEIGHBOUR_LABEL {
            Self::NearestNeighbour
        } else {
            Self::Backend(label)
        }
    }
}

impl From<PlanMethod> for String {
    fn from(method: PlanMethod) -> Self {
        method.to_string()
    }
}

/// An ordered itinerary returned by a [`RoutePlanner`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlannedRoute {
    /// Locations in visiting order, starting city first.
    pub route: Vec<Location>,
    /// Leg lengths in kilometres.
    pub distances: Vec<f64>,
    /// Rounded sum of `distances`.
    pub total_distance: f64,
    /// Whether the order came from an optimiser rather than input order.
    pub optimized: bool,
    /// Which planner produced the order.
    pub method: PlanMethod,
}

impl PlannedRoute {
    /// Names of the locations in visiting order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.route.iter().map(|location| location.name.as_str()).collect()
    }

    /// Whether every leg has a recorded distance.
    #[must_use]
    pub fn has_complete_distances(&self) -> bool {
        self.distances.len() + 1 == self.route.len()
    }
}

impl From<OptimizedRoute> for PlannedRoute {
    fn from(optimized: OptimizedRoute) -> Self {
        Self {
            route: optimized.route,
            distances: optimized.distances,
            total_distance: optimized.total_distance,
            optimized: true,
            method: PlanMethod::NearestNeighbour,
        }
    }
}

/// Errors returned by [`RoutePlanner::plan`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The request named no starting city.
    #[error("a starting city is required")]
    EmptyRequest,
    /// The planner could not be reached or refused the request.
    #[error("route planner unavailable: {message}")]
    Unavailable {
        /// Transport or service detail.
        message: String,
    },
    /// The planner answered with a city it was not asked about.
    #[error("planner returned unknown city: {name}")]
    UnknownCity {
        /// The unmatched city name.
        name: String,
    },
    /// The planner answered with data that could not be interpreted.
    #[error("invalid planner response: {message}")]
    InvalidResponse {
        /// What was wrong with the response.
        message: String,
    },
}

/// Order a set of cities into a route.
///
/// Implementations must return [`PlanError::EmptyRequest`] when the starting
/// city has an empty name. Planners must be `Send + Sync` so they can be
/// shared across threads.
pub trait RoutePlanner: Send + Sync {
    /// Plan a route for `request`.
    fn plan(&self, request: &PlanRequest) -> Result<PlannedRoute, PlanError>;
}

/// Local planner backed by [`optimize_route`].
///
/// # Examples
/// ```rust
/// use wayfare_core::{Location, NearestNeighbourPlanner, PlanMethod, PlanRequest, RoutePlanner};
///
/// let request = PlanRequest {
///     starting_city: Location::new(1, "Paris", 48.8566, 2.3522),
///     cities: vec![Location::new(2, "London", 51.5074, -0.1278)],
/// };
/// let planned = NearestNeighbourPlanner.plan(&request)?;
/// assert_eq!(planned.names(), vec!["Paris", "London"]);
/// assert_eq!(planned.method, PlanMethod::NearestNeighbour);
/// # Ok::<(), wayfare_core::PlanError>(())
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct NearestNeighbourPlanner;

impl RoutePlanner for NearestNeighbourPlanner {
    fn plan(&self, request: &PlanRequest) -> Result<PlannedRoute, PlanError> {
        request.ensure_starting_city()?;
        Ok(optimize_route(&request.starting_city, &request.cities).into())
    }
}

/// Planner that prefers `primary` and falls back to the local optimiser.
///
/// Errors from `primary` are logged and replaced by the
/// [`NearestNeighbourPlanner`] result. A primary answer without one distance
/// per leg keeps its order but has its distances recomputed locally.
#[derive(Debug, Clone)]
pub struct FallbackPlanner<P> {
    primary: P,
    local: NearestNeighbourPlanner,
}

impl<P> FallbackPlanner<P> {
    /// Wrap `primary` with local fallback.
    #[must_use]
    pub const fn new(primary: P) -> Self {
        Self {
            primary,
            local: NearestNeighbourPlanner,
        }
    }

    /// Borrow the wrapped planner.
    #[must_use]
    pub const fn primary(&self) -> &P {
        &self.primary
    }
}

impl<P: RoutePlanner> RoutePlanner for FallbackPlanner<P> {
    fn plan(&self, request: &PlanRequest) -> Result<PlannedRoute, PlanError> {
        request.ensure_starting_city()?;
        match self.primary.plan(request) {
            Ok(planned) if planned.has_complete_distances() => Ok(planned),
            Ok(mut planned) => {
                log::warn!(
                    "planner returned {} distances for {} stops; recomputing locally",
                    planned.distances.len(),
                    planned.route.len()
                );
                let measured = route_distances(&planned.route);
                planned.distances = measured.distances;
                planned.total_distance = measured.total_distance;
                Ok(planned)
            }
            Err(err) => {
                log::warn!("{err}; falling back to nearest-neighbour ordering");
                self.local.plan(request)
            }
        }
    }
}
