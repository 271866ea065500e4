//! Test doubles and fixtures shared by unit, behaviour and downstream tests.

use crate::{
    CityProvider, CityProviderError, Location, PlanError, PlanRequest, PlannedRoute, RoutePlanner,
};

/// In-memory [`CityProvider`] returning a fixed list or a fixed error.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogue {
    cities: Vec<Location>,
    failure: Option<String>,
}

impl MemoryCatalogue {
    /// Create a catalogue holding `cities`.
    #[must_use]
    pub fn with_cities<I>(cities: I) -> Self
    where
        I: IntoIterator<Item = Location>,
    {
        Self {
            cities: cities.into_iter().collect(),
            failure: None,
        }
    }

    /// Create a catalogue whose every call fails with `message`.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            cities: Vec::new(),
            failure: Some(message.into()),
        }
    }
}

impl CityProvider for MemoryCatalogue {
    fn cities(&self) -> Result<Vec<Location>, CityProviderError> {
        match &self.failure {
            Some(message) => Err(CityProviderError::Unavailable {
                message: message.clone(),
            }),
            None => Ok(self.cities.clone()),
        }
    }
}

/// [`RoutePlanner`] that replays a canned answer.
///
/// # Examples
/// ```rust
/// use wayfare_core::test_support::StubRoutePlanner;
/// use wayfare_core::{Location, PlanError, PlanRequest, RoutePlanner};
///
/// let planner = StubRoutePlanner::with_error(PlanError::Unavailable {
///     message: "offline".into(),
/// });
/// let request = PlanRequest {
///     starting_city: Location::new(1, "Paris", 48.8566, 2.3522),
///     cities: Vec::new(),
/// };
/// assert!(planner.plan(&request).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StubRoutePlanner {
    answer: Result<PlannedRoute, PlanError>,
}

impl StubRoutePlanner {
    /// Always answer with `route`.
    #[must_use]
    pub const fn with_route(route: PlannedRoute) -> Self {
        Self { answer: Ok(route) }
    }

    /// Always fail with `error`.
    #[must_use]
    pub const fn with_error(error: PlanError) -> Self {
        Self { answer: Err(error) }
    }
}

impl RoutePlanner for StubRoutePlanner {
    fn plan(&self, _request: &PlanRequest) -> Result<PlannedRoute, PlanError> {
        self.answer.clone()
    }
}

/// Paris, London, Berlin, Rome and Madrid with ids 1 to 5.
#[must_use]
pub fn sample_cities() -> Vec<Location> {
    vec![
        Location::new(1, "Paris", 48.8566, 2.3522),
        Location::new(2, "London", 51.5074, -0.1278),
        Location::new(3, "Berlin", 52.52, 13.405),
        Location::new(4, "Rome", 41.9028, 12.4964),
        Location::new(5, "Madrid", 40.4168, -3.7038),
    ]
}

/// Thirteen European cities with ids 1 to 13; Vienna and Stockholm come last.
#[must_use]
pub fn european_cities() -> Vec<Location> {
    vec![
        Location::new(1, "Amsterdam", 52.3676, 4.9041),
        Location::new(2, "Berlin", 52.52, 13.405),
        Location::new(3, "Brussels", 50.8503, 4.3517),
        Location::new(4, "Budapest", 47.4979, 19.0402),
        Location::new(5, "Hamburg", 53.5511, 9.9937),
        Location::new(6, "Lisbon", 38.7223, -9.1393),
        Location::new(7, "London", 51.5074, -0.1278),
        Location::new(8, "Madrid", 40.4168, -3.7038),
        Location::new(9, "Paris", 48.8566, 2.3522),
        Location::new(10, "Prague", 50.0755, 14.4378),
        Location::new(11, "Rome", 41.9028, 12.4964),
        Location::new(12, "Vienna", 48.2082, 16.3738),
        Location::new(13, "Stockholm", 59.3293, 18.0686),
    ]
}
