//! Predefined and custom tours.
//!
//! A [`TourRequest`] names a kind of trip. Resolving it against a city list
//! produces the [`PlanRequest`] a [`crate::RoutePlanner`] consumes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Location, PlanRequest, find_city};

/// Largest London tour, counting London itself.
pub const MAX_LONDON_TOUR_CITIES: usize = 11;

/// Cities left out of [`CityPool::Core`].
const EXTENDED_ONLY: [&str; 2] = ["Vienna", "Stockholm"];

/// The kinds of trip a traveller can plan.
///
/// # Examples
/// ```rust
/// use wayfare_core::TripType;
///
/// let trip: TripType = "london_tour".parse()?;
/// assert_eq!(trip, TripType::LondonTour);
/// assert_eq!(trip.display_name(), "London Tour");
/// # Ok::<(), wayfare_core::TourError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TripType {
    /// Start in Paris and visit the core cities.
    ParisTour,
    /// Start in London and visit a chosen number of cities.
    LondonTour,
    /// Start in Berlin and visit the core cities.
    BerlinTour,
    /// Traveller picks the start and the stops.
    CustomTour,
}

impl TripType {
    /// Every trip type, in menu order.
    pub const ALL: [Self; 4] = [
        Self::ParisTour,
        Self::LondonTour,
        Self::BerlinTour,
        Self::CustomTour,
    ];

    /// Machine label, as used in JSON and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParisTour => "paris_tour",
            Self::LondonTour => "london_tour",
            Self::BerlinTour => "berlin_tour",
            Self::CustomTour => "custom_tour",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ParisTour => "Paris Tour",
            Self::LondonTour => "London Tour",
            Self::BerlinTour => "Berlin Tour",
            Self::CustomTour => "Custom Tour",
        }
    }
}

impl fmt::Display for TripType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TripType {
    type Err = TourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|trip| trip.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TourError::UnknownTripType {
                value: wanted.to_owned(),
            })
    }
}

/// Which cities a tour may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CityPool {
    /// Every city except Vienna and Stockholm.
    #[default]
    Core,
    /// Every known city.
    All,
}

impl CityPool {
    /// Cities from `cities` belonging to this pool, in input order.
    #[must_use]
    pub fn select(self, cities: &[Location]) -> Vec<Location> {
        cities
            .iter()
            .filter(|city| match self {
                Self::All => true,
                Self::Core => !EXTENDED_ONLY
                    .iter()
                    .any(|name| city.name.trim().eq_ignore_ascii_case(name)),
            })
            .cloned()
            .collect()
    }
}

/// A tour to be resolved against a city list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TourRequest {
    /// Paris to every core city.
    Paris,
    /// London plus `cities - 1` other core cities.
    London {
        /// Total stops including London, `1..=11`.
        cities: usize,
    },
    /// Berlin to every core city.
    Berlin,
    /// A start and stops chosen by the traveller.
    Custom {
        /// Name of the starting city.
        start: String,
        /// Names of the cities to visit.
        visit: Vec<String>,
        /// Pool the names are resolved against.
        pool: CityPool,
    },
}

/// Errors from [`TourRequest::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    /// A named city is not in the pool.
    #[error("unknown city: {name}")]
    UnknownCity {
        /// The name that failed to match.
        name: String,
    },
    /// The London tour size is out of range.
    #[error("a London tour visits between 1 and {MAX_LONDON_TOUR_CITIES} cities, got {count}")]
    InvalidCityCount {
        /// The requested number of cities.
        count: usize,
    },
    /// A custom tour named no start or no stops.
    #[error("a custom tour needs a starting city and at least one city to visit")]
    NoCitiesSelected,
    /// A trip type label was not recognised.
    #[error("unknown trip type: {value}")]
    UnknownTripType {
        /// The unrecognised label.
        value: String,
    },
}

impl TourRequest {
    /// The trip type this request plans.
    #[must_use]
    pub const fn trip_type(&self) -> TripType {
        match self {
            Self::Paris => TripType::ParisTour,
            Self::London { .. } => TripType::LondonTour,
            Self::Berlin => TripType::BerlinTour,
            Self::Custom { .. } => TripType::CustomTour,
        }
    }

    /// Resolve city names against `cities` into a planning request.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::UnknownCity`] when a named city is not in the
    /// relevant pool, [`TourError::InvalidCityCount`] for a London tour size
    /// outside `1..=11` and [`TourError::NoCitiesSelected`] for a custom tour
    /// without a start or stops.
    ///
    /// # Examples
    /// ```rust
    /// use wayfare_core::{Location, TourRequest};
    ///
    /// let cities = vec![
    ///     Location::new(1, "London", 51.5074, -0.1278),
    ///     Location::new(2, "Paris", 48.8566, 2.3522),
    ///     Location::new(3, "Berlin", 52.52, 13.405),
    /// ];
    /// let request = TourRequest::London { cities: 2 }.resolve(&cities)?;
    /// assert_eq!(request.starting_city.name, "London");
    /// assert_eq!(request.cities.len(), 1);
    /// # Ok::<(), wayfare_core::TourError>(())
    /// ```
    pub fn resolve(&self, cities: &[Location]) -> Result<PlanRequest, TourError> {
        match self {
            Self::Paris => around(cities, "Paris", usize::MAX),
            Self::Berlin => around(cities, "Berlin", usize::MAX),
            Self::London { cities: count } => {
                if !(1..=MAX_LONDON_TOUR_CITIES).contains(count) {
                    return Err(TourError::InvalidCityCount { count: *count });
                }
                around(cities, "London", count - 1)
            }
            Self::Custom { start, visit, pool } => {
                if start.trim().is_empty() || visit.is_empty() {
                    return Err(TourError::NoCitiesSelected);
                }
                let candidates = pool.select(cities);
                let starting_city = lookup(&candidates, start)?;
                let stops = visit
                    .iter()
                    .map(|name| lookup(&candidates, name))
                    .filter(|city| !matches!(city, Ok(found) if found.id == starting_city.id))
                    .collect::<Result<Vec<_>, _>>()?;
                if stops.is_empty() {
                    return Err(TourError::NoCitiesSelected);
                }
                Ok(PlanRequest {
                    starting_city,
                    cities: stops,
                })
            }
        }
    }
}

fn lookup(pool: &[Location], name: &str) -> Result<Location, TourError> {
    find_city(pool, name)
        .cloned()
        .ok_or_else(|| TourError::UnknownCity {
            name: name.trim().to_owned(),
        })
}

/// Start at `start` and visit up to `limit` other core cities in pool order.
fn around(cities: &[Location], start: &str, limit: usize) -> Result<PlanRequest, TourError> {
    let pool = CityPool::Core.select(cities);
    let starting_city = lookup(&pool, start)?;
    let stops = pool
        .into_iter()
        .filter(|city| city.id != starting_city.id)
        .take(limit)
        .collect();
    Ok(PlanRequest {
        starting_city,
        cities: stops,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::european_cities;
    use rstest::{fixture, rstest};

    #[fixture]
    fn capitals() -> Vec<Location> {
        european_cities()
    }

    fn names(cities: &[Location]) -> Vec<&str> {
        cities.iter().map(|city| city.name.as_str()).collect()
    }

    #[rstest]
    fn core_pool_drops_vienna_and_stockholm(capitals: Vec<Location>) {
        let core = CityPool::Core.select(&capitals);
        assert_eq!(core.len(), capitals.len() - 2);
        assert!(find_city(&core, "Vienna").is_none());
        assert!(find_city(&core, "Stockholm").is_none());
        assert_eq!(CityPool::All.select(&capitals), capitals);
    }

    #[rstest]
    #[case(TourRequest::Paris, "Paris")]
    #[case(TourRequest::Berlin, "Berlin")]
    fn fixed_tours_visit_every_core_city(
        capitals: Vec<Location>,
        #[case] tour: TourRequest,
        #[case] start: &str,
    ) {
        let request = tour.resolve(&capitals).expect("fixed tour resolves");
        assert_eq!(request.starting_city.name, start);
        assert_eq!(request.cities.len(), 10);
        assert!(!names(&request.cities).contains(&start));
    }

    #[rstest]
    #[case(1, 0)]
    #[case(4, 3)]
    #[case(11, 10)]
    fn london_tour_counts_london(
        capitals: Vec<Location>,
        #[case] count: usize,
        #[case] stops: usize,
    ) {
        let request = TourRequest::London { cities: count }
            .resolve(&capitals)
            .expect("valid size");
        assert_eq!(request.starting_city.name, "London");
        assert_eq!(request.cities.len(), stops);
    }

    #[rstest]
    #[case(0)]
    #[case(12)]
    fn london_tour_rejects_out_of_range(capitals: Vec<Location>, #[case] count: usize) {
        let err = TourRequest::London { cities: count }
            .resolve(&capitals)
            .expect_err("size out of range");
        assert_eq!(err, TourError::InvalidCityCount { count });
    }

    #[rstest]
    fn custom_tour_resolves_names_and_drops_start(capitals: Vec<Location>) {
        let tour = TourRequest::Custom {
            start: "rome".into(),
            visit: vec!["Madrid".into(), "Rome".into(), "Lisbon".into()],
            pool: CityPool::Core,
        };
        let request = tour.resolve(&capitals).expect("custom tour resolves");
        assert_eq!(request.starting_city.name, "Rome");
        assert_eq!(names(&request.cities), vec!["Madrid", "Lisbon"]);
    }

    #[rstest]
    fn custom_tour_respects_pool(capitals: Vec<Location>) {
        let visit = vec!["Vienna".to_owned()];
        let core = TourRequest::Custom {
            start: "Paris".into(),
            visit: visit.clone(),
            pool: CityPool::Core,
        };
        assert_eq!(
            core.resolve(&capitals).expect_err("Vienna is not core"),
            TourError::UnknownCity {
                name: "Vienna".into()
            }
        );
        let all = TourRequest::Custom {
            start: "Paris".into(),
            visit,
            pool: CityPool::All,
        };
        assert!(all.resolve(&capitals).is_ok());
    }

    #[rstest]
    #[case("", vec!["Paris"])]
    #[case("Paris", vec![])]
    #[case("Paris", vec!["Paris"])]
    fn custom_tour_needs_start_and_stops(
        capitals: Vec<Location>,
        #[case] start: &str,
        #[case] visit: Vec<&str>,
    ) {
        let tour = TourRequest::Custom {
            start: start.into(),
            visit: visit.into_iter().map(str::to_owned).collect(),
            pool: CityPool::All,
        };
        assert_eq!(
            tour.resolve(&capitals).expect_err("nothing to visit"),
            TourError::NoCitiesSelected
        );
    }

    #[rstest]
    fn trip_types_parse_and_serialise() {
        for trip in TripType::ALL {
            assert_eq!(trip.as_str().parse::<TripType>(), Ok(trip));
            let json = serde_json::to_value(trip).expect("trip type serialises");
            assert_eq!(json, serde_json::Value::String(trip.as_str().into()));
        }
        assert!(matches!(
            "moon_tour".parse::<TripType>(),
            Err(TourError::UnknownTripType { .. })
        ));
    }
}
