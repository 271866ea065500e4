//! Source of the cities a trip may visit.

use thiserror::Error;

use crate::Location;

/// Errors from [`CityProvider::cities`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CityProviderError {
    /// The underlying source could not be read or reached.
    #[error("city source unavailable: {message}")]
    Unavailable {
        /// Transport or IO detail.
        message: String,
    },
    /// The source was read but its contents could not be understood.
    #[error("malformed city data: {message}")]
    Malformed {
        /// What was wrong with the data.
        message: String,
    },
}

/// Supply the list of known cities.
///
/// The core never embeds a dataset; callers inject a provider backed by a
/// file, a remote service or memory.
///
/// # Examples
///
/// ```rust
/// use wayfare_core::{CityProvider, CityProviderError, Location};
///
/// struct Fixed;
///
/// impl CityProvider for Fixed {
///     fn cities(&self) -> Result<Vec<Location>, CityProviderError> {
///         Ok(vec![Location::new(1, "Paris", 48.8566, 2.3522)])
///     }
/// }
///
/// assert_eq!(Fixed.cities()?.len(), 1);
/// # Ok::<(), CityProviderError>(())
/// ```
pub trait CityProvider: Send + Sync {
    /// Return every known city.
    fn cities(&self) -> Result<Vec<Location>, CityProviderError>;
}

/// Find a city by name, ignoring case and surrounding whitespace.
///
/// Returns the first match in `cities`.
///
/// # Examples
/// ```rust
/// use wayfare_core::{Location, find_city};
///
/// let cities = vec![Location::new(1, "Paris", 48.8566, 2.3522)];
/// assert!(find_city(&cities, " paris ").is_some());
/// assert!(find_city(&cities, "Lyon").is_none());
/// ```
#[must_use]
pub fn find_city<'a>(cities: &'a [Location], name: &str) -> Option<&'a Location> {
    let wanted = name.trim();
    cities
        .iter()
        .find(|city| city.name.trim().eq_ignore_ascii_case(wanted))
}
