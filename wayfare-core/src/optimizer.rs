//! Greedy nearest-neighbour route construction.
//!
//! Starting from a fixed location, the optimiser repeatedly travels to the
//! closest unvisited location until none remain. The result is a cheap,
//! plausible itinerary rather than a shortest tour: there is no 2-opt pass
//! and no backtracking.
//!
//! # Complexity
//!
//! O(n²) in the number of locations.

use crate::distance::{haversine_distance, round_km};
use crate::Location;

/// An ordered itinerary with its leg distances.
///
/// `route[0]` is always the starting location and
/// `distances.len() == route.len() - 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptimizedRoute {
    /// Locations in visiting order.
    pub route: Vec<Location>,
    /// Leg lengths in kilometres, one per consecutive pair.
    pub distances: Vec<f64>,
    /// Sum of `distances`, rounded to two decimal places.
    pub total_distance: f64,
}

impl OptimizedRoute {
    /// A route containing only its starting point.
    #[must_use]
    pub fn single(start: Location) -> Self {
        Self {
            route: vec![start],
            distances: Vec::new(),
            total_distance: 0.0,
        }
    }

    /// Names of the locations in visiting order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.route.iter().map(|location| location.name.as_str()).collect()
    }
}

/// Order `locations` by repeatedly visiting the nearest unvisited one.
///
/// `start` leads the route. Any entry of `locations` sharing its identifier
/// is dropped, so callers may pass the start in the list or not. Among
/// equally near candidates the one appearing first in `locations` wins.
///
/// Candidates without usable coordinates cannot be measured and are never
/// chosen by the search. They are appended after the greedy tour in input
/// order, each with a zero-length leg, so the route still contains every
/// location exactly once.
///
/// # Examples
/// ```
/// use wayfare_core::{Location, optimize_route};
///
/// let paris = Location::new(1, "Paris", 48.8566, 2.3522);
/// let cities = vec![
///     Location::new(3, "Berlin", 52.52, 13.405),
///     Location::new(2, "London", 51.5074, -0.1278),
/// ];
///
/// let optimized = optimize_route(&paris, &cities);
/// assert_eq!(optimized.names(), vec!["Paris", "London", "Berlin"]);
/// assert_eq!(optimized.distances, vec![343.56, 931.57]);
/// assert_eq!(optimized.total_distance, 1275.13);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "leg lengths are accumulated in floating point"
)]
#[must_use]
pub fn optimize_route(start: &Location, locations: &[Location]) -> OptimizedRoute {
    let (mut remaining, unplaceable): (Vec<&Location>, Vec<&Location>) = locations
        .iter()
        .filter(|location| location.id != start.id)
        .partition(|location| location.has_coordinates() && start.has_coordinates());

    let mut optimized = OptimizedRoute::single(start.clone());
    let mut current = start;
    let mut total = 0.0;

    while let Some((index, distance)) = nearest(current, &remaining) {
        let next = remaining.remove(index);
        log::debug!("nearest to {} is {} at {distance} km", current.name, next.name);
        optimized.route.push(next.clone());
        optimized.distances.push(round_km(distance));
        total += distance;
        current = next;
    }

    for location in unplaceable {
        log::warn!(
            "{} has no usable coordinates; appending it after {} with a 0 km leg",
            location.name,
            current.name
        );
        optimized.route.push(location.clone());
        optimized.distances.push(0.0);
        current = location;
    }

    optimized.total_distance = round_km(total);
    optimized
}

/// Index and distance of the candidate nearest to `from`.
///
/// Uses a strict comparison so the first of several equal candidates wins.
fn nearest(from: &Location, candidates: &[&Location]) -> Option<(usize, f64)> {
    let origin = from.coordinates()?;
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let Some(coord) = candidate.coordinates() else {
            continue;
        };
        let distance = haversine_distance(origin, coord);
        if best.is_none_or(|(_, shortest)| distance < shortest) {
            best = Some((index, distance));
        }
    }
    best
}
