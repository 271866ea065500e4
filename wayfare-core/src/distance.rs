//! Great-circle distances between locations.
//!
//! [`haversine_distance`] measures a single pair of coordinates and
//! [`route_distances`] aggregates consecutive pairs along an ordered route.
//! Every distance is reported in kilometres rounded to two decimal places.
//!
//! Neither function fails. A pair where either location lacks coordinates is
//! recorded as a zero-length segment and reported through the `log` facade.

use std::f64::consts::PI;

use geo::Coord;

use crate::{Location, LocationId};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Round a kilometre value to two decimal places, halves rounding up.
///
/// # Examples
/// ```
/// use wayfare_core::distance::round_km;
///
/// assert_eq!(round_km(343.556), 343.56);
/// assert_eq!(round_km(0.004), 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "rounding is defined in floating point"
)]
#[must_use]
pub fn round_km(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Coordinates use `x = longitude` and `y = latitude`, in degrees. The result
/// is rounded with [`round_km`], is symmetric in its arguments and is zero for
/// coincident points.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use wayfare_core::haversine_distance;
///
/// let paris = Coord { x: 2.3522, y: 48.8566 };
/// let london = Coord { x: -0.1278, y: 51.5074 };
/// assert_eq!(haversine_distance(paris, london), 343.56);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is floating-point trigonometry"
)]
#[must_use]
pub fn haversine_distance(from: Coord<f64>, to: Coord<f64>) -> f64 {
    // Multiply by pi before dividing by 180; reordering changes the last bit.
    let radians = |degrees: f64| degrees * PI / 180.0;
    let d_lat = radians(to.y - from.y);
    let d_lon = radians(to.x - from.x);
    let half_lat = (d_lat / 2.0).sin();
    let half_lon = (d_lon / 2.0).sin();
    let a = half_lat * half_lat
        + radians(from.y).cos() * radians(to.y).cos() * half_lon * half_lon;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    round_km(EARTH_RADIUS_KM * c)
}

/// Outcome of measuring one leg of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SegmentStatus {
    /// Both ends had coordinates and the leg was measured.
    Measured,
    /// At least one end lacked coordinates; the leg was recorded as zero.
    MissingCoordinates,
}

/// A single leg between two consecutive locations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Segment {
    /// Identifier of the departure location.
    pub from: LocationId,
    /// Identifier of the arrival location.
    pub to: LocationId,
    /// Leg length in kilometres, zero when coordinates were missing.
    pub distance_km: f64,
    /// Whether the leg was measured or zero-filled.
    pub status: SegmentStatus,
}

/// Per-segment and total distances for an ordered route.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DistanceResult {
    /// One entry per consecutive pair, in route order.
    pub distances: Vec<f64>,
    /// Sum of `distances`, rounded to two decimal places.
    pub total_distance: f64,
}

impl DistanceResult {
    /// Build a result from segment lengths, rounding the total.
    #[must_use]
    pub fn from_distances(distances: Vec<f64>) -> Self {
        let total_distance = round_km(distances.iter().sum());
        Self {
            distances,
            total_distance,
        }
    }
}

/// Measure every leg of an ordered route.
///
/// Returns one [`Segment`] per consecutive pair. Legs touching a location
/// without coordinates are zero-filled and marked
/// [`SegmentStatus::MissingCoordinates`].
///
/// # Examples
/// ```
/// use wayfare_core::{Location, SegmentStatus, measure_segments};
///
/// let route = vec![
///     Location::new(1, "Paris", 48.8566, 2.3522),
///     Location::without_coordinates(2, "Atlantis"),
/// ];
/// let segments = measure_segments(&route);
/// assert_eq!(segments.len(), 1);
/// assert_eq!(segments[0].status, SegmentStatus::MissingCoordinates);
/// ```
#[must_use]
pub fn measure_segments(locations: &[Location]) -> Vec<Segment> {
    locations
        .windows(2)
        .filter_map(|pair| match pair {
            [from, to] => Some(measure_leg(from, to)),
            _ => None,
        })
        .collect()
}

fn measure_leg(from: &Location, to: &Location) -> Segment {
    match (from.coordinates(), to.coordinates()) {
        (Some(a), Some(b)) => {
            let distance_km = haversine_distance(a, b);
            log::debug!(
                "distance from {} to {}: {distance_km} km",
                from.name,
                to.name
            );
            Segment {
                from: from.id.clone(),
                to: to.id.clone(),
                distance_km,
                status: SegmentStatus::Measured,
            }
        }
        _ => {
            log::warn!(
                "missing coordinates between {} ({:?}, {:?}) and {} ({:?}, {:?}); recording 0 km",
                from.name,
                from.latitude,
                from.longitude,
                to.name,
                to.latitude,
                to.longitude
            );
            Segment {
                from: from.id.clone(),
                to: to.id.clone(),
                distance_km: 0.0,
                status: SegmentStatus::MissingCoordinates,
            }
        }
    }
}

/// Per-segment and total distances for an ordered route.
///
/// Fewer than two locations yield an empty result with a zero total.
///
/// # Examples
/// ```
/// use wayfare_core::{Location, route_distances};
///
/// let route = vec![
///     Location::new(1, "Paris", 48.8566, 2.3522),
///     Location::new(2, "London", 51.5074, -0.1278),
/// ];
/// let result = route_distances(&route);
/// assert_eq!(result.distances, vec![343.56]);
/// assert_eq!(result.total_distance, 343.56);
/// ```
#[must_use]
pub fn route_distances(locations: &[Location]) -> DistanceResult {
    let distances = measure_segments(locations)
        .into_iter()
        .map(|segment| segment.distance_km)
        .collect();
    let result = DistanceResult::from_distances(distances);
    log::debug!(
        "route of {} locations measures {} km",
        locations.len(),
        result.total_distance
    );
    result
}
