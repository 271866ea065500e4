//! Visitable locations and the food offered at them.

use std::fmt;

use geo::Coord;

/// Identifier of a [`Location`], unique within a single request.
///
/// City sources use both integer and string identifiers, so both are
/// accepted. Equality is exact: `Numeric(1)` never equals `Text("1")`.
///
/// # Examples
/// ```
/// use wayfare_core::LocationId;
///
/// assert_eq!(LocationId::from(7), LocationId::Numeric(7));
/// assert_eq!(LocationId::from("paris").to_string(), "paris");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum LocationId {
    /// Integer identifier, as issued by the backend database.
    Numeric(u64),
    /// Free-form string identifier.
    Text(String),
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for LocationId {
    fn from(id: u64) -> Self {
        Self::Numeric(id)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for LocationId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// A dish on offer in a city, with its price in the catalogue currency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FoodItem {
    /// Display name of the dish.
    pub name: String,
    /// Unit price.
    pub price: f64,
}

impl FoodItem {
    /// Construct a food item.
    #[must_use]
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A named waypoint that a trip may visit.
///
/// Coordinates are WGS84 degrees. Either coordinate may be absent; a location
/// whose latitude or longitude is absent, zero or non-finite is treated as
/// having missing coordinates and is never measured.
///
/// # Examples
/// ```
/// use wayfare_core::Location;
///
/// let paris = Location::new(1, "Paris", 48.8566, 2.3522);
/// let coord = paris.coordinates().expect("Paris has coordinates");
/// assert_eq!(coord.y, 48.8566);
///
/// let unknown = Location::without_coordinates(2, "Atlantis");
/// assert!(unknown.coordinates().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Location {
    /// Identifier, unique within a request.
    pub id: LocationId,
    /// Display label; not guaranteed to be unique.
    pub name: String,
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(default))]
    pub longitude: Option<f64>,
    /// Food on offer at this location.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub food: Vec<FoodItem>,
}

impl Location {
    /// Construct a location with both coordinates set.
    #[must_use]
    pub fn new(
        id: impl Into<LocationId>,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
            food: Vec::new(),
        }
    }

    /// Construct a location that has no coordinates.
    #[must_use]
    pub fn without_coordinates(id: impl Into<LocationId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            latitude: None,
            longitude: None,
            food: Vec::new(),
        }
    }

    /// Attach the food offered at this location.
    #[must_use]
    pub fn with_food(mut self, food: Vec<FoodItem>) -> Self {
        self.food = food;
        self
    }

    /// Return the usable coordinate pair, if any.
    ///
    /// The returned [`Coord`] uses `x = longitude` and `y = latitude`.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coord<f64>> {
        let latitude = self.latitude.filter(|v| is_usable(*v))?;
        let longitude = self.longitude.filter(|v| is_usable(*v))?;
        Some(Coord {
            x: longitude,
            y: latitude,
        })
    }

    /// Whether this location can take part in distance computations.
    #[must_use]
    pub fn has_coordinates(&self) -> bool {
        self.coordinates().is_some()
    }
}

// Zero counts as missing; city sources use `0` as a placeholder.
const fn is_usable(value: f64) -> bool {
    value.is_finite() && value != 0.0
}
