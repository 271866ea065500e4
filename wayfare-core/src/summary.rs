//! Cost and distance summary for a planned trip.

use crate::distance::round_km;
use crate::{FoodItem, PlannedRoute, TripType};

/// A dish the traveller chose to eat in a city.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FoodSelection {
    /// Name of the city the dish is eaten in.
    pub city_name: String,
    /// The dish and its price.
    pub food: FoodItem,
}

impl FoodSelection {
    /// Construct a selection.
    #[must_use]
    pub fn new(city_name: impl Into<String>, food: FoodItem) -> Self {
        Self {
            city_name: city_name.into(),
            food,
        }
    }
}

/// Money spent in one city.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CitySpending {
    /// City name as given in the selections.
    pub city_name: String,
    /// Sum of prices, two decimal places.
    pub amount: f64,
}

/// Totals shown once a trip has been planned.
///
/// # Examples
/// ```rust
/// use wayfare_core::{FoodItem, FoodSelection, TripSummary, TripType};
///
/// let selections = vec![
///     FoodSelection::new("Paris", FoodItem::new("Croissant", 3.5)),
///     FoodSelection::new("Rome", FoodItem::new("Carbonara", 14.0)),
///     FoodSelection::new("Paris", FoodItem::new("Crêpe", 6.25)),
/// ];
/// let summary = TripSummary::new(TripType::CustomTour, Some(1105.28), &selections, 2);
/// assert_eq!(summary.food_cost, 23.75);
/// assert_eq!(summary.spending_by_city[0].city_name, "Paris");
/// assert_eq!(summary.spending_by_city[0].amount, 9.75);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TripSummary {
    /// Kind of trip summarised.
    pub trip_type: TripType,
    /// Route length in kilometres; `None` when no distance is known.
    pub total_distance: Option<f64>,
    /// Sum of every selected dish's price.
    pub food_cost: f64,
    /// Spending per city, in order of first selection.
    pub spending_by_city: Vec<CitySpending>,
    /// Number of cities on the route.
    pub city_count: usize,
}

impl TripSummary {
    /// Summarise food selections with an optional route distance.
    ///
    /// A distance of zero or less is reported as unavailable.
    #[expect(
        clippy::float_arithmetic,
        reason = "prices are accumulated in floating point"
    )]
    #[must_use]
    pub fn new(
        trip_type: TripType,
        total_distance: Option<f64>,
        selections: &[FoodSelection],
        city_count: usize,
    ) -> Self {
        let mut spending_by_city: Vec<CitySpending> = Vec::new();
        for selection in selections {
            match spending_by_city
                .iter_mut()
                .find(|entry| entry.city_name == selection.city_name)
            {
                Some(entry) => entry.amount += selection.food.price,
                None => spending_by_city.push(CitySpending {
                    city_name: selection.city_name.clone(),
                    amount: selection.food.price,
                }),
            }
        }
        for entry in &mut spending_by_city {
            entry.amount = round_km(entry.amount);
        }
        let food_cost = round_km(selections.iter().map(|s| s.food.price).sum());
        Self {
            trip_type,
            total_distance: total_distance.filter(|km| *km > 0.0),
            food_cost,
            spending_by_city,
            city_count,
        }
    }

    /// Summarise food selections against a planned route.
    #[must_use]
    pub fn for_route(
        trip_type: TripType,
        route: &PlannedRoute,
        selections: &[FoodSelection],
    ) -> Self {
        Self::new(
            trip_type,
            Some(route.total_distance),
            selections,
            route.route.len(),
        )
    }
}
