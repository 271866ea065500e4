//! Normalisation of loosely shaped city and food JSON.
//!
//! City sources disagree on envelopes and field names. This module maps every
//! accepted shape onto [`Location`] and [`FoodItem`] so the core never has to
//! branch on input layout.
//!
//! Accepted city envelopes are a bare array or an object holding the array
//! under `cities`, `data` or `items`. Coordinates are read from `latitude` or
//! `lat` and from `longitude`, `lng` or `lon`, as numbers or numeric strings.
//!
//! Accepted food envelopes are a bare array or an object holding the array
//! under `foods`, `food` or `data`. Names come from `name`, `title` or
//! `foodName`; prices from `price`, `cost` or `amount`.
//!
//! For every alias list the first *present and non-empty* value wins, so a
//! `latitude` of `0` defers to `lat`.

use serde_json::{Map, Value};
use thiserror::Error;
use wayfare_core::{FoodItem, Location, LocationId};

const CITY_ENVELOPES: [&str; 3] = ["cities", "data", "items"];
const FOOD_ENVELOPES: [&str; 3] = ["foods", "food", "data"];
const LATITUDE_KEYS: [&str; 2] = ["latitude", "lat"];
const LONGITUDE_KEYS: [&str; 3] = ["longitude", "lng", "lon"];
const FOOD_NAME_KEYS: [&str; 3] = ["name", "title", "foodName"];
const PRICE_KEYS: [&str; 3] = ["price", "cost", "amount"];
const NESTED_FOOD_KEYS: [&str; 2] = ["food", "foods"];

/// Name given to a dish whose record carries none.
pub const UNKNOWN_FOOD: &str = "Unknown Food";

/// Errors raised while normalising city JSON.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormaliseError {
    /// The text was not valid JSON.
    #[error("invalid JSON: {message}")]
    InvalidJson {
        /// Parser detail.
        message: String,
    },
    /// The document did not hold a recognised list.
    #[error("expected {expected}")]
    UnexpectedShape {
        /// Description of the accepted shapes.
        expected: &'static str,
    },
    /// A city record could not be mapped.
    #[error("city at index {index}: {reason}")]
    InvalidCity {
        /// Position of the record in its list.
        index: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Parse and normalise a city document.
///
/// # Errors
///
/// Returns [`NormaliseError::InvalidJson`] for malformed text and otherwise
/// the errors of [`cities_from_value`].
///
/// # Examples
/// ```rust
/// use wayfare_data::normalise::cities_from_str;
///
/// let cities = cities_from_str(r#"{"data": [{"id": 1, "name": "Paris", "lat": "48.8566", "lng": 2.3522}]}"#)?;
/// assert_eq!(cities[0].latitude, Some(48.8566));
/// # Ok::<(), wayfare_data::normalise::NormaliseError>(())
/// ```
pub fn cities_from_str(json: &str) -> Result<Vec<Location>, NormaliseError> {
    let value: Value = serde_json::from_str(json).map_err(|err| NormaliseError::InvalidJson {
        message: err.to_string(),
    })?;
    cities_from_value(&value)
}

/// Normalise an already parsed city document.
///
/// # Errors
///
/// Returns [`NormaliseError::UnexpectedShape`] when no city list is found and
/// [`NormaliseError::InvalidCity`] when a record is not an object or lacks an
/// identifier or a name.
pub fn cities_from_value(value: &Value) -> Result<Vec<Location>, NormaliseError> {
    let records = unwrap_envelope(value, &CITY_ENVELOPES).ok_or(NormaliseError::UnexpectedShape {
        expected: "an array of cities or an object with `cities`, `data` or `items`",
    })?;
    records
        .iter()
        .enumerate()
        .map(|(index, record)| city_from_record(index, record))
        .collect()
}

/// Normalise a food document.
///
/// Entries that are not objects are skipped with a warning.
///
/// # Errors
///
/// Returns [`NormaliseError::UnexpectedShape`] when no food list is found.
pub fn foods_from_value(value: &Value) -> Result<Vec<FoodItem>, NormaliseError> {
    let records = unwrap_envelope(value, &FOOD_ENVELOPES).ok_or(NormaliseError::UnexpectedShape {
        expected: "an array of foods or an object with `foods`, `food` or `data`",
    })?;
    Ok(records.iter().filter_map(food_from_record).collect())
}

fn unwrap_envelope<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    match value {
        Value::Array(records) => Some(records),
        Value::Object(object) => keys
            .iter()
            .find_map(|key| object.get(*key).and_then(Value::as_array)),
        _ => None,
    }
}

fn city_from_record(index: usize, record: &Value) -> Result<Location, NormaliseError> {
    let invalid = |reason: &str| NormaliseError::InvalidCity {
        index,
        reason: reason.to_owned(),
    };
    let object = record.as_object().ok_or_else(|| invalid("not an object"))?;
    let id = object
        .get("id")
        .and_then(location_id)
        .ok_or_else(|| invalid("missing or unusable `id`"))?;
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("missing `name`"))?;

    let food = NESTED_FOOD_KEYS
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_array))
        .map(|records| records.iter().filter_map(food_from_record).collect())
        .unwrap_or_default();

    Ok(Location {
        id,
        name: name.to_owned(),
        latitude: first_number(object, &LATITUDE_KEYS),
        longitude: first_number(object, &LONGITUDE_KEYS),
        food,
    })
}

fn location_id(value: &Value) -> Option<LocationId> {
    match value {
        Value::Number(number) => number.as_u64().map(LocationId::Numeric),
        Value::String(text) if !text.trim().is_empty() => Some(LocationId::Text(text.clone())),
        _ => None,
    }
}

fn food_from_record(record: &Value) -> Option<FoodItem> {
    let Some(object) = record.as_object() else {
        log::warn!("skipping food entry that is not an object: {record}");
        return None;
    };
    let name = FOOD_NAME_KEYS
        .iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .find(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_FOOD);
    let price = first_number(object, &PRICE_KEYS).unwrap_or_default();
    Some(FoodItem::new(name, price))
}

/// First alias holding a non-zero number or numeric string.
fn first_number(object: &Map<String, Value>, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| object.get(*key))
        .filter_map(number)
        .find(|value| *value != 0.0)
}

fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::bare(json!([{"id": 1, "name": "Paris"}]))]
    #[case::cities(json!({"cities": [{"id": 1, "name": "Paris"}]}))]
    #[case::data(json!({"data": [{"id": 1, "name": "Paris"}]}))]
    #[case::items(json!({"items": [{"id": 1, "name": "Paris"}]}))]
    fn city_envelopes_are_unwrapped(#[case] document: Value) {
        let cities = cities_from_value(&document).expect("envelope accepted");
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name, "Paris");
    }

    #[rstest]
    #[case(json!({"places": []}))]
    #[case(json!("Paris"))]
    #[case(json!(null))]
    fn unknown_envelopes_are_rejected(#[case] document: Value) {
        assert!(matches!(
            cities_from_value(&document),
            Err(NormaliseError::UnexpectedShape { .. })
        ));
    }

    #[rstest]
    #[case(json!({"latitude": 48.8566, "longitude": 2.3522}))]
    #[case(json!({"lat": 48.8566, "lng": 2.3522}))]
    #[case(json!({"lat": "48.8566", "lon": " 2.3522 "}))]
    #[case(json!({"latitude": 0, "lat": 48.8566, "longitude": 2.3522}))]
    fn coordinate_aliases_are_read(#[case] coordinates: Value) {
        let mut record = json!({"id": 1, "name": "Paris"});
        if let (Some(target), Some(extra)) = (record.as_object_mut(), coordinates.as_object()) {
            target.extend(extra.clone());
        }
        let cities = cities_from_value(&json!([record])).expect("record accepted");
        assert_eq!(cities[0].latitude, Some(48.8566));
        assert_eq!(cities[0].longitude, Some(2.3522));
    }

    #[rstest]
    fn unparseable_coordinates_are_missing() {
        let cities = cities_from_value(&json!([
            {"id": 1, "name": "Atlantis", "lat": "somewhere", "lng": null}
        ]))
        .expect("record accepted");
        assert!(!cities[0].has_coordinates());
    }

    #[rstest]
    #[case(json!([{"name": "Paris"}]), "missing or unusable `id`")]
    #[case(json!([{"id": 1.5, "name": "Paris"}]), "missing or unusable `id`")]
    #[case(json!([{"id": 1}]), "missing `name`")]
    #[case(json!([7]), "not an object")]
    fn malformed_cities_name_the_problem(#[case] document: Value, #[case] reason: &str) {
        assert_eq!(
            cities_from_value(&document),
            Err(NormaliseError::InvalidCity {
                index: 0,
                reason: reason.to_owned(),
            })
        );
    }

    #[rstest]
    fn text_ids_are_kept() {
        let cities = cities_from_value(&json!([{"id": "par", "name": "Paris"}]))
            .expect("record accepted");
        assert_eq!(cities[0].id, LocationId::Text("par".into()));
    }

    #[rstest]
    #[case::bare(json!([{"name": "Croissant", "price": 3.5}]))]
    #[case::foods(json!({"foods": [{"title": "Croissant", "cost": "3.5"}]}))]
    #[case::food(json!({"food": [{"foodName": "Croissant", "amount": 3.5}]}))]
    #[case::data(json!({"data": [{"name": "", "title": "Croissant", "price": 0, "cost": 3.5}]}))]
    fn food_shapes_are_normalised(#[case] document: Value) {
        let foods = foods_from_value(&document).expect("food accepted");
        assert_eq!(foods, vec![FoodItem::new("Croissant", 3.5)]);
    }

    #[rstest]
    fn food_defaults_fill_gaps() {
        let foods = foods_from_value(&json!([{}, "ignored", {"name": "Tapas", "price": "n/a"}]))
            .expect("food accepted");
        assert_eq!(
            foods,
            vec![FoodItem::new(UNKNOWN_FOOD, 0.0), FoodItem::new("Tapas", 0.0)]
        );
    }

    #[rstest]
    fn nested_city_food_is_normalised() {
        let cities = cities_from_str(
            r#"[{"id": 1, "name": "Rome", "food": [{"title": "Gelato", "cost": 4.5}]}]"#,
        )
        .expect("document accepted");
        assert_eq!(cities[0].food, vec![FoodItem::new("Gelato", 4.5)]);
    }

    #[rstest]
    fn invalid_text_is_reported() {
        assert!(matches!(
            cities_from_str("{not json"),
            Err(NormaliseError::InvalidJson { .. })
        ));
    }
}
