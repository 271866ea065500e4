//! `summary` command: distance and food spending for a planned route.

use std::io::{BufReader, Write};
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfare_core::{FoodSelection, Location, PlannedRoute, TripSummary, TripType};
use wayfare_data::fs::open_utf8_file;

use crate::inputs::{load_catalogue, lookup_city, require_existing, write_json};
use crate::{
    ARG_CITIES, ARG_FOOD, ARG_PLAN, ARG_TRIP_TYPE, CliError, ENV_SUMMARY_CITIES, ENV_SUMMARY_PLAN,
};

/// CLI arguments for the `summary` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read a route written by `wayfare plan` and price the dishes \
                 chosen along it. Dishes are looked up in the catalogue by \
                 city and name, ignoring case.",
    about = "Summarise a planned trip"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct SummaryArgs {
    /// Path to a JSON city catalogue.
    #[arg(long = ARG_CITIES, value_name = "path")]
    #[serde(default)]
    pub(crate) cities: Option<Utf8PathBuf>,
    /// Path to a planned route written by `wayfare plan`.
    #[arg(long = ARG_PLAN, value_name = "path")]
    #[serde(default)]
    pub(crate) plan: Option<Utf8PathBuf>,
    /// Tour the route belongs to; defaults to custom_tour.
    #[arg(long = ARG_TRIP_TYPE, value_name = "type")]
    #[serde(default)]
    pub(crate) trip_type: Option<String>,
    /// Dish chosen in a city, as CITY=ITEM; repeat for more.
    #[arg(long = ARG_FOOD, value_name = "city=item")]
    #[serde(default)]
    pub(crate) food: Option<Vec<String>>,
}

impl SummaryArgs {
    pub(crate) fn into_config(self) -> Result<SummaryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SummaryConfig::try_from(merged)
    }
}

/// A `CITY=ITEM` pair before lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FoodChoice {
    pub(crate) city: String,
    pub(crate) item: String,
}

impl FromStr for FoodChoice {
    type Err = CliError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || CliError::InvalidFoodSelection {
            value: value.to_owned(),
        };
        let (city, item) = value.split_once('=').ok_or_else(invalid)?;
        let (city_name, item_name) = (city.trim(), item.trim());
        if city_name.is_empty() || item_name.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            city: city_name.to_owned(),
            item: item_name.to_owned(),
        })
    }
}

/// Resolved `summary` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SummaryConfig {
    pub(crate) cities: Utf8PathBuf,
    pub(crate) plan: Utf8PathBuf,
    pub(crate) trip_type: TripType,
    pub(crate) food: Vec<FoodChoice>,
}

impl SummaryConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.cities, ARG_CITIES)?;
        require_existing(&self.plan, ARG_PLAN)?;
        Ok(())
    }
}

impl TryFrom<SummaryArgs> for SummaryConfig {
    type Error = CliError;

    fn try_from(args: SummaryArgs) -> Result<Self, Self::Error> {
        let cities = args.cities.ok_or(CliError::MissingArgument {
            field: ARG_CITIES,
            env: ENV_SUMMARY_CITIES,
        })?;
        let plan = args.plan.ok_or(CliError::MissingArgument {
            field: ARG_PLAN,
            env: ENV_SUMMARY_PLAN,
        })?;
        let trip_type = args
            .trip_type
            .as_deref()
            .map(TripType::from_str)
            .transpose()?
            .unwrap_or(TripType::CustomTour);
        let food = args
            .food
            .unwrap_or_default()
            .iter()
            .map(|value| value.parse())
            .collect::<Result<Vec<FoodChoice>, _>>()?;
        Ok(Self {
            cities,
            plan,
            trip_type,
            food,
        })
    }
}

pub(crate) fn run_summary_with(args: SummaryArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let summary = execute_summary(args)?;
    write_json(writer, &summary)
}

fn execute_summary(args: SummaryArgs) -> Result<TripSummary, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let cities = load_catalogue(&config.cities)?;
    let planned = load_planned_route(&config.plan)?;
    let selections = config
        .food
        .iter()
        .map(|choice| select_food(&cities, choice))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TripSummary::for_route(config.trip_type, &planned, &selections))
}

fn select_food(cities: &[Location], choice: &FoodChoice) -> Result<FoodSelection, CliError> {
    let city = lookup_city(cities, &choice.city)?;
    let food = city
        .food
        .iter()
        .find(|dish| dish.name.eq_ignore_ascii_case(&choice.item))
        .ok_or_else(|| CliError::UnknownFood {
            city: city.name.clone(),
            item: choice.item.clone(),
        })?;
    Ok(FoodSelection::new(city.name.clone(), food.clone()))
}

/// Loads a JSON-encoded [`PlannedRoute`] from disk.
pub(crate) fn load_planned_route(path: &Utf8Path) -> Result<PlannedRoute, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenPlan {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParsePlan {
        path: path.to_path_buf(),
        source,
    })
}
