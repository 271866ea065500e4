//! `plan` command: resolve a tour and order its cities.

use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfare_core::{
    CityPool, FallbackPlanner, MAX_LONDON_TOUR_CITIES, NearestNeighbourPlanner, PlannedRoute,
    RoutePlanner, TourRequest, TripType,
};
use wayfare_data::{BackendConfig, HttpBackend};

use crate::inputs::{load_catalogue, require_existing, write_json};
use crate::{
    ARG_ALL_CITIES, ARG_BACKEND_TIMEOUT, ARG_BACKEND_URL, ARG_CITIES, ARG_CITY_COUNT, ARG_START,
    ARG_TRIP_TYPE, ARG_VISIT, CliError, ENV_PLAN_CITIES, ENV_PLAN_START,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve a tour against a city catalogue and order its stops. \
                 Without a backend URL the nearest-neighbour heuristic runs \
                 locally; with one, the backend is asked first and local \
                 planning takes over if it fails.",
    about = "Plan a route through a city catalogue"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct PlanArgs {
    /// Path to a JSON city catalogue.
    #[arg(long = ARG_CITIES, value_name = "path")]
    #[serde(default)]
    pub(crate) cities: Option<Utf8PathBuf>,
    /// Tour to plan: paris_tour, london_tour, berlin_tour or custom_tour.
    #[arg(long = ARG_TRIP_TYPE, value_name = "type")]
    #[serde(default)]
    pub(crate) trip_type: Option<String>,
    /// Starting city for a custom tour.
    #[arg(long = ARG_START, value_name = "city")]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// City to visit on a custom tour; repeat for more.
    #[arg(long = ARG_VISIT, value_name = "city")]
    #[serde(default)]
    pub(crate) visit: Option<Vec<String>>,
    /// Stops on a London tour, London included.
    #[arg(long = ARG_CITY_COUNT, value_name = "n")]
    #[serde(default)]
    pub(crate) city_count: Option<usize>,
    /// Resolve custom tours against every city rather than the core set.
    #[arg(long = ARG_ALL_CITIES, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) all_cities: Option<bool>,
    /// Base URL of a route optimisation backend.
    #[arg(long = ARG_BACKEND_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) backend_url: Option<String>,
    /// Backend request timeout in seconds.
    #[arg(long = ARG_BACKEND_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) backend_timeout_secs: Option<u64>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Path to the city catalogue.
    pub(crate) cities: Utf8PathBuf,
    /// The tour to resolve.
    pub(crate) tour: TourRequest,
    /// Backend settings, when a backend should be consulted.
    pub(crate) backend: Option<BackendConfig>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.cities, ARG_CITIES)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let cities = args.cities.ok_or(CliError::MissingArgument {
            field: ARG_CITIES,
            env: ENV_PLAN_CITIES,
        })?;

        // A named start implies a custom tour.
        let trip_type = match (args.trip_type.as_deref(), args.start.is_some()) {
            (Some(raw), _) => TripType::from_str(raw)?,
            (None, true) => TripType::CustomTour,
            (None, false) => TripType::ParisTour,
        };
        let tour = match trip_type {
            TripType::ParisTour => TourRequest::Paris,
            TripType::BerlinTour => TourRequest::Berlin,
            TripType::LondonTour => TourRequest::London {
                cities: args.city_count.unwrap_or(MAX_LONDON_TOUR_CITIES),
            },
            TripType::CustomTour => TourRequest::Custom {
                start: args.start.ok_or(CliError::MissingArgument {
                    field: ARG_START,
                    env: ENV_PLAN_START,
                })?,
                visit: args.visit.unwrap_or_default(),
                pool: if args.all_cities.unwrap_or(false) {
                    CityPool::All
                } else {
                    CityPool::Core
                },
            },
        };

        let timeout = args.backend_timeout_secs.map(Duration::from_secs);
        let backend = args.backend_url.map(|url| {
            let config = BackendConfig::new(url);
            match timeout {
                Some(limit) => config.with_timeout(limit),
                None => config,
            }
        });

        Ok(Self {
            cities,
            tour,
            backend,
        })
    }
}

/// Builds the route planner for the current plan invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn RoutePlanner>, CliError>;
}

pub(crate) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn RoutePlanner>, CliError> {
        let Some(backend) = &config.backend else {
            return Ok(Box::new(NearestNeighbourPlanner));
        };
        let client =
            HttpBackend::with_config(backend.clone()).map_err(|source| CliError::BuildBackend {
                base_url: backend.base_url.clone(),
                source,
            })?;
        Ok(Box::new(FallbackPlanner::new(client)))
    }
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let planned = execute_plan(args, builder)?;
    write_json(writer, &planned)
}

fn execute_plan(args: PlanArgs, builder: &dyn PlannerBuilder) -> Result<PlannedRoute, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let cities = load_catalogue(&config.cities)?;
    let request = config.tour.resolve(&cities)?;
    let planner = builder.build(&config)?;
    let planned = planner.plan(&request)?;
    log::info!(
        "planned {} with {} stops via {}",
        config.tour.trip_type(),
        planned.route.len(),
        planned.method
    );
    Ok(planned)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
