//! `measure` command: leg lengths for a route given in visiting order.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use wayfare_core::{DistanceResult, route_distances};

use crate::inputs::{load_catalogue, lookup_city, require_existing, write_json};
use crate::{ARG_CITIES, ARG_STOPS, CliError, ENV_MEASURE_CITIES, ENV_MEASURE_STOPS};

/// CLI arguments for the `measure` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Look each named city up in the catalogue and measure the \
                 great-circle distance of every consecutive leg. Legs \
                 touching a city without coordinates measure zero.",
    about = "Measure a route in the given order"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct MeasureArgs {
    /// Path to a JSON city catalogue.
    #[arg(long = ARG_CITIES, value_name = "path")]
    #[serde(default)]
    pub(crate) cities: Option<Utf8PathBuf>,
    /// City names in visiting order.
    #[arg(value_name = "city")]
    #[serde(default)]
    pub(crate) stops: Option<Vec<String>>,
}

impl MeasureArgs {
    pub(crate) fn into_config(self) -> Result<MeasureConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        MeasureConfig::try_from(merged)
    }
}

/// Resolved `measure` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MeasureConfig {
    pub(crate) cities: Utf8PathBuf,
    pub(crate) stops: Vec<String>,
}

impl TryFrom<MeasureArgs> for MeasureConfig {
    type Error = CliError;

    fn try_from(args: MeasureArgs) -> Result<Self, Self::Error> {
        let cities = args.cities.ok_or(CliError::MissingArgument {
            field: ARG_CITIES,
            env: ENV_MEASURE_CITIES,
        })?;
        let stops = args
            .stops
            .filter(|stops| !stops.is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_STOPS,
                env: ENV_MEASURE_STOPS,
            })?;
        Ok(Self { cities, stops })
    }
}

pub(crate) fn run_measure_with(args: MeasureArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let measured = execute_measure(args)?;
    write_json(writer, &measured)
}

fn execute_measure(args: MeasureArgs) -> Result<DistanceResult, CliError> {
    let config = args.into_config()?;
    require_existing(&config.cities, ARG_CITIES)?;
    let cities = load_catalogue(&config.cities)?;
    let route = config
        .stops
        .iter()
        .map(|name| lookup_city(&cities, name).cloned())
        .collect::<Result<Vec<_>, _>>()?;
    Ok(route_distances(&route))
}
