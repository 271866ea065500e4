//! Command-line interface for the Wayfare trip planner.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod error;
mod inputs;
mod logging;
mod measure;
mod plan;
mod summary;

pub use error::CliError;
pub use logging::LogLevel;

use measure::MeasureArgs;
use plan::{DefaultPlannerBuilder, PlanArgs, PlannerBuilder};
use summary::SummaryArgs;

const ARG_CITIES: &str = "cities";
const ARG_TRIP_TYPE: &str = "trip-type";
const ARG_START: &str = "start";
const ARG_VISIT: &str = "visit";
const ARG_CITY_COUNT: &str = "city-count";
const ARG_ALL_CITIES: &str = "all-cities";
const ARG_BACKEND_URL: &str = "backend-url";
const ARG_BACKEND_TIMEOUT: &str = "backend-timeout-secs";
const ARG_STOPS: &str = "stops";
const ARG_PLAN: &str = "plan";
const ARG_FOOD: &str = "food";
const ARG_LOG_LEVEL: &str = "log-level";
const ENV_PLAN_CITIES: &str = "WAYFARE_CMDS_PLAN_CITIES";
const ENV_PLAN_START: &str = "WAYFARE_CMDS_PLAN_START";
const ENV_MEASURE_CITIES: &str = "WAYFARE_CMDS_MEASURE_CITIES";
const ENV_MEASURE_STOPS: &str = "WAYFARE_CMDS_MEASURE_STOPS";
const ENV_SUMMARY_CITIES: &str = "WAYFARE_CMDS_SUMMARY_CITIES";
const ENV_SUMMARY_PLAN: &str = "WAYFARE_CMDS_SUMMARY_PLAN";
const ENV_LOG_LEVEL: &str = "WAYFARE_LOG_LEVEL";

/// Run the Wayfare CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, when an
/// input cannot be loaded, or when planning fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    logging::init_logging(cli.log_level)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &DefaultPlannerBuilder, &mut stdout)
}

fn dispatch(
    command: Command,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Plan(args) => plan::run_plan_with(args, builder, writer),
        Command::Measure(args) => measure::run_measure_with(args, writer),
        Command::Summary(args) => summary::run_summary_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfare",
    about = "Plan, measure and cost trips between European cities",
    version
)]
struct Cli {
    /// Log verbosity written to stderr.
    #[arg(
        long = ARG_LOG_LEVEL,
        env = ENV_LOG_LEVEL,
        value_enum,
        global = true,
        default_value_t = LogLevel::Warn
    )]
    log_level: LogLevel,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order a tour's cities with the nearest-neighbour heuristic or a backend.
    Plan(PlanArgs),
    /// Measure the legs of a route given in visiting order.
    Measure(MeasureArgs),
    /// Summarise distance and food spending for a planned route.
    Summary(SummaryArgs),
}

#[cfg(test)]
mod tests;
