//! Error types emitted by the Wayfare CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfare_core::{PlanError, TourError};
use wayfare_data::{BackendError, CatalogueError};

/// Errors emitted by the Wayfare CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without dashes.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The logger could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] log::SetLoggerError),
    /// Loading the city catalogue failed.
    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
    /// A named city is not in the catalogue.
    #[error("city {name:?} is not in the catalogue")]
    UnknownCity {
        /// The name as given.
        name: String,
    },
    /// A food selection named a dish the city does not offer.
    #[error("{city} does not offer {item:?}")]
    UnknownFood {
        /// City the dish was chosen in.
        city: String,
        /// The dish as given.
        item: String,
    },
    /// A `--food` value was not of the form `CITY=ITEM`.
    #[error("food selection {value:?} must look like CITY=ITEM")]
    InvalidFoodSelection {
        /// The rejected value.
        value: String,
    },
    /// The tour could not be resolved against the catalogue.
    #[error(transparent)]
    Tour(#[from] TourError),
    /// The backend client could not be configured.
    #[error("failed to configure backend {base_url:?}: {source}")]
    BuildBackend {
        /// Configured base URL.
        base_url: String,
        /// Underlying client error.
        #[source]
        source: BackendError,
    },
    /// Planning the route failed.
    #[error("planning failed: {0}")]
    Plan(#[from] PlanError),
    /// Opening the planned route file failed.
    #[error("failed to open planned route at {path:?}: {source}")]
    OpenPlan {
        /// Plan path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The planned route JSON could not be decoded.
    #[error("failed to parse planned route JSON at {path:?}: {source}")]
    ParsePlan {
        /// Plan path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
