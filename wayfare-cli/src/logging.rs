//! Logger installation for the `wayfare` binary.

use std::io::Write;

use clap::ValueEnum;
use env_logger::{Builder, Target, WriteStyle};
use log::{Level, LevelFilter};

use crate::CliError;

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and degraded-data warnings.
    #[default]
    #[value(alias = "warning")]
    Warn,
    /// Progress messages.
    Info,
    /// Per-leg and per-hop detail.
    Debug,
    /// Everything.
    Trace,
    /// Nothing at all.
    Off,
}

impl LogLevel {
    /// The `log` filter for this level.
    #[must_use]
    pub const fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

/// Install a stderr logger filtered at `level`.
///
/// Fails if a logger is already installed.
pub(crate) fn init_logging(level: LogLevel) -> Result<(), CliError> {
    Builder::new()
        .filter_level(level.to_filter())
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        })
        .try_init()
        .map_err(CliError::Logging)
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
