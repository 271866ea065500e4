//! Input validation and output helpers shared by the subcommands.

use std::io::Write;

use camino::Utf8Path;
use serde::Serialize;
use wayfare_core::{Location, find_city};
use wayfare_data::JsonFileCatalogue;
use wayfare_data::fs::is_regular_file;

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match is_regular_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn load_catalogue(path: &Utf8Path) -> Result<Vec<Location>, CliError> {
    let cities = JsonFileCatalogue::new(path.to_path_buf()).load()?;
    log::info!("loaded {} cities from {path}", cities.len());
    Ok(cities)
}

/// Case-insensitive catalogue lookup.
pub(crate) fn lookup_city<'a>(cities: &'a [Location], name: &str) -> Result<&'a Location, CliError> {
    find_city(cities, name).ok_or_else(|| CliError::UnknownCity {
        name: name.to_owned(),
    })
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
