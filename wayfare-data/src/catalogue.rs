//! City catalogue backed by a JSON file.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use wayfare_core::{CityProvider, CityProviderError, Location};

use crate::fs::read_to_string;
use crate::normalise::{NormaliseError, cities_from_str};

/// Errors raised while loading a catalogue file.
#[derive(Debug, Error)]
pub enum CatalogueError {
    /// The file could not be read.
    #[error("failed to read city catalogue {path}: {source}")]
    Read {
        /// Catalogue path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The file was read but its contents were not a city list.
    #[error("failed to parse city catalogue {path}: {source}")]
    Normalise {
        /// Catalogue path.
        path: Utf8PathBuf,
        /// Normalisation failure.
        #[source]
        source: NormaliseError,
    },
}

impl From<CatalogueError> for CityProviderError {
    fn from(err: CatalogueError) -> Self {
        match err {
            CatalogueError::Read { .. } => Self::Unavailable {
                message: err.to_string(),
            },
            CatalogueError::Normalise { .. } => Self::Malformed {
                message: err.to_string(),
            },
        }
    }
}

/// [`CityProvider`] reading a JSON document in any shape accepted by
/// [`crate::normalise`].
///
/// The file is read on every call, so edits are picked up without a restart.
///
/// # Examples
/// ```no_run
/// use wayfare_core::CityProvider;
/// use wayfare_data::JsonFileCatalogue;
///
/// let catalogue = JsonFileCatalogue::new("cities.json");
/// let cities = catalogue.cities()?;
/// # Ok::<(), wayfare_core::CityProviderError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileCatalogue {
    path: Utf8PathBuf,
}

impl JsonFileCatalogue {
    /// Create a catalogue reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the catalogue file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Read and normalise the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Read`] when the file cannot be read and
    /// [`CatalogueError::Normalise`] when its contents are not a city list.
    pub fn load(&self) -> Result<Vec<Location>, CatalogueError> {
        let contents = read_to_string(&self.path).map_err(|source| CatalogueError::Read {
            path: self.path.clone(),
            source,
        })?;
        let cities = cities_from_str(&contents).map_err(|source| CatalogueError::Normalise {
            path: self.path.clone(),
            source,
        })?;
        log::debug!("loaded {} cities from {}", cities.len(), self.path);
        Ok(cities)
    }
}

impl CityProvider for JsonFileCatalogue {
    fn cities(&self) -> Result<Vec<Location>, CityProviderError> {
        self.load().map_err(CityProviderError::from)
    }
}
