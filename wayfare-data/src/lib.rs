//! Data access for the Wayfare trip planner.
//!
//! Responsibilities:
//! - Load city catalogues from JSON files on disk.
//! - Normalise the loosely shaped city and food JSON that sources emit.
//! - Talk to the trip-planning backend over HTTP.
//!
//! Boundaries:
//! - Domain rules live in `wayfare-core`; this crate only adapts IO onto its
//!   [`wayfare_core::CityProvider`] and [`wayfare_core::RoutePlanner`] traits.

#![forbid(unsafe_code)]

pub mod backend;
mod catalogue;
pub mod fs;
pub mod normalise;

pub use backend::{BackendConfig, BackendError, HttpBackend};
pub use catalogue::{CatalogueError, JsonFileCatalogue};
