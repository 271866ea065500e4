//! HTTP adapter for the trip-planning backend.
//!
//! [`HttpBackend`] serves both as a [`wayfare_core::CityProvider`] and as a
//! [`wayfare_core::RoutePlanner`]. Wrap it in a
//! [`wayfare_core::FallbackPlanner`] to keep planning when the service is
//! down.

mod client;
mod error;
mod wire;

pub use client::{BackendConfig, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpBackend};
pub use error::BackendError;
pub use wire::{OptimizeRequest, OptimizeResponse};
