//! Errors raised by the HTTP backend client.

use thiserror::Error;
use wayfare_core::{CityProviderError, PlanError};

use crate::normalise::NormaliseError;

/// Errors from [`crate::backend::HttpBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// The configured base URL could not be parsed.
    #[error("invalid backend URL {url}: {message}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser detail.
        message: String,
    },
    /// The HTTP client or its runtime could not be built.
    #[error("failed to build backend client: {message}")]
    Build {
        /// Builder detail.
        message: String,
    },
    /// The request could not be sent or the connection failed.
    #[error("network error calling {url}: {message}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport detail.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The backend answered with a non-success status.
    #[error("{url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Status detail.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoder detail.
        message: String,
    },
}

impl BackendError {
    pub(crate) fn normalise(url: &str, err: &NormaliseError) -> Self {
        Self::Decode {
            url: url.to_owned(),
            message: err.to_string(),
        }
    }
}

impl From<BackendError> for PlanError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Decode { .. } => Self::InvalidResponse {
                message: err.to_string(),
            },
            _ => Self::Unavailable {
                message: err.to_string(),
            },
        }
    }
}

impl From<BackendError> for CityProviderError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Decode { .. } => Self::Malformed {
                message: err.to_string(),
            },
            _ => Self::Unavailable {
                message: err.to_string(),
            },
        }
    }
}
