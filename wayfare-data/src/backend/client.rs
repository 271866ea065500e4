//! Blocking client for the trip-planning backend.
//!
//! The [`RoutePlanner`] and [`CityProvider`] traits are synchronous so the
//! core stays embeddable anywhere. [`HttpBackend`] bridges them to async
//! `reqwest` calls by blocking on a Tokio runtime it owns.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;
use wayfare_core::distance::round_km;
use wayfare_core::{
    CityProvider, CityProviderError, FoodItem, Location, LocationId, PlanError, PlanMethod,
    PlanRequest, PlannedRoute, RoutePlanner, find_city,
};

use super::error::BackendError;
use super::wire::{OptimizeRequest, OptimizeResponse};
use crate::normalise::{cities_from_value, foods_from_value};

/// Default user agent for backend requests.
pub const DEFAULT_USER_AGENT: &str = "wayfare/0.1";

/// Default backend address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Method label used when the backend reports none.
const UNLABELLED_METHOD: &str = "backend";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`HttpBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the service, e.g. `"http://localhost:8080"`.
    pub base_url: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl BackendConfig {
    /// Settings for `base_url` with default timeout and user agent.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP client for the backend's city, health and optimisation endpoints.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the client blocks on its own current-thread
/// runtime. Inside a multi-threaded runtime it borrows that runtime's handle
/// through [`tokio::task::block_in_place`]. Inside a `current_thread` runtime
/// it falls back to its own runtime, which can deadlock if the caller's
/// runtime drives IO this request depends on.
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
    base: Url,
    runtime: Runtime,
}

impl std::fmt::Debug for HttpBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpBackend")
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl HttpBackend {
    /// Create a client for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidUrl`] for an unparseable URL and
    /// [`BackendError::Build`] if the HTTP client or runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, BackendError> {
        Self::with_config(BackendConfig::new(base_url))
    }

    /// Create a client from explicit settings.
    ///
    /// # Errors
    ///
    /// As for [`HttpBackend::new`].
    pub fn with_config(config: BackendConfig) -> Result<Self, BackendError> {
        let base = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(|err| BackendError::Build {
                message: err.to_string(),
            })?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| BackendError::Build {
                message: err.to_string(),
            })?;
        Ok(Self {
            client,
            config,
            base,
            runtime,
        })
    }

    /// Settings this client was built with.
    #[must_use]
    pub const fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Whether `GET /health` answers `OK`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the service cannot be reached or
    /// answers with a non-success status.
    pub fn health(&self) -> Result<bool, BackendError> {
        let url = self.endpoint("health")?;
        self.block_on(async {
            let response = self.send(self.client.get(url.as_str()), url.as_str()).await?;
            let body = response.text().await.map_err(|err| BackendError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            })?;
            Ok::<_, BackendError>(body.trim().eq_ignore_ascii_case("ok"))
        })
    }

    /// Fetch and normalise `GET /api/cities`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] for transport failures and
    /// [`BackendError::Decode`] when the body is not a city list.
    pub fn fetch_cities(&self) -> Result<Vec<Location>, BackendError> {
        let url = self.endpoint("api/cities")?;
        let document: serde_json::Value = self.get_json(&url)?;
        cities_from_value(&document).map_err(|err| BackendError::normalise(url.as_str(), &err))
    }

    /// Fetch and normalise `GET /api/cities/{id}/foods`.
    ///
    /// # Errors
    ///
    /// As for [`HttpBackend::fetch_cities`].
    pub fn fetch_city_foods(&self, id: &LocationId) -> Result<Vec<FoodItem>, BackendError> {
        let url = self.endpoint(&format!("api/cities/{id}/foods"))?;
        let document: serde_json::Value = self.get_json(&url)?;
        foods_from_value(&document).map_err(|err| BackendError::normalise(url.as_str(), &err))
    }

    /// Send `request` to `POST /api/routes/optimize`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] for transport failures and
    /// [`BackendError::Decode`] when the body is not an optimisation result.
    pub fn optimize(&self, request: &PlanRequest) -> Result<OptimizeResponse, BackendError> {
        let url = self.endpoint("api/routes/optimize")?;
        let body = OptimizeRequest::from(request);
        self.block_on(async {
            let response = self
                .send(self.client.post(url.as_str()).json(&body), url.as_str())
                .await?;
            decode(response, url.as_str()).await
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base.join(path).map_err(|err| BackendError::InvalidUrl {
            url: format!("{}{path}", self.base),
            message: err.to_string(),
        })
    }

    fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, BackendError> {
        self.block_on(async {
            let response = self.send(self.client.get(url.as_str()), url.as_str()).await?;
            decode(response, url.as_str()).await
        })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<reqwest::Response, BackendError> {
        log::debug!("calling backend {url}");
        request
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> BackendError {
        if error.is_timeout() {
            return BackendError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return BackendError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        BackendError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, url: &str) -> Result<T, BackendError> {
    response.json().await.map_err(|err| BackendError::Decode {
        url: url.to_owned(),
        message: err.to_string(),
    })
}

/// Parse a base URL, ensuring relative joins append to its path.
fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let invalid = |message: String| BackendError::InvalidUrl {
        url: raw.to_owned(),
        message,
    };
    let mut base = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("URL cannot be used as a base".to_owned()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Map backend route names back onto the request's cities.
pub(crate) fn resolve_route(
    request: &PlanRequest,
    response: OptimizeResponse,
) -> Result<PlannedRoute, PlanError> {
    let known: Vec<Location> = std::iter::once(request.starting_city.clone())
        .chain(request.cities.iter().cloned())
        .collect();
    let route = response
        .route
        .iter()
        .map(|name| {
            find_city(&known, name)
                .cloned()
                .ok_or_else(|| PlanError::UnknownCity { name: name.clone() })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if route.first().map(|first| &first.id) != Some(&request.starting_city.id) {
        return Err(PlanError::InvalidResponse {
            message: "route does not begin at the starting city".to_owned(),
        });
    }
    let total_distance = response
        .total_distance
        .unwrap_or_else(|| round_km(response.distances.iter().sum()));
    Ok(PlannedRoute {
        route,
        distances: response.distances,
        total_distance,
        optimized: response.optimized,
        method: PlanMethod::Backend(
            response
                .method
                .unwrap_or_else(|| UNLABELLED_METHOD.to_owned()),
        ),
    })
}

impl RoutePlanner for HttpBackend {
    fn plan(&self, request: &PlanRequest) -> Result<PlannedRoute, PlanError> {
        request.ensure_starting_city()?;
        let response = self.optimize(request)?;
        resolve_route(request, response)
    }
}

impl CityProvider for HttpBackend {
    fn cities(&self) -> Result<Vec<Location>, CityProviderError> {
        self.fetch_cities().map_err(CityProviderError::from)
    }
}
