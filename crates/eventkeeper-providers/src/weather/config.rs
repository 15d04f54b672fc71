//! Weather client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{ServiceError, ServiceResult};

/// Configuration for the weather lookup client.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Service root; the forecast path is appended to it.
    pub base_url: String,

    /// API key sent as the `key` query parameter.
    pub api_key: Option<String>,

    /// Request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,

    /// User agent string.
    pub user_agent: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout: None,
            user_agent: format!("eventkeeper/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl WeatherConfig {
    /// Public weatherapi.com endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "http://api.weatherapi.com";

    /// Path of the forecast resource relative to the base URL.
    const FORECAST_PATH: &'static str = "v1/forecast.json";

    /// Creates a configuration using the public endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            ..Default::default()
        }
    }

    /// Points the client at a different service root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Builds the one-day forecast URL for `location`.
    pub fn forecast_url(&self, api_key: &str, location: &str) -> ServiceResult<Url> {
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }

        let mut url = Url::parse(&base)
            .and_then(|root| root.join(Self::FORECAST_PATH))
            .map_err(|e| {
                ServiceError::configuration(format!("invalid weather base URL '{}'", self.base_url))
                    .with_source(e)
            })?;

        url.query_pairs_mut()
            .append_pair("key", api_key)
            .append_pair("q", location)
            .append_pair("days", "1")
            .append_pair("aqi", "no")
            .append_pair("alerts", "no");

        Ok(url)
    }
}
