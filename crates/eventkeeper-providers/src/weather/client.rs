//! HTTP client for the forecast service.

use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::provider::{BoxFuture, Forecast, ForecastProvider};

use super::config::WeatherConfig;
use super::response::parse_forecast;

/// Weather lookup client backed by weatherapi.com.
pub struct WeatherClient {
    client: Client,
    config: WeatherConfig,
}

impl WeatherClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: WeatherConfig) -> ServiceResult<Self> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            ServiceError::network(format!("failed to create HTTP client: {}", e)).with_source(e)
        })?;

        Ok(Self { client, config })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    /// Fetches today's forecast for `location` with a single request.
    pub async fn fetch_forecast(&self, location: &str) -> ServiceResult<Forecast> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::configuration("WEATHER_API_KEY is not set"))?;

        let url = self.config.forecast_url(api_key, location)?;

        // The URL carries the API key; log the location only.
        debug!(location = %location, "Requesting forecast");

        let response = self.client.get(url).send().await.map_err(|e| {
            ServiceError::network(format!("forecast request failed: {}", e)).with_source(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ServiceError::http_status(
                status.as_u16(),
                format!("forecast service returned {}", status),
            ));
        }

        let body = response.text().await.map_err(|e| {
            ServiceError::network(format!("failed to read forecast body: {}", e)).with_source(e)
        })?;

        parse_forecast(&body)
    }
}

impl ForecastProvider for WeatherClient {
    fn name(&self) -> &str {
        "weatherapi"
    }

    fn get_forecast<'a>(&'a self, location: &'a str) -> BoxFuture<'a, ServiceResult<Forecast>> {
        Box::pin(async move {
            match self.fetch_forecast(location).await {
                Ok(forecast) => {
                    info!(
                        location = %location,
                        condition = %forecast.condition,
                        "Fetched forecast"
                    );
                    Ok(forecast)
                }
                Err(e) => {
                    let e = e.with_service("weather");
                    warn!(error = %e, location = %location, "Failed to fetch weather data");
                    Err(e)
                }
            }
        })
    }
}
