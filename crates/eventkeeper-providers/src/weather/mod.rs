//! Weather lookup via the weatherapi.com forecast endpoint.
//!
//! ```ignore
//! use eventkeeper_providers::weather::{WeatherClient, WeatherConfig};
//!
//! let client = WeatherClient::new(WeatherConfig::new(std::env::var("WEATHER_API_KEY").ok()))?;
//! let forecast = client.fetch_forecast("New York").await?;
//! ```

mod client;
mod config;
mod response;

pub use client::WeatherClient;
pub use config::WeatherConfig;
pub use response::parse_forecast;
