//! weatherapi.com forecast response parsing.
//!
//! Only `forecast.forecastday[0].day` is read; everything else in the body is
//! ignored.

use serde::{Deserialize, Deserializer};

use crate::error::{ServiceError, ServiceResult};
use crate::provider::Forecast;

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    forecast: ForecastBlock,
}

#[derive(Debug, Deserialize)]
struct ForecastBlock {
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    day: DaySummary,
}

#[derive(Debug, Deserialize)]
struct DaySummary {
    condition: Condition,
    maxtemp_c: f64,
    mintemp_c: f64,
    #[serde(deserialize_with = "percentage")]
    daily_chance_of_rain: u8,
}

#[derive(Debug, Deserialize)]
struct Condition {
    text: String,
}

/// Accepts the percentage as a number or a numeric string, clamped to 0..=100.
fn percentage<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let raw = match &value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| serde::de::Error::custom(format!("invalid percentage: {value}")))?;

    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// Normalizes a forecast response body.
pub fn parse_forecast(body: &str) -> ServiceResult<Forecast> {
    let response: ForecastResponse = serde_json::from_str(body).map_err(|e| {
        ServiceError::invalid_response(format!("unexpected forecast payload: {}", e)).with_source(e)
    })?;

    let day = response
        .forecast
        .forecastday
        .into_iter()
        .next()
        .ok_or_else(|| ServiceError::invalid_response("forecast contained no days"))?
        .day;

    Ok(Forecast {
        condition: day.condition.text,
        max_temp: day.maxtemp_c,
        min_temp: day.mintemp_c,
        chance_of_rain: day.daily_chance_of_rain,
    })
}
