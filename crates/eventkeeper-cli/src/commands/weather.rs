//! Forecast command.

use eventkeeper_core::EventId;
use eventkeeper_manager::EventManager;
use eventkeeper_providers::Forecast;
use serde::Serialize;

use super::{Printer, render_forecast};
use crate::error::CliResult;

#[derive(Serialize)]
struct ForecastOutput<'a> {
    id: EventId,
    location: &'a str,
    forecast: Option<Forecast>,
}

/// Prints the forecast for an event's location.
///
/// A missing API key or a failed lookup is not an error; the forecast is
/// reported as unavailable and the reason is logged.
pub async fn forecast(manager: &EventManager, printer: &mut Printer<'_>, id: &str) -> CliResult<()> {
    let forecast = manager.event_forecast(id).await?;
    let location = manager
        .event(id)
        .map(|record| record.location.as_str())
        .unwrap_or_default();

    if printer.is_json() {
        return printer.json(&ForecastOutput {
            id: EventId::from(id),
            location,
            forecast,
        });
    }

    match forecast {
        Some(ref forecast) => printer.line(format!("{}: {}", location, render_forecast(forecast))),
        None => printer.line(format!("{}: forecast unavailable", location)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use eventkeeper_providers::{BoxFuture, ForecastProvider, ServiceError, ServiceResult};

    use super::*;

    struct Cloudy;

    impl ForecastProvider for Cloudy {
        fn name(&self) -> &str {
            "cloudy"
        }

        fn get_forecast<'a>(&'a self, location: &'a str) -> BoxFuture<'a, ServiceResult<Forecast>> {
            Box::pin(async move {
                if location == "Atlantis" {
                    return Err(ServiceError::http_status(400, "No matching location found."));
                }
                Ok(Forecast {
                    condition: "Cloudy".into(),
                    max_temp: 19.0,
                    min_temp: 11.0,
                    chance_of_rain: 40,
                })
            })
        }
    }

    fn manager(location: &str) -> EventManager {
        let start = NaiveDate::from_ymd_opt(2024, 9, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut manager = EventManager::in_memory().with_weather(Arc::new(Cloudy));
        manager
            .create_event("1", "Tech Conference", location, start, start)
            .unwrap();
        manager
    }

    #[tokio::test]
    async fn prints_forecast() {
        let manager = manager("New York");
        let mut buf = Vec::new();
        forecast(&manager, &mut Printer::new(&mut buf, false), "1")
            .await
            .unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "New York: Cloudy, 11.0°C to 19.0°C, 40% chance of rain\n"
        );
    }

    #[tokio::test]
    async fn failed_lookup_is_unavailable() {
        let manager = manager("Atlantis");
        let mut buf = Vec::new();
        forecast(&manager, &mut Printer::new(&mut buf, true), "1")
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["location"], "Atlantis");
        assert!(value["forecast"].is_null());
    }

    #[tokio::test]
    async fn missing_event() {
        let manager = manager("New York");
        let err = forecast(&manager, &mut Printer::new(&mut Vec::new(), false), "2")
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
