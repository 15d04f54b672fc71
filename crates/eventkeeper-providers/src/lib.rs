//! External services used by the event manager.
//!
//! - [`ForecastProvider`] / [`weather::WeatherClient`]: same-day forecast for a location
//! - [`ReminderNotifier`] / [`mail::EmailNotifier`]: reminder emails to attendees
//! - [`ServiceError`]: failure of either service
//!
//! ```text
//!  EventManager ──▶ ForecastProvider ──▶ WeatherClient ──▶ weatherapi.com
//!       │
//!       └────────▶ ReminderNotifier ──▶ EmailNotifier ──▶ MailTransport ──▶ SMTP
//! ```

pub mod error;
#[cfg(feature = "email")]
pub mod mail;
pub mod provider;
#[cfg(feature = "weather")]
pub mod weather;

pub use error::{ServiceError, ServiceErrorCode, ServiceResult};
pub use provider::{
    BoxFuture, DeliveryFailure, DeliveryReport, Forecast, ForecastProvider, ReminderNotifier,
};
