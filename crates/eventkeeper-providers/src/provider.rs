//! Collaborator traits used by the event manager.
//!
//! The manager never talks to the network directly. It is handed a
//! [`ForecastProvider`] for weather enrichment and a [`ReminderNotifier`] for
//! reminder delivery, so its logic can be exercised with in-process fakes.

use std::future::Future;
use std::pin::Pin;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// A boxed future for object-safe async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Same-day forecast for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Condition summary, e.g. "Partly cloudy".
    pub condition: String,
    /// Maximum temperature in degrees Celsius.
    pub max_temp: f64,
    /// Minimum temperature in degrees Celsius.
    pub min_temp: f64,
    /// Daily chance of rain, 0 to 100.
    pub chance_of_rain: u8,
}

/// Source of weather forecasts.
///
/// Implementations issue at most one outbound request per call and never
/// retry; a failed lookup is returned as an error for the caller to report.
pub trait ForecastProvider: Send + Sync {
    /// Returns the provider name used in logs.
    fn name(&self) -> &str;

    /// Looks up today's forecast for `location`.
    fn get_forecast<'a>(&'a self, location: &'a str) -> BoxFuture<'a, ServiceResult<Forecast>>;
}

/// A recipient that could not be reached.
#[derive(Debug)]
pub struct DeliveryFailure {
    pub recipient: String,
    pub error: ServiceError,
}

/// Outcome of one `send_reminder` call.
///
/// Delivery problems are collected here rather than returned as errors: one
/// failing recipient never prevents delivery to the others.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Recipients whose message was accepted by the transport.
    pub delivered: Vec<String>,
    /// Recipients whose message could not be built or sent.
    pub failures: Vec<DeliveryFailure>,
    /// Set when no session could be established; nothing was sent.
    pub session_error: Option<ServiceError>,
    /// Set when delivery is not configured; nothing was attempted.
    pub disabled: bool,
}

impl DeliveryReport {
    /// Report for a notifier that has no credentials configured.
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Report for a call whose session could not be opened.
    pub fn session_failed(error: ServiceError) -> Self {
        Self {
            session_error: Some(error),
            ..Self::default()
        }
    }

    /// Records a successful delivery.
    pub fn record_delivered(&mut self, recipient: impl Into<String>) {
        self.delivered.push(recipient.into());
    }

    /// Records a failed delivery.
    pub fn record_failure(&mut self, recipient: impl Into<String>, error: ServiceError) {
        self.failures.push(DeliveryFailure {
            recipient: recipient.into(),
            error,
        });
    }

    /// Returns true if every recipient was reached (vacuously true for none).
    pub fn is_complete(&self) -> bool {
        !self.disabled && self.session_error.is_none() && self.failures.is_empty()
    }

    /// Recipients that failed, in the order they were attempted.
    pub fn failed_recipients(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|f| f.recipient.as_str())
    }
}

/// Delivers event reminders to attendees.
pub trait ReminderNotifier: Send + Sync {
    /// Returns the notifier name used in logs.
    fn name(&self) -> &str;

    /// Sends one reminder for an event to every recipient.
    fn send_reminder<'a>(
        &'a self,
        event_name: &'a str,
        start_time: NaiveDateTime,
        recipients: &'a [String],
    ) -> BoxFuture<'a, DeliveryReport>;
}
