//! Subcommand implementations.
//!
//! Commands write to a [`Printer`] rather than stdout so their output can be
//! checked in tests.

pub mod attendees;
pub mod events;
pub mod reminders;
pub mod weather;

use std::fmt::Display;
use std::io::Write;

use eventkeeper_core::EventView;
use eventkeeper_providers::Forecast;
use serde::Serialize;

use crate::error::CliResult;

/// Writes command output as text or JSON.
pub struct Printer<'a> {
    out: &'a mut dyn Write,
    json: bool,
}

impl<'a> Printer<'a> {
    pub fn new(out: &'a mut dyn Write, json: bool) -> Self {
        Self { out, json }
    }

    /// Returns true when output should be JSON.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Writes `value` as pretty JSON followed by a newline.
    pub fn json(&mut self, value: &impl Serialize) -> CliResult<()> {
        serde_json::to_writer_pretty(&mut *self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Writes one line of text.
    pub fn line(&mut self, text: impl Display) -> CliResult<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }
}

/// Renders an event for the terminal.
pub(crate) fn render_event(view: &EventView) -> String {
    let attendees = if view.attendees.is_empty() {
        "(none)".to_string()
    } else {
        view.attendees.join(", ")
    };
    format!(
        "Event {}: {}\n  Location:  {}\n  Start:     {}\n  End:       {}\n  Attendees: {}",
        view.id, view.name, view.location, view.start_time, view.end_time, attendees
    )
}

/// Renders a forecast on one line.
pub(crate) fn render_forecast(forecast: &Forecast) -> String {
    format!(
        "{}, {:.1}°C to {:.1}°C, {}% chance of rain",
        forecast.condition, forecast.min_temp, forecast.max_temp, forecast.chance_of_rain
    )
}
