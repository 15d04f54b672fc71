//! Event commands: create, show, list, update, delete.

use chrono::NaiveDateTime;
use eventkeeper_core::{EventId, FieldValue};
use eventkeeper_manager::EventManager;

use super::{Printer, render_event, render_forecast};
use crate::error::{CliError, CliResult};

/// Creates an event and prints it.
pub fn create(
    manager: &mut EventManager,
    printer: &mut Printer<'_>,
    id: &str,
    name: &str,
    location: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> CliResult<()> {
    manager.create_event(id, name, location, start, end)?;
    let view = manager.read_event(id)?;

    if printer.is_json() {
        printer.json(&view)
    } else {
        printer.line(format!("Created event {}", view.id))?;
        printer.line(render_event(&view))
    }
}

/// Prints one event, optionally with the forecast for its location.
pub async fn show(
    manager: &EventManager,
    printer: &mut Printer<'_>,
    id: &str,
    weather: bool,
) -> CliResult<()> {
    if !weather {
        let view = manager.read_event(id)?;
        return if printer.is_json() {
            printer.json(&view)
        } else {
            printer.line(render_event(&view))
        };
    }

    let details = manager.read_event_with_forecast(id).await?;
    if printer.is_json() {
        return printer.json(&details);
    }

    printer.line(render_event(&details.event))?;
    match details.forecast {
        Some(ref forecast) => printer.line(format!("  Weather:   {}", render_forecast(forecast))),
        None => printer.line("  Weather:   unavailable"),
    }
}

/// Prints every event in id order.
pub fn list(manager: &EventManager, printer: &mut Printer<'_>) -> CliResult<()> {
    let views: Vec<_> = manager
        .events()
        .map(|(id, record)| record.view(id))
        .collect();

    if printer.is_json() {
        return printer.json(&views);
    }
    if views.is_empty() {
        return printer.line("No events");
    }
    for view in views {
        printer.line(format!(
            "{}\t{}\t{} @ {} ({} attendees)",
            view.id,
            view.start_time,
            view.name,
            view.location,
            view.attendees.len()
        ))?;
    }
    Ok(())
}

/// Applies `field=value` assignments to an event.
///
/// Fields that could not be applied are printed and turn the command into
/// a failure, after the valid ones have been saved.
pub fn update(
    manager: &mut EventManager,
    printer: &mut Printer<'_>,
    id: &str,
    assignments: Vec<(String, String)>,
) -> CliResult<()> {
    let updates = assignments
        .into_iter()
        .map(|(field, value)| (field, FieldValue::Text(value)));
    let report = manager.update_event(id, updates)?;

    if printer.is_json() {
        printer.json(&report)?;
    } else {
        for field in &report.applied {
            printer.line(format!("Updated {}", field))?;
        }
        for rejection in &report.rejected {
            printer.line(format!("Rejected {}: {}", rejection.field, rejection.reason))?;
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        let fields: Vec<_> = report.rejected.iter().map(|r| r.field.as_str()).collect();
        Err(CliError::Rejected(fields.join(", ")))
    }
}

/// Deletes an event.
pub fn delete(manager: &mut EventManager, printer: &mut Printer<'_>, id: &str) -> CliResult<()> {
    manager.delete_event(id)?;
    if printer.is_json() {
        printer.json(&serde_json::json!({ "deleted": EventId::from(id) }))
    } else {
        printer.line(format!("Deleted event {}", id))
    }
}
