//! Attendee commands.

use eventkeeper_manager::EventManager;

use super::Printer;
use crate::error::CliResult;

/// Adds an attendee to an event.
pub fn attend(
    manager: &mut EventManager,
    printer: &mut Printer<'_>,
    id: &str,
    attendee: &str,
) -> CliResult<()> {
    manager.add_attendee(id, attendee)?;
    if printer.is_json() {
        printer.json(&manager.list_attendees(id)?)
    } else {
        printer.line(format!("Added {} to event {}", attendee, id))
    }
}

/// Prints the attendees of an event, one per line.
pub fn attendees(manager: &EventManager, printer: &mut Printer<'_>, id: &str) -> CliResult<()> {
    let attendees = manager.list_attendees(id)?;
    if printer.is_json() {
        return printer.json(&attendees);
    }
    if attendees.is_empty() {
        return printer.line(format!("No attendees for event {}", id));
    }
    for attendee in attendees {
        printer.line(attendee)?;
    }
    Ok(())
}
