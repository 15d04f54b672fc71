//! Reminder evaluation.
//!
//! Evaluation is pure: it looks at the events and the clock and says which
//! events are due. Sending is done by the manager. Nothing remembers what was
//! already reminded, so calling twice inside the same window yields the same
//! events twice.

use chrono::NaiveDateTime;
use eventkeeper_core::{EventId, EventRecord, ReminderWindow, format_display};
use serde::Serialize;

use crate::store::EventMap;

/// An event whose start falls inside the reminder window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueReminder {
    pub id: EventId,
    pub event_name: String,
    pub start_time: NaiveDateTime,
    pub attendees: Vec<String>,
    /// Human-readable reminder text.
    pub message: String,
}

/// Returns the reminder text for an event.
pub fn reminder_message(record: &EventRecord) -> String {
    format!(
        "Reminder: The event '{}' is starting soon at {}.",
        record.name,
        format_display(&record.start_time)
    )
}

/// Collects the events due for a reminder at `now`, in store order.
pub fn due_reminders(events: &EventMap, now: NaiveDateTime, window: ReminderWindow) -> Vec<DueReminder> {
    events
        .iter()
        .filter(|(_, record)| window.contains(now, record.start_time))
        .map(|(id, record)| DueReminder {
            id: id.clone(),
            event_name: record.name.clone(),
            start_time: record.start_time,
            attendees: record.attendees.clone(),
            message: reminder_message(record),
        })
        .collect()
}
