//! Event types.
//!
//! - [`EventId`]: externally supplied identifier, string-encoded
//! - [`EventRecord`]: the persisted shape of an event
//! - [`EventView`]: a display-ready copy with human-readable timestamps
//! - [`EventField`] / [`FieldValue`]: the vocabulary of `update_event`

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time::format_display;

/// Identifier of an event.
///
/// Callers may use strings or integers; both are stored as strings so the
/// persisted document can key on them directly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EventId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for EventId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// A stored event.
///
/// Field order here is the field order of the persisted JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Display name.
    pub name: String,
    /// Free-text location, also used as the weather lookup key.
    pub location: String,
    /// Start time (local wall clock).
    pub start_time: NaiveDateTime,
    /// End time (local wall clock). Not validated against `start_time`.
    pub end_time: NaiveDateTime,
    /// Attendees in the order they were added. Duplicates are allowed.
    #[serde(default)]
    pub attendees: Vec<String>,
}

impl EventRecord {
    /// Creates a record with no attendees.
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            start_time,
            end_time,
            attendees: Vec::new(),
        }
    }

    /// Builds the display view of this record.
    pub fn view(&self, id: &EventId) -> EventView {
        EventView {
            id: id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            start_time: format_display(&self.start_time),
            end_time: format_display(&self.end_time),
            attendees: self.attendees.clone(),
        }
    }
}

/// Display-ready view of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventView {
    pub id: EventId,
    pub name: String,
    pub location: String,
    /// Start time formatted as `%Y-%m-%d %H:%M:%S`.
    pub start_time: String,
    /// End time formatted as `%Y-%m-%d %H:%M:%S`.
    pub end_time: String,
    pub attendees: Vec<String>,
}

/// The fields `update_event` may overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventField {
    Name,
    Location,
    StartTime,
    EndTime,
}

impl EventField {
    /// Every mutable field.
    pub const ALL: [EventField; 4] = [
        EventField::Name,
        EventField::Location,
        EventField::StartTime,
        EventField::EndTime,
    ];

    /// Returns the field name as used in the persisted document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::StartTime => "start_time",
            Self::EndTime => "end_time",
        }
    }

    /// Returns true if the field holds a timestamp.
    pub fn is_timestamp(&self) -> bool {
        matches!(self, Self::StartTime | Self::EndTime)
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field name could not be mapped to an [`EventField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownField {
    /// The record has this field but `update_event` must not touch it.
    ReadOnly,
    /// The record has no such field.
    Unknown,
}

impl FromStr for EventField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "location" => Ok(Self::Location),
            "start_time" => Ok(Self::StartTime),
            "end_time" => Ok(Self::EndTime),
            "attendees" => Err(UnknownField::ReadOnly),
            _ => Err(UnknownField::Unknown),
        }
    }
}

/// A new value supplied to `update_event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free text. For timestamp fields the text is parsed.
    Text(String),
    /// An already-parsed timestamp.
    Timestamp(NaiveDateTime),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}
