//! Core types: events, timestamps, reminder windows, tracing

pub mod event;
pub mod time;
pub mod tracing;

pub use event::{EventField, EventId, EventRecord, EventView, FieldValue, UnknownField};
pub use time::{
    DISPLAY_FORMAT, ReminderWindow, TimestampError, format_display, local_now, parse_timestamp,
};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
