//! Timestamp handling and the reminder lookahead window.
//!
//! Event times are timezone-naive local wall-clock values ([`NaiveDateTime`]).
//! They are stored in ISO-8601 form (`2024-05-01T09:30:00`) and shown to
//! humans as `2024-05-01 09:30:00`.

use chrono::{DateTime, Duration, Local, NaiveDateTime};
use thiserror::Error;

/// Format used for human-readable timestamps.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted in addition to the canonical ISO-8601 form.
const LENIENT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Error returned when a timestamp string cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp '{input}': expected YYYY-MM-DDTHH:MM[:SS] or RFC 3339")]
pub struct TimestampError {
    input: String,
}

impl TimestampError {
    /// Returns the rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Parses a timestamp from user or API input.
///
/// Accepts the canonical ISO-8601 form with optional fractional seconds, a
/// space-separated variant, minute precision, and RFC 3339 strings carrying an
/// offset. Offset-bearing values are converted to local wall-clock time so
/// every stored value shares the same (naive, local) semantics.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, TimestampError> {
    let trimmed = input.trim();

    if let Ok(ts) = trimmed.parse::<NaiveDateTime>() {
        return Ok(ts);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    LENIENT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| TimestampError {
            input: input.to_string(),
        })
}

/// Formats a timestamp for display (`%Y-%m-%d %H:%M:%S`).
pub fn format_display(ts: &NaiveDateTime) -> String {
    ts.format(DISPLAY_FORMAT).to_string()
}

/// Returns the current local wall-clock time.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// How far ahead of an event's start a reminder becomes due.
///
/// An event qualifies when it starts strictly after `now` and no later than
/// `now + lookahead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    lookahead: Duration,
}

impl Default for ReminderWindow {
    fn default() -> Self {
        Self::from_hours(Self::DEFAULT_HOURS)
    }
}

impl ReminderWindow {
    /// Default lookahead in hours.
    pub const DEFAULT_HOURS: u32 = 24;

    /// Creates a window reaching `hours` into the future.
    pub fn from_hours(hours: u32) -> Self {
        Self {
            lookahead: Duration::hours(i64::from(hours)),
        }
    }

    /// Creates a window from an arbitrary duration.
    pub fn from_duration(lookahead: Duration) -> Self {
        Self { lookahead }
    }

    /// Returns the lookahead duration.
    pub fn lookahead(&self) -> Duration {
        self.lookahead
    }

    /// Returns true if an event starting at `start` is due at `now`.
    pub fn contains(&self, now: NaiveDateTime, start: NaiveDateTime) -> bool {
        let delta = start - now;
        delta > Duration::zero() && delta <= self.lookahead
    }
}
