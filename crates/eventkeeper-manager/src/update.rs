//! Field-by-field event updates.

use std::fmt;

use eventkeeper_core::{EventField, EventRecord, FieldValue, UnknownField, parse_timestamp};
use serde::Serialize;

/// Why a supplied field was not applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RejectionReason {
    /// The record has no field by that name.
    UnknownField,
    /// The field exists but cannot be changed through an update.
    ReadOnly,
    /// The value could not be converted for the field.
    InvalidValue(String),
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField => f.write_str("unknown field"),
            Self::ReadOnly => f.write_str("field is read-only"),
            Self::InvalidValue(detail) => write!(f, "invalid value: {}", detail),
        }
    }
}

impl From<UnknownField> for RejectionReason {
    fn from(value: UnknownField) -> Self {
        match value {
            UnknownField::ReadOnly => Self::ReadOnly,
            UnknownField::Unknown => Self::UnknownField,
        }
    }
}

/// A field the caller supplied that was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRejection {
    /// The field name exactly as supplied.
    pub field: String,
    pub reason: RejectionReason,
}

/// Outcome of `update_event`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateReport {
    /// Fields written and persisted, in the order supplied.
    pub applied: Vec<EventField>,
    /// Fields skipped, in the order supplied.
    pub rejected: Vec<FieldRejection>,
}

impl UpdateReport {
    /// Returns true if every supplied field was applied.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    pub(crate) fn reject(&mut self, field: impl Into<String>, reason: RejectionReason) {
        self.rejected.push(FieldRejection {
            field: field.into(),
            reason,
        });
    }
}

/// Maps a supplied field name onto an updatable field.
pub fn resolve_field(name: &str) -> Result<EventField, RejectionReason> {
    name.parse::<EventField>().map_err(RejectionReason::from)
}

/// Writes `value` into `field` of `record`.
///
/// Timestamp fields accept a parsed timestamp or text in any form
/// `parse_timestamp` understands. Text fields accept text only.
pub fn apply_field(
    record: &mut EventRecord,
    field: EventField,
    value: &FieldValue,
) -> Result<(), RejectionReason> {
    match field {
        EventField::Name => record.name = expect_text(field, value)?,
        EventField::Location => record.location = expect_text(field, value)?,
        EventField::StartTime => record.start_time = expect_timestamp(value)?,
        EventField::EndTime => record.end_time = expect_timestamp(value)?,
    }
    Ok(())
}

fn expect_text(field: EventField, value: &FieldValue) -> Result<String, RejectionReason> {
    match value {
        FieldValue::Text(text) => Ok(text.clone()),
        FieldValue::Timestamp(_) => Err(RejectionReason::InvalidValue(format!(
            "{} expects text, got a timestamp",
            field
        ))),
    }
}

fn expect_timestamp(value: &FieldValue) -> Result<chrono::NaiveDateTime, RejectionReason> {
    match value {
        FieldValue::Timestamp(ts) => Ok(*ts),
        FieldValue::Text(text) => {
            parse_timestamp(text).map_err(|e| RejectionReason::InvalidValue(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 10)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn record() -> EventRecord {
        EventRecord::new("Tech Conference", "New York", ts(9), ts(17))
    }

    #[test]
    fn resolves_names() {
        assert_eq!(resolve_field("location"), Ok(EventField::Location));
        assert_eq!(resolve_field("attendees"), Err(RejectionReason::ReadOnly));
        assert_eq!(resolve_field("venue"), Err(RejectionReason::UnknownField));
    }

    #[test]
    fn text_fields() {
        let mut rec = record();
        apply_field(&mut rec, EventField::Name, &"RustConf".into()).unwrap();
        apply_field(&mut rec, EventField::Location, &"Montreal".into()).unwrap();
        assert_eq!(rec.name, "RustConf");
        assert_eq!(rec.location, "Montreal");
    }

    #[test]
    fn timestamp_fields_parse_text() {
        let mut rec = record();
        apply_field(&mut rec, EventField::StartTime, &"2024-09-10T11:00:00".into()).unwrap();
        apply_field(&mut rec, EventField::EndTime, &FieldValue::from(ts(12))).unwrap();
        assert_eq!(rec.start_time, ts(11));
        assert_eq!(rec.end_time, ts(12));
    }

    #[test]
    fn invalid_values_leave_record_alone() {
        let mut rec = record();
        let err = apply_field(&mut rec, EventField::StartTime, &"soon".into()).unwrap_err();
        assert!(matches!(err, RejectionReason::InvalidValue(ref d) if d.contains("soon")));

        let err = apply_field(&mut rec, EventField::Name, &FieldValue::from(ts(1))).unwrap_err();
        assert!(matches!(err, RejectionReason::InvalidValue(_)));
        assert_eq!(rec, record());
    }

    #[test]
    fn report_serializes_reasons() {
        let mut report = UpdateReport::default();
        report.applied.push(EventField::Name);
        report.reject("venue", RejectionReason::UnknownField);
        assert!(!report.is_clean());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["applied"][0], "name");
        assert_eq!(value["rejected"][0]["field"], "venue");
        assert_eq!(value["rejected"][0]["reason"]["kind"], "unknown_field");
    }

    #[test]
    fn reason_messages() {
        assert_eq!(RejectionReason::ReadOnly.to_string(), "field is read-only");
        assert_eq!(
            RejectionReason::InvalidValue("bad".into()).to_string(),
            "invalid value: bad"
        );
    }
}
