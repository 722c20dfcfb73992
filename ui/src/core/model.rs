//! The observation record and its persisted JSON shape.

use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date, OffsetDateTime};

use super::error::StoreError;

/// Millisecond-resolution creation id. Unique within a collection.
pub type ObservationId = i64;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// A single dated note about one student.
///
/// Field names follow the stored JSON (`studentName`, `type`, ...) so collections written by
/// earlier builds of the tool load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: ObservationId,
    pub student_name: String,
    #[serde(with = "iso_date")]
    pub date: Date,
    #[serde(rename = "type")]
    pub kind: String,
    pub notes: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl Observation {
    /// Builds a record stamped at `now`, picking an id that stays unique and increasing
    /// relative to `existing`. Fails when `existing` has exhausted the id space.
    pub fn create(
        existing: &[Observation],
        student_name: impl Into<String>,
        date: Date,
        kind: impl Into<String>,
        notes: impl Into<String>,
        now: OffsetDateTime,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            id: next_id(existing, now)?,
            student_name: student_name.into(),
            date,
            kind: kind.into(),
            notes: notes.into(),
            timestamp: now,
        })
    }

    /// Whether every field the sheets rely on carries a value.
    pub fn is_complete(&self) -> bool {
        !self.student_name.trim().is_empty()
            && !self.kind.is_empty()
            && !self.notes.trim().is_empty()
    }
}

/// Creation time in milliseconds, bumped past the largest id already stored when two
/// records land on the same millisecond (or the clock steps backwards). A collection already
/// holding `ObservationId::MAX` can't yield a fresh id and is reported as corrupt.
pub fn next_id(
    existing: &[Observation],
    now: OffsetDateTime,
) -> Result<ObservationId, StoreError> {
    let stamp = (now.unix_timestamp_nanos() / 1_000_000) as ObservationId;
    match existing.iter().map(|obs| obs.id).max() {
        Some(max) if max >= stamp => max
            .checked_add(1)
            .ok_or_else(|| StoreError::Corrupt(format!("observation id {max} leaves no room"))),
        _ => Ok(stamp),
    }
}

/// Parses the `YYYY-MM-DD` value a date input control hands back.
pub fn parse_iso_date(raw: &str) -> Option<Date> {
    Date::parse(raw, &format_description!("[year]-[month]-[day]")).ok()
}

/// Formats a date the way the date input control expects it.
pub fn iso_date_string(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn sample() -> Observation {
        Observation {
            id: 1_709_294_400_000,
            student_name: "Alex Kim".into(),
            date: date!(2024 - 03 - 01),
            kind: "positive".into(),
            notes: "Helped a peer".into(),
            timestamp: datetime!(2024-03-01 12:00 UTC),
        }
    }

    #[test]
    fn serializes_with_stored_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["studentName"], "Alex Kim");
        assert_eq!(value["date"], "2024-03-01");
        assert_eq!(value["type"], "positive");
        assert_eq!(value["timestamp"], "2024-03-01T12:00:00Z");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn reads_browser_written_records() {
        let raw = r#"{"id":1709294400000,"studentName":"Alex Kim","date":"2024-03-01",
            "type":"positive","notes":"Helped a peer","timestamp":"2024-03-01T12:00:00.000Z"}"#;
        let parsed: Observation = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn next_id_uses_clock_when_ahead() {
        let now = datetime!(2024-03-01 12:00 UTC);
        assert_eq!(next_id(&[], now), Ok(1_709_294_400_000));
    }

    #[test]
    fn next_id_stays_unique_on_collision() {
        let existing = vec![sample()];
        let id = next_id(&existing, sample().timestamp);
        assert_eq!(id, Ok(sample().id + 1));
    }

    #[test]
    fn next_id_reports_exhausted_id_space_as_corrupt() {
        let mut last = sample();
        last.id = ObservationId::MAX;
        let result = next_id(&[last], datetime!(2024-03-01 12:00 UTC));
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn parse_iso_date_rejects_garbage() {
        assert_eq!(parse_iso_date("2024-03-05"), Some(date!(2024 - 03 - 05)));
        assert_eq!(parse_iso_date("03/05/2024"), None);
        assert_eq!(parse_iso_date(""), None);
    }

    #[test]
    fn iso_date_string_pads_fields() {
        assert_eq!(iso_date_string(date!(2024 - 03 - 01)), "2024-03-01");
    }
}
