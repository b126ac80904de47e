//! Event documents.
//!
//! Reads the JSON shape produced by calendar exports:
//!
//! ```json
//! { "data": [ { "title": "Standup", "start": "0900", "end": "0915" } ] }
//! ```
//!
//! `start` and `end` are `HHmm` wall-clock times on the day supplied by the
//! caller. A record that cannot be turned into an event becomes a
//! [`RecordIssue`]; the rest of the document still loads.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::event::Event;
use crate::time::RangeError;

/// Format of the `start`/`end` fields.
pub const TIME_FORMAT: &str = "%H%M";

/// A whole event document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDocument {
    /// Event records in file order.
    pub data: Vec<EventRecord>,
}

/// One record as it appears in the document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Optional stable id. Defaults to `event-<n>` by position.
    #[serde(default)]
    pub id: Option<String>,
    /// Event title.
    pub title: String,
    /// Start time as `HHmm`.
    pub start: String,
    /// End time as `HHmm`.
    pub end: String,
}

/// A record that could not be converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    /// 1-based position in the document.
    pub position: usize,
    /// The record's title, for reporting.
    pub title: String,
    /// What was wrong.
    pub error: RecordError,
}

impl std::fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record {} ({}): {}", self.position, self.title, self.error)
    }
}

/// Why a record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    /// A time field is not `HHmm`.
    #[error("{field} {value:?} is not an HHmm time")]
    BadTime { field: &'static str, value: String },

    /// The record ends before it starts.
    #[error(transparent)]
    Range(#[from] RangeError),
}

impl EventDocument {
    /// Convert every record into an event on `day`.
    pub fn into_events(self, day: NaiveDate) -> (Vec<Event>, Vec<RecordIssue>) {
        let mut events = Vec::with_capacity(self.data.len());
        let mut issues = Vec::new();

        for (index, record) in self.data.into_iter().enumerate() {
            let position = index + 1;
            match record.to_event(day, position) {
                Ok(event) => events.push(event),
                Err(error) => issues.push(RecordIssue {
                    position,
                    title: record.title,
                    error,
                }),
            }
        }

        (events, issues)
    }
}

impl EventRecord {
    /// Convert this record into an event on `day`.
    pub fn to_event(&self, day: NaiveDate, position: usize) -> Result<Event, RecordError> {
        let start = parse_time("start", &self.start)?;
        let end = parse_time("end", &self.end)?;
        let id = self
            .id
            .clone()
            .unwrap_or_else(|| format!("event-{position}"));

        Ok(Event::from_times(
            id,
            self.title.clone(),
            day.and_time(start),
            day.and_time(end),
        )?)
    }
}

fn parse_time(field: &'static str, value: &str) -> Result<NaiveTime, RecordError> {
    let trimmed = value.trim();
    if trimmed.len() != 4 {
        return Err(RecordError::BadTime {
            field,
            value: value.to_string(),
        });
    }
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT).map_err(|_| RecordError::BadTime {
        field,
        value: value.to_string(),
    })
}

/// Parse a document from a JSON string.
pub fn parse_document(content: &str) -> Result<EventDocument, SourceError> {
    serde_json::from_str(content).map_err(SourceError::Parse)
}

/// Load a document from a JSON file.
pub fn load_document(path: &Path) -> Result<EventDocument, SourceError> {
    let content = std::fs::read_to_string(path).map_err(SourceError::Io)?;
    parse_document(&content)
}

/// Errors that can occur when reading an event document.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// I/O error reading the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON of the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "data": [
            { "title": "Standup", "start": "0900", "end": "0915" },
            { "id": "lunch", "title": "Lunch", "start": "1230", "end": "1330" },
            { "title": "Broken", "start": "9am", "end": "1000" },
            { "title": "Backwards", "start": "1500", "end": "1400" }
        ]
    }"#;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 6).unwrap()
    }

    #[test]
    fn test_parse_and_convert() {
        let document = parse_document(SAMPLE).unwrap();
        let (events, issues) = document.into_events(day());

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, "event-1");
        assert_eq!(events[0].label, "Standup");
        assert_eq!(events[0].display_text(), "Standup:9:00 AM-9:15 AM");
        assert_eq!(events[1].id, "lunch");
        assert!(events[1].starts_on(day()));

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].position, 3);
        assert!(matches!(
            issues[0].error,
            RecordError::BadTime { field: "start", .. }
        ));
        assert_eq!(issues[1].position, 4);
        assert!(matches!(issues[1].error, RecordError::Range(_)));
        assert!(issues[1].to_string().contains("Backwards"));
    }

    #[test]
    fn test_rejects_out_of_range_clock_values() {
        let document = parse_document(
            r#"{"data": [{"title": "Late", "start": "2330", "end": "2460"}]}"#,
        )
        .unwrap();
        let (events, issues) = document.into_events(day());
        assert!(events.is_empty());
        assert!(matches!(
            issues[0].error,
            RecordError::BadTime { field: "end", .. }
        ));
    }

    #[test]
    fn test_missing_data_is_parse_error() {
        let err = parse_document(r#"{"events": []}"#).unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_load_document_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let document = load_document(&path).unwrap();
        assert_eq!(document.data.len(), 4);

        let missing = load_document(&temp_dir.path().join("missing.json"));
        assert!(matches!(missing, Err(SourceError::Io(_))));
    }
}
