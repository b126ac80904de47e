//! Timeline event model.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::time::{format_clock, RangeError, TimeRange};

/// A labelled span of time to place on the timeline.
///
/// Identity is the `id`; layout only ever looks at the `range`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Unique identifier, used to key the output rectangles.
    pub id: String,
    /// Text shown inside the event block.
    pub label: String,
    /// When the event happens.
    pub range: TimeRange,
}

impl Event {
    /// Create an event from an already validated range.
    pub fn new(id: impl Into<String>, label: impl Into<String>, range: TimeRange) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            range,
        }
    }

    /// Create an event from raw timestamps.
    pub fn from_times(
        id: impl Into<String>,
        label: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Self, RangeError> {
        Ok(Self::new(id, label, TimeRange::new(start, end)?))
    }

    /// When the event starts.
    pub fn start(&self) -> NaiveDateTime {
        self.range.start()
    }

    /// When the event ends.
    pub fn end(&self) -> NaiveDateTime {
        self.range.end()
    }

    /// Whether the event starts on the given calendar day.
    pub fn starts_on(&self, day: NaiveDate) -> bool {
        self.start().date() == day
    }

    /// Whether the event ends on the given calendar day.
    pub fn ends_on(&self, day: NaiveDate) -> bool {
        self.end().date() == day
    }

    /// Label followed by the clock span, e.g. `"Standup:9:00 AM-9:15 AM"`.
    pub fn display_text(&self) -> String {
        format!(
            "{}:{}-{}",
            self.label,
            format_clock(self.start()),
            format_clock(self.end())
        )
    }
}
