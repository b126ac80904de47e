//! Time ranges and calendar helpers.
//!
//! Timestamps are local wall-clock `NaiveDateTime` values. The engine never
//! converts between zones; whatever the event source produced is laid out
//! as-is.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: i64 = 60;

/// Minutes in one calendar day.
pub const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// A closed-open span of time with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    /// Create a range, rejecting one that ends before it starts.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Range between two instants, in whichever order they were given.
    pub(crate) fn ordered(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// When the range begins.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// When the range ends.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether `instant` falls in `[start, end)`.
    ///
    /// An empty range contains nothing.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether two ranges share any instant.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the range has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Length of the range in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_minutes()
    }

    /// Clamp both ends into `window`.
    ///
    /// The result always satisfies `start <= end`; it is empty when the two
    /// ranges do not meet.
    pub fn clamp_to(&self, window: &TimeRange) -> TimeRange {
        TimeRange {
            start: self.start.clamp(window.start, window.end),
            end: self.end.clamp(window.start, window.end),
        }
    }
}

/// Errors raised when constructing a [`TimeRange`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// The end comes before the start.
    #[error("range ends before it starts: {start} > {end}")]
    Inverted {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// The calendar components of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

/// Split a timestamp into year, month, day, hour and minute.
pub fn calendar_parts(instant: NaiveDateTime) -> CalendarParts {
    CalendarParts {
        year: instant.year(),
        month: instant.month(),
        day: instant.day(),
        hour: instant.hour(),
        minute: instant.minute(),
    }
}

/// Midnight at the start of `day`.
pub fn start_of_day(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Whole minutes from the start of `day` to `instant`.
///
/// Negative before midnight, past [`MINUTES_PER_DAY`] on a later day.
pub fn minutes_of_day(instant: NaiveDateTime, day: NaiveDate) -> i64 {
    instant
        .signed_duration_since(start_of_day(day))
        .num_minutes()
}

/// Format a timestamp as a 12-hour clock time ("9:05 AM").
pub fn format_clock(instant: NaiveDateTime) -> String {
    instant.format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 6)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = TimeRange::new(at(10, 0), at(9, 0)).unwrap_err();
        assert!(matches!(err, RangeError::Inverted { .. }));
        assert!(err.to_string().contains("ends before it starts"));
    }

    #[test]
    fn test_empty_range_contains_nothing() {
        let range = TimeRange::new(at(9, 0), at(9, 0)).unwrap();
        assert!(range.is_empty());
        assert!(!range.contains(at(9, 0)));
        assert_eq!(range.duration_minutes(), 0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = TimeRange::new(at(9, 0), at(10, 0)).unwrap();
        assert!(range.contains(at(9, 0)));
        assert!(range.contains(at(9, 59)));
        assert!(!range.contains(at(10, 0)));
    }

    #[test]
    fn test_overlaps() {
        let a = TimeRange::new(at(9, 0), at(10, 0)).unwrap();
        let b = TimeRange::new(at(9, 30), at(10, 30)).unwrap();
        let c = TimeRange::new(at(10, 0), at(11, 0)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&c));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_clamp_to_window() {
        let window = TimeRange::new(at(9, 0), at(21, 0)).unwrap();

        let early = TimeRange::new(at(7, 0), at(9, 30)).unwrap();
        assert_eq!(early.clamp_to(&window).start(), at(9, 0));
        assert_eq!(early.clamp_to(&window).end(), at(9, 30));

        let outside = TimeRange::new(at(22, 0), at(23, 0)).unwrap();
        assert!(outside.clamp_to(&window).is_empty());
    }

    #[test]
    fn test_calendar_parts() {
        let parts = calendar_parts(at(14, 25));
        assert_eq!(parts.year, 2024);
        assert_eq!(parts.month, 6);
        assert_eq!(parts.day, 6);
        assert_eq!(parts.hour, 14);
        assert_eq!(parts.minute, 25);
    }

    #[test]
    fn test_minutes_of_day() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 6).unwrap();
        assert_eq!(minutes_of_day(at(9, 15), day), 555);

        let next_day = NaiveDate::from_ymd_opt(2024, 6, 7)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap();
        assert_eq!(minutes_of_day(next_day, day), MINUTES_PER_DAY + 60);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(at(9, 5)), "9:05 AM");
        assert_eq!(format_clock(at(12, 0)), "12:00 PM");
        assert_eq!(format_clock(at(21, 30)), "9:30 PM");
    }
}
