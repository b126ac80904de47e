//! Timeline layout: turns events into rectangles.
//!
//! A pass runs in four steps:
//! 1. Admit events for the day, applying the out-of-range policy.
//! 2. Sort by start time and cluster with [`group_overlaps`].
//! 3. Convert each event's start and end into Y positions on the hour axis.
//! 4. Pack each event into the leftmost column of its cluster that no
//!    overlapping event already holds.
//!
//! Every call rebuilds its slots and clusters; nothing is shared between
//! passes.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::{debug, warn};

use crate::axis::{hour_label, HourAxis, HourSlot, HourSlots};
use crate::cluster::group_overlaps;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::event::Event;
use crate::geometry::LayoutRect;
use crate::style::{LayoutStyle, OutOfRangePolicy, StyleError};
use crate::time::{format_clock, minutes_of_day, start_of_day, TimeRange, MINUTES_PER_HOUR};

/// Minute count that maps onto one full row pitch.
pub const MINUTE_DIVISOR: f64 = 59.0;

/// Vertical offset of `minute` below its hour's gridline.
///
/// Minute 0 sits on the gridline itself. Minutes 1 to 59 move down
/// proportionally, reaching a full `pitch` at 59. Anything from 60 up is a
/// full hour.
pub fn fractional_offset(minute: u32, pitch: f64) -> f64 {
    match minute {
        0 => 0.0,
        1..=59 => pitch * f64::from(minute) / MINUTE_DIVISOR,
        _ => pitch,
    }
}

/// Where one event ended up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Id of the placed event.
    pub event_id: String,
    /// The event's label.
    pub label: String,
    /// Visible start (after clipping).
    pub start: NaiveDateTime,
    /// Visible end (after clipping).
    pub end: NaiveDateTime,
    /// Index of the overlap cluster the event joined.
    pub cluster: usize,
    /// Occupant count of that cluster.
    pub cluster_size: usize,
    /// Column within the cluster, counted from the left.
    pub column: usize,
    /// Final rectangle.
    pub rect: LayoutRect,
}

/// Everything the rendering side needs to paint a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineOutput {
    /// The day that was laid out, if there was anything to lay out.
    pub day: Option<NaiveDate>,
    /// Hour axis rows, for painting labels.
    pub slots: Vec<HourSlot>,
    /// One horizontal gridline per slot.
    pub hour_lines: Vec<LayoutRect>,
    /// Vertical line between the label column and the event area.
    pub divider: LayoutRect,
    /// Event rectangles keyed by event id.
    pub event_rects: BTreeMap<String, LayoutRect>,
    /// Placements in the order they were made (ascending start time).
    pub placements: Vec<Placement>,
    /// Width of the drawing container.
    pub content_width: f64,
    /// Height covered by the hour rows.
    pub content_height: f64,
    /// Problems with individual events.
    pub diagnostics: Vec<Diagnostic>,
}

impl TimelineOutput {
    /// Rectangle for an event id.
    pub fn rect(&self, event_id: &str) -> Option<&LayoutRect> {
        self.event_rects.get(event_id)
    }

    /// Placement for an event id.
    pub fn placement(&self, event_id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.event_id == event_id)
    }

    /// Diagnostics recorded for an event id.
    pub fn diagnostics_for<'a>(
        &'a self,
        event_id: &'a str,
    ) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |d| d.event_id == event_id)
    }

    /// Diagnostics for events that were left out.
    pub fn dropped(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.kind.is_drop())
    }
}

/// An admitted event and the part of it that is visible.
struct Candidate<'a> {
    event: &'a Event,
    visible: TimeRange,
}

/// How much of an event the axis can show.
enum Visibility {
    Full,
    Clipped(TimeRange),
    Hidden,
}

/// Layout engine bound to one style.
///
/// Holds configuration only, so one instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct TimelineLayout {
    style: LayoutStyle,
    axis: HourAxis,
}

impl TimelineLayout {
    /// Create an engine, rejecting unusable styles.
    pub fn new(style: LayoutStyle) -> Result<Self, StyleError> {
        style.validate()?;
        let axis = HourAxis::new(&style);
        Ok(Self { style, axis })
    }

    /// The style in use.
    pub fn style(&self) -> &LayoutStyle {
        &self.style
    }

    /// The hour axis in use.
    pub fn axis(&self) -> &HourAxis {
        &self.axis
    }

    /// Lay out events on the day of the earliest start.
    pub fn layout(&self, events: &[Event]) -> TimelineOutput {
        let day = events.iter().map(|e| e.start().date()).min();
        match day {
            Some(day) => self.layout_day(events, day),
            None => self.empty_output(),
        }
    }

    /// Lay out the events that start on `day`.
    pub fn layout_day(&self, events: &[Event], day: NaiveDate) -> TimelineOutput {
        let slots = self.axis.build(0);
        let window = self.visible_window(day);
        let mut diagnostics = Vec::new();

        let mut candidates = self.admit(events, day, &window, &mut diagnostics);
        candidates.sort_by_key(|c| (c.visible.start(), c.visible.end()));

        let clusters = group_overlaps(candidates.iter().map(|c| &c.visible));
        let mut placements: Vec<Placement> = Vec::with_capacity(candidates.len());

        for (position, candidate) in candidates.iter().enumerate() {
            let (Some(cluster), Some(cluster_size)) =
                (clusters.cluster_of(position), clusters.size_of(position))
            else {
                continue;
            };

            let Some((y, height)) = self.vertical_span(&slots, day, &candidate.visible) else {
                warn!(event_id = %candidate.event.id, "No axis row for event");
                diagnostics.push(Diagnostic::new(
                    &candidate.event.id,
                    DiagnosticKind::OutsideAxis,
                    "no hour row for the event's start or end",
                ));
                continue;
            };

            let column_width = self.style.available_width() / cluster_size as f64;
            let span = LayoutRect::new(self.style.event_left(), y, column_width, height);
            let column = pack_column(&placements, cluster, &candidate.visible, &span);

            placements.push(Placement {
                event_id: candidate.event.id.clone(),
                label: candidate.event.label.clone(),
                start: candidate.visible.start(),
                end: candidate.visible.end(),
                cluster,
                cluster_size,
                column,
                rect: self.column_rect(column, column_width, y, height),
            });
        }

        debug!(
            %day,
            events = events.len(),
            placed = placements.len(),
            clusters = clusters.len(),
            diagnostics = diagnostics.len(),
            "Laid out timeline"
        );

        let mut output = self.frame(slots);
        output.day = Some(day);
        output.event_rects = placements
            .iter()
            .map(|p| (p.event_id.clone(), p.rect))
            .collect();
        output.placements = placements;
        output.diagnostics = diagnostics;
        output
    }

    /// Output with the axis and gridlines but no events.
    fn empty_output(&self) -> TimelineOutput {
        self.frame(self.axis.build(0))
    }

    fn frame(&self, slots: HourSlots) -> TimelineOutput {
        let left = self.style.event_left();
        let line_width = self.style.event_right() - left;
        let thickness = self.style.line_thickness;
        let content_height = slots.content_height();

        let hour_lines = slots
            .iter()
            .map(|slot| LayoutRect::new(left, slot.center_y(), line_width, thickness))
            .collect();

        TimelineOutput {
            day: None,
            slots: slots.into_vec(),
            hour_lines,
            divider: LayoutRect::new(left, 0.0, thickness, content_height),
            event_rects: BTreeMap::new(),
            placements: Vec::new(),
            content_width: self.style.container_width,
            content_height,
            diagnostics: Vec::new(),
        }
    }

    /// From the first hour's gridline to the last hour's gridline.
    fn visible_window(&self, day: NaiveDate) -> TimeRange {
        let midnight = start_of_day(day);
        TimeRange::ordered(
            midnight + TimeDelta::hours(i64::from(self.style.first_hour)),
            midnight + TimeDelta::hours(i64::from(self.style.last_hour)),
        )
    }

    /// Filter events for the day and apply the out-of-range policy.
    fn admit<'a>(
        &self,
        events: &'a [Event],
        day: NaiveDate,
        window: &TimeRange,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Candidate<'a>> {
        let mut seen = HashSet::new();
        let mut admitted = Vec::with_capacity(events.len());

        for event in events {
            if !seen.insert(event.id.as_str()) {
                warn!(event_id = %event.id, "Dropping event with duplicate id");
                diagnostics.push(Diagnostic::new(
                    &event.id,
                    DiagnosticKind::DuplicateId,
                    "an earlier event already uses this id",
                ));
                continue;
            }

            if !event.starts_on(day) {
                warn!(event_id = %event.id, %day, "Dropping event from another day");
                diagnostics.push(Diagnostic::new(
                    &event.id,
                    DiagnosticKind::OtherDay,
                    format!("starts on {}, not {day}", event.start().date()),
                ));
                continue;
            }

            let visible = match self.visibility(&event.range, window) {
                Visibility::Full => event.range,
                Visibility::Clipped(clipped) => {
                    diagnostics.push(Diagnostic::new(
                        &event.id,
                        DiagnosticKind::Clipped,
                        format!(
                            "clipped to {}-{}",
                            format_clock(clipped.start()),
                            format_clock(clipped.end())
                        ),
                    ));
                    clipped
                }
                Visibility::Hidden => {
                    warn!(event_id = %event.id, "Dropping event outside the visible hours");
                    diagnostics.push(Diagnostic::new(
                        &event.id,
                        DiagnosticKind::OutsideAxis,
                        format!(
                            "{}-{} is outside {}-{} ({} policy)",
                            format_clock(event.start()),
                            format_clock(event.end()),
                            hour_label(self.style.first_hour),
                            hour_label(self.style.last_hour),
                            self.style.out_of_range
                        ),
                    ));
                    continue;
                }
            };

            if event.range.is_empty() {
                diagnostics.push(Diagnostic::new(
                    &event.id,
                    DiagnosticKind::Degenerate,
                    "starts and ends at the same time",
                ));
            }

            admitted.push(Candidate { event, visible });
        }

        admitted
    }

    fn visibility(&self, range: &TimeRange, window: &TimeRange) -> Visibility {
        let clipped = range.clamp_to(window);

        if range.is_empty() {
            let start = range.start();
            return if window.start() <= start && start <= window.end() {
                Visibility::Full
            } else {
                Visibility::Hidden
            };
        }

        if clipped == *range {
            return Visibility::Full;
        }

        if clipped.is_empty() {
            return Visibility::Hidden;
        }

        match self.style.out_of_range {
            OutOfRangePolicy::Clip => Visibility::Clipped(clipped),
            OutOfRangePolicy::Drop => Visibility::Hidden,
        }
    }

    /// Top and height of a visible range.
    fn vertical_span(
        &self,
        slots: &HourSlots,
        day: NaiveDate,
        range: &TimeRange,
    ) -> Option<(f64, f64)> {
        let top = self.y_at(slots, day, range.start())?;
        let bottom = self.y_at(slots, day, range.end())?;
        let height = (bottom - top - self.style.event_gap).max(0.0);
        Some((top, height))
    }

    /// Y of an instant: its hour's gridline plus the minute offset.
    fn y_at(&self, slots: &HourSlots, day: NaiveDate, instant: NaiveDateTime) -> Option<f64> {
        let minutes = minutes_of_day(instant, day);
        let hour = u32::try_from(minutes.div_euclid(MINUTES_PER_HOUR)).ok()?;
        let minute = minutes.rem_euclid(MINUTES_PER_HOUR) as u32;
        let slot = slots.slot_for(hour)?;
        Some(slot.center_y() + fractional_offset(minute, self.style.pitch()))
    }

    fn column_rect(&self, column: usize, column_width: f64, y: f64, height: f64) -> LayoutRect {
        LayoutRect::new(
            self.style.event_left() + column as f64 * column_width,
            y,
            (column_width - self.style.event_gap).max(0.0),
            height,
        )
    }
}

/// Leftmost column of `cluster` not held by a conflicting placement.
///
/// A placement conflicts when its visible time overlaps `visible` or its
/// rounded vertical span meets the candidate's. Only members of the same
/// cluster are considered, so the answer is always below the cluster size.
fn pack_column(
    placed: &[Placement],
    cluster: usize,
    visible: &TimeRange,
    candidate: &LayoutRect,
) -> usize {
    let taken: BTreeSet<usize> = placed
        .iter()
        .filter(|p| p.cluster == cluster)
        .filter(|p| {
            TimeRange::ordered(p.start, p.end).overlaps(visible)
                || p.rect.overlaps_vertically_rounded(candidate)
        })
        .map(|p| p.column)
        .collect();

    (0..=taken.len())
        .find(|column| !taken.contains(column))
        .unwrap_or(taken.len())
}

/// One-shot layout with a style.
pub fn layout(events: &[Event], style: &LayoutStyle) -> Result<TimelineOutput, StyleError> {
    Ok(TimelineLayout::new(style.clone())?.layout(events))
}
