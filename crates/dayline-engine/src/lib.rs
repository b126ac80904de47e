//! dayline-engine: Layout engine for single-day event timelines
//!
//! This crate turns a day's events into geometry, including:
//! - The hour axis and its row metrics
//! - Overlap clustering of events
//! - Column packing and per-event rectangles
//! - Event documents and calendar helpers for feeding the engine

pub mod axis;
pub mod cluster;
pub mod diagnostic;
pub mod event;
pub mod geometry;
pub mod layout;
pub mod source;
pub mod style;
pub mod time;

// Re-export commonly used types
pub use axis::{hour_label, HourAxis, HourSlot, HourSlots};
pub use cluster::{group_overlaps, ClusterBuilder, Clusters, OverlapCluster};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use event::Event;
pub use geometry::LayoutRect;
pub use layout::{fractional_offset, layout, Placement, TimelineLayout, TimelineOutput};
pub use source::{load_document, parse_document, EventDocument, EventRecord, RecordIssue, SourceError};
pub use style::{LayoutStyle, OutOfRangePolicy, StyleError};
pub use time::{calendar_parts, CalendarParts, RangeError, TimeRange};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
