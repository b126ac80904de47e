//! Hour axis: the fixed rows the timeline is measured against.

use serde::Serialize;

use crate::style::LayoutStyle;

/// One row of the hour axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourSlot {
    /// Position within the built sequence (0-based).
    pub index: usize,
    /// Display label, e.g. "9 AM".
    pub label: String,
    /// The 24-hour value the label stands for.
    pub hour: u32,
    /// Y of the row's top edge.
    pub row_top: f64,
    /// Height of the row.
    pub row_height: f64,
}

impl HourSlot {
    /// Y of the row's vertical centre, where the hour gridline sits.
    pub fn center_y(&self) -> f64 {
        self.row_top + self.row_height / 2.0
    }
}

/// Ordered set of visible hours and the row geometry that goes with them.
#[derive(Debug, Clone, PartialEq)]
pub struct HourAxis {
    hours: Vec<u32>,
    row_height: f64,
    row_gap: f64,
}

impl HourAxis {
    /// Axis for the hour range and row metrics of a style.
    pub fn new(style: &LayoutStyle) -> Self {
        Self::with_hours(
            style.first_hour..=style.last_hour,
            style.row_height,
            style.row_gap,
        )
    }

    /// Axis over an arbitrary ordered list of hours.
    pub fn with_hours(hours: impl IntoIterator<Item = u32>, row_height: f64, row_gap: f64) -> Self {
        Self {
            hours: hours.into_iter().collect(),
            row_height,
            row_gap,
        }
    }

    /// Number of hours on the axis.
    pub fn len(&self) -> usize {
        self.hours.len()
    }

    /// Whether the axis has no hours.
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }

    /// Distance between the tops of consecutive rows.
    pub fn pitch(&self) -> f64 {
        self.row_height + self.row_gap
    }

    /// Build slots for every hour from `start_index` onward.
    ///
    /// Positions restart at zero, so the first produced slot sits at the top.
    pub fn build(&self, start_index: usize) -> HourSlots {
        let pitch = self.pitch();
        let slots = self
            .hours
            .iter()
            .skip(start_index)
            .enumerate()
            .map(|(index, &hour)| HourSlot {
                index,
                label: hour_label(hour),
                hour,
                row_top: index as f64 * pitch,
                row_height: self.row_height,
            })
            .collect();

        HourSlots { slots, pitch }
    }
}

/// A built, immutable slot sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct HourSlots {
    slots: Vec<HourSlot>,
    pitch: f64,
}

impl HourSlots {
    /// Find the slot for a 24-hour value.
    pub fn slot_for(&self, hour: u32) -> Option<&HourSlot> {
        self.slots.iter().find(|slot| slot.hour == hour)
    }

    /// All slots in axis order.
    pub fn as_slice(&self) -> &[HourSlot] {
        &self.slots
    }

    /// Iterate over the slots in axis order.
    pub fn iter(&self) -> std::slice::Iter<'_, HourSlot> {
        self.slots.iter()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots were built.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Total height covered by the rows.
    pub fn content_height(&self) -> f64 {
        self.slots.len() as f64 * self.pitch
    }

    /// Hand the slots over to the caller.
    pub fn into_vec(self) -> Vec<HourSlot> {
        self.slots
    }
}

/// Label for a 24-hour value on the 12-hour clock ("12 AM", "9 AM", "12 PM").
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour % 24 < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn test_default_labels() {
        let slots = HourAxis::new(&LayoutStyle::default()).build(0);
        let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(slots.len(), 13);
        assert_snapshot!(
            labels.join(","),
            @"9 AM,10 AM,11 AM,12 PM,1 PM,2 PM,3 PM,4 PM,5 PM,6 PM,7 PM,8 PM,9 PM"
        );
    }

    #[test]
    fn test_row_tops_include_gap() {
        let axis = HourAxis::with_hours(9..=11, 30.0, 5.0);
        let slots = axis.build(0);
        let tops: Vec<f64> = slots.iter().map(|s| s.row_top).collect();
        assert_eq!(tops, vec![0.0, 35.0, 70.0]);
        assert!((slots.content_height() - 105.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_build_from_start_index() {
        let axis = HourAxis::new(&LayoutStyle::default());
        let slots = axis.build(3);
        assert_eq!(slots.len(), 10);

        let first = &slots.as_slice()[0];
        assert_eq!(first.label, "12 PM");
        assert_eq!(first.hour, 12);
        assert_eq!(first.index, 0);
        assert!(first.row_top.abs() < f64::EPSILON);
    }

    #[test]
    fn test_slot_for_round_trip() {
        let slots = HourAxis::new(&LayoutStyle::default()).build(0);
        for hour in 9..=21 {
            let slot = slots.slot_for(hour).unwrap();
            assert_eq!(slot.hour, hour);
        }
        assert!(slots.slot_for(8).is_none());
        assert!(slots.slot_for(22).is_none());
    }

    #[test]
    fn test_center_y() {
        let slots = HourAxis::new(&LayoutStyle::default()).build(0);
        let ten = slots.slot_for(10).unwrap();
        assert!((ten.center_y() - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hour_label_edges() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(11), "11 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(23), "11 PM");
    }
}
