//! Test utilities for rendering tests.

use chrono::NaiveDate;
use dayline_engine::{Event, LayoutStyle, TimelineLayout, TimelineOutput};
use ratatui::buffer::Buffer;

/// Layout of three events on 2024-06-06 with the default style:
/// an overlapping pair at 9:00 and 9:30 and a lone lunch at noon.
pub fn sample_output() -> TimelineOutput {
    let day = NaiveDate::from_ymd_opt(2024, 6, 6).unwrap();
    let at = |hour, minute| day.and_hms_opt(hour, minute, 0).unwrap();
    let events = [
        Event::from_times("standup", "Standup", at(9, 0), at(10, 0)).unwrap(),
        Event::from_times("review", "Review", at(9, 30), at(10, 30)).unwrap(),
        Event::from_times("lunch", "Lunch", at(12, 0), at(13, 0)).unwrap(),
    ];
    TimelineLayout::new(LayoutStyle::default())
        .unwrap()
        .layout_day(&events, day)
}

/// Convert a buffer to a string, one line per row, trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            let cell = buffer.cell((x, y)).unwrap();
            result.push_str(cell.symbol());
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 2, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\n\nWorld");
    }

    #[test]
    fn test_sample_output_places_all_events() {
        let output = sample_output();
        assert_eq!(output.placements.len(), 3);
        assert!(output.diagnostics.is_empty());
    }
}
