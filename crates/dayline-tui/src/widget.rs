//! Timeline widget: paints a laid-out day into a terminal buffer.
//!
//! Layout output is measured in points. [`CellScale`] maps points onto
//! terminal cells; everything is drawn relative to the widget's area and
//! shifted up by the scroll offset.

use dayline_engine::time::format_clock;
use dayline_engine::{LayoutRect, Placement, TimelineOutput};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::text::{truncate_to_width, visual_width, wrap_to_box};
use crate::theme::Theme;

/// Terminal rows given to one hour when none is specified.
pub const DEFAULT_ROWS_PER_HOUR: u16 = 4;

const GRIDLINE: &str = "─";
const DIVIDER: &str = "│";
const DIVIDER_TEE: &str = "├";

/// Points covered by one terminal cell in each direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    pub points_per_column: f64,
    pub points_per_row: f64,
}

impl CellScale {
    /// Scale that fits the output's width into `columns` and gives each hour
    /// `rows_per_hour` rows.
    pub fn fit(output: &TimelineOutput, columns: u16, rows_per_hour: u16) -> Self {
        let columns = f64::from(columns.max(1));
        let per_column = if output.content_width > 0.0 {
            output.content_width / columns
        } else {
            1.0
        };

        let pitch = match output.slots.as_slice() {
            [first, second, ..] => second.row_top - first.row_top,
            [only] => only.row_height,
            [] => 1.0,
        };
        let per_row = pitch / f64::from(rows_per_hour.max(1));

        Self {
            points_per_column: per_column,
            points_per_row: if per_row > 0.0 { per_row } else { 1.0 },
        }
    }

    /// Cell column nearest to `x`.
    pub fn column(&self, x: f64) -> i64 {
        (x / self.points_per_column).round() as i64
    }

    /// Cell row nearest to `y`.
    pub fn row(&self, y: f64) -> i64 {
        (y / self.points_per_row).round() as i64
    }

    /// Rows needed to show the whole axis.
    pub fn content_rows(&self, output: &TimelineOutput) -> u16 {
        u16::try_from(self.row(output.content_height).max(0)).unwrap_or(u16::MAX)
    }
}

/// A rectangle in cell space, relative to the widget area, possibly
/// reaching outside it.
#[derive(Debug, Clone, Copy)]
struct CellSpan {
    left: i64,
    right: i64,
    top: i64,
    bottom: i64,
}

impl CellSpan {
    /// The visible part inside `area`, and whether the top or bottom edge
    /// was cut off.
    fn clip(self, area: Rect) -> Option<(Rect, bool, bool)> {
        let width = i64::from(area.width);
        let height = i64::from(area.height);

        let left = self.left.clamp(0, width);
        let right = self.right.clamp(0, width);
        let top = self.top.clamp(0, height);
        let bottom = self.bottom.clamp(0, height);
        if right <= left || bottom <= top {
            return None;
        }

        let rect = Rect::new(
            area.x + left as u16,
            area.y + top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        );
        Some((rect, self.top < 0, self.bottom > height))
    }
}

/// Widget that draws a [`TimelineOutput`].
pub struct TimelineWidget<'a> {
    output: &'a TimelineOutput,
    theme: &'a Theme,
    scale: CellScale,
    scroll: u16,
}

impl<'a> TimelineWidget<'a> {
    /// Create a widget for `output` drawn at `scale`.
    pub fn new(output: &'a TimelineOutput, theme: &'a Theme, scale: CellScale) -> Self {
        Self {
            output,
            theme,
            scale,
            scroll: 0,
        }
    }

    /// Set how many rows are scrolled off the top.
    #[must_use]
    pub fn scroll(mut self, rows: u16) -> Self {
        self.scroll = rows;
        self
    }

    fn screen_row(&self, y: f64) -> i64 {
        self.scale.row(y) - i64::from(self.scroll)
    }

    fn span_of(&self, rect: &LayoutRect) -> CellSpan {
        let left = self.scale.column(rect.x);
        let top = self.screen_row(rect.y);
        CellSpan {
            left,
            right: self.scale.column(rect.right()).max(left + 1),
            top,
            bottom: self.screen_row(rect.bottom()).max(top + 1),
        }
    }

    fn render_gridlines(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.gridline);
        for line in &self.output.hour_lines {
            let span = self.span_of(line);
            let row_span = CellSpan {
                bottom: span.top + 1,
                ..span
            };
            let Some((rect, _, _)) = row_span.clip(area) else {
                continue;
            };
            for x in rect.left()..rect.right() {
                if let Some(cell) = buf.cell_mut((x, rect.y)) {
                    cell.set_symbol(GRIDLINE).set_style(style);
                }
            }
        }
    }

    fn render_divider(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.divider);
        let span = self.span_of(&self.output.divider);
        let column = CellSpan {
            right: span.left + 1,
            ..span
        };
        let Some((rect, _, _)) = column.clip(area) else {
            return;
        };

        for y in rect.top()..rect.bottom() {
            if let Some(cell) = buf.cell_mut((rect.x, y)) {
                let symbol = if cell.symbol() == GRIDLINE {
                    DIVIDER_TEE
                } else {
                    DIVIDER
                };
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }

    /// Hour labels, right-aligned against the divider.
    fn render_labels(&self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(self.theme.subtext);
        let divider = self.scale.column(self.output.divider.x);

        for slot in &self.output.slots {
            let row = self.screen_row(slot.center_y());
            if row < 0 || row >= i64::from(area.height) {
                continue;
            }
            let width = visual_width(&slot.label) as i64;
            let start = (divider - 1 - width).max(0);
            if start >= i64::from(area.width) {
                continue;
            }
            let x = area.x + start as u16;
            let room = usize::from(area.right() - x);
            buf.set_stringn(x, area.y + row as u16, &slot.label, room, style);
        }
    }

    fn render_event(&self, placement: &Placement, area: Rect, buf: &mut Buffer) {
        let Some((rect, top_cut, bottom_cut)) = self.span_of(&placement.rect).clip(area) else {
            return;
        };
        let color = self.theme.event_color(placement.column);

        if rect.height < 3 || rect.width < 3 {
            let text = truncate_to_width(&placement.label, usize::from(rect.width));
            Paragraph::new(Line::from(text))
                .style(
                    Style::default()
                        .fg(self.theme.base)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
                .render(rect, buf);
            return;
        }

        let mut borders = Borders::ALL;
        if top_cut {
            borders.remove(Borders::TOP);
        }
        if bottom_cut {
            borders.remove(Borders::BOTTOM);
        }
        let block = Block::default()
            .borders(borders)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(self.theme.surface));
        let inner = block.inner(rect);
        block.render(rect, buf);

        let width = usize::from(inner.width);
        let height = usize::from(inner.height);
        let clock = format!(
            "{}-{}",
            format_clock(placement.start),
            format_clock(placement.end)
        );
        let label_rows = if height > 1 { height - 1 } else { height };

        let label_style = Style::default()
            .fg(self.theme.text)
            .add_modifier(Modifier::BOLD);
        let mut lines: Vec<Line> = wrap_to_box(&placement.label, width, label_rows)
            .into_iter()
            .map(|text| Line::styled(text, label_style))
            .collect();
        if lines.len() < height {
            lines.push(Line::styled(
                truncate_to_width(&clock, width),
                Style::default().fg(self.theme.muted),
            ));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

impl Widget for TimelineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        buf.set_style(area, Style::default().bg(self.theme.base));
        self.render_gridlines(area, buf);
        self.render_divider(area, buf);
        self.render_labels(area, buf);
        for placement in &self.output.placements {
            self.render_event(placement, area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, sample_output};

    fn render(output: &TimelineOutput, width: u16, height: u16, scroll: u16) -> String {
        let theme = Theme::default();
        let scale = CellScale::fit(output, width, DEFAULT_ROWS_PER_HOUR);
        let area = Rect::new(0, 0, width, height);
        let mut buffer = Buffer::empty(area);
        TimelineWidget::new(output, &theme, scale)
            .scroll(scroll)
            .render(area, &mut buffer);
        buffer_to_string(&buffer)
    }

    #[test]
    fn test_scale_fits_width_and_rows() {
        let output = sample_output();
        let scale = CellScale::fit(&output, 80, 4);
        assert!((scale.points_per_column - 375.0 / 80.0).abs() < 1e-9);
        assert!((scale.points_per_row - 7.5).abs() < 1e-9);
        assert_eq!(scale.row(15.0), 2);
        assert_eq!(scale.content_rows(&output), 52);
    }

    #[test]
    fn test_renders_axis_labels_and_lines() {
        let output = sample_output();
        let screen = render(&output, 80, 60, 0);
        let lines: Vec<&str> = screen.lines().collect();

        assert!(lines[2].contains("9 AM"));
        assert!(lines[14].contains("12 PM"));
        assert!(lines[50].contains("9 PM"));

        // 11 AM has no event on it, so the bare axis shows.
        assert!(lines[10].contains("11 AM"));
        assert!(lines[10].contains(DIVIDER_TEE));
        assert!(lines[10].contains(GRIDLINE));
        assert!(lines[11].contains(DIVIDER));
    }

    #[test]
    fn test_overlapping_events_render_side_by_side() {
        let output = sample_output();
        let screen = render(&output, 80, 60, 0);
        let lines: Vec<&str> = screen.lines().collect();

        let standup_row = lines.iter().position(|l| l.contains("Standup")).unwrap();
        let review_row = lines.iter().position(|l| l.contains("Review")).unwrap();
        assert_eq!(standup_row, 3);
        assert_eq!(review_row, 5);

        let standup_x = lines[standup_row].find("Standup").unwrap();
        let review_x = lines[review_row].find("Review").unwrap();
        assert!(standup_x < review_x);
        assert!(lines[4].contains("9:00 AM-10:00 AM"));
        assert!(lines[6].contains("9:30 AM-10:30 AM"));
    }

    #[test]
    fn test_scroll_moves_content_up() {
        let output = sample_output();
        let screen = render(&output, 80, 20, 10);

        assert!(!screen.contains("9 AM"));
        assert!(!screen.contains("Standup"));
        assert!(screen.lines().nth(4).unwrap().contains("12 PM"));
        assert!(screen.contains("Lunch"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let output = sample_output();
        render(&output, 4, 2, 0);
        render(&output, 1, 1, 40);
        let _ = render(&output, 80, 5, u16::MAX);
    }
}
