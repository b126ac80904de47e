//! Viewer screen: header, scrollable timeline and key hints.

use dayline_engine::TimelineOutput;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::event::Action;
use crate::theme::Theme;
use crate::widget::{CellScale, TimelineWidget, DEFAULT_ROWS_PER_HOUR};

/// Scroll position of the viewer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewerState {
    scroll: u16,
    content_rows: u16,
    viewport_rows: u16,
}

impl ViewerState {
    /// Rows currently scrolled off the top.
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Furthest the view can scroll.
    pub fn max_scroll(&self) -> u16 {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    /// Record the content and viewport size, keeping the scroll in range.
    pub fn set_bounds(&mut self, content_rows: u16, viewport_rows: u16) {
        self.content_rows = content_rows;
        self.viewport_rows = viewport_rows;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Apply a scroll action. Anything else is ignored.
    pub fn apply(&mut self, action: Action) {
        let page = self.viewport_rows.saturating_sub(1).max(1);
        self.scroll = match action {
            Action::Up => self.scroll.saturating_sub(1),
            Action::Down => self.scroll.saturating_add(1),
            Action::PageUp => self.scroll.saturating_sub(page),
            Action::PageDown => self.scroll.saturating_add(page),
            Action::Top => 0,
            Action::Bottom => self.max_scroll(),
            Action::Quit | Action::None => self.scroll,
        }
        .min(self.max_scroll());
    }
}

/// Draw the whole viewer into `area`.
pub fn render_view(
    output: &TimelineOutput,
    theme: &Theme,
    state: &mut ViewerState,
    area: Rect,
    buf: &mut Buffer,
) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let scale = CellScale::fit(output, body.width, DEFAULT_ROWS_PER_HOUR);
    state.set_bounds(scale.content_rows(output), body.height);

    Paragraph::new(header_line(output, theme))
        .style(Style::default().bg(theme.surface))
        .render(header, buf);

    TimelineWidget::new(output, theme, scale)
        .scroll(state.scroll())
        .render(body, buf);

    Paragraph::new(Line::from(vec![
        Span::styled(" j/k", Style::default().fg(theme.text)),
        Span::styled(" scroll  ", Style::default().fg(theme.muted)),
        Span::styled("PgUp/PgDn", Style::default().fg(theme.text)),
        Span::styled(" page  ", Style::default().fg(theme.muted)),
        Span::styled("g/G", Style::default().fg(theme.text)),
        Span::styled(" top/bottom  ", Style::default().fg(theme.muted)),
        Span::styled("q", Style::default().fg(theme.text)),
        Span::styled(" quit", Style::default().fg(theme.muted)),
    ]))
    .style(Style::default().bg(theme.surface))
    .render(footer, buf);
}

fn header_line(output: &TimelineOutput, theme: &Theme) -> Line<'static> {
    let day = output
        .day
        .map_or_else(|| "No events".to_string(), |d| d.format("%A %-d %B %Y").to_string());

    let mut spans = vec![
        Span::styled(format!(" {day}"), Style::default().fg(theme.text)),
        Span::styled(
            format!("  {} placed", output.placements.len()),
            Style::default().fg(theme.subtext),
        ),
    ];

    let dropped = output.dropped().count();
    if dropped > 0 {
        spans.push(Span::styled(
            format!("  {dropped} dropped"),
            Style::default().fg(theme.events[1]),
        ));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_to_string, sample_output};

    #[test]
    fn test_scroll_is_clamped() {
        let mut state = ViewerState::default();
        state.set_bounds(52, 20);
        assert_eq!(state.max_scroll(), 32);

        state.apply(Action::Up);
        assert_eq!(state.scroll(), 0);

        state.apply(Action::PageDown);
        assert_eq!(state.scroll(), 19);

        state.apply(Action::Bottom);
        assert_eq!(state.scroll(), 32);

        state.apply(Action::Down);
        assert_eq!(state.scroll(), 32);

        state.apply(Action::Top);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn test_growing_viewport_pulls_scroll_back() {
        let mut state = ViewerState::default();
        state.set_bounds(52, 10);
        state.apply(Action::Bottom);
        assert_eq!(state.scroll(), 42);

        state.set_bounds(52, 60);
        assert_eq!(state.scroll(), 0);
    }

    #[test]
    fn test_render_view() {
        let output = sample_output();
        let mut state = ViewerState::default();
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);

        render_view(&output, &Theme::default(), &mut state, area, &mut buffer);
        let screen = buffer_to_string(&buffer);
        let lines: Vec<&str> = screen.lines().collect();

        assert!(lines[0].contains("Thursday 6 June 2024"));
        assert!(lines[0].contains("3 placed"));
        assert!(!lines[0].contains("dropped"));
        assert!(lines[23].contains("q quit"));
        assert!(screen.contains("Standup"));
        assert_eq!(state.max_scroll(), 52 - 22);
    }
}
