//! dayline-tui: Terminal rendering for dayline timelines
//!
//! This crate draws a laid-out day in the terminal, including:
//! - A ratatui widget for hour labels, gridlines and event blocks
//! - A scrollable full-screen viewer

mod event;
#[cfg(test)]
pub mod test_utils;
mod text;
mod theme;
mod viewer;
mod widget;

pub use dayline_engine;
pub use event::{key_to_action, Action, Event, EventHandler};
pub use theme::Theme;
pub use viewer::{render_view, ViewerState};
pub use widget::{CellScale, TimelineWidget, DEFAULT_ROWS_PER_HOUR};

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dayline_engine::TimelineOutput;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Show a laid-out day in a full-screen viewer until the user quits.
///
/// The terminal is restored on return, including on error.
pub async fn run_viewer(output: &TimelineOutput) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(250);
    let result = run_loop(&mut terminal, output, &mut events).await;

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    output: &TimelineOutput,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    let theme = Theme::default();
    let mut state = ViewerState::default();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            render_view(output, &theme, &mut state, area, frame.buffer_mut());
        })?;

        match events.next().await {
            Some(Event::Key(key)) => match key_to_action(key) {
                Action::Quit => return Ok(()),
                action => state.apply(action),
            },
            Some(Event::Mouse(mouse)) => match mouse.kind {
                MouseEventKind::ScrollUp => state.apply(Action::Up),
                MouseEventKind::ScrollDown => state.apply(Action::Down),
                _ => {}
            },
            // Resizes are picked up by the next draw
            Some(Event::Tick | Event::Resize(_, _)) => {}
            None => return Ok(()),
        }
    }
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
