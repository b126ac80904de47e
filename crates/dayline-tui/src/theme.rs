//! Catppuccin Mocha color palette for the timeline.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Axis
    pub gridline: Color,
    pub divider: Color,

    /// Event accents, picked by column so neighbours differ.
    pub events: [Color; 5],
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244

            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            gridline: Color::Rgb(69, 71, 90),    // #45475a
            divider: Color::Rgb(127, 132, 156), // #7f849c

            events: [
                Color::Rgb(137, 180, 250), // #89b4fa (blue)
                Color::Rgb(250, 179, 135), // #fab387 (peach)
                Color::Rgb(166, 227, 161), // #a6e3a1 (green)
                Color::Rgb(203, 166, 247), // #cba6f7 (mauve)
                Color::Rgb(148, 226, 213), // #94e2d5 (teal)
            ],
        }
    }

    /// Accent for an event in `column`.
    pub fn event_color(&self, column: usize) -> Color {
        self.events[column % self.events.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_color_cycles() {
        let theme = Theme::default();
        assert_eq!(theme.event_color(0), theme.events[0]);
        assert_eq!(theme.event_color(theme.events.len()), theme.events[0]);
        assert_ne!(theme.event_color(0), theme.event_color(1));
    }
}
