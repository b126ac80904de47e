//! Layout style configuration.
//!
//! All lengths are in points, in the coordinate space of the container the
//! caller draws into (origin top-left, Y growing downward).

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Numeric constants that drive a layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutStyle {
    /// Height of one hour label row.
    #[serde(default = "default_row_height")]
    pub row_height: f64,

    /// Extra vertical space between consecutive rows.
    #[serde(default)]
    pub row_gap: f64,

    /// Width of the hour label column.
    #[serde(default = "default_label_width")]
    pub label_width: f64,

    /// Distance from the container's left edge to the label column.
    #[serde(default = "default_label_offset_x")]
    pub label_offset_x: f64,

    /// Space between the label column and the event area.
    #[serde(default = "default_line_offset")]
    pub line_left_offset: f64,

    /// Space kept free at the container's right edge.
    #[serde(default = "default_line_offset")]
    pub line_right_offset: f64,

    /// Gap subtracted from every event's width and height.
    #[serde(default = "default_event_gap")]
    pub event_gap: f64,

    /// Thickness of hour gridlines and the divider.
    #[serde(default = "default_line_thickness")]
    pub line_thickness: f64,

    /// Total width of the drawing container.
    #[serde(default = "default_container_width")]
    pub container_width: f64,

    /// First hour shown on the axis (24-hour clock).
    #[serde(default = "default_first_hour")]
    pub first_hour: u32,

    /// Last hour shown on the axis (24-hour clock, inclusive).
    #[serde(default = "default_last_hour")]
    pub last_hour: u32,

    /// What to do with events that leave the visible hours.
    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
}

fn default_row_height() -> f64 {
    30.0
}

fn default_label_width() -> f64 {
    40.0
}

fn default_label_offset_x() -> f64 {
    10.0
}

fn default_line_offset() -> f64 {
    10.0
}

fn default_event_gap() -> f64 {
    1.0
}

fn default_line_thickness() -> f64 {
    0.5
}

fn default_container_width() -> f64 {
    375.0
}

fn default_first_hour() -> u32 {
    9
}

fn default_last_hour() -> u32 {
    21
}

/// Policy for events that fall partly or wholly outside the visible hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Clip to the visible window; drop only events with nothing visible.
    #[default]
    Clip,
    /// Drop every event that is not fully inside the visible window.
    Drop,
}

impl std::fmt::Display for OutOfRangePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clip => write!(f, "clip"),
            Self::Drop => write!(f, "drop"),
        }
    }
}

impl LayoutStyle {
    /// Load a style from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, StyleError> {
        let content = std::fs::read_to_string(path).map_err(StyleError::Io)?;
        let style: Self = serde_json::from_str(&content).map_err(StyleError::Parse)?;
        style.validate()?;
        Ok(style)
    }

    /// Save the style to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), StyleError> {
        let content = serde_json::to_string_pretty(self).map_err(StyleError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StyleError::Io)?;
        }
        std::fs::write(path, content).map_err(StyleError::Io)
    }

    /// Copy of this style with a different container width.
    #[must_use]
    pub fn with_container_width(mut self, width: f64) -> Self {
        self.container_width = width;
        self
    }

    /// Vertical distance between the tops of two consecutive rows.
    pub fn pitch(&self) -> f64 {
        self.row_height + self.row_gap
    }

    /// X where the event area (and every gridline) begins.
    pub fn event_left(&self) -> f64 {
        self.label_offset_x + self.label_width + self.line_left_offset
    }

    /// X where the event area ends.
    pub fn event_right(&self) -> f64 {
        self.container_width - self.line_right_offset
    }

    /// Horizontal space shared by the columns of a cluster.
    pub fn available_width(&self) -> f64 {
        self.event_right() - self.event_left()
    }

    /// Check that the style describes a usable geometry.
    pub fn validate(&self) -> Result<(), StyleError> {
        let lengths = [
            ("row_height", self.row_height),
            ("row_gap", self.row_gap),
            ("label_width", self.label_width),
            ("label_offset_x", self.label_offset_x),
            ("line_left_offset", self.line_left_offset),
            ("line_right_offset", self.line_right_offset),
            ("event_gap", self.event_gap),
            ("line_thickness", self.line_thickness),
            ("container_width", self.container_width),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(StyleError::Invalid(format!(
                    "{name} must be a finite, non-negative length (got {value})"
                )));
            }
        }

        if self.row_height <= 0.0 {
            return Err(StyleError::Invalid("row_height must be positive".into()));
        }

        if self.last_hour > 23 {
            return Err(StyleError::Invalid(format!(
                "last_hour must be at most 23 (got {})",
                self.last_hour
            )));
        }

        if self.first_hour > self.last_hour {
            return Err(StyleError::Invalid(format!(
                "first_hour {} is after last_hour {}",
                self.first_hour, self.last_hour
            )));
        }

        if self.available_width() <= self.event_gap {
            return Err(StyleError::Invalid(format!(
                "container_width {} leaves no room for events",
                self.container_width
            )));
        }

        Ok(())
    }
}

impl Default for LayoutStyle {
    fn default() -> Self {
        Self {
            row_height: default_row_height(),
            row_gap: 0.0,
            label_width: default_label_width(),
            label_offset_x: default_label_offset_x(),
            line_left_offset: default_line_offset(),
            line_right_offset: default_line_offset(),
            event_gap: default_event_gap(),
            line_thickness: default_line_thickness(),
            container_width: default_container_width(),
            first_hour: default_first_hour(),
            last_hour: default_last_hour(),
            out_of_range: OutOfRangePolicy::Clip,
        }
    }
}

/// Errors that can occur when working with a style.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    /// I/O error reading or writing the style file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing style JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing style to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The style describes an impossible geometry.
    #[error("Invalid style: {0}")]
    Invalid(String),
}
