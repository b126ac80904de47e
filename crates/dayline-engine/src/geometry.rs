//! Rectangles handed to the rendering side.

use serde::Serialize;

/// An axis-aligned rectangle in container points (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LayoutRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LayoutRect {
    /// Create a rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X of the right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Y of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether two rectangles overlap once every edge is rounded to the
    /// nearest whole point. Shared edges do not count.
    pub fn intersects_rounded(&self, other: &LayoutRect) -> bool {
        self.x.round() < other.right().round()
            && other.x.round() < self.right().round()
            && self.overlaps_vertically_rounded(other)
    }

    /// Whether the vertical spans overlap once rounded, ignoring X entirely.
    pub fn overlaps_vertically_rounded(&self, other: &LayoutRect) -> bool {
        self.y.round() < other.bottom().round() && other.y.round() < self.bottom().round()
    }
}
