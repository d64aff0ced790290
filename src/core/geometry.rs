//! Scene-space points and rectangles.

use serde::{Deserialize, Serialize};

/// A point in scene coordinates (pixels, y grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of a visual object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle centred on `center`.
///
/// Objects are placed by their centre, so hit-testing works on this form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub center: Point,
    pub size: Size,
}

impl Rect {
    #[must_use]
    pub const fn centered(center: Point, size: Size) -> Self {
        Self { center, size }
    }

    /// Check whether `point` lies inside the rectangle (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        let half_w = self.size.width / 2.0;
        let half_h = self.size.height / 2.0;
        (point.x - self.center.x).abs() <= half_w && (point.y - self.center.y).abs() <= half_h
    }
}
