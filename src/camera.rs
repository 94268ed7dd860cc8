//! Camera transform and the geometry it operates on.
//!
//! The composed transform is `screen = scene * scale + translation`. Nothing in
//! here clamps or schedules; [`crate::viewport::ViewportController`] owns the
//! bounds and the side effects.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

/// A point in either screen or scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite (not NaN or infinite).
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Open overlap test. Rectangles that only share an edge do not overlap.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x + self.width > other.x
            && self.x < other.x + other.width
            && self.y + self.height > other.y
            && self.y < other.y + other.height
    }

    /// Same rectangle shifted by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy, ..*self }
    }
}

/// Viewport dimensions in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Camera state: uniform scale plus a screen-space translation.
///
/// `translation_x` / `translation_y` are in screen pixels.
/// `scale` is a factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub scale: f64,
    pub translation_x: f64,
    pub translation_y: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { scale: 1.0, translation_x: 0.0, translation_y: 0.0 }
    }
}

impl Camera {
    /// Convert a screen-space point to scene coordinates.
    #[must_use]
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.translation_x) / self.scale,
            y: (screen.y - self.translation_y) / self.scale,
        }
    }

    /// Convert a scene-space point to screen coordinates.
    #[must_use]
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        Point {
            x: scene.x * self.scale + self.translation_x,
            y: scene.y * self.scale + self.translation_y,
        }
    }

    /// Convert a screen-space distance to a scene-space distance.
    #[must_use]
    pub fn screen_dist_to_scene(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// The scene-space rectangle currently shown by a viewport of the given pixel size.
    #[must_use]
    pub fn visible_rect(&self, viewport_width: f64, viewport_height: f64) -> Rect {
        Rect {
            x: -self.translation_x / self.scale,
            y: -self.translation_y / self.scale,
            width: viewport_width / self.scale,
            height: viewport_height / self.scale,
        }
    }
}
