//! Camera ownership: zoom-to-point, pan, resize.
//!
//! DESIGN
//! ======
//! Every mutation is a clamped, pure state transition on [`Camera`]. The
//! controller never touches the scene or the scheduler; the composition root
//! ([`crate::engine::EngineCore`]) culls and requests redraws after each call
//! that reports a change.
//!
//! Zoom keeps the focal point fixed: the scene point under the focal point
//! before the call is solved back onto the same screen point afterwards,
//! `translation' = focal - scene * new_scale`.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use crate::camera::{Camera, Point, Rect};
use crate::config::ViewportConfig;

/// Zoom direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel convention: scrolling down (positive `dy`) zooms out.
    /// Zero and NaN deltas carry no direction, so a horizontal-only scroll
    /// does not zoom (a sign-only mapping would zoom in on `dy == 0`).
    #[must_use]
    pub fn from_wheel_delta(dy: f64) -> Option<Self> {
        if dy > 0.0 {
            Some(Self::Out)
        } else if dy < 0.0 {
            Some(Self::In)
        } else {
            None
        }
    }

    /// Multiplicative factor for a given step `k`.
    #[must_use]
    pub fn factor(self, step: f64) -> f64 {
        match self {
            Self::In => step,
            Self::Out => 1.0 / step,
        }
    }
}

/// Owns the camera, its zoom bounds, and the viewport's pixel size.
#[derive(Debug, Clone)]
pub struct ViewportController {
    camera: Camera,
    min_scale: f64,
    max_scale: f64,
    width: f64,
    height: f64,
}

impl ViewportController {
    /// Controller for a `width` × `height` viewport. The configured initial
    /// zoom is clamped into the configured bounds.
    #[must_use]
    pub fn new(config: &ViewportConfig, width: f64, height: f64) -> Self {
        let scale = clamp_scale(config.initial_zoom, config.min_zoom, config.max_zoom);
        Self {
            camera: Camera { scale, ..Camera::default() },
            min_scale: config.min_zoom,
            max_scale: config.max_zoom,
            width: sanitize_dimension(width),
            height: sanitize_dimension(height),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.camera.scale
    }

    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    #[must_use]
    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Screen-space center of the viewport; the focal point for button zoom.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Scene-space rectangle currently on screen.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        self.camera.visible_rect(self.width, self.height)
    }

    /// Zoom level as a whole percentage, as shown in the zoom label.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn zoom_percent(&self) -> i64 {
        (self.camera.scale * 100.0).round() as i64
    }

    #[must_use]
    pub fn screen_to_scene(&self, screen: Point) -> Point {
        self.camera.screen_to_scene(screen)
    }

    #[must_use]
    pub fn scene_to_screen(&self, scene: Point) -> Point {
        self.camera.scene_to_screen(scene)
    }

    // --- Mutations ---

    /// Zoom by one `step` in `direction`, keeping `focal` fixed on screen.
    ///
    /// `focal` defaults to the viewport center. A focal point outside the
    /// viewport is accepted. Returns `false` (and leaves the camera untouched)
    /// when the inputs are not finite.
    pub fn zoom(&mut self, direction: ZoomDirection, focal: Option<Point>, step: f64) -> bool {
        let focal = focal.unwrap_or_else(|| self.viewport_center());
        if !focal.is_finite() || !step.is_finite() || step <= 0.0 {
            return false;
        }

        let old = self.camera;
        let new_scale = clamp_scale(old.scale * direction.factor(step), self.min_scale, self.max_scale);
        let anchor = old.screen_to_scene(focal);

        self.camera = Camera {
            scale: new_scale,
            translation_x: focal.x - anchor.x * new_scale,
            translation_y: focal.y - anchor.y * new_scale,
        };
        tracing::debug!(
            old_scale = old.scale,
            new_scale,
            focal_x = focal.x,
            focal_y = focal.y,
            "zoom"
        );
        true
    }

    /// Move the camera by a screen-space delta. Unbounded.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> bool {
        if !dx.is_finite() || !dy.is_finite() {
            return false;
        }
        self.camera.translation_x += dx;
        self.camera.translation_y += dy;
        true
    }

    /// Update viewport pixel dimensions. Scale and translation are unchanged.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = sanitize_dimension(width);
        self.height = sanitize_dimension(height);
        tracing::debug!(width = self.width, height = self.height, "viewport resized");
    }
}

/// `f64::clamp` without its panic on inverted or NaN bounds; the upper bound wins.
fn clamp_scale(scale: f64, min: f64, max: f64) -> f64 {
    scale.max(min).min(max)
}

/// Negative and non-finite sizes collapse to zero rather than inverting the visible rect.
fn sanitize_dimension(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}
