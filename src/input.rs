//! Input model and the event adapter.
//!
//! This module defines the raw events a host delivers ([`InputEvent`]) and the
//! [`InputAdapter`] that maps them onto viewport and scheduler operations. The
//! adapter owns the only gesture state in the crate, the [`DragSession`],
//! which exists from drag-start to drag-end and carries the last pointer
//! position so each move can be applied as a delta.
//!
//! Wheel zoom is throttled here: a trackpad can deliver hundreds of wheel
//! events per second, and each executed zoom re-culls the dynamic layer.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use std::time::Instant;

use crate::camera::{Point, Size};
use crate::config::ViewportConfig;
use crate::engine::{Action, Pipeline};
use crate::scene::{Layer, NodeId};
use crate::timing::Throttle;
use crate::viewport::ZoomDirection;

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// What a drag gesture is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The whole stage: dragging pans the camera.
    Stage,
    /// A single node: dragging moves its bounds.
    Node(NodeId),
}

/// Raw events from the windowing layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// `pointer` is `None` when the host has no pointer position for the event.
    Wheel { pointer: Option<Point>, delta: WheelDelta },
    DragStart { target: DragTarget, pointer: Point },
    DragMove { pointer: Point },
    DragEnd { pointer: Point },
    Resize(Size),
    /// Toolbar zoom button.
    ZoomButton(ZoomDirection),
}

/// An in-progress drag. Dropped on drag-end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub target: DragTarget,
    /// Screen-space pointer position at the previous drag event.
    pub last_screen: Point,
}

/// A wheel zoom waiting on the throttle.
#[derive(Debug, Clone, Copy, PartialEq)]
struct WheelZoom {
    direction: ZoomDirection,
    focal: Point,
}

/// Maps input events to viewport, scene and scheduler operations.
#[derive(Debug)]
pub struct InputAdapter {
    drag: Option<DragSession>,
    wheel: Throttle<WheelZoom>,
    button_step: f64,
    wheel_step: f64,
}

impl InputAdapter {
    #[must_use]
    pub fn new(config: &ViewportConfig) -> Self {
        Self {
            drag: None,
            wheel: Throttle::new(config.wheel_throttle),
            button_step: config.button_zoom_step,
            wheel_step: config.wheel_zoom_step,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag
    }

    /// When a throttled wheel zoom is next due, if one is waiting.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.wheel.next_deadline()
    }

    // --- Wheel ---

    /// Wheel tick: zoom toward the pointer, throttled.
    ///
    /// Always asks the host to suppress native scrolling. Without a pointer
    /// position, or with a zero vertical delta, nothing else happens.
    pub fn on_wheel(
        &mut self,
        pipe: &mut Pipeline<'_>,
        pointer: Option<Point>,
        delta: WheelDelta,
        now: Instant,
    ) -> Vec<Action> {
        let mut actions = vec![Action::PreventDefault];
        let Some(focal) = pointer else {
            return actions;
        };
        let Some(direction) = ZoomDirection::from_wheel_delta(delta.dy) else {
            return actions;
        };
        if let Some(zoom) = self.wheel.call(WheelZoom { direction, focal }, now) {
            apply_zoom(pipe, zoom.direction, Some(zoom.focal), self.wheel_step, &mut actions);
        }
        actions
    }

    /// Run a throttled wheel zoom whose interval boundary has passed.
    pub fn poll(&mut self, pipe: &mut Pipeline<'_>, now: Instant) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(zoom) = self.wheel.poll(now) {
            apply_zoom(pipe, zoom.direction, Some(zoom.focal), self.wheel_step, &mut actions);
        }
        actions
    }

    // --- Toolbar ---

    /// Button zoom about the viewport center. Not throttled.
    pub fn on_zoom_button(&mut self, pipe: &mut Pipeline<'_>, direction: ZoomDirection) -> Vec<Action> {
        let mut actions = Vec::new();
        apply_zoom(pipe, direction, None, self.button_step, &mut actions);
        actions
    }

    // --- Drag ---

    /// Begin a drag. A node target that is not in the scene is ignored.
    pub fn on_drag_start(&mut self, pipe: &mut Pipeline<'_>, target: DragTarget, pointer: Point) -> Vec<Action> {
        if let DragTarget::Node(id) = target {
            if pipe.scene.get(&id).is_none() {
                tracing::debug!(%id, "drag start on unknown node ignored");
                return Vec::new();
            }
        }
        self.drag = Some(DragSession { target, last_screen: pointer });
        tracing::debug!(?target, "drag started");
        match target {
            DragTarget::Stage => vec![Action::SetCursor("grabbing".into())],
            DragTarget::Node(_) => vec![Action::SetCursor("move".into())],
        }
    }

    /// Apply pointer motion to the drag target and request a coalesced redraw.
    /// Without an active session this does nothing.
    pub fn on_drag_move(&mut self, pipe: &mut Pipeline<'_>, pointer: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        let Some(session) = self.drag.as_mut() else {
            return actions;
        };
        let dx = pointer.x - session.last_screen.x;
        let dy = pointer.y - session.last_screen.y;
        session.last_screen = pointer;
        let target = session.target;
        if let Some(layer) = apply_drag_delta(pipe, target, dx, dy) {
            pipe.request_redraw(layer, &mut actions);
        }
        actions
    }

    /// End the drag and always request one final redraw, so the last
    /// position reaches the screen even if an intermediate frame was skipped.
    pub fn on_drag_end(&mut self, pipe: &mut Pipeline<'_>, pointer: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        let layer = match self.drag.take() {
            Some(session) => {
                let dx = pointer.x - session.last_screen.x;
                let dy = pointer.y - session.last_screen.y;
                apply_drag_delta(pipe, session.target, dx, dy).unwrap_or(Layer::Dynamic)
            }
            None => Layer::Dynamic,
        };
        pipe.request_redraw(layer, &mut actions);
        actions.push(Action::SetCursor("default".into()));
        tracing::debug!(%layer, "drag ended");
        actions
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn apply_zoom(
    pipe: &mut Pipeline<'_>,
    direction: ZoomDirection,
    focal: Option<Point>,
    step: f64,
    actions: &mut Vec<Action>,
) {
    if !pipe.viewport.zoom(direction, focal, step) {
        return;
    }
    pipe.camera_changed(actions);
    actions.push(Action::ZoomChanged {
        scale: pipe.viewport.scale(),
        percent: pipe.viewport.zoom_percent(),
    });
}

/// Move the drag target by a screen-space delta. Returns the layer that needs
/// a redraw, or `None` if the target is gone or the delta was unusable.
fn apply_drag_delta(pipe: &mut Pipeline<'_>, target: DragTarget, dx: f64, dy: f64) -> Option<Layer> {
    if dx == 0.0 && dy == 0.0 {
        return match target {
            DragTarget::Stage => Some(Layer::Dynamic),
            DragTarget::Node(id) => pipe.scene.layer_of(&id),
        };
    }
    match target {
        DragTarget::Stage => {
            if !pipe.viewport.pan_by(dx, dy) {
                return None;
            }
            pipe.cull_dynamic();
            Some(Layer::Dynamic)
        }
        DragTarget::Node(id) => {
            if !dx.is_finite() || !dy.is_finite() {
                return None;
            }
            let scale = pipe.viewport.scale();
            let layer = pipe.scene.translate_node(&id, dx / scale, dy / scale)?;
            pipe.cull_one(&id);
            Some(layer)
        }
    }
}
