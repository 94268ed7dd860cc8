#![allow(clippy::float_cmp)]

use std::time::Duration;

use super::*;
use crate::camera::{Camera, Rect};
use crate::schedule::RenderScheduler;
use crate::scene::{Node, SceneGraph};
use crate::viewport::ViewportController;

struct Rig {
    viewport: ViewportController,
    scene: SceneGraph,
    scheduler: RenderScheduler,
    input: InputAdapter,
}

impl Rig {
    fn new() -> Self {
        let config = ViewportConfig::default();
        Self {
            viewport: ViewportController::new(&config, 800.0, 600.0),
            scene: SceneGraph::new(),
            scheduler: RenderScheduler::new(config.resize_debounce),
            input: InputAdapter::new(&config),
        }
    }

    fn run<R>(&mut self, f: impl FnOnce(&mut InputAdapter, &mut Pipeline<'_>) -> R) -> R {
        let mut pipe = Pipeline {
            viewport: &mut self.viewport,
            scene: &mut self.scene,
            scheduler: &mut self.scheduler,
        };
        f(&mut self.input, &mut pipe)
    }

    fn add(&mut self, layer: Layer, bounds: Rect) -> NodeId {
        let node = Node::new(bounds);
        let id = node.id;
        self.scene.add_node(layer, node).unwrap();
        id
    }

    fn wheel(&mut self, pointer: Option<Point>, dy: f64, now: Instant) -> Vec<Action> {
        self.run(|input, pipe| input.on_wheel(pipe, pointer, WheelDelta { dx: 0.0, dy }, now))
    }
}

fn center() -> Point {
    Point::new(400.0, 300.0)
}

// =============================================================
// Wheel
// =============================================================

#[test]
fn wheel_without_pointer_only_prevents_default() {
    let mut rig = Rig::new();
    let actions = rig.wheel(None, 120.0, Instant::now());
    assert_eq!(actions, vec![Action::PreventDefault]);
    assert_eq!(rig.viewport.camera(), Camera::default());
    assert!(!rig.scheduler.frame_registered());
}

#[test]
fn wheel_with_zero_delta_only_prevents_default() {
    let mut rig = Rig::new();
    let actions = rig.wheel(Some(center()), 0.0, Instant::now());
    assert_eq!(actions, vec![Action::PreventDefault]);
    assert_eq!(rig.viewport.camera(), Camera::default());
}

#[test]
fn wheel_down_zooms_out_about_pointer() {
    let mut rig = Rig::new();
    let actions = rig.wheel(Some(center()), 120.0, Instant::now());
    let scale = 1.0 / 1.1;
    assert_eq!(
        actions,
        vec![
            Action::PreventDefault,
            Action::RenderNeeded,
            Action::ZoomChanged { scale, percent: 91 },
        ]
    );
    assert!(rig.scheduler.is_pending(Layer::Dynamic));
    assert!(!rig.scheduler.is_pending(Layer::Static));
}

#[test]
fn wheel_up_zooms_in() {
    let mut rig = Rig::new();
    rig.wheel(Some(Point::new(10.0, 10.0)), -3.0, Instant::now());
    assert!((rig.viewport.scale() - 1.1).abs() < 1e-12);
    assert_eq!(rig.viewport.zoom_percent(), 110);
}

#[test]
fn wheel_burst_is_throttled_to_trailing_call() {
    let mut rig = Rig::new();
    let t0 = Instant::now();
    rig.wheel(Some(center()), -1.0, t0);
    let after_first = rig.viewport.scale();

    for ms in [2, 5, 9] {
        let actions = rig.wheel(Some(center()), -1.0, t0 + Duration::from_millis(ms));
        assert_eq!(actions, vec![Action::PreventDefault]);
    }
    assert_eq!(rig.viewport.scale(), after_first);
    assert_eq!(rig.input.next_deadline(), Some(t0 + Duration::from_millis(16)));

    let early = rig.run(|input, pipe| input.poll(pipe, t0 + Duration::from_millis(15)));
    assert!(early.is_empty());

    let fired = rig.run(|input, pipe| input.poll(pipe, t0 + Duration::from_millis(16)));
    assert!(fired.iter().any(|a| matches!(a, Action::ZoomChanged { .. })));
    assert!((rig.viewport.scale() - 1.1 * 1.1).abs() < 1e-12);
    assert_eq!(rig.input.next_deadline(), None);
}

#[test]
fn wheel_zoom_culls_dynamic_layer() {
    let mut rig = Rig::new();
    // Just past the right edge at scale 1; zooming out brings it into view.
    let id = rig.add(Layer::Dynamic, Rect::new(820.0, 100.0, 10.0, 10.0));
    rig.scene.get_mut(&id).unwrap().visible = false;
    rig.wheel(Some(center()), 120.0, Instant::now());
    assert!(rig.scene.get(&id).unwrap().visible);
}

// =============================================================
// Zoom buttons
// =============================================================

#[test]
fn button_zoom_uses_viewport_center() {
    let mut rig = Rig::new();
    let before = rig.viewport.screen_to_scene(center());
    let actions = rig.run(|input, pipe| input.on_zoom_button(pipe, ZoomDirection::In));
    assert!(actions.contains(&Action::RenderNeeded));
    assert!(actions.iter().any(|a| matches!(a, Action::ZoomChanged { percent: 110, .. })));
    let after = rig.viewport.scene_to_screen(before);
    assert!((after.x - 400.0).abs() < 1e-9);
    assert!((after.y - 300.0).abs() < 1e-9);
}

#[test]
fn button_zoom_is_not_throttled() {
    let mut rig = Rig::new();
    for _ in 0..3 {
        rig.run(|input, pipe| input.on_zoom_button(pipe, ZoomDirection::Out));
    }
    assert!((rig.viewport.scale() - 1.0 / (1.1 * 1.1 * 1.1)).abs() < 1e-12);
    assert_eq!(rig.input.next_deadline(), None);
}

// =============================================================
// Stage drag
// =============================================================

#[test]
fn stage_drag_pans_by_pointer_delta() {
    let mut rig = Rig::new();
    let start = rig.run(|input, pipe| input.on_drag_start(pipe, DragTarget::Stage, Point::new(100.0, 100.0)));
    assert_eq!(start, vec![Action::SetCursor("grabbing".into())]);
    assert!(rig.input.is_dragging());

    let first = rig.run(|input, pipe| input.on_drag_move(pipe, Point::new(90.0, 80.0)));
    assert_eq!(first, vec![Action::RenderNeeded]);
    let second = rig.run(|input, pipe| input.on_drag_move(pipe, Point::new(70.0, 60.0)));
    assert!(second.is_empty());

    let cam = rig.viewport.camera();
    assert_eq!((cam.translation_x, cam.translation_y), (-30.0, -40.0));
    assert_eq!(rig.input.drag_session().unwrap().last_screen, Point::new(70.0, 60.0));
}

#[test]
fn stage_drag_reveals_offscreen_node() {
    let mut rig = Rig::new();
    let id = rig.add(Layer::Dynamic, Rect::new(1000.0, 1000.0, 50.0, 50.0));
    rig.scene.get_mut(&id).unwrap().visible = false;

    rig.run(|input, pipe| input.on_drag_start(pipe, DragTarget::Stage, Point::new(1000.0, 1000.0)));
    rig.run(|input, pipe| input.on_drag_move(pipe, Point::new(0.0, 0.0)));
    assert_eq!(rig.viewport.visible_rect().x, 1000.0);
    assert!(rig.scene.get(&id).unwrap().visible);
}

#[test]
fn drag_move_without_session_is_noop() {
    let mut rig = Rig::new();
    let actions = rig.run(|input, pipe| input.on_drag_move(pipe, Point::new(5.0, 5.0)));
    assert!(actions.is_empty());
    assert_eq!(rig.viewport.camera(), Camera::default());
    assert!(!rig.scheduler.frame_registered());
}

// =============================================================
// Node drag
// =============================================================

#[test]
fn node_drag_converts_screen_delta_to_scene() {
    let mut rig = Rig::new();
    for _ in 0..50 {
        rig.viewport.zoom(ZoomDirection::In, Some(Point::new(0.0, 0.0)), 1.1);
    }
    assert_eq!(rig.viewport.scale(), 3.0);
    let id = rig.add(Layer::Dynamic, Rect::new(10.0, 10.0, 20.0, 20.0));

    let start = rig.run(|input, pipe| input.on_drag_start(pipe, DragTarget::Node(id), Point::new(60.0, 60.0)));
    assert_eq!(start, vec![Action::SetCursor("move".into())]);
    rig.run(|input, pipe| input.on_drag_move(pipe, Point::new(90.0, 0.0)));

    let bounds = rig.scene.get(&id).unwrap().bounds;
    assert!((bounds.x - 20.0).abs() < 1e-9);
    assert!((bounds.y + 10.0).abs() < 1e-9);
    assert_eq!(rig.viewport.camera().translation_x, 0.0);
}

#[test]
fn node_drag_redraws_the_nodes_layer() {
    let mut rig = Rig::new();
    let id = rig.add(Layer::Static, Rect::new(0.0, 0.0, 800.0, 600.0));
    rig.run(|input, pipe| input.on_drag_start(pipe, DragTarget::Node(id), Point::new(0.0, 0.0)));
    rig.run(|input, pipe| input.on_drag_move(pipe, Point::new(5.0, 0.0)));
    assert!(rig.scheduler.is_pending(Layer::Static));
    assert!(!rig.scheduler.is_pending(Layer::Dynamic));
}

#[test]
fn drag_start_on_unknown_node_is_ignored() {
    let mut rig = Rig::new();
    let ghost = NodeId::new_v4();
    let actions = rig.run(|input, pipe| input.on_drag_start(pipe, DragTarget::Node(ghost), Point::new(1.0, 1.0)));
    assert!(actions.is_empty());
    assert!(!rig.input.is_dragging());
}

// =============================================================
// Drag end
// =============================================================

#[test]
fn drag_end_clears_session_and_redraws() {
    let mut rig = Rig::new();
    rig.run(|input, pipe| input.on_drag_start(pipe, DragTarget::Stage, Point::new(0.0, 0.0)));
    let actions = rig.run(|input, pipe| input.on_drag_end(pipe, Point::new(0.0, 0.0)));
    assert_eq!(
        actions,
        vec![Action::RenderNeeded, Action::SetCursor("default".into())]
    );
    assert!(!rig.input.is_dragging());
    assert!(rig.scheduler.is_pending(Layer::Dynamic));
}

#[test]
fn drag_end_applies_final_delta() {
    let mut rig = Rig::new();
    rig.run(|input, pipe| input.on_drag_start(pipe, DragTarget::Stage, Point::new(0.0, 0.0)));
    rig.run(|input, pipe| input.on_drag_end(pipe, Point::new(25.0, -5.0)));
    let cam = rig.viewport.camera();
    assert_eq!((cam.translation_x, cam.translation_y), (25.0, -5.0));
}

#[test]
fn drag_end_without_session_still_redraws() {
    let mut rig = Rig::new();
    let actions = rig.run(|input, pipe| input.on_drag_end(pipe, Point::new(3.0, 3.0)));
    assert!(actions.contains(&Action::RenderNeeded));
    assert!(rig.scheduler.is_pending(Layer::Dynamic));
    assert_eq!(rig.viewport.camera(), Camera::default());
}
