#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn cam(scale: f64, tx: f64, ty: f64) -> Camera {
    Camera { scale, translation_x: tx, translation_y: ty }
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_is_finite() {
    assert!(Point::new(1.0, -2.0).is_finite());
    assert!(!Point::new(f64::NAN, 0.0).is_finite());
    assert!(!Point::new(0.0, f64::INFINITY).is_finite());
}

// --- Rect ---

#[test]
fn rect_intersects_contained() {
    let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
    let inner = Rect::new(10.0, 10.0, 5.0, 5.0);
    assert!(inner.intersects(&outer));
    assert!(outer.intersects(&inner));
}

#[test]
fn rect_shared_right_edge_does_not_intersect() {
    let a = Rect::new(0.0, 0.0, 100.0, 100.0);
    let b = Rect::new(100.0, 0.0, 50.0, 50.0);
    assert!(!b.intersects(&a));
    assert!(!a.intersects(&b));
}

#[test]
fn rect_one_unit_overlap_intersects() {
    let a = Rect::new(0.0, 0.0, 100.0, 100.0);
    let b = Rect::new(99.0, 0.0, 50.0, 50.0);
    assert!(b.intersects(&a));
}

#[test]
fn rect_disjoint_vertically() {
    let a = Rect::new(0.0, 0.0, 100.0, 100.0);
    let b = Rect::new(0.0, 200.0, 100.0, 100.0);
    assert!(!a.intersects(&b));
}

#[test]
fn rect_translated_keeps_size() {
    let r = Rect::new(1.0, 2.0, 30.0, 40.0).translated(10.0, -2.0);
    assert_eq!(r, Rect::new(11.0, 0.0, 30.0, 40.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let c = Camera::default();
    assert_eq!(c.scale, 1.0);
    assert_eq!(c.translation_x, 0.0);
    assert_eq!(c.translation_y, 0.0);
}

// --- Conversions ---

#[test]
fn screen_to_scene_identity() {
    let world = Camera::default().screen_to_scene(Point::new(50.0, 75.0));
    assert!(point_approx_eq(world, Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_scene_with_scale_and_translation() {
    let c = cam(2.0, 20.0, 10.0);
    let scene = c.screen_to_scene(Point::new(20.0, 10.0));
    assert!(point_approx_eq(scene, Point::new(0.0, 0.0)));
}

#[test]
fn scene_to_screen_with_scale_and_translation() {
    let c = cam(3.0, 20.0, 10.0);
    let screen = c.scene_to_screen(Point::new(5.0, 5.0));
    // 5*3 + 20 = 35, 5*3 + 10 = 25
    assert!(point_approx_eq(screen, Point::new(35.0, 25.0)));
}

#[test]
fn round_trip_fractional_scale() {
    let c = cam(0.75, 13.7, -42.3);
    let scene = Point::new(333.3, -999.9);
    let back = c.screen_to_scene(c.scene_to_screen(scene));
    assert!(point_approx_eq(scene, back));
}

#[test]
fn screen_dist_to_scene_ignores_translation() {
    let c = cam(4.0, 999.0, -999.0);
    assert!(approx_eq(c.screen_dist_to_scene(8.0), 2.0));
}

// --- Visible rect ---

#[test]
fn visible_rect_identity_matches_viewport() {
    let r = Camera::default().visible_rect(800.0, 600.0);
    assert_eq!(r, Rect::new(0.0, 0.0, 800.0, 600.0));
}

#[test]
fn visible_rect_after_pan() {
    let r = cam(1.0, -1000.0, -1000.0).visible_rect(800.0, 600.0);
    assert!(approx_eq(r.x, 1000.0));
    assert!(approx_eq(r.y, 1000.0));
    assert!(approx_eq(r.width, 800.0));
    assert!(approx_eq(r.height, 600.0));
}

#[test]
fn visible_rect_zoomed_in_shrinks() {
    let r = cam(2.0, 0.0, 0.0).visible_rect(800.0, 600.0);
    assert!(approx_eq(r.width, 400.0));
    assert!(approx_eq(r.height, 300.0));
}

#[test]
fn visible_rect_corners_map_to_screen_corners() {
    let c = cam(1.7, 123.0, -45.0);
    let r = c.visible_rect(640.0, 480.0);
    let top_left = c.scene_to_screen(Point::new(r.x, r.y));
    let bottom_right = c.scene_to_screen(Point::new(r.x + r.width, r.y + r.height));
    assert!(point_approx_eq(top_left, Point::new(0.0, 0.0)));
    assert!(point_approx_eq(bottom_right, Point::new(640.0, 480.0)));
}
