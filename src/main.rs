//! Headless demo: drives the engine through a scripted session on the tokio
//! clock and logs every layer draw.
//!
//! The frame interval stands in for a display refresh. Script events, engine
//! timers and frames are all awaited from one `select!` loop, so the log shows
//! wheel storms collapsing into one draw per frame and a resize burst settling
//! into a single relayout.

use std::time::Duration;

use rand::Rng;
use serde_json::json;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use viewport::camera::{Point, Rect, Size};
use viewport::config::ViewportConfig;
use viewport::engine::{Action, Engine};
use viewport::input::{DragTarget, InputEvent, WheelDelta};
use viewport::render::RecordingSurface;
use viewport::scene::{Layer, Node, NodeId};
use viewport::viewport::ZoomDirection;

const SCATTERED_NODES: usize = 200;
const WORLD_EXTENT: f64 = 3000.0;
const SQUARE_SIDE: f64 = 100.0;

type Script = Vec<(Duration, InputEvent)>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = ViewportConfig::from_env()?;
    let size = Size::new(800.0, 600.0);
    info!(
        min_zoom = config.min_zoom,
        max_zoom = config.max_zoom,
        frame_interval_ms = config.frame_interval.as_millis(),
        "viewport demo configured"
    );

    let mut engine = Engine::new(RecordingSurface::new(), &config, size);
    let square = seed_scene(&mut engine, size)?;
    let script = build_script(size, square);
    info!(events = script.len(), nodes = engine.core.scene.len(), "running script");

    run(&mut engine, config.frame_interval, script).await;

    let camera = engine.camera();
    info!(
        static_draws = engine.core.scheduler.draw_count(Layer::Static),
        dynamic_draws = engine.core.scheduler.draw_count(Layer::Dynamic),
        scale = camera.scale,
        zoom_percent = engine.core.zoom_percent(),
        "demo finished"
    );
    Ok(())
}

/// Background on the static layer, a square at the viewport center and a
/// random scatter on the dynamic layer. Returns the square's id.
fn seed_scene(engine: &mut Engine<RecordingSurface>, size: Size) -> Result<NodeId, Box<dyn std::error::Error>> {
    let background = Node::new(Rect::new(0.0, 0.0, size.width, size.height)).with_payload(json!({ "kind": "grid" }));
    log_actions(&engine.add_node(Layer::Static, background)?);

    let square = Node::new(Rect::new(
        size.width / 2.0 - SQUARE_SIDE / 2.0,
        size.height / 2.0 - SQUARE_SIDE / 2.0,
        SQUARE_SIDE,
        SQUARE_SIDE,
    ))
    .with_payload(json!({ "kind": "rect", "fill": "#4a90d9" }));
    let square_id = square.id;
    log_actions(&engine.add_node(Layer::Dynamic, square)?);

    let mut rng = rand::rng();
    for _ in 0..SCATTERED_NODES {
        let side = rng.random_range(10.0..80.0);
        let bounds = Rect::new(
            rng.random_range(-WORLD_EXTENT..WORLD_EXTENT),
            rng.random_range(-WORLD_EXTENT..WORLD_EXTENT),
            side,
            side,
        );
        log_actions(&engine.add_node(Layer::Dynamic, Node::new(bounds).with_payload(json!({ "kind": "ellipse" })))?);
    }
    Ok(square_id)
}

fn build_script(size: Size, square: NodeId) -> Script {
    let mut script = Script::new();
    let center = Point::new(size.width / 2.0, size.height / 2.0);
    let mut at = |ms: u64, event: InputEvent| script.push((Duration::from_millis(ms), event));

    at(0, InputEvent::ZoomButton(ZoomDirection::In));

    // Trackpad-rate wheel storm: in, then back out.
    for i in 0..40 {
        let dy = if i < 20 { -4.0 } else { 4.0 };
        at(100 + 3 * i, InputEvent::Wheel { pointer: Some(center), delta: WheelDelta { dx: 0.0, dy } });
    }
    at(260, InputEvent::Wheel { pointer: None, delta: WheelDelta { dx: 0.0, dy: 120.0 } });

    at(400, InputEvent::DragStart { target: DragTarget::Stage, pointer: center });
    let mut pointer = center;
    for i in 1..=30 {
        pointer = Point::new(pointer.x - 20.0, pointer.y - 15.0);
        at(400 + 5 * i, InputEvent::DragMove { pointer });
    }
    at(560, InputEvent::DragEnd { pointer });

    at(700, InputEvent::ZoomButton(ZoomDirection::Out));
    at(800, InputEvent::DragStart { target: DragTarget::Node(square), pointer: center });
    at(820, InputEvent::DragMove { pointer: Point::new(center.x + 60.0, center.y) });
    at(840, InputEvent::DragEnd { pointer: Point::new(center.x + 80.0, center.y + 10.0) });

    for (i, w) in [900.0, 1000.0, 1100.0, 1280.0].into_iter().enumerate() {
        at(1000 + 20 * i as u64, InputEvent::Resize(Size::new(w, 800.0)));
    }
    script
}

async fn run(engine: &mut Engine<RecordingSurface>, frame_interval: Duration, script: Script) {
    let start = Instant::now();
    let mut frames = tokio::time::interval(frame_interval);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut events = script.into_iter().peekable();

    loop {
        let next_event = events.peek().map(|(offset, _)| start + *offset);
        let next_timer = engine.next_deadline().map(Instant::from_std);
        let needs_frame = engine.needs_frame();
        if next_event.is_none() && next_timer.is_none() && !needs_frame {
            break;
        }

        tokio::select! {
            _ = frames.tick(), if needs_frame => {
                engine.surface_mut().begin_frame();
                let report = engine.frame();
                for record in engine.surface().records() {
                    debug!(frame = record.frame, layer = %record.layer, drawn = record.drawn, skipped = record.skipped, "draw");
                }
                engine.surface_mut().clear();
                info!(layers = ?report.drawn, "frame");
            }
            () = tokio::time::sleep_until(next_event.unwrap_or(start)), if next_event.is_some() => {
                if let Some((_, event)) = events.next() {
                    let actions = engine.handle(event, Instant::now().into_std());
                    log_actions(&actions);
                }
            }
            () = tokio::time::sleep_until(next_timer.unwrap_or(start)), if next_timer.is_some() => {
                let actions = engine.poll(Instant::now().into_std());
                log_actions(&actions);
            }
        }
    }
}

fn log_actions(actions: &[Action]) {
    for action in actions {
        match action {
            Action::ZoomChanged { percent, .. } => info!(percent, "zoom label"),
            Action::SetCursor(cursor) => debug!(%cursor, "cursor"),
            Action::RenderNeeded => debug!("frame requested"),
            Action::PreventDefault => {}
        }
    }
}
