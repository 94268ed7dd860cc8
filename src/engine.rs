use std::time::Instant;

use crate::camera::{Camera, Point, Rect, Size};
use crate::config::ViewportConfig;
use crate::cull::{self, CullStats};
use crate::input::{DragTarget, InputAdapter, InputEvent, WheelDelta};
use crate::render::RenderSurface;
use crate::scene::{Layer, Node, NodeId, SceneError, SceneGraph};
use crate::schedule::{FrameReport, RenderScheduler};
use crate::viewport::{ViewportController, ZoomDirection};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Suppress the platform's default handling (page scroll) for this event.
    PreventDefault,
    /// A redraw was requested while no frame callback was registered; the
    /// host should arrange a display-refresh callback that calls `on_frame`.
    RenderNeeded,
    /// Camera scale changed; `percent` is what the zoom label shows.
    ZoomChanged { scale: f64, percent: i64 },
    SetCursor(String),
}

/// Mutable borrows of the three components a camera or scene change flows
/// through. Built fresh for each call so no component holds another.
pub struct Pipeline<'a> {
    pub viewport: &'a mut ViewportController,
    pub scene: &'a mut SceneGraph,
    pub scheduler: &'a mut RenderScheduler,
}

impl Pipeline<'_> {
    /// Re-cull the dynamic layer against the current visible rect.
    pub fn cull_dynamic(&mut self) -> CullStats {
        let rect = self.viewport.visible_rect();
        cull::cull(self.scene.nodes_of_mut(Layer::Dynamic), &rect)
    }

    /// Re-cull a single node if it lives on the dynamic layer.
    pub fn cull_one(&mut self, id: &NodeId) {
        if self.scene.layer_of(id) != Some(Layer::Dynamic) {
            return;
        }
        let rect = self.viewport.visible_rect();
        if let Some(node) = self.scene.get_mut(id) {
            cull::cull_node(node, &rect);
        }
    }

    /// Request a coalesced redraw, surfacing `RenderNeeded` when it is the first this frame.
    pub fn request_redraw(&mut self, layer: Layer, actions: &mut Vec<Action>) {
        if self.scheduler.request_redraw(layer) {
            actions.push(Action::RenderNeeded);
        }
    }

    /// The visible rect moved: cull synchronously, draw on the next frame.
    pub fn camera_changed(&mut self, actions: &mut Vec<Action>) {
        self.cull_dynamic();
        self.request_redraw(Layer::Dynamic, actions);
    }
}

/// Core engine state: everything that doesn't depend on a drawing surface.
///
/// Separated from `Engine` so it can be tested without a surface. Each
/// component is constructed once here and lent to the others per call.
#[derive(Debug)]
pub struct EngineCore {
    pub viewport: ViewportController,
    pub scene: SceneGraph,
    pub scheduler: RenderScheduler,
    pub input: InputAdapter,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: &ViewportConfig, size: Size) -> Self {
        Self {
            viewport: ViewportController::new(config, size.width, size.height),
            scene: SceneGraph::new(),
            scheduler: RenderScheduler::new(config.resize_debounce),
            input: InputAdapter::new(config),
        }
    }

    fn split(&mut self) -> (Pipeline<'_>, &mut InputAdapter) {
        let Self { viewport, scene, scheduler, input } = self;
        (Pipeline { viewport, scene, scheduler }, input)
    }

    // --- Input events ---

    /// Route one raw event.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Vec<Action> {
        match event {
            InputEvent::Wheel { pointer, delta } => self.on_wheel(pointer, delta, now),
            InputEvent::DragStart { target, pointer } => self.on_drag_start(target, pointer),
            InputEvent::DragMove { pointer } => self.on_drag_move(pointer),
            InputEvent::DragEnd { pointer } => self.on_drag_end(pointer),
            InputEvent::Resize(size) => {
                self.on_resize(size, now);
                Vec::new()
            }
            InputEvent::ZoomButton(direction) => self.on_zoom_button(direction),
        }
    }

    pub fn on_wheel(&mut self, pointer: Option<Point>, delta: WheelDelta, now: Instant) -> Vec<Action> {
        let (mut pipe, input) = self.split();
        input.on_wheel(&mut pipe, pointer, delta, now)
    }

    pub fn on_zoom_button(&mut self, direction: ZoomDirection) -> Vec<Action> {
        let (mut pipe, input) = self.split();
        input.on_zoom_button(&mut pipe, direction)
    }

    pub fn on_drag_start(&mut self, target: DragTarget, pointer: Point) -> Vec<Action> {
        let (mut pipe, input) = self.split();
        input.on_drag_start(&mut pipe, target, pointer)
    }

    pub fn on_drag_move(&mut self, pointer: Point) -> Vec<Action> {
        let (mut pipe, input) = self.split();
        input.on_drag_move(&mut pipe, pointer)
    }

    pub fn on_drag_end(&mut self, pointer: Point) -> Vec<Action> {
        let (mut pipe, input) = self.split();
        input.on_drag_end(&mut pipe, pointer)
    }

    /// Window resized. Relayout is debounced; see [`EngineCore::poll`].
    pub fn on_resize(&mut self, size: Size, now: Instant) {
        self.scheduler.schedule_resize(size, now);
    }

    // --- Timers ---

    /// Fire any debounce/throttle timers that are due at `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(size) = self.scheduler.poll_resize(now) {
            self.apply_resize(size, &mut actions);
        }
        let (mut pipe, input) = self.split();
        actions.extend(input.poll(&mut pipe, now));
        actions
    }

    /// Earliest instant at which `poll` has work to do.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.scheduler.next_deadline(), self.input.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn apply_resize(&mut self, size: Size, actions: &mut Vec<Action>) {
        self.viewport.resize(size.width, size.height);
        let (mut pipe, _) = self.split();
        let stats = pipe.cull_dynamic();
        pipe.request_redraw(Layer::Static, actions);
        pipe.request_redraw(Layer::Dynamic, actions);
        tracing::info!(
            width = size.width,
            height = size.height,
            visible = stats.visible,
            hidden = stats.hidden,
            "relayout after resize"
        );
    }

    // --- Frame ---

    /// Display-refresh callback.
    pub fn on_frame<S>(&mut self, surface: &mut S) -> FrameReport
    where
        S: RenderSurface + ?Sized,
    {
        self.scheduler.on_frame(&self.scene, surface)
    }

    /// A redraw is waiting on the next display refresh.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.scheduler.frame_registered()
    }

    // --- Scene provisioning ---

    /// Insert a node on behalf of external tooling. Dynamic nodes are culled
    /// against the current view before their first draw.
    ///
    /// # Errors
    ///
    /// [`SceneError::DuplicateNode`] if the id is already in the scene.
    pub fn add_node(&mut self, layer: Layer, node: Node) -> Result<Vec<Action>, SceneError> {
        let id = node.id;
        self.scene.add_node(layer, node)?;
        let mut actions = Vec::new();
        let (mut pipe, _) = self.split();
        pipe.cull_one(&id);
        pipe.request_redraw(layer, &mut actions);
        Ok(actions)
    }

    /// Remove a node on behalf of external tooling. `None` if it was not in `layer`.
    pub fn remove_node(&mut self, layer: Layer, id: &NodeId) -> Option<(Node, Vec<Action>)> {
        let removed = self.scene.remove_node(layer, id)?;
        let mut actions = Vec::new();
        let (mut pipe, _) = self.split();
        pipe.request_redraw(layer, &mut actions);
        Some((removed, actions))
    }

    /// Replace a layer wholesale. Returns the number of nodes rejected as
    /// duplicates alongside the actions for the host.
    pub fn load_snapshot(&mut self, layer: Layer, nodes: Vec<Node>) -> (usize, Vec<Action>) {
        let skipped = self.scene.load_snapshot(layer, nodes);
        let mut actions = Vec::new();
        let (mut pipe, _) = self.split();
        if layer == Layer::Dynamic {
            pipe.cull_dynamic();
        }
        pipe.request_redraw(layer, &mut actions);
        (skipped, actions)
    }

    // --- Queries ---

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.viewport.camera()
    }

    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        self.viewport.visible_rect()
    }

    #[must_use]
    pub fn zoom_percent(&self) -> i64 {
        self.viewport.zoom_percent()
    }

    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.scene.get(id)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }
}

/// The full engine. Wraps `EngineCore` and owns the rendering surface.
#[derive(Debug)]
pub struct Engine<S> {
    surface: S,
    pub core: EngineCore,
}

impl<S: RenderSurface> Engine<S> {
    #[must_use]
    pub fn new(surface: S, config: &ViewportConfig, size: Size) -> Self {
        Self { surface, core: EngineCore::new(config, size) }
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Vec<Action> {
        self.core.handle(event, now)
    }

    pub fn poll(&mut self, now: Instant) -> Vec<Action> {
        self.core.poll(now)
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.core.next_deadline()
    }

    /// Display refresh: draw whatever is pending onto the owned surface.
    pub fn frame(&mut self) -> FrameReport {
        self.core.on_frame(&mut self.surface)
    }

    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.core.needs_frame()
    }

    /// Insert a node on behalf of external tooling.
    ///
    /// # Errors
    ///
    /// [`SceneError::DuplicateNode`] if the id is already in the scene.
    pub fn add_node(&mut self, layer: Layer, node: Node) -> Result<Vec<Action>, SceneError> {
        self.core.add_node(layer, node)
    }

    pub fn remove_node(&mut self, layer: Layer, id: &NodeId) -> Option<(Node, Vec<Action>)> {
        self.core.remove_node(layer, id)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera()
    }
}
