//! Viewport transform and render scheduling for a layered 2D canvas.
//!
//! The engine is headless. A host feeds it raw input events and a clock, and
//! it answers with [`engine::Action`]s: suppress native scrolling, arrange a
//! display-refresh callback, update the zoom label, change the cursor. When
//! the host's refresh fires, the engine draws each dirty layer once onto a
//! [`render::RenderSurface`].
//!
//! Timing is deterministic. Nothing here reads the wall clock; every timed
//! operation takes `now: Instant` and [`engine::EngineCore::next_deadline`]
//! tells the host when to call [`engine::EngineCore::poll`] next.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`viewport`] | Camera bounds, zoom-to-point, pan and resize |
//! | [`camera`] | Camera transform and geometry types |
//! | [`scene`] | Two-layer scene graph of bounded nodes |
//! | [`cull`] | Visibility culling against the visible rect |
//! | [`schedule`] | Per-layer redraw coalescing and resize debounce |
//! | [`input`] | Input event types and the event adapter |
//! | [`timing`] | Deterministic debounce and throttle primitives |
//! | [`render`] | Rendering surface trait and a recording surface |
//! | [`config`] | Environment-driven configuration |
//! | [`consts`] | Default zoom limits, steps and intervals |

pub mod camera;
pub mod config;
pub mod consts;
pub mod cull;
pub mod engine;
pub mod input;
pub mod render;
pub mod scene;
pub mod schedule;
pub mod timing;
pub mod viewport;
