//! Shared numeric defaults for the viewport crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.5;

/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 3.0;

/// Scale at startup.
pub const INITIAL_ZOOM: f64 = 1.0;

/// Multiplicative step for a toolbar zoom button press.
pub const ZOOM_BUTTON_STEP: f64 = 1.1;

/// Multiplicative step for one wheel tick.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

// ── Scheduling ──────────────────────────────────────────────────

/// Quiet period after the last resize event before relayout runs.
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

/// Minimum spacing between executed wheel zooms.
pub const WHEEL_THROTTLE_MS: u64 = 16;

/// Display refresh interval used by hosts without a real vsync source (~60 Hz).
pub const FRAME_INTERVAL_MS: u64 = 16;
