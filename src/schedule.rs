//! Render scheduling: per-layer redraw coalescing and resize debouncing.
//!
//! DESIGN
//! ======
//! `request_redraw` only sets a flag. The first request after a frame also
//! registers interest in the next display refresh; further requests before
//! that refresh are absorbed by the flag. On refresh, `on_frame` draws each
//! flagged layer exactly once, static before dynamic, and clears the flags.
//! This is what keeps wheel and drag storms from turning into draw storms.
//!
//! Resize relayout goes through a trailing-edge [`Debouncer`]: window drags
//! produce one relayout, after the events stop, using the final size.

#[cfg(test)]
#[path = "schedule_test.rs"]
mod schedule_test;

use std::time::{Duration, Instant};

use crate::camera::Size;
use crate::render::RenderSurface;
use crate::scene::{Layer, SceneGraph};
use crate::timing::Debouncer;

/// Which layers a frame actually drew.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// In draw order.
    pub drawn: Vec<Layer>,
}

impl FrameReport {
    #[must_use]
    pub fn drew(&self, layer: Layer) -> bool {
        self.drawn.contains(&layer)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drawn.is_empty()
    }
}

#[derive(Debug)]
pub struct RenderScheduler {
    pending: [bool; 2],
    frame_registered: bool,
    draw_counts: [u64; 2],
    resize: Debouncer<Size>,
}

impl RenderScheduler {
    #[must_use]
    pub fn new(resize_quiet: Duration) -> Self {
        Self {
            pending: [false; 2],
            frame_registered: false,
            draw_counts: [0; 2],
            resize: Debouncer::new(resize_quiet),
        }
    }

    // --- Redraw coalescing ---

    /// Mark `layer` dirty. Returns `true` if this call registered the frame
    /// callback (i.e. no frame was already pending).
    pub fn request_redraw(&mut self, layer: Layer) -> bool {
        self.pending[layer.index()] = true;
        if self.frame_registered {
            return false;
        }
        self.frame_registered = true;
        tracing::trace!(%layer, "frame callback registered");
        true
    }

    /// Whether the host should deliver a display-refresh callback.
    #[must_use]
    pub fn frame_registered(&self) -> bool {
        self.frame_registered
    }

    #[must_use]
    pub fn is_pending(&self, layer: Layer) -> bool {
        self.pending[layer.index()]
    }

    /// Total draws issued for `layer` since construction.
    #[must_use]
    pub fn draw_count(&self, layer: Layer) -> u64 {
        self.draw_counts[layer.index()]
    }

    /// Display-refresh callback: draw every dirty layer once, in composite order.
    pub fn on_frame<S>(&mut self, scene: &SceneGraph, surface: &mut S) -> FrameReport
    where
        S: RenderSurface + ?Sized,
    {
        self.frame_registered = false;
        let mut report = FrameReport::default();
        for layer in Layer::ALL {
            let slot = &mut self.pending[layer.index()];
            if !*slot {
                continue;
            }
            *slot = false;
            surface.draw(layer, scene.nodes_of(layer));
            self.draw_counts[layer.index()] += 1;
            report.drawn.push(layer);
        }
        report
    }

    // --- Resize debounce ---

    /// Record a resize event; relayout runs once the events settle.
    pub fn schedule_resize(&mut self, size: Size, now: Instant) {
        self.resize.call(size, now);
    }

    /// The settled size, once the quiet period after the last event has passed.
    pub fn poll_resize(&mut self, now: Instant) -> Option<Size> {
        self.resize.poll(now)
    }

    #[must_use]
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resize.next_deadline()
    }
}
