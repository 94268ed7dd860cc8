//! Rendering boundary.
//!
//! [`RenderSurface`] is the only seam through which layers reach pixels. The
//! engine hands it a layer and that layer's nodes in draw order; what the
//! surface does with each node's payload is its own business. Culled nodes are
//! still passed through with `visible == false` so a retained-mode surface can
//! hide them instead of destroying them.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::scene::{Layer, Node};

/// An external drawable sink with one backing buffer per layer.
pub trait RenderSurface {
    /// Flush `layer`. Called at most once per layer per frame.
    fn draw(&mut self, layer: Layer, nodes: &[Node]);
}

/// One recorded `draw` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    pub frame: u64,
    pub layer: Layer,
    /// Nodes with `visible == true` at draw time.
    pub drawn: usize,
    /// Nodes skipped because they were culled.
    pub skipped: usize,
}

/// Headless surface that counts draws and logs them.
///
/// Used by the demo binary and by tests in place of a real canvas.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    frame: u64,
    records: Vec<DrawRecord>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the start of a new display frame.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Draws since construction or the last [`RecordingSurface::clear`].
    /// Long-running hosts should clear after consuming them.
    #[must_use]
    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// How many times `layer` has been drawn.
    #[must_use]
    pub fn draw_count(&self, layer: Layer) -> usize {
        self.records.iter().filter(|r| r.layer == layer).count()
    }

    #[must_use]
    pub fn last(&self, layer: Layer) -> Option<&DrawRecord> {
        self.records.iter().rev().find(|r| r.layer == layer)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn draw(&mut self, layer: Layer, nodes: &[Node]) {
        let drawn = nodes.iter().filter(|n| n.visible).count();
        let record = DrawRecord { frame: self.frame, layer, drawn, skipped: nodes.len() - drawn };
        tracing::trace!(
            frame = record.frame,
            layer = %layer,
            drawn = record.drawn,
            skipped = record.skipped,
            "layer drawn"
        );
        self.records.push(record);
    }
}
