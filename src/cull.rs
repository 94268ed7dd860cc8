//! Visibility culling against the visible rectangle.
//!
//! Culling runs synchronously inside whatever call moved the camera. The
//! scheduler only defers the draw, never the visibility decision, so a frame
//! always sees flags that match the camera it draws with.
//!
//! Only the dynamic layer is culled. Static content is background and is
//! redrawn whole on resize.

#[cfg(test)]
#[path = "cull_test.rs"]
mod cull_test;

use crate::camera::Rect;
use crate::scene::Node;

/// Outcome of one culling pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullStats {
    pub visible: usize,
    pub hidden: usize,
    /// Nodes whose flag flipped during this pass.
    pub changed: usize,
}

/// Whether `bounds` overlaps `rect`.
///
/// All four comparisons are strict: a node that only touches the rectangle
/// along an edge is not visible.
#[must_use]
pub fn is_visible(bounds: &Rect, rect: &Rect) -> bool {
    bounds.intersects(rect)
}

/// Update one node's flag. Returns `true` if it changed.
pub fn cull_node(node: &mut Node, rect: &Rect) -> bool {
    let visible = is_visible(&node.bounds, rect);
    let changed = node.visible != visible;
    node.visible = visible;
    changed
}

/// Linear pass over `nodes`, setting each `visible` flag.
pub fn cull(nodes: &mut [Node], rect: &Rect) -> CullStats {
    let mut stats = CullStats::default();
    for node in nodes.iter_mut() {
        if cull_node(node, rect) {
            stats.changed += 1;
        }
        if node.visible {
            stats.visible += 1;
        } else {
            stats.hidden += 1;
        }
    }
    tracing::trace!(
        visible = stats.visible,
        hidden = stats.hidden,
        changed = stats.changed,
        rect_x = rect.x,
        rect_y = rect.y,
        "cull pass"
    );
    stats
}
