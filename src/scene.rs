//! Scene model: nodes, the two render layers, and the store that owns them.
//!
//! A [`Node`] is an axis-aligned box in scene coordinates plus an opaque
//! `payload` bag that only the rendering surface interprets. The
//! [`SceneGraph`] keeps one ordered collection per [`Layer`] and guarantees a
//! node id lives in exactly one of them.
//!
//! Nodes enter from external tooling (shape provisioning, snapshots). The
//! culler flips `visible`; drag handling moves `bounds`. Nothing else in the
//! crate mutates nodes.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Rect;

/// Unique identifier for a scene node.
pub type NodeId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("unknown layer: {0:?} (expected \"static\" or \"dynamic\")")]
    UnknownLayer(String),
    #[error("node {id} already belongs to the {layer} layer")]
    DuplicateNode { id: NodeId, layer: Layer },
}

/// Render layer. Composited back-to-front in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Background and grid content; only redrawn on resize.
    Static,
    /// Interactive content; redrawn on drag, zoom, pan, add and remove.
    Dynamic,
}

impl Layer {
    /// Every layer in composite order (static first).
    pub const ALL: [Layer; 2] = [Layer::Static, Layer::Dynamic];

    /// Position in [`Layer::ALL`], usable as an array index.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Static => 0,
            Self::Dynamic => 1,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Layer {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "static" => Ok(Self::Static),
            "dynamic" => Ok(Self::Dynamic),
            other => Err(SceneError::UnknownLayer(other.to_owned())),
        }
    }
}

/// A drawable item positioned in scene coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Bounding box in scene (unscaled) coordinates.
    pub bounds: Rect,
    /// Written by the culler; the surface skips invisible nodes.
    #[serde(default = "default_visible")]
    pub visible: bool,
    /// Surface-owned drawing data (fill, stroke, path, ...). Never inspected here.
    #[serde(default)]
    pub payload: serde_json::Value,
}

fn default_visible() -> bool {
    true
}

impl Node {
    /// A new visible node with a fresh id and an empty payload.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self { id: Uuid::new_v4(), bounds, visible: true, payload: serde_json::Value::Null }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Ordered node collections for the static and dynamic layers.
#[derive(Debug, Default)]
pub struct SceneGraph {
    layers: [Vec<Node>; 2],
}

impl SceneGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node to the top of `layer`.
    ///
    /// # Errors
    ///
    /// [`SceneError::DuplicateNode`] if the id is already present in any layer.
    pub fn add_node(&mut self, layer: Layer, node: Node) -> Result<(), SceneError> {
        if let Some(existing) = self.layer_of(&node.id) {
            return Err(SceneError::DuplicateNode { id: node.id, layer: existing });
        }
        self.layers[layer.index()].push(node);
        Ok(())
    }

    /// Remove a node from `layer`, returning it if it was there.
    pub fn remove_node(&mut self, layer: Layer, id: &NodeId) -> Option<Node> {
        let nodes = &mut self.layers[layer.index()];
        let pos = nodes.iter().position(|n| n.id == *id)?;
        Some(nodes.remove(pos))
    }

    /// Nodes of `layer` in draw order (bottom first).
    #[must_use]
    pub fn nodes_of(&self, layer: Layer) -> &[Node] {
        &self.layers[layer.index()]
    }

    /// Mutable access for the culler. Order and membership cannot change through a slice.
    pub fn nodes_of_mut(&mut self, layer: Layer) -> &mut [Node] {
        &mut self.layers[layer.index()]
    }

    /// Which layer holds `id`, if any.
    #[must_use]
    pub fn layer_of(&self, id: &NodeId) -> Option<Layer> {
        Layer::ALL
            .into_iter()
            .find(|layer| self.layers[layer.index()].iter().any(|n| n.id == *id))
    }

    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.layers.iter().flatten().find(|n| n.id == *id)
    }

    pub fn get_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.layers.iter_mut().flatten().find(|n| n.id == *id)
    }

    /// Shift a node's bounds by a scene-space delta. Returns the node's layer,
    /// or `None` if the node does not exist.
    pub fn translate_node(&mut self, id: &NodeId, dx: f64, dy: f64) -> Option<Layer> {
        let layer = self.layer_of(id)?;
        let node = self.layers[layer.index()].iter_mut().find(|n| n.id == *id)?;
        node.bounds = node.bounds.translated(dx, dy);
        Some(layer)
    }

    /// Replace every node in `layer` with a snapshot. Ids that already live in
    /// the other layer, and repeats within the snapshot, are dropped.
    ///
    /// Returns the number of nodes skipped.
    pub fn load_snapshot(&mut self, layer: Layer, nodes: Vec<Node>) -> usize {
        self.layers[layer.index()].clear();
        let mut skipped = 0;
        for node in nodes {
            if self.add_node(layer, node).is_err() {
                skipped += 1;
            }
        }
        skipped
    }

    /// Total node count across both layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(Vec::is_empty)
    }
}
