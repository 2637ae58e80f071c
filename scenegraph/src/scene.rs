use std::ops::Deref;

use crate::{bounds::Aabb, error::SceneError, node::Node, settings::SceneSettings};

/// Position of a node in its scene, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl Deref for NodeId {
    type Target = usize;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Flat collection of nodes plus their combined world bounds.
///
/// Nothing is recomputed lazily: after editing transforms, call
/// [`Scene::commit`] before reading bounds or tracing rays.
#[derive(Debug, Clone)]
pub struct Scene {
    nodes: Vec<Node>,
    bounds: Aabb,
    settings: SceneSettings,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_settings(SceneSettings::default())
    }

    pub fn with_settings(settings: SceneSettings) -> Self {
        Self {
            nodes: Vec::new(),
            bounds: Aabb::EMPTY,
            settings,
        }
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(*id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(*id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    /// Updates every node, then rebuilds the scene bounds from their world
    /// bounds. A node that fails to update keeps its previous state and
    /// still contributes its previous bounds; all failures are reported once
    /// every node has been visited.
    pub fn commit(&mut self) -> Result<(), SceneError> {
        let mut failed = Vec::new();
        for (index, node) in self.nodes.iter_mut().enumerate() {
            if let Err(err) = node.update_with(&self.settings) {
                log::warn!("Node {index} failed to update: {err}");
                failed.push(NodeId(index));
            }
        }

        self.bounds = Aabb::EMPTY;
        for node in &self.nodes {
            self.bounds.grow_with(&node.world_bounding_box());
        }

        log::debug!(
            "Committed scene with {} node(s), bounds {:?}",
            self.nodes.len(),
            self.bounds
        );

        if failed.is_empty() {
            Ok(())
        } else {
            Err(SceneError::Commit { failed })
        }
    }

    /// Combined world bounds as of the last [`Scene::commit`].
    pub fn bounding_box(&self) -> Aabb {
        self.bounds
    }
}
