//! Handle-indexed DAG storage
//!
//! Nodes live in a flat slot map and refer to each other by [`NodeId`].
//! Nothing is ever removed, so a handle obtained from a graph stays valid
//! for that graph's lifetime.

use slotmap::SlotMap;

use super::error::SceneError;
use super::node::{Node, NodeId, NodeKind};
use crate::foundation::math::Mat4;

/// Default traversal depth limit, see [`SceneGraph::with_max_depth`]
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Largest accepted depth limit; deeper recursion would exhaust the stack first
pub const MAX_DEPTH_LIMIT: usize = 4096;

/// The scene DAG
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: SlotMap<NodeId, Node>,
    root: NodeId,
    max_depth: usize,
}

impl SceneGraph {
    /// Create a graph holding a single identity Transform root
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(root_name, NodeKind::Transform));
        Self {
            nodes,
            root,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Builder pattern: set the traversal depth limit
    ///
    /// Expansion fails with [`SceneError::DepthLimitExceeded`] beyond this
    /// depth; propagation asserts on it in debug builds. Clamped to
    /// `1..=MAX_DEPTH_LIMIT`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.clamp(1, MAX_DEPTH_LIMIT);
        self
    }

    /// Root handle
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Traversal depth limit
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Add an unattached node
    pub fn add_node(&mut self, node: Node) -> NodeId {
        self.nodes.insert(node)
    }

    /// Append `child` to `parent`'s children
    ///
    /// No acyclicity check and no update of `child`'s parent list; that is
    /// recorded by the next expansion. The same edge may be added twice.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(child) {
            return Err(SceneError::UnknownNode);
        }
        self.nodes
            .get_mut(parent)
            .ok_or(SceneError::UnknownNode)?
            .children
            .push(child);
        Ok(())
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Look up a node mutably
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Look up a node, failing on a foreign handle
    pub fn get(&self, id: NodeId) -> Result<&Node, SceneError> {
        self.nodes.get(id).ok_or(SceneError::UnknownNode)
    }

    /// Look up a node mutably, failing on a foreign handle
    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(id).ok_or(SceneError::UnknownNode)
    }

    /// World matrix of a node as of the last propagation
    pub fn world_matrix(&self, id: NodeId) -> Option<&Mat4> {
        self.nodes.get(id).map(Node::world_matrix)
    }

    /// Replace a node's local matrix
    pub fn set_local_matrix(&mut self, id: NodeId, local_matrix: Mat4) -> Result<(), SceneError> {
        self.get_mut(id)?.local_matrix = local_matrix;
        Ok(())
    }

    /// First node with the given name
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().find(|(_, node)| node.name == name).map(|(id, _)| id)
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root is the only node
    pub fn has_only_root(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Iterate over all nodes
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter()
    }

    /// Total number of child edges
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.children.len()).sum()
    }

    pub(crate) fn nodes(&self) -> &SlotMap<NodeId, Node> {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut SlotMap<NodeId, Node> {
        &mut self.nodes
    }
}
