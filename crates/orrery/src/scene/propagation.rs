//! World-matrix propagation
//!
//! One top-down pass per frame. Transform nodes get `world = parent * local`
//! (`world = local` at the root); Drawable nodes keep their identity world
//! matrix and pass it on unchanged.

use slotmap::SlotMap;

use super::graph::SceneGraph;
use super::node::{Node, NodeId, NodeKind};
use crate::foundation::math::{utils, Mat4};

/// Recompute every reachable Transform node's world matrix
///
/// Must complete before any render instance reads its matrix for the frame.
/// The graph is assumed acyclic; debug builds assert on the depth limit.
pub fn propagate(graph: &mut SceneGraph) {
    let root = graph.root();
    let max_depth = graph.max_depth();
    update_world_matrix(graph.nodes_mut(), root, None, 0, max_depth);
    log::trace!("Propagated world matrices");
}

fn update_world_matrix(
    nodes: &mut SlotMap<NodeId, Node>,
    id: NodeId,
    parent_world: Option<&Mat4>,
    depth: usize,
    max_depth: usize,
) {
    debug_assert!(depth <= max_depth, "propagation exceeded depth {max_depth}; cyclic graph?");

    let Some(node) = nodes.get_mut(id) else {
        return;
    };
    if node.kind == NodeKind::Transform {
        let local = node.local_matrix;
        match parent_world {
            Some(parent) => {
                utils::multiply_into(parent, &local, &mut node.world_matrix);
            }
            None => utils::copy_into(&local, &mut node.world_matrix),
        }
    }
    let world = node.world_matrix;

    // Children are read by index so the slot map stays mutably borrowable
    let child_count = node.children.len();
    for index in 0..child_count {
        let Some(child) = nodes.get(id).and_then(|node| node.children.get(index).copied()) else {
            break;
        };
        update_world_matrix(nodes, child, Some(&world), depth + 1, max_depth);
    }
}
