//! DAG expansion
//!
//! Walks the graph depth-first, pre-order, from the root. Every edge pushes
//! its parent onto the child's parent list before the child is visited, so a
//! Drawable visited for the n-th time finds the parent of that visit at
//! `parents[n]`. Each such visit emits one [`RenderInstance`] bound to that
//! parent. A Drawable with k incoming edges therefore yields k instances, in
//! edge discovery order.
//!
//! Bookkeeping is collected on the side and only written back to the nodes
//! when the whole pass succeeds.

use slotmap::{SecondaryMap, SlotMap};

use super::error::SceneError;
use super::graph::SceneGraph;
use super::node::{Node, NodeId, NodeKind};
use super::render_instance::RenderInstance;

#[derive(Default)]
struct Visit {
    parents: Vec<NodeId>,
    count: usize,
}

struct Expansion<'g> {
    nodes: &'g SlotMap<NodeId, Node>,
    visits: SecondaryMap<NodeId, Visit>,
    instances: Vec<RenderInstance>,
    max_depth: usize,
}

impl Expansion<'_> {
    fn visit(&mut self, id: NodeId, depth: usize) -> Result<(), SceneError> {
        let nodes = self.nodes;
        let node = nodes.get(id).ok_or(SceneError::UnknownNode)?;
        if depth > self.max_depth {
            return Err(SceneError::DepthLimitExceeded {
                node: node.name.clone(),
                limit: self.max_depth,
            });
        }

        let visit = self.visits.entry(id).ok_or(SceneError::UnknownNode)?.or_default();
        // The root has no parent, so a Drawable placed there draws nothing
        let owner = visit.parents.get(visit.count).copied();
        visit.count += 1;
        if let (NodeKind::Drawable, Some(owner)) = (node.kind, owner) {
            let instance = self.instantiate(id, node, owner)?;
            self.instances.push(instance);
        }

        for &child in &node.children {
            let child_node = nodes.get(child).ok_or(SceneError::UnknownNode)?;
            let child_visit = self.visits.entry(child).ok_or(SceneError::UnknownNode)?.or_default();
            child_visit.parents.push(id);

            if child_node.kind == NodeKind::Transform && child_visit.parents.len() > 1 {
                let first = child_visit.parents[0];
                return Err(SceneError::TransformFanIn {
                    node: child_node.name.clone(),
                    first: nodes.get(first).map(|n| n.name.clone()).unwrap_or_default(),
                    second: node.name.clone(),
                });
            }

            self.visit(child, depth + 1)?;
        }
        Ok(())
    }

    fn instantiate(&self, id: NodeId, node: &Node, owner: NodeId) -> Result<RenderInstance, SceneError> {
        let draw_info = node.draw_info.as_ref();
        let geometry = draw_info.and_then(|info| info.geometry).ok_or_else(|| SceneError::MissingDrawInfo {
            node: node.name.clone(),
            missing: "geometry",
        })?;
        let program = draw_info.and_then(|info| info.program).ok_or_else(|| SceneError::MissingDrawInfo {
            node: node.name.clone(),
            missing: "program",
        })?;

        let owner_node = self.nodes.get(owner).ok_or(SceneError::UnknownNode)?;
        let uniforms = owner_node
            .draw_info
            .as_ref()
            .map(|info| info.uniforms.clone())
            .unwrap_or_default();

        Ok(RenderInstance {
            name: format!("{}-{}", node.name, owner_node.name),
            geometry,
            program,
            uniforms,
            drawable: id,
            owner,
        })
    }
}

/// Expand the graph into render instances
///
/// Rebuilds every node's parent list and visit count from scratch. On error
/// the graph's bookkeeping is left as it was before the call.
///
/// # Errors
/// - [`SceneError::DepthLimitExceeded`] when a path is deeper than
///   [`SceneGraph::max_depth`], which is how a cycle shows up
/// - [`SceneError::MissingDrawInfo`] for a reachable Drawable without
///   geometry or program
/// - [`SceneError::TransformFanIn`] when a Transform node gets a second parent
pub fn expand(graph: &mut SceneGraph) -> Result<Vec<RenderInstance>, SceneError> {
    let root = graph.root();
    let mut expansion = Expansion {
        nodes: graph.nodes(),
        visits: SecondaryMap::new(),
        instances: Vec::new(),
        max_depth: graph.max_depth(),
    };
    expansion.visit(root, 0)?;

    let Expansion { mut visits, instances, .. } = expansion;
    for (id, node) in graph.nodes_mut() {
        let visit = visits.remove(id).unwrap_or_default();
        node.parents = visit.parents;
        node.visit_count = visit.count;
    }

    log::debug!("Expanded {} render instances", instances.len());
    Ok(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Mat4Ext};
    use crate::render::geometry::{GeometryLibrary, ProgramDesc};
    use crate::render::mesh::MeshData;
    use crate::scene::node::DrawInfo;

    fn sphere(graph: &mut SceneGraph) -> NodeId {
        let mut library = GeometryLibrary::new();
        let geometry = library.add_mesh(MeshData::default());
        let program = library.add_program(ProgramDesc::vertex_color_lit());
        graph.add_node(Node::drawable("sphere", geometry, program))
    }

    #[test]
    fn test_fan_in_yields_one_instance_per_parent() {
        let mut graph = SceneGraph::new("root");
        let root = graph.root();
        let s = sphere(&mut graph);
        let parents: Vec<NodeId> = (0..3)
            .map(|i| graph.add_node(Node::transform(format!("p{i}"), Mat4::identity())))
            .collect();
        for &p in &parents {
            graph.add_child(root, p).unwrap();
            graph.add_child(p, s).unwrap();
        }

        let instances = expand(&mut graph).unwrap();

        assert_eq!(instances.len(), 3);
        for (instance, parent) in instances.iter().zip(&parents) {
            assert_eq!(instance.owner, *parent);
            assert_eq!(instance.drawable, s);
        }
        assert_eq!(graph.get(s).unwrap().parents(), parents.as_slice());
        assert_eq!(graph.get(s).unwrap().visit_count(), 3);
        assert_eq!(instances[1].name, "sphere-p1");
    }

    #[test]
    fn test_unreachable_drawable_emits_nothing() {
        let mut graph = SceneGraph::new("root");
        let s = sphere(&mut graph);
        let lonely = graph.add_node(Node::transform("lonely", Mat4::identity()));
        graph.add_child(lonely, s).unwrap();

        // `lonely` is not attached to the root, so the sphere is unreachable
        assert!(expand(&mut graph).unwrap().is_empty());
        assert!(graph.get(s).unwrap().parents().is_empty());
    }

    #[test]
    fn test_instances_copy_owner_uniforms() {
        let mut graph = SceneGraph::new("root");
        let root = graph.root();
        let s = sphere(&mut graph);
        let sun = graph.add_node(
            Node::transform("sun", Mat4::scaling(6.0, 6.0, 6.0))
                .with_draw_info(DrawInfo::colors([1.5, 1.5, 0.7, 1.0], [1.0, 1.0, 0.0, 1.0])),
        );
        graph.add_child(root, sun).unwrap();
        graph.add_child(sun, s).unwrap();

        let instances = expand(&mut graph).unwrap();
        let expected = graph.get(sun).unwrap().draw_info().unwrap().uniforms.clone();
        assert_eq!(instances[0].uniforms, expected);

        // Later edits to the owner do not leak into an existing instance
        graph.get_mut(sun).unwrap().draw_info = None;
        assert_eq!(instances[0].uniforms, expected);
    }

    #[test]
    fn test_transform_cycle_fails_fast() {
        let mut graph = SceneGraph::new("root").with_max_depth(16);
        let root = graph.root();
        let a = graph.add_node(Node::transform("a", Mat4::identity()));
        let b = graph.add_node(Node::transform("b", Mat4::identity()));
        graph.add_child(root, a).unwrap();
        graph.add_child(a, b).unwrap();
        graph.add_child(b, a).unwrap();

        let err = expand(&mut graph).unwrap_err();
        assert!(matches!(err, SceneError::TransformFanIn { .. } | SceneError::DepthLimitExceeded { .. }));
    }

    #[test]
    fn test_drawable_cycle_hits_depth_limit() {
        let mut graph = SceneGraph::new("root").with_max_depth(16);
        let root = graph.root();
        let s = sphere(&mut graph);
        graph.add_child(root, s).unwrap();
        graph.add_child(s, s).unwrap();

        assert_eq!(
            expand(&mut graph),
            Err(SceneError::DepthLimitExceeded { node: "sphere".to_string(), limit: 16 })
        );
    }

    #[test]
    fn test_transform_fan_in_is_rejected() {
        let mut graph = SceneGraph::new("root");
        let root = graph.root();
        let a = graph.add_node(Node::transform("a", Mat4::identity()));
        let b = graph.add_node(Node::transform("b", Mat4::identity()));
        let shared = graph.add_node(Node::transform("shared", Mat4::identity()));
        graph.add_child(root, a).unwrap();
        graph.add_child(root, b).unwrap();
        graph.add_child(a, shared).unwrap();
        graph.add_child(b, shared).unwrap();

        assert_eq!(
            expand(&mut graph),
            Err(SceneError::TransformFanIn {
                node: "shared".to_string(),
                first: "a".to_string(),
                second: "b".to_string(),
            })
        );
        // Failed pass leaves no bookkeeping behind
        assert!(graph.get(shared).unwrap().parents().is_empty());
    }

    #[test]
    fn test_drawable_without_draw_info_fails_fast() {
        let mut graph = SceneGraph::new("root");
        let root = graph.root();
        let bare = graph.add_node(Node::new("bare", NodeKind::Drawable));
        let holder = graph.add_node(Node::transform("holder", Mat4::identity()));
        graph.add_child(root, holder).unwrap();
        graph.add_child(holder, bare).unwrap();

        assert_eq!(
            expand(&mut graph),
            Err(SceneError::MissingDrawInfo { node: "bare".to_string(), missing: "geometry" })
        );
    }
}
