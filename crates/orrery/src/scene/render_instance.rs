//! Per-path draw records produced by expansion
//!
//! An instance does not own a transform. It holds the handle of the
//! Transform node that owns it and reads that node's world matrix when asked,
//! so it always reflects the latest propagation without any per-instance
//! update. Read before the first propagation, the matrix is identity.

use super::graph::SceneGraph;
use super::node::{NodeId, Uniforms};
use crate::foundation::math::Mat4;
use crate::render::geometry::{GeometryHandle, ProgramHandle};

/// One drawable reached through one parent edge
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInstance {
    /// Diagnostic name, `<drawable>-<owner>`
    pub name: String,

    /// Shared geometry, taken from the Drawable node
    pub geometry: GeometryHandle,

    /// Shared program, taken from the Drawable node
    pub program: ProgramHandle,

    /// Copy of the owning Transform's uniforms at expansion time
    pub uniforms: Uniforms,

    /// Drawable node this instance was expanded from
    pub drawable: NodeId,

    /// Transform node whose world matrix positions this instance
    pub owner: NodeId,
}

impl RenderInstance {
    /// Current world matrix of the owning node
    ///
    /// `None` only when `graph` is not the graph this instance was expanded
    /// from.
    pub fn world_matrix<'g>(&self, graph: &'g SceneGraph) -> Option<&'g Mat4> {
        graph.world_matrix(self.owner)
    }
}
