//! Scene graph vertex
//!
//! A node is either a Transform (carries a local and world matrix that
//! participate in propagation) or a Drawable (shared geometry plus program,
//! normally a leaf reached through many parents).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::foundation::math::{Mat4, Vec4};
use crate::render::geometry::{GeometryHandle, ProgramHandle};

new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`](super::SceneGraph)
    pub struct NodeId;
}

/// Node kind; the numeric encoding is part of the host interface
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Participates in world-matrix propagation
    Transform = 0,
    /// Terminal geometry; expanded into render instances
    Drawable = 1,
}

/// A uniform value handed to the drawing stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Scalar
    Float(f32),
    /// Four-component vector, used for colours
    Vec4(Vec4),
    /// 4x4 matrix
    Mat4(Mat4),
}

/// Uniform name to value
pub type Uniforms = HashMap<String, UniformValue>;

/// Drawing data attached to a node
///
/// Drawable nodes carry geometry and program handles; Transform nodes that
/// represent a visible body carry only colour uniforms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawInfo {
    /// Shared geometry
    pub geometry: Option<GeometryHandle>,
    /// Shader program
    pub program: Option<ProgramHandle>,
    /// Uniform values
    pub uniforms: Uniforms,
}

impl DrawInfo {
    /// Draw info for a Drawable node
    pub fn geometry(geometry: GeometryHandle, program: ProgramHandle) -> Self {
        Self {
            geometry: Some(geometry),
            program: Some(program),
            uniforms: Uniforms::new(),
        }
    }

    /// Colour-only draw info for a body's Transform node
    pub fn colors(offset: [f32; 4], mult: [f32; 4]) -> Self {
        let mut uniforms = Uniforms::new();
        uniforms.insert(
            super::uniforms::COLOR_OFFSET.to_string(),
            UniformValue::Vec4(Vec4::from(offset)),
        );
        uniforms.insert(
            super::uniforms::COLOR_MULT.to_string(),
            UniformValue::Vec4(Vec4::from(mult)),
        );
        Self {
            geometry: None,
            program: None,
            uniforms,
        }
    }
}

/// A DAG vertex
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) name: String,
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parents: Vec<NodeId>,
    pub(crate) local_matrix: Mat4,
    pub(crate) world_matrix: Mat4,
    pub(crate) visit_count: usize,
    pub(crate) draw_info: Option<DrawInfo>,
}

impl Node {
    /// Create a node with identity matrices and no draw info
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
            parents: Vec::new(),
            local_matrix: Mat4::identity(),
            world_matrix: Mat4::identity(),
            visit_count: 0,
            draw_info: None,
        }
    }

    /// Create a Transform node
    pub fn transform(name: impl Into<String>, local_matrix: Mat4) -> Self {
        Self::new(name, NodeKind::Transform).with_local_matrix(local_matrix)
    }

    /// Create a Drawable node
    pub fn drawable(name: impl Into<String>, geometry: GeometryHandle, program: ProgramHandle) -> Self {
        Self::new(name, NodeKind::Drawable).with_draw_info(DrawInfo::geometry(geometry, program))
    }

    /// Builder pattern: set the local matrix
    pub fn with_local_matrix(mut self, local_matrix: Mat4) -> Self {
        self.local_matrix = local_matrix;
        self
    }

    /// Builder pattern: attach draw info
    pub fn with_draw_info(mut self, draw_info: DrawInfo) -> Self {
        self.draw_info = Some(draw_info);
        self
    }

    /// Diagnostic name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node kind
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Children in insertion order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parents in discovery order, as recorded by the last expansion
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }

    /// Local transform
    pub fn local_matrix(&self) -> &Mat4 {
        &self.local_matrix
    }

    /// Mutable local transform
    pub fn local_matrix_mut(&mut self) -> &mut Mat4 {
        &mut self.local_matrix
    }

    /// World transform as of the last propagation; identity before the
    /// first pass and always identity for Drawable nodes
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Visits during the last expansion
    pub fn visit_count(&self) -> usize {
        self.visit_count
    }

    /// Attached draw info
    pub fn draw_info(&self) -> Option<&DrawInfo> {
        self.draw_info.as_ref()
    }
}
