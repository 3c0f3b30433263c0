//! Geometry and program registry
//!
//! Drawable nodes refer to shared geometry and shader programs by handle.
//! The registry owns the CPU-side data behind those handles; compiling
//! programs and creating GPU buffers stays with the host.

use slotmap::{new_key_type, SlotMap};

use super::mesh::MeshData;

new_key_type! {
    /// Handle to a mesh in the [`GeometryLibrary`]
    pub struct GeometryHandle;

    /// Handle to a shader program description in the [`GeometryLibrary`]
    pub struct ProgramHandle;
}

/// Host-facing description of a shader program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDesc {
    /// Diagnostic label
    pub label: String,
    /// Uniform names the program reads
    pub uniforms: Vec<String>,
}

impl ProgramDesc {
    /// The lit vertex-colour program used for every body
    pub fn vertex_color_lit() -> Self {
        Self {
            label: "vertex color lit".to_string(),
            uniforms: vec![
                crate::scene::uniforms::MATRIX.to_string(),
                crate::scene::uniforms::COLOR_OFFSET.to_string(),
                crate::scene::uniforms::COLOR_MULT.to_string(),
            ],
        }
    }
}

/// Handle-indexed store of meshes and programs
#[derive(Debug, Default)]
pub struct GeometryLibrary {
    meshes: SlotMap<GeometryHandle, MeshData>,
    programs: SlotMap<ProgramHandle, ProgramDesc>,
}

impl GeometryLibrary {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mesh
    pub fn add_mesh(&mut self, mesh: MeshData) -> GeometryHandle {
        self.meshes.insert(mesh)
    }

    /// Register a program description
    pub fn add_program(&mut self, program: ProgramDesc) -> ProgramHandle {
        self.programs.insert(program)
    }

    /// Look up a mesh
    pub fn mesh(&self, handle: GeometryHandle) -> Option<&MeshData> {
        self.meshes.get(handle)
    }

    /// Look up a program description
    pub fn program(&self, handle: ProgramHandle) -> Option<&ProgramDesc> {
        self.programs.get(handle)
    }

    /// Number of registered meshes
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}
