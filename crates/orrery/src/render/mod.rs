//! # Rendering Data
//!
//! Everything the scene hands to a graphics backend, without talking to one.
//!
//! - **Mesh**: CPU-side sphere vertices, `bytemuck`-castable for upload
//! - **Geometry library**: handle-indexed meshes and program descriptions
//! - **Draw list**: per-frame commands with clip-space matrices and bind flags
//!
//! Compiling shaders and creating buffers is left to the host.

pub mod draw_list;
pub mod geometry;
pub mod mesh;

pub use draw_list::{DrawCommand, DrawList, InstanceRaw};
pub use geometry::{GeometryHandle, GeometryLibrary, ProgramDesc, ProgramHandle};
pub use mesh::{MeshData, Vertex};
