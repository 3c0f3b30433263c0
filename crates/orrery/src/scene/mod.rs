//! Instanced DAG scene graph
//!
//! A single sphere Drawable is shared by every body. Each body is a
//! Transform node with its own colours, and the sphere hangs under all of
//! them, so the graph is a DAG rather than a tree.
//!
//! ## Frame flow
//!
//! ```text
//! build graph -> expand
//!                  |
//!        every frame: rotate -> propagate -> read instances
//!                  |
//!        insertion re-enters at expand
//! ```
//!
//! Expansion turns each path to a Drawable into a [`RenderInstance`] that
//! points back at the Transform owning it. Propagation writes world
//! matrices into those Transforms, so instances never need updating
//! themselves.

mod error;
mod expander;
mod graph;
mod insertion;
mod node;
mod propagation;
mod render_instance;
mod rotation;
mod scene_context;
mod solar_system;
pub mod uniforms;

#[cfg(test)]
mod tests;

pub use error::{SceneError, ValidationError};
pub use expander::expand;
pub use graph::{SceneGraph, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use insertion::{attach_body, BodyForm, BodySpec, InsertedBody, OrbitPlacement, FIELDS};
pub use node::{DrawInfo, Node, NodeId, NodeKind, UniformValue, Uniforms};
pub use propagation::propagate;
pub use render_instance::RenderInstance;
pub use rotation::{RotationAxis, RotationDriver, RotationRule, DEFAULT_BASE_RATE};
pub use scene_context::{Scene, ROOT_NAME, SPHERE_NAME};
pub use solar_system::SolarSystem;
