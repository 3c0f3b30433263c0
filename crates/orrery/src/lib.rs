//! # Orrery
//!
//! An animated solar system built on an instanced DAG scene graph.
//!
//! ## Features
//!
//! - **Shared geometry**: one sphere Drawable instanced under every body
//! - **DAG expansion**: one render instance per path to a Drawable
//! - **Live transforms**: instances read their owner's world matrix on demand
//! - **Runtime insertion**: validated bodies join a running scene
//! - **Frame-rate independent rotation**: rules scale with an fps adjustment
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orrery::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     orrery::foundation::logging::init();
//!
//!     let config = OrreryConfig::default();
//!     let mut scene = Scene::solar_system(&config)?;
//!     let mut clock = FrameClock::new(config.rotation.reference_fps);
//!
//!     for _ in 0..600 {
//!         let fps_adjust = clock.advance_by(1.0 / 60.0);
//!         scene.frame(fps_adjust)?;
//!         let draw_list = DrawList::build(&scene, &Mat4::identity());
//!         // hand draw_list.commands() to a graphics backend
//!         assert_eq!(draw_list.len(), scene.instances().len());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, OrreryConfig},
        foundation::{
            math::{Mat4, Mat4Ext, Vec3},
            time::FrameClock,
        },
        render::{DrawCommand, DrawList},
        scene::{BodyForm, BodySpec, RenderInstance, Scene, SceneError, ValidationError},
    };
}
