//! # Orrery Settings
//!
//! Tunables for the rotation driver, the DAG expander and the shared sphere
//! geometry, plus an optional list of bodies to insert at startup.
//!
//! Every section has serde defaults, so a file only needs the keys it
//! overrides:
//!
//! ```toml
//! [rotation]
//! reference_fps = 144.0
//!
//! [[bodies]]
//! dxSun = 60.0
//! size = 2.0
//! orbitRotation = 1.5
//! planetRotation = 4.0
//! orbitTheta = 0.0
//! orbitPhi = 0.0
//! red = 0.9
//! green = 0.2
//! blue = 0.2
//! ```

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::scene::{BodySpec, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};

/// Rotation driver settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RotationConfig {
    /// Radians per frame at the reference frame rate for a rate-1 rule
    pub base_rate: f32,
    /// Frame rate the rule rates were tuned for
    pub reference_fps: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            base_rate: 0.003,
            reference_fps: 60.0,
        }
    }
}

/// DAG expansion settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Deepest path the expander will follow before declaring the graph cyclic
    pub max_depth: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Shared sphere tessellation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SphereConfig {
    /// Sphere radius in model units
    pub radius: f32,
    /// Segments around the vertical axis
    pub subdivisions_axis: u32,
    /// Segments from pole to pole
    pub subdivisions_height: u32,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 7.0,
            subdivisions_axis: 35,
            subdivisions_height: 21,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrreryConfig {
    /// Rotation driver settings
    pub rotation: RotationConfig,
    /// Expansion settings
    pub expansion: ExpansionConfig,
    /// Sphere geometry settings
    pub sphere: SphereConfig,
    /// Bodies inserted after the reference solar system is built
    pub bodies: Vec<BodySpec>,
}

impl Config for OrreryConfig {}

impl OrreryConfig {
    /// Check ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.rotation.base_rate.is_finite() {
            return Err(ConfigError::Invalid {
                field: "rotation.base_rate",
                reason: format!("{} is not finite", self.rotation.base_rate),
            });
        }
        if !(self.rotation.reference_fps.is_finite() && self.rotation.reference_fps > 0.0) {
            return Err(ConfigError::Invalid {
                field: "rotation.reference_fps",
                reason: format!("{} is not a positive frame rate", self.rotation.reference_fps),
            });
        }
        if self.expansion.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "expansion.max_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.expansion.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::Invalid {
                field: "expansion.max_depth",
                reason: format!("{} exceeds the limit of {MAX_DEPTH_LIMIT}", self.expansion.max_depth),
            });
        }
        if self.sphere.subdivisions_axis < 3 || self.sphere.subdivisions_height < 2 {
            return Err(ConfigError::Invalid {
                field: "sphere",
                reason: format!(
                    "{}x{} subdivisions cannot form a closed sphere",
                    self.sphere.subdivisions_axis, self.sphere.subdivisions_height
                ),
            });
        }
        Ok(())
    }
}
