//! Per-frame rotation rules
//!
//! A rule spins one node's local matrix about an axis at a multiple of the
//! shared base rotation. Rules are plain records so the scene can hold them
//! without borrowing anything.

use serde::{Deserialize, Serialize};

use super::error::SceneError;
use super::graph::SceneGraph;
use super::node::NodeId;
use crate::foundation::math::{utils, Mat4, Mat4Ext, UnitVec3};

/// Base angular step per frame at the reference frame rate, in radians
pub const DEFAULT_BASE_RATE: f32 = 0.003;

/// Rotation axis of a rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RotationAxis {
    /// Local X
    X,
    /// Local Y
    Y,
    /// Local Z
    Z,
    /// Any unit axis
    Arbitrary(UnitVec3),
}

impl RotationAxis {
    /// Rotation matrix about this axis
    pub fn matrix(&self, angle: f32) -> Mat4 {
        match self {
            Self::X => Mat4::rotation_x(angle),
            Self::Y => Mat4::rotation_y(angle),
            Self::Z => Mat4::rotation_z(angle),
            Self::Arbitrary(axis) => Mat4::axis_rotation(axis, angle),
        }
    }
}

/// Spin `target` about `axis` at `rate` times the base rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationRule {
    /// Node whose local matrix is rotated
    pub target: NodeId,
    /// Rotation axis
    pub axis: RotationAxis,
    /// Multiple of the base rotation
    pub rate: f32,
}

impl RotationRule {
    /// Create a rule
    pub fn new(target: NodeId, axis: RotationAxis, rate: f32) -> Self {
        Self { target, axis, rate }
    }
}

/// Applies rotation rules once per frame
///
/// Built-in rules always run before registered ones.
#[derive(Debug, Clone)]
pub struct RotationDriver {
    base_rate: f32,
    builtin: Vec<RotationRule>,
    registered: Vec<RotationRule>,
}

impl RotationDriver {
    /// Create a driver with no rules
    pub fn new(base_rate: f32) -> Self {
        Self {
            base_rate,
            builtin: Vec::new(),
            registered: Vec::new(),
        }
    }

    /// Builder pattern: add built-in rules
    pub fn with_builtin(mut self, rules: impl IntoIterator<Item = RotationRule>) -> Self {
        self.builtin.extend(rules);
        self
    }

    /// Register a rule that runs after the built-ins
    pub fn register(&mut self, rule: RotationRule) {
        self.registered.push(rule);
    }

    /// Base angular step
    pub fn base_rate(&self) -> f32 {
        self.base_rate
    }

    /// Total number of rules
    pub fn len(&self) -> usize {
        self.builtin.len() + self.registered.len()
    }

    /// Whether the driver has no rules
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All rules in application order
    pub fn rules(&self) -> impl Iterator<Item = &RotationRule> {
        self.builtin.iter().chain(self.registered.iter())
    }

    /// Advance every rule's target by one frame
    ///
    /// `fps_adjust` is the reference frame rate divided by the current one,
    /// so angular speed per second is independent of the frame rate. Each
    /// rule pre-multiplies `rotation(axis, base_rate * fps_adjust * rate)`
    /// into its target's local matrix.
    ///
    /// # Errors
    /// - [`SceneError::InvalidFpsAdjust`] unless `fps_adjust` is positive and finite
    /// - [`SceneError::UnknownNode`] if a rule targets a node not in `graph`
    ///
    /// Nothing is rotated when an error is returned.
    pub fn advance(&self, graph: &mut SceneGraph, fps_adjust: f32) -> Result<(), SceneError> {
        if !fps_adjust.is_finite() || fps_adjust <= 0.0 {
            return Err(SceneError::InvalidFpsAdjust(fps_adjust));
        }
        if self.rules().any(|rule| graph.node(rule.target).is_none()) {
            return Err(SceneError::UnknownNode);
        }

        let base_rotation = self.base_rate * fps_adjust;
        for rule in self.rules() {
            let rotation = rule.axis.matrix(base_rotation * rule.rate);
            utils::pre_multiply(&rotation, graph.get_mut(rule.target)?.local_matrix_mut());
        }
        log::trace!("Applied {} rotation rules, base rotation {base_rotation}", self.len());
        Ok(())
    }
}

impl Default for RotationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_RATE)
    }
}
