//! Scene graph errors

use thiserror::Error;

/// Insertion request validation failures
///
/// Each variant names the offending field using its wire name (`dxSun`,
/// `size`, ...). A rejected request never touches the graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field absent from the request
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// Field present but not a number
    #[error("field `{field}` is not a number: {value:?}")]
    NotANumber {
        /// Offending field
        field: &'static str,
        /// Raw input
        value: String,
    },

    /// Field parsed to NaN or infinity
    #[error("field `{field}` must be finite, got {value}")]
    NonFinite {
        /// Offending field
        field: &'static str,
        /// Parsed value
        value: f32,
    },
}

impl ValidationError {
    /// Wire name of the field that failed
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
            Self::NotANumber { field, .. } | Self::NonFinite { field, .. } => field,
        }
    }
}

/// Scene graph failures
///
/// Everything except [`SceneError::Validation`] is a broken precondition
/// (cyclic graph, malformed drawable, Transform fan-in). Expansion fails
/// as a whole on these; the previous instance list stays in place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A handle that does not belong to this graph
    #[error("unknown node handle")]
    UnknownNode,

    /// Traversal went deeper than the configured limit; the graph has a cycle
    /// or is pathologically deep
    #[error("expansion exceeded depth {limit} at node '{node}' (cyclic graph?)")]
    DepthLimitExceeded {
        /// Node being visited when the limit was hit
        node: String,
        /// Configured limit
        limit: usize,
    },

    /// A Drawable node lacks its geometry or program handle
    #[error("drawable node '{node}' has no {missing} handle")]
    MissingDrawInfo {
        /// Drawable node name
        node: String,
        /// `"geometry"` or `"program"`
        missing: &'static str,
    },

    /// A Transform node is reachable through more than one parent edge,
    /// which would give its world matrix several writers
    #[error("transform node '{node}' has more than one parent ('{first}' and '{second}')")]
    TransformFanIn {
        /// Transform node name
        node: String,
        /// First parent discovered
        first: String,
        /// Second parent discovered
        second: String,
    },

    /// The rotation driver was given a non-positive or non-finite adjustment
    #[error("fps adjustment must be positive and finite, got {0}")]
    InvalidFpsAdjust(f32),

    /// An insertion request was rejected
    #[error("invalid body: {0}")]
    Validation(#[from] ValidationError),
}
