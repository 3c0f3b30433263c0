//! Uniform names shared by the scene and the drawing stage

/// Per-frame clip-space matrix (`view_projection * world`)
pub const MATRIX: &str = "u_matrix";

/// Colour added after the vertex colour multiply
pub const COLOR_OFFSET: &str = "u_colorOffset";

/// Colour multiplied with the vertex colour
pub const COLOR_MULT: &str = "u_colorMult";
