//! Mesh data for shared geometry
//!
//! CPU-side vertex data only. Uploading it to a graphics API is the host's
//! job; the layout is `#[repr(C)]` so the slice can be handed over with
//! `bytemuck::cast_slice`.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::foundation::math::constants::PI;

/// Vertex with position, normal and per-vertex colour
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in model space
    pub position: [f32; 3],

    /// Unit normal
    pub normal: [f32; 3],

    /// RGBA colour, alpha always 1
    pub color: [f32; 4],
}

// Only f32 arrays, no padding
unsafe impl bytemuck::Pod for Vertex {}
unsafe impl bytemuck::Zeroable for Vertex {}

/// Non-indexed triangle list
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Three vertices per triangle
    pub vertices: Vec<Vertex>,
}

/// Vertices sharing one random colour: the two triangles of a sphere quad
const VERTS_PER_COLOR: usize = 6;

/// Seed for the vertex colour generator, fixed so meshes are reproducible
const COLOR_SEED: u64 = 0x5eed_0f_5a7e;

impl MeshData {
    /// Generate a UV sphere with per-quad random shading
    ///
    /// `subdivisions_axis` segments run around the vertical axis and
    /// `subdivisions_height` from pole to pole. Colour channels fall in
    /// `[0.5, 1.0)` so the colour uniforms of each body dominate the result.
    pub fn sphere(radius: f32, subdivisions_axis: u32, subdivisions_height: u32) -> Self {
        let axis = subdivisions_axis.max(3);
        let height = subdivisions_height.max(2);
        let around = axis + 1;

        let mut grid: Vec<([f32; 3], [f32; 3])> = Vec::with_capacity(((height + 1) * around) as usize);
        for y in 0..=height {
            for x in 0..=axis {
                let u = x as f32 / axis as f32;
                let v = y as f32 / height as f32;
                let theta = 2.0 * PI * u;
                let phi = PI * v;
                let (sin_theta, cos_theta) = theta.sin_cos();
                let (sin_phi, cos_phi) = phi.sin_cos();
                let normal = [cos_theta * sin_phi, cos_phi, sin_theta * sin_phi];
                let position = [normal[0] * radius, normal[1] * radius, normal[2] * radius];
                grid.push((position, normal));
            }
        }

        let mut rng = StdRng::seed_from_u64(COLOR_SEED);
        let mut vertices = Vec::with_capacity((axis * height * 6) as usize);
        let mut color = [1.0; 4];
        for y in 0..height {
            for x in 0..axis {
                let a = y * around + x;
                let b = a + 1;
                let c = a + around;
                let d = c + 1;
                for index in [a, b, c, c, b, d] {
                    if vertices.len() % VERTS_PER_COLOR == 0 {
                        color = [rng.gen_range(0.5..1.0), rng.gen_range(0.5..1.0), rng.gen_range(0.5..1.0), 1.0];
                    }
                    let (position, normal) = grid[index as usize];
                    vertices.push(Vertex { position, normal, color });
                }
            }
        }

        Self { vertices }
    }

    /// Number of vertices to draw
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Raw bytes for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
