//! Math utilities and types
//!
//! Thin façade over `nalgebra` providing the 4x4 matrix and vector operations
//! the scene graph needs: identity, translation, scaling, axis-aligned and
//! arbitrary-axis rotation, normalize, multiply-into-destination and copy.
//!
//! All matrices use the column-vector convention, so `parent * local` applies
//! `local` first.

pub use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Unit-length 3D vector, used for rotation axes
pub type UnitVec3 = Unit<Vec3>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;
}

/// Extension trait for Mat4 with the constructors used by scene nodes
///
/// Every constructor returns a fresh matrix.
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a rotation matrix around an arbitrary unit axis
    fn axis_rotation(axis: &UnitVec3, angle: f32) -> Mat4;

    /// Create a translation matrix
    fn translation(x: f32, y: f32, z: f32) -> Mat4;

    /// Create a (possibly non-uniform) scaling matrix
    fn scaling(x: f32, y: f32, z: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn axis_rotation(axis: &UnitVec3, angle: f32) -> Mat4 {
        Mat4::from_axis_angle(axis, angle)
    }

    fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(x, y, z))
    }
}

/// Math utility functions
pub mod utils {
    use super::{Mat4, Point3, UnitVec3, Vec3};

    /// Compute `a * b` and store it in `dst`, returning `dst`
    ///
    /// The product is formed before `dst` is written, so passing a copy of
    /// `dst` as either input behaves like in-place multiplication.
    pub fn multiply_into<'a>(a: &Mat4, b: &Mat4, dst: &'a mut Mat4) -> &'a mut Mat4 {
        let product = a * b;
        *dst = product;
        dst
    }

    /// Pre-multiply `m` in place: `m = lhs * m`
    pub fn pre_multiply(lhs: &Mat4, m: &mut Mat4) {
        *m = lhs * *m;
    }

    /// Copy `src` into `dst`
    pub fn copy_into(src: &Mat4, dst: &mut Mat4) {
        dst.copy_from(src);
    }

    /// Normalize a vector; the zero vector is returned unchanged
    pub fn normalize(v: &Vec3) -> Vec3 {
        v.try_normalize(f32::EPSILON).unwrap_or(*v)
    }

    /// Normalize a vector into a rotation axis, falling back to +Y for
    /// degenerate input
    pub fn axis(v: &Vec3) -> UnitVec3 {
        UnitVec3::try_new(*v, f32::EPSILON).unwrap_or_else(|| Vec3::y_axis())
    }

    /// Scale a vector by a scalar
    pub fn scale_vector(v: &Vec3, s: f32) -> Vec3 {
        v * s
    }

    /// Transform a point (w = 1) by a matrix
    pub fn transform_point(m: &Mat4, p: &Vec3) -> Vec3 {
        m.transform_point(&Point3::from(*p)).coords
    }

    /// Translation column of an affine matrix
    pub fn translation_of(m: &Mat4) -> Vec3 {
        Vec3::new(m.m14, m.m24, m.m34)
    }
}

#[cfg(test)]
mod tests {
    use super::constants::HALF_PI;
    use super::utils::*;
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_multiply_into_aliasing_copy() {
        let mut m = Mat4::translation(1.0, 0.0, 0.0);
        let snapshot = m;
        multiply_into(&Mat4::rotation_y(HALF_PI), &snapshot, &mut m);

        let expected = Mat4::rotation_y(HALF_PI) * Mat4::translation(1.0, 0.0, 0.0);
        assert_relative_eq!(m, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_pre_multiply_rotates_translation() {
        let mut m = Mat4::translation(1.0, 0.0, 0.0);
        pre_multiply(&Mat4::rotation_y(HALF_PI), &mut m);

        // Rotating +X by 90 degrees about +Y lands on -Z
        assert_relative_eq!(translation_of(&m), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_transform_point_with_rotation_z() {
        let p = transform_point(&Mat4::rotation_z(HALF_PI), &Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Vec3::new(0.0, 1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_axis_rotation_matches_named_axes() {
        let angle = 0.37;
        assert_relative_eq!(
            Mat4::axis_rotation(&Vec3::x_axis(), angle),
            Mat4::rotation_x(angle),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Mat4::axis_rotation(&axis(&Vec3::new(0.0, 2.0, 0.0)), angle),
            Mat4::rotation_y(angle),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_normalize_and_scale() {
        let v = scale_vector(&normalize(&Vec3::new(3.0, 0.0, 4.0)), 10.0);
        assert_relative_eq!(v, Vec3::new(6.0, 0.0, 8.0), epsilon = EPSILON);
        assert_eq!(normalize(&Vec3::zeros()), Vec3::zeros());
    }

    #[test]
    fn test_copy_into() {
        let src = Mat4::scaling(2.0, 3.0, 4.0);
        let mut dst = Mat4::identity();
        copy_into(&src, &mut dst);
        assert_eq!(dst, src);
    }
}
