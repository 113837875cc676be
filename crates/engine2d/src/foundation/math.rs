//! Math utilities and types
//!
//! Provides the vector and matrix types used by the 2D engine. Everything is
//! built on nalgebra; matrices follow nalgebra's column-vector convention, so a
//! point is transformed as `M * p` and `A * B` applies `B` first.

pub use nalgebra::{Vector2, Vector3, Matrix4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type (2D affine transforms are embedded for the GPU)
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = std::f32::consts::TAU;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Wrap an angle in radians into `[0, 2π)`.
    ///
    /// Negative inputs wrap upwards (`-0.5` becomes `2π - 0.5`).
    pub fn wrap_angle(radians: f32) -> f32 {
        let wrapped = radians.rem_euclid(constants::TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if wrapped >= constants::TAU {
            0.0
        } else {
            wrapped
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Extension trait for Mat4 with 2D convenience constructors
pub trait Mat4Ext {
    /// Non-uniform scaling in the XY plane
    fn scale_2d(scale: &Vec2) -> Mat4;

    /// Rotation around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Translation in the XY plane
    fn translation_2d(translation: &Vec2) -> Mat4;

    /// Orthographic projection for a `width` x `height` pixel viewport.
    ///
    /// The origin sits at the top-left corner with Y growing downwards.
    fn orthographic_2d(width: f32, height: f32) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn scale_2d(scale: &Vec2) -> Mat4 {
        Mat4::new_nonuniform_scaling(&Vec3::new(scale.x, scale.y, 1.0))
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::new_rotation(Vec3::new(0.0, 0.0, angle))
    }

    fn translation_2d(translation: &Vec2) -> Mat4 {
        Mat4::new_translation(&Vec3::new(translation.x, translation.y, 0.0))
    }

    fn orthographic_2d(width: f32, height: f32) -> Mat4 {
        Mat4::new_orthographic(0.0, width, height, 0.0, -1.0, 1.0)
    }
}
