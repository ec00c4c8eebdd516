//! Math utilities and types
//!
//! Provides fundamental math types for 3D graphics plus the wrap-around
//! (modulo) helpers used by the precipitation volume.

pub use nalgebra::{Matrix3, Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

/// Wrap a scalar into the half-open range `[0, size)`
///
/// Total over all finite inputs, including values far outside the range and
/// negative values. Guards the floating point edge where `rem_euclid` of a
/// tiny negative value rounds up to exactly `size`.
pub fn wrap(value: f32, size: f32) -> f32 {
    debug_assert!(size > 0.0);
    let wrapped = value.rem_euclid(size);
    if wrapped >= size {
        wrapped - size
    } else {
        wrapped
    }
}

/// Component-wise wrap of a vector into `[0, size)^3`
pub fn wrap_vec3(value: Vec3, size: f32) -> Vec3 {
    value.map(|component| wrap(component, size))
}

/// Extension trait for Mat4 with graphics convenience constructors
pub trait Mat4Ext {
    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around an arbitrary axis
    fn rotation_about(axis: Vec3, angle: f32) -> Mat4;

    /// Create a translation matrix
    fn translation(x: f32, y: f32, z: f32) -> Mat4;

    /// Create a perspective projection matrix
    ///
    /// Right-handed eye space with the conventional left-handed NDC cube
    /// (depth mapped to `[-1, 1]`), which is what the fixed depth range of
    /// the rasterizer expects.
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_about(axis: Vec3, angle: f32) -> Mat4 {
        // Falls back to the X axis for a degenerate input; callers only pass
        // lateral axes derived from a unit forward vector, which cannot be zero.
        let axis = nalgebra::Unit::try_new(axis, 1.0e-6)
            .unwrap_or_else(Vec3::x_axis);
        Mat4::from_axis_angle(&axis, angle)
    }

    fn translation(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::new_translation(&Vec3::new(x, y, z))
    }

    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let focal = 1.0 / (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = focal / aspect;
        result[(1, 1)] = focal;
        result[(2, 2)] = (far + near) / (near - far);
        result[(2, 3)] = (2.0 * far * near) / (near - far);
        result[(3, 2)] = -1.0;

        result
    }

    fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        let forward = (target - eye).normalize();
        let side = forward.cross(&up).normalize();
        let camera_up = side.cross(&forward);

        Mat4::new(
            side.x, side.y, side.z, -side.dot(&eye),
            camera_up.x, camera_up.y, camera_up.z, -camera_up.dot(&eye),
            -forward.x, -forward.y, -forward.z, forward.dot(&eye),
            0.0, 0.0, 0.0, 1.0,
        )
    }
}
