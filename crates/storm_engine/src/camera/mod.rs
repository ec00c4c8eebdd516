//! First-person camera controller
//!
//! Maintains the eye position and a unit forward vector, driven by pointer
//! deltas (yaw/pitch) and discrete movement commands. The pitch angle is
//! clamped so the forward vector can never become collinear with the world
//! up axis, which keeps the look-at construction well defined.

use crate::config::CameraConfig;
use crate::foundation::math::{constants, utils, Mat4, Mat4Ext, Vec3};
use crate::input::{MoveDirection, POINTER_DEAD_ZONE_SQ};

/// Pitch saturates just short of straight up/down
pub const PITCH_LIMIT: f32 = constants::HALF_PI * 0.9;

const BASE_FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// First-person camera state and controls
#[derive(Debug, Clone)]
pub struct CameraController {
    position: Vec3,
    forward: Vec3,
    yaw: f32,
    pitch: f32,
    sensitivity: f32,
    linear_speed: f32,
}

impl CameraController {
    /// Create a controller from configuration, looking down the negative Z axis
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: Vec3::from(config.position),
            forward: BASE_FORWARD,
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: config.sensitivity,
            linear_speed: config.linear_speed,
        }
    }

    /// Current eye position in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current unit forward vector
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Accumulated pitch angle in radians
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Rotate the view from a normalized pointer delta
    ///
    /// Yaw decreases with rightward motion, pitch increases with upward
    /// motion, and pitch saturates at [`PITCH_LIMIT`]. Deltas inside the
    /// dead zone are ignored to avoid jitter at rest.
    pub fn apply_pointer_delta(&mut self, dx: f32, dy: f32) {
        if dx * dx + dy * dy <= POINTER_DEAD_ZONE_SQ {
            return;
        }

        self.yaw += utils::deg_to_rad(-dx * self.sensitivity);
        self.pitch += utils::deg_to_rad(dy * self.sensitivity);
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.recompute_forward();
    }

    /// Move the camera along the ground plane
    ///
    /// The step direction is the forward vector projected onto the XZ plane
    /// and normalized, so ground speed does not depend on pitch. The step
    /// length is `linear_speed * dt`.
    pub fn apply_movement(&mut self, direction: MoveDirection, dt: f32) {
        let Some(forward_xz) =
            Vec3::new(self.forward.x, 0.0, self.forward.z).try_normalize(1.0e-6)
        else {
            // Unreachable while the pitch clamp holds; skip the step rather
            // than normalize a zero vector.
            return;
        };
        let right = forward_xz.cross(&Vec3::y());
        let step = self.linear_speed * dt;

        match direction {
            MoveDirection::Forward => self.position += forward_xz * step,
            MoveDirection::Backward => self.position -= forward_xz * step,
            MoveDirection::Left => self.position -= right * step,
            MoveDirection::Right => self.position += right * step,
        }
    }

    /// Rebuild the forward vector from the accumulated yaw and pitch
    ///
    /// Pitch rotates about the lateral axis of the yawed frame, applied
    /// after the yaw rotation about the world Y axis.
    fn recompute_forward(&mut self) {
        let yaw_rotation = Mat4::rotation_y(self.yaw);
        let yawed_forward = yaw_rotation.transform_vector(&BASE_FORWARD);
        let lateral_axis = yawed_forward.cross(&Vec3::y());
        let pitch_rotation = Mat4::rotation_about(lateral_axis, self.pitch);

        self.forward = (pitch_rotation * yaw_rotation)
            .transform_vector(&BASE_FORWARD)
            .normalize();
    }

    /// View matrix looking from the eye along the forward vector
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.position + self.forward, Vec3::y())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn controller() -> CameraController {
        CameraController::new(&CameraConfig::default())
    }

    #[test]
    fn test_initial_forward_is_negative_z() {
        let camera = controller();
        assert_relative_eq!(camera.forward(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_pitch_saturates_under_sustained_input() {
        let mut camera = controller();
        // 1000 large upward deltas must clamp, not wrap or overflow
        for _ in 0..1000 {
            camera.apply_pointer_delta(0.0, 0.5);
        }
        assert!(camera.pitch() <= PITCH_LIMIT + EPSILON);
        assert!(camera.forward().y < 1.0);

        for _ in 0..1000 {
            camera.apply_pointer_delta(0.0, -0.5);
        }
        assert!(camera.pitch() >= -PITCH_LIMIT - EPSILON);
    }

    #[test]
    fn test_forward_stays_unit_length() {
        let mut camera = controller();
        let deltas = [
            (0.3, 0.1),
            (-0.8, 0.4),
            (0.05, -0.9),
            (1.5, 1.5),
            (-0.02, 0.02),
            (0.0, -2.0),
        ];
        for (dx, dy) in deltas {
            camera.apply_pointer_delta(dx, dy);
            assert_relative_eq!(camera.forward().norm(), 1.0, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_dead_zone_leaves_view_unchanged() {
        let mut camera = controller();
        camera.apply_pointer_delta(1e-4, 1e-4);
        assert_relative_eq!(camera.forward(), Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_yaw_turns_right_for_rightward_delta() {
        let mut camera = controller();
        // Positive dx means the pointer moved right; yaw goes negative and
        // the forward vector swings toward +X
        camera.apply_pointer_delta(0.5, 0.0);
        assert!(camera.forward().x > 0.0);
        assert_relative_eq!(camera.forward().y, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_movement_is_speed_and_dt_scaled() {
        let mut camera = controller();
        let start = camera.position();
        camera.apply_movement(MoveDirection::Forward, 0.02);
        let moved = camera.position() - start;
        // 7.5 units/s over one 0.02 s frame
        assert_relative_eq!(moved.norm(), 0.15, epsilon = EPSILON);
        assert_relative_eq!(moved.z, -0.15, epsilon = EPSILON);
    }

    #[test]
    fn test_movement_stays_on_ground_plane_when_pitched() {
        let mut camera = controller();
        camera.apply_pointer_delta(0.0, 1.0); // look up
        let start = camera.position();
        camera.apply_movement(MoveDirection::Forward, 1.0);
        let moved = camera.position() - start;
        assert_relative_eq!(moved.y, 0.0, epsilon = EPSILON);
        assert_relative_eq!(moved.norm(), 7.5, epsilon = 1e-3);
    }

    #[test]
    fn test_strafe_is_perpendicular_to_forward() {
        let mut camera = controller();
        let start = camera.position();
        camera.apply_movement(MoveDirection::Right, 1.0);
        let moved = camera.position() - start;
        assert_relative_eq!(moved.dot(&Vec3::new(0.0, 0.0, -1.0)), 0.0, epsilon = EPSILON);
        assert!(moved.x > 0.0);
    }
}
