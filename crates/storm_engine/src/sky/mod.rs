//! Precipitation simulation state
//!
//! The sky is a fixed-size particle buffer living inside a wrap-around cube
//! that follows the camera. Per frame and per layer, a single shared offset
//! vector is derived from gravity, wind, and noise; applying the wrap to the
//! shared offset rather than to individual particles translates the whole
//! field, preserving the relative arrangement while making it loop
//! seamlessly.

pub mod field;

pub use field::ParticleField;

use crate::foundation::math::{wrap_vec3, Vec3};
use crate::render::backend::Topology;

/// Rain or snow
///
/// A binary mode with no intermediate states. All behavioral differences are
/// expressed as data here (scale factors and topology); the per-vertex and
/// per-fragment computations stay shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherMode {
    /// Fast fall, line streaks
    Rain,
    /// Slow drift, soft point sprites
    Snow,
}

impl WeatherMode {
    /// Gravity multiplier; snow falls at a tenth of the rain speed
    pub fn gravity_scale(self) -> f32 {
        match self {
            Self::Rain => 1.0,
            Self::Snow => 0.1,
        }
    }

    /// Wind multiplier, averaged toward slower in snow mode
    pub fn wind_scale(self) -> f32 {
        (self.gravity_scale() + 1.0) / 2.0
    }

    /// Divisor applied to the raw noise sample
    pub fn noise_divisor(self) -> f32 {
        match self {
            Self::Rain => 2.0,
            Self::Snow => 6.0,
        }
    }

    /// Primitive topology for the particle draw
    pub fn topology(self) -> Topology {
        match self {
            Self::Rain => Topology::LineList,
            Self::Snow => Topology::PointList,
        }
    }

    /// Whether the snowing shader branch is active
    pub fn is_snow(self) -> bool {
        matches!(self, Self::Snow)
    }
}

/// Gravity and wind for one rendering layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerParams {
    /// Constant downward acceleration-like velocity
    pub gravity: Vec3,
    /// Constant lateral drift velocity
    pub wind: Vec3,
}

impl LayerParams {
    /// Streak direction opposite the fall, scaled to streak length
    pub fn inverse_dir(&self) -> Vec3 {
        (-self.gravity - self.wind) * 0.02
    }
}

/// Unit-length offset from the camera toward the box center
///
/// The scale inside the normalize cancels out, leaving the normalized
/// forward vector; the box therefore sits almost centered on the eye.
/// Preserved exactly because the streak transform and the offset derivation
/// must agree on it.
pub fn forward_offset(forward: Vec3, box_size: f32) -> Vec3 {
    (forward * (box_size / 2.0))
        .try_normalize(1.0e-6)
        .unwrap_or(forward)
}

/// Shared per-layer offset applied to every particle this frame
///
/// `gravity*t*gravity_scale + noise*(1,1,1) + wind*t*wind_scale` anchored to
/// the camera, wrapped into `[0, box_size)^3`. The camera anchor term phase
/// shifts the field so it tracks the viewer; the wrap keeps the result in
/// the box regardless.
pub fn layer_offset(
    layer: &LayerParams,
    time: f32,
    mode: WeatherMode,
    raw_noise: f32,
    camera_pos: Vec3,
    forward_offset: Vec3,
    box_size: f32,
) -> Vec3 {
    let noise = raw_noise / mode.noise_divisor();

    let gravity_offset = layer.gravity * time * mode.gravity_scale();
    let wind_offset = Vec3::repeat(noise) + layer.wind * time * mode.wind_scale();

    let mut offsets = gravity_offset + wind_offset;
    offsets -= camera_pos + forward_offset + Vec3::repeat(box_size / 2.0);
    wrap_vec3(offsets, box_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-5;

    fn layer() -> LayerParams {
        LayerParams {
            gravity: Vec3::new(0.0, -15.0, 0.0),
            wind: Vec3::new(0.6, 0.0, 0.79),
        }
    }

    #[test]
    fn test_mode_parameters() {
        assert_relative_eq!(WeatherMode::Rain.gravity_scale(), 1.0);
        assert_relative_eq!(WeatherMode::Snow.gravity_scale(), 0.1);
        assert_relative_eq!(WeatherMode::Rain.wind_scale(), 1.0);
        assert_relative_eq!(WeatherMode::Snow.wind_scale(), 0.55);
        assert_relative_eq!(WeatherMode::Rain.noise_divisor(), 2.0);
        assert_relative_eq!(WeatherMode::Snow.noise_divisor(), 6.0);
        assert_eq!(WeatherMode::Rain.topology(), Topology::LineList);
        assert_eq!(WeatherMode::Snow.topology(), Topology::PointList);
    }

    #[test]
    fn test_inverse_dir_opposes_fall() {
        let inverse = layer().inverse_dir();
        assert!(inverse.y > 0.0);
        assert!(inverse.x < 0.0);
        assert_relative_eq!(inverse.y, 15.0 * 0.02, epsilon = EPSILON);
    }

    #[test]
    fn test_forward_offset_is_unit_length() {
        let offset = forward_offset(Vec3::new(0.0, 0.0, -1.0), 30.0);
        assert_relative_eq!(offset.norm(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(offset.z, -1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_layer_offset_in_box() {
        let box_size = 30.0;
        let offset = layer_offset(
            &layer(),
            123.7,
            WeatherMode::Rain,
            0.42,
            Vec3::new(-80.0, 12.0, 400.0),
            Vec3::new(0.0, 0.0, -1.0),
            box_size,
        );
        for component in offset.iter() {
            assert!((0.0..box_size).contains(component));
        }
    }

    #[test]
    fn test_layer_offset_at_time_zero_reduces_to_anchor() {
        // Gravity and wind vanish at t=0; only noise and the camera anchor
        // remain, so the result is a deterministic wrap of the anchor term.
        let box_size = 30.0;
        let camera_pos = Vec3::zeros();
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let offset = layer_offset(
            &layer(),
            0.0,
            WeatherMode::Rain,
            0.0,
            camera_pos,
            forward,
            box_size,
        );
        let expected = crate::foundation::math::wrap_vec3(
            -(camera_pos + forward + Vec3::repeat(box_size / 2.0)),
            box_size,
        );
        assert_relative_eq!(offset, expected, epsilon = EPSILON);
    }

    #[test]
    fn test_snow_slows_gravity_not_geometry() {
        let rain = layer_offset(
            &layer(),
            10.0,
            WeatherMode::Rain,
            0.0,
            Vec3::zeros(),
            Vec3::new(0.0, 0.0, -1.0),
            30.0,
        );
        let snow = layer_offset(
            &layer(),
            10.0,
            WeatherMode::Snow,
            0.0,
            Vec3::zeros(),
            Vec3::new(0.0, 0.0, -1.0),
            30.0,
        );
        // Same inputs, different scales, different offsets
        assert!((rain - snow).norm() > EPSILON);
    }
}
