//! Precipitation pass scheduling
//!
//! Drives the four fixed simulation layers per frame and retains the
//! previous frame's view-projection matrix, the only piece of cross-frame
//! render state. Layers differ only in gravity and wind, which yields four
//! apparent fall speeds from a single particle buffer and fakes depth
//! without more particles.

use crate::camera::CameraController;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::backend::{ParticleBufferHandle, RenderBackend};
use crate::render::BackendResult;
use crate::sky::{self, LayerParams, WeatherMode};

/// Number of independent precipitation layers per frame
pub const LAYER_COUNT: usize = 4;

/// Fixed gravity/wind table, one entry per layer, stable order
pub const LAYERS: [LayerParams; LAYER_COUNT] = [
    LayerParams {
        gravity: Vec3::new(0.0, -15.0, 0.0),
        wind: Vec3::new(0.6, 0.0, 0.79),
    },
    LayerParams {
        gravity: Vec3::new(0.0, -11.0, 0.0),
        wind: Vec3::new(0.5, 0.0, 0.215),
    },
    LayerParams {
        gravity: Vec3::new(0.0, -10.0, 0.0),
        wind: Vec3::new(0.42, 0.0, 0.9),
    },
    LayerParams {
        gravity: Vec3::new(0.0, -6.0, 0.0),
        wind: Vec3::new(0.75, 0.0, 1.5),
    },
];

/// Per-frame inputs to the precipitation passes
#[derive(Debug, Clone, Copy)]
pub struct PrecipitationFrame {
    /// Application time in seconds
    pub time: f32,
    /// Active weather mode
    pub mode: WeatherMode,
    /// Raw noise sample for this frame, before mode attenuation
    pub raw_noise: f32,
    /// Wrap cube edge length
    pub box_size: f32,
}

/// Schedules the four particle layers and carries `prevViewProj` across frames
pub struct PassScheduler {
    prev_view_proj: Option<Mat4>,
}

impl Default for PassScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PassScheduler {
    /// Create a scheduler with no previous frame
    pub fn new() -> Self {
        Self {
            prev_view_proj: None,
        }
    }

    /// The previous frame's view-projection, if a frame has been drawn
    pub fn prev_view_proj(&self) -> Option<&Mat4> {
        self.prev_view_proj.as_ref()
    }

    /// Draw the four precipitation layers
    ///
    /// Layers are submitted sequentially in table order; all four share the
    /// same `viewProj`/`prevViewProj` pair, only gravity, wind, and the
    /// derived offsets differ. On the very first frame `prevViewProj`
    /// equals `viewProj`, so streaks start with zero apparent length.
    /// `prevViewProj` is advanced exactly once per frame, after the last
    /// layer.
    pub fn draw_precipitation(
        &mut self,
        backend: &mut dyn RenderBackend,
        particles: ParticleBufferHandle,
        view_proj: &Mat4,
        camera: &CameraController,
        frame: &PrecipitationFrame,
    ) -> BackendResult<()> {
        let prev_view_proj = self.prev_view_proj.unwrap_or(*view_proj);
        let camera_pos = camera.position();
        let forward_offset = sky::forward_offset(camera.forward(), frame.box_size);

        for layer in &LAYERS {
            let offsets = sky::layer_offset(
                layer,
                frame.time,
                frame.mode,
                frame.raw_noise,
                camera_pos,
                forward_offset,
                frame.box_size,
            );

            backend.set_mat4("prevViewProj", &prev_view_proj);
            backend.set_mat4("viewProj", view_proj);
            backend.set_vec3("cameraPos", &camera_pos);
            backend.set_vec3("forwardOffset", &forward_offset);
            backend.set_vec3("inverseDir", &layer.inverse_dir());
            backend.set_float("boxSize", frame.box_size);
            backend.set_vec3("offsets", &offsets);
            backend.set_bool("snowing", frame.mode.is_snow());

            backend.draw_particles(particles, frame.mode.topology())?;
        }

        self.prev_view_proj = Some(*view_proj);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_layer_table_shape() {
        assert_eq!(LAYERS.len(), 4);
        let expected_gravity = [-15.0, -11.0, -10.0, -6.0];
        for (layer, expected) in LAYERS.iter().zip(expected_gravity) {
            assert_relative_eq!(layer.gravity.y, expected);
            assert_relative_eq!(layer.gravity.x, 0.0);
            assert_relative_eq!(layer.wind.y, 0.0);
        }
        // All (gravity, wind) pairs are distinct
        for (i, a) in LAYERS.iter().enumerate() {
            for b in LAYERS.iter().skip(i + 1) {
                assert!(a != b);
            }
        }
    }

    #[test]
    fn test_scheduler_starts_without_history() {
        let scheduler = PassScheduler::new();
        assert!(scheduler.prev_view_proj().is_none());
    }
}
