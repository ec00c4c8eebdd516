//! Frame rendering and projection pipeline
//!
//! Owns the projection parameters, the uploaded scene geometry, and the
//! pass scheduler. Each frame renders the opaque scene (floor and two
//! cubes) with blending off, then the precipitation layers with blending
//! on. The depth test stays enabled throughout so rain and snow are
//! occluded by solid geometry.

use crate::camera::CameraController;
use crate::foundation::math::{constants, utils, Mat4, Mat4Ext};
use crate::foundation::noise::WindNoise;
use crate::render::backend::{MeshHandle, ParticleBufferHandle, Program, RenderBackend, Topology};
use crate::render::mesh::Mesh;
use crate::render::scheduler::{PassScheduler, PrecipitationFrame};
use crate::render::{RenderError, RenderResult};
use crate::sky::{ParticleField, WeatherMode};

/// Vertical field of view in degrees
const FOV_DEGREES: f32 = 70.0;
/// Near clipping plane
const NEAR_PLANE: f32 = 0.01;
/// Far clipping plane
const FAR_PLANE: f32 = 100.0;
/// Background clear color
const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Renders the scene and delegates particle layers to the scheduler
pub struct Renderer {
    scheduler: PassScheduler,
    floor: MeshHandle,
    cube: MeshHandle,
    particles: ParticleBufferHandle,
    box_size: f32,
}

impl Renderer {
    /// Upload the static scene and particle buffer to the backend
    pub fn new(backend: &mut dyn RenderBackend, field: &ParticleField) -> RenderResult<Self> {
        let floor_mesh = Mesh::floor();
        let cube_mesh = Mesh::cube();

        let floor = backend.upload_mesh(floor_mesh.vertex_bytes(), &floor_mesh.indices)?;
        let cube = backend.upload_mesh(cube_mesh.vertex_bytes(), &cube_mesh.indices)?;

        let packed = field.packed();
        let particles = backend.upload_particles(bytemuck::cast_slice(&packed))?;

        log::info!(
            "Renderer ready: scene uploaded, {} particle vertices",
            field.vertex_count()
        );

        Ok(Self {
            scheduler: PassScheduler::new(),
            floor,
            cube,
            particles,
            box_size: field.box_size(),
        })
    }

    /// Build the perspective projection for the current framebuffer extent
    pub fn projection(&self, extent: (u32, u32)) -> Mat4 {
        let (width, height) = extent;
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Mat4::perspective(utils::deg_to_rad(FOV_DEGREES), aspect, NEAR_PLANE, FAR_PLANE)
    }

    /// Render one complete frame
    pub fn render_frame(
        &mut self,
        backend: &mut dyn RenderBackend,
        camera: &CameraController,
        mode: WeatherMode,
        time: f32,
        noise: &WindNoise,
    ) -> RenderResult<()> {
        let projection = self.projection(backend.extent());
        let view = camera.view_matrix();
        let view_proj = projection * view;

        backend.begin_frame(CLEAR_COLOR)?;

        // Opaque scene
        backend.set_blend(false);
        backend.use_program(Program::Solid);
        backend.set_mat4("model", &view_proj);
        backend.draw_mesh(self.floor, Topology::TriangleList)?;

        self.draw_cube(
            backend,
            view_proj
                * Mat4::translation(2.0, 1.0, 2.0)
                * Mat4::rotation_y(constants::HALF_PI),
        )?;
        self.draw_cube(
            backend,
            view_proj
                * Mat4::translation(-2.0, 1.0, -2.0)
                * Mat4::rotation_y(constants::QUARTER_PI),
        )?;

        // Precipitation layers over the scene
        backend.use_program(Program::Precipitation);
        backend.set_blend(true);
        let frame = PrecipitationFrame {
            time,
            mode,
            raw_noise: noise.sample(time),
            box_size: self.box_size,
        };
        self.scheduler
            .draw_precipitation(backend, self.particles, &view_proj, camera, &frame)?;

        backend.end_frame()
    }

    /// The scheduler, exposed for state inspection
    pub fn scheduler(&self) -> &PassScheduler {
        &self.scheduler
    }

    fn draw_cube(&self, backend: &mut dyn RenderBackend, model: Mat4) -> Result<(), RenderError> {
        backend.set_mat4("model", &model);
        backend.draw_mesh(self.cube, Topology::TriangleList)
    }
}
