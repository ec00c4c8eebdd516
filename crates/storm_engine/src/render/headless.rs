//! Software rendering backend
//!
//! A deterministic, windowless [`RenderBackend`] that decodes uploaded
//! buffers, executes the precipitation vertex stage from
//! [`crate::render::streak`] on the CPU, and records every draw call with
//! its uniform snapshot. It backs the headless demo binary and the
//! integration tests; a GPU backend would replace it without touching the
//! renderer.

use std::collections::HashMap;

use crate::foundation::math::{Mat4, Vec3};
use crate::render::backend::{
    BackendResult, MeshHandle, ParticleBufferHandle, Program, RenderBackend, Topology,
};
use crate::render::mesh::Vertex;
use crate::render::streak::{self, StreakUniforms};
use crate::render::RenderError;

/// A named uniform value
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// 4x4 matrix
    Mat4(Mat4),
    /// 3-component vector
    Vec3(Vec3),
    /// Scalar
    Float(f32),
    /// Boolean flag
    Bool(bool),
}

type UniformStore = HashMap<String, UniformValue>;

fn get_mat4(store: &UniformStore, name: &str) -> BackendResult<Mat4> {
    match store.get(name) {
        Some(UniformValue::Mat4(value)) => Ok(*value),
        _ => Err(RenderError::RenderingFailed(format!(
            "missing mat4 uniform '{name}'"
        ))),
    }
}

fn get_vec3(store: &UniformStore, name: &str) -> BackendResult<Vec3> {
    match store.get(name) {
        Some(UniformValue::Vec3(value)) => Ok(*value),
        _ => Err(RenderError::RenderingFailed(format!(
            "missing vec3 uniform '{name}'"
        ))),
    }
}

fn get_float(store: &UniformStore, name: &str) -> BackendResult<f32> {
    match store.get(name) {
        Some(UniformValue::Float(value)) => Ok(*value),
        _ => Err(RenderError::RenderingFailed(format!(
            "missing float uniform '{name}'"
        ))),
    }
}

fn get_bool(store: &UniformStore, name: &str) -> BackendResult<bool> {
    match store.get(name) {
        Some(UniformValue::Bool(value)) => Ok(*value),
        _ => Err(RenderError::RenderingFailed(format!(
            "missing bool uniform '{name}'"
        ))),
    }
}

/// One recorded draw call
#[derive(Debug, Clone)]
pub struct DrawRecord {
    /// Program active at submission
    pub program: Program,
    /// Primitive topology
    pub topology: Topology,
    /// Blend state at submission
    pub blend: bool,
    /// Number of vertices processed
    pub vertex_count: usize,
    /// Uniform snapshot of the active program
    pub uniforms: UniformStore,
    /// Mean `lenColorScale` across processed vertices (precipitation only)
    pub mean_len_color_scale: f32,
}

impl DrawRecord {
    /// The `offsets` uniform captured for this draw
    pub fn offsets(&self) -> Option<Vec3> {
        match self.uniforms.get("offsets") {
            Some(UniformValue::Vec3(value)) => Some(*value),
            _ => None,
        }
    }

    /// The `inverseDir` uniform captured for this draw
    pub fn inverse_dir(&self) -> Option<Vec3> {
        match self.uniforms.get("inverseDir") {
            Some(UniformValue::Vec3(value)) => Some(*value),
            _ => None,
        }
    }

    /// The `viewProj`/`prevViewProj` pair captured for this draw
    pub fn view_proj_pair(&self) -> Option<(Mat4, Mat4)> {
        match (self.uniforms.get("viewProj"), self.uniforms.get("prevViewProj")) {
            (Some(UniformValue::Mat4(current)), Some(UniformValue::Mat4(previous))) => {
                Some((*current, *previous))
            }
            _ => None,
        }
    }
}

/// CPU rendering backend with draw recording
pub struct SoftwareBackend {
    extent: (u32, u32),
    meshes: Vec<(Vec<Vertex>, Vec<u32>)>,
    particle_buffers: Vec<Vec<Vec3>>,
    uniforms: HashMap<&'static str, UniformStore>,
    active_program: Program,
    blend: bool,
    in_frame: bool,
    frame_draws: Vec<DrawRecord>,
    last_frame: Vec<DrawRecord>,
    frames_presented: u64,
}

impl SoftwareBackend {
    /// Create a backend with the given framebuffer extent
    pub fn new(width: u32, height: u32) -> Self {
        let mut uniforms = HashMap::new();
        uniforms.insert(Self::program_key(Program::Solid), UniformStore::new());
        uniforms.insert(Self::program_key(Program::Precipitation), UniformStore::new());
        Self {
            extent: (width, height),
            meshes: Vec::new(),
            particle_buffers: Vec::new(),
            uniforms,
            active_program: Program::Solid,
            blend: false,
            in_frame: false,
            frame_draws: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
        }
    }

    fn program_key(program: Program) -> &'static str {
        match program {
            Program::Solid => "solid",
            Program::Precipitation => "precipitation",
        }
    }

    fn store(&mut self) -> &mut UniformStore {
        self.uniforms
            .get_mut(Self::program_key(self.active_program))
            .expect("uniform stores are created up front")
    }

    /// Draw records of the most recently presented frame
    pub fn last_frame(&self) -> &[DrawRecord] {
        &self.last_frame
    }

    /// Precipitation draw records of the most recently presented frame
    pub fn precipitation_draws(&self) -> Vec<&DrawRecord> {
        self.last_frame
            .iter()
            .filter(|record| record.program == Program::Precipitation)
            .collect()
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn run_precipitation_stage(
        &self,
        vertices: &[Vec3],
    ) -> BackendResult<(usize, f32)> {
        let store = self
            .uniforms
            .get(Self::program_key(Program::Precipitation))
            .expect("uniform stores are created up front");
        let uniforms = StreakUniforms {
            offsets: get_vec3(store, "offsets")?,
            camera_pos: get_vec3(store, "cameraPos")?,
            forward_offset: get_vec3(store, "forwardOffset")?,
            inverse_dir: get_vec3(store, "inverseDir")?,
            box_size: get_float(store, "boxSize")?,
            snowing: get_bool(store, "snowing")?,
            view_proj: get_mat4(store, "viewProj")?,
            prev_view_proj: get_mat4(store, "prevViewProj")?,
        };

        let mut scale_sum = 0.0;
        for (index, position) in vertices.iter().enumerate() {
            let output = streak::transform_vertex(*position, index, &uniforms);
            if !output.len_color_scale.is_finite() {
                return Err(RenderError::RenderingFailed(
                    "non-finite streak attenuation".to_string(),
                ));
            }
            scale_sum += output.len_color_scale;
        }

        let mean = if vertices.is_empty() {
            0.0
        } else {
            scale_sum / vertices.len() as f32
        };
        Ok((vertices.len(), mean))
    }

    fn record_draw(
        &mut self,
        topology: Topology,
        vertex_count: usize,
        mean_len_color_scale: f32,
    ) {
        let uniforms = self.uniforms[Self::program_key(self.active_program)].clone();
        self.frame_draws.push(DrawRecord {
            program: self.active_program,
            topology,
            blend: self.blend,
            vertex_count,
            uniforms,
            mean_len_color_scale,
        });
    }
}

impl RenderBackend for SoftwareBackend {
    fn extent(&self) -> (u32, u32) {
        self.extent
    }

    fn upload_mesh(&mut self, vertex_bytes: &[u8], indices: &[u32]) -> BackendResult<MeshHandle> {
        let vertices: &[Vertex] = bytemuck::try_cast_slice(vertex_bytes).map_err(|e| {
            RenderError::ResourceCreationFailed(format!("bad mesh vertex data: {e}"))
        })?;
        if let Some(&max) = indices.iter().max() {
            if max as usize >= vertices.len() {
                return Err(RenderError::ResourceCreationFailed(format!(
                    "index {max} out of bounds for {} vertices",
                    vertices.len()
                )));
            }
        }
        self.meshes.push((vertices.to_vec(), indices.to_vec()));
        Ok(MeshHandle(self.meshes.len() - 1))
    }

    fn upload_particles(&mut self, vertex_bytes: &[u8]) -> BackendResult<ParticleBufferHandle> {
        let floats: &[f32] = bytemuck::try_cast_slice(vertex_bytes).map_err(|e| {
            RenderError::ResourceCreationFailed(format!("bad particle data: {e}"))
        })?;
        if floats.len() % 3 != 0 {
            return Err(RenderError::ResourceCreationFailed(
                "particle buffer is not a multiple of 3 floats".to_string(),
            ));
        }
        let vertices = floats
            .chunks_exact(3)
            .map(|xyz| Vec3::new(xyz[0], xyz[1], xyz[2]))
            .collect();
        self.particle_buffers.push(vertices);
        Ok(ParticleBufferHandle(self.particle_buffers.len() - 1))
    }

    fn begin_frame(&mut self, _clear_color: [f32; 4]) -> BackendResult<()> {
        if self.in_frame {
            return Err(RenderError::RenderingFailed(
                "begin_frame called twice".to_string(),
            ));
        }
        self.in_frame = true;
        self.frame_draws.clear();
        Ok(())
    }

    fn use_program(&mut self, program: Program) {
        self.active_program = program;
    }

    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        self.store().insert(name.to_string(), UniformValue::Mat4(*value));
    }

    fn set_vec3(&mut self, name: &str, value: &Vec3) {
        self.store().insert(name.to_string(), UniformValue::Vec3(*value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.store().insert(name.to_string(), UniformValue::Float(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.store().insert(name.to_string(), UniformValue::Bool(value));
    }

    fn set_blend(&mut self, enabled: bool) {
        self.blend = enabled;
    }

    fn draw_mesh(&mut self, mesh: MeshHandle, topology: Topology) -> BackendResult<()> {
        let (_, indices) = self.meshes.get(mesh.0).ok_or_else(|| {
            RenderError::RenderingFailed(format!("unknown mesh handle {}", mesh.0))
        })?;
        let vertex_count = indices.len();
        self.record_draw(topology, vertex_count, 1.0);
        Ok(())
    }

    fn draw_particles(
        &mut self,
        buffer: ParticleBufferHandle,
        topology: Topology,
    ) -> BackendResult<()> {
        let vertices = self
            .particle_buffers
            .get(buffer.0)
            .ok_or_else(|| {
                RenderError::RenderingFailed(format!("unknown particle buffer {}", buffer.0))
            })?
            .clone();
        let (vertex_count, mean_scale) = if self.active_program == Program::Precipitation {
            self.run_precipitation_stage(&vertices)?
        } else {
            (vertices.len(), 1.0)
        };
        self.record_draw(topology, vertex_count, mean_scale);
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        if !self.in_frame {
            return Err(RenderError::RenderingFailed(
                "end_frame without begin_frame".to_string(),
            ));
        }
        self.in_frame = false;
        self.last_frame = std::mem::take(&mut self.frame_draws);
        self.frames_presented += 1;
        log::trace!(
            "Presented frame {} with {} draws",
            self.frames_presented,
            self.last_frame.len()
        );
        Ok(())
    }
}
