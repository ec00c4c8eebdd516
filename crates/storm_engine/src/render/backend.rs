//! Backend abstraction traits for the rendering system
//!
//! The backend is the external collaborator that owns the frame clock,
//! shader programs with named-uniform setters, and raw vertex/index buffer
//! upload. The renderer only ever talks through this trait, so a windowed
//! GPU backend and the deterministic software backend are interchangeable.

use crate::foundation::math::{Mat4, Vec3};
use crate::render::RenderError;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Primitive topology for a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Indexed triangles (solid geometry)
    TriangleList,
    /// Vertex pairs as line segments (rain streaks)
    LineList,
    /// Independent points (snow sprites)
    PointList,
}

/// Shader program selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Program {
    /// Position + color, opaque scene geometry
    Solid,
    /// The precipitation streak/point program
    Precipitation,
}

/// Handle to an uploaded indexed mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshHandle(pub(crate) usize);

/// Handle to an uploaded non-indexed particle buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleBufferHandle(pub(crate) usize);

/// Main rendering backend trait
///
/// Uniform setters target the program most recently selected with
/// [`RenderBackend::use_program`]; names follow the shader interface
/// (`viewProj`, `prevViewProj`, `offsets`, and so on).
pub trait RenderBackend {
    /// Current framebuffer extent (width, height) in pixels
    fn extent(&self) -> (u32, u32);

    /// Upload an indexed mesh; `vertex_bytes` is a packed array of
    /// [`crate::render::Vertex`]
    fn upload_mesh(&mut self, vertex_bytes: &[u8], indices: &[u32]) -> BackendResult<MeshHandle>;

    /// Upload a non-indexed particle buffer of interleaved `x y z` floats
    /// bound to the `initPos` attribute
    fn upload_particles(&mut self, vertex_bytes: &[u8]) -> BackendResult<ParticleBufferHandle>;

    /// Begin a frame, clearing color and depth
    fn begin_frame(&mut self, clear_color: [f32; 4]) -> BackendResult<()>;

    /// Select the shader program subsequent uniforms and draws apply to
    fn use_program(&mut self, program: Program);

    /// Set a named 4x4 matrix uniform
    fn set_mat4(&mut self, name: &str, value: &Mat4);

    /// Set a named vec3 uniform
    fn set_vec3(&mut self, name: &str, value: &Vec3);

    /// Set a named float uniform
    fn set_float(&mut self, name: &str, value: f32);

    /// Set a named bool uniform
    fn set_bool(&mut self, name: &str, value: bool);

    /// Enable or disable alpha blending; the depth test stays on either way
    /// so particles are still occluded by solid geometry
    fn set_blend(&mut self, enabled: bool);

    /// Draw an uploaded mesh with the current program
    fn draw_mesh(&mut self, mesh: MeshHandle, topology: Topology) -> BackendResult<()>;

    /// Draw an uploaded particle buffer with the current program
    fn draw_particles(
        &mut self,
        buffer: ParticleBufferHandle,
        topology: Topology,
    ) -> BackendResult<()>;

    /// Finish and present the frame
    fn end_frame(&mut self) -> BackendResult<()>;
}
