//! Static scene meshes
//!
//! The demo scene is a floor plane and a reusable cube, both with per-vertex
//! colors and triangle indices. Vertices are `repr(C)` and `Pod` so a whole
//! mesh can be handed to the backend as one byte slice.

use bytemuck::{Pod, Zeroable};

/// Interleaved position + color vertex
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// RGBA color
    pub color: [f32; 4],
}

/// An indexed triangle mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl Mesh {
    /// View the vertex data as raw bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// A large ground quad at y = 0
    pub fn floor() -> Self {
        let half = 15.0;
        let color_a = [0.22, 0.3, 0.26, 1.0];
        let color_b = [0.18, 0.26, 0.22, 1.0];
        let vertices = vec![
            Vertex { position: [-half, 0.0, -half], color: color_a },
            Vertex { position: [half, 0.0, -half], color: color_b },
            Vertex { position: [half, 0.0, half], color: color_a },
            Vertex { position: [-half, 0.0, half], color: color_b },
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];
        Self { vertices, indices }
    }

    /// A unit-radius cube centered on the origin
    pub fn cube() -> Self {
        let corners = [
            [-1.0, -1.0, -1.0],
            [1.0, -1.0, -1.0],
            [1.0, 1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [-1.0, -1.0, 1.0],
            [1.0, -1.0, 1.0],
            [1.0, 1.0, 1.0],
            [-1.0, 1.0, 1.0],
        ];
        let colors = [
            [0.55, 0.35, 0.3, 1.0],
            [0.5, 0.4, 0.3, 1.0],
            [0.6, 0.45, 0.35, 1.0],
            [0.5, 0.35, 0.35, 1.0],
            [0.45, 0.3, 0.25, 1.0],
            [0.55, 0.4, 0.3, 1.0],
            [0.6, 0.4, 0.35, 1.0],
            [0.5, 0.3, 0.25, 1.0],
        ];
        let vertices = corners
            .iter()
            .zip(colors.iter())
            .map(|(position, color)| Vertex {
                position: *position,
                color: *color,
            })
            .collect();
        // Two triangles per face, counter-clockwise from the outside
        let indices = vec![
            0, 2, 1, 0, 3, 2, // back
            4, 5, 6, 4, 6, 7, // front
            0, 4, 7, 0, 7, 3, // left
            1, 6, 5, 1, 2, 6, // right
            3, 7, 6, 3, 6, 2, // top
            0, 1, 5, 0, 5, 4, // bottom
        ];
        Self { vertices, indices }
    }
}
