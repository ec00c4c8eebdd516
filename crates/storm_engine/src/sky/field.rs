//! Fixed-size particle buffer
//!
//! Base positions are seeded once inside the wrap cube and never change;
//! every frame-to-frame motion is expressed through the shared layer offsets.
//! Each position is stored twice so the line topology can emit the two
//! endpoints of a streak from one buffer without extra storage.

use crate::foundation::math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Immutable particle base positions, each stored as a vertex pair
pub struct ParticleField {
    vertices: Vec<Vec3>,
    box_size: f32,
}

impl ParticleField {
    /// Seed `count` particles uniformly inside `[0, box_size)^3`
    ///
    /// The buffer holds `2 * count` vertices; vertices `2i` and `2i + 1`
    /// always share the same base position.
    pub fn new(count: u32, box_size: f32, seed: u64) -> Self {
        log::info!("Seeding {count} precipitation particles (box size {box_size})");
        let mut rng = StdRng::seed_from_u64(seed);

        let mut vertices = Vec::with_capacity(count as usize * 2);
        for _ in 0..count {
            let position = Vec3::new(
                rng.gen::<f32>() * box_size,
                rng.gen::<f32>() * box_size,
                rng.gen::<f32>() * box_size,
            );
            vertices.push(position);
            vertices.push(position);
        }

        Self { vertices, box_size }
    }

    /// Number of particles
    pub fn particle_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Number of vertices in the paired buffer
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Edge length of the wrap cube the particles were seeded in
    pub fn box_size(&self) -> f32 {
        self.box_size
    }

    /// The paired vertex positions
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Flatten the buffer into interleaved `x y z` floats for upload
    pub fn packed(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertices.len() * 3);
        for vertex in &self.vertices {
            data.extend_from_slice(&[vertex.x, vertex.y, vertex.z]);
        }
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_share_positions() {
        let field = ParticleField::new(64, 30.0, 1);
        assert_eq!(field.vertex_count(), 128);
        assert_eq!(field.particle_count(), 64);
        for pair in field.vertices().chunks_exact(2) {
            assert_eq!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_positions_inside_box() {
        let field = ParticleField::new(256, 30.0, 2);
        for vertex in field.vertices() {
            for component in vertex.iter() {
                assert!((0.0..30.0).contains(component));
            }
        }
    }

    #[test]
    fn test_seed_determinism() {
        let a = ParticleField::new(32, 30.0, 9);
        let b = ParticleField::new(32, 30.0, 9);
        assert_eq!(a.vertices(), b.vertices());

        let c = ParticleField::new(32, 30.0, 10);
        assert_ne!(a.vertices(), c.vertices());
    }

    #[test]
    fn test_packed_layout() {
        let field = ParticleField::new(2, 30.0, 3);
        let packed = field.packed();
        assert_eq!(packed.len(), 12);
        assert_eq!(packed[0], field.vertices()[0].x);
        assert_eq!(packed[5], field.vertices()[1].z);
    }
}
