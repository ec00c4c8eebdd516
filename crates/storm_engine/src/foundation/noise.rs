//! Procedural noise used for wind perturbation
//!
//! Thin wrapper over a Perlin generator sampled along the time axis. The
//! precipitation passes read one scalar per frame and broadcast it across
//! all particles, so only a 1D slice of the noise field is needed.

use noise::{NoiseFn, Perlin};

/// Time-varying wind noise source
pub struct WindNoise {
    perlin: Perlin,
}

impl WindNoise {
    /// Create a noise source from a seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample the noise at the given application time
    ///
    /// Returns a value in roughly `[-1, 1]`; mode-dependent attenuation is
    /// applied by the caller.
    pub fn sample(&self, time: f32) -> f32 {
        self.perlin.get([f64::from(time), 0.0]) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_deterministic() {
        let a = WindNoise::new(7);
        let b = WindNoise::new(7);
        assert_eq!(a.sample(12.5), b.sample(12.5));
    }

    #[test]
    fn test_sample_stays_bounded() {
        let noise = WindNoise::new(42);
        for i in 0..200 {
            let value = noise.sample(i as f32 * 0.37);
            assert!(value.abs() <= 1.5, "noise sample {value} out of range");
        }
    }
}
