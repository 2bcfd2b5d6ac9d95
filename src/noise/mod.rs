//! Noise sources used to perturb terrain vertices
//!
//! The triangulator only needs a function from a 2D sample coordinate to four
//! channels in `[0, 1]`. Any texture, procedural field or lookup table can be
//! plugged in by implementing [`NoiseSource`].

mod perlin;
mod texture;

pub use perlin::{PerlinConfig, PerlinNoise};
pub use texture::NoiseTexture;

use glam::Vec4;

/// A read-only 2D noise field
///
/// Implementations must be deterministic: the same coordinate always returns
/// the same sample, otherwise rebuilt meshes drift between passes.
pub trait NoiseSource: Send + Sync {
    /// Sample four channels in `[0, 1]` at noise-space coordinate `(x, z)`
    fn sample(&self, x: f32, z: f32) -> Vec4;
}

/// Noise source that returns 0.5 on every channel
///
/// A 0.5 sample maps to zero displacement, so meshes built with `FlatNoise`
/// keep the exact hexagon layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatNoise;

impl NoiseSource for FlatNoise {
    #[inline]
    fn sample(&self, _x: f32, _z: f32) -> Vec4 {
        Vec4::splat(0.5)
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &N {
    #[inline]
    fn sample(&self, x: f32, z: f32) -> Vec4 {
        (**self).sample(x, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_noise_is_centered() {
        assert_eq!(FlatNoise.sample(123.0, -4.0), Vec4::splat(0.5));
    }

    #[test]
    fn test_reference_forwarding() {
        let noise = PerlinNoise::new(5);
        let by_ref: &dyn NoiseSource = &noise;
        assert_eq!(by_ref.sample(0.3, 0.7), noise.sample(0.3, 0.7));
    }
}
