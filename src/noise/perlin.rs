//! Seeded 2D Perlin noise
//!
//! Gradient noise over the XZ plane with fractal Brownian motion layering.
//! The permutation table is shuffled from the seed, so two sources with the
//! same seed and configuration produce identical samples on every platform.

use glam::Vec4;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::NoiseSource;

/// Configuration for Perlin noise generation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerlinConfig {
    /// Base frequency in noise-space units (higher = smaller features)
    pub base_frequency: f32,
    /// Number of octaves for fractal detail layers
    pub octaves: usize,
    /// Amplitude decay per octave (controls roughness)
    pub persistence: f32,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
}

impl Default for PerlinConfig {
    fn default() -> Self {
        Self {
            base_frequency: 8.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

/// Offsets that decorrelate the four output channels
const CHANNEL_OFFSETS: [(f32, f32); 4] = [
    (0.0, 0.0),
    (31.416, -17.231),
    (-53.137, 71.911),
    (97.043, 43.587),
];

/// Seeded Perlin noise source
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    seed: u32,
    config: PerlinConfig,
    /// Shuffled 0..256 repeated twice so lookups never need masking
    permutation: [u8; 512],
}

impl PerlinNoise {
    /// Create a noise source with the default configuration
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, PerlinConfig::default())
    }

    /// Create a noise source with a custom configuration
    pub fn with_config(seed: u32, config: PerlinConfig) -> Self {
        let mut table: Vec<u8> = (0..=255u8).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
        table.shuffle(&mut rng);

        let mut permutation = [0u8; 512];
        for (i, slot) in permutation.iter_mut().enumerate() {
            *slot = table[i & 255];
        }

        Self {
            seed,
            config,
            permutation,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &PerlinConfig {
        &self.config
    }

    #[inline]
    fn hash(&self, x: i32, z: i32) -> u8 {
        let xi = (x & 255) as usize;
        let zi = (z & 255) as usize;
        self.permutation[self.permutation[xi] as usize + zi]
    }

    /// Raw single-octave noise, roughly in [-1, 1]
    fn perlin_2d(&self, x: f32, z: f32) -> f32 {
        let x0 = x.floor();
        let z0 = z.floor();
        let xf = x - x0;
        let zf = z - z0;
        let xi = x0 as i32;
        let zi = z0 as i32;

        let u = fade(xf);
        let w = fade(zf);

        let g00 = gradient(self.hash(xi, zi), xf, zf);
        let g10 = gradient(self.hash(xi + 1, zi), xf - 1.0, zf);
        let g01 = gradient(self.hash(xi, zi + 1), xf, zf - 1.0);
        let g11 = gradient(self.hash(xi + 1, zi + 1), xf - 1.0, zf - 1.0);

        let bottom = lerp(g00, g10, u);
        let top = lerp(g01, g11, u);
        lerp(bottom, top, w)
    }

    /// Fractal Brownian motion, normalized to approximately [-1, 1]
    pub fn sample_fbm(&self, x: f32, z: f32) -> f32 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.config.base_frequency;
        let mut max_value = 0.0;

        for _ in 0..self.config.octaves {
            total += self.perlin_2d(x * frequency, z * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= self.config.persistence;
            frequency *= self.config.lacunarity;
        }

        if max_value == 0.0 {
            return 0.0;
        }
        total / max_value
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f32, z: f32) -> Vec4 {
        let mut channels = [0.0f32; 4];
        for (channel, (dx, dz)) in channels.iter_mut().zip(CHANNEL_OFFSETS) {
            let value = self.sample_fbm(x + dx, z + dz);
            *channel = (value * 0.5 + 0.5).clamp(0.0, 1.0);
        }
        Vec4::from_array(channels)
    }
}

/// Dot product with one of eight gradient directions selected by the hash
#[inline]
fn gradient(hash: u8, x: f32, z: f32) -> f32 {
    match hash & 7 {
        0 => x + z,
        1 => -x + z,
        2 => x - z,
        3 => -x - z,
        4 => x,
        5 => -x,
        6 => z,
        _ => -z,
    }
}

/// Quintic smoothstep: 6t⁵ - 15t⁴ + 10t³
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let a = PerlinNoise::new(42);
        let b = PerlinNoise::new(42);
        for i in 0..20 {
            let x = i as f32 * 0.037;
            let z = 1.0 - i as f32 * 0.051;
            assert_eq!(a.sample(x, z), b.sample(x, z));
        }
    }

    #[test]
    fn test_channels_in_unit_range() {
        let noise = PerlinNoise::new(7);
        for i in 0..50 {
            let sample = noise.sample(i as f32 * 0.013, i as f32 * 0.029);
            for channel in sample.to_array() {
                assert!((0.0..=1.0).contains(&channel), "channel {} out of range", channel);
            }
        }
    }

    #[test]
    fn test_different_seeds() {
        let a = PerlinNoise::new(1);
        let b = PerlinNoise::new(2);
        let differs = (0..20).any(|i| {
            let x = 0.11 + i as f32 * 0.07;
            a.sample_fbm(x, x * 0.5) != b.sample_fbm(x, x * 0.5)
        });
        assert!(differs, "different seeds should produce different fields");
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let noise = PerlinNoise::new(3);
        assert_eq!(noise.perlin_2d(0.0, 0.0), 0.0);
        assert_eq!(noise.perlin_2d(4.0, -2.0), 0.0);
    }

    #[test]
    fn test_channels_decorrelated() {
        let noise = PerlinNoise::new(11);
        let sample = noise.sample(0.123, 0.456);
        assert!(sample.x != sample.y || sample.y != sample.z);
    }
}
