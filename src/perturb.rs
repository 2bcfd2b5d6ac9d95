//! Noise-driven vertex perturbation
//!
//! Displaces vertices horizontally so the regular hexagon lattice reads as
//! organic terrain. Heights are never touched by [`Perturbation::apply`]; the
//! only vertical offset is the per-cell [`Perturbation::elevation_offset`].

use glam::{Vec3, Vec4};

use crate::config::HexMetrics;
use crate::noise::NoiseSource;

/// Metrics and noise source bundled for perturbing world positions
#[derive(Clone, Copy)]
pub struct Perturbation<'a> {
    metrics: &'a HexMetrics,
    noise: &'a dyn NoiseSource,
}

impl<'a> Perturbation<'a> {
    pub fn new(metrics: &'a HexMetrics, noise: &'a dyn NoiseSource) -> Self {
        Self { metrics, noise }
    }

    #[inline]
    pub fn metrics(&self) -> &'a HexMetrics {
        self.metrics
    }

    /// Noise sample for a world position, using only its XZ coordinates
    #[inline]
    pub fn sample(&self, position: Vec3) -> Vec4 {
        self.noise.sample(
            position.x * self.metrics.noise_scale,
            position.z * self.metrics.noise_scale,
        )
    }

    /// Horizontally displace a world position
    pub fn apply(&self, position: Vec3) -> Vec3 {
        let sample = self.sample(position);
        let strength = self.metrics.cell_perturb_strength;
        Vec3::new(
            position.x + (sample.x * 2.0 - 1.0) * strength,
            position.y,
            position.z + (sample.z * 2.0 - 1.0) * strength,
        )
    }

    /// Vertical offset applied to a whole cell at `position`
    pub fn elevation_offset(&self, position: Vec3) -> f32 {
        let sample = self.sample(position);
        (sample.y * 2.0 - 1.0) * self.metrics.elevation_perturb_strength
    }
}

impl std::fmt::Debug for Perturbation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perturbation")
            .field("metrics", self.metrics)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::{FlatNoise, PerlinNoise};

    struct ConstantNoise(Vec4);

    impl NoiseSource for ConstantNoise {
        fn sample(&self, _x: f32, _z: f32) -> Vec4 {
            self.0
        }
    }

    #[test]
    fn test_flat_noise_leaves_position() {
        let metrics = HexMetrics::default();
        let perturbation = Perturbation::new(&metrics, &FlatNoise);
        let p = Vec3::new(12.5, 3.0, -40.0);
        assert_eq!(perturbation.apply(p), p);
        assert_eq!(perturbation.elevation_offset(p), 0.0);
    }

    #[test]
    fn test_channels_remapped_and_scaled() {
        let metrics = HexMetrics::default();
        let noise = ConstantNoise(Vec4::new(1.0, 0.0, 0.0, 0.5));
        let perturbation = Perturbation::new(&metrics, &noise);

        let p = perturbation.apply(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Vec3::new(1.0 + 4.0, 2.0, 3.0 - 4.0));
        assert_eq!(perturbation.elevation_offset(Vec3::ZERO), -1.5);
    }

    #[test]
    fn test_height_is_never_perturbed() {
        let metrics = HexMetrics::default();
        let noise = PerlinNoise::new(99);
        let perturbation = Perturbation::new(&metrics, &noise);
        for i in 0..25 {
            let p = Vec3::new(i as f32 * 7.3, i as f32 * 0.5, i as f32 * -3.1);
            let moved = perturbation.apply(p);
            assert_eq!(moved.y, p.y);
            assert!((moved.x - p.x).abs() <= metrics.cell_perturb_strength);
            assert!((moved.z - p.z).abs() <= metrics.cell_perturb_strength);
        }
    }
}
