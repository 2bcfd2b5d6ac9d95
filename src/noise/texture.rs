//! Bilinear, wrapping RGBA noise texture

use glam::Vec4;

use super::NoiseSource;
use crate::error::{HexMeshError, Result};

/// A grid of RGBA texels sampled with bilinear filtering and repeat wrapping
///
/// Coordinates are normalized: `(0, 0)` and `(1, 1)` address the same texel,
/// so one texture tiles over the whole map.
#[derive(Debug, Clone)]
pub struct NoiseTexture {
    width: usize,
    height: usize,
    texels: Vec<Vec4>,
}

impl NoiseTexture {
    /// Wrap existing texel data, stored row-major
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero or the texel count
    /// does not match `width * height`
    pub fn new(width: usize, height: usize, texels: Vec<Vec4>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HexMeshError::InvalidConfig(format!(
                "Noise texture dimensions must be non-zero (got {}x{})",
                width, height
            )));
        }
        if texels.len() != width * height {
            return Err(HexMeshError::InvalidConfig(format!(
                "Noise texture expects {} texels (got {})",
                width * height,
                texels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Fill a texture by sampling another source at each texel center
    pub fn bake<N: NoiseSource + ?Sized>(source: &N, width: usize, height: usize) -> Result<Self> {
        let mut texels = Vec::with_capacity(width * height);
        for j in 0..height {
            for i in 0..width {
                let u = (i as f32 + 0.5) / width as f32;
                let v = (j as f32 + 0.5) / height as f32;
                texels.push(source.sample(u, v));
            }
        }
        Self::new(width, height, texels)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn texel(&self, i: i64, j: i64) -> Vec4 {
        let x = i.rem_euclid(self.width as i64) as usize;
        let y = j.rem_euclid(self.height as i64) as usize;
        self.texels[y * self.width + x]
    }
}

impl NoiseSource for NoiseTexture {
    fn sample(&self, x: f32, z: f32) -> Vec4 {
        // Texel centers sit at half-integer positions.
        let px = x * self.width as f32 - 0.5;
        let pz = z * self.height as f32 - 0.5;
        let x0 = px.floor();
        let z0 = pz.floor();
        let tx = px - x0;
        let tz = pz - z0;
        let (i, j) = (x0 as i64, z0 as i64);

        let bottom = self.texel(i, j).lerp(self.texel(i + 1, j), tx);
        let top = self.texel(i, j + 1).lerp(self.texel(i + 1, j + 1), tx);
        bottom.lerp(top, tz)
    }
}
