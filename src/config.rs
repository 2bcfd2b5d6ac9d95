//! Hex grid metrics and builder
//!
//! All geometric constants used by the triangulation live in a single
//! [`HexMetrics`] value so grids of different scales can coexist.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{HexMeshError, Result};

/// Ratio between the inner and outer radius of a regular hexagon (√3 / 2)
pub const INNER_TO_OUTER: f32 = 0.866025404;

/// Geometric constants for hex terrain triangulation
///
/// Only the primary values are stored; blend factor, terrace step counts and
/// step sizes are derived on demand so they can never disagree.
///
/// # Example
///
/// ```rust
/// use hex_terrain_mesh::*;
///
/// let metrics = HexMetricsBuilder::new()
///     .outer_radius(10.0).unwrap()
///     .terraces_per_slope(2).unwrap()
///     .noise_seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(metrics.terrace_steps(), 5);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HexMetrics {
    /// Distance from a cell center to each of its corners
    pub outer_radius: f32,

    /// Fraction of the cell that is never blended with neighbors
    pub solid_factor: f32,

    /// World-space height of one elevation level
    pub elevation_step: f32,

    /// Number of flat treads on a one-level slope
    pub terraces_per_slope: u32,

    /// Maximum horizontal displacement applied to perturbed vertices
    pub cell_perturb_strength: f32,

    /// Maximum vertical displacement applied to a cell's center height
    pub elevation_perturb_strength: f32,

    /// Scale from world XZ to noise sample coordinates
    ///
    /// Small values stretch one noise period over many cells.
    pub noise_scale: f32,

    /// Seed for the default noise source
    pub noise_seed: u32,
}

impl HexMetrics {
    /// Distance from a cell center to the middle of each edge
    #[inline]
    pub fn inner_radius(&self) -> f32 {
        self.outer_radius * INNER_TO_OUTER
    }

    /// Fraction of the cell that belongs to the blend region
    #[inline]
    pub fn blend_factor(&self) -> f32 {
        1.0 - self.solid_factor
    }

    /// Number of interpolation steps across a terraced slope
    #[inline]
    pub fn terrace_steps(&self) -> u32 {
        self.terraces_per_slope * 2 + 1
    }

    /// Horizontal fraction covered by a single terrace step
    #[inline]
    pub fn horizontal_terrace_step_size(&self) -> f32 {
        1.0 / self.terrace_steps() as f32
    }

    /// Vertical fraction covered by a single terrace riser
    #[inline]
    pub fn vertical_terrace_step_size(&self) -> f32 {
        1.0 / (self.terraces_per_slope + 1) as f32
    }
}

impl Default for HexMetrics {
    fn default() -> Self {
        Self {
            outer_radius: 10.0,
            solid_factor: 0.8,
            elevation_step: 3.0,
            terraces_per_slope: 2,
            cell_perturb_strength: 4.0,
            elevation_perturb_strength: 1.5,
            noise_scale: 0.003,
            noise_seed: 0,
        }
    }
}

/// Builder for creating [`HexMetrics`] with validation
///
/// # Example
///
/// ```rust
/// use hex_terrain_mesh::*;
///
/// // Flat, unperturbed geometry
/// let metrics = HexMetricsBuilder::new()
///     .cell_perturb_strength(0.0).unwrap()
///     .elevation_perturb_strength(0.0).unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(metrics.cell_perturb_strength, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct HexMetricsBuilder {
    outer_radius: f32,
    solid_factor: f32,
    elevation_step: f32,
    terraces_per_slope: u32,
    cell_perturb_strength: f32,
    elevation_perturb_strength: f32,
    noise_scale: f32,
    noise_seed: Option<u32>,
}

impl HexMetricsBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - outer_radius: 10.0
    /// - solid_factor: 0.8
    /// - elevation_step: 3.0
    /// - terraces_per_slope: 2 (5 terrace steps)
    /// - cell_perturb_strength: 4.0
    /// - elevation_perturb_strength: 1.5
    /// - noise_scale: 0.003
    /// - noise_seed: Random (generated from thread_rng)
    pub fn new() -> Self {
        let defaults = HexMetrics::default();
        Self {
            outer_radius: defaults.outer_radius,
            solid_factor: defaults.solid_factor,
            elevation_step: defaults.elevation_step,
            terraces_per_slope: defaults.terraces_per_slope,
            cell_perturb_strength: defaults.cell_perturb_strength,
            elevation_perturb_strength: defaults.elevation_perturb_strength,
            noise_scale: defaults.noise_scale,
            noise_seed: None,
        }
    }

    /// Set the outer radius of every cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius <= 0.0
    pub fn outer_radius(mut self, radius: f32) -> Result<Self> {
        if radius <= 0.0 {
            return Err(HexMeshError::InvalidConfig(format!(
                "Outer radius must be positive (got {})",
                radius
            )));
        }
        self.outer_radius = radius;
        Ok(self)
    }

    /// Set the solid (unblended) fraction of each cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless 0.0 < factor <= 1.0
    pub fn solid_factor(mut self, factor: f32) -> Result<Self> {
        if !(factor > 0.0 && factor <= 1.0) {
            return Err(HexMeshError::InvalidConfig(format!(
                "Solid factor must be in (0, 1] (got {})",
                factor
            )));
        }
        self.solid_factor = factor;
        Ok(self)
    }

    /// Set the world-space height of one elevation level
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if step <= 0.0
    pub fn elevation_step(mut self, step: f32) -> Result<Self> {
        if step <= 0.0 {
            return Err(HexMeshError::InvalidConfig(format!(
                "Elevation step must be positive (got {})",
                step
            )));
        }
        self.elevation_step = step;
        Ok(self)
    }

    /// Set the number of flat treads per one-level slope
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if terraces is 0
    pub fn terraces_per_slope(mut self, terraces: u32) -> Result<Self> {
        if terraces == 0 {
            return Err(HexMeshError::InvalidConfig(
                "Terraces per slope must be at least 1".to_string(),
            ));
        }
        self.terraces_per_slope = terraces;
        Ok(self)
    }

    /// Set the horizontal perturbation strength
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if strength is negative
    pub fn cell_perturb_strength(mut self, strength: f32) -> Result<Self> {
        if strength < 0.0 {
            return Err(HexMeshError::InvalidConfig(format!(
                "Cell perturb strength must be >= 0 (got {})",
                strength
            )));
        }
        self.cell_perturb_strength = strength;
        Ok(self)
    }

    /// Set the vertical perturbation strength for cell centers
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if strength is negative
    pub fn elevation_perturb_strength(mut self, strength: f32) -> Result<Self> {
        if strength < 0.0 {
            return Err(HexMeshError::InvalidConfig(format!(
                "Elevation perturb strength must be >= 0 (got {})",
                strength
            )));
        }
        self.elevation_perturb_strength = strength;
        Ok(self)
    }

    /// Set the world-to-noise coordinate scale
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if scale <= 0.0
    pub fn noise_scale(mut self, scale: f32) -> Result<Self> {
        if scale <= 0.0 {
            return Err(HexMeshError::InvalidConfig(format!(
                "Noise scale must be positive (got {})",
                scale
            )));
        }
        self.noise_scale = scale;
        Ok(self)
    }

    /// Set the seed used for the default noise source
    pub fn noise_seed(mut self, seed: u32) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    /// Build the metrics
    ///
    /// If no noise seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<HexMetrics> {
        let noise_seed = self.noise_seed.unwrap_or_else(rand::random);

        Ok(HexMetrics {
            outer_radius: self.outer_radius,
            solid_factor: self.solid_factor,
            elevation_step: self.elevation_step,
            terraces_per_slope: self.terraces_per_slope,
            cell_perturb_strength: self.cell_perturb_strength,
            elevation_perturb_strength: self.elevation_perturb_strength,
            noise_scale: self.noise_scale,
            noise_seed,
        })
    }
}

impl Default for HexMetricsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
