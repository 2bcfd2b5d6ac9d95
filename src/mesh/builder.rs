//! Append-only triangle buffer
//!
//! Vertices are never shared between primitives: every triangle and quad
//! pushes its own corners, so per-vertex colors stay sharp along cell edges.
//! A vertex's index is the buffer length at the moment it is pushed.

use glam::Vec3;

use super::{MeshData, TerrainColor};
use crate::perturb::Perturbation;

/// Collects positions, colors and triangle indices for one mesh rebuild
#[derive(Debug, Clone)]
pub struct MeshBuilder<'a> {
    perturbation: Perturbation<'a>,
    positions: Vec<Vec3>,
    colors: Vec<TerrainColor>,
    indices: Vec<u32>,
}

impl<'a> MeshBuilder<'a> {
    pub fn new(perturbation: Perturbation<'a>) -> Self {
        Self {
            perturbation,
            positions: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
        }
    }

    #[inline]
    pub fn perturbation(&self) -> Perturbation<'a> {
        self.perturbation
    }

    /// Perturb a position the same way `add_triangle` and `add_quad` do
    #[inline]
    pub fn perturb(&self, position: Vec3) -> Vec3 {
        self.perturbation.apply(position)
    }

    /// Drop all buffered geometry, keeping allocations for the next rebuild
    pub fn clear(&mut self) {
        self.positions.clear();
        self.colors.clear();
        self.indices.clear();
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[TerrainColor] {
        &self.colors
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    fn next_index(&self) -> u32 {
        self.positions.len() as u32
    }

    /// Add a triangle, perturbing every corner
    pub fn add_triangle(&mut self, v1: Vec3, v2: Vec3, v3: Vec3) {
        let (v1, v2, v3) = (self.perturb(v1), self.perturb(v2), self.perturb(v3));
        self.add_triangle_unperturbed(v1, v2, v3);
    }

    /// Add a triangle exactly as given
    pub fn add_triangle_unperturbed(&mut self, v1: Vec3, v2: Vec3, v3: Vec3) {
        let index = self.next_index();
        self.positions.extend([v1, v2, v3]);
        self.indices.extend([index, index + 1, index + 2]);
    }

    /// Color the last triangle uniformly
    pub fn add_triangle_color(&mut self, color: TerrainColor) {
        self.colors.extend([color, color, color]);
    }

    /// Color the last triangle per corner
    pub fn add_triangle_colors(&mut self, c1: TerrainColor, c2: TerrainColor, c3: TerrainColor) {
        self.colors.extend([c1, c2, c3]);
    }

    /// Add a quad with near edge `v1 v2` and far edge `v3 v4`, perturbing every corner
    pub fn add_quad(&mut self, v1: Vec3, v2: Vec3, v3: Vec3, v4: Vec3) {
        let (v1, v2) = (self.perturb(v1), self.perturb(v2));
        let (v3, v4) = (self.perturb(v3), self.perturb(v4));
        self.add_quad_unperturbed(v1, v2, v3, v4);
    }

    /// Add a quad exactly as given, as triangles `(v1, v3, v2)` and `(v2, v3, v4)`
    pub fn add_quad_unperturbed(&mut self, v1: Vec3, v2: Vec3, v3: Vec3, v4: Vec3) {
        let index = self.next_index();
        self.positions.extend([v1, v2, v3, v4]);
        self.indices
            .extend([index, index + 2, index + 1, index + 1, index + 2, index + 3]);
    }

    /// Color the last quad with `c1` on its near edge and `c2` on its far edge
    pub fn add_quad_color2(&mut self, c1: TerrainColor, c2: TerrainColor) {
        self.colors.extend([c1, c1, c2, c2]);
    }

    /// Color the last quad per corner
    pub fn add_quad_colors(
        &mut self,
        c1: TerrainColor,
        c2: TerrainColor,
        c3: TerrainColor,
        c4: TerrainColor,
    ) {
        self.colors.extend([c1, c2, c3, c4]);
    }

    /// Move another builder's geometry to the end of this one
    ///
    /// Indices of the appended triangles are offset by the current vertex
    /// count, so builders filled independently merge into one valid mesh.
    pub fn append(&mut self, mut other: MeshBuilder<'_>) {
        let offset = self.next_index();
        self.positions.append(&mut other.positions);
        self.colors.append(&mut other.colors);
        self.indices
            .extend(other.indices.into_iter().map(|index| index + offset));
    }

    /// Finalize the buffers into renderable mesh data with recomputed normals
    pub fn build(&self) -> MeshData {
        let mut mesh = MeshData {
            positions: self.positions.iter().map(|p| p.to_array()).collect(),
            normals: Vec::new(),
            colors: self.colors.clone(),
            indices: self.indices.clone(),
        };
        mesh.recalculate_normals();
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HexMetrics;
    use crate::noise::FlatNoise;

    const RED: TerrainColor = [1.0, 0.0, 0.0, 1.0];
    const BLUE: TerrainColor = [0.0, 0.0, 1.0, 1.0];

    #[test]
    fn test_triangle_indices_follow_append_order() {
        let metrics = HexMetrics::default();
        let mut builder = MeshBuilder::new(Perturbation::new(&metrics, &FlatNoise));

        builder.add_triangle(Vec3::ZERO, Vec3::Z, Vec3::X);
        builder.add_triangle_color(RED);
        builder.add_triangle_unperturbed(Vec3::ZERO, Vec3::Z, Vec3::X);
        builder.add_triangle_colors(RED, BLUE, RED);

        assert_eq!(builder.indices(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(builder.colors().len(), builder.vertex_count());
    }

    #[test]
    fn test_quad_winding() {
        let metrics = HexMetrics::default();
        let mut builder = MeshBuilder::new(Perturbation::new(&metrics, &FlatNoise));

        builder.add_quad(Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::new(1.0, 0.0, 1.0));
        builder.add_quad_color2(RED, BLUE);

        assert_eq!(builder.indices(), &[0, 2, 1, 1, 2, 3]);
        assert_eq!(builder.colors(), &[RED, RED, BLUE, BLUE]);
        assert_eq!(builder.triangle_count(), 2);
    }

    #[test]
    fn test_append_offsets_indices() {
        let metrics = HexMetrics::default();
        let perturbation = Perturbation::new(&metrics, &FlatNoise);
        let mut first = MeshBuilder::new(perturbation);
        first.add_triangle(Vec3::ZERO, Vec3::Z, Vec3::X);
        first.add_triangle_color(RED);

        let mut second = MeshBuilder::new(perturbation);
        second.add_quad(Vec3::ZERO, Vec3::X, Vec3::Z, Vec3::ONE);
        second.add_quad_colors(RED, RED, BLUE, BLUE);

        first.append(second);
        assert_eq!(first.vertex_count(), 7);
        assert_eq!(first.indices(), &[0, 1, 2, 3, 5, 4, 4, 5, 6]);
    }

    #[test]
    fn test_clear_resets_buffers() {
        let metrics = HexMetrics::default();
        let mut builder = MeshBuilder::new(Perturbation::new(&metrics, &FlatNoise));
        builder.add_triangle(Vec3::ZERO, Vec3::Z, Vec3::X);
        builder.add_triangle_color(RED);

        builder.clear();
        assert!(builder.is_empty());
        assert_eq!(builder.triangle_count(), 0);
        assert!(builder.build().validate().is_ok());
    }
}
