//! Mesh output for hex terrain
//!
//! Generates engine-agnostic mesh data from triangulated hex grids.

mod builder;
mod colors;

pub use builder::MeshBuilder;
pub use colors::{
    ColorMapper, ElevationColorMapper, TerrainColor, UniformColorMapper, DEFAULT_CELL_COLOR,
};

use glam::Vec3;
use parry3d::math::Point;
use parry3d::shape::Triangle;

use crate::error::{HexMeshError, Result};

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
///
/// Triangles wind clockwise when viewed from above, which with a right-handed
/// cross product `(b - a) × (c - a)` yields upward normals on flat ground.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions (3D coordinates)
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals, averaged over the triangles sharing each vertex
    pub normals: Vec<[f32; 3]>,
    /// Vertex colors (RGBA)
    pub colors: Vec<[f32; 4]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Recompute per-vertex normals from the triangle soup
    ///
    /// Each vertex gets the normalized sum of the area-weighted normals of the
    /// triangles that reference it.
    pub fn recalculate_normals(&mut self) {
        let mut sums = vec![Vec3::ZERO; self.positions.len()];

        for [a, b, c] in self.triangles() {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            let (Some(pa), Some(pb), Some(pc)) = (
                self.positions.get(a),
                self.positions.get(b),
                self.positions.get(c),
            ) else {
                continue;
            };
            let (pa, pb, pc) = (Vec3::from(*pa), Vec3::from(*pb), Vec3::from(*pc));
            let face = (pb - pa).cross(pc - pa);
            sums[a] += face;
            sums[b] += face;
            sums[c] += face;
        }

        self.normals = sums
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
    }

    /// Check the buffer invariants renderers rely on
    ///
    /// # Errors
    ///
    /// Returns `InvalidMesh` if attribute lengths disagree, the index count is
    /// not a multiple of three, or any index is out of range
    pub fn validate(&self) -> Result<()> {
        let count = self.positions.len();
        if self.colors.len() != count {
            return Err(HexMeshError::InvalidMesh(format!(
                "{} colors for {} vertices",
                self.colors.len(),
                count
            )));
        }
        if self.normals.len() != count {
            return Err(HexMeshError::InvalidMesh(format!(
                "{} normals for {} vertices",
                self.normals.len(),
                count
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(HexMeshError::InvalidMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= count) {
            return Err(HexMeshError::InvalidMesh(format!(
                "index {} out of range for {} vertices",
                bad, count
            )));
        }
        Ok(())
    }

    /// The same triangle soup as collision shapes
    ///
    /// Physics consumers can feed these straight into a compound or query
    /// pipeline without a separate collision mesh. Triangles referencing a
    /// vertex that does not exist are skipped; use [`MeshData::validate`] to
    /// detect them.
    ///
    /// # Example
    ///
    /// ```
    /// use hex_terrain_mesh::*;
    ///
    /// let grid = HexGrid::new(2, 2, HexMetrics::default(), &FlatNoise).unwrap();
    /// let mesh = generate_mesh(&grid, &FlatNoise);
    ///
    /// let triangles = mesh.collision_triangles();
    /// assert_eq!(triangles.len(), mesh.triangle_count());
    /// ```
    pub fn collision_triangles(&self) -> Vec<Triangle> {
        let point = |i: u32| {
            self.positions
                .get(i as usize)
                .map(|&[x, y, z]| Point::new(x, y, z))
        };
        self.triangles()
            .filter_map(|[a, b, c]| Some(Triangle::new(point(a)?, point(b)?, point(c)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> MeshData {
        let mut mesh = MeshData {
            positions: vec![[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]],
            normals: vec![],
            colors: vec![[1.0; 4]; 3],
            indices: vec![0, 1, 2],
        };
        mesh.recalculate_normals();
        mesh
    }

    #[test]
    fn test_clockwise_from_above_faces_up() {
        let mesh = single_triangle();
        for normal in &mesh.normals {
            assert_eq!(*normal, [0.0, 1.0, 0.0]);
        }
    }

    #[test]
    fn test_validate_accepts_consistent_mesh() {
        let mesh = single_triangle();
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn test_validate_rejects_broken_buffers() {
        let mut mesh = single_triangle();
        mesh.indices.push(0);
        assert!(mesh.validate().is_err());

        let mut mesh = single_triangle();
        mesh.indices = vec![0, 1, 3];
        assert!(mesh.validate().is_err());

        let mut mesh = single_triangle();
        mesh.colors.pop();
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_collision_triangles_match_soup() {
        let mesh = single_triangle();
        let triangles = mesh.collision_triangles();
        assert_eq!(triangles.len(), 1);
        assert_eq!(triangles[0].b, Point::new(0.0, 0.0, 1.0));
        assert!((triangles[0].area() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_collision_triangles_skip_dangling_indices() {
        let mut mesh = single_triangle();
        mesh.indices.extend([0, 1, 7]);

        let triangles = mesh.collision_triangles();
        assert_eq!(triangles.len(), 1);
        assert!(mesh.validate().is_err());
    }
}
