//! Spatial indexing for fast position-to-cell lookups
//!
//! This module is only available with the `spatial-index` feature.
//!
//! Hexagons tile the plane as the Voronoi diagram of their centers, so the
//! nearest cell center in XZ is the cell containing a point.

#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;
#[cfg(feature = "spatial-index")]
use glam::Vec3;

/// KD-tree over cell centers projected onto the XZ plane
///
/// Converts world positions into cell indices for picking, placement and
/// raycast hits.
///
/// # Performance
///
/// - Construction: O(n log n), done once per grid
/// - Query: O(log n)
/// - Memory: ~16 bytes per cell
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: ImmutableKdTree<f32, usize, 2, 32>,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from cell centers
    ///
    /// Heights are ignored; elevation never changes which cell covers a point.
    ///
    /// # Arguments
    ///
    /// * `centers` - Cell center positions, indexed like the grid's cells
    ///
    /// # Example
    ///
    /// ```
    /// use hex_terrain_mesh::*;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let centers = vec![
    ///     Vec3::new(0.0, 0.0, 0.0),
    ///     Vec3::new(17.3, 3.0, 0.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&centers);
    /// assert_eq!(index.find_nearest(Vec3::new(15.0, 0.0, 1.0)), 1);
    /// # }
    /// ```
    pub fn new(centers: &[Vec3]) -> Self {
        let points: Vec<[f32; 2]> = centers.iter().map(|c| [c.x, c.z]).collect();

        Self {
            tree: ImmutableKdTree::new_from_slice(&points),
        }
    }

    /// Index of the cell center nearest to `position` in XZ
    ///
    /// # Arguments
    ///
    /// * `position` - World position; its Y is ignored
    ///
    /// # Returns
    ///
    /// Index of the nearest center, which for a hex layout is the cell
    /// containing the position
    pub fn find_nearest(&self, position: Vec3) -> usize {
        let query = [position.x, position.z];
        let result = self.tree.nearest_one::<SquaredEuclidean>(&query);
        result.item as usize
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_ignores_height() {
        let centers = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(17.3, 9.0, 0.0),
            Vec3::new(8.66, -3.0, 15.0),
        ];

        let index = SpatialIndex::new(&centers);

        assert_eq!(index.find_nearest(Vec3::new(1.0, 50.0, -1.0)), 0);
        assert_eq!(index.find_nearest(Vec3::new(16.0, 0.0, 1.0)), 1);
        assert_eq!(index.find_nearest(Vec3::new(9.0, 0.0, 13.0)), 2);
    }
}
