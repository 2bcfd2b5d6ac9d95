//! Rectangular hex grid
//!
//! Cells live in a flat arena in row-major order; adjacency is a table of
//! indices, so cells never hold references to each other.

use glam::Vec3;
use tracing::debug;

use crate::cell::{HexCell, HexCellSource};
use crate::config::HexMetrics;
use crate::coordinates::HexCoordinates;
use crate::direction::HexDirection;
use crate::error::{HexMeshError, Result};
use crate::mesh::{ColorMapper, TerrainColor, DEFAULT_CELL_COLOR};
use crate::noise::NoiseSource;
use crate::perturb::Perturbation;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// A `width` x `height` grid of hex cells laid out in offset rows
///
/// Odd rows are shifted half a cell to the right. Cell `(x, z)` has index
/// `x + z * width`.
///
/// # Example
///
/// ```
/// use hex_terrain_mesh::*;
///
/// let metrics = HexMetrics::default();
/// let mut grid = HexGrid::new(4, 4, metrics, &FlatNoise).unwrap();
///
/// let index = grid.index_of(1, 2).unwrap();
/// grid.set_elevation(index, 2, &FlatNoise).unwrap();
/// assert_eq!(grid.cell(index).unwrap().elevation, 2);
/// ```
#[derive(Clone)]
pub struct HexGrid {
    width: usize,
    height: usize,
    metrics: HexMetrics,
    cells: Vec<HexCell>,
    neighbors: Vec<[Option<usize>; 6]>,

    #[cfg(feature = "spatial-index")]
    spatial_index: SpatialIndex,
}

impl HexGrid {
    /// Create a grid of flat cells with the default white color
    ///
    /// # Arguments
    ///
    /// * `width` - Cells per row
    /// * `height` - Number of rows
    /// * `metrics` - Geometry shared by layout and triangulation
    /// * `noise` - Source for the per-cell elevation perturbation
    ///
    /// # Performance
    ///
    /// O(n log n) with `spatial-index` (KD-tree build), O(n) otherwise.
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrid` if either dimension is zero
    pub fn new(width: usize, height: usize, metrics: HexMetrics, noise: &dyn NoiseSource) -> Result<Self> {
        Self::with_color(width, height, metrics, noise, DEFAULT_CELL_COLOR)
    }

    /// Create a grid of flat cells with the given color
    ///
    /// # Errors
    ///
    /// Returns `InvalidGrid` if either dimension is zero
    pub fn with_color(
        width: usize,
        height: usize,
        metrics: HexMetrics,
        noise: &dyn NoiseSource,
        color: TerrainColor,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(HexMeshError::InvalidGrid(format!(
                "Grid dimensions must be non-zero (got {}x{})",
                width, height
            )));
        }

        let perturbation = Perturbation::new(&metrics, noise);
        let mut cells = Vec::with_capacity(width * height);
        for z in 0..height {
            for x in 0..width {
                let center = cell_center(&metrics, x, z);
                let position = elevated(&perturbation, center, 0);
                let coordinates = HexCoordinates::from_offset(x as i32, z as i32);
                cells.push(HexCell::new(coordinates, position, 0, color));
            }
        }

        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<Vec3> = cells.iter().map(|c| c.position).collect();
            SpatialIndex::new(&centers)
        };

        let mut grid = Self {
            width,
            height,
            metrics,
            cells,
            neighbors: vec![[None; 6]; width * height],
            #[cfg(feature = "spatial-index")]
            spatial_index,
        };
        grid.connect_neighbors();

        debug!(width, height, cells = grid.cells.len(), "created hex grid");
        Ok(grid)
    }

    /// Link every cell to the neighbors already created before it
    ///
    /// Links are mirrored, so looking back W, SW and SE covers all six directions.
    fn connect_neighbors(&mut self) {
        let width = self.width;
        for z in 0..self.height {
            for x in 0..width {
                let i = x + z * width;
                if x > 0 {
                    self.set_neighbor(i, HexDirection::W, i - 1);
                }
                if z == 0 {
                    continue;
                }
                if z % 2 == 0 {
                    self.set_neighbor(i, HexDirection::SE, i - width);
                    if x > 0 {
                        self.set_neighbor(i, HexDirection::SW, i - width - 1);
                    }
                } else {
                    self.set_neighbor(i, HexDirection::SW, i - width);
                    if x < width - 1 {
                        self.set_neighbor(i, HexDirection::SE, i - width + 1);
                    }
                }
            }
        }
    }

    fn set_neighbor(&mut self, cell: usize, direction: HexDirection, other: usize) {
        self.neighbors[cell][direction.index()] = Some(other);
        self.neighbors[other][direction.opposite().index()] = Some(cell);
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Get a cell by index
    #[inline]
    pub fn cell(&self, index: usize) -> Option<&HexCell> {
        self.cells.get(index)
    }

    /// Index of the cell at offset column `x`, row `z`
    pub fn index_of(&self, x: usize, z: usize) -> Option<usize> {
        (x < self.width && z < self.height).then(|| x + z * self.width)
    }

    /// Index of the cell with the given axial coordinates
    pub fn index_of_coordinates(&self, coordinates: HexCoordinates) -> Option<usize> {
        let (x, z) = coordinates.to_offset();
        if x < 0 || z < 0 {
            return None;
        }
        self.index_of(x as usize, z as usize)
    }

    /// Neighbors of a cell with the direction each one lies in
    ///
    /// Border cells yield fewer than six entries; an out-of-range index
    /// yields none.
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = (HexDirection, usize)> + '_ {
        self.neighbors
            .get(index)
            .into_iter()
            .flat_map(|links| {
                HexDirection::ALL
                    .into_iter()
                    .filter_map(move |d| links[d.index()].map(|n| (d, n)))
            })
    }

    /// Change a cell's elevation and recompute its height
    ///
    /// The height uses the grid's own metrics. The mesh is not updated;
    /// triangulate the grid again afterwards, with the same noise source.
    ///
    /// # Arguments
    ///
    /// * `index` - Cell index (`x + z * width`)
    /// * `elevation` - New elevation level
    /// * `noise` - Source for the elevation perturbation
    ///
    /// # Example
    ///
    /// ```
    /// use hex_terrain_mesh::*;
    ///
    /// let mut grid = HexGrid::new(3, 3, HexMetrics::default(), &FlatNoise).unwrap();
    /// grid.set_elevation(4, 2, &FlatNoise).unwrap();
    ///
    /// assert_eq!(grid.cell(4).unwrap().position.y, 6.0);
    /// assert!(grid.set_elevation(9, 1, &FlatNoise).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if `index` is out of range
    pub fn set_elevation(&mut self, index: usize, elevation: i32, noise: &dyn NoiseSource) -> Result<()> {
        let perturbation = Perturbation::new(&self.metrics, noise);
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(HexMeshError::CellNotFound(index))?;
        cell.elevation = elevation;
        cell.position = elevated(&perturbation, cell.position, elevation);
        Ok(())
    }

    /// Change a cell's color
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if `index` is out of range
    pub fn set_color(&mut self, index: usize, color: TerrainColor) -> Result<()> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(HexMeshError::CellNotFound(index))?;
        cell.color = color;
        Ok(())
    }

    /// Recolor every cell from its elevation
    ///
    /// # Example
    ///
    /// ```
    /// use hex_terrain_mesh::*;
    ///
    /// let mut grid = HexGrid::new(2, 2, HexMetrics::default(), &FlatNoise).unwrap();
    /// grid.apply_colors(&UniformColorMapper([0.2, 0.6, 0.2, 1.0]));
    /// assert_eq!(grid.cell(3).unwrap().color, [0.2, 0.6, 0.2, 1.0]);
    /// ```
    pub fn apply_colors<C: ColorMapper + ?Sized>(&mut self, mapper: &C) {
        for cell in &mut self.cells {
            cell.color = mapper.map_color(cell.elevation);
        }
    }

    /// Find the cell covering a world position (requires spatial-index feature)
    ///
    /// Positions outside the grid resolve to the nearest border cell.
    ///
    /// # Performance
    ///
    /// O(log n) KD-tree lookup.
    ///
    /// # Example
    ///
    /// ```
    /// use hex_terrain_mesh::*;
    ///
    /// let grid = HexGrid::new(4, 4, HexMetrics::default(), &FlatNoise).unwrap();
    /// let center = grid.cell(5).unwrap().position;
    /// assert_eq!(grid.find_cell_at(center + Vec3::new(1.0, 0.0, 1.0)), 5);
    /// ```
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: Vec3) -> usize {
        self.spatial_index.find_nearest(position)
    }
}

impl HexCellSource for HexGrid {
    #[inline]
    fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }

    #[inline]
    fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    #[inline]
    fn neighbor(&self, cell: usize, direction: HexDirection) -> Option<usize> {
        self.neighbors.get(cell)?[direction.index()]
    }
}

/// World XZ position of the cell at offset `(x, z)`, at height zero
fn cell_center(metrics: &HexMetrics, x: usize, z: usize) -> Vec3 {
    let column = x as f32 + z as f32 * 0.5 - (z / 2) as f32;
    Vec3::new(
        column * metrics.inner_radius() * 2.0,
        0.0,
        z as f32 * metrics.outer_radius * 1.5,
    )
}

/// `position` moved to the perturbed height of `elevation`
fn elevated(perturbation: &Perturbation<'_>, position: Vec3, elevation: i32) -> Vec3 {
    let height = perturbation.metrics().elevation_height(elevation);
    position.with_y(height + perturbation.elevation_offset(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::ElevationColorMapper;
    use crate::noise::{FlatNoise, PerlinNoise};

    #[test]
    fn test_rejects_empty_grid() {
        assert!(HexGrid::new(0, 3, HexMetrics::default(), &FlatNoise).is_err());
        assert!(HexGrid::new(3, 0, HexMetrics::default(), &FlatNoise).is_err());
    }

    #[test]
    fn test_neighbors_are_mirrored() {
        let grid = HexGrid::new(5, 4, HexMetrics::default(), &FlatNoise).unwrap();
        for index in 0..grid.cell_count() {
            for (direction, neighbor) in grid.neighbors(index) {
                assert_eq!(grid.neighbor(neighbor, direction.opposite()), Some(index));
            }
        }
    }

    #[test]
    fn test_neighbors_match_axial_steps() {
        let grid = HexGrid::new(5, 5, HexMetrics::default(), &FlatNoise).unwrap();
        for index in 0..grid.cell_count() {
            let coords = grid.cell(index).unwrap().coordinates;
            for direction in HexDirection::ALL {
                let expected = grid.index_of_coordinates(coords.step(direction));
                assert_eq!(grid.neighbor(index, direction), expected);
            }
        }
    }

    #[test]
    fn test_interior_cell_has_six_neighbors() {
        let grid = HexGrid::new(3, 3, HexMetrics::default(), &FlatNoise).unwrap();
        let center = grid.index_of(1, 1).unwrap();
        assert_eq!(grid.neighbors(center).count(), 6);
        assert_eq!(grid.neighbors(0).count(), 2);
    }

    #[test]
    fn test_cell_positions() {
        let metrics = HexMetrics::default();
        let grid = HexGrid::new(3, 3, metrics, &FlatNoise).unwrap();

        let spacing = metrics.inner_radius() * 2.0;
        let origin = grid.cell(0).unwrap().position;
        let east = grid.cell(1).unwrap().position;
        let row_one = grid.cell(grid.index_of(0, 1).unwrap()).unwrap().position;

        assert_eq!(origin, Vec3::ZERO);
        assert!((east.x - spacing).abs() < 1e-4);
        assert!((row_one.x - spacing * 0.5).abs() < 1e-4);
        assert!((row_one.z - 15.0).abs() < 1e-4);

        for index in 0..grid.cell_count() {
            for (_, neighbor) in grid.neighbors(index) {
                let a = grid.cell(index).unwrap().position;
                let b = grid.cell(neighbor).unwrap().position;
                assert!((a.distance(b) - spacing).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_set_elevation_updates_height() {
        let metrics = HexMetrics::default();
        let mut grid = HexGrid::new(2, 2, metrics, &FlatNoise).unwrap();

        grid.set_elevation(3, 2, &FlatNoise).unwrap();
        let cell = grid.cell(3).unwrap();
        assert_eq!(cell.elevation, 2);
        assert_eq!(cell.position.y, 6.0);

        assert_eq!(
            grid.set_elevation(4, 1, &FlatNoise),
            Err(HexMeshError::CellNotFound(4))
        );
    }

    #[test]
    fn test_elevation_perturbation_is_bounded() {
        let metrics = HexMetrics::default();
        let noise = PerlinNoise::new(4);
        let mut grid = HexGrid::new(4, 4, metrics, &noise).unwrap();

        for index in 0..grid.cell_count() {
            grid.set_elevation(index, 1, &noise).unwrap();
            let y = grid.cell(index).unwrap().position.y;
            assert!((y - 3.0).abs() <= metrics.elevation_perturb_strength);
        }
    }

    #[test]
    fn test_colors() {
        let mut grid = HexGrid::new(2, 1, HexMetrics::default(), &FlatNoise).unwrap();
        assert_eq!(grid.cell(0).unwrap().color, DEFAULT_CELL_COLOR);

        grid.set_color(1, [0.0, 1.0, 0.0, 1.0]).unwrap();
        assert_eq!(grid.cell(1).unwrap().color, [0.0, 1.0, 0.0, 1.0]);
        assert!(grid.set_color(2, DEFAULT_CELL_COLOR).is_err());

        grid.set_elevation(0, 4, &FlatNoise).unwrap();
        grid.apply_colors(&ElevationColorMapper::default());
        assert_eq!(grid.cell(0).unwrap().color, [0.5, 0.5, 0.5, 1.0]);
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at() {
        let metrics = HexMetrics::default();
        let grid = HexGrid::new(4, 4, metrics, &FlatNoise).unwrap();

        for index in 0..grid.cell_count() {
            let center = grid.cell(index).unwrap().position;
            let nudged = center + Vec3::new(2.0, 0.0, -1.5);
            assert_eq!(grid.find_cell_at(nudged), index);
        }
    }
}
