//! Hex cell structure
//!
//! A cell is plain data: where it sits, how high it is and what color it has.
//! Adjacency lives in the grid, never in the cell.

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::HexMetrics;
use crate::coordinates::HexCoordinates;
use crate::direction::HexDirection;
use crate::geometry::EdgeType;
use crate::mesh::TerrainColor;

/// A single hexagonal terrain cell
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    /// Axial coordinates within the owning grid
    pub coordinates: HexCoordinates,

    /// World position of the cell center
    ///
    /// Y is `elevation * elevation_step` plus the per-cell elevation perturbation.
    pub position: Vec3,

    /// Integer elevation level
    pub elevation: i32,

    /// Vertex color used for the cell's solid region
    pub color: TerrainColor,
}

impl HexCell {
    pub fn new(coordinates: HexCoordinates, position: Vec3, elevation: i32, color: TerrainColor) -> Self {
        Self {
            coordinates,
            position,
            elevation,
            color,
        }
    }

    /// Edge type between this cell and another
    #[inline]
    pub fn edge_type(&self, other: &HexCell) -> EdgeType {
        EdgeType::between(self.elevation, other.elevation)
    }
}

/// Read-only view of a grid of cells and their adjacency
///
/// The triangulator walks `cells()` in order and asks for neighbors by index,
/// so any container that can answer these questions can be meshed. Cell
/// positions must have been laid out with the metrics `metrics()` returns.
pub trait HexCellSource {
    /// Metrics the cell positions were computed with
    fn metrics(&self) -> &HexMetrics;

    /// All cells, in triangulation order
    fn cells(&self) -> &[HexCell];

    /// Index of the neighbor of `cell` in `direction`, if any
    fn neighbor(&self, cell: usize, direction: HexDirection) -> Option<usize>;

    /// Edge type between `cell` and its neighbor in `direction`
    fn edge_type(&self, cell: usize, direction: HexDirection) -> Option<EdgeType> {
        let cells = self.cells();
        let neighbor = self.neighbor(cell, direction)?;
        Some(cells.get(cell)?.edge_type(cells.get(neighbor)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_edge_type() {
        let white = [1.0, 1.0, 1.0, 1.0];
        let low = HexCell::new(HexCoordinates::new(0, 0), Vec3::ZERO, 0, white);
        let mid = HexCell::new(HexCoordinates::new(1, 0), Vec3::ZERO, 1, white);
        let high = HexCell::new(HexCoordinates::new(2, 0), Vec3::ZERO, 4, white);

        assert_eq!(low.edge_type(&low), EdgeType::Flat);
        assert_eq!(low.edge_type(&mid), EdgeType::Slope);
        assert_eq!(mid.edge_type(&high), EdgeType::Cliff);
    }
}
