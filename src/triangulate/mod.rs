//! Hex terrain triangulation
//!
//! Every cell contributes a solid fan per direction. Bridges are emitted only
//! for NE, E and SE and corners only for NE and E, so every shared edge and
//! every triple point is built exactly once, by the cell that sees it first.
//!
//! ```text
//!            corner (NE, E only)
//!          /
//!   fan ── bridge (NE, E, SE) ── neighbor fan
//! ```

mod corner;

pub use corner::CornerCase;

use glam::Vec3;
use tracing::debug;

use crate::cell::{HexCell, HexCellSource};
use crate::config::HexMetrics;
use crate::direction::HexDirection;
use crate::edge::EdgeVertices;
use crate::geometry::EdgeType;
use crate::mesh::{MeshBuilder, MeshData, TerrainColor};
use crate::noise::NoiseSource;
use crate::perturb::Perturbation;

use corner::{lowest_first, CornerVertex};

/// Triangulate a whole grid into a fresh mesh
///
/// Geometry is laid out with the grid's own metrics, so cell positions and
/// corner offsets always agree. Normals are recomputed before returning.
///
/// # Arguments
///
/// * `grid` - Cells and adjacency to triangulate, in cell order
/// * `noise` - Source used to perturb vertices; pass the same source used to
///   set cell elevations
///
/// # Performance
///
/// O(n) in the number of cells. Vertices are never shared, so a flat cell
/// with all six neighbors costs about 30 triangles and a fully terraced one
/// a few hundred.
///
/// # Example
///
/// ```
/// use hex_terrain_mesh::*;
///
/// let metrics = HexMetrics::default();
/// let noise = PerlinNoise::new(metrics.noise_seed);
/// let mut grid = HexGrid::new(4, 4, metrics, &noise).unwrap();
/// grid.set_elevation(5, 1, &noise).unwrap();
///
/// let mesh = generate_mesh(&grid, &noise);
/// assert!(mesh.validate().is_ok());
/// println!("Generated {} triangles", mesh.triangle_count());
/// ```
pub fn generate_mesh<G>(grid: &G, noise: &dyn NoiseSource) -> MeshData
where
    G: HexCellSource + ?Sized,
{
    let mut builder = MeshBuilder::new(Perturbation::new(grid.metrics(), noise));
    triangulate_into(&mut builder, grid);
    builder.build()
}

/// Rebuild a grid's geometry into an existing builder
///
/// The builder is cleared first; there is no incremental update. Reusing one
/// builder across rebuilds keeps its allocations.
///
/// # Arguments
///
/// * `builder` - Destination buffers; must perturb with the grid's metrics
/// * `grid` - Cells and adjacency to triangulate
///
/// # Panics
///
/// In debug builds, if the builder's metrics differ from `grid.metrics()`.
///
/// # Example
///
/// ```
/// use hex_terrain_mesh::*;
///
/// let grid = HexGrid::new(3, 3, HexMetrics::default(), &FlatNoise).unwrap();
/// let mut builder = MeshBuilder::new(Perturbation::new(grid.metrics(), &FlatNoise));
///
/// triangulate_into(&mut builder, &grid);
/// let first = builder.triangle_count();
/// triangulate_into(&mut builder, &grid);
/// assert_eq!(builder.triangle_count(), first);
/// ```
pub fn triangulate_into<G>(builder: &mut MeshBuilder<'_>, grid: &G)
where
    G: HexCellSource + ?Sized,
{
    debug_assert_eq!(
        builder.perturbation().metrics(),
        grid.metrics(),
        "builder metrics differ from the grid's"
    );
    builder.clear();
    let cell_count = grid.cells().len();
    {
        let mut triangulator = CellTriangulator::new(grid, builder);
        for index in 0..cell_count {
            triangulator.triangulate_cell(index);
        }
    }
    debug!(
        cells = cell_count,
        vertices = builder.vertex_count(),
        triangles = builder.triangle_count(),
        "triangulated hex grid"
    );
}

/// Cells handed to each rayon task
#[cfg(feature = "parallel")]
const PARALLEL_CHUNK_CELLS: usize = 64;

/// Triangulate a grid across the rayon thread pool (requires parallel feature)
///
/// Each task fills a private builder for a contiguous run of cells; the parts
/// are concatenated in cell order, so the result is identical to
/// [`generate_mesh`].
///
/// # Performance
///
/// Worth it from a few thousand cells up; below that the merge and the
/// thread hand-off cost more than the triangulation itself.
#[cfg(feature = "parallel")]
pub fn generate_mesh_parallel<G>(grid: &G, noise: &dyn NoiseSource) -> MeshData
where
    G: HexCellSource + Sync + ?Sized,
{
    use rayon::prelude::*;

    let perturbation = Perturbation::new(grid.metrics(), noise);
    let cell_count = grid.cells().len();
    let chunk_count = cell_count.div_ceil(PARALLEL_CHUNK_CELLS);

    let parts: Vec<MeshBuilder<'_>> = (0..chunk_count)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * PARALLEL_CHUNK_CELLS;
            let end = (start + PARALLEL_CHUNK_CELLS).min(cell_count);
            let mut builder = MeshBuilder::new(perturbation);
            {
                let mut triangulator = CellTriangulator::new(grid, &mut builder);
                for index in start..end {
                    triangulator.triangulate_cell(index);
                }
            }
            builder
        })
        .collect();

    let mut builder = MeshBuilder::new(perturbation);
    for part in parts {
        builder.append(part);
    }
    debug!(
        cells = cell_count,
        chunks = chunk_count,
        triangles = builder.triangle_count(),
        "triangulated hex grid in parallel"
    );
    builder.build()
}

/// Walks cells of a grid and emits their geometry into a builder
pub(crate) struct CellTriangulator<'t, 'a, G: ?Sized> {
    grid: &'t G,
    builder: &'t mut MeshBuilder<'a>,
    metrics: &'a HexMetrics,
}

impl<'t, 'a, G> CellTriangulator<'t, 'a, G>
where
    G: HexCellSource + ?Sized,
{
    pub(crate) fn new(grid: &'t G, builder: &'t mut MeshBuilder<'a>) -> Self {
        let metrics = builder.perturbation().metrics();
        Self {
            grid,
            builder,
            metrics,
        }
    }

    pub(crate) fn triangulate_cell(&mut self, index: usize) {
        let Some(cell) = self.grid.cells().get(index) else {
            return;
        };
        for direction in HexDirection::ALL {
            self.triangulate_direction(direction, index, cell);
        }
    }

    fn triangulate_direction(&mut self, direction: HexDirection, index: usize, cell: &'t HexCell) {
        let center = cell.position;
        let edge = EdgeVertices::new(
            center + self.metrics.first_solid_corner(direction),
            center + self.metrics.second_solid_corner(direction),
        );
        self.triangulate_edge_fan(center, &edge, cell.color);

        if direction <= HexDirection::SE {
            self.triangulate_connection(direction, index, cell, &edge);
        }
    }

    fn triangulate_connection(
        &mut self,
        direction: HexDirection,
        index: usize,
        cell: &'t HexCell,
        e1: &EdgeVertices,
    ) {
        let cells = self.grid.cells();
        let Some(neighbor) = self.grid.neighbor(index, direction).and_then(|n| cells.get(n)) else {
            return;
        };

        let e2 = e1
            .translated(self.metrics.bridge(direction))
            .with_height(neighbor.position.y);

        if cell.edge_type(neighbor) == EdgeType::Slope {
            self.triangulate_edge_terraces(e1, cell, &e2, neighbor);
        } else {
            self.triangulate_edge_strip(e1, cell.color, &e2, neighbor.color);
        }

        if direction > HexDirection::E {
            return;
        }
        let Some(next_neighbor) = self
            .grid
            .neighbor(index, direction.next())
            .and_then(|n| cells.get(n))
        else {
            return;
        };

        let v5 = (e1.v4 + self.metrics.bridge(direction.next())).with_y(next_neighbor.position.y);
        let corners = [
            CornerVertex::new(e1.v4, cell),
            CornerVertex::new(e2.v4, neighbor),
            CornerVertex::new(v5, next_neighbor),
        ];
        let [bottom, left, right] = lowest_first(
            cell.elevation,
            neighbor.elevation,
            next_neighbor.elevation,
        )
        .map(|i| corners[i]);
        self.triangulate_corner(bottom, left, right);
    }

    /// Three triangles from the cell center to the subdivided solid edge
    fn triangulate_edge_fan(&mut self, center: Vec3, edge: &EdgeVertices, color: TerrainColor) {
        for (a, b) in [(edge.v1, edge.v2), (edge.v2, edge.v3), (edge.v3, edge.v4)] {
            self.builder.add_triangle(center, a, b);
            self.builder.add_triangle_color(color);
        }
    }

    /// Three quads between two parallel subdivided edges
    fn triangulate_edge_strip(
        &mut self,
        e1: &EdgeVertices,
        c1: TerrainColor,
        e2: &EdgeVertices,
        c2: TerrainColor,
    ) {
        self.builder.add_quad(e1.v1, e1.v2, e2.v1, e2.v2);
        self.builder.add_quad_color2(c1, c2);
        self.builder.add_quad(e1.v2, e1.v3, e2.v2, e2.v3);
        self.builder.add_quad_color2(c1, c2);
        self.builder.add_quad(e1.v3, e1.v4, e2.v3, e2.v4);
        self.builder.add_quad_color2(c1, c2);
    }

    /// One strip per terrace step; each strip starts where the previous ended
    fn triangulate_edge_terraces(
        &mut self,
        begin: &EdgeVertices,
        begin_cell: &HexCell,
        end: &EdgeVertices,
        end_cell: &HexCell,
    ) {
        let steps = self.metrics.terrace_steps();
        let mut e2 = EdgeVertices::terrace_lerp(begin, end, 1, self.metrics);
        let mut c2 = self
            .metrics
            .terrace_lerp_color(begin_cell.color, end_cell.color, 1);
        self.triangulate_edge_strip(begin, begin_cell.color, &e2, c2);

        for step in 2..steps {
            let (e1, c1) = (e2, c2);
            e2 = EdgeVertices::terrace_lerp(begin, end, step, self.metrics);
            c2 = self
                .metrics
                .terrace_lerp_color(begin_cell.color, end_cell.color, step);
            self.triangulate_edge_strip(&e1, c1, &e2, c2);
        }

        self.triangulate_edge_strip(&e2, c2, end, end_cell.color);
    }
}
