//! Triangular gaps where three cells meet

use glam::Vec3;
use tracing::trace;

use super::CellTriangulator;
use crate::cell::{HexCell, HexCellSource};
use crate::geometry::{lerp_color, lerp_position, EdgeType};
use crate::mesh::TerrainColor;

/// Geometry required to close a corner, given bottom, left and right cells
///
/// The bottom cell is the lowest of the three; left and right follow it in
/// clockwise order. Each variant names the bottom-left and bottom-right edge
/// types, with the two cliff-cliff variants telling which top cell is lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerCase {
    /// Terraces fan out from the bottom along both edges
    SlopeSlope,
    /// Terraces run from the left cell, rotated so left is the bottom
    SlopeFlat,
    /// Left terraces collapse onto a point on the right cliff
    SlopeCliff,
    /// Terraces run from the right cell, rotated so right is the bottom
    FlatSlope,
    /// Right terraces collapse onto a point on the left cliff
    CliffSlope,
    /// Both edges are cliffs, left is one step below right
    CliffCliffLeftLower,
    /// Both edges are cliffs, right is one step below left
    CliffCliffRightLower,
    /// A single triangle with per-corner colors
    Unterraced,
}

impl CornerCase {
    pub fn classify(bottom: i32, left: i32, right: i32) -> Self {
        use EdgeType::*;

        match (EdgeType::between(bottom, left), EdgeType::between(bottom, right)) {
            (Slope, Slope) => Self::SlopeSlope,
            (Slope, Flat) => Self::SlopeFlat,
            (Slope, Cliff) => Self::SlopeCliff,
            (Flat, Slope) => Self::FlatSlope,
            (Cliff, Slope) => Self::CliffSlope,
            _ if EdgeType::between(left, right) == Slope => {
                if left < right {
                    Self::CliffCliffLeftLower
                } else {
                    Self::CliffCliffRightLower
                }
            }
            _ => Self::Unterraced,
        }
    }
}

/// Indices of `[bottom, left, right]` among `[cell, neighbor, next]`
///
/// Picks the lowest cell as bottom and rotates the other two after it.
/// Ties are broken by the order of the comparisons, which keeps left and
/// right in clockwise order for every input.
pub(crate) fn lowest_first(cell: i32, neighbor: i32, next: i32) -> [usize; 3] {
    if cell <= neighbor {
        if cell <= next {
            [0, 1, 2]
        } else {
            [2, 0, 1]
        }
    } else if neighbor <= next {
        [1, 2, 0]
    } else {
        [2, 0, 1]
    }
}

/// One corner position and the cell it belongs to
#[derive(Debug, Clone, Copy)]
pub(crate) struct CornerVertex<'c> {
    pub position: Vec3,
    pub cell: &'c HexCell,
}

impl<'c> CornerVertex<'c> {
    pub fn new(position: Vec3, cell: &'c HexCell) -> Self {
        Self { position, cell }
    }

    #[inline]
    fn elevation(&self) -> i32 {
        self.cell.elevation
    }

    #[inline]
    fn color(&self) -> TerrainColor {
        self.cell.color
    }
}

/// Fraction of the way up a cliff where the first terrace rise lands
///
/// Boundary points sit one elevation level above the low cell, so terraces
/// on the adjacent slope converge onto them without gaps.
pub(crate) fn cliff_boundary_fraction(low_elevation: i32, high_elevation: i32) -> f32 {
    debug_assert_ne!(low_elevation, high_elevation, "cliff boundary on a flat edge");
    (1.0 / (high_elevation - low_elevation) as f32).abs()
}

impl<'t, 'a, G> CellTriangulator<'t, 'a, G>
where
    G: HexCellSource + ?Sized,
{
    pub(super) fn triangulate_corner(
        &mut self,
        bottom: CornerVertex<'_>,
        left: CornerVertex<'_>,
        right: CornerVertex<'_>,
    ) {
        let case = CornerCase::classify(bottom.elevation(), left.elevation(), right.elevation());
        trace!(
            ?case,
            bottom = bottom.elevation(),
            left = left.elevation(),
            right = right.elevation(),
            "triangulating corner"
        );

        match case {
            CornerCase::SlopeSlope => self.corner_terraces(bottom, left, right),
            CornerCase::SlopeFlat => self.corner_terraces(left, right, bottom),
            CornerCase::SlopeCliff => self.corner_terraces_cliff(bottom, left, right),
            CornerCase::FlatSlope => self.corner_terraces(right, bottom, left),
            CornerCase::CliffSlope => self.corner_cliff_terraces(bottom, left, right),
            CornerCase::CliffCliffLeftLower => self.corner_cliff_terraces(right, bottom, left),
            CornerCase::CliffCliffRightLower => self.corner_terraces_cliff(left, right, bottom),
            CornerCase::Unterraced => {
                self.builder
                    .add_triangle(bottom.position, left.position, right.position);
                self.builder
                    .add_triangle_colors(bottom.color(), left.color(), right.color());
            }
        }
    }

    /// Terraces from `begin` toward both `left` and `right`
    fn corner_terraces(
        &mut self,
        begin: CornerVertex<'_>,
        left: CornerVertex<'_>,
        right: CornerVertex<'_>,
    ) {
        let metrics = self.metrics;
        let steps = metrics.terrace_steps();

        let mut v3 = metrics.terrace_lerp(begin.position, left.position, 1);
        let mut v4 = metrics.terrace_lerp(begin.position, right.position, 1);
        let mut c3 = metrics.terrace_lerp_color(begin.color(), left.color(), 1);
        let mut c4 = metrics.terrace_lerp_color(begin.color(), right.color(), 1);

        self.builder.add_triangle(begin.position, v3, v4);
        self.builder.add_triangle_colors(begin.color(), c3, c4);

        for step in 2..steps {
            let (v1, v2, c1, c2) = (v3, v4, c3, c4);
            v3 = metrics.terrace_lerp(begin.position, left.position, step);
            v4 = metrics.terrace_lerp(begin.position, right.position, step);
            c3 = metrics.terrace_lerp_color(begin.color(), left.color(), step);
            c4 = metrics.terrace_lerp_color(begin.color(), right.color(), step);
            self.builder.add_quad(v1, v2, v3, v4);
            self.builder.add_quad_colors(c1, c2, c3, c4);
        }

        self.builder.add_quad(v3, v4, left.position, right.position);
        self.builder
            .add_quad_colors(c3, c4, left.color(), right.color());
    }

    /// Terraces toward `left`, cliff toward `right`
    fn corner_terraces_cliff(
        &mut self,
        begin: CornerVertex<'_>,
        left: CornerVertex<'_>,
        right: CornerVertex<'_>,
    ) {
        let (boundary, boundary_color) = self.boundary_point(begin, right);
        self.boundary_triangles(begin, left, boundary, boundary_color);
        self.close_boundary_top(left, right, boundary, boundary_color);
    }

    /// Cliff toward `left`, terraces toward `right`
    fn corner_cliff_terraces(
        &mut self,
        begin: CornerVertex<'_>,
        left: CornerVertex<'_>,
        right: CornerVertex<'_>,
    ) {
        let (boundary, boundary_color) = self.boundary_point(begin, left);
        self.boundary_triangles(right, begin, boundary, boundary_color);
        self.close_boundary_top(left, right, boundary, boundary_color);
    }

    /// Perturbed point on the cliff from `begin` up to `cliff_top`
    fn boundary_point(
        &self,
        begin: CornerVertex<'_>,
        cliff_top: CornerVertex<'_>,
    ) -> (Vec3, TerrainColor) {
        let low = self.builder.perturb(begin.position);
        let high = self.builder.perturb(cliff_top.position);
        let t = cliff_boundary_fraction(begin.elevation(), cliff_top.elevation());
        (
            lerp_position(low, high, t),
            lerp_color(begin.color(), cliff_top.color(), t),
        )
    }

    /// Fan from the terrace steps between `begin` and `left` to `boundary`
    fn boundary_triangles(
        &mut self,
        begin: CornerVertex<'_>,
        left: CornerVertex<'_>,
        boundary: Vec3,
        boundary_color: TerrainColor,
    ) {
        let metrics = self.metrics;
        let steps = metrics.terrace_steps();

        let mut v2 = self
            .builder
            .perturb(metrics.terrace_lerp(begin.position, left.position, 1));
        let mut c2 = metrics.terrace_lerp_color(begin.color(), left.color(), 1);

        let v1 = self.builder.perturb(begin.position);
        self.builder.add_triangle_unperturbed(v1, v2, boundary);
        self.builder
            .add_triangle_colors(begin.color(), c2, boundary_color);

        for step in 2..steps {
            let (v1, c1) = (v2, c2);
            v2 = self
                .builder
                .perturb(metrics.terrace_lerp(begin.position, left.position, step));
            c2 = metrics.terrace_lerp_color(begin.color(), left.color(), step);
            self.builder.add_triangle_unperturbed(v1, v2, boundary);
            self.builder.add_triangle_colors(c1, c2, boundary_color);
        }

        let end = self.builder.perturb(left.position);
        self.builder.add_triangle_unperturbed(v2, end, boundary);
        self.builder
            .add_triangle_colors(c2, left.color(), boundary_color);
    }

    /// Upper part of a corner whose lower part collapses onto `boundary`
    fn close_boundary_top(
        &mut self,
        left: CornerVertex<'_>,
        right: CornerVertex<'_>,
        boundary: Vec3,
        boundary_color: TerrainColor,
    ) {
        if left.cell.edge_type(right.cell) == EdgeType::Slope {
            self.boundary_triangles(left, right, boundary, boundary_color);
        } else {
            let v1 = self.builder.perturb(left.position);
            let v2 = self.builder.perturb(right.position);
            self.builder.add_triangle_unperturbed(v1, v2, boundary);
            self.builder
                .add_triangle_colors(left.color(), right.color(), boundary_color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HexMetrics;

    #[test]
    fn test_classify_covers_every_branch() {
        assert_eq!(CornerCase::classify(0, 1, 1), CornerCase::SlopeSlope);
        assert_eq!(CornerCase::classify(0, 1, 0), CornerCase::SlopeFlat);
        assert_eq!(CornerCase::classify(0, 1, 3), CornerCase::SlopeCliff);
        assert_eq!(CornerCase::classify(0, 0, 1), CornerCase::FlatSlope);
        assert_eq!(CornerCase::classify(0, 3, 1), CornerCase::CliffSlope);
        assert_eq!(CornerCase::classify(0, 2, 3), CornerCase::CliffCliffLeftLower);
        assert_eq!(CornerCase::classify(0, 3, 2), CornerCase::CliffCliffRightLower);
        assert_eq!(CornerCase::classify(0, 0, 0), CornerCase::Unterraced);
        assert_eq!(CornerCase::classify(0, 0, 2), CornerCase::Unterraced);
        assert_eq!(CornerCase::classify(0, 2, 2), CornerCase::Unterraced);
        assert_eq!(CornerCase::classify(0, 2, 5), CornerCase::Unterraced);
    }

    #[test]
    fn test_lowest_first_rotations() {
        assert_eq!(lowest_first(0, 1, 2), [0, 1, 2]);
        assert_eq!(lowest_first(1, 2, 0), [2, 0, 1]);
        assert_eq!(lowest_first(2, 0, 1), [1, 2, 0]);
        assert_eq!(lowest_first(2, 1, 0), [2, 0, 1]);
    }

    #[test]
    fn test_lowest_first_ties() {
        assert_eq!(lowest_first(1, 1, 1), [0, 1, 2]);
        assert_eq!(lowest_first(1, 1, 0), [2, 0, 1]);
        assert_eq!(lowest_first(1, 0, 0), [1, 2, 0]);
        assert_eq!(lowest_first(0, 1, 0), [0, 1, 2]);
    }

    #[test]
    fn test_cliff_boundary_sits_on_first_rise() {
        let metrics = HexMetrics::default();
        let low = Vec3::new(0.0, metrics.elevation_height(0), 0.0);
        let high = Vec3::new(10.0, metrics.elevation_height(3), 0.0);

        let t = cliff_boundary_fraction(0, 3);
        let boundary = lerp_position(low, high, t);

        assert!((t - 1.0 / 3.0).abs() < 1e-6);
        assert!((boundary.y - metrics.elevation_height(1)).abs() < 1e-4);
        assert!(boundary.y < high.y);
        assert_eq!(cliff_boundary_fraction(3, 0), t);
    }
}
