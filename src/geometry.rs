//! Hexagon corner geometry, terrace interpolation and edge classification

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::HexMetrics;
use crate::direction::HexDirection;
use crate::mesh::TerrainColor;

/// Relationship between the elevations of two adjacent cells
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeType {
    /// Same elevation
    Flat,
    /// Elevations differ by exactly one level (terraced)
    Slope,
    /// Elevations differ by more than one level
    Cliff,
}

impl EdgeType {
    /// Classify the edge between two elevations
    ///
    /// The result does not depend on argument order.
    pub fn between(elevation1: i32, elevation2: i32) -> Self {
        match (elevation2 - elevation1).abs() {
            0 => EdgeType::Flat,
            1 => EdgeType::Slope,
            _ => EdgeType::Cliff,
        }
    }
}

/// Interpolate two scalars so that `t == 0` and `t == 1` hit the endpoints exactly
#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Linear interpolation between two positions, exact at both endpoints
#[inline]
pub fn lerp_position(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    Vec3::new(mix(a.x, b.x, t), mix(a.y, b.y, t), mix(a.z, b.z, t))
}

/// Linear interpolation between two colors, exact at both endpoints
#[inline]
pub fn lerp_color(a: TerrainColor, b: TerrainColor, t: f32) -> TerrainColor {
    [
        mix(a[0], b[0], t),
        mix(a[1], b[1], t),
        mix(a[2], b[2], t),
        mix(a[3], b[3], t),
    ]
}

impl HexMetrics {
    /// Corner offsets of a hexagon, clockwise from north, with the first
    /// corner repeated at the end so `corners()[d + 1]` never wraps
    pub fn corners(&self) -> [Vec3; 7] {
        let outer = self.outer_radius;
        let inner = self.inner_radius();
        [
            Vec3::new(0.0, 0.0, outer),
            Vec3::new(inner, 0.0, 0.5 * outer),
            Vec3::new(inner, 0.0, -0.5 * outer),
            Vec3::new(0.0, 0.0, -outer),
            Vec3::new(-inner, 0.0, -0.5 * outer),
            Vec3::new(-inner, 0.0, 0.5 * outer),
            Vec3::new(0.0, 0.0, outer),
        ]
    }

    /// Corner at the counter-clockwise end of the edge facing `direction`
    #[inline]
    pub fn first_corner(&self, direction: HexDirection) -> Vec3 {
        self.corners()[direction.index()]
    }

    /// Corner at the clockwise end of the edge facing `direction`
    #[inline]
    pub fn second_corner(&self, direction: HexDirection) -> Vec3 {
        self.corners()[direction.index() + 1]
    }

    #[inline]
    pub fn first_solid_corner(&self, direction: HexDirection) -> Vec3 {
        self.first_corner(direction) * self.solid_factor
    }

    #[inline]
    pub fn second_solid_corner(&self, direction: HexDirection) -> Vec3 {
        self.second_corner(direction) * self.solid_factor
    }

    /// Corner offset, raw or scaled down to the solid region
    pub fn corner(&self, direction: HexDirection, solid: bool) -> Vec3 {
        if solid {
            self.first_solid_corner(direction)
        } else {
            self.first_corner(direction)
        }
    }

    /// Offset from a cell's solid edge to its neighbor's solid edge
    pub fn bridge(&self, direction: HexDirection) -> Vec3 {
        (self.first_corner(direction) + self.second_corner(direction)) * self.blend_factor()
    }

    /// World-space height of an elevation level, before perturbation
    #[inline]
    pub fn elevation_height(&self, elevation: i32) -> f32 {
        elevation as f32 * self.elevation_step
    }

    /// Horizontal interpolation fraction for a terrace step
    #[inline]
    fn terrace_horizontal(&self, step: u32) -> f32 {
        step as f32 / self.terrace_steps() as f32
    }

    /// Vertical interpolation fraction for a terrace step
    ///
    /// Only odd steps rise; even steps are flat treads.
    #[inline]
    fn terrace_vertical(&self, step: u32) -> f32 {
        ((step + 1) / 2) as f32 / (self.terraces_per_slope + 1) as f32
    }

    /// Position of terrace step `step` between `a` and `b`
    ///
    /// Step 0 returns `a` and step `terrace_steps()` returns `b` exactly.
    pub fn terrace_lerp(&self, a: Vec3, b: Vec3, step: u32) -> Vec3 {
        let h = self.terrace_horizontal(step);
        let v = self.terrace_vertical(step);
        Vec3::new(mix(a.x, b.x, h), mix(a.y, b.y, v), mix(a.z, b.z, h))
    }

    /// Color of terrace step `step` between `a` and `b`
    ///
    /// Colors blend across every step, not just the risers.
    pub fn terrace_lerp_color(&self, a: TerrainColor, b: TerrainColor, step: u32) -> TerrainColor {
        lerp_color(a, b, self.terrace_horizontal(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_type_classification() {
        assert_eq!(EdgeType::between(2, 2), EdgeType::Flat);
        assert_eq!(EdgeType::between(2, 3), EdgeType::Slope);
        assert_eq!(EdgeType::between(3, 2), EdgeType::Slope);
        assert_eq!(EdgeType::between(0, 2), EdgeType::Cliff);
        assert_eq!(EdgeType::between(-4, 5), EdgeType::Cliff);
    }

    #[test]
    fn test_edge_type_symmetry() {
        for e1 in -6..=6 {
            for e2 in -6..=6 {
                assert_eq!(EdgeType::between(e1, e2), EdgeType::between(e2, e1));
            }
        }
    }

    #[test]
    fn test_corner_wraparound() {
        let metrics = HexMetrics::default();
        let corners = metrics.corners();
        assert_eq!(corners[0], corners[6]);
        assert_eq!(
            metrics.second_corner(HexDirection::NW),
            metrics.first_corner(HexDirection::NE)
        );
        for d in HexDirection::ALL {
            assert_eq!(metrics.second_corner(d), metrics.first_corner(d.next()));
            assert!((metrics.first_corner(d).length() - metrics.outer_radius).abs() < 1e-4);
        }
    }

    #[test]
    fn test_solid_corners_scaled() {
        let metrics = HexMetrics::default();
        let raw = metrics.corner(HexDirection::E, false);
        let solid = metrics.corner(HexDirection::E, true);
        assert!((solid - raw * 0.8).length() < 1e-6);
    }

    #[test]
    fn test_bridges_meet_neighbor_solid_edge() {
        let metrics = HexMetrics::default();
        for d in HexDirection::ALL {
            // A bridge spans the whole gap between facing solid edges.
            let gap = 2.0 * metrics.inner_radius() * (1.0 - metrics.solid_factor);
            assert!((metrics.bridge(d).length() - gap).abs() < 1e-4);
            assert_eq!(metrics.bridge(d).y, 0.0);
        }
    }

    #[test]
    fn test_terrace_lerp_endpoints_exact() {
        let metrics = HexMetrics::default();
        let a = Vec3::new(0.1, 0.3, -7.7);
        let b = Vec3::new(3.3, 6.1, 2.9);

        assert_eq!(metrics.terrace_lerp(a, b, 0), a);
        assert_eq!(metrics.terrace_lerp(a, b, metrics.terrace_steps()), b);

        let ca = [0.1, 0.7, 0.3, 1.0];
        let cb = [0.9, 0.2, 0.6, 1.0];
        assert_eq!(metrics.terrace_lerp_color(ca, cb, 0), ca);
        assert_eq!(metrics.terrace_lerp_color(ca, cb, metrics.terrace_steps()), cb);
    }

    #[test]
    fn test_terrace_profile_rises_on_odd_steps() {
        let metrics = HexMetrics::default();
        let a = Vec3::ZERO;
        let b = Vec3::new(5.0, 3.0, 0.0);

        let heights: Vec<f32> = (0..=metrics.terrace_steps())
            .map(|step| metrics.terrace_lerp(a, b, step).y)
            .collect();

        assert_eq!(heights[0], 0.0);
        assert!((heights[1] - 1.0).abs() < 1e-6);
        assert_eq!(heights[1], heights[2]);
        assert!((heights[3] - 2.0).abs() < 1e-6);
        assert_eq!(heights[3], heights[4]);
        assert_eq!(heights[5], 3.0);

        let xs: Vec<f32> = (0..=metrics.terrace_steps())
            .map(|step| metrics.terrace_lerp(a, b, step).x)
            .collect();
        for pair in xs.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_elevation_height() {
        let metrics = HexMetrics::default();
        assert_eq!(metrics.elevation_height(0), 0.0);
        assert_eq!(metrics.elevation_height(2), 6.0);
        assert_eq!(metrics.elevation_height(-1), -3.0);
    }
}
