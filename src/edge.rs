//! Subdivided hexagon edges

use glam::Vec3;

use crate::config::HexMetrics;
use crate::geometry::lerp_position;

/// Four evenly spaced points along one hexagon edge
///
/// Splitting every edge into three segments keeps fans, bridges and terraces
/// aligned vertex for vertex, and lets terrace interpolation run on a whole
/// edge at once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeVertices {
    pub v1: Vec3,
    pub v2: Vec3,
    pub v3: Vec3,
    pub v4: Vec3,
}

impl EdgeVertices {
    /// Subdivide the edge from `corner1` to `corner2`
    pub fn new(corner1: Vec3, corner2: Vec3) -> Self {
        Self {
            v1: corner1,
            v2: lerp_position(corner1, corner2, 1.0 / 3.0),
            v3: lerp_position(corner1, corner2, 2.0 / 3.0),
            v4: corner2,
        }
    }

    /// Every point moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            v1: self.v1 + offset,
            v2: self.v2 + offset,
            v3: self.v3 + offset,
            v4: self.v4 + offset,
        }
    }

    /// Every point moved to height `y`
    pub fn with_height(&self, y: f32) -> Self {
        Self {
            v1: self.v1.with_y(y),
            v2: self.v2.with_y(y),
            v3: self.v3.with_y(y),
            v4: self.v4.with_y(y),
        }
    }

    /// Terrace step `step` between two parallel edges
    pub fn terrace_lerp(a: &EdgeVertices, b: &EdgeVertices, step: u32, metrics: &HexMetrics) -> Self {
        Self {
            v1: metrics.terrace_lerp(a.v1, b.v1, step),
            v2: metrics.terrace_lerp(a.v2, b.v2, step),
            v3: metrics.terrace_lerp(a.v3, b.v3, step),
            v4: metrics.terrace_lerp(a.v4, b.v4, step),
        }
    }

    pub fn points(&self) -> [Vec3; 4] {
        [self.v1, self.v2, self.v3, self.v4]
    }
}
