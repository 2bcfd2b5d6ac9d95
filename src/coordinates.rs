//! Axial hex coordinates

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::direction::HexDirection;

/// Axial (cube) coordinates of a cell
///
/// The third cube coordinate is derived so `x + y + z == 0` always holds.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexCoordinates {
    x: i32,
    z: i32,
}

impl HexCoordinates {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert offset (column, row) coordinates where odd rows shift right
    pub fn from_offset(x: i32, z: i32) -> Self {
        Self::new(x - z / 2, z)
    }

    /// Back to offset (column, row) coordinates
    pub fn to_offset(self) -> (i32, i32) {
        (self.x + self.z / 2, self.z)
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        -self.x - self.z
    }

    #[inline]
    pub fn z(self) -> i32 {
        self.z
    }

    /// Coordinates of the adjacent cell in `direction`
    pub fn step(self, direction: HexDirection) -> Self {
        let (dx, dz) = match direction {
            HexDirection::NE => (0, 1),
            HexDirection::E => (1, 0),
            HexDirection::SE => (1, -1),
            HexDirection::SW => (0, -1),
            HexDirection::W => (-1, 0),
            HexDirection::NW => (-1, 1),
        };
        Self::new(self.x + dx, self.z + dz)
    }

    /// Number of cell steps between two coordinates
    pub fn distance_to(self, other: HexCoordinates) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y() - other.y()).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dy).max(dz)
    }
}

impl fmt::Display for HexCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y(), self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_round_trip() {
        for z in 0..6 {
            for x in 0..6 {
                let coords = HexCoordinates::from_offset(x, z);
                assert_eq!(coords.to_offset(), (x, z));
                assert_eq!(coords.x() + coords.y() + coords.z(), 0);
            }
        }
    }

    #[test]
    fn test_display() {
        let coords = HexCoordinates::from_offset(3, 2);
        assert_eq!(coords.to_string(), "(2, -4, 2)");
    }

    #[test]
    fn test_steps_are_unit_distance() {
        let origin = HexCoordinates::new(2, 3);
        for d in HexDirection::ALL {
            let neighbor = origin.step(d);
            assert_eq!(origin.distance_to(neighbor), 1);
            assert_eq!(neighbor.step(d.opposite()), origin);
        }
    }
}
