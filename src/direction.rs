//! Hexagon edge directions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the six edge directions of a pointy-top hexagon, clockwise from north-east
///
/// The numeric order matters: the triangulator only builds bridges for the
/// first three directions and corners for the first two, so every shared edge
/// and every triple point is emitted exactly once.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HexDirection {
    NE,
    E,
    SE,
    SW,
    W,
    NW,
}

impl HexDirection {
    /// All directions in clockwise order starting at NE
    pub const ALL: [HexDirection; 6] = [
        HexDirection::NE,
        HexDirection::E,
        HexDirection::SE,
        HexDirection::SW,
        HexDirection::W,
        HexDirection::NW,
    ];

    /// Position of this direction in [`HexDirection::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for an index, wrapping modulo 6
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// The direction pointing the other way
    #[inline]
    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Counter-clockwise neighbor direction
    #[inline]
    pub fn previous(self) -> Self {
        Self::from_index(self.index() + 5)
    }

    /// Clockwise neighbor direction
    #[inline]
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite() {
        assert_eq!(HexDirection::NE.opposite(), HexDirection::SW);
        assert_eq!(HexDirection::E.opposite(), HexDirection::W);
        assert_eq!(HexDirection::NW.opposite(), HexDirection::SE);
        for d in HexDirection::ALL {
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn test_next_previous_wrap() {
        assert_eq!(HexDirection::NW.next(), HexDirection::NE);
        assert_eq!(HexDirection::NE.previous(), HexDirection::NW);
        for d in HexDirection::ALL {
            assert_eq!(d.next().previous(), d);
        }
    }

    #[test]
    fn test_ordering_matches_index() {
        assert!(HexDirection::NE < HexDirection::E);
        assert!(HexDirection::SE < HexDirection::SW);
        for (i, d) in HexDirection::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
    }
}
