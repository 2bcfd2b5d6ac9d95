//! Cell colors and elevation-based color mapping

/// RGBA color type
pub type TerrainColor = [f32; 4];

/// Default color of freshly created cells
pub const DEFAULT_CELL_COLOR: TerrainColor = [1.0, 1.0, 1.0, 1.0];

/// Trait for choosing a cell color from its elevation
pub trait ColorMapper {
    /// Map an elevation level to an RGBA color
    fn map_color(&self, elevation: i32) -> TerrainColor;
}

/// Same color for every elevation
#[derive(Debug, Clone, Copy)]
pub struct UniformColorMapper(pub TerrainColor);

impl ColorMapper for UniformColorMapper {
    fn map_color(&self, _elevation: i32) -> TerrainColor {
        self.0
    }
}

/// Color bands keyed by minimum elevation
///
/// An elevation takes the color of the highest band whose minimum it reaches;
/// elevations below every band take the first band's color.
#[derive(Debug, Clone)]
pub struct ElevationColorMapper {
    bands: Vec<(i32, TerrainColor)>,
}

impl ElevationColorMapper {
    /// Create a mapper from `(minimum elevation, color)` pairs in any order
    pub fn new(mut bands: Vec<(i32, TerrainColor)>) -> Self {
        bands.sort_by_key(|(min, _)| *min);
        Self { bands }
    }
}

impl Default for ElevationColorMapper {
    fn default() -> Self {
        Self::new(vec![
            (i32::MIN, [0.1, 0.3, 0.7, 1.0]), // Water blue
            (0, [0.9, 0.8, 0.5, 1.0]),        // Sand
            (1, [0.2, 0.6, 0.2, 1.0]),        // Grass
            (3, [0.5, 0.5, 0.5, 1.0]),        // Rock
            (5, [0.95, 0.95, 1.0, 1.0]),      // Snow
        ])
    }
}

impl ColorMapper for ElevationColorMapper {
    fn map_color(&self, elevation: i32) -> TerrainColor {
        self.bands
            .iter()
            .rev()
            .find(|(min, _)| elevation >= *min)
            .or_else(|| self.bands.first())
            .map(|(_, color)| *color)
            .unwrap_or(DEFAULT_CELL_COLOR)
    }
}
