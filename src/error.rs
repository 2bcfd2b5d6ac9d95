//! Error types for hex terrain mesh generation

use std::fmt;

/// Errors that can occur while configuring grids or building meshes
#[derive(Debug, Clone, PartialEq)]
pub enum HexMeshError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Grid dimensions or layout are unusable
    InvalidGrid(String),
    /// Requested cell index does not exist
    CellNotFound(usize),
    /// Mesh buffers violate an index or length invariant
    InvalidMesh(String),
}

impl fmt::Display for HexMeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexMeshError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            HexMeshError::InvalidGrid(msg) => write!(f, "invalid grid: {}", msg),
            HexMeshError::CellNotFound(index) => write!(f, "cell not found: {}", index),
            HexMeshError::InvalidMesh(msg) => write!(f, "invalid mesh: {}", msg),
        }
    }
}

impl std::error::Error for HexMeshError {}

/// Result type alias for hex terrain operations
pub type Result<T> = std::result::Result<T, HexMeshError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            HexMeshError::CellNotFound(7).to_string(),
            "cell not found: 7"
        );
        assert_eq!(
            HexMeshError::InvalidConfig("bad radius".into()).to_string(),
            "invalid configuration: bad radius"
        );
    }
}
