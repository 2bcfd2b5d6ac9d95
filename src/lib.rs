//! Hexagonal terrain mesh generation
//!
//! A standalone library for turning a grid of elevated hexagonal cells into a
//! terraced, noise-perturbed triangle mesh, suitable for use with any game
//! engine (Bevy, Godot, etc.)
//!
//! # Quick Start
//!
//! ```rust
//! use hex_terrain_mesh::*;
//!
//! // Configure the hexagon metrics
//! let metrics = HexMetricsBuilder::new()
//!     .terraces_per_slope(2).unwrap()
//!     .noise_seed(42)
//!     .build().unwrap();
//!
//! // Build and edit a grid
//! let noise = PerlinNoise::new(metrics.noise_seed);
//! let mut grid = HexGrid::new(8, 6, metrics, &noise).unwrap();
//! grid.set_elevation(10, 1, &noise).unwrap();
//! grid.set_elevation(11, 3, &noise).unwrap();
//! grid.apply_colors(&ElevationColorMapper::default());
//!
//! // Generate mesh for rendering
//! let mesh = generate_mesh(&grid, &noise);
//! println!("Generated {} triangles", mesh.triangle_count());
//! ```
//!
//! # Features
//!
//! - `spatial-index` (default): Enables O(log n) position-to-cell lookups using KD-tree
//! - `parallel`: Triangulates large grids across a rayon thread pool
//! - `serde`: Enables serialization support for metrics and cells

// Modules
pub mod error;
pub mod config;
pub mod direction;
pub mod coordinates;
pub mod geometry;
pub mod noise;
pub mod perturb;
pub mod edge;
pub mod cell;
pub mod grid;
pub mod mesh;
pub mod triangulate;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{HexMeshError, Result};
pub use config::{HexMetrics, HexMetricsBuilder, INNER_TO_OUTER};
pub use direction::HexDirection;
pub use coordinates::HexCoordinates;
pub use geometry::EdgeType;
pub use noise::{FlatNoise, NoiseSource, NoiseTexture, PerlinConfig, PerlinNoise};
pub use perturb::Perturbation;
pub use edge::EdgeVertices;
pub use cell::{HexCell, HexCellSource};
pub use grid::HexGrid;
pub use mesh::{
    ColorMapper, ElevationColorMapper, MeshBuilder, MeshData, TerrainColor, UniformColorMapper,
    DEFAULT_CELL_COLOR,
};
pub use triangulate::{generate_mesh, triangulate_into, CornerCase};

#[cfg(feature = "parallel")]
pub use triangulate::generate_mesh_parallel;

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::Vec3 for convenience
pub use glam::Vec3;
