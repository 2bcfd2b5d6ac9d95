//! Complete workflow demonstration for hex_terrain_mesh
//!
//! Run with `RUST_LOG=hex_terrain_mesh=debug` to see triangulation logs.

use hex_terrain_mesh::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== hex_terrain_mesh Complete Demo ===\n");

    // Step 1: Configure metrics
    println!("Step 1: Configuring metrics...");
    let metrics = HexMetricsBuilder::new()
        .outer_radius(10.0)?
        .terraces_per_slope(2)?
        .noise_seed(12345)
        .build()?;
    println!("  Outer radius: {}", metrics.outer_radius);
    println!("  Inner radius: {:.3}", metrics.inner_radius());
    println!("  Terrace steps: {}", metrics.terrace_steps());

    // Step 2: Bake noise
    println!("\nStep 2: Baking noise texture...");
    let perlin = PerlinNoise::new(metrics.noise_seed);
    let noise = NoiseTexture::bake(&perlin, 256, 256)?;
    println!("  {}x{} texels", noise.width(), noise.height());

    // Step 3: Build grid and sculpt terrain
    println!("\nStep 3: Sculpting a 12x10 grid...");
    let mut grid = HexGrid::new(12, 10, metrics, &noise)?;
    let center = HexCoordinates::from_offset(6, 5);
    for index in 0..grid.cell_count() {
        let coordinates = grid.cell(index).map(|c| c.coordinates);
        if let Some(coordinates) = coordinates {
            let distance = coordinates.distance_to(center) as i32;
            grid.set_elevation(index, (5 - distance).max(0), &noise)?;
        }
    }
    grid.apply_colors(&ElevationColorMapper::default());

    let mut edge_counts = [0usize; 3];
    for index in 0..grid.cell_count() {
        for (direction, _) in grid.neighbors(index) {
            if direction > HexDirection::SE {
                continue;
            }
            if let Some(edge) = grid.edge_type(index, direction) {
                edge_counts[edge as usize] += 1;
            }
        }
    }
    println!("  Flat edges: {}", edge_counts[EdgeType::Flat as usize]);
    println!("  Slope edges: {}", edge_counts[EdgeType::Slope as usize]);
    println!("  Cliff edges: {}", edge_counts[EdgeType::Cliff as usize]);

    // Step 4: Query spatial index
    #[cfg(feature = "spatial-index")]
    {
        println!("\nStep 4: Spatial queries:");
        let test_pos = Vec3::new(60.0, 0.0, 40.0);
        let index = grid.find_cell_at(test_pos);
        if let Some(cell) = grid.cell(index) {
            println!(
                "  Position {:?} -> Cell {} {} (elevation {})",
                test_pos, index, cell.coordinates, cell.elevation
            );
        }
    }

    // Step 5: Generate mesh
    println!("\nStep 5: Generating mesh...");
    let mesh = generate_mesh(&grid, &noise);
    mesh.validate()?;
    println!("  Vertices: {}", mesh.vertex_count());
    println!("  Triangles: {}", mesh.triangle_count());

    // Memory estimate
    let mem = (mesh.positions.len() * 12 + mesh.normals.len() * 12 +
               mesh.colors.len() * 16 + mesh.indices.len() * 4) as f32 / 1024.0 / 1024.0;
    println!("  Memory: {:.2} MB", mem);

    println!("\n=== Demo Complete ===");
    Ok(())
}
