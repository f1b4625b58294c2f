//! Expand a triangulated planet into engine-agnostic mesh data.
//!
//! Run with: cargo run --example mesh_demo

use glam::Vec3;
use rust_icosphere_lod::{build_mesh, CameraState, Planet, PlanetConfigBuilder};

fn main() {
    let config = PlanetConfigBuilder::new()
        .radius(100.0)
        .unwrap()
        .max_level(6)
        .unwrap()
        .patch_levels(3)
        .unwrap()
        .build();

    let mut planet = Planet::new(config).unwrap();

    let camera = CameraState::perspective(
        Vec3::new(0.0, 0.0, 260.0),
        Vec3::ZERO,
        Vec3::Y,
        60.0,
        1280.0,
        16.0 / 9.0,
        0.1,
        10_000.0,
    );

    let leaves = planet.tick(&camera).unwrap().expect("first tick").to_vec();
    println!("Triangulated {} leaves", leaves.len());

    let patch = planet.patch();
    println!(
        "Patch template: {} vertices, {} triangles per leaf",
        patch.vertex_count(),
        patch.triangle_count()
    );

    let mesh = build_mesh(&leaves, patch, planet.config().radius);
    println!(
        "Mesh: {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    // Per-level breakdown of the leaf list.
    let deepest = leaves.iter().map(|l| l.level).max().unwrap_or(0);
    for level in 0..=deepest {
        let count = leaves.iter().filter(|l| l.level == level).count();
        if count > 0 {
            println!("  level {}: {} leaves", level, count);
        }
    }
}
