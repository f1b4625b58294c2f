//! LOD walkthrough: fly a camera toward the planet and watch the leaf
//! counts grow as triangles split near the viewer.
//!
//! Run with: cargo run --example lod_demo

use glam::Vec3;
use rust_icosphere_lod::{CameraState, Planet, PlanetConfigBuilder};

fn main() {
    let config = PlanetConfigBuilder::new()
        .radius(1700.0)
        .unwrap()
        .max_height(10.0)
        .unwrap()
        .max_level(10)
        .unwrap()
        .build();

    let mut planet = Planet::new(config).unwrap();
    println!(
        "Planet: radius {}, max level {}",
        planet.config().radius,
        planet.config().max_level
    );

    for distance in [100_000.0, 20_000.0, 5_000.0, 2_500.0, 1_900.0, 1_750.0] {
        let camera = CameraState::perspective(
            Vec3::new(0.0, 0.0, distance),
            Vec3::ZERO,
            Vec3::Y,
            60.0,
            1024.0,
            16.0 / 9.0,
            0.1,
            1e6,
        );

        let leaves = planet
            .tick(&camera)
            .unwrap()
            .expect("camera moved, expected retriangulation");

        let max_level = leaves.iter().map(|l| l.level).max().unwrap_or(0);
        println!(
            "distance {:>9.0}: {:>6} leaves, deepest level {}",
            distance,
            leaves.len(),
            max_level
        );
    }

    println!("\nDistance table (first 6 levels):");
    for (level, d) in planet.distance_table().iter().take(6).enumerate() {
        println!("  level {}: split below {:.1}", level, d);
    }
}
