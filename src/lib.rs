//! Adaptive icosphere LOD mesh generation
//!
//! A standalone library for view-dependent level-of-detail triangulation of
//! a planet sphere, suitable for use with any game engine (Bevy, Godot,
//! wgpu, etc.). Starting from the 20 faces of an icosahedron, triangles are
//! recursively split near the camera and culled beyond the horizon or
//! outside the view frustum, producing a flat list of leaf triangles that a
//! renderer instances with a shared patch template.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_icosphere_lod::*;
//! use glam::Vec3;
//!
//! let config = PlanetConfigBuilder::new()
//!     .radius(1700.0).unwrap()
//!     .max_level(10).unwrap()
//!     .build();
//!
//! let mut planet = Planet::new(config).unwrap();
//!
//! // Once per frame (or whenever the camera moves):
//! let camera = CameraState::perspective(
//!     Vec3::new(0.0, 0.0, 5000.0),
//!     Vec3::ZERO,
//!     Vec3::Y,
//!     60.0,     // vertical FOV in degrees
//!     1024.0,   // viewport width in pixels
//!     16.0 / 9.0,
//!     0.1,
//!     100_000.0,
//! );
//! if let Some(leaves) = planet.tick(&camera).unwrap() {
//!     println!("retriangulated: {} leaves", leaves.len());
//! }
//! ```
//!
//! # Features
//!
//! - `serde`: Enables serialization support for the planet configuration

// Modules
pub mod error;
pub mod config;
pub mod icosahedron;
pub mod camera;
pub mod tables;
pub mod triangulator;
pub mod patch;
pub mod mesh;
pub mod planet;

// Re-export core types for convenience
pub use error::{IcosphereError, Result};
pub use config::{FrustumInheritance, PlanetConfig, PlanetConfigBuilder};
pub use icosahedron::{base_faces, icosahedron_indices, icosahedron_positions, IcoFace};
pub use camera::{Aabb, CameraState, Frustum};
pub use tables::ThresholdTables;
pub use triangulator::{LeafInstance, Triangulator};
pub use patch::{PatchTemplate, PatchVertex, MORPH_RANGE};
pub use mesh::{build_mesh, MeshData};
pub use planet::Planet;

// Re-export glam::Vec3 for convenience
pub use glam::{Vec2, Vec3};
