//! Base icosahedron generation
//!
//! Produces the 12 unit-sphere vertices (scaled by radius) and the 20 fixed
//! counter-clockwise face triples that seed the adaptive triangulation.

use glam::Vec3;

use crate::error::{IcosphereError, Result};

/// The 20 faces of the icosahedron as CCW vertex-index triples.
///
/// Grouped as: 5 faces around vertex 0, 5 adjacent faces, 5 faces around
/// vertex 3, 5 adjacent faces. Together they cover the sphere without gaps
/// or overlaps.
const FACE_INDICES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// One base icosahedron face: three corner points on the sphere.
///
/// Created once at initialization and never mutated; the triangulator reads
/// the corners each pass but keeps no per-face state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IcoFace {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

/// Compute the 12 icosahedron vertices on a sphere of the given radius.
///
/// Uses the golden-ratio construction: the vertices are the cyclic
/// permutations of `(±1, ±t, 0)` with `t = (1 + √5) / 2`, normalized and
/// scaled to `radius`.
///
/// # Errors
///
/// Returns `InvalidConfig` if `radius` is not a positive finite number.
pub fn icosahedron_positions(radius: f32) -> Result<[Vec3; 12]> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(IcosphereError::InvalidConfig(format!(
            "radius must be positive (got {})",
            radius
        )));
    }

    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let verts = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];
    Ok(verts.map(|v| v.normalize() * radius))
}

/// The fixed CCW face-index table of the base icosahedron.
pub fn icosahedron_indices() -> &'static [[u32; 3]; 20] {
    &FACE_INDICES
}

/// Build the 20 base faces for a sphere of the given radius.
///
/// # Errors
///
/// Returns `InvalidConfig` if `radius` is not a positive finite number.
pub fn base_faces(radius: f32) -> Result<Vec<IcoFace>> {
    let verts = icosahedron_positions(radius)?;
    Ok(FACE_INDICES
        .iter()
        .map(|&[i, j, k]| IcoFace {
            a: verts[i as usize],
            b: verts[j as usize],
            c: verts[k as usize],
        })
        .collect())
}
