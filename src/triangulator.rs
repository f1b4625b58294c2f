//! Adaptive triangulation of the icosphere
//!
//! The triangulator walks the 20 base faces depth-first each pass. Every
//! triangle is classified as culled, a leaf, or a split into four children
//! whose edge midpoints are reprojected onto the sphere; leaves are emitted
//! into a flat accumulator as [`LeafInstance`]s. No tree is retained between
//! passes — recursion depth is bounded by the configured maximum level, so
//! the worst case is `20 * 4^max_level` evaluations, far fewer in practice
//! once culling kicks in.

use glam::Vec3;
use log::debug;

use crate::camera::{Aabb, CameraState};
use crate::config::{FrustumInheritance, PlanetConfig};
use crate::error::Result;
use crate::icosahedron::{base_faces, IcoFace};
use crate::tables::ThresholdTables;

/// One renderable leaf triangle.
///
/// Compact affine description of where the shared patch template lands in
/// world space: a point on the patch at barycentric `(u, v)` maps to
/// `a + u * r + v * s`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafInstance {
    /// Subdivision level this leaf was emitted at
    pub level: u32,
    /// Anchor corner
    pub a: Vec3,
    /// First edge vector (`b - a`)
    pub r: Vec3,
    /// Second edge vector (`c - a`)
    pub s: Vec3,
}

impl LeafInstance {
    /// The three corner points of the leaf triangle.
    pub fn corners(&self) -> [Vec3; 3] {
        [self.a, self.a + self.r, self.a + self.s]
    }

    /// Map a point in normalized triangle space onto this leaf's plane.
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        self.a + self.r * u + self.s * v
    }

    /// Area of the flat leaf triangle.
    pub fn area(&self) -> f32 {
        self.r.cross(self.s).length() * 0.5
    }
}

/// Outcome of evaluating one triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitDecision {
    /// Outside the frustum or beyond the horizon; contributes nothing
    Cull,
    /// Final geometry for this pass
    Leaf,
    /// Subdivide; the parent passed a frustum test
    Split,
    /// Subdivide; the parent skipped the frustum test
    SplitCull,
}

/// The adaptive split/cull engine.
///
/// Owns the 20 base faces and the threshold tables; consumes a
/// [`CameraState`] snapshot per pass and produces a fresh leaf list. The
/// returned list is a full replacement — callers render the previous list
/// until the call returns.
///
/// # Example
///
/// ```rust
/// use rust_icosphere_lod::*;
/// use glam::Vec3;
///
/// let config = PlanetConfigBuilder::new().build();
/// let mut tri = Triangulator::new(&config).unwrap();
///
/// let camera = CameraState::perspective(
///     Vec3::new(0.0, 0.0, 5000.0),
///     Vec3::ZERO,
///     Vec3::Y,
///     60.0,
///     1024.0,
///     16.0 / 9.0,
///     0.1,
///     100_000.0,
/// );
/// let leaves = tri.generate_geometry(&camera).unwrap();
/// assert!(!leaves.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Triangulator {
    config: PlanetConfig,
    faces: Vec<IcoFace>,
    tables: ThresholdTables,
    base_edge_length: f32,
}

impl Triangulator {
    /// Build the base faces and camera-independent tables for a planet.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configured radius is rejected by the
    /// icosahedron generator.
    pub fn new(config: &PlanetConfig) -> Result<Self> {
        let faces = base_faces(config.radius)?;
        let tables = ThresholdTables::new(config, &faces[0]);
        let base_edge_length = (faces[0].a - faces[0].b).length();
        Ok(Self {
            config: *config,
            faces,
            tables,
            base_edge_length,
        })
    }

    /// The 20 base faces.
    pub fn faces(&self) -> &[IcoFace] {
        &self.faces
    }

    /// The current threshold tables.
    ///
    /// The distance table reflects the camera passed to the most recent
    /// [`generate_geometry`](Self::generate_geometry) call and is empty
    /// before the first one.
    pub fn tables(&self) -> &ThresholdTables {
        &self.tables
    }

    /// Height-multiplier table for external bounding-volume consumers.
    pub fn height_mult_table(&self) -> &[f32] {
        &self.tables.height_mult
    }

    /// Run one full triangulation pass.
    ///
    /// Rebuilds the distance table for the camera's projection (FOV and
    /// viewport width can change between frames), then subdivides the 20
    /// base faces depth-first in fixed order. Deterministic: the same
    /// camera state always yields the same leaf list in the same order.
    ///
    /// # Errors
    ///
    /// Propagates table-rebuild failures (`InvalidCamera`,
    /// `DegenerateGeometry`); the triangulator state is unchanged on error.
    pub fn generate_geometry(&mut self, camera: &CameraState) -> Result<Vec<LeafInstance>> {
        self.tables
            .rebuild_distance(self.base_edge_length, &self.config, camera)?;

        let mut leaves = Vec::new();
        for face in &self.faces {
            self.subdivide(face.a, face.b, face.c, 0, true, camera, &mut leaves);
        }
        debug!(
            "triangulation pass produced {} leaves from {} base faces",
            leaves.len(),
            self.faces.len()
        );
        Ok(leaves)
    }

    /// Distance from the camera to the nearest of the three corners.
    fn min_corner_distance(a: Vec3, b: Vec3, c: Vec3, camera: &CameraState) -> f32 {
        let da = (a - camera.position).length();
        let db = (b - camera.position).length();
        let dc = (c - camera.position).length();
        da.min(db.min(dc))
    }

    /// Classify one triangle.
    ///
    /// The horizon test subsumes plain backface culling at level 0 and
    /// curvature occlusion at deeper levels: the triangle is culled when the
    /// angle between its outward direction and the camera-to-center ray
    /// exceeds the per-level bound.
    fn evaluate(
        &self,
        a: Vec3,
        b: Vec3,
        c: Vec3,
        level: u32,
        frustum_flag: bool,
        camera: &CameraState,
    ) -> SplitDecision {
        let center = (a + b + c) / 3.0;

        if self.config.horizon_cull {
            let cam_to_center = center - camera.position;
            if center.normalize().dot(cam_to_center.normalize())
                >= self.tables.angle_dot[level as usize]
            {
                return SplitDecision::Cull;
            }
        }

        if frustum_flag && self.config.frustum_cull {
            let bounds = Aabb::from_center_extents(center, center - a);
            if !camera.frustum.intersects_aabb(&bounds) {
                return SplitDecision::Cull;
            }
            if level >= self.config.max_level {
                return SplitDecision::Leaf;
            }
            if Self::min_corner_distance(a, b, c, camera)
                < self.tables.distance[level as usize]
            {
                return SplitDecision::Split;
            }
            return SplitDecision::Leaf;
        }

        if level >= self.config.max_level {
            return SplitDecision::Leaf;
        }
        if Self::min_corner_distance(a, b, c, camera) < self.tables.distance[level as usize] {
            return SplitDecision::SplitCull;
        }
        SplitDecision::Leaf
    }

    /// Recursively subdivide one triangle, emitting leaves into `out`.
    #[allow(clippy::too_many_arguments)]
    fn subdivide(
        &self,
        a: Vec3,
        b: Vec3,
        c: Vec3,
        level: u32,
        frustum_flag: bool,
        camera: &CameraState,
        out: &mut Vec<LeafInstance>,
    ) {
        match self.evaluate(a, b, c, level, frustum_flag, camera) {
            SplitDecision::Cull => {}
            SplitDecision::Leaf => out.push(LeafInstance {
                level,
                a,
                r: b - a,
                s: c - a,
            }),
            decision @ (SplitDecision::Split | SplitDecision::SplitCull) => {
                let radius = self.config.radius;
                // Edge midpoints, pushed back onto the sphere. The
                // reprojection is what separates a level from a flat split.
                let d = ((b - a) * 0.5 + a).normalize() * radius;
                let e = ((c - b) * 0.5 + b).normalize() * radius;
                let f = ((a - c) * 0.5 + c).normalize() * radius;

                let child_flag = match self.config.frustum_inheritance {
                    FrustumInheritance::Retest => decision == SplitDecision::Split,
                    FrustumInheritance::Alternate => decision == SplitDecision::SplitCull,
                };

                let next = level + 1;
                self.subdivide(a, d, f, next, child_flag, camera, out);
                self.subdivide(d, b, e, next, child_flag, camera, out);
                self.subdivide(e, c, f, next, child_flag, camera, out);
                self.subdivide(d, e, f, next, child_flag, camera, out);
            }
        }
    }
}
