//! Per-level threshold table precomputation
//!
//! Three parallel tables indexed by subdivision level drive the split/cull
//! decisions:
//!
//! - `distance[level]`: camera distance below which a triangle at this level
//!   must split further. Depends on camera FOV and viewport width, so it is
//!   rebuilt every generation pass; entries halve per level because triangle
//!   edges halve per level.
//! - `angle_dot[level]`: cosine-domain horizon-cull bound, widened by the
//!   maximum surface height so displaced geometry just past the horizon is
//!   not culled prematurely.
//! - `height_mult[level]`: bounding-volume inflation factors for external
//!   occlusion/LOD consumers. Not read by the split heuristic itself.

use glam::Vec3;

use crate::camera::CameraState;
use crate::config::PlanetConfig;
use crate::error::{IcosphereError, Result};
use crate::icosahedron::IcoFace;

/// Extra distance-table entries past `max_level` for lookahead safety.
const DISTANCE_TABLE_MARGIN: u32 = 5;

/// Per-level split and cull thresholds.
///
/// `angle_dot` and `height_mult` depend only on planet geometry and are
/// computed once; `distance` additionally depends on the camera projection
/// and is rebuilt via [`ThresholdTables::rebuild_distance`] before each
/// triangulation pass.
#[derive(Debug, Clone, Default)]
pub struct ThresholdTables {
    /// Horizon-cull dot-product bounds, length `max_level + 1`
    pub angle_dot: Vec<f32>,
    /// Bounding-volume height multipliers, length `max_level + 1`
    pub height_mult: Vec<f32>,
    /// Minimum split distances, length `max_level + DISTANCE_TABLE_MARGIN`
    pub distance: Vec<f32>,
}

impl ThresholdTables {
    /// Compute the camera-independent tables for a planet.
    ///
    /// `first_face` anchors the height-multiplier table the way the split
    /// distances are anchored to the first face's edge length.
    pub fn new(config: &PlanetConfig, first_face: &IcoFace) -> Self {
        Self {
            angle_dot: angle_dot_table(config),
            height_mult: height_mult_table(config, first_face),
            distance: Vec::new(),
        }
    }

    /// Rebuild the distance table for the current camera projection.
    ///
    /// On error the previous table is left untouched, so a failed rebuild
    /// never corrupts thresholds already in use.
    ///
    /// # Errors
    ///
    /// `InvalidCamera` for non-positive FOV or viewport width;
    /// `DegenerateGeometry` if the projection fraction or any entry is
    /// non-finite or vanishes.
    pub fn rebuild_distance(
        &mut self,
        base_edge_length: f32,
        config: &PlanetConfig,
        camera: &CameraState,
    ) -> Result<()> {
        let table = distance_table(base_edge_length, config, camera)?;
        self.distance = table;
        Ok(())
    }
}

/// Horizon-cull dot-product bounds per level.
///
/// The culling angle is the half-angle of the cone behind the horizon that
/// can still be visible due to height displacement:
/// `acos(r / (r + max_h))`. Level 0 uses `0.5 + sin(culling_angle)`; deeper
/// levels halve the triangle's angular size starting from `acos(0.5)` and
/// take `sin(angle + culling_angle)`.
fn angle_dot_table(config: &PlanetConfig) -> Vec<f32> {
    let culling_angle = (config.radius / (config.radius + config.max_height)).acos();

    let mut table = Vec::with_capacity(config.max_level as usize + 1);
    table.push(0.5 + culling_angle.sin());
    let mut angle = 0.5_f32.acos();
    for _ in 1..=config.max_level {
        angle *= 0.5;
        table.push((angle + culling_angle).sin());
    }
    table
}

/// Bounding-volume height multipliers per level.
///
/// Level 0 is `1 / dot(normalize(a), normalize(center))` for the anchor
/// face; deeper levels replace `a` with the bc edge midpoint reprojected to
/// the sphere and add the normalized maximum height. Published for external
/// bounding-volume consumers only.
fn height_mult_table(config: &PlanetConfig, face: &IcoFace) -> Vec<f32> {
    let center = ((face.a + face.b + face.c) / 3.0).normalize() * config.radius;
    let center_dir = center.normalize();

    let mut table = Vec::with_capacity(config.max_level as usize + 1);
    table.push(1.0 / face.a.normalize().dot(center_dir));
    let norm_max_height = config.max_height / config.radius;
    for _ in 1..=config.max_level {
        let a: Vec3 = ((face.c - face.b) * 0.5 + face.b).normalize() * config.radius;
        table.push(1.0 / a.normalize().dot(center_dir) + norm_max_height);
    }
    table
}

/// Minimum split distances per level.
///
/// `frac` converts the allowed on-screen triangle size into an angular
/// fraction of the field of view; dividing the world-space edge length by it
/// yields the distance at which a triangle of that level projects to the
/// allowed pixel size. The edge length halves each level.
fn distance_table(
    base_edge_length: f32,
    config: &PlanetConfig,
    camera: &CameraState,
) -> Result<Vec<f32>> {
    if !(camera.fov_y_deg.is_finite() && camera.fov_y_deg > 0.0) {
        return Err(IcosphereError::InvalidCamera(format!(
            "field of view must be positive (got {})",
            camera.fov_y_deg
        )));
    }
    if !(camera.viewport_width.is_finite() && camera.viewport_width > 0.0) {
        return Err(IcosphereError::InvalidCamera(format!(
            "viewport width must be positive (got {})",
            camera.viewport_width
        )));
    }

    let frac =
        (config.allowed_triangle_px * camera.fov_y_deg / camera.viewport_width).to_radians().tan();
    if !frac.is_finite() || frac <= f32::EPSILON {
        return Err(IcosphereError::DegenerateGeometry(format!(
            "projection fraction is unusable (got {})",
            frac
        )));
    }

    let len = (config.max_level + DISTANCE_TABLE_MARGIN) as usize;
    let mut table = Vec::with_capacity(len);
    let mut size = base_edge_length;
    for _ in 0..len {
        let entry = size / frac;
        if !entry.is_finite() {
            return Err(IcosphereError::DegenerateGeometry(format!(
                "distance entry is non-finite (edge {}, frac {})",
                size, frac
            )));
        }
        table.push(entry);
        size *= 0.5;
    }
    Ok(table)
}
