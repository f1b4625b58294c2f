//! Planet orchestrator
//!
//! Owns the triangulator, the shared patch template and the last published
//! leaf list. The host's main loop decides when to call [`Planet::tick`];
//! there are no engine lifecycle hooks. On any failure the previously
//! published leaves and tables stay live.

use log::debug;

use crate::camera::CameraState;
use crate::config::PlanetConfig;
use crate::error::Result;
use crate::patch::PatchTemplate;
use crate::triangulator::{LeafInstance, Triangulator};

/// An adaptively triangulated LOD planet
///
/// # Example
///
/// ```rust
/// use rust_icosphere_lod::*;
/// use glam::Vec3;
///
/// let config = PlanetConfigBuilder::new().build();
/// let mut planet = Planet::new(config).unwrap();
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
///
/// // First tick always triangulates
/// let leaves = planet.tick(&camera).unwrap();
/// assert!(leaves.is_some());
///
/// // Unchanged camera: previous list is still valid
/// assert!(planet.tick(&camera).unwrap().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Planet {
    config: PlanetConfig,
    triangulator: Triangulator,
    patch: PatchTemplate,
    leaves: Vec<LeafInstance>,
    last_camera: Option<CameraState>,
}

impl Planet {
    /// Build a planet: base faces, static threshold tables and the shared
    /// patch template. No geometry is generated until the first
    /// [`tick`](Self::tick).
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an unusable radius or patch level count.
    pub fn new(config: PlanetConfig) -> Result<Self> {
        let triangulator = Triangulator::new(&config)?;
        let patch = PatchTemplate::generate(config.patch_levels)?;
        debug!(
            "planet initialized: radius {}, max level {}, patch vertices {}",
            config.radius,
            config.max_level,
            patch.vertex_count()
        );
        Ok(Self {
            config,
            triangulator,
            patch,
            leaves: Vec::new(),
            last_camera: None,
        })
    }

    /// Retriangulate if the camera state warrants it.
    ///
    /// Regenerates on the first call, whenever the projection (FOV, viewport
    /// width or frustum) changed, or when the camera moved further than the
    /// configured `camera_epsilon`. Returns the fresh leaf list on
    /// regeneration, `None` when the previously published list is still
    /// valid.
    ///
    /// # Errors
    ///
    /// Propagates triangulation failures; the published leaf list and the
    /// last camera snapshot are unchanged on error, so the next tick retries.
    pub fn tick(&mut self, camera: &CameraState) -> Result<Option<&[LeafInstance]>> {
        if let Some(prev) = &self.last_camera {
            if !self.needs_update(prev, camera) {
                return Ok(None);
            }
        }

        let leaves = self.triangulator.generate_geometry(camera)?;
        self.leaves = leaves;
        self.last_camera = Some(*camera);
        Ok(Some(&self.leaves))
    }

    fn needs_update(&self, prev: &CameraState, camera: &CameraState) -> bool {
        if prev.fov_y_deg != camera.fov_y_deg
            || prev.viewport_width != camera.viewport_width
            || prev.frustum != camera.frustum
        {
            return true;
        }
        (camera.position - prev.position).length() > self.config.camera_epsilon
    }

    /// The configuration this planet was built with.
    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    /// The most recently published leaf list (empty before the first tick).
    pub fn leaves(&self) -> &[LeafInstance] {
        &self.leaves
    }

    /// The shared patch template, bound once by the renderer.
    pub fn patch(&self) -> &PatchTemplate {
        &self.patch
    }

    /// The triangulator, for table inspection.
    pub fn triangulator(&self) -> &Triangulator {
        &self.triangulator
    }

    /// The per-level split distances from the last tick, for shader upload.
    pub fn distance_table(&self) -> &[f32] {
        &self.triangulator.tables().distance
    }

    /// Replace the configuration, rebuilding base faces, tables and the
    /// patch template. The next [`tick`](Self::tick) retriangulates
    /// regardless of camera movement; until then the old leaf list stays
    /// published.
    ///
    /// # Errors
    ///
    /// On failure nothing is replaced — the planet keeps serving its
    /// previous state.
    pub fn reconfigure(&mut self, config: PlanetConfig) -> Result<()> {
        let triangulator = Triangulator::new(&config)?;
        let patch = PatchTemplate::generate(config.patch_levels)?;
        self.triangulator = triangulator;
        self.patch = patch;
        self.config = config;
        self.last_camera = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Frustum;
    use crate::config::PlanetConfigBuilder;
    use glam::{Vec3, Vec4};

    fn default_camera(position: Vec3) -> CameraState {
        CameraState::perspective(
            position,
            Vec3::ZERO,
            Vec3::Y,
            60.0,
            1024.0,
            16.0 / 9.0,
            0.1,
            1e6,
        )
    }

    #[test]
    fn test_first_tick_triangulates() {
        let mut planet = Planet::new(PlanetConfigBuilder::new().build()).unwrap();
        assert!(planet.leaves().is_empty());

        let camera = default_camera(Vec3::new(0.0, 0.0, 5000.0));
        let leaves = planet.tick(&camera).unwrap();
        assert!(leaves.is_some());
        assert!(!planet.leaves().is_empty());
        assert!(!planet.distance_table().is_empty());
    }

    #[test]
    fn test_unchanged_camera_skips_regeneration() {
        let mut planet = Planet::new(PlanetConfigBuilder::new().build()).unwrap();
        let camera = default_camera(Vec3::new(0.0, 0.0, 5000.0));

        planet.tick(&camera).unwrap();
        let count = planet.leaves().len();

        assert!(planet.tick(&camera).unwrap().is_none());
        assert_eq!(planet.leaves().len(), count);
    }

    #[test]
    fn test_moved_camera_regenerates() {
        let mut planet = Planet::new(PlanetConfigBuilder::new().build()).unwrap();
        planet
            .tick(&default_camera(Vec3::new(0.0, 0.0, 5000.0)))
            .unwrap();

        let moved = default_camera(Vec3::new(0.0, 0.0, 2500.0));
        assert!(planet.tick(&moved).unwrap().is_some());
    }

    #[test]
    fn test_camera_epsilon_suppresses_small_moves() {
        let config = PlanetConfigBuilder::new()
            .camera_epsilon(100.0)
            .unwrap()
            .frustum_cull(false)
            .build();
        let mut planet = Planet::new(config).unwrap();

        // Hand-built snapshots with identical frustums so only the position
        // delta matters.
        let frustum = Frustum::new([Vec4::new(0.0, 0.0, 1.0, 1e6); 6]);
        let near = CameraState::new(Vec3::new(0.0, 0.0, 5000.0), 60.0, 1024.0, frustum);
        planet.tick(&near).unwrap();

        let nudged = CameraState::new(Vec3::new(0.0, 0.0, 5050.0), 60.0, 1024.0, frustum);
        assert!(planet.tick(&nudged).unwrap().is_none());

        let jumped = CameraState::new(Vec3::new(0.0, 0.0, 5200.0), 60.0, 1024.0, frustum);
        assert!(planet.tick(&jumped).unwrap().is_some());
    }

    #[test]
    fn test_fov_change_regenerates() {
        let mut planet = Planet::new(PlanetConfigBuilder::new().build()).unwrap();
        let camera = default_camera(Vec3::new(0.0, 0.0, 5000.0));
        planet.tick(&camera).unwrap();

        let mut zoomed = camera;
        zoomed.fov_y_deg = 30.0;
        assert!(planet.tick(&zoomed).unwrap().is_some());
    }

    #[test]
    fn test_error_preserves_published_state() {
        let mut planet = Planet::new(PlanetConfigBuilder::new().build()).unwrap();
        let camera = default_camera(Vec3::new(0.0, 0.0, 5000.0));
        planet.tick(&camera).unwrap();
        let before = planet.leaves().to_vec();

        let mut bad = camera;
        bad.viewport_width = 0.0;
        assert!(planet.tick(&bad).is_err());
        assert_eq!(planet.leaves(), before.as_slice());

        // And the planet recovers on the next valid tick.
        let moved = default_camera(Vec3::new(0.0, 0.0, 4000.0));
        assert!(planet.tick(&moved).unwrap().is_some());
    }

    #[test]
    fn test_reconfigure_rebuilds() {
        let mut planet = Planet::new(PlanetConfigBuilder::new().build()).unwrap();
        let camera = default_camera(Vec3::new(0.0, 0.0, 5000.0));
        planet.tick(&camera).unwrap();

        let smaller = PlanetConfigBuilder::new()
            .radius(100.0)
            .unwrap()
            .patch_levels(2)
            .unwrap()
            .build();
        planet.reconfigure(smaller).unwrap();
        assert_eq!(planet.config().radius, 100.0);
        assert_eq!(planet.patch().levels(), 2);

        // Same camera now retriangulates because the rebuild cleared the
        // snapshot.
        assert!(planet.tick(&camera).unwrap().is_some());
    }

    #[test]
    fn test_failed_reconfigure_keeps_old_state() {
        let mut planet = Planet::new(PlanetConfigBuilder::new().build()).unwrap();
        let camera = default_camera(Vec3::new(0.0, 0.0, 5000.0));
        planet.tick(&camera).unwrap();
        let before = planet.leaves().to_vec();

        let mut broken = *planet.config();
        broken.radius = -1.0;
        assert!(planet.reconfigure(broken).is_err());

        assert_eq!(planet.config().radius, 1700.0);
        assert_eq!(planet.leaves(), before.as_slice());
        // Previous snapshot survives too, so an unchanged camera still skips.
        assert!(planet.tick(&camera).unwrap().is_none());
    }

    #[test]
    fn test_patch_matches_config_levels() {
        let config = PlanetConfigBuilder::new().patch_levels(3).unwrap().build();
        let planet = Planet::new(config).unwrap();
        let rc = 1 + (1usize << 3);
        assert_eq!(planet.patch().vertex_count(), rc * (rc + 1) / 2);
    }
}
