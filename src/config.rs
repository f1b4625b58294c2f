//! Planet LOD Configuration and Builder
//!
//! This module provides configuration types for deterministic adaptive
//! icosphere triangulation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{IcosphereError, Result};

/// How the frustum-test flag is inherited by the four children of a split
/// triangle.
///
/// The per-triangle split decision distinguishes `Split` (the parent passed a
/// frustum test) from `SplitCull` (the parent skipped the frustum test). The
/// two modes differ in which of those outcomes keeps frustum testing enabled
/// for the children. Both produce identical geometry when culling is
/// disabled; they only change how many redundant frustum tests run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumInheritance {
    /// Children of a frustum-tested parent are tested again (default).
    /// Conservative: every emitted leaf on the frustum boundary has been
    /// individually tested.
    Retest,
    /// Children of a frustum-tested parent skip the test for one level and
    /// re-enable it below, alternating test/skip down the subtree.
    Alternate,
}

impl Default for FrustumInheritance {
    fn default() -> Self {
        FrustumInheritance::Retest
    }
}

/// Configuration for adaptive icosphere LOD triangulation
///
/// The same configuration and camera state always produce the identical leaf
/// list. Changing any field here requires a full rebuild of the threshold
/// tables and base faces ([`Planet::reconfigure`](crate::Planet::reconfigure)
/// or a fresh [`Planet`](crate::Planet)); only camera movement is handled per
/// frame.
///
/// # Example
///
/// ```rust
/// use rust_icosphere_lod::*;
///
/// let config = PlanetConfigBuilder::new()
///     .radius(1700.0).unwrap()
///     .max_height(10.0).unwrap()
///     .max_level(10).unwrap()
///     .build();
/// assert_eq!(config.radius, 1700.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanetConfig {
    /// Sphere radius in world units
    pub radius: f32,

    /// Maximum surface height displacement above the sphere
    ///
    /// Not applied to vertex positions; it only widens the horizon-cull
    /// angle and the height-multiplier table so displaced geometry near the
    /// horizon is not culled prematurely.
    pub max_height: f32,

    /// Maximum subdivision level; no triangle splits beyond it
    pub max_level: u32,

    /// Target on-screen triangle size in pixels
    ///
    /// The distance table is scaled so that a triangle at any level projects
    /// to roughly this size before it is allowed to split further.
    pub allowed_triangle_px: f32,

    /// Subdivision levels of the shared patch template
    pub patch_levels: u32,

    /// Enable horizon/backface culling against the planet's curvature
    pub horizon_cull: bool,

    /// Enable bounding-box tests against the camera frustum
    pub frustum_cull: bool,

    /// Frustum-flag inheritance rule for children of split triangles
    pub frustum_inheritance: FrustumInheritance,

    /// Minimum camera movement (world units) that triggers retriangulation
    ///
    /// Zero means any movement retriangulates.
    pub camera_epsilon: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        PlanetConfigBuilder::new().build()
    }
}

/// Builder for creating PlanetConfig with validation
///
/// Setters that can receive invalid values return `Result<Self>` so errors
/// surface at the call site rather than during triangulation.
///
/// # Example
///
/// ```rust
/// use rust_icosphere_lod::*;
///
/// // Defaults match a 1700-unit planet with 10 levels of subdivision
/// let config = PlanetConfigBuilder::new().build();
///
/// // Customize
/// let config = PlanetConfigBuilder::new()
///     .radius(100.0).unwrap()
///     .max_level(3).unwrap()
///     .frustum_cull(false)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct PlanetConfigBuilder {
    radius: f32,
    max_height: f32,
    max_level: u32,
    allowed_triangle_px: f32,
    patch_levels: u32,
    horizon_cull: bool,
    frustum_cull: bool,
    frustum_inheritance: FrustumInheritance,
    camera_epsilon: f32,
}

impl PlanetConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - radius: 1700.0
    /// - max_height: 10.0
    /// - max_level: 10
    /// - allowed_triangle_px: 300.0
    /// - patch_levels: 4
    /// - horizon_cull / frustum_cull: enabled
    /// - frustum_inheritance: Retest
    /// - camera_epsilon: 0.0 (retriangulate on any movement)
    pub fn new() -> Self {
        Self {
            radius: 1700.0,
            max_height: 10.0,
            max_level: 10,
            allowed_triangle_px: 300.0,
            patch_levels: 4,
            horizon_cull: true,
            frustum_cull: true,
            frustum_inheritance: FrustumInheritance::default(),
            camera_epsilon: 0.0,
        }
    }

    /// Set the sphere radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the radius is not a positive finite number.
    pub fn radius(mut self, radius: f32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(IcosphereError::InvalidConfig(format!(
                "radius must be positive (got {})",
                radius
            )));
        }
        self.radius = radius;
        Ok(self)
    }

    /// Set the maximum surface height displacement
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the height is negative or non-finite.
    pub fn max_height(mut self, max_height: f32) -> Result<Self> {
        if !(max_height.is_finite() && max_height >= 0.0) {
            return Err(IcosphereError::InvalidConfig(format!(
                "max height must be >= 0 (got {})",
                max_height
            )));
        }
        self.max_height = max_height;
        Ok(self)
    }

    /// Set the maximum subdivision level
    ///
    /// The worst-case leaf count is `20 * 4^max_level`, so levels beyond 20
    /// are rejected as impractical.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `max_level > 20`.
    pub fn max_level(mut self, max_level: u32) -> Result<Self> {
        if max_level > 20 {
            return Err(IcosphereError::InvalidConfig(format!(
                "max level must be <= 20 (got {})",
                max_level
            )));
        }
        self.max_level = max_level;
        Ok(self)
    }

    /// Set the target on-screen triangle size in pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the size is not a positive finite number.
    pub fn allowed_triangle_px(mut self, px: f32) -> Result<Self> {
        if !(px.is_finite() && px > 0.0) {
            return Err(IcosphereError::InvalidConfig(format!(
                "allowed triangle size must be positive (got {})",
                px
            )));
        }
        self.allowed_triangle_px = px;
        Ok(self)
    }

    /// Set the subdivision levels of the shared patch template
    ///
    /// The template has `(1 + 2^levels) * (2 + 2^levels) / 2` vertices, so
    /// levels beyond 8 are rejected as impractical.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `levels > 8`.
    pub fn patch_levels(mut self, levels: u32) -> Result<Self> {
        if levels > 8 {
            return Err(IcosphereError::InvalidConfig(format!(
                "patch levels must be <= 8 (got {})",
                levels
            )));
        }
        self.patch_levels = levels;
        Ok(self)
    }

    /// Enable or disable horizon/backface culling
    pub fn horizon_cull(mut self, enabled: bool) -> Self {
        self.horizon_cull = enabled;
        self
    }

    /// Enable or disable frustum culling
    pub fn frustum_cull(mut self, enabled: bool) -> Self {
        self.frustum_cull = enabled;
        self
    }

    /// Set the frustum-flag inheritance rule
    pub fn frustum_inheritance(mut self, mode: FrustumInheritance) -> Self {
        self.frustum_inheritance = mode;
        self
    }

    /// Set the camera movement threshold that triggers retriangulation
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the threshold is negative or non-finite.
    pub fn camera_epsilon(mut self, epsilon: f32) -> Result<Self> {
        if !(epsilon.is_finite() && epsilon >= 0.0) {
            return Err(IcosphereError::InvalidConfig(format!(
                "camera epsilon must be >= 0 (got {})",
                epsilon
            )));
        }
        self.camera_epsilon = epsilon;
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> PlanetConfig {
        PlanetConfig {
            radius: self.radius,
            max_height: self.max_height,
            max_level: self.max_level,
            allowed_triangle_px: self.allowed_triangle_px,
            patch_levels: self.patch_levels,
            horizon_cull: self.horizon_cull,
            frustum_cull: self.frustum_cull,
            frustum_inheritance: self.frustum_inheritance,
            camera_epsilon: self.camera_epsilon,
        }
    }
}

impl Default for PlanetConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = PlanetConfigBuilder::new().build();
        assert_eq!(config.radius, 1700.0);
        assert_eq!(config.max_height, 10.0);
        assert_eq!(config.max_level, 10);
        assert_eq!(config.allowed_triangle_px, 300.0);
        assert_eq!(config.patch_levels, 4);
        assert!(config.horizon_cull);
        assert!(config.frustum_cull);
        assert_eq!(config.frustum_inheritance, FrustumInheritance::Retest);
        assert_eq!(config.camera_epsilon, 0.0);
    }

    #[test]
    fn test_builder_custom() {
        let config = PlanetConfigBuilder::new()
            .radius(100.0)
            .unwrap()
            .max_height(2.5)
            .unwrap()
            .max_level(3)
            .unwrap()
            .allowed_triangle_px(150.0)
            .unwrap()
            .patch_levels(2)
            .unwrap()
            .horizon_cull(false)
            .frustum_cull(false)
            .frustum_inheritance(FrustumInheritance::Alternate)
            .build();

        assert_eq!(config.radius, 100.0);
        assert_eq!(config.max_height, 2.5);
        assert_eq!(config.max_level, 3);
        assert_eq!(config.allowed_triangle_px, 150.0);
        assert_eq!(config.patch_levels, 2);
        assert!(!config.horizon_cull);
        assert!(!config.frustum_cull);
        assert_eq!(config.frustum_inheritance, FrustumInheritance::Alternate);
    }

    #[test]
    fn test_builder_invalid_radius() {
        assert!(PlanetConfigBuilder::new().radius(0.0).is_err());
        assert!(PlanetConfigBuilder::new().radius(-5.0).is_err());
        assert!(PlanetConfigBuilder::new().radius(f32::NAN).is_err());
    }

    #[test]
    fn test_builder_invalid_height() {
        assert!(PlanetConfigBuilder::new().max_height(-1.0).is_err());
        assert!(PlanetConfigBuilder::new().max_height(f32::INFINITY).is_err());
        // Zero height is valid (no displacement)
        assert!(PlanetConfigBuilder::new().max_height(0.0).is_ok());
    }

    #[test]
    fn test_builder_level_bounds() {
        assert!(PlanetConfigBuilder::new().max_level(20).is_ok());
        assert!(PlanetConfigBuilder::new().max_level(21).is_err());
        assert!(PlanetConfigBuilder::new().max_level(0).is_ok());
    }

    #[test]
    fn test_builder_invalid_pixel_size() {
        assert!(PlanetConfigBuilder::new().allowed_triangle_px(0.0).is_err());
        assert!(PlanetConfigBuilder::new().allowed_triangle_px(-10.0).is_err());
    }

    #[test]
    fn test_builder_patch_level_bounds() {
        assert!(PlanetConfigBuilder::new().patch_levels(8).is_ok());
        assert!(PlanetConfigBuilder::new().patch_levels(9).is_err());
    }

    #[test]
    fn test_builder_invalid_epsilon() {
        assert!(PlanetConfigBuilder::new().camera_epsilon(-0.1).is_err());
        assert!(PlanetConfigBuilder::new().camera_epsilon(1.0).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = PlanetConfigBuilder::new()
            .radius(42.0)
            .unwrap()
            .max_level(5)
            .unwrap()
            .build();

        let json = serde_json::to_string(&config).unwrap();
        let restored: PlanetConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config, restored);
    }
}
