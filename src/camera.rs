//! Camera state snapshot and frustum culling primitives
//!
//! The triangulator never talks to a host engine's camera object; it receives
//! an immutable [`CameraState`] snapshot per generation pass. The frustum is
//! six inward-facing planes extracted from a view-projection matrix and
//! tested against axis-aligned bounding boxes with the p-vertex method.

use glam::{Mat4, Vec3, Vec4};

/// An axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from min and max corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from a center point and (non-negative) half-extents.
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        let extents = extents.abs();
        Self {
            min: center - extents,
            max: center + extents,
        }
    }
}

/// A view frustum defined by six inward-pointing planes.
///
/// Each plane is stored as `Vec4(a, b, c, d)` where `(a, b, c)` is the
/// normalized inward normal and `d` the signed distance term; a point `p` is
/// on the visible side when `dot((a,b,c), p) + d >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Vec4; 6],
}

impl Frustum {
    /// Create a frustum directly from six inward-facing planes
    /// (left, right, bottom, top, near, far).
    pub fn new(planes: [Vec4; 6]) -> Self {
        Self { planes }
    }

    /// Extract frustum planes from a combined view-projection matrix using
    /// the Gribb-Hartmann method.
    ///
    /// Assumes a 0..1 clip-space depth range (`Mat4::perspective_rh`): the
    /// near plane is row 2 and the far plane row 3 minus row 2.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let mut planes = [
            rows[3] + rows[0], // left
            rows[3] - rows[0], // right
            rows[3] + rows[1], // bottom
            rows[3] - rows[1], // top
            rows[2],           // near (0..1 depth)
            rows[3] - rows[2], // far
        ];

        for plane in &mut planes {
            let len = plane.truncate().length();
            if len > 0.0 {
                *plane /= len;
            }
        }

        Self { planes }
    }

    /// The six planes in left, right, bottom, top, near, far order.
    pub fn planes(&self) -> &[Vec4; 6] {
        &self.planes
    }

    /// Test whether a point lies inside all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(point) + plane.w >= 0.0)
    }

    /// Test whether an AABB is at least partially inside the frustum.
    ///
    /// Uses the p-vertex method: for each plane, the corner of the AABB
    /// furthest along the plane normal is tested; if that corner is behind
    /// the plane, the whole box is outside. Conservative — may report some
    /// fully-outside boxes near frustum corners as visible, never the
    /// reverse.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        for plane in &self.planes {
            let normal = plane.truncate();
            let p = Vec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );
            if normal.dot(p) + plane.w < 0.0 {
                return false;
            }
        }
        true
    }
}

/// Read-only camera snapshot consumed by one triangulation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Camera position in world space
    pub position: Vec3,
    /// Vertical field of view in degrees
    pub fov_y_deg: f32,
    /// Viewport width in pixels
    pub viewport_width: f32,
    /// View frustum for this viewpoint
    pub frustum: Frustum,
}

impl CameraState {
    /// Create a snapshot from already-extracted frustum planes.
    pub fn new(position: Vec3, fov_y_deg: f32, viewport_width: f32, frustum: Frustum) -> Self {
        Self {
            position,
            fov_y_deg,
            viewport_width,
            frustum,
        }
    }

    /// Create a snapshot for a perspective camera looking at a target.
    ///
    /// Builds a right-handed look-at view and a perspective projection with
    /// the given near/far planes, then extracts the frustum from their
    /// product. `aspect` is width over height.
    #[allow(clippy::too_many_arguments)]
    pub fn perspective(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y_deg: f32,
        viewport_width: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let proj = Mat4::perspective_rh(fov_y_deg.to_radians(), aspect, z_near, z_far);
        let view = Mat4::look_at_rh(position, target, up);
        let frustum = Frustum::from_view_projection(&(proj * view));
        Self {
            position,
            fov_y_deg,
            viewport_width,
            frustum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> CameraState {
        // At +Z, looking toward the origin down -Z.
        CameraState::perspective(
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::ZERO,
            Vec3::Y,
            60.0,
            1024.0,
            16.0 / 9.0,
            0.1,
            1000.0,
        )
    }

    #[test]
    fn test_point_in_front_is_visible() {
        let cam = test_camera();
        assert!(cam.frustum.contains_point(Vec3::ZERO));
        assert!(cam.frustum.contains_point(Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_point_behind_is_culled() {
        let cam = test_camera();
        assert!(!cam.frustum.contains_point(Vec3::new(0.0, 0.0, 20.0)));
        assert!(!cam.frustum.contains_point(Vec3::new(0.0, 0.0, 11.0)));
    }

    #[test]
    fn test_point_outside_fov_is_culled() {
        let cam = test_camera();
        // Far off to the side at the near distance
        assert!(!cam.frustum.contains_point(Vec3::new(100.0, 0.0, 9.0)));
    }

    #[test]
    fn test_aabb_visibility() {
        let cam = test_camera();

        let visible = Aabb::from_center_extents(Vec3::ZERO, Vec3::splat(1.0));
        assert!(cam.frustum.intersects_aabb(&visible));

        let behind = Aabb::from_center_extents(Vec3::new(0.0, 0.0, 50.0), Vec3::splat(1.0));
        assert!(!cam.frustum.intersects_aabb(&behind));
    }

    #[test]
    fn test_aabb_straddling_plane_is_visible() {
        let cam = test_camera();
        // Centered outside the left plane but large enough to poke into view.
        let straddling =
            Aabb::from_center_extents(Vec3::new(-15.0, 0.0, 0.0), Vec3::splat(20.0));
        assert!(cam.frustum.intersects_aabb(&straddling));
    }

    #[test]
    fn test_aabb_negative_extents_normalized() {
        let aabb = Aabb::from_center_extents(Vec3::ZERO, Vec3::new(-2.0, 1.0, -3.0));
        assert_eq!(aabb.min, Vec3::new(-2.0, -1.0, -3.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 1.0, 3.0));
    }
}
