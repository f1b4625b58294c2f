//! CPU mesh assembly for LOD leaf lists
//!
//! Expands a leaf list through the shared patch template into engine-agnostic
//! mesh data. A real renderer draws the template once per leaf with GPU
//! instancing; this module is the CPU analogue for previews, tools and tests.

use glam::Vec3;

use crate::patch::PatchTemplate;
use crate::triangulator::LeafInstance;

/// Engine-agnostic mesh data output
///
/// Contains raw vertex data suitable for any rendering engine:
/// - Bevy: Convert to `Mesh` with attributes
/// - Godot: Convert to `ArrayMesh`
/// - wgpu: Use directly as vertex buffers
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Vertex positions (3D coordinates)
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals (normalized direction from sphere center)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check if mesh is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Expand a leaf list through the patch template into a mesh.
///
/// Each patch vertex is mapped through the leaf's affine frame
/// (`a + u * r + v * s`) and reprojected onto the sphere of the given
/// radius, so patch detail follows the surface curvature instead of the flat
/// leaf plane. Vertices are not shared between leaves; cracks between
/// neighboring leaves at different levels are the renderer's geomorphing
/// concern, not patched here.
pub fn build_mesh(leaves: &[LeafInstance], patch: &PatchTemplate, radius: f32) -> MeshData {
    let mut mesh = MeshData::default();
    let verts_per_leaf = patch.vertex_count();
    mesh.positions.reserve(leaves.len() * verts_per_leaf);
    mesh.normals.reserve(leaves.len() * verts_per_leaf);
    mesh.indices.reserve(leaves.len() * patch.indices().len());

    for leaf in leaves {
        let base = mesh.positions.len() as u32;
        for v in patch.vertices() {
            let on_plane = leaf.point_at(v.pos.x, v.pos.y);
            let normal = on_plane.normalize();
            let on_sphere: Vec3 = normal * radius;
            mesh.positions.push([on_sphere.x, on_sphere.y, on_sphere.z]);
            mesh.normals.push([normal.x, normal.y, normal.z]);
        }
        for &idx in patch.indices() {
            mesh.indices.push(base + idx);
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_leaf() -> LeafInstance {
        // One octant-sized triangle on the unit sphere.
        let a = Vec3::X;
        let b = Vec3::Y;
        let c = Vec3::Z;
        LeafInstance {
            level: 0,
            a,
            r: b - a,
            s: c - a,
        }
    }

    #[test]
    fn test_counts_scale_with_leaves() {
        let patch = PatchTemplate::generate(2).unwrap();
        let leaves = [unit_leaf(), unit_leaf()];
        let mesh = build_mesh(&leaves, &patch, 1.0);

        assert_eq!(mesh.vertex_count(), 2 * patch.vertex_count());
        assert_eq!(mesh.triangle_count(), 2 * patch.triangle_count());
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.indices.len() % 3, 0);
    }

    #[test]
    fn test_vertices_reprojected_onto_sphere() {
        let patch = PatchTemplate::generate(3).unwrap();
        let radius = 42.0;
        let mesh = build_mesh(&[unit_leaf()], &patch, radius);

        for p in &mesh.positions {
            let len = Vec3::from(*p).length();
            assert!((len - radius).abs() < radius * 1e-5);
        }
    }

    #[test]
    fn test_normals_are_unit_radial() {
        let patch = PatchTemplate::generate(2).unwrap();
        let mesh = build_mesh(&[unit_leaf()], &patch, 5.0);

        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let pos = Vec3::from(*p);
            let normal = Vec3::from(*n);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert!(normal.dot(pos.normalize()) > 0.999);
        }
    }

    #[test]
    fn test_indices_stay_in_range() {
        let patch = PatchTemplate::generate(1).unwrap();
        let mesh = build_mesh(&[unit_leaf(), unit_leaf(), unit_leaf()], &patch, 1.0);
        let count = mesh.vertex_count() as u32;
        for &idx in &mesh.indices {
            assert!(idx < count);
        }
    }

    #[test]
    fn test_empty_leaf_list() {
        let patch = PatchTemplate::generate(2).unwrap();
        let mesh = build_mesh(&[], &patch, 1.0);
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }
}
