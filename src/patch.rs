//! Shared patch template for leaf instancing
//!
//! A fixed unit-triangle tessellation generated once and instanced per leaf
//! by the renderer. Vertex positions live in normalized triangle space
//! (`u + v <= 1`); each vertex also carries a 2D morph vector pointing at its
//! position in the next-coarser grid, which a geomorphing shader blends in by
//! camera distance to avoid popping.

use glam::Vec2;

use crate::error::{IcosphereError, Result};

/// Geomorph blend range as a fraction of a level's distance band.
pub const MORPH_RANGE: f32 = 0.5;

/// One template vertex: grid position plus geomorph offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchVertex {
    /// Position in normalized triangle space
    pub pos: Vec2,
    /// Offset toward this vertex's coarser-level position
    pub morph: Vec2,
}

/// The camera-independent unit-triangle grid.
///
/// `levels` subdivisions give `RC = 1 + 2^levels` vertex rows,
/// `RC * (RC + 1) / 2` vertices and `4^levels` triangles.
#[derive(Debug, Clone, Default)]
pub struct PatchTemplate {
    vertices: Vec<PatchVertex>,
    indices: Vec<u32>,
    levels: u32,
}

impl PatchTemplate {
    /// Generate the template grid for the given subdivision level count.
    ///
    /// Deterministic and independent of any leaf or camera.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `levels > 8` (the vertex count grows as
    /// `4^levels`).
    pub fn generate(levels: u32) -> Result<Self> {
        if levels > 8 {
            return Err(IcosphereError::InvalidConfig(format!(
                "patch levels must be <= 8 (got {})",
                levels
            )));
        }

        let rc = 1 + (1usize << levels);
        let delta = 1.0 / (rc as f32 - 1.0);

        let mut vertices = Vec::with_capacity(rc * (rc + 1) / 2);
        let mut indices = Vec::with_capacity(3 * (1usize << (2 * levels)));

        let mut row_idx = 0usize;
        let mut next_idx = 0usize;
        for row in 0..rc {
            let num_cols = rc - row;
            next_idx += num_cols;
            for col in 0..num_cols {
                let pos = Vec2::new(col as f32 * delta, row as f32 * delta);
                // Odd vertices morph toward the even neighbor that survives
                // in the coarser grid.
                let morph = match (row % 2, col % 2) {
                    (0, 1) => Vec2::new(-delta, 0.0),
                    (1, 0) => Vec2::new(0.0, delta),
                    (1, 1) => Vec2::new(delta, -delta),
                    _ => Vec2::ZERO,
                };
                vertices.push(PatchVertex { pos, morph });

                if row < rc - 1 && col < num_cols - 1 {
                    indices.push((row_idx + col) as u32);
                    indices.push((next_idx + col) as u32);
                    indices.push((1 + row_idx + col) as u32);
                    if col < num_cols - 2 {
                        indices.push((next_idx + col) as u32);
                        indices.push((1 + next_idx + col) as u32);
                        indices.push((1 + row_idx + col) as u32);
                    }
                }
            }
            row_idx = next_idx;
        }

        Ok(Self {
            vertices,
            indices,
            levels,
        })
    }

    /// Number of subdivision levels the grid was generated with.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Vertex rows along one edge (`1 + 2^levels`).
    pub fn row_count(&self) -> usize {
        1 + (1usize << self.levels)
    }

    /// Template vertices.
    pub fn vertices(&self) -> &[PatchVertex] {
        &self.vertices
    }

    /// Number of template vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Triangle index buffer (three entries per triangle).
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles in the grid.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
