use thiserror::Error;

use super::surface::Surface;

/// A triangle mesh ready for the rendering collaborator: one position and
/// one normal per vertex, plus a triangle-list index buffer.
///
/// The mesh is owned by its generating shape and rebuilt wholesale whenever
/// a generation parameter changes; it is handed to the renderer only as a
/// borrowed view (see [`crate::render::RenderBackend`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderMesh {
    pub positions: Vec<[f64; 3]>,
    pub normals: Vec<[f64; 3]>,
    pub indices: Vec<u32>,
}

/// Mesh consistency violations caught by [`RenderMesh::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("indices are not a triangle list (len {0} is not a multiple of 3)")]
    NotTriangleList(usize),
    #[error("vertex {0} has a non-finite coordinate")]
    InvalidVertex(usize),
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("normal count {normals} does not match vertex count {vertices}")]
    AttributeMismatch { normals: usize, vertices: usize },
}

impl RenderMesh {
    #[must_use]
    pub fn new(positions: Vec<[f64; 3]>, normals: Vec<[f64; 3]>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            normals,
            indices,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty() || self.indices.is_empty()
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangleList(self.indices.len()));
        }
        if self.normals.len() != self.positions.len() {
            return Err(MeshError::AttributeMismatch {
                normals: self.normals.len(),
                vertices: self.positions.len(),
            });
        }
        for (i, p) in self.positions.iter().enumerate() {
            if !p.iter().all(|c| c.is_finite()) {
                return Err(MeshError::InvalidVertex(i));
            }
        }
        let n = self.positions.len();
        for &index in &self.indices {
            if index as usize >= n {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    vertex_count: n,
                });
            }
        }
        Ok(())
    }

    /// Interleaved `[x y z nx ny nz]` f32 buffer, the vertex layout the
    /// rendering collaborator consumes.
    #[must_use]
    pub fn interleaved(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.positions.len() * 6);
        for (p, n) in self.positions.iter().zip(&self.normals) {
            out.extend(p.iter().map(|&c| c as f32));
            out.extend(n.iter().map(|&c| c as f32));
        }
        out
    }
}

/// Triangulates a `u_count × v_count` vertex grid into two triangles per
/// cell. Vertices are expected in row-major order with `u` varying fastest
/// (stride `u_count`). Winding is counter-clockwise when `u` tracks +x and
/// `v` tracks +y, matching the `du × dv` normal convention.
#[must_use]
pub fn triangulate_grid(u_count: usize, v_count: usize) -> Vec<u32> {
    let u_count = u_count.max(2);
    let v_count = v_count.max(2);

    let quad_u = u_count - 1;
    let quad_v = v_count - 1;
    let mut indices = Vec::with_capacity(quad_u * quad_v * 6);

    let stride = u_count;
    for v in 0..quad_v {
        for u in 0..quad_u {
            let i0 = (v * stride + u) as u32;
            let i1 = (v * stride + u + 1) as u32;
            let i2 = ((v + 1) * stride + u) as u32;
            let i3 = ((v + 1) * stride + u + 1) as u32;

            indices.extend_from_slice(&[i0, i1, i2]);
            indices.extend_from_slice(&[i2, i1, i3]);
        }
    }

    indices
}

/// Tessellates a surface into a `(resolution_u + 1) × (resolution_v + 1)`
/// vertex grid with per-vertex normals and a triangulated index list.
#[must_use]
pub fn tessellate_surface(
    surface: &impl Surface,
    resolution_u: usize,
    resolution_v: usize,
) -> RenderMesh {
    let resolution_u = resolution_u.max(1);
    let resolution_v = resolution_v.max(1);

    let u_count = resolution_u + 1;
    let v_count = resolution_v + 1;

    let mut positions = Vec::with_capacity(u_count * v_count);
    let mut normals = Vec::with_capacity(u_count * v_count);

    for j in 0..v_count {
        let v = j as f64 / resolution_v as f64;
        for i in 0..u_count {
            let u = i as f64 / resolution_u as f64;
            positions.push(surface.point_at(u, v).to_array());
            normals.push(surface.normal_at(u, v).to_array());
        }
    }

    let indices = triangulate_grid(u_count, v_count);
    RenderMesh::new(positions, normals, indices)
}
