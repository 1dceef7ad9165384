//! Procedural meshes for the fixed-form shapes: axis-aligned cuboids and
//! latitude/longitude spheres.

use std::f64::consts::PI;

use super::core::Vec3;
use super::mesh::RenderMesh;

/// Axis-aligned cuboid centered at the origin: 4 vertices per face so each
/// face carries its own flat normal, 2 triangles per face.
#[must_use]
pub fn cube_mesh(width: f64, height: f64, depth: f64) -> RenderMesh {
    let hw = width / 2.0;
    let hh = height / 2.0;
    let hd = depth / 2.0;

    // (position, normal) per face corner; quad corners ordered so the
    // shared index pattern below triangulates every face the same way.
    let faces: [([f64; 3], [[f64; 3]; 4]); 6] = [
        // Front (+z)
        (
            [0.0, 0.0, 1.0],
            [[-hw, -hh, hd], [hw, -hh, hd], [hw, hh, hd], [-hw, hh, hd]],
        ),
        // Back (-z)
        (
            [0.0, 0.0, -1.0],
            [[hw, -hh, -hd], [-hw, -hh, -hd], [-hw, hh, -hd], [hw, hh, -hd]],
        ),
        // Left (-x)
        (
            [-1.0, 0.0, 0.0],
            [[-hw, -hh, -hd], [-hw, -hh, hd], [-hw, hh, hd], [-hw, hh, -hd]],
        ),
        // Right (+x)
        (
            [1.0, 0.0, 0.0],
            [[hw, -hh, hd], [hw, -hh, -hd], [hw, hh, -hd], [hw, hh, hd]],
        ),
        // Bottom (-y)
        (
            [0.0, -1.0, 0.0],
            [[-hw, -hh, -hd], [hw, -hh, -hd], [hw, -hh, hd], [-hw, -hh, hd]],
        ),
        // Top (+y)
        (
            [0.0, 1.0, 0.0],
            [[-hw, hh, hd], [hw, hh, hd], [hw, hh, -hd], [-hw, hh, -hd]],
        ),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, (normal, corners)) in faces.iter().enumerate() {
        let base = (face * 4) as u32;
        for corner in corners {
            positions.push(*corner);
            normals.push(*normal);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    RenderMesh::new(positions, normals, indices)
}

/// Latitude/longitude sphere centered at the origin with the poles on the
/// z axis. Smooth shading: one shared vertex per grid point, normal equal
/// to the normalized position.
///
/// Each stack emits `sectors + 1` vertices (the seam vertex is duplicated
/// so a renderer can wrap texture coordinates); the pole stacks emit one
/// triangle per sector instead of two.
#[must_use]
pub fn uv_sphere_mesh(radius: f64, sectors: usize, stacks: usize) -> RenderMesh {
    let sectors = sectors.max(3);
    let stacks = stacks.max(2);

    let sector_step = 2.0 * PI / sectors as f64;
    let stack_step = PI / stacks as f64;

    let mut positions = Vec::with_capacity((stacks + 1) * (sectors + 1));
    let mut normals = Vec::with_capacity(positions.capacity());

    for i in 0..=stacks {
        // From +pi/2 (north pole) down to -pi/2.
        let stack_angle = PI / 2.0 - i as f64 * stack_step;
        let ring_radius = radius * stack_angle.cos();
        let z = radius * stack_angle.sin();

        for j in 0..=sectors {
            let sector_angle = j as f64 * sector_step;
            let x = ring_radius * sector_angle.cos();
            let y = ring_radius * sector_angle.sin();

            positions.push([x, y, z]);
            let n = Vec3::new(x, y, z)
                .normalized()
                .unwrap_or(Vec3::Z);
            normals.push(n.to_array());
        }
    }

    let mut indices = Vec::with_capacity(sectors * (stacks - 1) * 6);
    for i in 0..stacks {
        let mut k1 = i * (sectors + 1);
        let mut k2 = k1 + sectors + 1;

        for _ in 0..sectors {
            if i != 0 {
                indices.extend_from_slice(&[k1 as u32, k2 as u32, (k1 + 1) as u32]);
            }
            if i != stacks - 1 {
                indices.extend_from_slice(&[(k1 + 1) as u32, k2 as u32, (k2 + 1) as u32]);
            }
            k1 += 1;
            k2 += 1;
        }
    }

    RenderMesh::new(positions, normals, indices)
}

/// Flat-shaded sphere variant: every triangle gets its own three vertices
/// carrying the face normal, for a faceted look.
#[must_use]
pub fn uv_sphere_mesh_flat(radius: f64, sectors: usize, stacks: usize) -> RenderMesh {
    let smooth = uv_sphere_mesh(radius, sectors, stacks);

    let mut positions = Vec::with_capacity(smooth.indices.len());
    let mut normals = Vec::with_capacity(smooth.indices.len());
    let mut indices = Vec::with_capacity(smooth.indices.len());

    for tri in smooth.indices.chunks_exact(3) {
        let a = Vec3::from(smooth.positions[tri[0] as usize]);
        let b = Vec3::from(smooth.positions[tri[1] as usize]);
        let c = Vec3::from(smooth.positions[tri[2] as usize]);

        let face_normal = (b.sub(a))
            .cross(c.sub(a))
            .normalized()
            .unwrap_or(Vec3::Z)
            .to_array();

        for &corner in tri {
            indices.push(positions.len() as u32);
            positions.push(smooth.positions[corner as usize]);
            normals.push(face_normal);
        }
    }

    RenderMesh::new(positions, normals, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Tolerance;

    #[test]
    fn cube_has_24_vertices_and_36_indices() {
        let mesh = cube_mesh(1.0, 2.0, 3.0);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.indices.len(), 36);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn cube_normals_are_unit_axis_aligned() {
        let mesh = cube_mesh(2.0, 2.0, 2.0);
        for n in &mesh.normals {
            let v = Vec3::from(*n);
            assert!((v.length() - 1.0).abs() < 1e-12);
            // Exactly one component is non-zero.
            let nonzero = n.iter().filter(|c| **c != 0.0).count();
            assert_eq!(nonzero, 1);
        }
    }

    #[test]
    fn cube_faces_point_outward() {
        let mesh = cube_mesh(2.0, 2.0, 2.0);
        // Every vertex normal points away from the center: dot(p, n) > 0.
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let dot = p[0] * n[0] + p[1] * n[1] + p[2] * n[2];
            assert!(dot > 0.0);
        }
    }

    #[test]
    fn cube_triangles_wind_counter_clockwise() {
        let mesh = cube_mesh(1.0, 1.0, 1.0);
        for tri in mesh.indices.chunks_exact(3) {
            let a = Vec3::from(mesh.positions[tri[0] as usize]);
            let b = Vec3::from(mesh.positions[tri[1] as usize]);
            let c = Vec3::from(mesh.positions[tri[2] as usize]);
            let face = (b.sub(a)).cross(c.sub(a));
            let n = Vec3::from(mesh.normals[tri[0] as usize]);
            assert!(face.dot(n) > 0.0, "clockwise triangle {tri:?}");
        }
    }

    #[test]
    fn sphere_vertices_lie_on_the_sphere() {
        let radius = 2.5;
        let mesh = uv_sphere_mesh(radius, 16, 8);
        let tol = Tolerance::DEFAULT;
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let pos = Vec3::from(*p);
            assert!(tol.approx_eq_f64(pos.length(), radius));
            // Smooth normal is the normalized position.
            let expected = pos.normalized().unwrap();
            assert!(tol.approx_eq_vec3(Vec3::from(*n), expected));
        }
    }

    #[test]
    fn sphere_counts_match_grid() {
        let (sectors, stacks) = (12, 6);
        let mesh = uv_sphere_mesh(1.0, sectors, stacks);
        assert_eq!(mesh.vertex_count(), (stacks + 1) * (sectors + 1));
        // Pole stacks emit one triangle per sector, the rest two.
        assert_eq!(mesh.triangle_count(), sectors * (stacks - 1) * 2);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn degenerate_resolution_is_clamped() {
        let mesh = uv_sphere_mesh(1.0, 0, 0);
        assert!(!mesh.is_empty());
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn flat_sphere_triangles_share_one_normal() {
        let mesh = uv_sphere_mesh_flat(1.0, 8, 4);
        assert_eq!(mesh.vertex_count(), mesh.indices.len());
        for tri in mesh.indices.chunks_exact(3) {
            let n0 = mesh.normals[tri[0] as usize];
            assert_eq!(n0, mesh.normals[tri[1] as usize]);
            assert_eq!(n0, mesh.normals[tri[2] as usize]);
        }
        assert!(mesh.validate().is_ok());
    }
}
