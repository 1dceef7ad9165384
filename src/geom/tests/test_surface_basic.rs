use crate::geom::{
    BezierPatch, Point3, Surface, Tolerance, Vec3, tessellate_surface, triangulate_grid,
};

fn saddle_patch() -> BezierPatch {
    // z = bilinear saddle over a 3x3 quadratic grid.
    let rows = (0..3)
        .map(|r| {
            (0..3)
                .map(|c| {
                    let x = c as f64;
                    let y = r as f64;
                    Point3::new(x, y, (x - 1.0) * (y - 1.0))
                })
                .collect()
        })
        .collect();
    BezierPatch::from_rows(rows).unwrap()
}

#[test]
fn surface_is_contained_in_control_hull_bounds() {
    let patch = saddle_patch();
    for i in 0..=8 {
        for j in 0..=8 {
            let p = patch.point_at(i as f64 / 8.0, j as f64 / 8.0);
            assert!((0.0..=2.0).contains(&p.x));
            assert!((0.0..=2.0).contains(&p.y));
            assert!((-1.0..=1.0).contains(&p.z));
        }
    }
}

#[test]
fn tessellated_vertices_match_direct_evaluation() {
    let patch = saddle_patch();
    let (res_u, res_v) = (6, 4);
    let mesh = tessellate_surface(&patch, res_u, res_v);
    let tol = Tolerance::DEFAULT;

    for j in 0..=res_v {
        for i in 0..=res_u {
            let u = i as f64 / res_u as f64;
            let v = j as f64 / res_v as f64;
            let vertex = Point3::from(mesh.positions[j * (res_u + 1) + i]);
            assert!(tol.approx_eq_point3(vertex, patch.point_at(u, v)));
        }
    }
}

#[test]
fn tessellated_normals_match_the_estimator() {
    let patch = saddle_patch();
    let mesh = tessellate_surface(&patch, 5, 5);
    let tol = Tolerance::DEFAULT;

    for j in 0..=5 {
        for i in 0..=5 {
            let normal = Vec3::from(mesh.normals[j * 6 + i]);
            let expected = patch.normal_at(i as f64 / 5.0, j as f64 / 5.0);
            assert!(tol.approx_eq_vec3(normal, expected));
            assert!((normal.length() - 1.0).abs() < 1e-9);
        }
    }
}

#[test]
fn every_grid_cell_becomes_two_triangles() {
    let indices = triangulate_grid(7, 5);
    assert_eq!(indices.len() / 3, 6 * 4 * 2);

    // Each triangle is non-degenerate (three distinct indices).
    for tri in indices.chunks_exact(3) {
        assert_ne!(tri[0], tri[1]);
        assert_ne!(tri[1], tri[2]);
        assert_ne!(tri[0], tri[2]);
    }
}

#[test]
fn patch_mesh_passes_validation_at_various_resolutions() {
    let patch = saddle_patch();
    for res in [1, 2, 7, 20] {
        let mesh = tessellate_surface(&patch, res, res);
        assert!(mesh.validate().is_ok(), "resolution {res}");
        assert_eq!(mesh.vertex_count(), (res + 1) * (res + 1));
    }
}
