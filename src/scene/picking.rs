use crate::geom::{Point3, Ray, Vec3, intersect_sphere};

use super::camera::{Camera, Projection};
use super::shape::{Shape, ShapeKind};

/// The nearest intersection found by [`pick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub shape_index: usize,
    /// Distance along the ray, in world units.
    pub distance: f64,
    pub position: Point3,
    pub normal: Vec3,
}

/// Maps a pixel coordinate to a world-space ray from the camera.
///
/// The pixel is converted to normalized device coordinates (window Y points
/// down, NDC Y up, hence the flip), unprojected through the inverse
/// projection into view space, forced onto the view direction plane
/// (`z = -1`, `w = 0`), and carried into world space through the inverse
/// view matrix. Returns `None` if either matrix is singular or the
/// resulting direction is degenerate; neither occurs for a live camera.
#[must_use]
pub fn generate_ray(
    screen_x: f64,
    screen_y: f64,
    screen_width: f64,
    screen_height: f64,
    camera: &Camera,
    projection: &Projection,
) -> Option<Ray> {
    if screen_width <= 0.0 || screen_height <= 0.0 {
        return None;
    }

    let ndc_x = (2.0 * screen_x) / screen_width - 1.0;
    let ndc_y = 1.0 - (2.0 * screen_y) / screen_height;

    let clip = [ndc_x, ndc_y, -1.0, 1.0];

    let view_pos = projection.matrix().inverse()?.apply_homogeneous(clip);
    // A direction, not a position: point down the view axis with w = 0.
    let view_dir = [view_pos[0], view_pos[1], -1.0, 0.0];

    let world = camera.view_matrix().inverse()?.apply_homogeneous(view_dir);
    let direction = Vec3::new(world[0], world[1], world[2]);

    Ray::new(camera.position(), direction)
}

/// Tests the ray against every shape and returns the globally nearest
/// positive-distance hit.
///
/// Only spheres have an analytic intersection; other kinds are skipped
/// without error. A missing hit is an ordinary `None`.
#[must_use]
pub fn pick(ray: &Ray, shapes: &[Shape]) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for (shape_index, shape) in shapes.iter().enumerate() {
        let ShapeKind::Sphere { radius, .. } = shape.kind() else {
            continue;
        };

        let center = shape.position();
        let Some(distance) = intersect_sphere(ray, center, *radius) else {
            continue;
        };

        if best.is_none_or(|hit| distance < hit.distance) {
            let position = ray.point_at(distance);
            // A sphere's normal is the unit vector out from its center.
            let normal = (position - center).normalized().unwrap_or(Vec3::Z);
            best = Some(PickHit {
                shape_index,
                distance,
                position,
                normal,
            });
        }
    }

    match &best {
        Some(hit) => log::debug!(
            "ray hit shape {} at distance {:.4}",
            hit.shape_index,
            hit.distance
        ),
        None => log::debug!("ray did not hit any shape"),
    }

    best
}
