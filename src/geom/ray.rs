use super::core::{Point3, Tolerance, Vec3};

/// A world-space ray: origin plus a direction that is always unit length.
///
/// Normalization happens at construction, so every consumer may rely on
/// `t` being a Euclidean distance along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vec3,
}

impl Ray {
    /// Builds a ray, normalizing `direction`. Returns `None` when the
    /// direction is zero-length or non-finite.
    #[must_use]
    pub fn new(origin: Point3, direction: Vec3) -> Option<Self> {
        let direction = direction.normalized()?;
        Some(Self { origin, direction })
    }

    #[must_use]
    pub const fn origin(&self) -> Point3 {
        self.origin
    }

    /// Unit-length direction.
    #[must_use]
    pub const fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point along the ray at distance `t`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.origin.add_vec(self.direction.mul_scalar(t))
    }
}

/// Analytic ray/sphere intersection.
///
/// Solves `|O + tD - C|² = r²` as the quadratic `a t² + b t + c = 0` and
/// returns the smaller root greater than [`Tolerance::RAY_SELF_HIT`]. The
/// epsilon keeps a ray cast from a surface from immediately hitting it
/// again. When both roots sit at or below the epsilon the sphere is behind
/// the ray (or degenerate) and `None` is returned; an origin inside the
/// sphere yields the exit distance.
#[must_use]
pub fn intersect_sphere(ray: &Ray, center: Point3, radius: f64) -> Option<f64> {
    let oc = ray.origin() - center;
    let d = ray.direction();

    let a = d.dot(d);
    let b = 2.0 * oc.dot(d);
    let c = oc.dot(oc) - radius * radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrt_discriminant = discriminant.sqrt();
    let t1 = (-b - sqrt_discriminant) / (2.0 * a);
    let t2 = (-b + sqrt_discriminant) / (2.0 * a);

    let eps = Tolerance::RAY_SELF_HIT.eps;
    if t1 > eps {
        return Some(t1);
    }
    if t2 > eps {
        return Some(t2);
    }
    None
}
