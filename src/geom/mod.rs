mod core;
mod curve;
mod mesh;
mod primitives;
mod ray;
mod resample;
mod surface;

pub use self::core::{Point2, Point3, Tolerance, Transform, Vec2, Vec3};
pub use curve::{
    BezierCurve, Curve2, DEFAULT_CURVE_RESOLUTION, de_casteljau, flatten_points,
    tessellate_curve_uniform,
};
pub use mesh::{MeshError, RenderMesh, tessellate_surface, triangulate_grid};
pub use primitives::{cube_mesh, uv_sphere_mesh, uv_sphere_mesh_flat};
pub use ray::{Ray, intersect_sphere};
pub use resample::{MAX_PARAMETER_STEP, resample_uniform_length};
pub use surface::{BezierPatch, DERIVATIVE_STEP, GridError, Surface};

#[cfg(test)]
mod tests;
