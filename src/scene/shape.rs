use serde::{Deserialize, Serialize};

use crate::geom::{
    BezierPatch, Point3, RenderMesh, Transform, Vec3, cube_mesh, tessellate_surface,
    uv_sphere_mesh, uv_sphere_mesh_flat,
};

/// The closed set of shape kinds the scene can hold.
///
/// Each variant carries its own generation parameters and knows how to
/// produce its mesh; consumers dispatch with a `match` instead of runtime
/// type inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeKind {
    Cube {
        width: f64,
        height: f64,
        depth: f64,
    },
    Sphere {
        radius: f64,
        sectors: usize,
        stacks: usize,
        flat_shading: bool,
    },
    BezierPatch {
        patch: BezierPatch,
        resolution_u: usize,
        resolution_v: usize,
    },
}

impl ShapeKind {
    /// Builds the mesh for this kind at its current parameters.
    #[must_use]
    pub fn generate(&self) -> RenderMesh {
        match self {
            Self::Cube {
                width,
                height,
                depth,
            } => cube_mesh(*width, *height, *depth),
            Self::Sphere {
                radius,
                sectors,
                stacks,
                flat_shading,
            } => {
                if *flat_shading {
                    uv_sphere_mesh_flat(*radius, *sectors, *stacks)
                } else {
                    uv_sphere_mesh(*radius, *sectors, *stacks)
                }
            }
            Self::BezierPatch {
                patch,
                resolution_u,
                resolution_v,
            } => tessellate_surface(patch, *resolution_u, *resolution_v),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cube { .. } => "cube",
            Self::Sphere { .. } => "sphere",
            Self::BezierPatch { .. } => "bezier patch",
        }
    }
}

/// A placed shape instance: generation parameters, placement, and the mesh
/// derived from them.
///
/// The mesh is regenerated eagerly on every parameter mutation; placement
/// changes only affect the model matrix and leave the mesh untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    position: Point3,
    /// Euler rotation in degrees, applied X then Y then Z.
    rotation: Vec3,
    scale: Vec3,
    wireframe: bool,
    mesh: RenderMesh,
}

impl Shape {
    #[must_use]
    pub fn new(kind: ShapeKind) -> Self {
        let mesh = kind.generate();
        log::debug!(
            "generated {}: {} vertices, {} triangles",
            kind.name(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Self {
            kind,
            position: Point3::ORIGIN,
            rotation: Vec3::ZERO,
            scale: Vec3::new(1.0, 1.0, 1.0),
            wireframe: false,
            mesh,
        }
    }

    #[must_use]
    pub fn at(kind: ShapeKind, position: Point3) -> Self {
        let mut shape = Self::new(kind);
        shape.position = position;
        shape
    }

    #[must_use]
    pub const fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Mutates the generation parameters and regenerates the mesh before
    /// returning, so the mesh can never be observed stale.
    pub fn modify_kind(&mut self, f: impl FnOnce(&mut ShapeKind)) {
        f(&mut self.kind);
        self.regenerate();
    }

    #[must_use]
    pub const fn position(&self) -> Point3 {
        self.position
    }

    pub fn set_position(&mut self, position: Point3) {
        self.position = position;
    }

    #[must_use]
    pub const fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    #[must_use]
    pub const fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    pub fn toggle_wireframe(&mut self) {
        self.wireframe = !self.wireframe;
    }

    #[must_use]
    pub const fn is_wireframe(&self) -> bool {
        self.wireframe
    }

    #[must_use]
    pub const fn mesh(&self) -> &RenderMesh {
        &self.mesh
    }

    /// Model matrix: translate, then rotate X/Y/Z, then scale.
    #[must_use]
    pub fn model_matrix(&self) -> Transform {
        Transform::translate(self.position.to_vec3())
            * Transform::rotate_x(self.rotation.x.to_radians())
            * Transform::rotate_y(self.rotation.y.to_radians())
            * Transform::rotate_z(self.rotation.z.to_radians())
            * Transform::scale(self.scale.x, self.scale.y, self.scale.z)
    }

    fn regenerate(&mut self) {
        self.mesh = self.kind.generate();
        log::debug!(
            "regenerated {}: {} vertices, {} triangles",
            self.kind.name(),
            self.mesh.vertex_count(),
            self.mesh.triangle_count()
        );
    }
}

/// Serializable description of a placed shape: everything except the
/// derived mesh, which is rebuilt on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDesc {
    pub kind: ShapeKind,
    pub position: Point3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl ShapeDesc {
    #[must_use]
    pub fn from_shape(shape: &Shape) -> Self {
        Self {
            kind: shape.kind.clone(),
            position: shape.position,
            rotation: shape.rotation,
            scale: shape.scale,
        }
    }

    #[must_use]
    pub fn into_shape(self) -> Shape {
        let mut shape = Shape::new(self.kind);
        shape.position = self.position;
        shape.rotation = self.rotation;
        shape.scale = self.scale;
        shape
    }
}
