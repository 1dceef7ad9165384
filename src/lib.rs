//! Core engine for an interactive parametric-shape demo: procedural cubes,
//! spheres, and Bezier curves/surfaces under a free-flying camera, with
//! ray-picking against the scene.
//!
//! The crate is organized leaf-first:
//! - [`geom`] holds the math: curve and surface evaluation, arc-length
//!   resampling, mesh tessellation, and the analytic ray/sphere solver.
//! - [`scene`] holds the interactive state: camera, shape roster, picking,
//!   and the per-frame update.
//! - [`render`] is the seam to the rendering collaborator; nothing in this
//!   crate talks to a window or a GPU directly.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]

pub mod geom;
pub mod render;
pub mod scene;

pub use geom::{BezierCurve, BezierPatch, Point2, Point3, Ray, RenderMesh, Vec2, Vec3};
pub use scene::{App, Camera, InputState, PickHit, Shape, ShapeKind};
