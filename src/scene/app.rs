use serde::{Deserialize, Serialize};

use crate::geom::{BezierPatch, Point3};
use crate::render::{MeshHandle, RenderBackend};

use super::camera::{Camera, CameraMovement, Projection};
use super::picking::{self, PickHit};
use super::shape::{Shape, ShapeDesc, ShapeKind};

/// One frame's worth of input, snapshotted by the host.
///
/// Movement flags reflect keys held during the frame; deltas are
/// accumulated since the previous frame; `pick_at` carries the pixel of a
/// pick click, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub move_up: bool,
    pub move_down: bool,
    /// Mouse-look engaged (right button held).
    pub look_active: bool,
    /// Cursor movement since last frame, `y` positive upward.
    pub mouse_delta: (f64, f64),
    pub scroll_delta: f64,
    pub toggle_wireframe: bool,
    pub select_shape: Option<usize>,
    /// Screen pixel of a pick request.
    pub pick_at: Option<(f64, f64)>,
}

/// Serializable scene description: shape parameters and placements only;
/// meshes are regenerated on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    pub shapes: Vec<ShapeDesc>,
}

/// The whole application state: camera, shape roster, selection, and the
/// last pick result. All per-frame behavior flows through [`App::update`]
/// with an explicit [`InputState`]; there are no module-level globals.
#[derive(Debug)]
pub struct App {
    camera: Camera,
    shapes: Vec<Shape>,
    active_shape: usize,
    viewport: (f64, f64),
    last_hit: Option<PickHit>,
}

impl App {
    /// Builds the demo roster: a cube, a sphere, and a Bezier patch side by
    /// side, with the camera backed off on +Z.
    #[must_use]
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        let shapes = vec![
            Shape::at(
                ShapeKind::Cube {
                    width: 1.0,
                    height: 1.0,
                    depth: 1.0,
                },
                Point3::new(-2.5, 0.0, 0.0),
            ),
            Shape::at(
                ShapeKind::Sphere {
                    radius: 1.0,
                    sectors: 32,
                    stacks: 16,
                    flat_shading: false,
                },
                Point3::ORIGIN,
            ),
            Shape::at(
                ShapeKind::BezierPatch {
                    patch: default_patch(),
                    resolution_u: 20,
                    resolution_v: 20,
                },
                Point3::new(2.5, 0.0, 0.0),
            ),
        ];

        Self {
            camera: Camera::new(Point3::new(0.0, 0.0, 6.0)),
            shapes,
            active_shape: 0,
            viewport: (viewport_width, viewport_height),
            last_hit: None,
        }
    }

    #[must_use]
    pub fn with_shapes(viewport_width: f64, viewport_height: f64, shapes: Vec<Shape>) -> Self {
        Self {
            camera: Camera::new(Point3::new(0.0, 0.0, 6.0)),
            shapes,
            active_shape: 0,
            viewport: (viewport_width, viewport_height),
            last_hit: None,
        }
    }

    /// Advances one frame: camera motion, selection, wireframe toggling,
    /// and pick handling, in that order. Everything is synchronous; by the
    /// time this returns, all derived state is current.
    pub fn update(&mut self, input: &InputState, delta_time: f64) {
        if input.move_forward {
            self.camera.process_keyboard(CameraMovement::Forward, delta_time);
        }
        if input.move_backward {
            self.camera.process_keyboard(CameraMovement::Backward, delta_time);
        }
        if input.move_left {
            self.camera.process_keyboard(CameraMovement::Left, delta_time);
        }
        if input.move_right {
            self.camera.process_keyboard(CameraMovement::Right, delta_time);
        }
        if input.move_up {
            self.camera.process_keyboard(CameraMovement::Up, delta_time);
        }
        if input.move_down {
            self.camera.process_keyboard(CameraMovement::Down, delta_time);
        }

        if input.look_active {
            let (dx, dy) = input.mouse_delta;
            self.camera.process_mouse_movement(dx, dy);
        }
        if input.scroll_delta != 0.0 {
            self.camera.process_mouse_scroll(input.scroll_delta);
        }

        if let Some(index) = input.select_shape {
            if index < self.shapes.len() {
                self.active_shape = index;
                log::debug!("selected shape {}: {}", index, self.shapes[index].kind().name());
            }
        }

        if input.toggle_wireframe {
            for shape in &mut self.shapes {
                shape.toggle_wireframe();
            }
        }

        if let Some((x, y)) = input.pick_at {
            self.last_hit = self.cast_pick_ray(x, y);
        }
    }

    /// Casts a pick ray through the given pixel and returns the nearest
    /// hit, if any.
    #[must_use]
    pub fn cast_pick_ray(&self, screen_x: f64, screen_y: f64) -> Option<PickHit> {
        let (width, height) = self.viewport;
        let projection = self.projection();
        let ray =
            picking::generate_ray(screen_x, screen_y, width, height, &self.camera, &projection)?;
        picking::pick(&ray, &self.shapes)
    }

    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
    }

    #[must_use]
    pub fn projection(&self) -> Projection {
        Projection::for_viewport(&self.camera, self.viewport.0, self.viewport.1)
    }

    #[must_use]
    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn active_shape(&self) -> Option<&Shape> {
        self.shapes.get(self.active_shape)
    }

    pub fn active_shape_mut(&mut self) -> Option<&mut Shape> {
        self.shapes.get_mut(self.active_shape)
    }

    #[must_use]
    pub const fn active_shape_index(&self) -> usize {
        self.active_shape
    }

    #[must_use]
    pub const fn last_hit(&self) -> Option<PickHit> {
        self.last_hit
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Uploads every shape's mesh to the backend, one handle per shape in
    /// roster order.
    pub fn upload_scene(&self, backend: &mut impl RenderBackend) -> Vec<MeshHandle> {
        self.shapes
            .iter()
            .map(|shape| {
                let mesh = shape.mesh();
                backend.upload_mesh(&mesh.interleaved(), &mesh.indices)
            })
            .collect()
    }

    /// Issues one indexed draw per shape with its model matrix.
    pub fn draw_scene(&self, backend: &mut impl RenderBackend, handles: &[MeshHandle]) {
        for (shape, handle) in self.shapes.iter().zip(handles) {
            backend.draw_indexed(
                *handle,
                &shape.model_matrix().to_cols_f32(),
                shape.is_wireframe(),
            );
        }
    }

    #[must_use]
    pub fn scene_desc(&self) -> SceneDesc {
        SceneDesc {
            shapes: self.shapes.iter().map(ShapeDesc::from_shape).collect(),
        }
    }

    /// Replaces the roster from a description, regenerating every mesh.
    pub fn load_scene(&mut self, desc: SceneDesc) {
        self.shapes = desc.shapes.into_iter().map(ShapeDesc::into_shape).collect();
        self.active_shape = 0;
        self.last_hit = None;
        log::debug!("loaded scene with {} shapes", self.shapes.len());
    }
}

/// The demo patch: a 4x4 control grid in the x-z plane with the four
/// interior points raised, giving a gentle hill.
#[must_use]
pub fn default_patch() -> BezierPatch {
    let rows = (0..4)
        .map(|r| {
            (0..4)
                .map(|c| {
                    let interior = (1..=2).contains(&r) && (1..=2).contains(&c);
                    let y = if interior { 1.2 } else { 0.0 };
                    Point3::new(c as f64 - 1.5, y, r as f64 - 1.5)
                })
                .collect()
        })
        .collect();
    BezierPatch::from_rows(rows).expect("4x4 grid is statically valid")
}
