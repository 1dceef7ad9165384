use crate::geom::{Point3, Transform, Vec3};

const DEFAULT_YAW: f64 = -90.0;
const DEFAULT_PITCH: f64 = 0.0;
const DEFAULT_SPEED: f64 = 2.5;
const DEFAULT_SENSITIVITY: f64 = 0.1;
const DEFAULT_ZOOM: f64 = 45.0;

/// Pitch is clamped short of the poles so the view frame can never flip.
const PITCH_LIMIT: f64 = 89.0;

const MIN_ZOOM: f64 = 1.0;
const MAX_ZOOM: f64 = 45.0;

/// Discrete camera movement directions, mapped from held keys by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Free-flying perspective camera.
///
/// Orientation is yaw/pitch in degrees; the front/right/up frame is derived
/// from them and the world up vector whenever either angle changes. Zoom is
/// the vertical field of view in degrees, narrowed by scrolling.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Point3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f64,
    pitch: f64,
    movement_speed: f64,
    mouse_sensitivity: f64,
    zoom: f64,
}

impl Camera {
    #[must_use]
    pub fn new(position: Point3) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
            zoom: DEFAULT_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    #[must_use]
    pub const fn position(&self) -> Point3 {
        self.position
    }

    #[must_use]
    pub const fn front(&self) -> Vec3 {
        self.front
    }

    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub const fn yaw(&self) -> f64 {
        self.yaw
    }

    #[must_use]
    pub const fn pitch(&self) -> f64 {
        self.pitch
    }

    /// World-to-view matrix for the current position and orientation.
    #[must_use]
    pub fn view_matrix(&self) -> Transform {
        // The pitch clamp keeps front and world_up from ever being
        // parallel, so the frame cannot degenerate.
        Transform::look_at(self.position, self.position.add_vec(self.front), self.up)
            .unwrap_or_default()
    }

    /// Moves the camera along its own frame axes, scaled by `delta_time`.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f64) {
        let velocity = self.movement_speed * delta_time;
        let step = match direction {
            CameraMovement::Forward => self.front.mul_scalar(velocity),
            CameraMovement::Backward => self.front.mul_scalar(-velocity),
            CameraMovement::Left => self.right.mul_scalar(-velocity),
            CameraMovement::Right => self.right.mul_scalar(velocity),
            CameraMovement::Up => self.up.mul_scalar(velocity),
            CameraMovement::Down => self.up.mul_scalar(-velocity),
        };
        self.position = self.position.add_vec(step);
    }

    /// Applies a mouse delta to yaw and pitch. `y_offset` is positive when
    /// the cursor moves up (the host flips the window coordinate for us).
    pub fn process_mouse_movement(&mut self, x_offset: f64, y_offset: f64) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch = (self.pitch + y_offset * self.mouse_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    /// Narrows or widens the field of view from a scroll delta.
    pub fn process_mouse_scroll(&mut self, y_offset: f64) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    fn update_vectors(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();

        let front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        );
        self.front = front.normalized().unwrap_or(Vec3::new(0.0, 0.0, -1.0));
        self.right = self
            .front
            .cross(self.world_up)
            .normalized()
            .unwrap_or(Vec3::X);
        self.up = self.right.cross(self.front).normalized().unwrap_or(Vec3::Y);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::ORIGIN)
    }
}

/// Perspective projection parameters for the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in degrees.
    pub fov_y: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
}

impl Projection {
    pub const DEFAULT_NEAR: f64 = 0.1;
    pub const DEFAULT_FAR: f64 = 100.0;

    /// Projection for a camera and viewport size, with the default clip
    /// planes.
    #[must_use]
    pub fn for_viewport(camera: &Camera, width: f64, height: f64) -> Self {
        let aspect = if height > 0.0 { width / height } else { 1.0 };
        Self {
            fov_y: camera.zoom(),
            aspect,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
        }
    }

    #[must_use]
    pub fn matrix(&self) -> Transform {
        Transform::perspective(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }
}
