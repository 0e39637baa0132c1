//! # Camera Implementation
//!
//! This module contains the core camera implementation including:
//! - Camera representation and orientation vectors
//! - Projection matrix handling
//! - Camera controller for input processing
//! - GPU uniform data for the backend
//!
//! ## Key Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `Projection`: Manages perspective projection settings
//! - `CameraController`: Turns player actions into camera movement
//! - `CameraUniform`: Packed data structure for GPU shaders

use cgmath::*;
use web_time::Duration;

use crate::engine_state::config::CameraConfig;
use crate::engine_state::PlayerAction;

/// Pitch limit in degrees, short of straight up or down so `front` never
/// lines up with the world up vector.
pub const MAX_PITCH_DEGREES: f32 = 89.0;

/// Represents a first-person camera in 3D space.
///
/// Yaw and pitch are kept in degrees. A yaw of -90° with zero pitch looks
/// down -Z.
#[derive(Debug, Clone)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation around the Y axis
    pub yaw: Deg<f32>,
    /// Vertical rotation, clamped to [`MAX_PITCH_DEGREES`]
    pub pitch: Deg<f32>,
    /// Normalized viewing direction
    pub front: Vector3<f32>,
    /// Normalized vector pointing to the camera's right
    pub right: Vector3<f32>,
    /// Normalized vector pointing to the camera's up
    pub up: Vector3<f32>,
    /// Degrees of rotation per unit of mouse movement
    pub mouse_sensitivity: f32,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space
    /// * `yaw` - Initial yaw (horizontal rotation around Y axis)
    /// * `pitch` - Initial pitch, clamped to ±[`MAX_PITCH_DEGREES`]
    pub fn new<V: Into<Point3<f32>>, Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: clamp_pitch(pitch.into()),
            front: -Vector3::unit_z(),
            right: Vector3::unit_x(),
            up: Vector3::unit_y(),
            mouse_sensitivity: 0.1,
        };
        camera.update_vectors();
        camera
    }

    /// Places the camera as described by `config`.
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(
            config.position,
            Deg(config.yaw_degrees),
            Deg(config.pitch_degrees),
        );
        camera.mouse_sensitivity = config.mouse_sensitivity;
        camera
    }

    /// Recomputes `front`, `right` and `up` from yaw and pitch.
    pub fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();

        self.front = Vector3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(Vector3::unit_y()).normalize();
        self.up = self.right.cross(self.front).normalize();
    }

    /// Calculates the view matrix for this camera.
    ///
    /// The view matrix transforms world coordinates to view (camera) space.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Applies a mouse movement to the orientation.
    ///
    /// Offsets are scaled by `mouse_sensitivity` and added to yaw and pitch.
    pub fn process_mouse(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += Deg(x_offset * self.mouse_sensitivity);
        self.pitch = clamp_pitch(self.pitch + Deg(y_offset * self.mouse_sensitivity));
        self.update_vectors();
    }
}

fn clamp_pitch(pitch: Deg<f32>) -> Deg<f32> {
    Deg(pitch.0.clamp(-MAX_PITCH_DEGREES, MAX_PITCH_DEGREES))
}

/// Represents a camera's projection matrix and related parameters.
///
/// The matrix maps view-space depth to clip-space `[-w, w]`, which is what
/// the frustum plane extraction expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: aspect_ratio(width, height),
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Builds a projection for a `width` × `height` viewport from `config`.
    pub fn from_config(width: u32, height: u32, config: &CameraConfig) -> Self {
        Self::new(
            width,
            height,
            Deg(config.fov_degrees),
            config.z_near,
            config.z_far,
        )
    }

    /// Updates the aspect ratio for viewport resizing.
    ///
    /// A zero height would make the ratio infinite, so the ratio falls back
    /// to 1 instead.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Sets the aspect ratio directly.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
    }

    /// Current aspect ratio.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Calculates the perspective projection matrix.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Handles camera movement and rotation based on player actions.
///
/// Actions are buffered by [`intake_actions`](Self::intake_actions) and
/// applied, then cleared, by [`update_camera`](Self::update_camera).
#[derive(Debug, Clone)]
pub struct CameraController {
    // Movement amounts
    amount_left: f32,
    amount_right: f32,
    amount_forward: f32,
    amount_backward: f32,
    amount_up: f32,
    amount_down: f32,

    // Mouse offsets
    rotate_horizontal: f32,
    rotate_vertical: f32,

    sprinting: bool,

    // Configuration
    speed: f32,
    sprint_multiplier: f32,
}

impl CameraController {
    /// Creates a new camera controller.
    ///
    /// # Arguments
    /// * `speed` - Base movement speed in units per second
    /// * `sprint_multiplier` - Factor applied to `speed` while sprinting
    pub fn new(speed: f32, sprint_multiplier: f32) -> Self {
        Self {
            amount_left: 0.0,
            amount_right: 0.0,
            amount_forward: 0.0,
            amount_backward: 0.0,
            amount_up: 0.0,
            amount_down: 0.0,
            rotate_horizontal: 0.0,
            rotate_vertical: 0.0,
            sprinting: false,
            speed,
            sprint_multiplier,
        }
    }

    /// Controller tuned by `config`.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(config.move_speed, config.sprint_multiplier)
    }

    /// Records the player's actions for the next update.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        let amount = |active: bool| if active { 1.0 } else { 0.0 };
        self.amount_forward = amount(actions.move_forward);
        self.amount_backward = amount(actions.move_backward);
        self.amount_left = amount(actions.move_left);
        self.amount_right = amount(actions.move_right);
        self.amount_up = amount(actions.move_up);
        self.amount_down = amount(actions.move_down);
        self.sprinting = actions.sprint;

        if let Some((delta_x, delta_y)) = actions.rotate_view {
            self.rotate_horizontal += delta_x as f32;
            self.rotate_vertical += delta_y as f32;
        }
    }

    /// Checks if there are any pending updates that would affect the camera.
    pub fn has_updates(&self) -> bool {
        self.amount_forward > 0.0
            || self.amount_backward > 0.0
            || self.amount_left > 0.0
            || self.amount_right > 0.0
            || self.amount_up > 0.0
            || self.amount_down > 0.0
            || self.rotate_horizontal != 0.0
            || self.rotate_vertical != 0.0
    }

    /// Current speed in units per second, sprint included.
    pub fn effective_speed(&self) -> f32 {
        if self.sprinting {
            self.speed * self.sprint_multiplier
        } else {
            self.speed
        }
    }

    /// Applies the buffered actions to `camera` over `dt`, then clears them.
    ///
    /// Mouse look is applied first so movement follows the new facing.
    /// Forward and back move along `front`, strafing along `right`, and
    /// vertical movement along the world Y axis.
    pub fn update_camera(&mut self, camera: &mut Camera, dt: Duration) {
        if self.rotate_horizontal != 0.0 || self.rotate_vertical != 0.0 {
            camera.process_mouse(self.rotate_horizontal, self.rotate_vertical);
        }

        let step = self.effective_speed() * dt.as_secs_f32();
        camera.position += camera.front * (self.amount_forward - self.amount_backward) * step;
        camera.position += camera.right * (self.amount_right - self.amount_left) * step;
        camera.position += Vector3::unit_y() * (self.amount_up - self.amount_down) * step;

        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;
        self.amount_up = 0.0;
        self.amount_down = 0.0;
        self.amount_left = 0.0;
        self.amount_right = 0.0;
        self.amount_forward = 0.0;
        self.amount_backward = 0.0;
        self.sprinting = false;
    }
}

/// GPU-friendly representation of camera data for shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // cgmath types are not Pod, so the matrix is stored as plain arrays
    view_proj: [[f32; 4]; 4],
    position: [f32; 4],
}

impl CameraUniform {
    /// Creates a new camera uniform with an identity matrix and zero position.
    pub fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
            position: [0.0; 4],
        }
    }

    /// Updates the view-projection matrix and position from the camera.
    pub fn update_view_proj_and_pos(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.calc_matrix() * camera.view_matrix()).into();
        let pos: [f32; 3] = camera.position.into();
        self.position = [pos[0], pos[1], pos[2], 1.0];
    }

    /// The combined view-projection matrix.
    pub fn view_proj(&self) -> Matrix4<f32> {
        self.view_proj.into()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
