//! # Camera State Management
//!
//! This module handles all camera-related functionality including:
//! - Camera position and orientation tracking
//! - View and projection matrix calculations
//! - Player input processing for camera control
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space
//! - `CameraController`: Handles player input and updates camera state
//! - `Projection`: Manages the camera's projection matrix
//! - `CameraUniform`: GPU representation of camera data for shaders

use camera::{Camera, CameraController, CameraUniform, Projection};
use cgmath::{Matrix4, Point3, Vector3};

use super::{config::CameraConfig, voxels::chunk::CHUNK_DIMENSION, PlayerAction};

pub mod camera;

/// Viewport size assumed until the backend reports a real one.
const DEFAULT_VIEWPORT: (u32, u32) = (1280, 720);

/// Manages the complete camera system: state, controls and shader data.
#[derive(Debug, Clone)]
pub struct CameraState {
    /// The current camera position and orientation
    pub camera: Camera,
    /// Handles player input and camera movement
    pub camera_controller: CameraController,
    /// Projection for the current viewport
    pub projection: Projection,
    /// GPU-optimized camera data for shaders
    pub camera_uniform: CameraUniform,
    /// World-space position of global block `(0, 0, 0)`
    world_origin: Vector3<f32>,
}

impl CameraState {
    /// Creates the camera system described by `config` for a world whose
    /// block `(0, 0, 0)` sits at `world_origin`.
    pub fn new(config: &CameraConfig, world_origin: Vector3<f32>) -> Self {
        let camera = Camera::from_config(config);
        let (width, height) = DEFAULT_VIEWPORT;
        let projection = Projection::from_config(width, height, config);

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj_and_pos(&camera, &projection);

        CameraState {
            camera,
            camera_controller: CameraController::from_config(config),
            projection,
            camera_uniform,
            world_origin,
        }
    }

    /// Processes player input actions and updates the camera controller state.
    pub fn intake_actions(&mut self, actions: &PlayerAction) {
        self.camera_controller.intake_actions(actions);
    }

    /// Applies pending controller input and refreshes the uniform.
    ///
    /// # Returns
    /// The camera's new chunk position if it moved or turned, `None` if
    /// there was nothing to apply.
    pub fn update(&mut self, dt: web_time::Duration) -> Option<Point3<i32>> {
        if !self.camera_controller.has_updates() {
            return None;
        }

        self.camera_controller.update_camera(&mut self.camera, dt);
        self.camera_uniform
            .update_view_proj_and_pos(&self.camera, &self.projection);

        Some(self.chunk_position())
    }

    /// Chunk coordinate of the world grid containing the camera.
    ///
    /// The camera may be outside the world, in which case the coordinate lies
    /// outside the grid as well.
    pub fn chunk_position(&self) -> Point3<i32> {
        let position = self.camera.position - self.world_origin;
        let dim = CHUNK_DIMENSION as f32;
        Point3::new(
            (position.x / dim).floor() as i32,
            (position.y / dim).floor() as i32,
            (position.z / dim).floor() as i32,
        )
    }

    /// Updates the projection for a resized viewport and refreshes the uniform.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
        self.camera_uniform
            .update_view_proj_and_pos(&self.camera, &self.projection);
    }

    /// View-projection matrix for the given viewport aspect ratio.
    ///
    /// The stored projection is left as it is.
    pub fn view_projection(&self, aspect: f32) -> Matrix4<f32> {
        let mut projection = self.projection;
        projection.set_aspect(aspect);
        projection.calc_matrix() * self.camera.view_matrix()
    }
}
