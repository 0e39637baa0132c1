//! # Engine State Module
//!
//! The core engine module that owns the voxel world and everything derived
//! from it.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `camera_state` - Handles camera positioning and movement
//! * `config` - Tunable world, terrain and camera parameters
//! * `rendering` - Meshing, culling and texture data for the backend
//! * `voxels` - Handles voxel data, chunks, and world generation
//!
//! ## Architecture
//!
//! All heavy work happens once in [`EngineState::new`]: the terrain is
//! generated and every chunk is meshed. After that the world is only read.
//! Each frame the caller feeds input through
//! [`EngineState::process_input`] and asks
//! [`EngineState::visible_chunks`] which meshes to submit.

use cgmath::{EuclideanSpace, Point3, Vector3};
use log::{debug, info};
use web_time::{Duration, Instant};

use camera_state::CameraState;
use config::{ConfigError, EngineConfig};
use rendering::{build_chunk_mesh, ChunkMesh, Frustum, TextureArrayData};
use voxels::{chunk::CHUNK_DIMENSION, terrain::TerrainGenerator, world::World};

pub mod camera_state;
pub mod config;
pub mod rendering;
pub mod voxels;

/// A meshed chunk placed in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkRenderData {
    /// Chunk coordinate inside the world grid
    pub position: Point3<i32>,
    /// World-space position of the chunk's minimum corner
    pub origin: Point3<f32>,
    /// Chunk-local mesh; the backend offsets it by `origin`
    pub mesh: ChunkMesh,
}

impl ChunkRenderData {
    /// Whether the mesh has anything to draw.
    pub fn is_drawable(&self) -> bool {
        !self.mesh.indices.is_empty()
    }

    /// World-space bounding box `(min, max)` of the chunk.
    pub fn aabb(&self) -> (Point3<f32>, Point3<f32>) {
        let extent = CHUNK_DIMENSION as f32;
        (self.origin, self.origin + Vector3::new(extent, extent, extent))
    }
}

/// Totals over a set of chunk meshes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStatistics {
    /// Chunks meshed
    pub chunks: usize,
    /// Chunks with a non-empty mesh
    pub drawable_chunks: usize,
    /// Quads over all meshes
    pub quads: usize,
    /// Vertices over all meshes
    pub vertices: usize,
    /// Indices over all meshes
    pub indices: usize,
    /// Vertex and index buffer bytes over all meshes
    pub bytes: usize,
}

impl MeshStatistics {
    /// Adds one chunk mesh to the totals.
    pub fn record(&mut self, mesh: &ChunkMesh) {
        self.chunks += 1;
        if !mesh.is_empty() {
            self.drawable_chunks += 1;
        }
        self.quads += mesh.quad_count();
        self.vertices += mesh.vertices.len();
        self.indices += mesh.indices.len();
        self.bytes += mesh.byte_size();
    }
}

/// The main state container for the voxel engine.
///
/// # Examples
///
/// ```
/// use voxel_engine::{EngineConfig, EngineState, PlayerAction};
/// use web_time::Duration;
///
/// let mut config = EngineConfig::default();
/// config.world.chunks_x = 2;
/// config.world.chunks_z = 2;
///
/// let mut engine = EngineState::new(config).unwrap();
/// engine.process_input(PlayerAction::default(), Duration::from_millis(16));
/// let visible = engine.visible_chunks(16.0 / 9.0);
/// assert!(visible.len() <= 4);
/// ```
pub struct EngineState {
    /// Camera state managing position, orientation and movement
    pub camera_state: CameraState,
    /// Player actions of the latest frame
    pub player_actions: PlayerAction,
    config: EngineConfig,
    world: World,
    world_origin: Vector3<f32>,
    chunks: Vec<ChunkRenderData>,
    statistics: MeshStatistics,
    textures: TextureArrayData,
}

impl EngineState {
    /// Generates the world and meshes every chunk.
    ///
    /// The world is centred on the origin in X and Z and starts at Y = 0.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `config` does not validate.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let start = Instant::now();

        let mut world = World::from_config(&config.world);
        TerrainGenerator::new(config.terrain).populate(&mut world);

        let size = world.size_in_blocks();
        let world_origin = Vector3::new(-(size.x / 2) as f32, 0.0, -(size.z / 2) as f32);

        let mesh_start = Instant::now();
        let mut statistics = MeshStatistics::default();
        let chunks: Vec<ChunkRenderData> = world
            .chunk_positions()
            .map(|position| {
                let mesh = build_chunk_mesh(&world, position);
                statistics.record(&mesh);
                ChunkRenderData {
                    position,
                    origin: Self::origin_of(world_origin, position),
                    mesh,
                }
            })
            .collect();

        info!(
            "Meshed {} chunks ({} drawable): {} quads, {} vertices, {} indices, {} bytes in {:?}",
            statistics.chunks,
            statistics.drawable_chunks,
            statistics.quads,
            statistics.vertices,
            statistics.indices,
            statistics.bytes,
            mesh_start.elapsed()
        );

        let textures = TextureArrayData::block_textures();
        debug!(
            "Generated {} texture layers of {}x{}",
            textures.layers, textures.width, textures.height
        );

        info!("Engine state ready in {:?}", start.elapsed());

        Ok(Self {
            camera_state: CameraState::new(&config.camera, world_origin),
            player_actions: PlayerAction::default(),
            config,
            world,
            world_origin,
            chunks,
            statistics,
            textures,
        })
    }

    fn origin_of(world_origin: Vector3<f32>, position: Point3<i32>) -> Point3<f32> {
        let offset = position.to_vec() * CHUNK_DIMENSION;
        Point3::from_vec(world_origin + Vector3::new(offset.x as f32, offset.y as f32, offset.z as f32))
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The voxel world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// World-space position of global block `(0, 0, 0)`.
    pub fn world_origin(&self) -> Vector3<f32> {
        self.world_origin
    }

    /// World-space minimum corner of the chunk at `position`.
    pub fn chunk_origin(&self, position: Point3<i32>) -> Point3<f32> {
        Self::origin_of(self.world_origin, position)
    }

    /// Every chunk, meshed, in world storage order.
    pub fn chunks(&self) -> &[ChunkRenderData] {
        &self.chunks
    }

    /// Totals over all chunk meshes.
    pub fn statistics(&self) -> MeshStatistics {
        self.statistics
    }

    /// Block texture array for upload.
    pub fn textures(&self) -> &TextureArrayData {
        &self.textures
    }

    /// Records this frame's actions and moves the camera by them.
    ///
    /// # Arguments
    /// * `actions` - Player actions for this frame
    /// * `dt` - Time elapsed since the last frame
    ///
    /// # Returns
    /// `true` if the camera moved or turned
    pub fn process_input(&mut self, actions: PlayerAction, dt: Duration) -> bool {
        self.player_actions = actions;
        self.camera_state.intake_actions(&self.player_actions);

        match self.camera_state.update(dt) {
            Some(chunk) => {
                debug!("Camera at {:?} in chunk {:?}", self.camera_state.camera.position, chunk);
                true
            }
            None => false,
        }
    }

    /// The current view frustum for a viewport of the given aspect ratio.
    pub fn frustum(&self, aspect: f32) -> Frustum {
        Frustum::from_view_projection(self.camera_state.view_projection(aspect))
    }

    /// Drawable chunks whose bounds intersect the current view frustum, in
    /// storage order.
    pub fn visible_chunks(&self, aspect: f32) -> Vec<&ChunkRenderData> {
        let frustum = self.frustum(aspect);

        let visible: Vec<&ChunkRenderData> = self
            .chunks
            .iter()
            .filter(|chunk| chunk.is_drawable())
            .filter(|chunk| {
                let (min, max) = chunk.aabb();
                frustum.intersects_aabb(min, max)
            })
            .collect();

        debug!("{} of {} chunks visible", visible.len(), self.chunks.len());
        visible
    }
}

/// Represents player actions derived from input
///
/// This struct contains flags for the movement and look actions a frontend
/// can trigger for one frame.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PlayerAction {
    /// Move along the view direction
    pub move_forward: bool,
    /// Move against the view direction
    pub move_backward: bool,
    /// Strafe left
    pub move_left: bool,
    /// Strafe right
    pub move_right: bool,
    /// Rise along world up
    pub move_up: bool,
    /// Sink along world up
    pub move_down: bool,
    /// Multiply movement speed
    pub sprint: bool,
    /// Mouse delta, if the view should turn
    pub rotate_view: Option<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::WorldConfig;

    fn small_config() -> EngineConfig {
        EngineConfig {
            world: WorldConfig {
                chunks_x: 2,
                chunks_y: 1,
                chunks_z: 2,
            },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn world_is_centred_in_x_and_z() {
        let engine = EngineState::new(small_config()).unwrap();
        assert_eq!(engine.world_origin(), Vector3::new(-16.0, 0.0, -16.0));
        assert_eq!(engine.chunk_origin(Point3::new(1, 0, 1)), Point3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn every_chunk_is_meshed_in_storage_order() {
        let engine = EngineState::new(small_config()).unwrap();
        let positions: Vec<_> = engine.chunks().iter().map(|c| c.position).collect();
        let expected: Vec<_> = engine.world().chunk_positions().collect();
        assert_eq!(positions, expected);

        let stats = engine.statistics();
        assert_eq!(stats.chunks, 4);
        assert_eq!(stats.drawable_chunks, 4);
        assert_eq!(stats.vertices, stats.quads * 4);
        assert_eq!(stats.indices, stats.quads * 6);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = small_config();
        config.world.chunks_y = 0;
        assert!(matches!(EngineState::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn turning_away_hides_the_world() {
        let mut engine = EngineState::new(small_config()).unwrap();
        assert!(!engine.visible_chunks(16.0 / 9.0).is_empty());

        engine.camera_state.camera.mouse_sensitivity = 1.0;
        let moved = engine.process_input(
            PlayerAction {
                rotate_view: Some((180.0, 15.0)),
                ..PlayerAction::default()
            },
            Duration::from_millis(16),
        );
        assert!(moved);
        assert!(engine.visible_chunks(16.0 / 9.0).is_empty());
    }

    #[test]
    fn culling_reads_a_shared_engine() {
        let engine = EngineState::new(small_config()).unwrap();
        let shared = &engine;
        let aspect = shared.camera_state.projection.aspect();
        assert_eq!(shared.visible_chunks(2.0).len(), shared.visible_chunks(2.0).len());
        assert_eq!(shared.camera_state.projection.aspect(), aspect);
    }

    #[test]
    fn camera_chunk_uses_the_world_grid() {
        let mut config = small_config();
        config.camera.position = [-16.0, 10.0, 15.5];
        let engine = EngineState::new(config).unwrap();
        // The world starts at (-16, 0, -16), so this is block (0, 10, 31).
        let chunk = engine.camera_state.chunk_position();
        assert_eq!(chunk, Point3::new(0, 0, 1));
        assert!(engine.world().contains_chunk(chunk));
    }

    #[test]
    fn idle_input_does_not_move() {
        let mut engine = EngineState::new(small_config()).unwrap();
        let before = engine.camera_state.camera.position;
        assert!(!engine.process_input(PlayerAction::default(), Duration::from_millis(16)));
        assert_eq!(engine.camera_state.camera.position, before);
    }
}
