#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Engine
//!
//! The CPU side of a chunked voxel renderer: world storage, noise terrain,
//! greedy meshing into a compact vertex format, and view-frustum culling.
//!
//! ## Key Modules
//!
//! * `engine_state` - World, meshes and camera, built once and queried per frame
//! * `engine_state::voxels` - Blocks, chunks, the world grid and terrain generation
//! * `engine_state::rendering` - Greedy mesher, packed vertices, frustum and textures
//!
//! ## Architecture
//!
//! The engine owns no window and no GPU device. A rendering backend takes the
//! per-chunk [`ChunkMesh`] buffers, the [`PackedVertex`] attribute layout and
//! the [`TextureArrayData`] layers, and each frame asks
//! [`EngineState::visible_chunks`] which meshes to draw.
//!
//! ## Usage
//!
//! ```rust,no_run
//! fn main() {
//!     voxel_engine::run();
//! }
//! ```
//!
//! Configuration is read from the JSON file named by the
//! `VOXEL_ENGINE_CONFIG` environment variable; see [`EngineConfig`].

use log::{error, info, warn};
use web_time::{Duration, Instant};

pub mod engine_state;

pub use engine_state::{
    camera_state::camera::{Camera, CameraController, CameraUniform, Projection},
    config::{CameraConfig, ConfigError, EngineConfig, TerrainConfig, WorldConfig},
    rendering::{
        build_chunk_mesh, build_chunk_mesh_into,
        frustum::Frustum,
        meshing::{count_exposed_faces, greedy_quads, ChunkMesh, Quad},
        texture::TextureArrayData,
        vertex::{encode_uv, PackedVertex, VertexAttribute, VertexFormat, UV_SCALE},
    },
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType},
        chunk::{Chunk, CHUNK_DIMENSION},
        terrain::{
            value_noise::{FractalValueNoise, ValueNoise},
            TerrainGenerator,
        },
        world::World,
    },
    ChunkRenderData, EngineState, MeshStatistics, PlayerAction,
};

/// Frame time of the scripted session.
const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// Aspect ratio of the scripted session's viewport.
const ASPECT_RATIO: f32 = 16.0 / 9.0;

/// Builds the engine and drives a short scripted camera session, logging
/// what would be drawn each frame.
///
/// Logging goes to stdout and is filtered by `RUST_LOG`.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match EngineConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            warn!("{err}; falling back to the default configuration");
            EngineConfig::default()
        }
    };

    let mut engine = match EngineState::new(config) {
        Ok(engine) => engine,
        Err(err) => {
            error!("Could not build the engine: {err}");
            return;
        }
    };

    let session = Instant::now();
    for (frame, actions) in scripted_actions().into_iter().enumerate() {
        engine.process_input(actions, FRAME_TIME);
        let visible = engine.visible_chunks(ASPECT_RATIO);
        let indices: usize = visible.iter().map(|chunk| chunk.mesh.indices.len()).sum();
        info!(
            "Frame {frame}: {} chunks, {} triangles",
            visible.len(),
            indices / 3
        );
    }

    let statistics = engine.statistics();
    info!(
        "Session finished in {:?}: {} chunks, {} quads, {} KiB of mesh data",
        session.elapsed(),
        statistics.chunks,
        statistics.quads,
        statistics.bytes / 1024
    );
}

/// Fly forward, sprint, look around, then turn away from the world.
fn scripted_actions() -> Vec<PlayerAction> {
    let idle = PlayerAction::default();
    let forward = PlayerAction {
        move_forward: true,
        ..idle
    };
    let sprint = PlayerAction {
        sprint: true,
        ..forward
    };
    let look = |dx: f64, dy: f64| PlayerAction {
        rotate_view: Some((dx, dy)),
        ..idle
    };

    let mut actions = vec![idle];
    actions.extend(std::iter::repeat(forward).take(30));
    actions.extend(std::iter::repeat(sprint).take(30));
    actions.extend(std::iter::repeat(look(20.0, 0.0)).take(15));
    actions.extend(std::iter::repeat(look(-20.0, 5.0)).take(15));
    actions.push(look(1500.0, 0.0));
    actions
}
