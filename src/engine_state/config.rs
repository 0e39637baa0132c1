//! # Engine Configuration
//!
//! Tunable parameters for world size, terrain generation and the camera.
//! Every field has a default matching the reference scene, and every struct is
//! `#[serde(default)]`, so a JSON file only has to name the values it changes:
//!
//! ```json
//! { "terrain": { "seed": 42, "octaves": 5 }, "world": { "chunks_x": 8 } }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Environment variable holding the path of an optional JSON config file.
pub const CONFIG_PATH_ENV: &str = "VOXEL_ENGINE_CONFIG";

/// Errors raised while loading or validating an [`EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for [`EngineConfig`].
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// Path that was being parsed
        path: PathBuf,
        /// Underlying deserialization failure
        #[source]
        source: serde_json::Error,
    },

    /// The values parsed but describe an unusable configuration.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Size of the world in chunks along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks along X
    pub chunks_x: i32,
    /// Chunks along Y
    pub chunks_y: i32,
    /// Chunks along Z
    pub chunks_z: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunks_x: 6,
            chunks_y: 1,
            chunks_z: 6,
        }
    }
}

/// Noise parameters for the height-field terrain generator.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Base seed; octave `i` samples with `seed + i * 1013`
    pub seed: u32,
    /// World-space to noise-space scale applied to column coordinates
    pub scale: f64,
    /// Number of noise layers summed by the fractal sampler
    pub octaves: u32,
    /// Frequency multiplier between successive octaves
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves
    pub gain: f64,
    /// Lowest column height, in blocks
    pub height_min: i32,
    /// Highest column height, in blocks
    pub height_max: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 1337,
            scale: 0.075,
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
            height_min: 10,
            height_max: 16,
        }
    }
}

/// Initial camera placement and movement tuning.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position in world space
    pub position: [f32; 3],
    /// Starting yaw in degrees (-90 looks down -Z)
    pub yaw_degrees: f32,
    /// Starting pitch in degrees
    pub pitch_degrees: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping plane distance
    pub z_near: f32,
    /// Far clipping plane distance
    pub z_far: f32,
    /// Movement speed in blocks per second
    pub move_speed: f32,
    /// Speed multiplier applied while sprinting
    pub sprint_multiplier: f32,
    /// Degrees of rotation per unit of mouse movement
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 30.0, 140.0],
            yaw_degrees: -90.0,
            pitch_degrees: -15.0,
            fov_degrees: 70.0,
            z_near: 0.1,
            z_far: 2000.0,
            move_speed: 12.0,
            sprint_multiplier: 2.5,
            mouse_sensitivity: 0.12,
        }
    }
}

/// Top-level configuration consumed by [`EngineState::new`](super::EngineState::new).
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// World dimensions
    pub world: WorldConfig,
    /// Terrain generation parameters
    pub terrain: TerrainConfig,
    /// Camera parameters
    pub camera: CameraConfig,
}

impl EngineConfig {
    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(json: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the JSON config file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json, path)
    }

    /// Loads the file named by [`CONFIG_PATH_ENV`], or returns the defaults
    /// when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_PATH_ENV) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// Rejects values the generator, world or camera cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if world.chunks_x < 1 || world.chunks_y < 1 || world.chunks_z < 1 {
            return Err(ConfigError::Invalid(format!(
                "world must be at least one chunk on every axis, got {}x{}x{}",
                world.chunks_x, world.chunks_y, world.chunks_z
            )));
        }

        let terrain = &self.terrain;
        if terrain.octaves == 0 {
            return Err(ConfigError::Invalid("octaves must be at least 1".into()));
        }
        if !(terrain.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scale must be positive, got {}",
                terrain.scale
            )));
        }
        if !(terrain.lacunarity > 0.0) || !(terrain.gain > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "lacunarity and gain must be positive, got {} and {}",
                terrain.lacunarity, terrain.gain
            )));
        }
        if terrain.height_min > terrain.height_max {
            return Err(ConfigError::Invalid(format!(
                "height_min {} exceeds height_max {}",
                terrain.height_min, terrain.height_max
            )));
        }

        let camera = &self.camera;
        if !(camera.z_near > 0.0) || camera.z_far <= camera.z_near {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < z_near < z_far, got {} and {}",
                camera.z_near, camera.z_far
            )));
        }
        if !(camera.fov_degrees > 0.0 && camera.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must lie in (0, 180), got {}",
                camera.fov_degrees
            )));
        }

        Ok(())
    }
}
