//! # Terrain Generation
//!
//! A deterministic height-field generator. Every `(x, z)` column gets a height
//! from fractal value noise; below the surface the column is stone, the
//! topmost solid block is grass, and everything above is air.
//!
//! The same config and coordinates always produce the same block, so a world
//! can be regenerated instead of stored.

use log::{debug, info};
use web_time::Instant;

use crate::engine_state::config::TerrainConfig;
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::world::World;

pub mod value_noise;

use value_noise::FractalValueNoise;

/// Populates worlds with noise-driven terrain.
#[derive(Clone, Debug)]
pub struct TerrainGenerator {
    config: TerrainConfig,
    noise: FractalValueNoise,
}

impl TerrainGenerator {
    /// Creates a generator for the given parameters.
    pub fn new(config: TerrainConfig) -> Self {
        let noise =
            FractalValueNoise::new(config.seed, config.octaves, config.lacunarity, config.gain);
        Self { config, noise }
    }

    /// The parameters this generator was built with.
    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Surface height of the column at `(gx, gz)`, always within
    /// `[height_min, height_max]`.
    ///
    /// The noise value in `[0, 1)` is spread over the whole height range:
    /// `height_min + floor(n * (height_max - height_min + 1))`.
    pub fn height_at(&self, gx: i32, gz: i32) -> i32 {
        let TerrainConfig {
            scale,
            height_min,
            height_max,
            ..
        } = self.config;

        let n = self.noise.sample(gx as f64 * scale, gz as f64 * scale);
        let span = (height_max - height_min + 1) as f64;
        let height = height_min.saturating_add((n * span).floor() as i32);
        height.clamp(height_min, height_max)
    }

    /// Block type of a column of the given surface `height` at `gy`.
    #[inline]
    pub fn block_for_height(height: i32, gy: i32) -> BlockType {
        if gy >= height {
            BlockType::AIR
        } else if gy == height - 1 {
            BlockType::GRASS
        } else {
            BlockType::STONE
        }
    }

    /// Block type at a global coordinate.
    pub fn block_at(&self, gx: i32, gy: i32, gz: i32) -> BlockType {
        Self::block_for_height(self.height_at(gx, gz), gy)
    }

    /// Fills every cell of `world` with generated terrain.
    ///
    /// This is a one-shot bulk fill: every cell is written, so any previous
    /// contents are replaced.
    pub fn populate(&self, world: &mut World) {
        let start = Instant::now();
        let size = world.size_in_blocks();

        let mut lowest = i32::MAX;
        let mut highest = i32::MIN;

        for gz in 0..size.z {
            for gx in 0..size.x {
                let height = self.height_at(gx, gz);
                lowest = lowest.min(height);
                highest = highest.max(height);

                for gy in 0..size.y {
                    world.set_global(gx, gy, gz, Self::block_for_height(height, gy));
                }
            }
        }

        debug!(
            "Terrain seed {} heights span {}..={}",
            self.config.seed, lowest, highest
        );
        info!(
            "Generated {}x{}x{} block terrain ({} solid) in {:?}",
            size.x,
            size.y,
            size.z,
            world.solid_block_count(),
            start.elapsed()
        );
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(TerrainConfig::default())
    }
}
