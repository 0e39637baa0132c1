//! # World Module
//!
//! This module provides the `World` struct which owns a fixed, regular grid of
//! chunks and maps global block coordinates onto them.
//!
//! ## Architecture
//!
//! Chunks live in one contiguous vector addressed by [`World::chunk_index`],
//! `cx + chunks_x * (cy + chunks_y * cz)`. The world is bounded: any global
//! coordinate outside `[0, chunks * CHUNK_DIMENSION)` on some axis reads as
//! air, which is also what lets faces on the outer shell of the world mesh
//! correctly.
//!
//! ## Lifecycle
//!
//! A world is created empty, populated once by the terrain generator, and is
//! read-only afterwards. Meshing, culling and any external tooling borrow it
//! immutably, so no locking is involved.

use cgmath::{Point3, Vector3};

use crate::engine_state::config::WorldConfig;
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::chunk::{Chunk, CHUNK_DIMENSION};

/// Represents a voxel world composed of a fixed grid of chunks.
///
/// # Examples
///
/// ```
/// use voxel_engine::{BlockType, World};
///
/// let world = World::new(2, 1, 2);
/// assert_eq!(world.get_global(0, 0, 0), BlockType::AIR);
/// // Outside the world is always air
/// assert_eq!(world.get_global(-1, 0, 0), BlockType::AIR);
/// ```
#[derive(Clone, Debug)]
pub struct World {
    /// Number of chunks along each axis
    dimensions: Vector3<i32>,
    /// Chunk storage addressed by [`World::chunk_index`]
    chunks: Vec<Chunk>,
}

impl World {
    /// Creates a new world of `chunks_x * chunks_y * chunks_z` empty chunks.
    ///
    /// # Panics
    /// Panics if any dimension is smaller than one chunk.
    pub fn new(chunks_x: i32, chunks_y: i32, chunks_z: i32) -> Self {
        assert!(
            chunks_x >= 1 && chunks_y >= 1 && chunks_z >= 1,
            "world dimensions must be positive, got {chunks_x}x{chunks_y}x{chunks_z}"
        );

        let mut chunks = Vec::with_capacity((chunks_x * chunks_y * chunks_z) as usize);
        for cz in 0..chunks_z {
            for cy in 0..chunks_y {
                for cx in 0..chunks_x {
                    chunks.push(Chunk::empty(Point3::new(cx, cy, cz)));
                }
            }
        }

        World {
            dimensions: Vector3::new(chunks_x, chunks_y, chunks_z),
            chunks,
        }
    }

    /// Creates an empty world sized by `config`.
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.chunks_x, config.chunks_y, config.chunks_z)
    }

    /// Number of chunks along each axis.
    pub fn dimensions(&self) -> Vector3<i32> {
        self.dimensions
    }

    /// Size of the world in blocks along each axis.
    pub fn size_in_blocks(&self) -> Vector3<i32> {
        self.dimensions * CHUNK_DIMENSION
    }

    /// Flat index of the chunk at chunk coordinates `(cx, cy, cz)`.
    #[inline]
    pub fn chunk_index(&self, cx: i32, cy: i32, cz: i32) -> usize {
        (cx + self.dimensions.x * (cy + self.dimensions.y * cz)) as usize
    }

    /// Whether `position` names a chunk inside this world.
    pub fn contains_chunk(&self, position: Point3<i32>) -> bool {
        (0..self.dimensions.x).contains(&position.x)
            && (0..self.dimensions.y).contains(&position.y)
            && (0..self.dimensions.z).contains(&position.z)
    }

    /// Borrows the chunk at the given chunk coordinates.
    ///
    /// # Panics
    /// The position must satisfy [`World::contains_chunk`].
    #[inline]
    pub fn chunk_at(&self, position: Point3<i32>) -> &Chunk {
        debug_assert!(self.contains_chunk(position), "chunk {position:?} out of range");
        &self.chunks[self.chunk_index(position.x, position.y, position.z)]
    }

    /// Mutably borrows the chunk at the given chunk coordinates.
    ///
    /// # Panics
    /// The position must satisfy [`World::contains_chunk`].
    #[inline]
    pub fn chunk_at_mut(&mut self, position: Point3<i32>) -> &mut Chunk {
        debug_assert!(self.contains_chunk(position), "chunk {position:?} out of range");
        let index = self.chunk_index(position.x, position.y, position.z);
        &mut self.chunks[index]
    }

    /// All chunks in [`World::chunk_index`] order (x fastest, then y, then z).
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk coordinates of every chunk, in [`World::chunk_index`] order.
    pub fn chunk_positions(&self) -> impl Iterator<Item = Point3<i32>> + '_ {
        self.chunks.iter().map(|chunk| chunk.position)
    }

    /// Whether a global block coordinate lies inside the world.
    #[inline]
    pub fn contains_global(&self, gx: i32, gy: i32, gz: i32) -> bool {
        let size = self.size_in_blocks();
        (0..size.x).contains(&gx) && (0..size.y).contains(&gy) && (0..size.z).contains(&gz)
    }

    /// Gets the block type at a global block coordinate.
    ///
    /// Total over all inputs: coordinates outside the world read as
    /// `BlockType::AIR`.
    #[inline]
    pub fn get_global(&self, gx: i32, gy: i32, gz: i32) -> BlockType {
        if !self.contains_global(gx, gy, gz) {
            return BlockType::AIR;
        }
        let (chunk, local) = Self::split_global(gx, gy, gz);
        self.chunk_at(chunk).get_local(local.x, local.y, local.z)
    }

    /// Whether the block at a global coordinate is solid. Outside the world
    /// nothing is solid.
    #[inline]
    pub fn is_solid_global(&self, gx: i32, gy: i32, gz: i32) -> bool {
        self.get_global(gx, gy, gz).is_solid()
    }

    /// Sets the block type at a global block coordinate.
    ///
    /// # Panics
    /// The coordinate must satisfy [`World::contains_global`].
    pub fn set_global(&mut self, gx: i32, gy: i32, gz: i32, block_type: BlockType) {
        debug_assert!(
            self.contains_global(gx, gy, gz),
            "global ({gx}, {gy}, {gz}) out of range"
        );
        let (chunk, local) = Self::split_global(gx, gy, gz);
        self.chunk_at_mut(chunk)
            .set_local(local.x, local.y, local.z, block_type);
    }

    /// Splits a global coordinate into chunk coordinates and chunk-local
    /// coordinates using floor division.
    pub fn split_global(gx: i32, gy: i32, gz: i32) -> (Point3<i32>, Point3<usize>) {
        let chunk = Point3::new(
            gx.div_euclid(CHUNK_DIMENSION),
            gy.div_euclid(CHUNK_DIMENSION),
            gz.div_euclid(CHUNK_DIMENSION),
        );
        let local = Point3::new(
            gx.rem_euclid(CHUNK_DIMENSION) as usize,
            gy.rem_euclid(CHUNK_DIMENSION) as usize,
            gz.rem_euclid(CHUNK_DIMENSION) as usize,
        );
        (chunk, local)
    }

    /// Total number of solid blocks in the world.
    pub fn solid_block_count(&self) -> usize {
        self.chunks.iter().map(Chunk::solid_count).sum()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn striped_world() -> World {
        let mut world = World::new(2, 1, 2);
        let size = world.size_in_blocks();
        for gz in 0..size.z {
            for gy in 0..size.y {
                for gx in 0..size.x {
                    if (gx + 2 * gy + 3 * gz) % 5 == 0 {
                        world.set_global(gx, gy, gz, BlockType::STONE);
                    } else if (gx + gz) % 7 == 0 {
                        world.set_global(gx, gy, gz, BlockType::GRASS);
                    }
                }
            }
        }
        world
    }

    #[test]
    fn global_lookup_matches_chunk_lookup() {
        let world = striped_world();
        let size = world.size_in_blocks();
        for gz in 0..size.z {
            for gy in 0..size.y {
                for gx in 0..size.x {
                    let chunk = world.chunk_at(Point3::new(gx / 16, gy / 16, gz / 16));
                    assert_eq!(
                        world.get_global(gx, gy, gz),
                        chunk.get_local((gx % 16) as usize, (gy % 16) as usize, (gz % 16) as usize)
                    );
                }
            }
        }
    }

    #[test_case(-1, 0, 0 ; "below x")]
    #[test_case(0, -1, 0 ; "below y")]
    #[test_case(0, 0, -1 ; "below z")]
    #[test_case(32, 0, 0 ; "past x")]
    #[test_case(0, 16, 0 ; "past y")]
    #[test_case(0, 0, 32 ; "past z")]
    #[test_case(i32::MIN, i32::MAX, 0 ; "extremes")]
    fn outside_the_world_is_air(gx: i32, gy: i32, gz: i32) {
        let mut world = World::new(2, 1, 2);
        let size = world.size_in_blocks();
        for gz in 0..size.z {
            for gy in 0..size.y {
                for gx in 0..size.x {
                    world.set_global(gx, gy, gz, BlockType::STONE);
                }
            }
        }
        assert_eq!(world.get_global(gx, gy, gz), BlockType::AIR);
        assert!(!world.is_solid_global(gx, gy, gz));
    }

    #[test]
    fn chunks_are_laid_out_x_fastest() {
        let world = World::new(3, 2, 4);
        assert_eq!(world.chunk_index(1, 0, 0), 1);
        assert_eq!(world.chunk_index(0, 1, 0), 3);
        assert_eq!(world.chunk_index(0, 0, 1), 6);
        for (index, position) in world.chunk_positions().enumerate() {
            assert_eq!(world.chunk_index(position.x, position.y, position.z), index);
        }
    }

    #[test]
    fn split_global_uses_floor_division() {
        assert_eq!(
            World::split_global(17, 3, 31),
            (Point3::new(1, 0, 1), Point3::new(1, 3, 15))
        );
        assert_eq!(
            World::split_global(-1, 0, 0),
            (Point3::new(-1, 0, 0), Point3::new(15, 0, 0))
        );
    }

    #[test]
    fn default_world_has_reference_dimensions() {
        let world = World::default();
        assert_eq!(world.dimensions(), Vector3::new(6, 1, 6));
        assert_eq!(world.size_in_blocks(), Vector3::new(96, 16, 96));
        assert_eq!(world.chunks().len(), 36);
        assert_eq!(world.solid_block_count(), 0);
    }
}
