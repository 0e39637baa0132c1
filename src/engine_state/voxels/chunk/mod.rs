//! # Chunk Module
//!
//! This module provides the `Chunk` struct for managing 16x16x16 blocks of
//! voxel data, plus iteration over the solid blocks it contains.
//!
//! ## Storage
//!
//! A chunk owns one contiguous buffer of `CHUNK_SIZE` block bytes addressed by
//! [`Chunk::index`], `x + D * (y + D * z)`. Alongside it sits a bit vector with
//! one bit per cell that mirrors solidity, so occupancy checks and solid-block
//! iteration never decode the block bytes.
//!
//! ### Performance Characteristics
//! - **Block Lookup**: O(1), one index computation
//! - **Solidity Check**: O(1), one bit
//! - **Solid Iteration**: proportional to the number of set bits
//! - **Memory Usage**: 1 byte + 1 bit per cell

use bitvec::prelude::BitVec;
use cgmath::Point3;

use super::block::block_type::BlockType;
use super::block::BlockTypeSize;
use chunk_iteration::ChunkBlockIterator;

pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Represents a 16x16x16 collection of voxel blocks in the world.
///
/// Chunks are owned by the [`World`](super::world::World) that contains them
/// and have no lifecycle of their own. All local coordinates passed to a chunk
/// must lie in `0..CHUNK_DIMENSION`; anything else is a caller bug.
#[derive(Clone, Debug)]
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: Point3<i32>,

    /// One `BlockTypeSize` per cell, laid out by [`Chunk::index`].
    blocks: Vec<BlockTypeSize>,

    /// Bit `i` is set iff `blocks[i]` is a solid block type.
    solid_array: BitVec,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    pub fn empty(position: Point3<i32>) -> Self {
        Chunk {
            position,
            blocks: vec![BlockType::AIR.as_int(); CHUNK_SIZE as usize],
            solid_array: BitVec::repeat(false, CHUNK_SIZE as usize),
        }
    }

    /// Creates a new chunk with every cell set to `block_type`.
    ///
    /// # Arguments
    /// * `position` - The chunk coordinates of the new chunk
    /// * `block_type` - The type written to every cell
    pub fn solid(position: Point3<i32>, block_type: BlockType) -> Self {
        Chunk {
            position,
            blocks: vec![block_type.as_int(); CHUNK_SIZE as usize],
            solid_array: BitVec::repeat(block_type.is_solid(), CHUNK_SIZE as usize),
        }
    }

    /// Flat buffer index of the cell at chunk-local `(x, y, z)`.
    #[inline]
    pub const fn index(x: usize, y: usize, z: usize) -> usize {
        x + CHUNK_DIMENSION as usize * (y + CHUNK_DIMENSION as usize * z)
    }

    /// Inverse of [`Chunk::index`].
    #[inline]
    pub fn position_of_index(index: usize) -> Point3<usize> {
        let dimension = CHUNK_DIMENSION as usize;
        Point3::new(
            index % dimension,
            (index / dimension) % dimension,
            index / (dimension * dimension),
        )
    }

    /// Gets the block type at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics (in debug builds, or on buffer overrun) if the coordinates are
    /// out of bounds.
    #[inline]
    pub fn get_local(&self, x: usize, y: usize, z: usize) -> BlockType {
        debug_assert!(Self::in_bounds(x, y, z), "local ({x}, {y}, {z}) out of range");
        BlockType::get_block_type_from_int(self.blocks[Self::index(x, y, z)])
    }

    /// Sets the block type at the specified chunk-relative coordinates.
    ///
    /// # Panics
    /// Panics (in debug builds, or on buffer overrun) if the coordinates are
    /// out of bounds.
    #[inline]
    pub fn set_local(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        debug_assert!(Self::in_bounds(x, y, z), "local ({x}, {y}, {z}) out of range");
        let index = Self::index(x, y, z);
        self.blocks[index] = block_type.as_int();
        self.solid_array.set(index, block_type.is_solid());
    }

    /// Checks if the block at the specified chunk-relative coordinates is solid.
    #[inline]
    pub fn is_block_solid(&self, x: usize, y: usize, z: usize) -> bool {
        self.solid_array[Self::index(x, y, z)]
    }

    /// Number of solid cells in the chunk.
    pub fn solid_count(&self) -> usize {
        self.solid_array.count_ones()
    }

    /// Whether the chunk contains no solid cells at all.
    pub fn is_empty(&self) -> bool {
        self.solid_array.not_any()
    }

    /// Iterates over every solid block in buffer order.
    pub fn solid_blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Raw block bytes in [`Chunk::index`] order.
    pub fn as_bytes(&self) -> &[BlockTypeSize] {
        &self.blocks
    }

    #[inline]
    fn in_bounds(x: usize, y: usize, z: usize) -> bool {
        let dimension = CHUNK_DIMENSION as usize;
        x < dimension && y < dimension && z < dimension
    }
}
