//! # Chunk Iteration Module
//!
//! This module provides an iterator for traversing all non-air blocks in a
//! chunk. It walks the set bits of the chunk's solidity bit vector, so air
//! cells are skipped without ever decoding their block bytes.

use bitvec::slice::IterOnes;
use bitvec::{order::Lsb0, prelude::BitVec};
use cgmath::Point3;

use crate::engine_state::voxels::block::block_type::BlockType;

use super::Chunk;

/// An iterator over all non-air blocks in a chunk.
///
/// Blocks are yielded in flat buffer order (x fastest, then y, then z)
/// together with their chunk-local position.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Positions of the set bits still to visit
    solid_offsets: IterOnes<'a, usize, Lsb0>,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` positioned before the first solid block.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        let solid_array: &'a BitVec = &chunk_ref.solid_array;
        ChunkBlockIterator {
            chunk_ref,
            solid_offsets: solid_array.iter_ones(),
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<usize>, BlockType);

    fn next(&mut self) -> Option<Self::Item> {
        let offset = self.solid_offsets.next()?;
        let block_type = BlockType::get_block_type_from_int(self.chunk_ref.blocks[offset]);
        Some((Chunk::position_of_index(offset), block_type))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.solid_offsets.size_hint()
    }
}
