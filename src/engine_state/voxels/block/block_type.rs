//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification, conversion from the
//! one-byte storage format, and the texture layer each type samples.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// Each variant is stored in a chunk as a single `BlockTypeSize` byte. The
/// `FromPrimitive` derive allows the stored byte to be decoded back into the
/// rich enum type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// An air block, which is non-solid and transparent.
    #[default]
    AIR = 0,

    /// The surface layer of the terrain.
    GRASS = 1,

    /// Everything below the surface layer.
    STONE = 2,
}

impl BlockType {
    /// Decodes a stored `BlockTypeSize` back into a `BlockType`.
    ///
    /// Unknown values decode as `BlockType::AIR`, so a corrupted byte can never
    /// turn into a solid face.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Self {
        <BlockType as FromPrimitive>::from_u8(btype).unwrap_or(BlockType::AIR)
    }

    /// Returns the compact storage representation of this block type.
    #[inline]
    pub fn as_int(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether this block occludes its neighbours and produces faces.
    #[inline]
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }

    /// Index of the texture-array layer sampled by every face of this block.
    ///
    /// Layer 0 holds the grass tile, layer 1 the stone tile. Types without a
    /// dedicated tile fall back to stone.
    pub fn texture_layer(self) -> u8 {
        match self {
            BlockType::GRASS => 0,
            BlockType::STONE => 1,
            BlockType::AIR => 1,
        }
    }
}
