//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions and block face handling.

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// Every cell of a chunk occupies exactly one `BlockTypeSize`.
pub type BlockTypeSize = u8;
