//! # Voxel Engine Core
//!
//! This module contains the voxel data model: what a cell is, how cells are
//! stored, and how a world of them is generated.
//!
//! ## Architecture
//!
//! * **Block**: Defines voxel types and the six block faces
//! * **Chunk**: Fixed-size 3D arrays of blocks in one contiguous buffer
//! * **World**: A bounded grid of chunks with a total global-coordinate lookup
//! * **Terrain**: Deterministic noise-driven height-field generation
//!
//! ## Data Flow
//!
//! 1. The world is created empty at its configured size
//! 2. The terrain generator fills every cell once
//! 3. The world is then only read, by the mesher and by per-frame culling
//!
//! ## Thread Safety
//!
//! Nothing here synchronizes. The world is written once and then shared by
//! `&` borrow, which is enough for any number of concurrent readers.

pub mod block;
pub mod chunk;
pub mod terrain;
pub mod world;
