//! Mesh generation for voxel rendering.
//!
//! This module turns chunk contents into GPU-ready triangle meshes. Every
//! chunk is meshed on its own, reading its neighbours only to decide whether
//! a border face is exposed, so chunks can be meshed in any order.
//!
//! # Architecture
//! - `face`: mask entries and merged quads
//! - `greedy`: the plane sweep and rectangle merge
//! - `mesh`: the vertex and index buffers handed to the backend
//!
//! # Performance Considerations
//! - Greedy merging keeps the vertex count proportional to surface features
//!   rather than surface area
//! - [`build_chunk_mesh_into`] reuses buffer allocations across chunks

pub mod face;
pub mod greedy;
pub mod mesh;

pub use face::{MaskCell, Quad};
pub use greedy::{build_chunk_mesh, build_chunk_mesh_into, count_exposed_faces, greedy_quads};
pub use mesh::ChunkMesh;
