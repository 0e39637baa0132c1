//! Rendering-side data for the voxel engine.
//!
//! Everything here is CPU work whose output the rendering backend consumes
//! as is: chunk meshes in the packed vertex format, the per-frame view
//! frustum used to pick which meshes to draw, and the block texture array.
//! Creating GPU resources and issuing draws is left to the backend.

pub mod frustum;
pub mod meshing;
pub mod texture;
pub mod vertex;

// Re-export commonly used types
pub use frustum::Frustum;
pub use meshing::{build_chunk_mesh, build_chunk_mesh_into, ChunkMesh};
pub use texture::TextureArrayData;
pub use vertex::PackedVertex;
