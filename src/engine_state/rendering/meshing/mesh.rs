//! Mesh buffers for a single chunk.
//!
//! A `ChunkMesh` is the hand-off to the rendering backend: a packed vertex
//! buffer and a `u32` triangle-list index buffer, two triangles per quad.

use crate::engine_state::rendering::vertex::{encode_uv, PackedVertex};

use super::face::Quad;

/// Indices of the two triangles of a quad, relative to its first vertex.
pub const QUAD_INDEX_PATTERN: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Vertex and index data describing one chunk's visible surface in
/// chunk-local coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkMesh {
    /// Four vertices per quad
    pub vertices: Vec<PackedVertex>,
    /// Six indices per quad, triangle list
    pub indices: Vec<u32>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties both buffers while keeping their allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Whether the mesh has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    /// Appends one quad: its four corners and the six indices of its two
    /// triangles.
    pub fn push_quad(&mut self, quad: &Quad) {
        self.vertices.extend(Self::generate_face_vertices(quad));
        let base = self.vertices.len() as u32 - 4;
        self.indices.extend(Self::generate_face_indices(base));
    }

    /// Generates the four packed vertices of a quad in winding order.
    ///
    /// Texture coordinates grow with the quad's extent so the tile repeats
    /// once per block.
    pub fn generate_face_vertices(quad: &Quad) -> [PackedVertex; 4] {
        quad.corners().map(|(position, [tile_u, tile_v])| {
            PackedVertex::new(
                position,
                quad.block_side,
                quad.texture_layer,
                encode_uv(tile_u),
                encode_uv(tile_v),
            )
        })
    }

    /// Generates the index data for a quad whose first vertex is at `base`.
    pub fn generate_face_indices(base: u32) -> [u32; 6] {
        QUAD_INDEX_PATTERN.map(|offset| base + offset)
    }

    /// Vertex buffer as raw bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        PackedVertex::slice_as_bytes(&self.vertices)
    }

    /// Index buffer as raw bytes for upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Total size of both buffers in bytes.
    pub fn byte_size(&self) -> usize {
        self.vertex_bytes().len() + self.index_bytes().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::meshing::face::MaskCell;
    use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType};

    #[test]
    fn push_quad_appends_four_vertices_and_six_indices() {
        let mut mesh = ChunkMesh::new();
        let quad = Quad::new(MaskCell::new(BlockType::GRASS, BlockSide::TOP), 16, 0, 0, 16, 16);
        mesh.push_quad(&quad);
        mesh.push_quad(&quad);

        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.indices, vec![0, 1, 2, 2, 3, 0, 4, 5, 6, 6, 7, 4]);
        assert_eq!(mesh.byte_size(), 8 * 16 + 12 * 4);
    }

    #[test]
    fn full_chunk_span_saturates_uv() {
        let quad = Quad::new(MaskCell::new(BlockType::STONE, BlockSide::RIGHT), 16, 0, 0, 16, 1);
        let vertices = ChunkMesh::generate_face_vertices(&quad);
        assert_eq!((vertices[0].u, vertices[0].v), (0, 0));
        assert_eq!((vertices[2].u, vertices[2].v), (65535, 4096));
        assert!(vertices.iter().all(|v| v.texture_layer() == 1));
        assert!(vertices.iter().all(|v| v.side() == Some(BlockSide::RIGHT)));
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut mesh = ChunkMesh::new();
        let quad = Quad::new(MaskCell::new(BlockType::STONE, BlockSide::BACK), 0, 0, 0, 1, 1);
        mesh.push_quad(&quad);
        let capacity = mesh.vertices.capacity();
        mesh.clear();
        assert!(mesh.is_empty());
        assert_eq!(mesh.vertices.capacity(), capacity);
    }
}
