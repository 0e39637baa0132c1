//! Packed vertex format for voxel rendering.
//!
//! This module defines the 16-byte vertex the mesher emits and the rendering
//! backend uploads verbatim. The bit layout of the packed word is produced
//! with explicit shifts and masks, never with bit-field struct layout, so the
//! encoding is identical on every platform.

use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;

/// Fixed-point scale of the texture coordinates: one texel-tile is 4096 units.
pub const UV_SCALE: u32 = 4096;

const NORMAL_MASK: u32 = 0xFF;
const LAYER_SHIFT: u32 = 8;
const LAYER_MASK: u32 = 0xFF;

/// A vertex in the voxel rendering pipeline.
///
/// # Memory Layout
/// - Normal + layer: u32 (4 bytes) - bits 0..8 normal index, bits 8..16 texture layer
/// - Position: 3x u16 (6 bytes) - chunk-local voxel units, `0..=CHUNK_DIMENSION`
/// - Texture coordinates: 2x u16 (4 bytes) - fixed point, [`UV_SCALE`] units per tile
/// - Padding: 2 bytes
///
/// Total size: 16 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PackedVertex {
    /// Packed face normal index and texture layer
    pub normal_layer: u32,
    /// X coordinate in chunk-local voxel units
    pub px: u16,
    /// Y coordinate in chunk-local voxel units
    pub py: u16,
    /// Z coordinate in chunk-local voxel units
    pub pz: u16,
    /// U texture coordinate in fixed point
    pub u: u16,
    /// V texture coordinate in fixed point
    pub v: u16,
    _padding: u16,
}

const _: () = assert!(std::mem::size_of::<PackedVertex>() == 16);

impl PackedVertex {
    /// Creates a new vertex with the given parameters.
    ///
    /// # Arguments
    /// * `pos` - Chunk-local position in voxel units
    /// * `side` - The face this vertex belongs to
    /// * `texture_layer` - Layer of the texture array sampled by the face
    /// * `u`, `v` - Fixed-point texture coordinates, see [`encode_uv`]
    pub fn new(pos: Point3<u16>, side: BlockSide, texture_layer: u8, u: u16, v: u16) -> Self {
        PackedVertex {
            normal_layer: pack_normal_layer(side.normal_index(), texture_layer),
            px: pos.x,
            py: pos.y,
            pz: pos.z,
            u,
            v,
            _padding: 0,
        }
    }

    /// Chunk-local position of the vertex.
    pub fn position(&self) -> Point3<u16> {
        Point3::new(self.px, self.py, self.pz)
    }

    /// Face normal index, `0..6` in [`BlockSide`] order.
    pub fn normal_index(&self) -> u8 {
        unpack_normal_layer(self.normal_layer).0
    }

    /// The face this vertex belongs to.
    pub fn side(&self) -> Option<BlockSide> {
        BlockSide::from_normal_index(self.normal_index())
    }

    /// Texture layer sampled by the face.
    pub fn texture_layer(&self) -> u8 {
        unpack_normal_layer(self.normal_layer).1
    }

    /// Describes how the backend binds this vertex's three attributes.
    ///
    /// # Shader Attributes
    /// - `location = 0`: position (3x u16)
    /// - `location = 1`: tex_coords (2x u16, fixed point)
    /// - `location = 2`: normal_layer (u32)
    pub fn attributes() -> [VertexAttribute; 3] {
        [
            VertexAttribute {
                shader_location: 0,
                offset: std::mem::offset_of!(PackedVertex, px),
                format: VertexFormat::Uint16x3,
            },
            VertexAttribute {
                shader_location: 1,
                offset: std::mem::offset_of!(PackedVertex, u),
                format: VertexFormat::Uint16x2,
            },
            VertexAttribute {
                shader_location: 2,
                offset: std::mem::offset_of!(PackedVertex, normal_layer),
                format: VertexFormat::Uint32,
            },
        ]
    }

    /// Distance in bytes between consecutive vertices.
    pub const fn stride() -> usize {
        std::mem::size_of::<PackedVertex>()
    }

    /// Views a vertex slice as raw bytes for buffer upload.
    pub fn slice_as_bytes(vertices: &[PackedVertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

/// Integer component layout of one vertex attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexFormat {
    /// Three unsigned 16-bit integers
    Uint16x3,
    /// Two unsigned 16-bit integers
    Uint16x2,
    /// One unsigned 32-bit integer
    Uint32,
}

impl VertexFormat {
    /// Number of components.
    pub fn components(self) -> usize {
        match self {
            VertexFormat::Uint16x3 => 3,
            VertexFormat::Uint16x2 => 2,
            VertexFormat::Uint32 => 1,
        }
    }

    /// Size of the whole attribute in bytes.
    pub fn size(self) -> usize {
        match self {
            VertexFormat::Uint16x3 => 6,
            VertexFormat::Uint16x2 => 4,
            VertexFormat::Uint32 => 4,
        }
    }
}

/// One attribute of [`PackedVertex`] as seen by the vertex shader.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location
    pub shader_location: u32,
    /// Byte offset inside the vertex
    pub offset: usize,
    /// Component layout
    pub format: VertexFormat,
}

/// Packs a normal index and texture layer into one word.
#[inline]
pub fn pack_normal_layer(normal_index: u8, texture_layer: u8) -> u32 {
    (normal_index as u32 & NORMAL_MASK) | ((texture_layer as u32 & LAYER_MASK) << LAYER_SHIFT)
}

/// Inverse of [`pack_normal_layer`].
#[inline]
pub fn unpack_normal_layer(packed: u32) -> (u8, u8) {
    (
        (packed & NORMAL_MASK) as u8,
        ((packed >> LAYER_SHIFT) & LAYER_MASK) as u8,
    )
}

/// Encodes a span of `tiles` texel-tiles as a fixed-point coordinate.
///
/// Values that do not fit in 16 bits saturate at `u16::MAX`, so a full
/// 16-block span reads as 65535 rather than wrapping to 0.
#[inline]
pub fn encode_uv(tiles: u32) -> u16 {
    tiles
        .saturating_mul(UV_SCALE)
        .min(u16::MAX as u32) as u16
}
