//! Procedural block textures.
//!
//! The block textures are small enough to generate at startup instead of
//! shipping image files. Each block type owns one layer of a 2D texture
//! array; a layer is a tile of speckled colour seeded with a fixed value, so
//! every run produces the same pixels.

use crate::engine_state::voxels::block::block_type::BlockType;

/// Edge length of one texture tile in texels.
pub const TILE_SIZE: u32 = 16;

const GRASS_SEED: u64 = 0xA341_316C;
const STONE_SEED: u64 = 0xC801_3EA4;

/// RGBA8 pixel data for a texture array, layers stored back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureArrayData {
    /// Width of each layer in texels
    pub width: u32,
    /// Height of each layer in texels
    pub height: u32,
    /// Number of layers
    pub layers: u32,
    /// `width * height * layers * 4` bytes, row-major within a layer
    pub rgba: Vec<u8>,
}

impl TextureArrayData {
    /// Generates the block texture array: layer 0 grass, layer 1 stone.
    ///
    /// Layer order matches [`BlockType::texture_layer`].
    pub fn block_textures() -> Self {
        let mut rgba = Vec::with_capacity((TILE_SIZE * TILE_SIZE * 4 * 2) as usize);
        rgba.extend(grass_tile());
        rgba.extend(stone_tile());

        debug_assert_eq!(BlockType::GRASS.texture_layer(), 0);
        debug_assert_eq!(BlockType::STONE.texture_layer(), 1);

        TextureArrayData {
            width: TILE_SIZE,
            height: TILE_SIZE,
            layers: 2,
            rgba,
        }
    }

    /// Bytes of a single layer.
    pub fn layer_size(&self) -> usize {
        (self.width * self.height * 4) as usize
    }

    /// The pixels of `layer`, or `None` past the last layer.
    pub fn layer(&self, layer: u32) -> Option<&[u8]> {
        if layer >= self.layers {
            return None;
        }
        let size = self.layer_size();
        let start = layer as usize * size;
        self.rgba.get(start..start + size)
    }

    /// The RGBA value of one texel.
    pub fn texel(&self, layer: u32, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) * 4) as usize;
        let pixel = self.layer(layer)?.get(offset..offset + 4)?;
        Some([pixel[0], pixel[1], pixel[2], pixel[3]])
    }
}

/// Green with a little red and blue jitter.
fn grass_tile() -> Vec<u8> {
    let mut rng = fastrand::Rng::with_seed(GRASS_SEED);
    speckled_tile(|| {
        let noise = rng.i32(-15..=16);
        [
            channel(40 + noise / 2),
            channel(150 + noise),
            channel(40 + noise / 3),
        ]
    })
}

/// Flat grey with a wider jitter.
fn stone_tile() -> Vec<u8> {
    let mut rng = fastrand::Rng::with_seed(STONE_SEED);
    speckled_tile(|| {
        let grey = channel(120 + rng.i32(-31..=32));
        [grey, grey, grey]
    })
}

fn speckled_tile(mut texel: impl FnMut() -> [u8; 3]) -> Vec<u8> {
    (0..TILE_SIZE * TILE_SIZE)
        .flat_map(|_| {
            let [r, g, b] = texel();
            [r, g, b, u8::MAX]
        })
        .collect()
}

#[inline]
fn channel(value: i32) -> u8 {
    value.clamp(0, u8::MAX as i32) as u8
}
