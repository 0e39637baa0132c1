use cgmath::Point3;

use crate::engine_state::voxels::block::{block_side::BlockSide, block_type::BlockType};

/// One entry of the occupancy mask built for a sweep plane.
///
/// Two entries merge into the same quad only if all three fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskCell {
    /// Type of the solid block owning the face
    pub block_type: BlockType,
    /// Which way the face points
    pub block_side: BlockSide,
    /// Texture layer the face samples
    pub texture_layer: u8,
}

impl MaskCell {
    /// Mask entry for a face of `block_type` pointing towards `block_side`.
    pub fn new(block_type: BlockType, block_side: BlockSide) -> Self {
        MaskCell {
            block_type,
            block_side,
            texture_layer: block_type.texture_layer(),
        }
    }
}

/// A merged, axis-aligned rectangle of exposed faces.
///
/// The rectangle lies in the plane `axis = depth`, where `axis` is the axis
/// of `block_side`. It spans `[u, u + width)` along the next axis in cyclic
/// order (X → Y → Z → X) and `[v, v + height)` along the one after that.
/// All coordinates are chunk-local voxel units in `0..=CHUNK_DIMENSION`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad {
    /// Which way the quad faces
    pub block_side: BlockSide,
    /// Plane coordinate along the face axis
    pub depth: u16,
    /// Start along the first in-plane axis
    pub u: u16,
    /// Start along the second in-plane axis
    pub v: u16,
    /// Extent along the first in-plane axis
    pub width: u16,
    /// Extent along the second in-plane axis
    pub height: u16,
    /// Type of the blocks the quad covers
    pub block_type: BlockType,
    /// Texture layer sampled by the quad
    pub texture_layer: u8,
}

impl Quad {
    /// Creates a quad from a mask entry and its rectangle in the sweep plane.
    pub fn new(cell: MaskCell, depth: u16, u: u16, v: u16, width: u16, height: u16) -> Self {
        Quad {
            block_side: cell.block_side,
            depth,
            u,
            v,
            width,
            height,
            block_type: cell.block_type,
            texture_layer: cell.texture_layer,
        }
    }

    /// The two in-plane axes `(u_axis, v_axis)` for faces perpendicular to `axis`.
    #[inline]
    pub fn plane_axes(axis: usize) -> (usize, usize) {
        ((axis + 1) % 3, (axis + 2) % 3)
    }

    /// Number of unit faces covered.
    pub fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    /// Whether the unit face at in-plane cell `(i, j)` lies inside the quad.
    pub fn covers(&self, i: u16, j: u16) -> bool {
        (self.u..self.u + self.width).contains(&i) && (self.v..self.v + self.height).contains(&j)
    }

    /// The four corners in counter-clockwise order as seen from the side the
    /// face points to, each paired with its texture offset in tiles.
    ///
    /// With `e_u × e_v = e_axis` for the cyclic axis order, walking
    /// origin → +u → +u+v → +v is counter-clockwise from the positive side,
    /// so negative faces walk the same ring backwards.
    pub fn corners(&self) -> [(Point3<u16>, [u32; 2]); 4] {
        let axis = self.block_side.axis();
        let (u_axis, v_axis) = Self::plane_axes(axis);

        let corner = |du: u16, dv: u16| {
            let mut p = [0u16; 3];
            p[axis] = self.depth;
            p[u_axis] = self.u + du;
            p[v_axis] = self.v + dv;
            (Point3::new(p[0], p[1], p[2]), [du as u32, dv as u32])
        };

        let (w, h) = (self.width, self.height);
        let origin = corner(0, 0);
        let along_u = corner(w, 0);
        let far = corner(w, h);
        let along_v = corner(0, h);

        if self.block_side.is_positive() {
            [origin, along_u, far, along_v]
        } else {
            [origin, along_v, far, along_u]
        }
    }
}
