//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block and the
//! normal index each one is encoded as in a packed vertex.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The discriminant is the normal index written into the low byte of a
/// packed vertex, so the order is fixed: `[+X, -X, +Y, -Y, +Z, -Z]`.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The right face (facing positive X)
    RIGHT = 0,

    /// The left face (facing negative X)
    LEFT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The front face (facing positive Z)
    FRONT = 4,

    /// The back face (facing negative Z)
    BACK = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in normal-index order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// Returns the face perpendicular to `axis` (0 = X, 1 = Y, 2 = Z) that
    /// points towards the positive or negative end of that axis.
    ///
    /// # Panics
    /// Panics if `axis` is not 0, 1 or 2.
    pub fn from_axis(axis: usize, positive: bool) -> Self {
        match (axis, positive) {
            (0, true) => BlockSide::RIGHT,
            (0, false) => BlockSide::LEFT,
            (1, true) => BlockSide::TOP,
            (1, false) => BlockSide::BOTTOM,
            (2, true) => BlockSide::FRONT,
            (2, false) => BlockSide::BACK,
            _ => panic!("axis {axis} out of range"),
        }
    }

    /// Decodes a normal index produced by [`BlockSide::normal_index`].
    pub fn from_normal_index(index: u8) -> Option<Self> {
        BlockSide::all().get(index as usize).copied()
    }

    /// The normal index of this face, `0..6`.
    #[inline]
    pub fn normal_index(self) -> u8 {
        self as u8
    }

    /// The axis this face is perpendicular to (0 = X, 1 = Y, 2 = Z).
    #[inline]
    pub fn axis(self) -> usize {
        self as usize / 2
    }

    /// Whether the face points towards the positive end of its axis.
    #[inline]
    pub fn is_positive(self) -> bool {
        self as usize % 2 == 0
    }

    /// The unit outward normal of the face.
    pub fn normal(self) -> Vector3<i32> {
        let sign = if self.is_positive() { 1 } else { -1 };
        let mut normal = Vector3::new(0, 0, 0);
        normal[self.axis()] = sign;
        normal
    }
}
