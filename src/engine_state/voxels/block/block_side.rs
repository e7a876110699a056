//! # Block Side Module
//!
//! This module defines the six faces of a voxel block and the direction each one
//! points in. The discriminants double as the face material slot of a block type.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant's integer value is the index of the face material slot in the
/// block type table, so the order here is load-bearing:
/// [TOP, BOTTOM, NORTH, EAST, SOUTH, WEST]
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Y)
    TOP = 0,

    /// The bottom face (facing negative Y)
    BOTTOM = 1,

    /// The north face (facing negative Z)
    NORTH = 2,

    /// The east face (facing positive X)
    EAST = 3,

    /// The south face (facing positive Z)
    SOUTH = 4,

    /// The west face (facing negative X)
    WEST = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in slot order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::NORTH,
            BlockSide::EAST,
            BlockSide::SOUTH,
            BlockSide::WEST,
        ]
    }

    /// The offset from a block to the neighbour this face touches.
    ///
    /// This is also the outward normal of the face.
    pub fn offset(&self) -> Vector3<i32> {
        match self {
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::NORTH => Vector3::new(0, 0, -1),
            BlockSide::EAST => Vector3::new(1, 0, 0),
            BlockSide::SOUTH => Vector3::new(0, 0, 1),
            BlockSide::WEST => Vector3::new(-1, 0, 0),
        }
    }

    /// Finds the face whose outward normal matches `normal`, if any.
    pub fn from_normal(normal: Vector3<i32>) -> Option<BlockSide> {
        BlockSide::all()
            .into_iter()
            .find(|side| side.offset() == normal)
    }
}
