//! # Block Module
//!
//! This module provides the core block-related functionality for the voxel engine.
//! It includes block type definitions, block face handling, and block data structures.

use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block ids in memory.
///
/// Only the low 12 bits are meaningful; the save format reserves 4095 for
/// empty cells.
pub type BlockTypeSize = u16;

/// Represents a single voxel block in the world.
///
/// This is a lightweight structure that stores only the block id. The block's
/// properties are looked up from the block type table.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq, Eq)]
pub struct Block {
    /// The type of this block, encoded as a `BlockTypeSize` for compact storage.
    block_type: BlockTypeSize,
}

impl Block {
    /// Creates a new block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type: block_type as BlockTypeSize,
        }
    }

    /// Creates a block from a raw id, or `None` if the id is not in the block table.
    pub fn from_id(id: BlockTypeSize) -> Option<Self> {
        BlockType::from_id(id).map(Block::new)
    }

    /// The raw id of this block.
    pub fn id(&self) -> BlockTypeSize {
        self.block_type
    }

    /// The rich type of this block, or `None` for a block built from raw bytes
    /// that do not name a table entry.
    pub fn get_type(&self) -> Option<BlockType> {
        BlockType::from_id(self.block_type)
    }
}
