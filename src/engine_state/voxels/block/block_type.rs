//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world together
//! with the static block type table: display name, color, and the six face
//! material slots of every type.

use num_derive::FromPrimitive;
use phf::phf_map;

use super::{block_side::BlockSide, BlockTypeSize};

/// Enumerates all block types in the voxel world.
///
/// The discriminant is the block id used everywhere else (chunk storage,
/// meshing groups, save codes). Air is not a block type: empty space is simply
/// the absence of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive)]
pub enum BlockType {
    /// Grass, with a grass top, dirt bottom and grass-on-dirt sides.
    GRASS = 0,

    /// Plain dirt.
    DIRT = 1,

    /// Plain stone.
    STONE = 2,

    /// A log with ring textures on top and bottom and bark on the sides.
    WOOD = 3,

    /// Tree leaves.
    LEAVES = 4,
}

/// Name lookup used when blocks are referred to by name, e.g. from config.
static BLOCK_TYPES_BY_NAME: phf::Map<&'static str, BlockType> = phf_map! {
    "grass" => BlockType::GRASS,
    "dirt" => BlockType::DIRT,
    "stone" => BlockType::STONE,
    "wood" => BlockType::WOOD,
    "leaves" => BlockType::LEAVES,
};

/// What a face material slot holds.
///
/// A slot either names its own texture or aliases an earlier slot of the same
/// block type, so that e.g. all four sides of a log share one material.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaceTexture {
    /// A texture of its own.
    Texture(&'static str),
    /// Reuses the material of the given earlier slot.
    Alias(usize),
}

/// A row of the block type table.
#[derive(Debug)]
pub struct BlockDescriptor {
    /// Human readable name, also used for name lookups.
    pub name: &'static str,
    /// Display color as 0xRRGGBB, used by palettes.
    pub color: u32,
    /// Face material slots in [`BlockSide`] order.
    pub faces: [FaceTexture; 6],
}

use FaceTexture::{Alias, Texture};

/// The block type table, indexed by block id.
pub static BLOCK_TYPES: [BlockDescriptor; 5] = [
    BlockDescriptor {
        name: "grass",
        color: 0x7cfc00,
        faces: [Texture("grass"), Texture("dirt"), Texture("grass_side"), Alias(2), Alias(2), Alias(2)],
    },
    BlockDescriptor {
        name: "dirt",
        color: 0x8b5a2b,
        faces: [Texture("dirt"), Alias(0), Alias(0), Alias(0), Alias(0), Alias(0)],
    },
    BlockDescriptor {
        name: "stone",
        color: 0x888888,
        faces: [Texture("stone"), Alias(0), Alias(0), Alias(0), Alias(0), Alias(0)],
    },
    BlockDescriptor {
        name: "wood",
        color: 0x8b4513,
        faces: [Texture("log_top"), Alias(0), Texture("log_side"), Alias(2), Alias(2), Alias(2)],
    },
    BlockDescriptor {
        name: "leaves",
        color: 0x2b843f,
        faces: [Texture("leaves"), Alias(0), Alias(0), Alias(0), Alias(0), Alias(0)],
    },
];

impl BlockType {
    /// Converts a block id to a `BlockType`, or `None` if no type has that id.
    pub fn from_id(id: BlockTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u16(id)
    }

    /// Looks a block type up by its table name.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_TYPES_BY_NAME.get(name).copied()
    }

    /// The id of this block type.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// The table row describing this block type.
    pub fn descriptor(self) -> &'static BlockDescriptor {
        &BLOCK_TYPES[self as usize]
    }
}

impl BlockDescriptor {
    /// Follows slot aliases until a slot holding its own texture is reached.
    ///
    /// Returns the slot index and the texture name.
    pub fn resolve_face(&self, side: BlockSide) -> (usize, &'static str) {
        let mut slot = side as usize;
        // Aliases point strictly backwards, so this terminates within six steps.
        for _ in 0..self.faces.len() {
            match self.faces[slot] {
                Texture(name) => return (slot, name),
                Alias(earlier) => slot = earlier,
            }
        }
        unreachable!("face aliases of {} form a cycle", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_table_order() {
        for (i, descriptor) in BLOCK_TYPES.iter().enumerate() {
            let block_type = BlockType::from_id(i as BlockTypeSize).unwrap();
            assert_eq!(block_type.descriptor().name, descriptor.name);
            assert_eq!(BlockType::from_name(descriptor.name), Some(block_type));
        }
        assert_eq!(BlockType::from_id(BLOCK_TYPES.len() as BlockTypeSize), None);
        assert_eq!(BlockType::from_name("bedrock"), None);
    }

    #[test]
    fn aliases_point_backwards() {
        for descriptor in BLOCK_TYPES.iter() {
            for (slot, face) in descriptor.faces.iter().enumerate() {
                if let Alias(earlier) = face {
                    assert!(*earlier < slot, "{} slot {}", descriptor.name, slot);
                }
            }
        }
    }

    #[test]
    fn grass_faces_resolve_to_three_materials() {
        let grass = BlockType::GRASS.descriptor();
        assert_eq!(grass.resolve_face(BlockSide::TOP), (0, "grass"));
        assert_eq!(grass.resolve_face(BlockSide::BOTTOM), (1, "dirt"));
        for side in [BlockSide::NORTH, BlockSide::EAST, BlockSide::SOUTH, BlockSide::WEST] {
            assert_eq!(grass.resolve_face(side), (2, "grass_side"));
        }
        assert_eq!(BlockType::WOOD.descriptor().resolve_face(BlockSide::BOTTOM), (0, "log_top"));
    }
}
