//! # World Module
//!
//! This module provides the `World` struct which owns every chunk of the voxel
//! world. It is the single place where chunks are created, so every block
//! operation goes through it.
//!
//! ## Architecture
//!
//! The world uses sparse storage: a chunk exists only once something wrote to
//! it or asked for it to be generated. Reads never create chunks; a missing
//! chunk reads as empty space.
//!
//! ## Meshing
//!
//! Block mutations only mark their chunk dirty. [`World::rebuild_dirty_meshes`]
//! rebuilds the mesh of every dirty, generated chunk and hands it to the mesh
//! consumer if the chunk is loaded. Callers run it at the end of each operation
//! that changed blocks, so a rebuild is never observed half-way.

use std::collections::HashMap;

use cgmath::Point3;
use log::{debug, trace};

use crate::engine_state::rendering::meshing::{culled, MeshConsumer};
use crate::engine_state::voxels::{
    block::{block_type::BlockType, Block, BlockTypeSize},
    chunk::Chunk,
    coords::{in_vertical_range, local_coordinate, ChunkPosition, MAX_HEIGHT, MIN_HEIGHT},
};

/// A voxel world composed of chunk columns.
///
/// # Examples
///
/// ```
/// use voxel_world::engine_state::voxels::{block::block_type::BlockType, world::World};
///
/// let mut world = World::new();
/// assert!(world.place_block(BlockType::STONE as u16, -1, 10, 3));
/// assert!(world.is_block_at(-1, 10, 3));
/// assert_eq!(world.top_block_y(-1, 3), Some(10));
/// assert!(world.remove_block(-1, 10, 3));
/// assert!(!world.remove_block(-1, 10, 3));
/// ```
#[derive(Default)]
pub struct World {
    /// A mapping from chunk coordinates to chunk data.
    chunks: HashMap<ChunkPosition, Chunk>,
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World {
            chunks: HashMap::new(),
        }
    }

    /// Builds a world from already populated chunks.
    pub fn from_chunks(chunks: impl IntoIterator<Item = Chunk>) -> Self {
        World {
            chunks: chunks
                .into_iter()
                .map(|chunk| (chunk.position, chunk))
                .collect(),
        }
    }

    /// The chunk at `position`, if it was ever created.
    pub fn chunk(&self, position: ChunkPosition) -> Option<&Chunk> {
        self.chunks.get(&position)
    }

    /// Returns the chunk at `position`, creating it empty and ungenerated if absent.
    ///
    /// This is the only place chunks come into existence, apart from
    /// [`World::from_chunks`].
    pub fn get_or_create_chunk(&mut self, position: ChunkPosition) -> &mut Chunk {
        self.chunks.entry(position).or_insert_with(|| {
            trace!("Creating chunk {}", position);
            Chunk::empty(position)
        })
    }

    /// Iterates over every chunk in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Number of chunks that exist.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Places a block of type `id` at a world coordinate.
    ///
    /// Creates the owning chunk if needed. Returns `false` without changing
    /// anything if the cell lies outside the world, `id` is not a registered
    /// block type, or the cell is already occupied.
    pub fn place_block(&mut self, id: BlockTypeSize, x: i32, y: i32, z: i32) -> bool {
        let position = ChunkPosition::containing(x, z);
        if !in_vertical_range(y) || !position.is_in_world() {
            return false;
        }
        let Some(block) = Block::from_id(id) else {
            return false;
        };
        let chunk = self.get_or_create_chunk(position);
        chunk.set_block(
            local_coordinate(x) as i32,
            y,
            local_coordinate(z) as i32,
            block,
        )
    }

    /// Removes the block at a world coordinate.
    ///
    /// Returns `false` if there was no block there. Never creates a chunk.
    pub fn remove_block(&mut self, x: i32, y: i32, z: i32) -> bool {
        match self.chunks.get_mut(&ChunkPosition::containing(x, z)) {
            Some(chunk) => {
                chunk.remove_block(local_coordinate(x) as i32, y, local_coordinate(z) as i32)
            }
            None => false,
        }
    }

    /// The block at a world coordinate, treating missing chunks as empty.
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        self.chunks
            .get(&ChunkPosition::containing(x, z))
            .and_then(|chunk| {
                chunk.get_block(local_coordinate(x) as i32, y, local_coordinate(z) as i32)
            })
    }

    /// Whether a block occupies the given world coordinate.
    pub fn is_block_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.chunks
            .get(&ChunkPosition::containing(x, z))
            .is_some_and(|chunk| {
                chunk.is_block_solid(local_coordinate(x) as i32, y, local_coordinate(z) as i32)
            })
    }

    /// Whether a block occupies the given point.
    pub fn is_block_at_point(&self, point: Point3<i32>) -> bool {
        self.is_block_at(point.x, point.y, point.z)
    }

    /// The highest occupied Y of the column `(x, z)`, scanning down from the top.
    pub fn top_block_y(&self, x: i32, z: i32) -> Option<i32> {
        let chunk = self.chunks.get(&ChunkPosition::containing(x, z))?;
        let lx = local_coordinate(x) as i32;
        let lz = local_coordinate(z) as i32;
        (MIN_HEIGHT..=MAX_HEIGHT)
            .rev()
            .find(|y| chunk.is_block_solid(lx, *y, lz))
    }

    /// The type of the block at a world coordinate.
    pub fn block_type_at(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        self.block_at(x, y, z).and_then(|block| block.get_type())
    }

    /// Shows a chunk through the consumer. Does nothing if it is already loaded
    /// or does not exist.
    pub fn load_chunk(&mut self, position: ChunkPosition, consumer: &mut impl MeshConsumer) -> bool {
        let Some(chunk) = self.chunks.get_mut(&position) else {
            return false;
        };
        if chunk.loaded {
            return false;
        }
        chunk.loaded = true;
        if let Some(mesh) = &chunk.mesh {
            consumer.show(position, mesh);
        }
        debug!("Loaded chunk {}", position);
        true
    }

    /// Hides a chunk through the consumer, keeping its data. Does nothing if it
    /// is not loaded.
    pub fn unload_chunk(
        &mut self,
        position: ChunkPosition,
        consumer: &mut impl MeshConsumer,
    ) -> bool {
        let Some(chunk) = self.chunks.get_mut(&position) else {
            return false;
        };
        if !chunk.loaded {
            return false;
        }
        chunk.loaded = false;
        consumer.hide(position);
        debug!("Unloaded chunk {}", position);
        true
    }

    /// Positions of every loaded chunk.
    pub fn loaded_positions(&self) -> Vec<ChunkPosition> {
        self.chunks
            .values()
            .filter(|chunk| chunk.loaded)
            .map(|chunk| chunk.position)
            .collect()
    }

    /// Rebuilds the mesh of every dirty, generated chunk.
    ///
    /// Rebuilt meshes of loaded chunks are shown again, replacing the old ones.
    /// Chunks that were never generated stay dirty until they are. Returns the
    /// number of meshes rebuilt.
    pub fn rebuild_dirty_meshes(&mut self, consumer: &mut impl MeshConsumer) -> usize {
        let mut rebuilt = 0;
        for chunk in self.chunks.values_mut() {
            if !chunk.generated || !chunk.is_dirty() {
                continue;
            }
            let mesh = culled(chunk);
            if chunk.loaded {
                consumer.show(chunk.position, &mesh);
            }
            chunk.set_mesh(mesh);
            rebuilt += 1;
        }
        if rebuilt > 0 {
            debug!("Rebuilt {} chunk meshes", rebuilt);
        }
        rebuilt
    }

    /// Hides every loaded chunk and drops all chunk data.
    pub fn clear(&mut self, consumer: &mut impl MeshConsumer) {
        for chunk in self.chunks.values().filter(|chunk| chunk.loaded) {
            consumer.hide(chunk.position);
        }
        self.chunks.clear();
    }
}
