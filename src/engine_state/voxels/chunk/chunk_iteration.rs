//! # Chunk Iteration Module
//!
//! This module provides an iterator for traversing all occupied cells of a chunk.
//!
//! The `ChunkBlockIterator` walks the set bits of the chunk's `solid_array`, so
//! empty cells are skipped in bulk instead of being visited one at a time.

use bitvec::slice::IterOnes;
use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::Chunk;

/// An iterator over all blocks in a chunk, in storage order.
///
/// Yields the world position of each block together with the block itself.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Indices of the occupied cells still to visit
    occupied: IterOnes<'a, usize, bitvec::order::Lsb0>,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` for the given chunk.
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            occupied: chunk_ref.solid_array.iter_ones(),
        }
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, Block);

    fn next(&mut self) -> Option<Self::Item> {
        for index in self.occupied.by_ref() {
            if let Some(block) = self.chunk_ref.get_block_at_index(index) {
                return Some((self.chunk_ref.world_position_of(index), block));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::engine_state::voxels::{
        block::{block_type::BlockType, Block},
        chunk::Chunk,
        coords::ChunkPosition,
    };
    use cgmath::Point3;

    #[test]
    fn yields_only_occupied_cells_in_storage_order() {
        let mut chunk = Chunk::empty(ChunkPosition::new(1, 0));
        chunk.set_block(0, 5, 0, Block::new(BlockType::STONE));
        chunk.set_block(2, 1, 3, Block::new(BlockType::GRASS));
        chunk.set_block(2, 1, 4, Block::new(BlockType::WOOD));
        chunk.remove_block(2, 1, 4);

        let blocks: Vec<_> = chunk.blocks().collect();
        assert_eq!(
            blocks,
            vec![
                (Point3::new(18, 1, 3), Block::new(BlockType::GRASS)),
                (Point3::new(16, 5, 0), Block::new(BlockType::STONE)),
            ]
        );
    }

    #[test]
    fn empty_chunk_yields_nothing() {
        let chunk = Chunk::empty(ChunkPosition::new(0, 0));
        assert_eq!(chunk.blocks().count(), 0);
    }
}
