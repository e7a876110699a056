//! Face-culled meshing for voxel chunks.
//!
//! Every block contributes one quad per face whose neighbouring cell is empty;
//! faces shared by two blocks are never emitted. Faces are bucketed by block
//! type and orientation so each bucket becomes one material group.
//!
//! Neighbours are looked up inside the chunk being meshed only, so faces on
//! the chunk's outer walls are always emitted.
//!
//! The whole chunk is rebuilt on every call.

use std::collections::BTreeMap;

use cgmath::Point3;
use log::debug;
use web_time::Instant;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockType},
    chunk::Chunk,
};

use super::mesh::ChunkMesh;

/// Builds the face-culled mesh of a chunk.
pub fn culled(chunk: &Chunk) -> ChunkMesh {
    let start_time = Instant::now();
    let origin_x = chunk.position.min_x();
    let origin_z = chunk.position.min_z();

    let mut faces_by_type: BTreeMap<(BlockType, BlockSide), Vec<Point3<i32>>> = BTreeMap::new();

    for (position, block) in chunk.blocks() {
        let Some(block_type) = block.get_type() else {
            continue;
        };
        let lx = position.x - origin_x;
        let lz = position.z - origin_z;

        for side in BlockSide::all() {
            let offset = side.offset();
            if !chunk.is_block_solid(lx + offset.x, position.y + offset.y, lz + offset.z) {
                faces_by_type
                    .entry((block_type, side))
                    .or_default()
                    .push(position);
            }
        }
    }

    let mut mesh = ChunkMesh::new(chunk.position);
    for ((block_type, side), origins) in faces_by_type {
        mesh.add_faces(block_type, side, &origins);
    }

    debug!(
        "Meshed chunk {} ({} blocks, {} faces) in {:?}",
        chunk.position,
        chunk.block_count(),
        mesh.face_count(),
        start_time.elapsed()
    );

    mesh
}
