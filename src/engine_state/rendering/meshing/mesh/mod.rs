//! Mesh generation for voxel rendering.
//!
//! This module provides the core functionality for converting voxel data into
//! renderable geometry.
//!
//! # Architecture
//! - [`ChunkMesh`]: One chunk's vertices and indices, partitioned into material groups
//! - [`FaceTemplate`]: Precomputed corners, normal, UVs and winding per face orientation
//! - [`culled`]: Face-culled meshing of a single chunk
//!
//! # Usage
//! ```
//! use voxel_world::engine_state::rendering::meshing::culled;
//! use voxel_world::engine_state::voxels::{
//!     block::{block_type::BlockType, Block},
//!     chunk::Chunk,
//!     coords::ChunkPosition,
//! };
//!
//! let mut chunk = Chunk::empty(ChunkPosition::new(0, 0));
//! chunk.set_block(0, 1, 0, Block::new(BlockType::STONE));
//! let mesh = culled(&chunk);
//! assert_eq!(mesh.face_count(), 6);
//! ```

mod culled;
mod face;
mod mesh;

pub use culled::culled;
pub use face::FaceTemplate;
pub use mesh::*;
