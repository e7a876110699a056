//! # Voxel Engine Core
//!
//! This module contains the block data of the world and everything that
//! creates or addresses it.
//!
//! ## Architecture
//!
//! * **Block**: Block types, their faces, and the block type table
//! * **Coords**: Chunk/local coordinate math and the textual block and chunk keys
//! * **Chunk**: Dense storage for one 16x16 column of the world
//! * **World**: The sparse map of chunks and the block operations on it
//! * **Generation**: Terrain and tree synthesis for newly visited chunks
//!
//! ## Data Flow
//!
//! 1. The streaming controller asks the generator for chunks near the player
//! 2. The generator writes blocks through the world, which creates chunks lazily
//! 3. Block writes mark chunks dirty
//! 4. Dirty chunks are remeshed and handed to the mesh consumer

pub mod block;
pub mod chunk;
pub mod coords;
pub mod generation;
pub mod world;
