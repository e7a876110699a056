//! Rendering-side data for the voxel engine.
//!
//! The engine does not draw anything itself. This module turns chunk block data
//! into geometry (`meshing`) in a vertex format (`Vertex`) that a rendering
//! backend can upload as-is, and defines the boundary (`MeshConsumer`) through
//! which meshes are handed over.

pub mod meshing;
mod vertex;

// Re-export commonly used types
pub use meshing::{ChunkMesh, MeshConsumer, VisibleChunks};
pub use vertex::Vertex;
