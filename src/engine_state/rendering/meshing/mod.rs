//! Mesh generation and hand-off for voxel rendering.
//!
//! The engine owns geometry: it builds one [`ChunkMesh`] per chunk and rebuilds
//! it whenever the chunk's blocks change. Presentation belongs to whatever
//! implements [`MeshConsumer`], typically a scene graph in a rendering backend.
//! The engine tells the consumer when a chunk's mesh should become visible,
//! when it changed while visible, and when it should be hidden again.
//!
//! # Architecture
//! - `mesh/`: Contains the mesh data structures and the meshing algorithm
//! - [`MeshConsumer`]: The presentation boundary
//! - [`VisibleChunks`]: An in-memory consumer that tracks what would be on screen

use std::collections::HashMap;

use log::trace;

use crate::engine_state::voxels::coords::ChunkPosition;

/// Core mesh generation algorithms and data structures.
mod mesh;

// Re-export the mesh module's public interface for external use
pub use mesh::*;

/// Receives chunk meshes for presentation.
///
/// `show` is called when a chunk becomes visible and again whenever a visible
/// chunk's mesh is rebuilt; the new mesh replaces the previous one. `hide`
/// removes the chunk from presentation without the engine dropping its data.
pub trait MeshConsumer {
    /// Present (or replace) the mesh of the chunk at `position`.
    fn show(&mut self, position: ChunkPosition, mesh: &ChunkMesh);

    /// Stop presenting the chunk at `position`.
    fn hide(&mut self, position: ChunkPosition);
}

/// Summary of a mesh kept by [`VisibleChunks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleMesh {
    /// Number of quads in the presented mesh
    pub faces: usize,
    /// Number of material groups in the presented mesh
    pub groups: usize,
    /// How many times this chunk was shown while already visible
    pub replacements: usize,
}

/// A [`MeshConsumer`] that remembers what is currently visible.
///
/// Useful for headless sessions and tests, where there is no scene graph.
#[derive(Debug, Default)]
pub struct VisibleChunks {
    visible: HashMap<ChunkPosition, VisibleMesh>,
}

impl VisibleChunks {
    /// Whether the chunk at `position` is currently shown.
    pub fn is_visible(&self, position: ChunkPosition) -> bool {
        self.visible.contains_key(&position)
    }

    /// The summary of the chunk's presented mesh, if it is visible.
    pub fn get(&self, position: ChunkPosition) -> Option<&VisibleMesh> {
        self.visible.get(&position)
    }

    /// Number of visible chunks.
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    /// Whether nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Total number of quads across all visible chunks.
    pub fn total_faces(&self) -> usize {
        self.visible.values().map(|mesh| mesh.faces).sum()
    }
}

impl MeshConsumer for VisibleChunks {
    fn show(&mut self, position: ChunkPosition, mesh: &ChunkMesh) {
        trace!("Showing chunk {} with {} faces", position, mesh.face_count());
        let replacements = self
            .visible
            .get(&position)
            .map_or(0, |previous| previous.replacements + 1);
        self.visible.insert(
            position,
            VisibleMesh {
                faces: mesh.face_count(),
                groups: mesh.groups.len(),
                replacements,
            },
        );
    }

    fn hide(&mut self, position: ChunkPosition) {
        trace!("Hiding chunk {}", position);
        self.visible.remove(&position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_replaces_and_hide_removes() {
        let position = ChunkPosition::new(1, -1);
        let mut visible = VisibleChunks::default();
        let mesh = ChunkMesh::new(position);

        visible.show(position, &mesh);
        visible.show(position, &mesh);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.get(position).unwrap().replacements, 1);

        visible.hide(position);
        visible.hide(position);
        assert!(visible.is_empty());
        assert!(!visible.is_visible(position));
    }
}
