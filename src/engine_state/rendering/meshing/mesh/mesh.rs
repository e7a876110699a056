//! Mesh data structures for chunk rendering.
//!
//! A [`ChunkMesh`] holds a single vertex and index buffer for a whole chunk,
//! partitioned into [`MeshGroup`]s. Each group covers a contiguous index range
//! drawn with one material, so a consumer can issue one draw per group.

use cgmath::Point3;

use crate::engine_state::{
    rendering::Vertex,
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType},
        coords::ChunkPosition,
    },
};

use super::face::FaceTemplate;

/// A resolved face material: which texture a face is drawn with.
///
/// Two faces share a material when they belong to the same block type and
/// their face slots alias to the same texture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Material {
    /// The block type owning the material
    pub block_type: BlockType,
    /// The face slot the texture is defined in, after alias resolution
    pub slot: usize,
    /// The texture reference for this material
    pub texture: &'static str,
}

impl Material {
    /// Resolves the material used for `side` of `block_type`.
    pub fn resolve(block_type: BlockType, side: BlockSide) -> Self {
        let (slot, texture) = block_type.descriptor().resolve_face(side);
        Material {
            block_type,
            slot,
            texture,
        }
    }
}

/// A contiguous run of indices sharing one block type, face orientation and material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshGroup {
    /// The block type the faces belong to
    pub block_type: BlockType,
    /// The orientation of every face in the group
    pub side: BlockSide,
    /// The material the group is drawn with
    pub material: Material,
    /// Offset of the group's first index in [`ChunkMesh::indices`]
    pub start: u32,
    /// Number of indices in the group
    pub count: u32,
}

impl MeshGroup {
    /// The number of quads in this group.
    pub fn face_count(&self) -> usize {
        self.count as usize / 6
    }
}

/// The renderable geometry of one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMesh {
    /// The chunk this mesh was built from
    pub position: ChunkPosition,
    /// Vertex data for every face, four vertices per face
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`, six per face
    pub indices: Vec<u32>,
    /// Index ranges partitioned by material
    pub groups: Vec<MeshGroup>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh for the chunk at `position`.
    pub fn new(position: ChunkPosition) -> Self {
        ChunkMesh {
            position,
            vertices: Vec::new(),
            indices: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Appends one group holding a face of orientation `side` for each block in `origins`.
    ///
    /// Nothing is added when `origins` is empty.
    pub fn add_faces(&mut self, block_type: BlockType, side: BlockSide, origins: &[Point3<i32>]) {
        if origins.is_empty() {
            return;
        }

        let template = FaceTemplate::for_side(side);
        let normal = template.normal_vector();
        let start = self.indices.len() as u32;

        self.vertices.reserve(origins.len() * 4);
        self.indices.reserve(origins.len() * 6);

        for origin in origins {
            let base = self.vertices.len() as u32;
            for (corner, uv) in template.corners_at(*origin).iter().zip(template.uvs) {
                self.vertices.push(Vertex::new(*corner, normal, uv));
            }
            self.indices
                .extend(template.indices.iter().map(|index| base + index));
        }

        self.groups.push(MeshGroup {
            block_type,
            side,
            material: Material::resolve(block_type, side),
            start,
            count: self.indices.len() as u32 - start,
        });
    }

    /// Total number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.indices.len() / 6
    }

    /// Whether the mesh has no geometry.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The distinct materials used by the mesh, in group order.
    pub fn materials(&self) -> Vec<Material> {
        let mut materials: Vec<Material> = Vec::new();
        for group in &self.groups {
            if !materials.contains(&group.material) {
                materials.push(group.material);
            }
        }
        materials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_cover_consecutive_index_ranges() {
        let mut mesh = ChunkMesh::new(ChunkPosition::new(0, 0));
        mesh.add_faces(BlockType::STONE, BlockSide::TOP, &[Point3::new(0, 0, 0), Point3::new(1, 0, 0)]);
        mesh.add_faces(BlockType::STONE, BlockSide::EAST, &[]);
        mesh.add_faces(BlockType::GRASS, BlockSide::WEST, &[Point3::new(4, 2, 4)]);

        assert_eq!(mesh.groups.len(), 2);
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.face_count(), 3);
        assert_eq!((mesh.groups[0].start, mesh.groups[0].count), (0, 12));
        assert_eq!((mesh.groups[1].start, mesh.groups[1].count), (12, 6));
        assert_eq!(mesh.groups[1].face_count(), 1);
        assert!(mesh.indices.iter().all(|i| (*i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn vertices_are_offset_by_block_origin() {
        let mut mesh = ChunkMesh::new(ChunkPosition::new(0, 0));
        mesh.add_faces(BlockType::DIRT, BlockSide::TOP, &[Point3::new(-3, 7, 2)]);
        assert_eq!(mesh.vertices[0].position, [-3.0, 8.0, 2.0]);
        assert_eq!(mesh.vertices[3].position, [-2.0, 8.0, 3.0]);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn aliased_faces_share_a_material() {
        let mut mesh = ChunkMesh::new(ChunkPosition::new(0, 0));
        for side in BlockSide::all() {
            mesh.add_faces(BlockType::GRASS, side, &[Point3::new(0, 0, 0)]);
        }
        let textures: Vec<_> = mesh.materials().iter().map(|m| m.texture).collect();
        assert_eq!(textures, vec!["grass", "dirt", "grass_side"]);
    }
}
