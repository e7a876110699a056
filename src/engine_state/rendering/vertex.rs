//! Vertex data structures for voxel meshes.
//!
//! This module defines the vertex format handed to the mesh consumer. It is a
//! plain `#[repr(C)]` struct so a rendering backend can upload it directly.

use cgmath::{Point3, Vector3};

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Normal: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Outward normal of the face this vertex belongs to
    pub normal: [f32; 3],
    /// UV texture coordinates (0.0-1.0)
    pub tex_coords: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `pos` - The 3D position of the vertex in world space
    /// * `normal` - The outward unit normal of the owning face
    /// * `uv` - Texture coordinates, each 0 or 1 for block faces
    pub fn new(pos: Point3<i32>, normal: Vector3<i32>, uv: [u8; 2]) -> Self {
        Vertex {
            position: [pos.x as f32, pos.y as f32, pos.z as f32],
            normal: [normal.x as f32, normal.y as f32, normal.z as f32],
            tex_coords: [uv[0] as f32, uv[1] as f32],
        }
    }
}
