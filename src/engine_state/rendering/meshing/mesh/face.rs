use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::block_side::BlockSide;

/// Precomputed geometry for one face orientation of a unit block.
///
/// Corner offsets are relative to the block's minimum corner. The index list
/// forms two triangles whose winding is counter-clockwise when seen from
/// outside, so both triangles agree with `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceTemplate {
    /// The four corners of the quad, relative to the block origin
    pub corners: [[u8; 3]; 4],
    /// Outward unit normal
    pub normal: [i8; 3],
    /// Texture coordinates of each corner
    pub uvs: [[u8; 2]; 4],
    /// Two triangles over `corners`
    pub indices: [u32; 6],
}

#[rustfmt::skip]
const TOP: FaceTemplate = FaceTemplate {
    corners: [[0, 1, 0], [1, 1, 0], [0, 1, 1], [1, 1, 1]],
    normal: [0, 1, 0],
    uvs: [[0, 1], [1, 1], [0, 0], [1, 0]],
    indices: [0, 2, 1, 1, 2, 3],
};

#[rustfmt::skip]
const BOTTOM: FaceTemplate = FaceTemplate {
    corners: [[0, 0, 0], [1, 0, 0], [0, 0, 1], [1, 0, 1]],
    normal: [0, -1, 0],
    uvs: [[1, 1], [0, 1], [1, 0], [0, 0]],
    indices: [0, 1, 2, 1, 3, 2],
};

#[rustfmt::skip]
const NORTH: FaceTemplate = FaceTemplate {
    corners: [[0, 0, 0], [1, 0, 0], [0, 1, 0], [1, 1, 0]],
    normal: [0, 0, -1],
    uvs: [[1, 0], [0, 0], [1, 1], [0, 1]],
    indices: [0, 2, 1, 1, 2, 3],
};

#[rustfmt::skip]
const EAST: FaceTemplate = FaceTemplate {
    corners: [[1, 0, 0], [1, 1, 0], [1, 0, 1], [1, 1, 1]],
    normal: [1, 0, 0],
    uvs: [[1, 0], [1, 1], [0, 0], [0, 1]],
    indices: [0, 1, 2, 1, 3, 2],
};

#[rustfmt::skip]
const SOUTH: FaceTemplate = FaceTemplate {
    corners: [[0, 0, 1], [1, 0, 1], [0, 1, 1], [1, 1, 1]],
    normal: [0, 0, 1],
    uvs: [[0, 0], [1, 0], [0, 1], [1, 1]],
    indices: [0, 1, 2, 1, 3, 2],
};

#[rustfmt::skip]
const WEST: FaceTemplate = FaceTemplate {
    corners: [[0, 0, 0], [0, 1, 0], [0, 0, 1], [0, 1, 1]],
    normal: [-1, 0, 0],
    uvs: [[0, 0], [0, 1], [1, 0], [1, 1]],
    indices: [0, 2, 1, 1, 2, 3],
};

impl FaceTemplate {
    /// The template for a face orientation.
    pub fn for_side(side: BlockSide) -> &'static FaceTemplate {
        match side {
            BlockSide::TOP => &TOP,
            BlockSide::BOTTOM => &BOTTOM,
            BlockSide::NORTH => &NORTH,
            BlockSide::EAST => &EAST,
            BlockSide::SOUTH => &SOUTH,
            BlockSide::WEST => &WEST,
        }
    }

    /// The corners of this face for the block whose minimum corner is `origin`.
    pub fn corners_at(&self, origin: Point3<i32>) -> [Point3<i32>; 4] {
        self.corners.map(|[x, y, z]| {
            Point3::new(origin.x + x as i32, origin.y + y as i32, origin.z + z as i32)
        })
    }

    /// The normal as an integer vector.
    pub fn normal_vector(&self) -> Vector3<i32> {
        Vector3::new(self.normal[0] as i32, self.normal[1] as i32, self.normal[2] as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::EuclideanSpace;

    #[test]
    fn normals_match_block_sides() {
        for side in BlockSide::all() {
            assert_eq!(FaceTemplate::for_side(side).normal_vector(), side.offset());
        }
    }

    #[test]
    fn both_triangles_wind_outward() {
        for side in BlockSide::all() {
            let template = FaceTemplate::for_side(side);
            let corners = template.corners_at(Point3::origin());
            for triangle in template.indices.chunks(3) {
                let a = corners[triangle[0] as usize];
                let b = corners[triangle[1] as usize];
                let c = corners[triangle[2] as usize];
                let winding = (b - a).cross(c - a);
                assert_eq!(winding, template.normal_vector(), "{:?}", side);
            }
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for side in BlockSide::all() {
            let template = FaceTemplate::for_side(side);
            let normal = template.normal_vector();
            let plane: Vec<i32> = template
                .corners_at(Point3::origin())
                .iter()
                .map(|corner| {
                    let v = corner.to_vec();
                    v.x * normal.x + v.y * normal.y + v.z * normal.z
                })
                .collect();
            assert!(plane.iter().all(|d| *d == plane[0]), "{:?}", side);
        }
    }
}
