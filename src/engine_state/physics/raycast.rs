//! Voxel raycasting for block targeting.
//!
//! Walks the grid cells a ray passes through in order (a DDA traversal), so the
//! first occupied cell found is the nearest block along the ray.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::{block::block_side::BlockSide, world::World};

/// The nearest block along a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    /// The block that was hit.
    pub block: Point3<i32>,
    /// Outward normal of the face the ray entered through.
    ///
    /// Zero when the ray starts inside the block.
    pub normal: Vector3<i32>,
    /// Distance from the origin to the entry point.
    pub distance: f64,
}

impl RaycastHit {
    /// The face the ray entered through, or `None` if it started inside the block.
    pub fn side(&self) -> Option<BlockSide> {
        BlockSide::from_normal(self.normal)
    }

    /// The empty cell in front of the hit face, where a new block would go.
    pub fn adjacent(&self) -> Option<Point3<i32>> {
        self.side().map(|side| self.block + side.offset())
    }
}

/// Finds the first block hit by a ray within `max_distance`.
///
/// Returns `None` for a zero direction.
pub fn raycast(
    world: &World,
    origin: Point3<f64>,
    direction: Vector3<f64>,
    max_distance: f64,
) -> Option<RaycastHit> {
    if direction.magnitude2() == 0.0 {
        return None;
    }
    let direction: [f64; 3] = direction.normalize().into();
    let origin: [f64; 3] = origin.into();

    let mut cell = origin.map(|o| o.floor() as i32);
    let step = direction.map(|d| if d > 0.0 { 1 } else { -1 });
    let t_delta = direction.map(|d| if d != 0.0 { 1.0 / d.abs() } else { f64::INFINITY });
    let mut t_max = [0.0; 3];
    for axis in 0..3 {
        t_max[axis] = if direction[axis] > 0.0 {
            (cell[axis] as f64 + 1.0 - origin[axis]) * t_delta[axis]
        } else if direction[axis] < 0.0 {
            (origin[axis] - cell[axis] as f64) * t_delta[axis]
        } else {
            f64::INFINITY
        };
    }

    let mut normal = [0; 3];
    let mut distance = 0.0;
    loop {
        if world.is_block_at(cell[0], cell[1], cell[2]) {
            return Some(RaycastHit {
                block: cell.into(),
                normal: normal.into(),
                distance,
            });
        }

        let axis = if t_max[0] < t_max[1] {
            if t_max[0] < t_max[2] { 0 } else { 2 }
        } else if t_max[1] < t_max[2] {
            1
        } else {
            2
        };
        if t_max[axis] > max_distance {
            return None;
        }

        distance = t_max[axis];
        cell[axis] = cell[axis].checked_add(step[axis])?;
        t_max[axis] += t_delta[axis];
        normal = [0; 3];
        normal[axis] = -step[axis];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{block_type::BlockType, BlockTypeSize};

    const STONE: BlockTypeSize = BlockType::STONE as BlockTypeSize;

    #[test]
    fn looking_down_hits_the_top_face() {
        let mut world = World::new();
        world.place_block(STONE, 0, 10, 0);
        let hit = raycast(&world, Point3::new(0.5, 12.6, 0.5), -Vector3::unit_y(), 5.0).unwrap();
        assert_eq!(hit.block, Point3::new(0, 10, 0));
        assert_eq!(hit.normal, Vector3::new(0, 1, 0));
        assert_eq!(hit.adjacent(), Some(Point3::new(0, 11, 0)));
        assert_eq!(hit.side(), Some(BlockSide::TOP));
        assert!((hit.distance - 1.6).abs() < 1e-9);
    }

    #[test]
    fn starting_inside_a_block_has_no_side() {
        let mut world = World::new();
        world.place_block(STONE, 0, 10, 0);
        let hit = raycast(&world, Point3::new(0.5, 10.5, 0.5), Vector3::unit_x(), 5.0).unwrap();
        assert_eq!(hit.block, Point3::new(0, 10, 0));
        assert_eq!(hit.distance, 0.0);
        assert_eq!(hit.side(), None);
        assert_eq!(hit.adjacent(), None);
    }

    #[test]
    fn nearest_block_wins() {
        let mut world = World::new();
        world.place_block(STONE, -3, 5, 0);
        world.place_block(STONE, -2, 5, 0);
        let hit = raycast(&world, Point3::new(0.5, 5.5, 0.5), Vector3::new(-1.0, 0.0, 0.0), 5.0).unwrap();
        assert_eq!(hit.block, Point3::new(-2, 5, 0));
        assert_eq!(hit.normal, Vector3::new(1, 0, 0));
        assert_eq!(hit.side(), Some(BlockSide::EAST));
    }

    #[test]
    fn reach_is_respected() {
        let mut world = World::new();
        world.place_block(STONE, 0, 5, -8);
        let origin = Point3::new(0.5, 5.5, 0.5);
        assert_eq!(raycast(&world, origin, -Vector3::unit_z(), 5.0), None);
        assert!(raycast(&world, origin, -Vector3::unit_z(), 10.0).is_some());
        assert_eq!(raycast(&world, origin, Vector3::new(0.0, 0.0, 0.0), 10.0), None);
    }

    #[test]
    fn diagonal_rays_pass_between_cells() {
        let mut world = World::new();
        world.place_block(STONE, 2, 5, 2);
        let hit = raycast(&world, Point3::new(0.5, 5.5, 0.5), Vector3::new(1.0, 0.0, 1.0), 5.0).unwrap();
        assert_eq!(hit.block, Point3::new(2, 5, 2));
        assert_ne!(hit.normal, Vector3::new(0, 0, 0));
    }
}
