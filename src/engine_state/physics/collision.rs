//! # Collision Resolution
//!
//! Moves a box through the block grid one axis at a time. After each axis move
//! the box is checked against every block it overlaps; while one remains, the
//! box is pushed back along that axis only, by the penetration depth plus
//! [`EPSILON`].
//!
//! Resolving x, y and z separately keeps the response simple and prevents
//! diagonal tunnelling. Interaction between axes, such as sliding up steps, is
//! not modelled.

use cgmath::{Point3, Vector3};
use log::warn;

use super::aabb::Aabb;
use crate::engine_state::voxels::world::World;

/// Gap left between a resolved box and the block it was pushed out of.
pub const EPSILON: f64 = 1e-6;

/// Upper bound on push-backs for a single axis move.
///
/// Each push-back clears one block, so this is only reached when the box is
/// wedged into a shape it cannot leave along the moving axis.
const MAX_CORRECTIONS: usize = 64;

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// East-west
    X,
    /// Up-down
    Y,
    /// North-south
    Z,
}

impl Axis {
    /// The axes in resolution order.
    pub const ORDER: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    fn component(self, vector: Vector3<f64>) -> f64 {
        match self {
            Axis::X => vector.x,
            Axis::Y => vector.y,
            Axis::Z => vector.z,
        }
    }

    fn of_point(self, point: Point3<f64>) -> f64 {
        match self {
            Axis::X => point.x,
            Axis::Y => point.y,
            Axis::Z => point.z,
        }
    }

    fn shift(self, point: &mut Point3<f64>, amount: f64) {
        match self {
            Axis::X => point.x += amount,
            Axis::Y => point.y += amount,
            Axis::Z => point.z += amount,
        }
    }
}

/// The result of moving along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisCollision {
    /// Whether any block had to be pushed out of.
    pub collided: bool,
    /// Whether a block was hit on its positive face, i.e. while moving toward
    /// negative coordinates. On the y axis this means landing.
    pub from_positive_side: bool,
}

/// The first block, in scan order, whose cube overlaps `aabb`.
pub fn colliding_block(world: &World, aabb: &Aabb) -> Option<Aabb> {
    aabb.candidate_cells()
        .filter(|cell| world.is_block_at_point(*cell))
        .map(Aabb::block)
        .find(|block| aabb.intersects(block))
}

/// Whether `aabb` overlaps any block.
pub fn intersects_world(world: &World, aabb: &Aabb) -> bool {
    colliding_block(world, aabb).is_some()
}

/// Moves a box of `size` centered at `position` by `delta` along `axis`, then
/// pushes it back out of any block it ended up in.
pub fn move_axis(
    world: &World,
    position: &mut Point3<f64>,
    size: Vector3<f64>,
    axis: Axis,
    delta: Vector3<f64>,
) -> AxisCollision {
    let amount = axis.component(delta);
    let mut result = AxisCollision::default();
    if amount == 0.0 {
        return result;
    }
    axis.shift(position, amount);

    for _ in 0..MAX_CORRECTIONS {
        let body = Aabb::from_center_and_size(*position, size);
        let Some(block) = colliding_block(world, &body) else {
            return result;
        };
        result.collided = true;
        if amount > 0.0 {
            axis.shift(position, axis.of_point(block.min) - axis.of_point(body.max) - EPSILON);
        } else {
            result.from_positive_side = true;
            axis.shift(position, axis.of_point(block.max) - axis.of_point(body.min) + EPSILON);
        }
    }

    warn!(
        "Gave up resolving {:?} collision at {:?} after {} corrections",
        axis, position, MAX_CORRECTIONS
    );
    result
}
