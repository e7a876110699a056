//! Physics systems
//!
//! Collision between the player's bounding box and the block grid, the
//! player's movement integration, and raycasting for block targeting.

pub mod aabb;
pub mod collision;
pub mod player;
pub mod raycast;

pub use aabb::Aabb;
pub use collision::{intersects_world, move_axis, Axis, EPSILON};
pub use player::{MovementIntent, PlayerState};
pub use raycast::{raycast, RaycastHit};
