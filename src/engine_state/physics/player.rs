//! # Player Body
//!
//! The player is an axis-aligned box centered on its position. Each tick turns
//! movement intent into a velocity, integrates gravity, and moves the box
//! through the block grid with [`move_axis`].
//!
//! Orientation follows the usual first-person convention: yaw turns about +Y,
//! pitch about +X, and an unrotated player looks down -Z.

use std::f64::consts::FRAC_PI_2;

use cgmath::{Euler, InnerSpace, Matrix3, Point3, Rad, Vector3, Zero};

use super::aabb::Aabb;
use super::collision::{move_axis, Axis};
use crate::engine_state::config::PlayerConfig;
use crate::engine_state::voxels::world::World;

/// Pitch is kept just short of straight up or down.
const SAFE_FRAC_PI_2: f64 = FRAC_PI_2 - 0.0001;

/// Movement intent for one tick, on the player's local axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementIntent {
    /// Walk toward -Z (before rotation).
    pub forward: bool,
    /// Walk toward +Z.
    pub backward: bool,
    /// Walk toward -X.
    pub left: bool,
    /// Walk toward +X.
    pub right: bool,
    /// Jump, if standing on something.
    pub jump: bool,
}

impl MovementIntent {
    /// Walking direction before rotation: `(right - left, 0, back - forward)`, normalized.
    fn direction(&self) -> Vector3<f64> {
        let axis = |positive: bool, negative: bool| positive as i32 as f64 - negative as i32 as f64;
        let direction = Vector3::new(
            axis(self.right, self.left),
            0.0,
            axis(self.backward, self.forward),
        );
        if direction.is_zero() {
            direction
        } else {
            direction.normalize()
        }
    }
}

/// Position, velocity and orientation of the player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Center of the bounding box.
    pub position: Point3<f64>,
    /// Velocity in blocks per second.
    pub velocity: Vector3<f64>,
    /// Orientation as (pitch, yaw, roll) about (X, Y, Z).
    pub rotation: Euler<Rad<f64>>,
    /// Set only by landing on a block during the most recent tick.
    pub can_jump: bool,
}

impl PlayerState {
    /// A motionless player at `position`, looking down -Z.
    pub fn new(position: Point3<f64>) -> Self {
        PlayerState {
            position,
            velocity: Vector3::zero(),
            rotation: Euler::new(Rad(0.0), Rad(0.0), Rad(0.0)),
            can_jump: false,
        }
    }

    /// Turns the view by `yaw` and `pitch` radians, clamping pitch.
    pub fn rotate(&mut self, yaw: f64, pitch: f64) {
        self.rotation.y += Rad(yaw);
        self.rotation.x.0 = (self.rotation.x.0 + pitch).clamp(-SAFE_FRAC_PI_2, SAFE_FRAC_PI_2);
    }

    /// The unit vector the player is looking along.
    pub fn look_direction(&self) -> Vector3<f64> {
        let (pitch_sin, pitch_cos) = self.rotation.x.0.sin_cos();
        let (yaw_sin, yaw_cos) = self.rotation.y.0.sin_cos();
        Vector3::new(-yaw_sin * pitch_cos, pitch_sin, -yaw_cos * pitch_cos)
    }

    /// Where the player looks from.
    pub fn eye(&self, config: &PlayerConfig) -> Point3<f64> {
        self.position + Vector3::new(0.0, config.eye_offset, 0.0)
    }

    /// The player's bounding box.
    pub fn aabb(&self, config: &PlayerConfig) -> Aabb {
        Aabb::from_center_and_size(self.position, size_of(config))
    }

    /// Advances the player by `dt` seconds.
    pub fn simulate(
        &mut self,
        world: &World,
        config: &PlayerConfig,
        intent: &MovementIntent,
        dt: f64,
    ) {
        let walk = Matrix3::from_angle_y(self.rotation.y) * intent.direction() * config.speed;
        self.velocity.x = walk.x;
        self.velocity.z = walk.z;

        if intent.jump && self.can_jump {
            self.velocity.y = config.jump_speed;
        } else {
            self.velocity.y -= config.gravity * dt;
        }
        self.can_jump = false;

        let delta = self.velocity * dt;
        let size = size_of(config);
        for axis in Axis::ORDER {
            let collision = move_axis(world, &mut self.position, size, axis, delta);
            if axis == Axis::Y && collision.collided {
                self.velocity.y = 0.0;
                if collision.from_positive_side {
                    self.can_jump = true;
                }
            }
        }
    }
}

fn size_of(config: &PlayerConfig) -> Vector3<f64> {
    Vector3::from(config.size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::physics::collision::EPSILON;
    use crate::engine_state::voxels::block::{block_type::BlockType, BlockTypeSize};

    const STONE: BlockTypeSize = BlockType::STONE as BlockTypeSize;

    fn settle(player: &mut PlayerState, world: &World, config: &PlayerConfig) {
        for _ in 0..120 {
            player.simulate(world, config, &MovementIntent::default(), 1.0 / 60.0);
        }
    }

    #[test]
    fn falls_onto_a_block_and_can_jump() {
        let mut world = World::new();
        world.place_block(STONE, 0, 10, 0);
        let config = PlayerConfig::default();
        let mut player = PlayerState::new(Point3::new(0.5, 14.0, 0.5));

        settle(&mut player, &world, &config);
        assert!((player.position.y - (11.0 + 0.9)).abs() < 10.0 * EPSILON);
        assert!(player.can_jump);
        assert_eq!(player.velocity.y, 0.0);

        let jump = MovementIntent {
            jump: true,
            ..Default::default()
        };
        player.simulate(&world, &config, &jump, 1.0 / 60.0);
        assert!(!player.can_jump);
        assert!(player.velocity.y > 0.0);
        assert!(player.position.y > 11.9);
    }

    #[test]
    fn cannot_jump_in_mid_air() {
        let world = World::new();
        let config = PlayerConfig::default();
        let mut player = PlayerState::new(Point3::new(0.5, 40.0, 0.5));
        let jump = MovementIntent {
            jump: true,
            ..Default::default()
        };
        player.simulate(&world, &config, &jump, 0.1);
        assert!(player.velocity.y < 0.0);
        assert!(player.position.y < 40.0);
    }

    #[test]
    fn forward_follows_yaw() {
        let world = World::new();
        let config = PlayerConfig::default();
        let forward = MovementIntent {
            forward: true,
            ..Default::default()
        };

        let mut player = PlayerState::new(Point3::new(0.0, 40.0, 0.0));
        player.simulate(&world, &config, &forward, 0.5);
        assert!(player.position.x.abs() < 1e-9);
        assert!((player.position.z + 3.0).abs() < 1e-9);

        // A quarter turn left makes forward point down -X.
        let mut turned = PlayerState::new(Point3::new(0.0, 40.0, 0.0));
        turned.rotate(FRAC_PI_2, 0.0);
        turned.simulate(&world, &config, &forward, 0.5);
        assert!((turned.position.x + 3.0).abs() < 1e-9);
        assert!(turned.position.z.abs() < 1e-9);
    }

    #[test]
    fn diagonal_walking_is_not_faster() {
        let world = World::new();
        let config = PlayerConfig::default();
        let intent = MovementIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        let mut player = PlayerState::new(Point3::new(0.0, 40.0, 0.0));
        player.simulate(&world, &config, &intent, 0.5);
        let horizontal = Vector3::new(player.position.x, 0.0, player.position.z);
        assert!((horizontal.magnitude() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn look_direction_matches_rotation() {
        let mut player = PlayerState::new(Point3::new(0.0, 0.0, 0.0));
        assert!((player.look_direction() - Vector3::new(0.0, 0.0, -1.0)).magnitude() < 1e-12);

        player.rotate(0.0, 10.0);
        assert_eq!(player.rotation.x, Rad(SAFE_FRAC_PI_2));
        assert!(player.look_direction().y > 0.999);
    }
}
