//! # Engine State Module
//!
//! The core engine module that owns the voxel world and the player and drives
//! them one tick at a time.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container for the engine
//! * `config` - Tunable parameters, loadable from JSON
//! * `voxels` - Block data, chunk storage, the world map and terrain generation
//! * `rendering` - Chunk meshing and the mesh consumer boundary
//! * `physics` - Bounding boxes, collision resolution, player movement and raycasts
//! * `persistence` - Save codes
//! * `streaming` - Chooses which chunks are generated and visible
//!
//! ## Tick Order
//!
//! Each [`EngineState::tick`] applies look input, moves the player, performs
//! the requested block action, and finally streams chunks around the player's
//! new position. Everything runs on the calling thread and completes within
//! the tick; there is no background work.

use std::time::Duration;

use cgmath::Point3;
use log::{debug, info};
use thiserror::Error;

use config::{ConfigError, WorldConfig};
use persistence::{decode_world, encode_world, SaveError};
use physics::{raycast, Aabb, MovementIntent, PlayerState, RaycastHit};
use rendering::meshing::MeshConsumer;
use streaming::{StreamingController, StreamingReport};
use voxels::{
    block::{block_type::BlockType, BlockTypeSize},
    coords::ChunkPosition,
    generation::TerrainGenerator,
    world::World,
};

pub mod config;
pub mod persistence;
pub mod physics;
pub mod rendering;
pub mod streaming;
pub mod voxels;

/// Errors that stop the engine from starting or restoring a session.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A save code could not be produced or read.
    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Input for the next tick.
///
/// Movement flags apply while set. `primary_action` and `secondary_action`
/// fire once and are cleared by the tick that performs them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerAction {
    /// Movement actions - true while the key is held
    pub move_forward: bool,
    /// Walk backward
    pub move_backward: bool,
    /// Strafe left
    pub move_left: bool,
    /// Strafe right
    pub move_right: bool,
    /// Jump
    pub move_up: bool,
    /// Has no effect on a walking player
    pub move_down: bool,

    /// View rotation as (horizontal, vertical) look input
    pub rotate_view: Option<(f64, f64)>,

    /// Remove the targeted block
    pub primary_action: bool,
    /// Place the selected block against the targeted face
    pub secondary_action: bool,
}

impl PlayerAction {
    fn intent(&self) -> MovementIntent {
        MovementIntent {
            forward: self.move_forward,
            backward: self.move_backward,
            left: self.move_left,
            right: self.move_right,
            jump: self.move_up,
        }
    }
}

/// The main state container for the voxel engine.
///
/// Generic over the mesh consumer, which receives every chunk mesh that
/// becomes visible, changes while visible, or is hidden.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use voxel_world::engine_state::{config::WorldConfig, rendering::VisibleChunks, EngineState};
///
/// let mut config = WorldConfig::default();
/// config.generate_radius = 1;
/// let mut engine = EngineState::new(config, VisibleChunks::default()).unwrap();
/// assert_eq!(engine.consumer().len(), 9);
///
/// engine.tick(Duration::from_millis(16));
/// let save = engine.save().unwrap();
/// engine.load(&save).unwrap();
/// ```
pub struct EngineState<C: MeshConsumer> {
    config: WorldConfig,
    world: World,
    generator: TerrainGenerator,
    streaming: StreamingController,
    player: PlayerState,
    /// Current player actions derived from input
    pub player_actions: PlayerAction,
    selected_block: BlockType,
    consumer: C,
}

impl<C: MeshConsumer> EngineState<C> {
    /// Creates a world, streams the chunks around the origin, and places the
    /// player on top of the terrain there.
    pub fn new(config: WorldConfig, consumer: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let selected_block = config.starting_block_type()?;
        let generator = TerrainGenerator::new(&config);
        let streaming = StreamingController::new(config.generate_radius);

        let mut engine = EngineState {
            world: World::new(),
            generator,
            streaming,
            player: PlayerState::new(Point3::new(0.5, 0.0, 0.5)),
            player_actions: PlayerAction::default(),
            selected_block,
            consumer,
            config,
        };
        engine.stream();
        engine.player.position = engine.spawn_point();
        info!("Spawned player at {:?}", engine.player.position);
        Ok(engine)
    }

    /// Where a fresh player stands: on the surface of column (0, 0).
    pub fn spawn_point(&self) -> Point3<f64> {
        let feet = match self.world.top_block_y(0, 0) {
            Some(top) => (top + 1) as f64,
            None => (self.config.terrain.base_depth + 1) as f64,
        };
        Point3::new(0.5, feet + self.config.player.size[1] / 2.0, 0.5)
    }

    /// Advances the simulation by `dt`, clamped to the configured maximum.
    pub fn tick(&mut self, dt: Duration) -> StreamingReport {
        let dt = dt.as_secs_f64().min(self.config.max_frame_delta);

        if let Some((horizontal, vertical)) = self.player_actions.rotate_view.take() {
            let sensitivity = self.config.player.look_sensitivity;
            self.player.rotate(-horizontal * sensitivity, -vertical * sensitivity);
        }

        let intent = self.player_actions.intent();
        self.player.simulate(&self.world, &self.config.player, &intent, dt);

        if std::mem::take(&mut self.player_actions.primary_action) {
            self.remove_targeted_block();
        }
        if std::mem::take(&mut self.player_actions.secondary_action) {
            self.place_at_target();
        }

        self.stream()
    }

    fn stream(&mut self) -> StreamingReport {
        let center = ChunkPosition::containing_point(self.player.position);
        self.streaming
            .update(&mut self.world, &self.generator, center, &mut self.consumer)
    }

    /// The block the player is aiming at, if one is within reach.
    pub fn target(&self) -> Option<RaycastHit> {
        raycast(
            &self.world,
            self.player.eye(&self.config.player),
            self.player.look_direction(),
            self.config.player.reach,
        )
    }

    /// Removes the targeted block, returning where it was.
    pub fn remove_targeted_block(&mut self) -> Option<Point3<i32>> {
        let hit = self.target()?;
        self.remove_block(hit.block).then_some(hit.block)
    }

    /// Places the selected block against the targeted face, returning where it went.
    ///
    /// Nothing is placed if the cell is taken or the block would overlap the player.
    pub fn place_at_target(&mut self) -> Option<Point3<i32>> {
        let hit = self.target()?;
        let Some(cell) = hit.adjacent() else {
            debug!("Rejected placement: aiming from inside {:?}", hit.block);
            return None;
        };
        if Aabb::block(cell).intersects(&self.player.aabb(&self.config.player)) {
            debug!("Rejected placement at {:?}: overlaps the player", cell);
            return None;
        }
        self.place_block(self.selected_block as BlockTypeSize, cell)
            .then_some(cell)
    }

    /// Places a block and rebuilds the affected mesh.
    pub fn place_block(&mut self, id: BlockTypeSize, cell: Point3<i32>) -> bool {
        let placed = self.world.place_block(id, cell.x, cell.y, cell.z);
        if placed {
            debug!("Placed block {} at {:?}", id, cell);
            self.world.rebuild_dirty_meshes(&mut self.consumer);
        }
        placed
    }

    /// Removes a block and rebuilds the affected mesh.
    pub fn remove_block(&mut self, cell: Point3<i32>) -> bool {
        let removed = self.world.remove_block(cell.x, cell.y, cell.z);
        if removed {
            debug!("Removed block at {:?}", cell);
            self.world.rebuild_dirty_meshes(&mut self.consumer);
        }
        removed
    }

    /// Chooses the block placed by the secondary action.
    ///
    /// Returns `false` and keeps the current choice if `id` is not a block type.
    pub fn select_block(&mut self, id: BlockTypeSize) -> bool {
        match BlockType::from_id(id) {
            Some(block_type) => {
                self.selected_block = block_type;
                true
            }
            None => false,
        }
    }

    /// The block placed by the secondary action.
    pub fn selected_block(&self) -> BlockType {
        self.selected_block
    }

    /// Serializes the world and the player.
    pub fn save(&self) -> Result<String, SaveError> {
        let save = encode_world(&self.world, &self.player)?;
        info!(
            "Saved {} chunks ({} bytes)",
            self.world.chunk_count(),
            save.len()
        );
        Ok(save)
    }

    /// Replaces the world and the player with a save.
    ///
    /// The save is decoded completely first; if it is invalid the current
    /// session is left untouched. Restored chunks start hidden and are shown
    /// by the next tick's streaming pass.
    pub fn load(&mut self, save: &str) -> Result<(), SaveError> {
        let saved = decode_world(save)?;
        self.world.clear(&mut self.consumer);
        self.world = World::from_chunks(saved.chunks);
        self.player = saved.player;
        self.world.rebuild_dirty_meshes(&mut self.consumer);
        info!(
            "Loaded {} chunks, player at {:?}",
            self.world.chunk_count(),
            self.player.position
        );
        Ok(())
    }

    /// The world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player.
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Mutable access to the player, e.g. to teleport or aim it.
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    /// The configuration the engine was created with.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The mesh consumer.
    pub fn consumer(&self) -> &C {
        &self.consumer
    }
}
