#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunk-based voxel world engine: procedural terrain, chunked block
//! storage, face-culled meshing, box-versus-grid collision, and compact save
//! codes.
//!
//! The engine produces geometry but does not draw it. Rendering backends
//! implement [`engine_state::rendering::MeshConsumer`] and receive one mesh per
//! visible chunk.
//!
//! ## Key Modules
//!
//! * `engine_state` - The engine core: world, player, streaming, save codes
//! * `engine_state::voxels` - Block types, chunks, the world map and terrain generation
//! * `engine_state::rendering` - Chunk meshing and the mesh consumer boundary
//! * `engine_state::physics` - Collision resolution, player movement and raycasts
//! * `engine_state::persistence` - The save format
//!
//! ## Usage
//!
//! ```rust
//! use std::time::Duration;
//! use voxel_world::engine_state::{config::WorldConfig, rendering::VisibleChunks, EngineState};
//!
//! let mut config = WorldConfig::default();
//! config.generate_radius = 1;
//! let mut engine = EngineState::new(config, VisibleChunks::default()).unwrap();
//! engine.player_actions.move_forward = true;
//! engine.tick(Duration::from_millis(16));
//! ```
//!
//! The binary runs a short headless session with [`run`].

use std::{backtrace::Backtrace, path::PathBuf, time::Duration};

use log::{error, info};

use engine_state::{
    config::WorldConfig, rendering::VisibleChunks, EngineError, EngineState, PlayerAction,
};

pub mod engine_state;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "VOXEL_CONFIG";

/// Simulated frame length of the headless session.
const FRAME: Duration = Duration::from_millis(16);

/// Initializes logging, loads the configuration, and runs a scripted headless
/// session: walking, jumping, editing blocks, and a save/load round trip.
///
/// The config path is taken from [`CONFIG_ENV_VAR`] or the first command line
/// argument; without one the defaults are used.
pub fn run() -> Result<(), EngineError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
    install_panic_hook();
    info!("Logger initialized");

    let config = match config_path() {
        Some(path) => {
            info!("Loading config from {}", path.display());
            WorldConfig::from_json_file(&path)?
        }
        None => WorldConfig::default(),
    };

    let mut engine = EngineState::new(config, VisibleChunks::default())?;
    info!(
        "World ready: {} chunks, {} visible, {} faces",
        engine.world().chunk_count(),
        engine.consumer().len(),
        engine.consumer().total_faces()
    );

    run_session(&mut engine)?;
    Ok(())
}

fn config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .or_else(|| std::env::args_os().nth(1).map(PathBuf::from))
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("{}\n{}", panic_info, Backtrace::force_capture());
        default_hook(panic_info);
    }));
}

fn run_frames(engine: &mut EngineState<VisibleChunks>, actions: PlayerAction, frames: usize) {
    for _ in 0..frames {
        engine.player_actions = actions.clone();
        engine.tick(FRAME);
    }
}

fn run_session(engine: &mut EngineState<VisibleChunks>) -> Result<(), EngineError> {
    let walk = PlayerAction {
        move_forward: true,
        ..Default::default()
    };
    run_frames(engine, walk.clone(), 120);
    run_frames(
        engine,
        PlayerAction {
            move_up: true,
            ..walk
        },
        30,
    );
    run_frames(
        engine,
        PlayerAction {
            rotate_view: Some((400.0, 0.0)),
            ..Default::default()
        },
        1,
    );
    run_frames(engine, PlayerAction::default(), 60);
    info!("Player at {:?}", engine.player().position);

    // Aim at the ground just ahead, then dig and rebuild.
    run_frames(
        engine,
        PlayerAction {
            rotate_view: Some((0.0, 500.0)),
            ..Default::default()
        },
        1,
    );
    run_frames(
        engine,
        PlayerAction {
            primary_action: true,
            ..Default::default()
        },
        1,
    );
    run_frames(
        engine,
        PlayerAction {
            secondary_action: true,
            ..Default::default()
        },
        1,
    );

    let save = engine.save()?;
    engine.load(&save)?;
    run_frames(engine, PlayerAction::default(), 1);
    info!(
        "Session finished: {} chunks, {} visible, {} faces, save code {} bytes",
        engine.world().chunk_count(),
        engine.consumer().len(),
        engine.consumer().total_faces(),
        save.len()
    );
    Ok(())
}
