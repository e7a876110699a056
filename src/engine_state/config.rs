//! # World Configuration
//!
//! Tunable parameters of the engine, grouped by the subsystem that reads them.
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```
//! use voxel_world::engine_state::config::WorldConfig;
//!
//! let config = WorldConfig::from_json_str(r#"{ "generate_radius": 2, "vegetation": { "seed": 7 } }"#).unwrap();
//! assert_eq!(config.generate_radius, 2);
//! assert_eq!(config.vegetation.seed, Some(7));
//! assert_eq!(config.terrain.base_depth, 30);
//! ```
//!
//! Constants that define the save format (chunk size, vertical range) are not
//! configurable; see [`crate::engine_state::voxels::coords`].

use std::{fs, ops::RangeInclusive, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::voxels::block::block_type::BlockType;

/// Errors produced while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    /// The config was not valid JSON for [`WorldConfig`].
    #[error("could not parse config: {0}")]
    Json(#[from] serde_json::Error),
    /// A block was referred to by a name not in the block table.
    #[error("unknown block {0:?}")]
    UnknownBlock(String),
    /// A value was out of its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The shape of the terrain height field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TerrainShape {
    /// Rolling hills from `|sin(x·f) + cos(z·f)|`.
    Trigonometric,
    /// Perlin noise hills.
    Perlin {
        /// Seed for the Perlin permutation table
        seed: u32,
    },
}

/// Parameters of the terrain height field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// The lowest surface height; every column is at least this tall.
    pub base_depth: i32,
    /// Horizontal frequency applied to world coordinates before sampling.
    pub frequency: f64,
    /// Multiplier applied to the sampled value before adding it to `base_depth`.
    pub amplitude: f64,
    /// Number of dirt layers between the grass top and the stone below.
    pub dirt_depth: i32,
    /// Which height function to sample.
    pub shape: TerrainShape,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            base_depth: 30,
            frequency: 0.3,
            amplitude: 3.0,
            dirt_depth: 2,
            shape: TerrainShape::Trigonometric,
        }
    }
}

/// Parameters of tree placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VegetationConfig {
    /// How many trees each chunk tries to place.
    pub tree_attempts: u32,
    /// Probability that a single attempt places a tree.
    pub tree_chance: f64,
    /// Shortest trunk.
    pub min_trunk_height: i32,
    /// Tallest trunk.
    pub max_trunk_height: i32,
    /// Probability of each canopy cell in the top leaf layer.
    pub leaf_chance: f64,
    /// Probability of the extra leaf below a top-layer cell next to the trunk.
    pub inner_leaf_chance: f64,
    /// Seed for reproducible trees. Without one, tree layout differs between runs.
    pub seed: Option<u64>,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        VegetationConfig {
            tree_attempts: 3,
            tree_chance: 0.35,
            min_trunk_height: 2,
            max_trunk_height: 4,
            leaf_chance: 0.8,
            inner_leaf_chance: 0.7,
            seed: None,
        }
    }
}

impl VegetationConfig {
    /// The range trunk heights are drawn from.
    pub fn trunk_heights(&self) -> RangeInclusive<i32> {
        self.min_trunk_height..=self.max_trunk_height
    }
}

/// Parameters of the player's body and movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Horizontal walking speed in blocks per second.
    pub speed: f64,
    /// Upward velocity given by a jump.
    pub jump_speed: f64,
    /// Downward acceleration in blocks per second squared.
    pub gravity: f64,
    /// Bounding box size (width, height, depth), centered on the position.
    pub size: [f64; 3],
    /// Height of the eye above the position, used for aiming.
    pub eye_offset: f64,
    /// How far away blocks can be targeted.
    pub reach: f64,
    /// Radians of rotation per unit of look input.
    pub look_sensitivity: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            speed: 6.0,
            jump_speed: 10.0,
            gravity: 30.0,
            size: [0.6, 1.8, 0.6],
            eye_offset: 0.7,
            reach: 5.0,
            look_sensitivity: 0.002,
        }
    }
}

/// Largest accepted `generate_radius`, in chunks.
pub const MAX_GENERATE_RADIUS: i32 = 64;

/// All tunable engine parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunks within this square radius of the player are generated and shown.
    pub generate_radius: i32,
    /// Upper bound on the simulated time of a single tick, in seconds.
    pub max_frame_delta: f64,
    /// Name of the block initially selected for placement.
    pub starting_block: String,
    /// Terrain height field.
    pub terrain: TerrainConfig,
    /// Tree placement.
    pub vegetation: VegetationConfig,
    /// Player body and movement.
    pub player: PlayerConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            generate_radius: 5,
            max_frame_delta: 0.2,
            starting_block: "grass".to_string(),
            terrain: TerrainConfig::default(),
            vegetation: VegetationConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The block type named by `starting_block`.
    pub fn starting_block_type(&self) -> Result<BlockType, ConfigError> {
        BlockType::from_name(&self.starting_block)
            .ok_or_else(|| ConfigError::UnknownBlock(self.starting_block.clone()))
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn probability(name: &str, value: f64) -> Result<(), ConfigError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be within [0, 1], got {value}")))
            }
        }

        if !(0..=MAX_GENERATE_RADIUS).contains(&self.generate_radius) {
            return Err(ConfigError::Invalid(format!(
                "generate_radius must be within [0, {}], got {}",
                MAX_GENERATE_RADIUS, self.generate_radius
            )));
        }
        if !(self.max_frame_delta > 0.0) {
            return Err(ConfigError::Invalid("max_frame_delta must be positive".into()));
        }
        if self.terrain.dirt_depth < 0 {
            return Err(ConfigError::Invalid("terrain.dirt_depth must not be negative".into()));
        }
        if self.vegetation.trunk_heights().is_empty() || self.vegetation.min_trunk_height < 1 {
            return Err(ConfigError::Invalid(format!(
                "trunk heights {:?} must be a non-empty range of positive heights",
                self.vegetation.trunk_heights()
            )));
        }
        probability("vegetation.tree_chance", self.vegetation.tree_chance)?;
        probability("vegetation.leaf_chance", self.vegetation.leaf_chance)?;
        probability("vegetation.inner_leaf_chance", self.vegetation.inner_leaf_chance)?;
        if self.player.size.iter().any(|extent| !(*extent > 0.0)) {
            return Err(ConfigError::Invalid("player.size extents must be positive".into()));
        }
        if self.player.reach < 0.0 {
            return Err(ConfigError::Invalid("player.reach must not be negative".into()));
        }
        self.starting_block_type()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = WorldConfig::default();
        config.validate().unwrap();
        assert_eq!(config.starting_block_type().unwrap(), BlockType::GRASS);
        assert_eq!(config.vegetation.trunk_heights(), 2..=4);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = WorldConfig::from_json_str(
            r#"{ "terrain": { "shape": { "kind": "perlin", "seed": 9 } }, "starting_block": "stone" }"#,
        )
        .unwrap();
        assert_eq!(config.terrain.shape, TerrainShape::Perlin { seed: 9 });
        assert_eq!(config.terrain.amplitude, 3.0);
        assert_eq!(config.starting_block_type().unwrap(), BlockType::STONE);
        assert_eq!(config.generate_radius, 5);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "starting_block": "lava" }"#),
            Err(ConfigError::UnknownBlock(name)) if name == "lava"
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "vegetation": { "tree_chance": 1.5 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "vegetation": { "min_trunk_height": 5, "max_trunk_height": 3 } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "player": { "size": [0.6, 0.0, 0.6] } }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "generate_radius": -1 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            WorldConfig::from_json_str(r#"{ "generate_radius": 2147483647 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(WorldConfig::from_json_str("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            WorldConfig::from_json_file("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
