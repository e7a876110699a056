//! # Persistence
//!
//! Whole-world save codes. A save is a JSON document holding the player state
//! and, for every chunk, its run-length block code and whether it was
//! generated:
//!
//! ```json
//! {
//!   "player": { "position": [0.5, 33.9, 0.5], "velocity": [0, 0, 0], "rotation": [0, 0, 0], "canJump": true },
//!   "chunks": { "0,0": { "blocks": "//////...", "generated": true } }
//! }
//! ```
//!
//! Chunk keys are written in sorted order, so saving the same world twice
//! yields the same text.

use std::collections::BTreeMap;

use cgmath::{Euler, Point3, Rad, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine_state::physics::PlayerState;
use crate::engine_state::voxels::{
    chunk::Chunk,
    coords::{ChunkPosition, KeyError, WORLD_HORIZONTAL_LIMIT},
    world::World,
};
use chunk_codec::{decode_chunk, encode_chunk, BlockCodeError};

pub mod alphabet;
pub mod chunk_codec;

/// Errors produced while reading a save code.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The save was not a JSON document of the expected shape.
    #[error("malformed save document: {0}")]
    Json(#[from] serde_json::Error),
    /// A chunk key did not name a chunk inside the world.
    #[error("invalid chunk key {key:?}")]
    InvalidChunkKey {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        #[source]
        source: KeyError,
    },
    /// The player fields held a value the simulation cannot start from.
    #[error("invalid player state: {0}")]
    InvalidPlayer(String),
    /// A chunk's block code could not be decoded.
    #[error("corrupt block code for chunk {chunk}")]
    CorruptBlockCode {
        /// Key of the chunk.
        chunk: String,
        /// What was wrong with the code.
        #[source]
        source: BlockCodeError,
    },
}

/// Player fields of a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Center of the bounding box.
    pub position: [f64; 3],
    /// Velocity.
    pub velocity: [f64; 3],
    /// Euler angles about x, y and z.
    pub rotation: [f64; 3],
    /// Whether the player was standing on something.
    pub can_jump: bool,
}

impl From<&PlayerState> for PlayerRecord {
    fn from(player: &PlayerState) -> Self {
        PlayerRecord {
            position: player.position.into(),
            velocity: player.velocity.into(),
            rotation: [player.rotation.x.0, player.rotation.y.0, player.rotation.z.0],
            can_jump: player.can_jump,
        }
    }
}

impl PlayerRecord {
    /// Checks that every value is finite and the position lies inside the world.
    pub fn validate(&self) -> Result<(), SaveError> {
        let fields = [
            ("position", &self.position),
            ("velocity", &self.velocity),
            ("rotation", &self.rotation),
        ];
        for (name, values) in fields {
            if values.iter().any(|value| !value.is_finite()) {
                return Err(SaveError::InvalidPlayer(format!("{name} {values:?} is not finite")));
            }
        }
        let [x, _, z] = self.position;
        if x.abs() > WORLD_HORIZONTAL_LIMIT || z.abs() > WORLD_HORIZONTAL_LIMIT {
            return Err(SaveError::InvalidPlayer(format!(
                "position {:?} lies outside the world",
                self.position
            )));
        }
        Ok(())
    }
}

impl From<&PlayerRecord> for PlayerState {
    fn from(record: &PlayerRecord) -> Self {
        let [x, y, z] = record.rotation;
        PlayerState {
            position: Point3::from(record.position),
            velocity: Vector3::from(record.velocity),
            rotation: Euler::new(Rad(x), Rad(y), Rad(z)),
            can_jump: record.can_jump,
        }
    }
}

/// One chunk of a save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// Run-length block code.
    pub blocks: String,
    /// Whether terrain synthesis had run.
    pub generated: bool,
}

/// The JSON shape of a save code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    /// The player.
    pub player: PlayerRecord,
    /// Chunks by key.
    pub chunks: BTreeMap<String, ChunkRecord>,
}

/// A decoded save, ready to replace the live world.
pub struct SavedWorld {
    /// The restored player.
    pub player: PlayerState,
    /// The restored chunks, none of them loaded.
    pub chunks: Vec<Chunk>,
}

/// Serializes the player and every chunk of `world`.
pub fn encode_world(world: &World, player: &PlayerState) -> Result<String, SaveError> {
    let chunks = world
        .chunks()
        .map(|chunk| {
            (
                chunk.position.key(),
                ChunkRecord {
                    blocks: encode_chunk(chunk),
                    generated: chunk.generated,
                },
            )
        })
        .collect();
    let document = SaveDocument {
        player: PlayerRecord::from(player),
        chunks,
    };
    Ok(serde_json::to_string(&document)?)
}

/// Parses and decodes a save code without touching any live state.
pub fn decode_world(save: &str) -> Result<SavedWorld, SaveError> {
    let document: SaveDocument = serde_json::from_str(save)?;
    document.player.validate()?;

    let mut chunks = Vec::with_capacity(document.chunks.len());
    for (key, record) in &document.chunks {
        let position: ChunkPosition = key.parse().map_err(|source| SaveError::InvalidChunkKey {
            key: key.clone(),
            source,
        })?;
        let mut chunk =
            decode_chunk(position, &record.blocks).map_err(|source| SaveError::CorruptBlockCode {
                chunk: key.clone(),
                source,
            })?;
        chunk.generated = record.generated;
        chunk.loaded = false;
        chunks.push(chunk);
    }

    Ok(SavedWorld {
        player: PlayerState::from(&document.player),
        chunks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::{block_type::BlockType, BlockTypeSize};

    fn sample_world() -> World {
        let mut world = World::new();
        world.place_block(BlockType::GRASS as BlockTypeSize, 5, 10, 5);
        world.place_block(BlockType::WOOD as BlockTypeSize, -1, 64, -1);
        world.get_or_create_chunk(ChunkPosition::new(0, 0)).generated = true;
        world
    }

    fn sample_player() -> PlayerState {
        let mut player = PlayerState::new(Point3::new(0.5, 33.5, -2.25));
        player.velocity = Vector3::new(1.0, -2.0, 0.0);
        player.rotation = Euler::new(Rad(0.25), Rad(-1.5), Rad(0.0));
        player.can_jump = true;
        player
    }

    #[test]
    fn world_survives_a_round_trip() {
        let world = sample_world();
        let player = sample_player();
        let save = encode_world(&world, &player).unwrap();
        let restored = decode_world(&save).unwrap();

        assert_eq!(restored.player, player);
        assert_eq!(restored.chunks.len(), 2);
        let restored = World::from_chunks(restored.chunks);
        assert_eq!(restored.block_type_at(5, 10, 5), Some(BlockType::GRASS));
        assert_eq!(restored.block_type_at(-1, 64, -1), Some(BlockType::WOOD));
        assert!(restored.chunk(ChunkPosition::new(0, 0)).unwrap().generated);
        assert!(!restored.chunk(ChunkPosition::new(-1, -1)).unwrap().generated);
        assert!(restored.chunks().all(|chunk| !chunk.loaded));
    }

    #[test]
    fn saves_are_deterministic_and_use_the_documented_fields() {
        let world = sample_world();
        let player = sample_player();
        let save = encode_world(&world, &player).unwrap();
        assert_eq!(save, encode_world(&world, &player).unwrap());

        let value: serde_json::Value = serde_json::from_str(&save).unwrap();
        assert_eq!(value["player"]["canJump"], serde_json::Value::Bool(true));
        assert_eq!(value["player"]["rotation"][1], serde_json::json!(-1.5));
        assert_eq!(value["chunks"]["0,0"]["generated"], serde_json::Value::Bool(true));
        assert_eq!(value["chunks"]["-1,-1"]["generated"], serde_json::Value::Bool(false));
        assert!(value["chunks"]["0,0"]["blocks"].is_string());
    }

    #[test]
    fn bad_saves_are_rejected() {
        assert!(matches!(decode_world("not json"), Err(SaveError::Json(_))));

        let player = r#"{"position":[0,0,0],"velocity":[0,0,0],"rotation":[0,0,0],"canJump":false}"#;
        let bad_key = format!(r#"{{"player":{player},"chunks":{{"0;0":{{"blocks":"","generated":true}}}}}}"#);
        assert!(matches!(
            decode_world(&bad_key),
            Err(SaveError::InvalidChunkKey { key, .. }) if key == "0;0"
        ));

        let bad_code = format!(r#"{{"player":{player},"chunks":{{"0,0":{{"blocks":"AAAB","generated":true}}}}}}"#);
        assert!(matches!(
            decode_world(&bad_code),
            Err(SaveError::CorruptBlockCode { chunk, source: BlockCodeError::Volume(1) }) if chunk == "0,0"
        ));

        let empty = encode_chunk(&Chunk::empty(ChunkPosition::default()));
        let alias = format!(
            r#"{{"player":{player},"chunks":{{"0,0":{{"blocks":"{empty}","generated":true}},"00,0":{{"blocks":"{empty}","generated":true}}}}}}"#
        );
        assert!(matches!(
            decode_world(&alias),
            Err(SaveError::InvalidChunkKey { key, source: KeyError::NotCanonical { .. } }) if key == "00,0"
        ));
    }

    #[test]
    fn chunks_beyond_the_world_edge_are_rejected() {
        let player = r#"{"position":[0,0,0],"velocity":[0,0,0],"rotation":[0,0,0],"canJump":false}"#;
        let empty = encode_chunk(&Chunk::empty(ChunkPosition::default()));
        let far = format!(
            r#"{{"player":{player},"chunks":{{"200000000,0":{{"blocks":"{empty}","generated":true}}}}}}"#
        );
        assert!(matches!(
            decode_world(&far),
            Err(SaveError::InvalidChunkKey { source: KeyError::OutOfWorld { .. }, .. })
        ));
    }

    #[test]
    fn unusable_player_states_are_rejected() {
        let save = |position: &str, velocity: &str| {
            format!(
                r#"{{"player":{{"position":{position},"velocity":{velocity},"rotation":[0,0,0],"canJump":false}},"chunks":{{}}}}"#
            )
        };
        assert!(decode_world(&save("[0.5,40,0.5]", "[0,0,0]")).is_ok());
        assert!(matches!(
            decode_world(&save("[3.0e9,40,0.5]", "[0,0,0]")),
            Err(SaveError::InvalidPlayer(_))
        ));
        assert!(matches!(
            decode_world(&save("[0.5,40,-1e300]", "[0,0,0]")),
            Err(SaveError::InvalidPlayer(_))
        ));

        let mut record = PlayerRecord::from(&sample_player());
        record.velocity[1] = f64::NAN;
        assert!(matches!(record.validate(), Err(SaveError::InvalidPlayer(_))));
        record.velocity[1] = 0.0;
        record.rotation[0] = f64::INFINITY;
        assert!(matches!(record.validate(), Err(SaveError::InvalidPlayer(_))));
    }
}
