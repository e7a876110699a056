//! # Coordinates Module
//!
//! Conversions between world block coordinates, chunk coordinates, and the
//! textual keys used to name blocks and chunks (e.g. in save codes).
//!
//! Keys are the decimal components joined by [`KEY_DELIMITER`], so `(-3, 10, 7)`
//! becomes `"-3,10,7"`. Chunk coordinates use floor division, which keeps
//! negative world coordinates in the right chunk:
//!
//! ```
//! use voxel_world::engine_state::voxels::coords::{chunk_coordinate, local_coordinate};
//!
//! assert_eq!(chunk_coordinate(-1), -1);
//! assert_eq!(local_coordinate(-1), 15);
//! ```

use std::{fmt, str::FromStr};

use cgmath::Point3;
use thiserror::Error;

/// The width and depth of a chunk in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// The lowest Y a block may occupy.
pub const MIN_HEIGHT: i32 = 0;
/// The highest Y a block may occupy (inclusive).
pub const MAX_HEIGHT: i32 = 64;
/// The number of block layers in a chunk column.
pub const CHUNK_HEIGHT: i32 = MAX_HEIGHT - MIN_HEIGHT + 1;

/// The largest chunk coordinate, in either direction, that belongs to the world.
///
/// World coordinates derived from in-world chunks, streaming margins and tree
/// spill included, stay far inside `i32`.
pub const MAX_CHUNK_COORDINATE: i32 = 1 << 20;

/// The largest world X or Z, in either direction, a position may have.
pub const WORLD_HORIZONTAL_LIMIT: f64 = (MAX_CHUNK_COORDINATE * CHUNK_SIZE) as f64;

/// Separates the components of a key.
pub const KEY_DELIMITER: char = ',';

/// Errors produced when parsing a block or chunk key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The key did not have the expected number of components.
    #[error("key {key:?} has {found} components, expected {expected}")]
    WrongArity {
        /// The offending key.
        key: String,
        /// How many components were expected.
        expected: usize,
        /// How many components were found.
        found: usize,
    },
    /// A component was not a signed integer.
    #[error("key {key:?} has a non-integer component {component:?}")]
    NotAnInteger {
        /// The offending key.
        key: String,
        /// The component that failed to parse.
        component: String,
    },
    /// A component was an integer, but not written the way keys are built.
    #[error("key {key:?} is not canonical, expected {expected:?}")]
    NotCanonical {
        /// The offending key.
        key: String,
        /// The canonical spelling of the same coordinates.
        expected: String,
    },
    /// A chunk key named a chunk outside the world.
    #[error("key {key:?} lies outside the world")]
    OutOfWorld {
        /// The offending key.
        key: String,
    },
}

/// The chunk a world X or Z coordinate falls in.
pub fn chunk_coordinate(world: i32) -> i32 {
    world.div_euclid(CHUNK_SIZE)
}

/// The offset of a world X or Z coordinate inside its chunk, in `0..CHUNK_SIZE`.
pub fn local_coordinate(world: i32) -> usize {
    world.rem_euclid(CHUNK_SIZE) as usize
}

/// Whether a Y coordinate lies inside the vertical bound of the world.
pub fn in_vertical_range(y: i32) -> bool {
    (MIN_HEIGHT..=MAX_HEIGHT).contains(&y)
}

/// Builds the key naming the block at `(x, y, z)`.
pub fn block_key(x: i32, y: i32, z: i32) -> String {
    format!("{x}{KEY_DELIMITER}{y}{KEY_DELIMITER}{z}")
}

/// Builds the key naming the chunk at `(cx, cz)`.
pub fn chunk_key(cx: i32, cz: i32) -> String {
    format!("{cx}{KEY_DELIMITER}{cz}")
}

/// Splits a key into exactly `N` signed integers.
///
/// Only the spelling produced by [`block_key`] and [`chunk_key`] is accepted,
/// so `"0, 0"`, `"+1,0"` or `"01,0"` are errors and every coordinate tuple has
/// exactly one key.
pub fn key_to_coords<const N: usize>(key: &str) -> Result<[i32; N], KeyError> {
    let parts: Vec<&str> = key.split(KEY_DELIMITER).collect();
    if parts.len() != N {
        return Err(KeyError::WrongArity {
            key: key.to_string(),
            expected: N,
            found: parts.len(),
        });
    }

    let mut coords = [0; N];
    for (coord, part) in coords.iter_mut().zip(parts) {
        *coord = part.parse().map_err(|_| KeyError::NotAnInteger {
            key: key.to_string(),
            component: part.to_string(),
        })?;
    }

    let expected = coords
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(&KEY_DELIMITER.to_string());
    if expected != key {
        return Err(KeyError::NotCanonical {
            key: key.to_string(),
            expected,
        });
    }
    Ok(coords)
}

/// Parses a block key back into the block position it names.
pub fn parse_block_key(key: &str) -> Result<Point3<i32>, KeyError> {
    let [x, y, z] = key_to_coords::<3>(key)?;
    Ok(Point3::new(x, y, z))
}

/// The 2D coordinate of a chunk column.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChunkPosition {
    /// Chunk X (world X floor-divided by [`CHUNK_SIZE`])
    pub x: i32,
    /// Chunk Z (world Z floor-divided by [`CHUNK_SIZE`])
    pub z: i32,
}

impl ChunkPosition {
    /// Creates a chunk position from chunk coordinates.
    pub fn new(x: i32, z: i32) -> Self {
        ChunkPosition { x, z }
    }

    /// The chunk holding the world column `(x, z)`.
    pub fn containing(x: i32, z: i32) -> Self {
        ChunkPosition::new(chunk_coordinate(x), chunk_coordinate(z))
    }

    /// The chunk holding a continuous world position.
    ///
    /// Positions beyond the world edge map to the outermost chunk; a NaN
    /// component maps to chunk 0.
    pub fn containing_point(point: Point3<f64>) -> Self {
        fn chunk_of(world: f64) -> i32 {
            let limit = MAX_CHUNK_COORDINATE as f64;
            (world / CHUNK_SIZE as f64).floor().clamp(-limit, limit) as i32
        }
        ChunkPosition::new(chunk_of(point.x), chunk_of(point.z))
    }

    /// Whether the chunk lies inside the world's horizontal bound.
    pub fn is_in_world(&self) -> bool {
        self.x.abs() <= MAX_CHUNK_COORDINATE && self.z.abs() <= MAX_CHUNK_COORDINATE
    }

    /// World X of the chunk's first column.
    pub fn min_x(&self) -> i32 {
        self.x * CHUNK_SIZE
    }

    /// World Z of the chunk's first column.
    pub fn min_z(&self) -> i32 {
        self.z * CHUNK_SIZE
    }

    /// Chebyshev distance in chunks, i.e. the square radius `other` lies on.
    pub fn chebyshev_distance(&self, other: &ChunkPosition) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// The key naming this chunk.
    pub fn key(&self) -> String {
        chunk_key(self.x, self.z)
    }
}

impl fmt::Display for ChunkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.x, KEY_DELIMITER, self.z)
    }
}

impl FromStr for ChunkPosition {
    type Err = KeyError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let [x, z] = key_to_coords::<2>(key)?;
        let position = ChunkPosition::new(x, z);
        if !position.is_in_world() {
            return Err(KeyError::OutOfWorld {
                key: key.to_string(),
            });
        }
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_keys_invert() {
        let samples = [
            (0, 0, 0),
            (-1, 64, 15),
            (i32::MIN, 0, i32::MAX),
            (123_456, -7, -98_765),
        ];
        for (x, y, z) in samples {
            assert_eq!(parse_block_key(&block_key(x, y, z)), Ok(Point3::new(x, y, z)));
        }
    }

    #[test]
    fn block_keys_are_distinct_for_distinct_coords() {
        // "1,23,4" vs "12,3,4" style collisions are impossible with a delimiter.
        assert_ne!(block_key(1, 23, 4), block_key(12, 3, 4));
        assert_ne!(block_key(-1, 2, 3), block_key(1, -2, 3));
    }

    #[test]
    fn chunk_keys_invert() {
        let edge = MAX_CHUNK_COORDINATE;
        for (cx, cz) in [(0, 0), (-3, 7), (edge, -edge)] {
            let position: ChunkPosition = chunk_key(cx, cz).parse().unwrap();
            assert_eq!(position, ChunkPosition::new(cx, cz));
            assert_eq!(position.key(), chunk_key(cx, cz));
            assert_eq!(position.to_string(), position.key());
        }
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert!(matches!(
            "1,2".parse::<ChunkPosition>().and_then(|_| parse_block_key("1,2")),
            Err(KeyError::WrongArity { expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            "a,2".parse::<ChunkPosition>(),
            Err(KeyError::NotAnInteger { .. })
        ));
        assert!(matches!(
            "1,2,3".parse::<ChunkPosition>(),
            Err(KeyError::WrongArity { expected: 2, found: 3, .. })
        ));
    }

    #[test]
    fn only_canonical_keys_parse() {
        for key in ["+1,0", "01,0", "-0,0"] {
            assert!(
                matches!(key.parse::<ChunkPosition>(), Err(KeyError::NotCanonical { .. })),
                "{key:?} should not parse"
            );
        }
        assert!(matches!("0, 0".parse::<ChunkPosition>(), Err(KeyError::NotAnInteger { .. })));
        assert!(matches!(
            parse_block_key("1,02,3"),
            Err(KeyError::NotCanonical { expected, .. }) if expected == "1,2,3"
        ));
    }

    #[test]
    fn chunk_keys_outside_the_world_are_rejected() {
        let beyond = MAX_CHUNK_COORDINATE + 1;
        for key in [chunk_key(beyond, 0), chunk_key(0, -beyond), chunk_key(200_000_000, 0)] {
            assert!(matches!(key.parse::<ChunkPosition>(), Err(KeyError::OutOfWorld { .. })));
        }
    }

    #[test]
    fn far_positions_stay_inside_the_world() {
        let edge = MAX_CHUNK_COORDINATE;
        assert_eq!(
            ChunkPosition::containing_point(Point3::new(3.0e9, 40.0, -1.0e300)),
            ChunkPosition::new(edge, -edge)
        );
        assert_eq!(
            ChunkPosition::containing_point(Point3::new(f64::NAN, 0.0, 0.5)),
            ChunkPosition::new(0, 0)
        );
        let far = ChunkPosition::new(edge + 64, -edge - 64);
        assert_eq!(far.min_x(), (edge + 64) * CHUNK_SIZE);
    }

    #[test]
    fn chunk_coordinates_floor_negative_values() {
        assert_eq!(chunk_coordinate(0), 0);
        assert_eq!(chunk_coordinate(15), 0);
        assert_eq!(chunk_coordinate(16), 1);
        assert_eq!(chunk_coordinate(-1), -1);
        assert_eq!(chunk_coordinate(-16), -1);
        assert_eq!(chunk_coordinate(-17), -2);
        assert_eq!(local_coordinate(-1), 15);
        assert_eq!(local_coordinate(-16), 0);
        assert_eq!(local_coordinate(17), 1);
        assert_eq!(ChunkPosition::containing(-1, 16), ChunkPosition::new(-1, 1));
        assert_eq!(
            ChunkPosition::containing_point(Point3::new(-0.2, 30.0, 15.9)),
            ChunkPosition::new(-1, 0)
        );
    }

    #[test]
    fn chebyshev_distance_is_square_radius() {
        let origin = ChunkPosition::new(0, 0);
        assert_eq!(origin.chebyshev_distance(&ChunkPosition::new(3, -5)), 5);
        assert_eq!(origin.chebyshev_distance(&ChunkPosition::new(-2, 2)), 2);
    }
}
