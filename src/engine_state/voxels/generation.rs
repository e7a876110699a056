//! # Terrain Generation
//!
//! Synthesizes the blocks of a chunk column: a layered height field of grass,
//! dirt and stone, followed by a few randomly placed trees.
//!
//! Terrain height depends only on the world column and the configuration, so it
//! is identical across runs. Tree layout is drawn from a random source that is
//! seeded per chunk when [`VegetationConfig::seed`] is set and from entropy
//! otherwise.

use std::ops::RangeInclusive;

use log::{debug, trace};
use noise::{NoiseFn, Perlin};

use crate::engine_state::config::{TerrainConfig, TerrainShape, VegetationConfig, WorldConfig};
use crate::engine_state::voxels::{
    block::{block_type::BlockType, BlockTypeSize},
    coords::{ChunkPosition, CHUNK_SIZE, MIN_HEIGHT},
    world::World,
};

/// Radius of the leaf canopy, in Manhattan distance from the trunk.
const CANOPY_RADIUS: i32 = 2;

/// Rolling hills sampled from `|sin(x) + cos(z)|`, in `[0, 2]`.
#[derive(Debug, Clone, Copy)]
pub struct TrigonometricHills;

impl NoiseFn<f64, 2> for TrigonometricHills {
    fn get(&self, point: [f64; 2]) -> f64 {
        (point[0].sin() + point[1].cos()).abs()
    }
}

/// Perlin noise shifted into `[0, 2]` so it can stand in for [`TrigonometricHills`].
#[derive(Debug, Clone)]
pub struct PerlinHills {
    perlin: Perlin,
}

impl PerlinHills {
    /// Creates hills from a seeded Perlin permutation table.
    pub fn new(seed: u32) -> Self {
        PerlinHills {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseFn<f64, 2> for PerlinHills {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.perlin.get(point) + 1.0
    }
}

enum HeightField {
    Trigonometric(TrigonometricHills),
    Perlin(PerlinHills),
}

impl HeightField {
    fn sample(&self, point: [f64; 2]) -> f64 {
        match self {
            HeightField::Trigonometric(hills) => hills.get(point),
            HeightField::Perlin(hills) => hills.get(point),
        }
    }
}

/// Generates terrain and vegetation for chunks of a [`World`].
pub struct TerrainGenerator {
    terrain: TerrainConfig,
    vegetation: VegetationConfig,
    height_field: HeightField,
}

impl TerrainGenerator {
    /// Creates a generator for the terrain and vegetation settings of `config`.
    pub fn new(config: &WorldConfig) -> Self {
        let height_field = match config.terrain.shape {
            TerrainShape::Trigonometric => HeightField::Trigonometric(TrigonometricHills),
            TerrainShape::Perlin { seed } => HeightField::Perlin(PerlinHills::new(seed)),
        };
        TerrainGenerator {
            terrain: config.terrain.clone(),
            vegetation: config.vegetation.clone(),
            height_field,
        }
    }

    /// The number of terrain blocks in the world column `(x, z)`.
    ///
    /// The column is filled from the bottom of the world up to, but excluding,
    /// this height, so the surface block sits at `surface_height - 1`.
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let sample = self.height_field.sample([
            x as f64 * self.terrain.frequency,
            z as f64 * self.terrain.frequency,
        ]);
        (self.terrain.base_depth as f64 + self.terrain.amplitude * sample).floor() as i32
    }

    /// Synthesizes the chunk at `position`, creating it if needed.
    ///
    /// Returns `false` without touching any block if the chunk was already
    /// generated. Trees near the border may spill into neighbouring chunks.
    pub fn generate_chunk(&self, world: &mut World, position: ChunkPosition) -> bool {
        let chunk = world.get_or_create_chunk(position);
        if chunk.generated {
            return false;
        }
        chunk.generated = true;
        // An empty column still needs a (blank) mesh.
        chunk.mark_dirty();

        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                self.fill_column(world, position.min_x() + lx, position.min_z() + lz);
            }
        }

        let trees = self.plant_trees(world, position);
        debug!("Generated chunk {} with {} trees", position, trees);
        true
    }

    fn fill_column(&self, world: &mut World, x: i32, z: i32) {
        let height = self.surface_height(x, z);
        for y in MIN_HEIGHT..height {
            let block_type = if y == height - 1 {
                BlockType::GRASS
            } else if y >= height - 1 - self.terrain.dirt_depth {
                BlockType::DIRT
            } else {
                BlockType::STONE
            };
            world.place_block(block_type as BlockTypeSize, x, y, z);
        }
    }

    fn rng_for(&self, position: ChunkPosition) -> fastrand::Rng {
        match self.vegetation.seed {
            Some(seed) => fastrand::Rng::with_seed(
                seed ^ (position.x as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
                    ^ (position.z as i64 as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F),
            ),
            None => fastrand::Rng::new(),
        }
    }

    /// Attempts to place trees on the chunk's surface, returning how many grew.
    fn plant_trees(&self, world: &mut World, position: ChunkPosition) -> u32 {
        let mut rng = self.rng_for(position);
        let mut planted = 0;

        for _ in 0..self.vegetation.tree_attempts {
            if rng.f64() >= self.vegetation.tree_chance {
                continue;
            }
            let x = position.min_x() + rng.i32(0..CHUNK_SIZE);
            let z = position.min_z() + rng.i32(0..CHUNK_SIZE);
            let Some(top) = world.top_block_y(x, z) else {
                continue;
            };
            let height = rng.i32(self.vegetation.trunk_heights());
            self.grow_tree(world, &mut rng, x, top + 1, z, height);
            planted += 1;
        }
        planted
    }

    fn grow_tree(
        &self,
        world: &mut World,
        rng: &mut fastrand::Rng,
        x: i32,
        trunk_y: i32,
        z: i32,
        height: i32,
    ) {
        trace!("Growing tree of height {} at {},{},{}", height, x, trunk_y, z);
        for y in trunk_y..trunk_y + height {
            world.place_block(BlockType::WOOD as BlockTypeSize, x, y, z);
        }

        let leaf_y = trunk_y + height;
        let offsets: RangeInclusive<i32> = -CANOPY_RADIUS..=CANOPY_RADIUS;
        for dx in offsets.clone() {
            for dz in offsets.clone() {
                let distance = dx.abs() + dz.abs();
                if distance > CANOPY_RADIUS || rng.f64() >= self.vegetation.leaf_chance {
                    continue;
                }
                world.place_block(BlockType::LEAVES as BlockTypeSize, x + dx, leaf_y, z + dz);
                if distance < CANOPY_RADIUS && rng.f64() < self.vegetation.inner_leaf_chance {
                    world.place_block(
                        BlockType::LEAVES as BlockTypeSize,
                        x + dx,
                        leaf_y - 1,
                        z + dz,
                    );
                }
            }
        }
    }
}
