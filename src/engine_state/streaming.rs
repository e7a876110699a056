//! # Chunk Streaming
//!
//! Keeps the chunks around the player generated and visible. Every chunk whose
//! chunk coordinate lies within a square radius of the player's chunk is
//! generated (once) and loaded; every loaded chunk outside it is unloaded.
//! Unloading only hides a chunk, its blocks stay in the world.

use log::{debug, info};

use crate::engine_state::rendering::meshing::MeshConsumer;
use crate::engine_state::voxels::{coords::ChunkPosition, generation::TerrainGenerator, world::World};

/// What one streaming pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamingReport {
    /// Chunks synthesized for the first time.
    pub generated: usize,
    /// Meshes rebuilt because their chunk changed.
    pub remeshed: usize,
    /// Chunks that became visible.
    pub loaded: usize,
    /// Chunks that were hidden.
    pub unloaded: usize,
}

impl StreamingReport {
    /// Whether the pass changed nothing.
    pub fn is_idle(&self) -> bool {
        *self == StreamingReport::default()
    }
}

/// Decides which chunks are generated and visible.
#[derive(Debug)]
pub struct StreamingController {
    radius: i32,
    center: Option<ChunkPosition>,
}

impl StreamingController {
    /// Creates a controller for the given square radius, in chunks.
    pub fn new(radius: i32) -> Self {
        StreamingController {
            radius,
            center: None,
        }
    }

    /// The chunk the last pass was centered on.
    pub fn center(&self) -> Option<ChunkPosition> {
        self.center
    }

    /// Whether `position` is inside the streaming square around `center`.
    pub fn in_range(&self, center: ChunkPosition, position: ChunkPosition) -> bool {
        center.chebyshev_distance(&position) <= self.radius
    }

    /// Generates, loads and unloads chunks around `center`.
    ///
    /// Chunks beyond the world edge are never generated or shown.
    pub fn update(
        &mut self,
        world: &mut World,
        generator: &TerrainGenerator,
        center: ChunkPosition,
        consumer: &mut impl MeshConsumer,
    ) -> StreamingReport {
        if self.center != Some(center) {
            debug!("Streaming around chunk {}", center);
            self.center = Some(center);
        }

        let mut report = StreamingReport::default();
        let in_range: Vec<ChunkPosition> = (-self.radius..=self.radius)
            .flat_map(|dx| {
                (-self.radius..=self.radius).map(move |dz| ChunkPosition::new(center.x + dx, center.z + dz))
            })
            .filter(ChunkPosition::is_in_world)
            .collect();

        for position in &in_range {
            if generator.generate_chunk(world, *position) {
                report.generated += 1;
            }
        }
        report.remeshed = world.rebuild_dirty_meshes(consumer);

        for position in &in_range {
            if world.load_chunk(*position, consumer) {
                report.loaded += 1;
            }
        }
        for position in world.loaded_positions() {
            if !self.in_range(center, position) && world.unload_chunk(position, consumer) {
                report.unloaded += 1;
            }
        }

        if report.generated > 0 || report.unloaded > 0 {
            info!(
                "Streaming pass around {}: {} generated, {} remeshed, {} loaded, {} unloaded",
                center, report.generated, report.remeshed, report.loaded, report.unloaded
            );
        }
        report
    }
}
