//! World population from a height generator

use super::height_generator::HeightGenerator;
use super::snapshot::{generate_chunk_snapshots, publish_snapshot};
use crate::physics::{spawn_height_above, PhysicsConfig};
use crate::renderer::BatchRenderer;
use crate::world::data_types::WorldData;
use crate::world::error::WorldResult;
use crate::world::storage::ChunkCache;
use cgmath::Point3;
use std::ops::Range;

/// Rectangle of (x, z) columns, half-open on both axes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnArea {
    pub x: Range<i32>,
    pub z: Range<i32>,
}

impl ColumnArea {
    pub fn new(x: Range<i32>, z: Range<i32>) -> Self {
        Self { x, z }
    }

    /// `extent` x `extent` columns starting at (min, min)
    pub fn square(min: i32, extent: i32) -> Self {
        Self::new(min..min + extent, min..min + extent)
    }

    pub fn column_count(&self) -> usize {
        self.x.len() * self.z.len()
    }
}

/// Insert the surface voxel `(x, height_at(x, z), z)` for every column of
/// `area`, then rebuild each affected chunk's batch exactly once
///
/// # Returns
/// Number of voxels newly inserted
pub fn populate_world<G, R>(
    world: &mut WorldData,
    cache: &mut ChunkCache<R>,
    renderer: &mut R,
    generator: &G,
    area: &ColumnArea,
) -> WorldResult<usize>
where
    G: HeightGenerator + ?Sized,
    R: BatchRenderer,
{
    let snapshots = generate_chunk_snapshots(generator, area, world.chunk_size)?;

    let mut inserted = 0;
    for snapshot in &snapshots {
        inserted += publish_snapshot(world, snapshot)?;
    }
    for snapshot in &snapshots {
        cache.rebuild_batch(world, renderer, snapshot.position())?;
    }

    log::info!(
        "[Generation] Populated {} columns: {} voxels in {} chunks",
        area.column_count(),
        inserted,
        snapshots.len()
    );
    Ok(inserted)
}

/// Position that puts the player just above the terrain surface at (x, z)
pub fn find_spawn_position<G>(generator: &G, x: i32, z: i32, config: &PhysicsConfig) -> Point3<f32>
where
    G: HeightGenerator + ?Sized,
{
    let surface = generator.height_at(x, z);
    Point3::new(x as f32, spawn_height_above(surface, config), z as f32)
}
