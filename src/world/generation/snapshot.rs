//! Chunk snapshots
//!
//! Generation work runs on the rayon pool and produces `ChunkSnapshot`s,
//! which cannot be modified after construction. Installing a snapshot into
//! `WorldData` is a separate step performed by the thread that owns the
//! world, so queries never observe a half-built chunk.

use super::height_generator::HeightGenerator;
use super::population::ColumnArea;
use crate::world::core::{ChunkPos, VoxelPos};
use crate::world::data_types::{check_chunk_size, ChunkData, WorldData};
use crate::world::error::{WorldError, WorldResult};
use rayon::prelude::*;
use rustc_hash::FxHashMap;

/// Immutable voxel contents generated for one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSnapshot {
    position: ChunkPos,
    chunk_size: u32,
    voxels: Vec<VoxelPos>,
}

impl ChunkSnapshot {
    /// Build a snapshot, checking that every voxel belongs to `position`
    pub fn new(position: ChunkPos, chunk_size: u32, mut voxels: Vec<VoxelPos>) -> WorldResult<Self> {
        check_chunk_size(chunk_size)?;
        if voxels.iter().any(|v| v.to_chunk_pos(chunk_size) != position) {
            return Err(WorldError::InvalidPosition);
        }
        voxels.sort_unstable();
        voxels.dedup();
        Ok(Self {
            position,
            chunk_size,
            voxels,
        })
    }

    pub fn position(&self) -> ChunkPos {
        self.position
    }

    pub fn chunk_size(&self) -> u32 {
        self.chunk_size
    }

    pub fn voxels(&self) -> &[VoxelPos] {
        &self.voxels
    }
}

/// Evaluate the height generator over `area` in parallel and group the
/// resulting surface voxels by chunk
///
/// # Returns
/// Snapshots sorted by chunk position
pub fn generate_chunk_snapshots<G>(
    generator: &G,
    area: &ColumnArea,
    chunk_size: u32,
) -> WorldResult<Vec<ChunkSnapshot>>
where
    G: HeightGenerator + ?Sized,
{
    check_chunk_size(chunk_size)?;

    let z_range = area.z.clone();
    let surface: Vec<VoxelPos> = area
        .x
        .clone()
        .into_par_iter()
        .flat_map_iter(|x| {
            z_range
                .clone()
                .map(move |z| VoxelPos::new(x, generator.height_at(x, z), z))
        })
        .collect();

    let mut grouped: FxHashMap<ChunkPos, Vec<VoxelPos>> = FxHashMap::default();
    for voxel in surface {
        grouped
            .entry(voxel.to_chunk_pos(chunk_size))
            .or_default()
            .push(voxel);
    }

    let mut snapshots: Vec<ChunkSnapshot> = grouped
        .into_par_iter()
        .map(|(position, mut voxels)| {
            voxels.sort_unstable();
            ChunkSnapshot {
                position,
                chunk_size,
                voxels,
            }
        })
        .collect();
    snapshots.sort_unstable_by_key(|snapshot| snapshot.position);

    log::debug!(
        "[Generation] Built {} chunk snapshots for {} columns",
        snapshots.len(),
        area.column_count()
    );
    Ok(snapshots)
}

/// Install a snapshot into the world
///
/// Voxels are merged into the chunk (creating it if needed) and the chunk
/// is marked dirty and generated. Snapshots built for a different chunk
/// size are rejected.
///
/// # Returns
/// Number of voxels that were newly added
pub fn publish_snapshot(world: &mut WorldData, snapshot: &ChunkSnapshot) -> WorldResult<usize> {
    if snapshot.chunk_size != world.chunk_size {
        return Err(WorldError::OperationFailed(format!(
            "snapshot for chunk size {} published into world with chunk size {}",
            snapshot.chunk_size, world.chunk_size
        )));
    }

    world.tick += 1;
    let tick = world.tick;
    let chunk = world
        .chunks
        .entry(snapshot.position)
        .or_insert_with(|| ChunkData::new(snapshot.position));

    let before = chunk.voxels.len();
    chunk.voxels.extend(snapshot.voxels.iter().copied());
    let added = chunk.voxels.len() - before;

    chunk.flags.is_dirty = true;
    chunk.flags.is_generated = true;
    chunk.last_modified = tick;
    Ok(added)
}
