//! World Operations - the voxel store API
//!
//! Free functions over `WorldData`. Reads take `&WorldData` and never
//! allocate chunks; writes take `&mut WorldData` and flag the owning chunk
//! dirty so the chunk cache knows to rebuild its batch.

use super::core::{determine_hit_face, ChunkPos, Ray, RaycastHit, VoxelPos};
use super::data_types::{ChunkData, WorldData, WorldStats};
use super::error::{WorldError, WorldResult};
use crate::constants::interaction::{DIRECTION_TOLERANCE, RAY_STEP};
use cgmath::{InnerSpace, Point3, Vector3};

// ============================================================================
// CHUNK LOOKUP
// ============================================================================

/// Chunk owning the voxel at `pos`, if it has been created
pub fn chunk_at(world: &WorldData, pos: VoxelPos) -> Option<&ChunkData> {
    world.chunks.get(&voxel_to_chunk(pos, world.chunk_size))
}

/// Chunk owning the voxel at `pos`, creating an empty one if needed
pub fn get_or_create_chunk(world: &mut WorldData, pos: VoxelPos) -> &mut ChunkData {
    let chunk_pos = voxel_to_chunk(pos, world.chunk_size);
    world.chunks.entry(chunk_pos).or_insert_with(|| {
        log::debug!("[World] Created chunk {}", chunk_pos);
        ChunkData::new(chunk_pos)
    })
}

/// Check if a chunk exists
pub fn is_chunk_loaded(world: &WorldData, chunk_pos: ChunkPos) -> bool {
    world.chunks.contains_key(&chunk_pos)
}

/// Flag a chunk for batch rebuild without touching its voxels
pub fn mark_chunk_dirty(world: &mut WorldData, chunk_pos: ChunkPos) -> WorldResult<()> {
    let tick = world.tick;
    let chunk = world
        .chunks
        .get_mut(&chunk_pos)
        .ok_or(WorldError::ChunkNotLoaded(chunk_pos))?;
    chunk.flags.is_dirty = true;
    chunk.last_modified = tick;
    Ok(())
}

/// Positions of all chunks waiting for a batch rebuild
pub fn dirty_chunks(world: &WorldData) -> Vec<ChunkPos> {
    let mut dirty: Vec<ChunkPos> = world
        .chunks
        .values()
        .filter(|chunk| chunk.flags.is_dirty)
        .map(|chunk| chunk.position)
        .collect();
    dirty.sort_unstable();
    dirty
}

// ============================================================================
// VOXEL OPERATIONS
// ============================================================================

/// Check whether a voxel is present
pub fn has_voxel(world: &WorldData, pos: VoxelPos) -> bool {
    chunk_at(world, pos).map_or(false, |chunk| chunk.voxels.contains(&pos))
}

/// Insert a voxel, creating its chunk on demand
///
/// # Returns
/// `true` if the voxel was not already present. The chunk is only marked
/// dirty when its contents actually change.
pub fn insert_voxel(world: &mut WorldData, pos: VoxelPos) -> bool {
    world.tick += 1;
    let tick = world.tick;
    let chunk = get_or_create_chunk(world, pos);

    if chunk.voxels.insert(pos) {
        chunk.flags.is_dirty = true;
        chunk.last_modified = tick;
        log::debug!("[World] Inserted voxel {} into chunk {}", pos, chunk.position);
        true
    } else {
        false
    }
}

/// Remove a voxel
///
/// # Returns
/// `true` if something was removed. Removing from a missing chunk or an
/// empty cell is a no-op.
pub fn remove_voxel(world: &mut WorldData, pos: VoxelPos) -> bool {
    let chunk_pos = voxel_to_chunk(pos, world.chunk_size);
    let Some(chunk) = world.chunks.get_mut(&chunk_pos) else {
        return false;
    };

    if chunk.voxels.remove(&pos) {
        world.tick += 1;
        chunk.flags.is_dirty = true;
        chunk.last_modified = world.tick;
        log::debug!("[World] Removed voxel {} from chunk {}", pos, chunk_pos);
        true
    } else {
        false
    }
}

// ============================================================================
// BATCH OPERATIONS
// ============================================================================

/// Insert many voxels at once
///
/// # Returns
/// Number of voxels that were newly inserted
pub fn insert_voxels_batch(world: &mut WorldData, positions: &[VoxelPos]) -> usize {
    positions
        .iter()
        .filter(|pos| insert_voxel(world, **pos))
        .count()
}

/// Remove many voxels at once
///
/// # Returns
/// Number of voxels that were actually removed
pub fn remove_voxels_batch(world: &mut WorldData, positions: &[VoxelPos]) -> usize {
    positions
        .iter()
        .filter(|pos| remove_voxel(world, **pos))
        .count()
}

// ============================================================================
// RAYCASTING
// ============================================================================

/// March a ray through the world to find the first solid voxel
///
/// Samples every `step` units from the origin up to `max_distance`, rounds
/// each sample to the nearest voxel and tests it. This is a fixed-step
/// approximation: thin diagonal features can be skipped at large steps.
///
/// # Returns
/// Some(RaycastHit) if hit, None if no hit
pub fn raycast(world: &WorldData, ray: &Ray, max_distance: f32, step: f32) -> Option<RaycastHit> {
    let Some(samples) = sample_count(max_distance, step) else {
        log::warn!(
            "[World] Ignoring raycast with step {} and max distance {}",
            step,
            max_distance
        );
        return None;
    };
    let mut previous: Option<VoxelPos> = None;

    for i in 0..=samples {
        let distance = (i as f64 * step as f64) as f32;
        let point = ray.at(distance);
        let voxel_pos = VoxelPos::from_point_rounded(point);

        // Consecutive samples often land in the same (already empty) cell
        if previous == Some(voxel_pos) {
            continue;
        }

        if has_voxel(world, voxel_pos) {
            return Some(RaycastHit {
                position: voxel_pos,
                face: determine_hit_face(point, voxel_pos),
                distance,
                previous,
            });
        }

        previous = Some(voxel_pos);
    }

    None
}

/// Index of the last sample of a march over `[0, max_distance]`
///
/// Computed up front in f64 so float error in an accumulated distance
/// cannot add or drop the final sample, and long marches are not cut short.
/// `None` if the step or distance is unusable.
fn sample_count(max_distance: f32, step: f32) -> Option<u64> {
    let usable = step.is_finite() && step > 0.0 && max_distance.is_finite() && max_distance >= 0.0;
    if !usable {
        return None;
    }
    Some((max_distance as f64 / step as f64 + 1e-4).floor() as u64)
}

/// First solid voxel along `direction` from `origin`
///
/// `direction` must already be unit length and `max_distance` finite and
/// non-negative; anything else is a caller bug and is rejected rather than
/// silently corrected. The march always uses the reference `RAY_STEP`, so
/// results do not depend on `EngineConfig::ray_step` (which only affects the
/// per-frame crosshair in `GameState::tick`). Use `raycast` for a custom step.
pub fn first_solid_along(
    world: &WorldData,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> WorldResult<Option<VoxelPos>> {
    let length = direction.magnitude();
    if !length.is_finite() || (length - 1.0).abs() > DIRECTION_TOLERANCE {
        return Err(WorldError::InvalidDirection { length });
    }
    if !(max_distance.is_finite() && max_distance >= 0.0) {
        return Err(WorldError::InvalidDistance {
            distance: max_distance,
        });
    }

    let ray = Ray::new(origin, direction)?;
    Ok(raycast(world, &ray, max_distance, RAY_STEP).map(|hit| hit.position))
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Convert voxel position to chunk position
pub fn voxel_to_chunk(pos: VoxelPos, chunk_size: u32) -> ChunkPos {
    pos.to_chunk_pos(chunk_size)
}

/// Convert chunk position to world position (chunk corner)
pub fn chunk_to_world(chunk_pos: ChunkPos, chunk_size: u32) -> VoxelPos {
    chunk_pos.min_voxel(chunk_size)
}

/// Get local position within chunk (0 to chunk_size-1)
pub fn get_local_position(pos: VoxelPos, chunk_size: u32) -> (u32, u32, u32) {
    let chunk_size_i32 = chunk_size as i32;
    (
        pos.x.rem_euclid(chunk_size_i32) as u32,
        pos.y.rem_euclid(chunk_size_i32) as u32,
        pos.z.rem_euclid(chunk_size_i32) as u32,
    )
}

/// Get chunks in radius around a position
pub fn get_chunks_in_radius(center: ChunkPos, radius: u32) -> Vec<ChunkPos> {
    let mut chunks = Vec::new();
    let radius = radius as i32;

    for x in (center.x - radius)..=(center.x + radius) {
        for y in (center.y - radius)..=(center.y + radius) {
            for z in (center.z - radius)..=(center.z + radius) {
                let dx = x - center.x;
                let dy = y - center.y;
                let dz = z - center.z;

                if dx * dx + dy * dy + dz * dz <= radius * radius {
                    chunks.push(ChunkPos { x, y, z });
                }
            }
        }
    }

    chunks
}

// ============================================================================
// DIAGNOSTICS
// ============================================================================

/// Collect world statistics
pub fn get_world_stats(world: &WorldData) -> WorldStats {
    world
        .chunks
        .values()
        .fold(WorldStats::default(), |mut stats, chunk| {
            stats.total_chunks += 1;
            stats.total_voxels += chunk.voxels.len() as u64;
            if chunk.voxels.is_empty() {
                stats.empty_chunks += 1;
            }
            if chunk.flags.is_dirty {
                stats.dirty_chunks += 1;
            }
            stats
        })
}

/// Log world statistics
pub fn log_world_stats(world: &WorldData) {
    let stats = get_world_stats(world);
    log::info!("[World] Statistics:");
    log::info!("  Chunk size: {}", world.chunk_size);
    log::info!("  Tick: {}", world.tick);
    log::info!(
        "  Chunks: {} ({} empty, {} dirty)",
        stats.total_chunks,
        stats.empty_chunks,
        stats.dirty_chunks
    );
    log::info!("  Voxels: {}", stats.total_voxels);
}

/// Validate that every voxel is stored in the chunk its coordinate maps to
pub fn validate_world_data(world: &WorldData) -> Result<(), String> {
    for (key, chunk) in &world.chunks {
        if *key != chunk.position {
            return Err(format!(
                "Chunk stored under {} reports position {}",
                key, chunk.position
            ));
        }

        if let Some(stray) = chunk
            .voxels
            .iter()
            .find(|voxel| voxel_to_chunk(**voxel, world.chunk_size) != *key)
        {
            return Err(format!("Voxel {} stored in foreign chunk {}", stray, key));
        }
    }

    Ok(())
}
