//! Voxel collision queries
//!
//! Decides whether a box may occupy a position. Only the chunks and voxel
//! cells that can touch the box are examined; the rest of the store is
//! never visited.

use super::aabb::{aabb_intersects, aabb_is_valid, aabb_voxel_range, voxel_aabb, AABB};
use crate::world::core::{ChunkPos, VoxelPos};
use crate::world::data_types::{ChunkData, WorldData};

/// True if `candidate` does not intersect any voxel
///
/// Touching counts as intersecting. A malformed box (NaN, inverted) is
/// never free.
pub fn can_occupy(world: &WorldData, candidate: &AABB) -> bool {
    if !aabb_is_valid(candidate) {
        log::warn!("[Collision] Rejecting malformed box {:?}", candidate);
        return false;
    }
    first_blocking_voxel(world, candidate).is_none()
}

/// First voxel found intersecting `candidate`, if any
pub fn first_blocking_voxel(world: &WorldData, candidate: &AABB) -> Option<VoxelPos> {
    let (cell_min, cell_max) = aabb_voxel_range(candidate);
    let chunk_min = cell_min.to_chunk_pos(world.chunk_size);
    let chunk_max = cell_max.to_chunk_pos(world.chunk_size);

    let span = span_len(chunk_min.x, chunk_max.x)
        .saturating_mul(span_len(chunk_min.y, chunk_max.y))
        .saturating_mul(span_len(chunk_min.z, chunk_max.z));

    let in_span = |pos: &ChunkPos| {
        (chunk_min.x..=chunk_max.x).contains(&pos.x)
            && (chunk_min.y..=chunk_max.y).contains(&pos.y)
            && (chunk_min.z..=chunk_max.z).contains(&pos.z)
    };

    // Probe chunk keys directly unless the box spans more chunks than exist
    if span <= world.chunks.len() as u64 {
        for cx in chunk_min.x..=chunk_max.x {
            for cy in chunk_min.y..=chunk_max.y {
                for cz in chunk_min.z..=chunk_max.z {
                    if let Some(chunk) = world.chunks.get(&ChunkPos::new(cx, cy, cz)) {
                        let hit = blocking_voxel_in_chunk(
                            chunk,
                            world.chunk_size,
                            candidate,
                            cell_min,
                            cell_max,
                        );
                        if hit.is_some() {
                            return hit;
                        }
                    }
                }
            }
        }
        None
    } else {
        world
            .chunks
            .values()
            .filter(|chunk| in_span(&chunk.position))
            .find_map(|chunk| {
                blocking_voxel_in_chunk(chunk, world.chunk_size, candidate, cell_min, cell_max)
            })
    }
}

fn blocking_voxel_in_chunk(
    chunk: &ChunkData,
    chunk_size: u32,
    candidate: &AABB,
    cell_min: VoxelPos,
    cell_max: VoxelPos,
) -> Option<VoxelPos> {
    if chunk.voxels.is_empty() {
        return None;
    }

    // Clip the cell range to this chunk
    let chunk_lo = chunk.position.min_voxel(chunk_size);
    let chunk_hi = chunk.position.max_voxel(chunk_size);
    let lo = VoxelPos::new(
        cell_min.x.max(chunk_lo.x),
        cell_min.y.max(chunk_lo.y),
        cell_min.z.max(chunk_lo.z),
    );
    let hi = VoxelPos::new(
        cell_max.x.min(chunk_hi.x),
        cell_max.y.min(chunk_hi.y),
        cell_max.z.min(chunk_hi.z),
    );

    let cells = span_len(lo.x, hi.x)
        .saturating_mul(span_len(lo.y, hi.y))
        .saturating_mul(span_len(lo.z, hi.z));
    let blocks = |voxel: &VoxelPos| aabb_intersects(&voxel_aabb(*voxel), candidate);

    if cells <= chunk.voxels.len() as u64 {
        for x in lo.x..=hi.x {
            for y in lo.y..=hi.y {
                for z in lo.z..=hi.z {
                    let voxel = VoxelPos::new(x, y, z);
                    if chunk.voxels.contains(&voxel) && blocks(&voxel) {
                        return Some(voxel);
                    }
                }
            }
        }
        None
    } else {
        chunk.voxels.iter().copied().find(|voxel| blocks(voxel))
    }
}

fn span_len(lo: i32, hi: i32) -> u64 {
    if hi < lo {
        0
    } else {
        (hi as i64 - lo as i64 + 1) as u64
    }
}
