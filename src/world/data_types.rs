//! World Data Types
//!
//! These are the data structures that world_operations functions operate on.
//! `WorldData` exclusively owns every chunk; collision and targeting only
//! ever borrow it.

use super::core::{ChunkPos, VoxelPos};
use super::error::{WorldError, WorldResult};
use crate::constants::core::{CHUNK_SIZE, MAX_CHUNK_SIZE};
use rustc_hash::{FxHashMap, FxHashSet};

/// World data - the voxel store
///
/// Chunks are created lazily on first insertion and are never removed,
/// even once emptied.
#[derive(Clone, Debug)]
pub struct WorldData {
    /// Chunks keyed by chunk coordinate
    pub chunks: FxHashMap<ChunkPos, ChunkData>,

    /// Chunk edge length in voxels
    pub chunk_size: u32,

    /// Mutation counter, stamped into `ChunkData::last_modified`
    pub tick: u64,
}

/// Single chunk's data
#[derive(Clone, Debug)]
pub struct ChunkData {
    /// Chunk position in chunk coordinates
    pub position: ChunkPos,

    /// Present voxels, in world coordinates
    pub voxels: FxHashSet<VoxelPos>,

    /// Chunk metadata flags
    pub flags: ChunkMetadata,

    /// World tick of the last mutation
    pub last_modified: u64,
}

/// Chunk metadata
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Voxel set changed since the last batch rebuild
    pub is_dirty: bool,
    /// Filled from the height generator or a published snapshot
    pub is_generated: bool,
}

/// Chunk sizes the coordinate math supports: `1..=MAX_CHUNK_SIZE`
pub fn check_chunk_size(chunk_size: u32) -> WorldResult<()> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(WorldError::InvalidChunkSize(chunk_size));
    }
    Ok(())
}

impl WorldData {
    /// Create an empty world with the given chunk size
    pub fn new(chunk_size: u32) -> WorldResult<Self> {
        check_chunk_size(chunk_size)?;
        Ok(Self {
            chunks: FxHashMap::default(),
            chunk_size,
            tick: 0,
        })
    }
}

impl Default for WorldData {
    fn default() -> Self {
        // CHUNK_SIZE is range-checked at compile time in constants.rs
        Self {
            chunks: FxHashMap::default(),
            chunk_size: CHUNK_SIZE,
            tick: 0,
        }
    }
}

impl ChunkData {
    /// Create a new empty chunk at the given position
    pub fn new(position: ChunkPos) -> Self {
        Self {
            position,
            voxels: FxHashSet::default(),
            flags: ChunkMetadata::default(),
            last_modified: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn contains(&self, pos: &VoxelPos) -> bool {
        self.voxels.contains(pos)
    }
}

/// World statistics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub total_chunks: usize,
    pub empty_chunks: usize,
    pub dirty_chunks: usize,
    pub total_voxels: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_unusable_chunk_sizes() {
        assert!(matches!(WorldData::new(0), Err(WorldError::InvalidChunkSize(0))));
        assert!(matches!(
            WorldData::new(MAX_CHUNK_SIZE + 1),
            Err(WorldError::InvalidChunkSize(_))
        ));
        assert!(WorldData::new(u32::MAX).is_err());

        let world = WorldData::new(MAX_CHUNK_SIZE).unwrap();
        assert_eq!(world.chunk_size, MAX_CHUNK_SIZE);
        assert!(world.chunks.is_empty());
    }

    #[test]
    fn test_default_uses_reference_chunk_size() {
        assert_eq!(WorldData::default().chunk_size, CHUNK_SIZE);
        assert!(check_chunk_size(CHUNK_SIZE).is_ok());
    }
}
