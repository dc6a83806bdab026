//! World Module
//!
//! The chunk-partitioned voxel store and everything that reads or writes it.
//!
//! # Architecture Overview
//!
//! - **Core**: Coordinate keys and the targeting ray
//! - **Data types**: `WorldData` (the store) and `ChunkData`
//! - **World operations**: Insert/remove/lookup and the ray march
//! - **Storage**: Renderer batch cache, rebuilt from dirty chunks
//! - **Generation**: Height-driven population and chunk snapshots

pub mod core;
pub mod data_types;
pub mod error;
pub mod generation;
pub mod storage;
pub mod world_operations;

// Re-export core types for convenience
pub use self::core::{BlockFace, ChunkPos, Ray, RaycastHit, VoxelPos};

pub use data_types::{ChunkData, ChunkMetadata, WorldData, WorldStats};
pub use error::{WorldError, WorldResult};
pub use storage::ChunkCache;

pub use generation::{
    find_spawn_position, generate_chunk_snapshots, populate_world, publish_snapshot,
    ChunkSnapshot, ColumnArea, FlatHeightGenerator, GenerationConfig, HeightGenerator,
    PerlinHeightGenerator,
};

// World operations are the primary API
pub use world_operations::{
    chunk_at, chunk_to_world, dirty_chunks, first_solid_along, get_chunks_in_radius,
    get_local_position, get_or_create_chunk, get_world_stats, has_voxel, insert_voxel,
    insert_voxels_batch, is_chunk_loaded, log_world_stats, mark_chunk_dirty, raycast,
    remove_voxel, remove_voxels_batch, validate_world_data, voxel_to_chunk,
};

/// Helper function to convert voxel position to chunk position
pub fn voxel_to_chunk_pos(voxel_pos: VoxelPos, chunk_size: u32) -> ChunkPos {
    voxel_pos.to_chunk_pos(chunk_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::core::CHUNK_SIZE;

    #[test]
    fn test_voxel_to_chunk_conversion() {
        let voxel_pos = VoxelPos {
            x: 65,
            y: 32,
            z: -15,
        };
        let chunk_pos = voxel_to_chunk_pos(voxel_pos, 32);

        // 65 / 32 = 2, 32 / 32 = 1, floor(-15 / 32) = -1
        assert_eq!(chunk_pos.x, 2);
        assert_eq!(chunk_pos.y, 1);
        assert_eq!(chunk_pos.z, -1);
    }

    #[test]
    fn test_voxel_to_chunk_conversion_with_constant() {
        let voxel_pos = VoxelPos {
            x: 40,
            y: 16,
            z: -16,
        };
        let chunk_pos = voxel_to_chunk_pos(voxel_pos, CHUNK_SIZE);

        // With CHUNK_SIZE=16: 40/16=2, 16/16=1, floor(-16/16)=-1
        assert_eq!(chunk_pos.x, 2);
        assert_eq!(chunk_pos.y, 1);
        assert_eq!(chunk_pos.z, -1);
    }

    #[test]
    fn test_default_world_uses_constant_chunk_size() {
        assert_eq!(WorldData::default().chunk_size, CHUNK_SIZE);
    }
}
