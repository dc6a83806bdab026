//! World Error Handling
//!
//! Errors raised by world operations. Missing chunks or voxels on a read
//! are not errors; these cover writes that need a chunk to exist and
//! malformed queries.

use super::core::ChunkPos;

/// World-specific result type
pub type WorldResult<T> = Result<T, WorldError>;

#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("Chunk {0} not loaded")]
    ChunkNotLoaded(ChunkPos),

    #[error("Invalid position")]
    InvalidPosition,

    #[error("Chunk size {0} is outside 1..={}", crate::constants::core::MAX_CHUNK_SIZE)]
    InvalidChunkSize(u32),

    #[error("Ray distance must be finite and non-negative (got {distance})")]
    InvalidDistance { distance: f32 },

    #[error("Ray direction must be finite and unit length (got length {length})")]
    InvalidDirection { length: f32 },

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}
