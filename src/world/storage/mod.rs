//! World storage
//!
//! Voxel data itself lives in `WorldData`; this module holds the
//! renderer-facing cache derived from it.

pub mod chunk_cache;

pub use chunk_cache::ChunkCache;
