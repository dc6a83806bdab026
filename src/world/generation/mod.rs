//! World generation
//!
//! Terrain shape comes from a `HeightGenerator`, a pure function of the
//! column coordinate. Columns are turned into immutable chunk snapshots
//! (in parallel) and then published into the store on the calling thread.

pub mod height_generator;
pub mod population;
pub mod snapshot;

pub use height_generator::{FlatHeightGenerator, GenerationConfig, HeightGenerator, PerlinHeightGenerator};
pub use population::{find_spawn_position, populate_world, ColumnArea};
pub use snapshot::{generate_chunk_snapshots, publish_snapshot, ChunkSnapshot};
