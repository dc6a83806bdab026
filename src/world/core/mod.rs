//! Core world data types
//!
//! Integer coordinate keys and the targeting ray. These are shared by
//! storage, collision and interaction code.

mod position;
mod ray;

pub use position::{ChunkPos, VoxelPos};
pub use ray::{BlockFace, Ray, RaycastHit};
pub(crate) use ray::determine_hit_face;
