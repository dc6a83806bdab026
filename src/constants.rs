//! Engine-wide constants
//!
//! Grouped by subsystem. Everything here is the default used by
//! `EngineConfig::default()`; runtime values come from the config.

use static_assertions::const_assert;

/// World layout
pub mod core {
    /// Chunk edge length in voxels
    pub const CHUNK_SIZE: u32 = 16;

    /// Half the edge of a unit voxel; voxel bounds are center +/- this
    pub const VOXEL_HALF_EXTENT: f32 = 0.5;

    /// Largest chunk size accepted by config validation
    pub const MAX_CHUNK_SIZE: u32 = 256;
}

/// Block targeting
pub mod interaction {
    /// Distance between samples of the targeting ray march
    pub const RAY_STEP: f32 = 0.1;

    /// How far the player can reach when breaking or placing
    pub const REACH_DISTANCE: f32 = 8.0;

    /// Allowed deviation from unit length for a caller-supplied direction
    pub const DIRECTION_TOLERANCE: f32 = 1e-3;
}

/// Player physics
pub mod physics {
    /// Downward acceleration (units / s^2)
    pub const GRAVITY: f32 = 20.0;

    /// Vertical velocity set by a jump (units / s)
    pub const JUMP_IMPULSE: f32 = 8.0;

    /// Horizontal walking speed (units / s)
    pub const MOVE_SPEED: f32 = 5.0;

    /// Full size of the player collision box (x, y, z)
    pub const PLAYER_BOX_SIZE: [f32; 3] = [0.5, 1.8, 0.5];

    /// The collision box sits this far below the position point
    pub const PLAYER_BOX_VERTICAL_OFFSET: f32 = 0.5;

    /// Gap left between the spawn box bottom and the surface voxel top
    pub const SPAWN_CLEARANCE: f32 = 0.05;
}

/// Terrain population defaults
pub mod generation {
    pub const DEFAULT_SEED: u32 = 0;
    pub const NOISE_FREQUENCY: f64 = 0.02;
    pub const HEIGHT_AMPLITUDE: f64 = 20.0;

    /// Edge length (in voxels) of the square area populated at startup
    pub const DEFAULT_WORLD_EXTENT: i32 = 300;
}

const_assert!(self::core::CHUNK_SIZE > 0);
const_assert!(self::core::CHUNK_SIZE <= self::core::MAX_CHUNK_SIZE);
const_assert!(self::generation::DEFAULT_WORLD_EXTENT > 0);
