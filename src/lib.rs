// Cubeworld - chunked voxel world core
//
// Data-oriented layout: plain data structs (`*_data.rs`, `data_types.rs`)
// transformed by free functions (`*_operations.rs`).
// - world_operations for store mutation, lookup and the targeting ray
// - physics for box-versus-voxel collision and the player step
// - game for per-frame orchestration
// The renderer is a collaborator behind the `BatchRenderer` trait.

// Constants module
pub mod constants;

// Core modules
pub mod error;

// Essential systems
pub mod game;
pub mod input;
pub mod physics;
pub mod renderer;
pub mod world;

use serde::Deserialize;
use std::path::Path;

pub use error::{EngineError, EngineResult, ErrorContext, OptionExt};
pub use game::{FrameReport, GameState};
pub use input::{InputState, MovementInput};
pub use physics::{PhysicsConfig, PlayerData, AABB};
pub use renderer::{BatchRenderer, RecordingRenderer};
// === Core World Types ===
pub use world::core::{BlockFace, ChunkPos, Ray, RaycastHit, VoxelPos};
pub use world::generation::{GenerationConfig, HeightGenerator, PerlinHeightGenerator};
pub use world::voxel_to_chunk_pos;
pub use world::{ChunkCache, ChunkData, WorldData, WorldError};

use constants::core::{CHUNK_SIZE, MAX_CHUNK_SIZE};
use constants::generation::DEFAULT_WORLD_EXTENT;
use constants::interaction::{RAY_STEP, REACH_DISTANCE};

/// Main engine configuration
///
/// Every field has a default, so a TOML file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub chunk_size: u32,
    pub ray_step: f32,
    pub reach_distance: f32,
    /// Edge length of the square area populated at startup
    pub world_extent: i32,
    pub physics: PhysicsConfig,
    pub generation: GenerationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            ray_step: RAY_STEP,
            reach_distance: REACH_DISTANCE,
            world_extent: DEFAULT_WORLD_EXTENT,
            physics: PhysicsConfig::default(),
            generation: GenerationConfig::default(),
        }
    }
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> EngineError {
    EngineError::InvalidConfig {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl EngineConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::IoError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        log::info!("[EngineConfig] Loading {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Validate configuration parameters
    ///
    /// Rejections are logged at `warn` before being returned.
    pub fn validate(&self) -> EngineResult<()> {
        if let Err(e) = self.check() {
            log::warn!("[EngineConfig] {}", e);
            return Err(e);
        }

        log::info!(
            "[EngineConfig] Configuration validated: chunk_size={}, ray_step={}, reach={}",
            self.chunk_size,
            self.ray_step,
            self.reach_distance
        );
        Ok(())
    }

    fn check(&self) -> EngineResult<()> {
        if self.chunk_size == 0 {
            return Err(invalid("chunk_size", self.chunk_size, "cannot be 0"));
        }

        if self.chunk_size > MAX_CHUNK_SIZE {
            return Err(invalid(
                "chunk_size",
                self.chunk_size,
                &format!("exceeds maximum of {}", MAX_CHUNK_SIZE),
            ));
        }

        if !(self.reach_distance.is_finite() && self.reach_distance > 0.0) {
            return Err(invalid("reach_distance", self.reach_distance, "must be positive"));
        }

        if !(self.ray_step.is_finite() && self.ray_step > 0.0 && self.ray_step < self.reach_distance) {
            return Err(invalid(
                "ray_step",
                self.ray_step,
                "must be positive and shorter than reach_distance",
            ));
        }

        if self.world_extent < 0 {
            return Err(invalid("world_extent", self.world_extent, "cannot be negative"));
        }

        let physics = &self.physics;
        if !(physics.gravity.is_finite() && physics.gravity >= 0.0) {
            return Err(invalid("physics.gravity", physics.gravity, "must be non-negative"));
        }
        if !(physics.jump_impulse.is_finite() && physics.jump_impulse > 0.0) {
            return Err(invalid("physics.jump_impulse", physics.jump_impulse, "must be positive"));
        }
        if !(physics.move_speed.is_finite() && physics.move_speed > 0.0) {
            return Err(invalid("physics.move_speed", physics.move_speed, "must be positive"));
        }
        if physics.box_size.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(invalid(
                "physics.box_size",
                format!("{:?}", physics.box_size),
                "every extent must be positive",
            ));
        }
        if !physics.box_vertical_offset.is_finite() {
            return Err(invalid(
                "physics.box_vertical_offset",
                physics.box_vertical_offset,
                "must be finite",
            ));
        }

        let generation = &self.generation;
        if !generation.frequency.is_finite() || !generation.amplitude.is_finite() {
            return Err(invalid(
                "generation",
                format!("{}/{}", generation.frequency, generation.amplitude),
                "frequency and amplitude must be finite",
            ));
        }

        Ok(())
    }
}
