//! Player data structures
//!
//! Plain data; all transformations happen in player_operations.rs

use crate::constants::physics::{
    GRAVITY, JUMP_IMPULSE, MOVE_SPEED, PLAYER_BOX_SIZE, PLAYER_BOX_VERTICAL_OFFSET,
};
use cgmath::Point3;
use serde::Deserialize;

/// Player (actor) state owned by the physics step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerData {
    /// Eye/camera position in world space
    pub position: Point3<f32>,

    /// Vertical velocity (units / s), positive is up
    pub vertical_velocity: f32,

    /// Last vertical move attempt was blocked
    pub on_ground: bool,

    /// Free-fly: no gravity, direct vertical control
    pub flying: bool,
}

/// Physics tuning
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    pub jump_impulse: f32,
    pub move_speed: f32,
    /// Full size of the collision box (x, y, z)
    pub box_size: [f32; 3],
    /// How far the box is shifted below the position point
    pub box_vertical_offset: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            move_speed: MOVE_SPEED,
            box_size: PLAYER_BOX_SIZE,
            box_vertical_offset: PLAYER_BOX_VERTICAL_OFFSET,
        }
    }
}

/// What happened during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// A movement proposal was made and accepted
    pub moved: bool,
    /// A movement proposal was made and rejected
    pub movement_blocked: bool,
    /// The gravity proposal was rejected
    pub vertical_blocked: bool,
    pub jumped: bool,
}
