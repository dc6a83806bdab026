//! Physics Module
//!
//! Box-versus-voxel collision and the player movement step.

pub mod aabb;
pub mod collision;
pub mod player_data;
pub mod player_operations;

pub use aabb::AABB;
pub use collision::{can_occupy, first_blocking_voxel};
pub use player_data::{PhysicsConfig, PlayerData, StepOutcome};
pub use player_operations::{
    apply_gravity, init_player, movement_basis, movement_delta, player_box, player_box_at,
    set_flying, spawn_height_above, step_player, try_jump, try_move,
};
