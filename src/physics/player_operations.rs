//! Player operations - the physics step
//!
//! Each tick makes at most two proposals against the voxel store: one for
//! the movement intent and one for gravity. A proposal is committed whole
//! or discarded whole; there is no sliding along walls, so a diagonal push
//! into a wall stalls instead of gliding along it.

use super::aabb::{aabb_from_center_half_extents, AABB};
use super::collision::can_occupy;
use super::player_data::{PhysicsConfig, PlayerData, StepOutcome};
use crate::constants::core::VOXEL_HALF_EXTENT;
use crate::constants::physics::SPAWN_CLEARANCE;
use crate::input::{InputState, MovementInput};
use crate::world::data_types::WorldData;
use cgmath::{InnerSpace, Point3, Vector3, Zero};

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Player at rest, airborne until the first blocked gravity step
pub fn init_player(position: Point3<f32>) -> PlayerData {
    PlayerData {
        position,
        vertical_velocity: 0.0,
        on_ground: false,
        flying: false,
    }
}

/// Position that rests the player's box just above a surface voxel at
/// height `surface_y`
pub fn spawn_height_above(surface_y: i32, config: &PhysicsConfig) -> f32 {
    surface_y as f32
        + VOXEL_HALF_EXTENT
        + config.box_size[1] * 0.5
        + config.box_vertical_offset
        + SPAWN_CLEARANCE
}

// ============================================================================
// BOUNDING BOX
// ============================================================================

/// Collision box for a player standing at `position`
///
/// The box is not centered on the position: it is shifted down by
/// `box_vertical_offset` so its bottom sits near the feet.
pub fn player_box_at(position: Point3<f32>, config: &PhysicsConfig) -> AABB {
    let half = Vector3::new(
        config.box_size[0] * 0.5,
        config.box_size[1] * 0.5,
        config.box_size[2] * 0.5,
    );
    let center = Point3::new(
        position.x,
        position.y - config.box_vertical_offset,
        position.z,
    );
    aabb_from_center_half_extents(center, half)
}

pub fn player_box(player: &PlayerData, config: &PhysicsConfig) -> AABB {
    player_box_at(player.position, config)
}

// ============================================================================
// MOVEMENT
// ============================================================================

fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let len2 = v.magnitude2();
    if len2 > f32::EPSILON && len2.is_finite() {
        v / len2.sqrt()
    } else {
        Vector3::zero()
    }
}

/// Horizontal forward and right vectors for a view direction
///
/// Looking straight up or down leaves no horizontal forward; both vectors
/// are then zero.
pub fn movement_basis(view_direction: Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
    let up = Vector3::unit_y();
    let forward = normalize_or_zero(Vector3::new(view_direction.x, 0.0, view_direction.z));
    let right = normalize_or_zero(view_direction.cross(up));
    (forward, right)
}

/// Displacement requested by held keys over `dt`
///
/// The combined direction is normalized, so diagonal movement is no faster
/// than straight movement. Up/down only count while flying.
pub fn movement_delta(
    movement: &MovementInput,
    view_direction: Vector3<f32>,
    flying: bool,
    config: &PhysicsConfig,
    dt: f32,
) -> Vector3<f32> {
    let (forward, right) = movement_basis(view_direction);
    let mut direction = Vector3::zero();

    if movement.forward {
        direction += forward;
    }
    if movement.backward {
        direction -= forward;
    }
    if movement.right {
        direction += right;
    }
    if movement.left {
        direction -= right;
    }
    if flying {
        if movement.up {
            direction += Vector3::unit_y();
        }
        if movement.down {
            direction -= Vector3::unit_y();
        }
    }

    normalize_or_zero(direction) * (config.move_speed * dt)
}

/// Propose `position + delta`; commit only if the box there is free
pub fn try_move(
    player: &mut PlayerData,
    world: &WorldData,
    delta: Vector3<f32>,
    config: &PhysicsConfig,
) -> bool {
    let proposed = player.position + delta;
    if can_occupy(world, &player_box_at(proposed, config)) {
        player.position = proposed;
        true
    } else {
        false
    }
}

// ============================================================================
// VERTICAL
// ============================================================================

/// Start a jump if standing on something
pub fn try_jump(player: &mut PlayerData, config: &PhysicsConfig) -> bool {
    if !player.on_ground || player.flying {
        return false;
    }
    player.vertical_velocity = config.jump_impulse;
    player.on_ground = false;
    true
}

/// Switch free-fly mode. Entering it drops any vertical velocity.
pub fn set_flying(player: &mut PlayerData, flying: bool) {
    player.flying = flying;
    if flying {
        player.vertical_velocity = 0.0;
        player.on_ground = false;
    }
    log::debug!("[Physics] Free-fly {}", if flying { "on" } else { "off" });
}

/// Integrate gravity for one tick
///
/// A blocked move in either direction zeroes the velocity and counts as
/// ground contact, so bumping a ceiling also reads as grounded.
///
/// # Returns
/// `true` if the vertical move was blocked
pub fn apply_gravity(
    player: &mut PlayerData,
    world: &WorldData,
    config: &PhysicsConfig,
    dt: f32,
) -> bool {
    player.vertical_velocity -= config.gravity * dt;
    let delta = Vector3::new(0.0, player.vertical_velocity * dt, 0.0);

    if try_move(player, world, delta, config) {
        player.on_ground = false;
        false
    } else {
        player.vertical_velocity = 0.0;
        player.on_ground = true;
        true
    }
}

// ============================================================================
// STEP
// ============================================================================

/// Advance the player by one tick
pub fn step_player(
    player: &mut PlayerData,
    world: &WorldData,
    input: &InputState,
    config: &PhysicsConfig,
    dt: f32,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    if !(dt > 0.0) || !dt.is_finite() {
        log::warn!("[Physics] Ignoring step with dt = {}", dt);
        return outcome;
    }

    if input.movement.toggle_fly {
        set_flying(player, !player.flying);
    }

    if input.movement.jump {
        outcome.jumped = try_jump(player, config);
    }

    let delta = movement_delta(
        &input.movement,
        input.view_direction,
        player.flying,
        config,
        dt,
    );
    if !delta.is_zero() {
        if try_move(player, world, delta, config) {
            outcome.moved = true;
        } else {
            outcome.movement_blocked = true;
        }
    }

    if !player.flying {
        outcome.vertical_blocked = apply_gravity(player, world, config, dt);
    }

    log::trace!(
        "[Physics] pos={:?} vy={} on_ground={}",
        player.position,
        player.vertical_velocity,
        player.on_ground
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::core::VoxelPos;
    use crate::world::world_operations::insert_voxel;

    const DT: f32 = 1.0 / 60.0;

    fn flat_world(radius: i32) -> WorldData {
        let mut world = WorldData::new(16).unwrap();
        for x in -radius..=radius {
            for z in -radius..=radius {
                insert_voxel(&mut world, VoxelPos::new(x, 0, z));
            }
        }
        world
    }

    fn walking(view_direction: Vector3<f32>) -> InputState {
        let mut input = InputState::looking(view_direction);
        input.movement.forward = true;
        input
    }

    #[test]
    fn test_box_is_offset_below_position() {
        let config = PhysicsConfig::default();
        let aabb = player_box_at(Point3::new(0.0, 10.0, 0.0), &config);
        assert!((aabb.min.y - 8.6).abs() < 1e-5);
        assert!((aabb.max.y - 10.4).abs() < 1e-5);
        assert!((aabb.max.x - aabb.min.x - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_falls_onto_plane_without_penetrating() {
        let world = flat_world(3);
        let config = PhysicsConfig::default();
        let mut player = init_player(Point3::new(0.0, 6.0, 0.0));
        let input = InputState::idle();

        let mut landed = false;
        for _ in 0..600 {
            step_player(&mut player, &world, &input, &config, DT);
            // Plane top surface is y = 0.5
            assert!(player_box(&player, &config).min.y > 0.5);
            if player.on_ground {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert_eq!(player.vertical_velocity, 0.0);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let config = PhysicsConfig::default();
        let mut player = init_player(Point3::new(0.0, 5.0, 0.0));

        player.on_ground = false;
        player.vertical_velocity = -2.0;
        assert!(!try_jump(&mut player, &config));
        assert_eq!(player.vertical_velocity, -2.0);

        player.on_ground = true;
        player.vertical_velocity = 0.0;
        assert!(try_jump(&mut player, &config));
        assert_eq!(player.vertical_velocity, config.jump_impulse);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_jump_leaves_ground() {
        let world = flat_world(3);
        let config = PhysicsConfig::default();
        let mut player = init_player(Point3::new(0.0, spawn_height_above(0, &config), 0.0));

        let idle = InputState::idle();
        for _ in 0..60 {
            step_player(&mut player, &world, &idle, &config, DT);
            if player.on_ground {
                break;
            }
        }
        assert!(player.on_ground);
        let rest_y = player.position.y;

        let mut jump = InputState::idle();
        jump.movement.jump = true;
        let outcome = step_player(&mut player, &world, &jump, &config, DT);
        assert!(outcome.jumped);
        assert!(player.position.y > rest_y);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_ceiling_bump_counts_as_ground_contact() {
        let mut world = flat_world(3);
        // Leaves a 0.15 gap above the resting box
        insert_voxel(&mut world, VoxelPos::new(0, 3, 0));
        let config = PhysicsConfig::default();
        let mut player = init_player(Point3::new(0.0, spawn_height_above(0, &config), 0.0));

        let idle = InputState::idle();
        for _ in 0..60 {
            step_player(&mut player, &world, &idle, &config, DT);
            if player.on_ground {
                break;
            }
        }
        assert!(player.on_ground);
        let rest_y = player.position.y;

        let mut jump = InputState::idle();
        jump.movement.jump = true;
        let mut outcome = step_player(&mut player, &world, &jump, &config, DT);
        assert!(outcome.jumped);

        for _ in 0..10 {
            assert!(player_box(&player, &config).max.y < 2.5);
            if outcome.vertical_blocked {
                break;
            }
            outcome = step_player(&mut player, &world, &idle, &config, DT);
        }

        assert!(outcome.vertical_blocked);
        assert!(player.position.y > rest_y);
        assert_eq!(player.vertical_velocity, 0.0);
        assert!(player.on_ground);
    }

    #[test]
    fn test_walks_forward_on_open_ground() {
        let world = flat_world(5);
        let config = PhysicsConfig::default();
        let mut player = init_player(Point3::new(0.0, spawn_height_above(0, &config), 0.0));
        let input = walking(Vector3::new(0.0, 0.0, -1.0));

        let outcome = step_player(&mut player, &world, &input, &config, DT);
        assert!(outcome.moved);
        assert!((player.position.z + config.move_speed * DT).abs() < 1e-5);
        assert!(player.position.x.abs() < 1e-6);
    }

    #[test]
    fn test_wall_blocks_whole_step() {
        let mut world = flat_world(5);
        // Wall directly in front along -Z
        for y in 1..=3 {
            for x in -2..=2 {
                insert_voxel(&mut world, VoxelPos::new(x, y, -1));
            }
        }
        let config = PhysicsConfig::default();
        // Box front face at z = -0.45, 0.05 short of the wall's face at -0.5
        let start = Point3::new(0.0, spawn_height_above(0, &config), -0.2);
        let mut player = init_player(start);

        // Diagonal push into the wall does not slide sideways
        let mut input = walking(Vector3::new(0.0, 0.0, -1.0));
        input.movement.right = true;
        let outcome = step_player(&mut player, &world, &input, &config, 0.1);

        assert!(outcome.movement_blocked);
        assert_eq!(player.position.x, start.x);
        assert_eq!(player.position.z, start.z);
    }

    #[test]
    fn test_free_fly_ignores_gravity() {
        let world = WorldData::new(16).unwrap();
        let config = PhysicsConfig::default();
        let mut player = init_player(Point3::new(0.0, 10.0, 0.0));

        let mut input = InputState::idle();
        input.movement.toggle_fly = true;
        step_player(&mut player, &world, &input, &config, DT);
        assert!(player.flying);
        assert_eq!(player.position.y, 10.0);

        let mut rise = InputState::idle();
        rise.movement.up = true;
        step_player(&mut player, &world, &rise, &config, DT);
        assert!((player.position.y - (10.0 + config.move_speed * DT)).abs() < 1e-5);
        assert_eq!(player.vertical_velocity, 0.0);
    }

    #[test]
    fn test_free_fly_descent_is_collision_gated() {
        let world = flat_world(2);
        let config = PhysicsConfig::default();
        let start = Point3::new(0.0, spawn_height_above(0, &config), 0.0);
        let mut player = init_player(start);
        set_flying(&mut player, true);

        let mut sink = InputState::idle();
        sink.movement.down = true;
        let outcome = step_player(&mut player, &world, &sink, &config, 0.1);
        assert!(outcome.movement_blocked);
        assert_eq!(player.position, start);
    }

    #[test]
    fn test_up_down_ignored_when_walking() {
        let config = PhysicsConfig::default();
        let mut movement = MovementInput::default();
        movement.up = true;
        let delta = movement_delta(&movement, Vector3::new(0.0, 0.0, -1.0), false, &config, DT);
        assert!(delta.is_zero());
    }

    #[test]
    fn test_basis_when_looking_straight_up() {
        let (forward, right) = movement_basis(Vector3::new(0.0, 1.0, 0.0));
        assert!(forward.is_zero());
        assert!(right.is_zero());
    }

    #[test]
    fn test_rejects_bad_dt() {
        let world = WorldData::new(16).unwrap();
        let config = PhysicsConfig::default();
        let mut player = init_player(Point3::new(0.0, 0.0, 0.0));
        let before = player;
        step_player(&mut player, &world, &InputState::idle(), &config, -1.0);
        step_player(&mut player, &world, &InputState::idle(), &config, f32::NAN);
        assert_eq!(player, before);
    }
}
