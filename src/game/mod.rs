//! Game Module - per-frame orchestration
//!
//! Ties the pieces together in frame order: input intent drives the
//! physics step, the view ray picks a target, a click mutates the store,
//! and dirty chunks are rebuilt before anything is drawn.

use crate::error::EngineResult;
use crate::input::InputState;
use crate::physics::{self, PhysicsConfig, PlayerData, StepOutcome};
use crate::renderer::BatchRenderer;
use crate::world::core::{ChunkPos, Ray, RaycastHit, VoxelPos};
use crate::world::data_types::WorldData;
use crate::world::error::WorldResult;
use crate::world::generation::{find_spawn_position, populate_world, ColumnArea, HeightGenerator};
use crate::world::storage::ChunkCache;
use crate::world::world_operations;
use crate::EngineConfig;
use cgmath::{Point3, Vector3};

/// What one call to `GameState::tick` did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    pub step: StepOutcome,
    pub target: Option<RaycastHit>,
    pub broken: Option<VoxelPos>,
    pub placed: Option<VoxelPos>,
    pub rebuilt_chunks: usize,
}

/// Everything the simulation thread owns
pub struct GameState<R: BatchRenderer> {
    pub config: EngineConfig,
    pub world: WorldData,
    pub cache: ChunkCache<R>,
    pub player: PlayerData,
    /// Voxel under the crosshair after the last tick
    pub selected_block: Option<RaycastHit>,
    pub frame: u64,
}

impl<R: BatchRenderer> GameState<R> {
    /// Empty world with the player at `spawn`
    pub fn new(config: EngineConfig, spawn: Point3<f32>) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            world: WorldData::new(config.chunk_size)?,
            cache: ChunkCache::new(),
            player: physics::init_player(spawn),
            selected_block: None,
            frame: 0,
            config,
        })
    }

    /// Populate `area` from `generator` and spawn the player above the
    /// middle of it
    pub fn generate<G>(
        config: EngineConfig,
        renderer: &mut R,
        generator: &G,
        area: &ColumnArea,
    ) -> EngineResult<Self>
    where
        G: HeightGenerator + ?Sized,
    {
        let center_x = area.x.start + (area.x.end - area.x.start) / 2;
        let center_z = area.z.start + (area.z.end - area.z.start) / 2;
        let spawn = find_spawn_position(generator, center_x, center_z, &config.physics);

        let mut state = Self::new(config, spawn)?;
        populate_world(&mut state.world, &mut state.cache, renderer, generator, area)?;
        log::info!("[Game] Spawned player at {:?}", spawn);
        Ok(state)
    }

    /// Run one frame
    ///
    /// A bad view direction is rejected before any state changes.
    pub fn tick(&mut self, renderer: &mut R, input: &InputState, dt: f32) -> EngineResult<FrameReport> {
        let view = Ray::new(self.player.position, input.view_direction)?;

        self.frame += 1;
        let mut report = FrameReport {
            step: physics::step_player(&mut self.player, &self.world, input, &self.config.physics, dt),
            ..FrameReport::default()
        };

        // Cast from where the step left the eye
        let ray = Ray {
            origin: self.player.position,
            ..view
        };
        self.selected_block = world_operations::raycast(
            &self.world,
            &ray,
            self.config.reach_distance,
            self.config.ray_step,
        );
        report.target = self.selected_block;

        if let Some(hit) = self.selected_block {
            if input.break_block {
                if break_block(&mut self.world, &mut self.cache, renderer, hit.position)? {
                    report.broken = Some(hit.position);
                    self.selected_block = None;
                }
            } else if input.place_block {
                let target = hit.placement_cell();
                if place_block(&mut self.world, &self.player, &self.config.physics, target) {
                    report.placed = Some(target);
                }
            }
        }

        // The cache must reflect every completed mutation before drawing
        report.rebuilt_chunks = self.cache.rebuild_dirty_chunks(&mut self.world, renderer);
        Ok(report)
    }

    /// Draw every chunk batch
    pub fn draw(&self, renderer: &mut R, context: &R::DrawContext) {
        self.cache.draw_all(renderer, context);
    }

    /// Release all renderer batches
    pub fn shutdown(&mut self, renderer: &mut R) {
        self.cache.dispose_all(renderer);
        world_operations::log_world_stats(&self.world);
    }
}

/// Ray from the player's eye along the view direction
pub fn cast_view_ray(
    world: &WorldData,
    player: &PlayerData,
    view_direction: Vector3<f32>,
    max_distance: f32,
    step: f32,
) -> EngineResult<Option<RaycastHit>> {
    let ray = Ray::new(player.position, view_direction)?;
    Ok(world_operations::raycast(world, &ray, max_distance, step))
}

/// Remove a voxel and immediately rebuild its chunk's batch
///
/// # Returns
/// `true` if a voxel was removed
pub fn break_block<R: BatchRenderer>(
    world: &mut WorldData,
    cache: &mut ChunkCache<R>,
    renderer: &mut R,
    pos: VoxelPos,
) -> WorldResult<bool> {
    if !world_operations::remove_voxel(world, pos) {
        return Ok(false);
    }

    let chunk_pos: ChunkPos = world_operations::voxel_to_chunk(pos, world.chunk_size);
    cache.rebuild_batch(world, renderer, chunk_pos)?;
    log::debug!("[Game] Broke block at {}", pos);
    Ok(true)
}

/// Insert a voxel unless the cell is taken or the voxel would overlap the
/// player. The chunk is left dirty for the end-of-frame rebuild.
///
/// # Returns
/// `true` if a voxel was placed
pub fn place_block(
    world: &mut WorldData,
    player: &PlayerData,
    config: &PhysicsConfig,
    pos: VoxelPos,
) -> bool {
    if world_operations::has_voxel(world, pos) {
        return false;
    }

    let voxel = physics::aabb::voxel_aabb(pos);
    if physics::aabb::aabb_intersects(&voxel, &physics::player_box(player, config)) {
        log::debug!("[Game] Refusing to place block at {} inside the player", pos);
        return false;
    }

    world_operations::insert_voxel(world, pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::RecordingRenderer;
    use crate::world::generation::FlatHeightGenerator;
    use crate::world::world_operations::{dirty_chunks, has_voxel, insert_voxel};
    use crate::error::EngineError;

    fn flat_game(renderer: &mut RecordingRenderer) -> GameState<RecordingRenderer> {
        GameState::generate(
            EngineConfig::default(),
            renderer,
            &FlatHeightGenerator { height: 0 },
            &ColumnArea::square(-8, 16),
        )
        .expect("flat world should generate")
    }

    fn looking_down() -> InputState {
        InputState::looking(Vector3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_generate_spawns_above_ground() {
        let mut renderer = RecordingRenderer::new();
        let game = flat_game(&mut renderer);
        assert_eq!(game.player.position.x, 0.0);
        assert!(physics::can_occupy(
            &game.world,
            &physics::player_box(&game.player, &game.config.physics)
        ));
        assert_eq!(renderer.counters.batches_built, game.world.chunks.len());
    }

    #[test]
    fn test_tick_selects_block_below() {
        let mut renderer = RecordingRenderer::new();
        let mut game = flat_game(&mut renderer);

        let report = game.tick(&mut renderer, &looking_down(), 1.0 / 60.0).unwrap();
        let target = report.target.expect("ground should be targeted");
        assert_eq!(target.position, VoxelPos::new(0, 0, 0));
        assert_eq!(game.selected_block, Some(target));
    }

    #[test]
    fn test_break_removes_target_and_rebuilds_chunk() {
        let mut renderer = RecordingRenderer::new();
        let mut game = flat_game(&mut renderer);
        let built_before = renderer.counters.batches_built;

        let mut input = looking_down();
        input.break_block = true;
        let report = game.tick(&mut renderer, &input, 1.0 / 60.0).unwrap();

        assert_eq!(report.broken, Some(VoxelPos::new(0, 0, 0)));
        assert!(!has_voxel(&game.world, VoxelPos::new(0, 0, 0)));
        assert_eq!(renderer.counters.batches_built, built_before + 1);
        assert!(dirty_chunks(&game.world).is_empty());

        let batch = game.cache.batch(ChunkPos::new(0, 0, 0)).unwrap();
        assert!(!batch.voxels.contains(&VoxelPos::new(0, 0, 0)));
    }

    #[test]
    fn test_break_missing_block_is_noop() {
        let mut world = WorldData::new(16).unwrap();
        let mut cache = ChunkCache::new();
        let mut renderer = RecordingRenderer::new();
        assert!(!break_block(&mut world, &mut cache, &mut renderer, VoxelPos::new(0, 0, 0)).unwrap());
        assert_eq!(renderer.counters.batches_built, 0);
    }

    #[test]
    fn test_place_against_targeted_face() {
        let mut renderer = RecordingRenderer::new();
        let mut game = flat_game(&mut renderer);
        // Look down at a shallow angle so the target is away from the feet
        let mut input = InputState::looking(Vector3::new(1.0, -0.5, 0.0));
        input.place_block = true;

        let report = game.tick(&mut renderer, &input, 1.0 / 60.0).unwrap();
        let placed = report.placed.expect("block should be placed");
        assert!(has_voxel(&game.world, placed));
        assert_eq!(placed.y, 1);
        assert!(report.rebuilt_chunks >= 1);
    }

    #[test]
    fn test_place_refuses_player_cell() {
        let config = PhysicsConfig::default();
        let mut world = WorldData::new(16).unwrap();
        let player = physics::init_player(Point3::new(0.0, 2.0, 0.0));
        assert!(!place_block(&mut world, &player, &config, VoxelPos::new(0, 1, 0)));

        insert_voxel(&mut world, VoxelPos::new(5, 0, 0));
        assert!(!place_block(&mut world, &player, &config, VoxelPos::new(5, 0, 0)));
        assert!(place_block(&mut world, &player, &config, VoxelPos::new(5, 1, 0)));
    }

    #[test]
    fn test_zero_view_direction_is_rejected() {
        let mut renderer = RecordingRenderer::new();
        let mut game = flat_game(&mut renderer);
        let input = InputState::looking(Vector3::new(0.0, 0.0, 0.0));
        assert!(matches!(
            game.tick(&mut renderer, &input, 1.0 / 60.0),
            Err(EngineError::InvalidRay { .. })
        ));
    }

    #[test]
    fn test_rejected_tick_leaves_state_untouched() {
        let mut renderer = RecordingRenderer::new();
        let mut game: GameState<RecordingRenderer> =
            GameState::new(EngineConfig::default(), Point3::new(0.0, 10.0, 0.0)).unwrap();
        let before = game.player;

        let mut input = InputState::looking(Vector3::new(0.0, 0.0, 0.0));
        input.movement.forward = true;
        assert!(game.tick(&mut renderer, &input, 0.1).is_err());

        assert_eq!(game.player, before);
        assert_eq!(game.frame, 0);
        assert!(game.selected_block.is_none());
    }

    #[test]
    fn test_cast_view_ray_uses_player_eye() {
        let mut world = WorldData::new(16).unwrap();
        insert_voxel(&mut world, VoxelPos::new(0, 0, 0));
        let player = physics::init_player(Point3::new(0.0, 3.0, 0.0));

        let hit = cast_view_ray(&world, &player, Vector3::new(0.0, -1.0, 0.0), 8.0, 0.1)
            .unwrap()
            .expect("voxel below should be hit");
        assert_eq!(hit.position, VoxelPos::new(0, 0, 0));
        assert!(cast_view_ray(&world, &player, Vector3::new(0.0, -1.0, 0.0), 1.0, 0.1)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_shutdown_disposes_batches() {
        let mut renderer = RecordingRenderer::new();
        let mut game = flat_game(&mut renderer);
        game.draw(&mut renderer, &());
        assert_eq!(renderer.counters.draw_calls, game.world.chunks.len());
        game.shutdown(&mut renderer);
        assert_eq!(renderer.live_batches(), 0);
    }
}
