//! Walk across generated terrain, dig a hole and place a block
//!
//! Run with `RUST_LOG=info cargo run --example walk_and_dig [config.toml]`

use anyhow::Result;
use cgmath::Vector3;
use cubeworld::world::generation::ColumnArea;
use cubeworld::world::world_operations::log_world_stats;
use cubeworld::{EngineConfig, GameState, InputState, PerlinHeightGenerator, RecordingRenderer};

const FRAME_TIME: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let generator = PerlinHeightGenerator::new(&config.generation);
    let area = ColumnArea::square(0, config.world_extent);
    let mut renderer = RecordingRenderer::new();
    let mut game = GameState::generate(config, &mut renderer, &generator, &area)?;

    // Settle onto the ground
    for _ in 0..120 {
        game.tick(&mut renderer, &InputState::idle(), FRAME_TIME)?;
    }

    // Walk forward for two seconds
    let mut walking = InputState::looking(Vector3::new(1.0, -0.3, 0.0));
    walking.movement.forward = true;
    for _ in 0..120 {
        game.tick(&mut renderer, &walking, FRAME_TIME)?;
    }
    log::info!("Walked to {:?}", game.player.position);

    // Dig the block below, then put one back in front
    let mut dig = InputState::looking(Vector3::new(0.0, -1.0, 0.0));
    dig.break_block = true;
    let report = game.tick(&mut renderer, &dig, FRAME_TIME)?;
    log::info!("Broke {:?}", report.broken);

    let mut place = InputState::looking(Vector3::new(1.0, -0.5, 0.0));
    place.place_block = true;
    let report = game.tick(&mut renderer, &place, FRAME_TIME)?;
    log::info!("Placed {:?}", report.placed);

    game.draw(&mut renderer, &());
    log::info!("Renderer: {:?}", renderer.counters);
    log_world_stats(&game.world);
    game.shutdown(&mut renderer);
    Ok(())
}
