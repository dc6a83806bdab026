//! Headless renderer
//!
//! Records batch contents instead of uploading geometry. Used by the demo
//! and by tests that need to observe what the chunk cache hands out.

use super::BatchRenderer;
use crate::world::core::{ChunkPos, VoxelPos};

/// Batch produced by `RecordingRenderer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedBatch {
    pub chunk: ChunkPos,
    pub voxels: Vec<VoxelPos>,
    pub finished: bool,
}

/// Running totals of renderer calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RendererCounters {
    pub batches_built: usize,
    pub batches_disposed: usize,
    pub renderables_added: usize,
    pub draw_calls: usize,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub counters: RendererCounters,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches still alive (built but not yet disposed)
    pub fn live_batches(&self) -> usize {
        self.counters.batches_built - self.counters.batches_disposed
    }
}

impl BatchRenderer for RecordingRenderer {
    type Batch = RecordedBatch;
    type DrawContext = ();

    fn begin_batch(&mut self, chunk: ChunkPos) -> RecordedBatch {
        RecordedBatch {
            chunk,
            voxels: Vec::new(),
            finished: false,
        }
    }

    fn add_renderable(&mut self, batch: &mut RecordedBatch, voxel: VoxelPos) {
        batch.voxels.push(voxel);
        self.counters.renderables_added += 1;
    }

    fn end_batch(&mut self, batch: &mut RecordedBatch) {
        // Sorted so tests can compare batches without caring about hash order
        batch.voxels.sort_unstable();
        batch.finished = true;
        self.counters.batches_built += 1;
    }

    fn draw_batch(&mut self, batch: &RecordedBatch, _context: &()) {
        log::trace!(
            "[Renderer] Drawing chunk {} ({} voxels)",
            batch.chunk,
            batch.voxels.len()
        );
        self.counters.draw_calls += 1;
    }

    fn dispose_batch(&mut self, _batch: RecordedBatch) {
        self.counters.batches_disposed += 1;
    }
}
