//! Batch renderer contract used by the chunk cache

use crate::world::core::{ChunkPos, VoxelPos};

/// Rendering collaborator for chunk batches
///
/// A batch is built with `begin_batch`, one `add_renderable` per voxel and
/// a closing `end_batch`. The chunk cache owns the returned batch until it
/// is replaced, at which point the old one goes back through
/// `dispose_batch`.
pub trait BatchRenderer {
    /// Renderer-owned aggregate of drawable geometry for one chunk
    type Batch;

    /// Whatever the renderer needs at draw time (camera, lighting)
    type DrawContext;

    fn begin_batch(&mut self, chunk: ChunkPos) -> Self::Batch;

    fn add_renderable(&mut self, batch: &mut Self::Batch, voxel: VoxelPos);

    fn end_batch(&mut self, batch: &mut Self::Batch);

    fn draw_batch(&mut self, batch: &Self::Batch, context: &Self::DrawContext);

    fn dispose_batch(&mut self, batch: Self::Batch);
}
