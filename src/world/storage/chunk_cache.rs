//! Chunk Cache
//!
//! Holds the renderer batch for every chunk and rebuilds it from the
//! chunk's voxel set whenever the chunk is dirty. A rebuild always reflects
//! the full current contents of the chunk; there are no partial updates.

use crate::renderer::BatchRenderer;
use crate::world::core::ChunkPos;
use crate::world::data_types::WorldData;
use crate::world::error::{WorldError, WorldResult};
use crate::world::world_operations;
use rustc_hash::FxHashMap;

pub struct ChunkCache<R: BatchRenderer> {
    batches: FxHashMap<ChunkPos, R::Batch>,
    rebuilds: u64,
}

impl<R: BatchRenderer> Default for ChunkCache<R> {
    fn default() -> Self {
        Self {
            batches: FxHashMap::default(),
            rebuilds: 0,
        }
    }
}

impl<R: BatchRenderer> ChunkCache<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current batch for a chunk, if one has been built
    pub fn batch(&self, chunk_pos: ChunkPos) -> Option<&R::Batch> {
        self.batches.get(&chunk_pos)
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Total number of batch rebuilds performed by this cache
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Rebuild one chunk's batch from its current voxels and clear its dirty
    /// flag. The previous batch, if any, is disposed.
    pub fn rebuild_batch(
        &mut self,
        world: &mut WorldData,
        renderer: &mut R,
        chunk_pos: ChunkPos,
    ) -> WorldResult<()> {
        let chunk = world
            .chunks
            .get_mut(&chunk_pos)
            .ok_or(WorldError::ChunkNotLoaded(chunk_pos))?;

        let mut batch = renderer.begin_batch(chunk_pos);
        for voxel in &chunk.voxels {
            renderer.add_renderable(&mut batch, *voxel);
        }
        renderer.end_batch(&mut batch);
        chunk.flags.is_dirty = false;

        if let Some(old) = self.batches.insert(chunk_pos, batch) {
            renderer.dispose_batch(old);
        }
        self.rebuilds += 1;

        log::debug!(
            "[ChunkCache] Rebuilt chunk {} ({} voxels)",
            chunk_pos,
            chunk.voxels.len()
        );
        Ok(())
    }

    /// Rebuild every dirty chunk once
    ///
    /// # Returns
    /// Number of chunks rebuilt
    pub fn rebuild_dirty_chunks(&mut self, world: &mut WorldData, renderer: &mut R) -> usize {
        let dirty = world_operations::dirty_chunks(world);
        let mut rebuilt = 0;

        for chunk_pos in dirty {
            match self.rebuild_batch(world, renderer, chunk_pos) {
                Ok(()) => rebuilt += 1,
                Err(e) => log::warn!("[ChunkCache] Skipping rebuild of {}: {}", chunk_pos, e),
            }
        }

        rebuilt
    }

    /// Submit every batch to the renderer
    pub fn draw_all(&self, renderer: &mut R, context: &R::DrawContext) {
        for batch in self.batches.values() {
            renderer.draw_batch(batch, context);
        }
    }

    /// Hand every batch back to the renderer and forget it
    pub fn dispose_all(&mut self, renderer: &mut R) {
        for (_, batch) in self.batches.drain() {
            renderer.dispose_batch(batch);
        }
    }
}
