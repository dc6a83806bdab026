//! Renderer Module - collaborator contract
//!
//! The world core never draws. It hands every present voxel of a chunk to a
//! `BatchRenderer` whenever that chunk changes and keeps the opaque batch
//! the renderer gives back.

pub mod batch_renderer;
pub mod recording_renderer;

pub use batch_renderer::BatchRenderer;
pub use recording_renderer::{RecordedBatch, RecordingRenderer, RendererCounters};
