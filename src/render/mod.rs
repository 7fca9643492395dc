//! Frame rendering: evaluate a shader tree over a grid of pixels.

/// Frame type, render options, and the row-parallel renderer.
pub mod frame;

pub use frame::{FrameRGBA, RenderOpts, eval_span, render_rgba8};
