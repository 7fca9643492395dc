//! Blend modes and the stages that realize them.

pub(crate) mod math;
/// Blend mode enumeration.
pub mod mode;

use crate::pipeline::raster::{RasterPipeline, Stage};

pub use mode::BlendMode;

/// Append the stage(s) realizing `mode`.
///
/// Expects the destination in the secondary registers and the source in the current registers;
/// leaves the result in the current registers.
pub fn append_blend_stages(mode: BlendMode, pipeline: &mut RasterPipeline) {
    pipeline.append(Stage::Blend(mode));
}
