use crate::{
    foundation::color::Color4f,
    pipeline::{arena::ScratchArena, raster::RasterPipeline},
};

/// Ambient paint state consulted while building a pipeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Paint {
    /// Paint color (straight alpha); stands in for absent shaders.
    pub color: Color4f,
}

impl Default for Paint {
    fn default() -> Self {
        Self {
            color: Color4f::BLACK,
        }
    }
}

impl Paint {
    /// Paint with the given color.
    pub fn with_color(color: Color4f) -> Self {
        Self { color }
    }
}

/// One pipeline build: the pipeline being assembled, its scratch arena, and the paint.
///
/// The arena is exclusive to this build; scratch slots handed out here are only meaningful when
/// the pipeline later runs against the same arena.
pub struct StageRec<'a> {
    /// Pipeline under construction.
    pub pipeline: &'a mut RasterPipeline,
    /// Scratch memory scoped to this build.
    pub alloc: &'a mut ScratchArena,
    /// Ambient paint.
    pub paint: &'a Paint,
}

impl<'a> StageRec<'a> {
    /// Bundle the parts of one build.
    pub fn new(
        pipeline: &'a mut RasterPipeline,
        alloc: &'a mut ScratchArena,
        paint: &'a Paint,
    ) -> Self {
        Self {
            pipeline,
            alloc,
            paint,
        }
    }
}
