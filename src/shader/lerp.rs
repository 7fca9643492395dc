use crate::{
    codec::buffer::{ReadBuffer, WriteBuffer},
    foundation::error::ComposeResult,
    pipeline::raster::Stage,
    shader::{Shader, ShaderTag, SharedShader, StageRec, append_two_shaders, make_lerp},
};

#[cfg(feature = "gpu")]
use crate::{
    gpu::fp::{FpArgs, FragmentProcessor},
    shader::compose::fragment_processor_or_paint,
};

/// Mixes `dst` toward `src` by a fixed weight.
///
/// Built only by [`make_lerp`]: `weight` is finite and strictly inside `(0, 1)`, and the two
/// children are distinct.
#[derive(Debug)]
pub struct LerpShader {
    weight: f32,
    dst: Option<SharedShader>,
    src: Option<SharedShader>,
}

impl LerpShader {
    pub(crate) fn new(weight: f32, dst: Option<SharedShader>, src: Option<SharedShader>) -> Self {
        debug_assert!(weight > 0.0 && weight < 1.0);
        Self { weight, dst, src }
    }

    /// Interpolation weight; `0` would be all `dst`, `1` all `src`.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Destination child; `None` means the paint color.
    pub fn dst(&self) -> Option<&SharedShader> {
        self.dst.as_ref()
    }

    /// Source child; `None` means the paint color.
    pub fn src(&self) -> Option<&SharedShader> {
        self.src.as_ref()
    }
}

impl Shader for LerpShader {
    fn tag(&self) -> ShaderTag {
        ShaderTag::LERP
    }

    fn append_stages(&self, rec: &mut StageRec<'_>) -> ComposeResult<()> {
        let saved_dst = append_two_shaders(rec, self.dst.as_deref(), self.src.as_deref())?;

        rec.pipeline.append(Stage::LoadDst(saved_dst));
        rec.pipeline.append(Stage::Lerp1Float(self.weight));
        Ok(())
    }

    fn flatten(&self, buffer: &mut WriteBuffer) {
        buffer.write_flattenable(self.dst.as_deref());
        buffer.write_flattenable(self.src.as_deref());
        buffer.write_scalar(self.weight);
    }

    #[cfg(feature = "gpu")]
    fn as_fragment_processor(&self, args: &FpArgs) -> Option<FragmentProcessor> {
        let _fp_dst = fragment_processor_or_paint(self.dst.as_deref(), args)?;
        let _fp_src = fragment_processor_or_paint(self.src.as_deref(), args)?;
        // TODO: needs a two-input interpolation node in the fragment-processor graph.
        tracing::debug!(weight = self.weight, "lerp has no GPU lowering");
        None
    }

    fn is_opaque(&self) -> bool {
        let opaque = |s: Option<&SharedShader>| s.is_some_and(|s| s.is_opaque());
        opaque(self.dst.as_ref()) && opaque(self.src.as_ref())
    }
}

pub(crate) fn decode(buffer: &mut ReadBuffer<'_>) -> Option<SharedShader> {
    let dst = buffer.read_shader();
    let src = buffer.read_shader();
    let weight = buffer.read_scalar();
    if !buffer.is_valid() {
        return None;
    }
    make_lerp(weight, dst, src)
}

#[cfg(test)]
#[path = "../../tests/unit/shader/lerp.rs"]
mod tests;
