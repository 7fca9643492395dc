use crate::{
    blend::{append_blend_stages, mode::BlendMode},
    codec::buffer::{ReadBuffer, WriteBuffer},
    foundation::error::ComposeResult,
    pipeline::raster::Stage,
    shader::{Shader, ShaderTag, SharedShader, StageRec, append_two_shaders, make_blend},
};

#[cfg(feature = "gpu")]
use crate::{
    gpu::fp::{FpArgs, FragmentProcessor},
    shader::compose::fragment_processor_or_paint,
};

/// Blends the output of `src` onto the output of `dst`.
///
/// Built only by [`make_blend`], so `mode` is never `Clear`, `Dst`, or `Src`.
#[derive(Debug)]
pub struct BlendShader {
    mode: BlendMode,
    dst: Option<SharedShader>,
    src: Option<SharedShader>,
}

impl BlendShader {
    pub(crate) fn new(
        mode: BlendMode,
        dst: Option<SharedShader>,
        src: Option<SharedShader>,
    ) -> Self {
        debug_assert!(!matches!(mode, BlendMode::Clear | BlendMode::Dst | BlendMode::Src));
        Self { mode, dst, src }
    }

    /// Blend mode.
    pub fn mode(&self) -> BlendMode {
        self.mode
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

impl Shader for BlendShader {
    fn tag(&self) -> ShaderTag {
        ShaderTag::BLEND
    }

    fn append_stages(&self, rec: &mut StageRec<'_>) -> ComposeResult<()> {
        let saved_dst = append_two_shaders(rec, self.dst.as_deref(), self.src.as_deref())?;

        rec.pipeline.append(Stage::LoadDst(saved_dst));
        append_blend_stages(self.mode, rec.pipeline);
        Ok(())
    }

    fn flatten(&self, buffer: &mut WriteBuffer) {
        buffer.write_flattenable(self.dst.as_deref());
        buffer.write_flattenable(self.src.as_deref());
        buffer.write_u32(self.mode.id());
    }

    #[cfg(feature = "gpu")]
    fn as_fragment_processor(&self, args: &FpArgs) -> Option<FragmentProcessor> {
        let fp_dst = fragment_processor_or_paint(self.dst.as_deref(), args)?;
        let fp_src = fragment_processor_or_paint(self.src.as_deref(), args)?;
        // The backend reads the source from its first input and the destination from its second.
        Some(FragmentProcessor::make_from_two_processors(fp_src, fp_dst, self.mode))
    }

    fn is_opaque(&self) -> bool {
        let dst = self.dst.as_ref().is_some_and(|s| s.is_opaque());
        let src = self.src.as_ref().is_some_and(|s| s.is_opaque());
        match self.mode {
            // Alpha reaches 1 whenever either input is opaque.
            BlendMode::SrcOver
            | BlendMode::DstOver
            | BlendMode::Plus
            | BlendMode::Screen
            | BlendMode::Multiply
            | BlendMode::Overlay
            | BlendMode::Darken
            | BlendMode::Lighten
            | BlendMode::ColorDodge
            | BlendMode::ColorBurn
            | BlendMode::HardLight
            | BlendMode::SoftLight
            | BlendMode::Difference
            | BlendMode::Exclusion
            | BlendMode::Hue
            | BlendMode::Saturation
            | BlendMode::Color
            | BlendMode::Luminosity => dst || src,
            BlendMode::SrcIn | BlendMode::DstIn | BlendMode::Modulate => dst && src,
            BlendMode::SrcATop => dst,
            BlendMode::DstATop => src,
            _ => false,
        }
    }
}

pub(crate) fn decode(buffer: &mut ReadBuffer<'_>) -> Option<SharedShader> {
    let dst = buffer.read_shader();
    let src = buffer.read_shader();
    let id = buffer.read_u32();

    // Validate before converting; an out-of-range id is a malformed stream, not a mode.
    let mode = BlendMode::from_u32(id);
    if !buffer.validate(mode.is_some()) {
        tracing::debug!(id, "rejected blend record");
        return None;
    }
    make_blend(mode?, dst, src)
}

#[cfg(test)]
#[path = "../../tests/unit/shader/blend.rs"]
mod tests;
