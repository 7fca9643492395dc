use std::sync::Arc;

use crate::{
    codec::buffer::{ReadBuffer, WriteBuffer},
    foundation::color::Color4f,
    foundation::error::ComposeResult,
    shader::{Shader, ShaderTag, SharedShader, StageRec},
};

#[cfg(feature = "gpu")]
use crate::gpu::fp::{FpArgs, FragmentProcessor};

/// Constant-color shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorShader {
    color: Color4f,
}

impl ColorShader {
    pub(crate) fn transparent() -> Self {
        Self {
            color: Color4f::TRANSPARENT,
        }
    }

    /// Straight-alpha color this shader produces.
    pub fn color(&self) -> Color4f {
        self.color
    }
}

/// Build a constant-color shader; `None` if any channel is not finite.
pub fn make_color_shader(color: Color4f) -> Option<SharedShader> {
    if !color.is_finite() {
        return None;
    }
    Some(Arc::new(ColorShader { color }))
}

impl Shader for ColorShader {
    fn tag(&self) -> ShaderTag {
        ShaderTag::COLOR
    }

    fn append_stages(&self, rec: &mut StageRec<'_>) -> ComposeResult<()> {
        rec.pipeline.append_constant_color(self.color.premul());
        Ok(())
    }

    fn flatten(&self, buffer: &mut WriteBuffer) {
        buffer.write_color4f(self.color);
    }

    #[cfg(feature = "gpu")]
    fn as_fragment_processor(&self, _args: &FpArgs) -> Option<FragmentProcessor> {
        Some(FragmentProcessor::ConstColor(self.color.premul()))
    }

    fn is_opaque(&self) -> bool {
        self.color.is_opaque()
    }
}

pub(crate) fn decode(buffer: &mut ReadBuffer<'_>) -> Option<SharedShader> {
    let color = buffer.read_color4f();
    if !buffer.validate(color.is_finite()) {
        return None;
    }
    make_color_shader(color)
}

#[cfg(test)]
#[path = "../../tests/unit/shader/color.rs"]
mod tests;
