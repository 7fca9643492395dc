//! Factories for the blend and lerp combinators, and the two-child append helper they share.
//!
//! The factories fold degenerate inputs before allocating anything, so a combinator only exists
//! when it actually adds a merge stage to the pipeline.

use std::sync::Arc;

use crate::{
    blend::mode::BlendMode,
    foundation::error::ComposeResult,
    pipeline::{
        arena::ScratchSlot,
        raster::{MAX_STRIDE, Stage},
    },
    shader::{BlendShader, ColorShader, LerpShader, Shader, SharedShader, StageRec, same_shader},
};

#[cfg(feature = "gpu")]
use crate::gpu::fp::{FpArgs, FragmentProcessor};

/// Compose `src` onto `dst` with `mode`.
///
/// - `Clear` yields a transparent-black color shader.
/// - `Dst` returns `dst` and `Src` returns `src` as-is.
/// - Every other mode allocates a [`BlendShader`].
///
/// Never fails; `None` is only returned when an absent input is passed through.
pub fn make_blend(
    mode: BlendMode,
    dst: Option<SharedShader>,
    src: Option<SharedShader>,
) -> Option<SharedShader> {
    match mode {
        BlendMode::Clear => {
            tracing::debug!("blend(Clear) folded to transparent color");
            Some(Arc::new(ColorShader::transparent()))
        }
        BlendMode::Dst => {
            tracing::debug!("blend(Dst) folded to destination");
            dst
        }
        BlendMode::Src => {
            tracing::debug!("blend(Src) folded to source");
            src
        }
        _ => Some(Arc::new(BlendShader::new(mode, dst, src))),
    }
}

/// Mix `dst` toward `src` by `weight`.
///
/// Returns `None` for a NaN weight. Identical inputs (same allocation, or both absent) return
/// `dst` for any weight; `weight <= 0` returns `dst` and `weight >= 1` returns `src`.
pub fn make_lerp(
    weight: f32,
    dst: Option<SharedShader>,
    src: Option<SharedShader>,
) -> Option<SharedShader> {
    if weight.is_nan() {
        tracing::debug!("lerp rejected: NaN weight");
        return None;
    }
    if same_shader(dst.as_ref(), src.as_ref()) {
        tracing::debug!(weight, "lerp folded: identical inputs");
        return dst;
    }
    if weight <= 0.0 {
        tracing::debug!(weight, "lerp folded to destination");
        return dst;
    }
    if weight >= 1.0 {
        tracing::debug!(weight, "lerp folded to source");
        return src;
    }
    Some(Arc::new(LerpShader::new(weight, dst, src)))
}

/// Append `shader`'s stages, or a constant of the paint's premultiplied color when absent.
pub fn append_shader_or_paint(
    rec: &mut StageRec<'_>,
    shader: Option<&dyn Shader>,
) -> ComposeResult<()> {
    match shader {
        Some(shader) => shader.append_stages(rec),
        None => {
            rec.pipeline.append_constant_color(rec.paint.color.premul());
            Ok(())
        }
    }
}

/// Append `first`, save its output to scratch, then append `second`.
///
/// On success the current registers hold `second`'s output and the returned slot holds
/// `first`'s. The slot lives as long as the build's arena. Failure of either child is returned
/// as-is, leaving the pipeline partially built.
pub fn append_two_shaders(
    rec: &mut StageRec<'_>,
    first: Option<&dyn Shader>,
    second: Option<&dyn Shader>,
) -> ComposeResult<ScratchSlot> {
    let saved = rec.alloc.allocate(4 * MAX_STRIDE);

    append_shader_or_paint(rec, first)?;
    rec.pipeline.append(Stage::StoreSrc(saved));

    append_shader_or_paint(rec, second)?;
    Ok(saved)
}

#[cfg(feature = "gpu")]
pub(crate) fn fragment_processor_or_paint(
    shader: Option<&dyn Shader>,
    args: &FpArgs,
) -> Option<FragmentProcessor> {
    match shader {
        Some(shader) => shader.as_fragment_processor(args),
        None => Some(FragmentProcessor::ConstColor(args.paint_color.premul())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shader/compose.rs"]
mod tests;
