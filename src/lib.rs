//! Shader combinators for Wavyte's raster pipeline.
//!
//! Two combinators derive a new shader from a pair of children:
//!
//! - [`make_blend`] applies a [`BlendMode`] to a destination and a source shader
//! - [`make_lerp`] mixes a destination toward a source by a scalar weight
//!
//! Both fold degenerate inputs at construction time, append their stages to a lane-batched
//! [`RasterPipeline`], flatten to a tagged binary stream ([`encode_shader`] / [`decode_shader`]),
//! and with the `gpu` feature lower to a [`FragmentProcessor`] graph.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Blend modes and the stages that realize them.
pub mod blend;
/// Binary shader codec.
pub mod codec;
/// Colors and errors shared by every module.
pub mod foundation;
/// GPU lowering targets.
#[cfg(feature = "gpu")]
pub mod gpu;
/// Raster pipeline and scratch memory.
pub mod pipeline;
/// Frame rendering.
pub mod render;
/// JSON shader descriptions.
pub mod scene;
/// Shader trait, combinators, and factories.
pub mod shader;

pub use crate::blend::BlendMode;
pub use crate::codec::{
    DecodeOpts, ReadBuffer, ShaderRegistry, WriteBuffer, decode_shader, decode_shader_with,
    encode_shader,
};
pub use crate::foundation::color::{Color4f, PremulColor};
pub use crate::foundation::error::{ComposeError, ComposeResult};
pub use crate::pipeline::arena::{ScratchArena, ScratchSlot};
pub use crate::pipeline::raster::{MAX_STRIDE, RasterPipeline, Stage};
pub use crate::render::{FrameRGBA, RenderOpts, eval_span, render_rgba8};
pub use crate::scene::{ColorDesc, ShaderDesc};
pub use crate::shader::{
    BlendShader, ColorShader, LerpShader, Paint, Shader, ShaderTag, SharedShader, StageRec,
    append_two_shaders, make_blend, make_color_shader, make_lerp,
};

#[cfg(feature = "gpu")]
pub use crate::gpu::{FpArgs, FragmentProcessor};
