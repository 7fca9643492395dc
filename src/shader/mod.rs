//! Shaders: per-pixel color procedures that append stages to a raster pipeline.
//!
//! Every shader implements [`Shader`]. Shaders are immutable once built and shared through
//! [`SharedShader`] (`Arc<dyn Shader>`), so one shader tree can feed many concurrent pipeline
//! builds. An absent shader (`None`) stands for the ambient paint color.

pub(crate) mod blend;
pub(crate) mod color;
pub(crate) mod compose;
/// Execution context handed to [`Shader::append_stages`].
pub mod context;
pub(crate) mod lerp;

use std::sync::Arc;

use crate::{codec::buffer::WriteBuffer, foundation::error::ComposeResult};

#[cfg(feature = "gpu")]
use crate::gpu::fp::{FpArgs, FragmentProcessor};

pub use blend::BlendShader;
pub use color::{ColorShader, make_color_shader};
pub use compose::{append_shader_or_paint, append_two_shaders, make_blend, make_lerp};
pub use context::{Paint, StageRec};
pub use lerp::LerpShader;

/// Shared, reference-counted shader handle.
pub type SharedShader = Arc<dyn Shader>;

/// Persisted type tag identifying a shader kind in the binary codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShaderTag(pub u32);

impl ShaderTag {
    /// Reserved: encodes an absent shader.
    pub const ABSENT: ShaderTag = ShaderTag(0);
    /// [`ColorShader`].
    pub const COLOR: ShaderTag = ShaderTag(1);
    /// [`BlendShader`].
    pub const BLEND: ShaderTag = ShaderTag(2);
    /// [`LerpShader`].
    pub const LERP: ShaderTag = ShaderTag(3);
}

/// Capabilities every shader provides.
pub trait Shader: std::fmt::Debug + Send + Sync {
    /// Tag written ahead of this shader's flattened payload.
    fn tag(&self) -> ShaderTag;

    /// Append the stages computing this shader's premultiplied color into the current registers.
    ///
    /// On failure the pipeline may be left partially built; the caller discards it.
    fn append_stages(&self, rec: &mut StageRec<'_>) -> ComposeResult<()>;

    /// Write this shader's payload (children and parameters, without tag or size).
    fn flatten(&self, buffer: &mut WriteBuffer);

    /// Lower to a fragment-processor graph; `None` means "not supported, use another path".
    #[cfg(feature = "gpu")]
    fn as_fragment_processor(&self, _args: &FpArgs) -> Option<FragmentProcessor> {
        None
    }

    /// Return `true` when every pixel this shader produces is known to be opaque.
    fn is_opaque(&self) -> bool {
        false
    }
}

/// Identity comparison for optional shaders: same allocation, or both absent.
pub fn same_shader(a: Option<&SharedShader>, b: Option<&SharedShader>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
