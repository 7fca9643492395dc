use std::collections::HashMap;

use crate::{
    codec::buffer::ReadBuffer,
    foundation::error::{ComposeError, ComposeResult},
    shader::{ShaderTag, SharedShader, blend, color, lerp},
};

/// Decodes one shader payload (the bytes after the record's tag and size).
///
/// Implementations re-run the shader's factory so decoded shaders obey construction-time
/// simplification, and return `None` after tripping the buffer's validity flag on bad input.
pub type DecodeFn = fn(&mut ReadBuffer<'_>) -> Option<SharedShader>;

/// Tag-to-decoder dispatch table.
#[derive(Clone)]
pub struct ShaderRegistry {
    decoders: HashMap<ShaderTag, DecodeFn>,
}

impl ShaderRegistry {
    /// A registry that knows no tags.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new(),
        }
    }

    /// A registry with the color, blend, and lerp shaders registered.
    pub fn with_builtins() -> Self {
        let mut decoders: HashMap<ShaderTag, DecodeFn> = HashMap::new();
        decoders.insert(ShaderTag::COLOR, color::decode);
        decoders.insert(ShaderTag::BLEND, blend::decode);
        decoders.insert(ShaderTag::LERP, lerp::decode);
        Self { decoders }
    }

    /// Register a decoder for `tag`.
    ///
    /// Fails for the reserved absent tag `0` and for tags that are already registered.
    pub fn register(&mut self, tag: ShaderTag, decode: DecodeFn) -> ComposeResult<()> {
        if tag == ShaderTag::ABSENT {
            return Err(ComposeError::validation("shader tag 0 is reserved"));
        }
        if self.decoders.contains_key(&tag) {
            return Err(ComposeError::validation(format!(
                "shader tag {} is already registered",
                tag.0
            )));
        }
        self.decoders.insert(tag, decode);
        Ok(())
    }

    /// Decoder for `tag`, if registered.
    pub fn decoder(&self, tag: ShaderTag) -> Option<DecodeFn> {
        self.decoders.get(&tag).copied()
    }

    /// Registered tags in ascending order.
    pub fn tags(&self) -> Vec<ShaderTag> {
        let mut tags: Vec<_> = self.decoders.keys().copied().collect();
        tags.sort();
        tags
    }
}

impl Default for ShaderRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for ShaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/registry.rs"]
mod tests;
