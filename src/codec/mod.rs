//! Binary shader codec.
//!
//! Shaders flatten themselves into a [`WriteBuffer`]; decoding dispatches on the record tag
//! through a [`ShaderRegistry`] and rebuilds each shader through its factory.

/// Read/write buffers.
pub mod buffer;
/// Tag-to-decoder dispatch table.
pub mod registry;

use std::sync::LazyLock;

use crate::{
    foundation::error::{ComposeError, ComposeResult},
    shader::{Shader, SharedShader},
};

pub use buffer::{DecodeOpts, ReadBuffer, WriteBuffer};
pub use registry::{DecodeFn, ShaderRegistry};

static BUILTINS: LazyLock<ShaderRegistry> = LazyLock::new(ShaderRegistry::with_builtins);

/// Flatten `shader` (or an absent shader) into a standalone byte stream.
pub fn encode_shader(shader: Option<&dyn Shader>) -> Vec<u8> {
    let mut buffer = WriteBuffer::new();
    buffer.write_flattenable(shader);
    buffer.into_bytes()
}

/// Decode a stream produced by [`encode_shader`] using the built-in registry.
///
/// `Ok(None)` means the stream encodes an absent shader (or a shader whose factory simplified to
/// nothing).
pub fn decode_shader(bytes: &[u8]) -> ComposeResult<Option<SharedShader>> {
    decode_shader_with(bytes, &BUILTINS, DecodeOpts::default())
}

/// Decode a stream with an explicit registry and options.
#[tracing::instrument(skip(bytes, registry), fields(len = bytes.len()))]
pub fn decode_shader_with(
    bytes: &[u8],
    registry: &ShaderRegistry,
    opts: DecodeOpts,
) -> ComposeResult<Option<SharedShader>> {
    let mut buffer = ReadBuffer::new(bytes, registry, opts);
    let shader = buffer.read_shader();

    if !buffer.is_valid() {
        tracing::warn!(offset = buffer.offset(), "rejected malformed shader stream");
        return Err(ComposeError::decode(format!(
            "malformed shader stream (stopped at byte {})",
            buffer.offset()
        )));
    }
    if buffer.remaining() != 0 {
        tracing::warn!(trailing = buffer.remaining(), "trailing bytes after shader");
        return Err(ComposeError::decode(format!(
            "{} trailing bytes after shader record",
            buffer.remaining()
        )));
    }
    Ok(shader)
}
