//! Little-endian read/write buffers for flattened shaders.
//!
//! Every shader record is `tag: u32`, then (for non-zero tags) `size: u32` and `size` payload
//! bytes. Tag `0` encodes an absent shader.

use crate::{
    codec::registry::ShaderRegistry,
    foundation::color::Color4f,
    shader::{Shader, ShaderTag, SharedShader},
};

/// Options bounding how much a [`ReadBuffer`] will trust its input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOpts {
    /// Maximum nesting depth of shader records.
    pub max_depth: usize,
}

impl Default for DecodeOpts {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Append-only encoder.
#[derive(Clone, Debug, Default)]
pub struct WriteBuffer {
    bytes: Vec<u8>,
}

impl WriteBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a `u32`.
    pub fn write_u32(&mut self, v: u32) {
        self.bytes.extend_from_slice(&v.to_le_bytes());
    }

    /// Write an `f32` as its IEEE bits.
    pub fn write_scalar(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    /// Write a straight-alpha color as four scalars.
    pub fn write_color4f(&mut self, c: Color4f) {
        for v in c.to_array() {
            self.write_scalar(v);
        }
    }

    /// Write a tagged, size-prefixed shader record (tag `0` when `shader` is `None`).
    pub fn write_flattenable(&mut self, shader: Option<&dyn Shader>) {
        let Some(shader) = shader else {
            self.write_u32(ShaderTag::ABSENT.0);
            return;
        };
        self.write_u32(shader.tag().0);

        let size_at = self.bytes.len();
        self.write_u32(0);
        let start = self.bytes.len();
        shader.flatten(self);
        let size = self.bytes.len() - start;
        // Each node writes at most 24 bytes, so overflowing u32 takes ~10^8 nodes.
        debug_assert!(u32::try_from(size).is_ok(), "shader payload of {size} bytes");
        self.bytes[size_at..size_at + 4].copy_from_slice(&(size as u32).to_le_bytes());
    }

    /// Bytes written so far.
    pub fn bytes_written(&self) -> usize {
        self.bytes.len()
    }

    /// Borrow the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Decoder carrying an explicit validity flag.
///
/// Once any check fails the buffer is invalid for good: further reads return zeroes, and
/// [`ReadBuffer::read_shader`] returns `None`. Enclosing decoders must consult
/// [`ReadBuffer::is_valid`] before trusting values they read.
pub struct ReadBuffer<'a> {
    bytes: &'a [u8],
    pos: usize,
    valid: bool,
    depth: usize,
    registry: &'a ShaderRegistry,
    opts: DecodeOpts,
}

impl<'a> ReadBuffer<'a> {
    /// Create a reader over `bytes`, resolving tags through `registry`.
    pub fn new(bytes: &'a [u8], registry: &'a ShaderRegistry, opts: DecodeOpts) -> Self {
        Self {
            bytes,
            pos: 0,
            valid: true,
            depth: 0,
            registry,
            opts,
        }
    }

    /// Return `false` once any read or validation has failed.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Mark the buffer invalid when `cond` is false; return the resulting validity.
    pub fn validate(&mut self, cond: bool) -> bool {
        if !cond {
            self.valid = false;
        }
        self.valid
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Current read offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Read a `u32`; `0` if the buffer is invalid or exhausted.
    pub fn read_u32(&mut self) -> u32 {
        if !self.validate(self.remaining() >= 4) {
            return 0;
        }
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.bytes[self.pos..self.pos + 4]);
        self.pos += 4;
        u32::from_le_bytes(raw)
    }

    /// Read an `f32` written by [`WriteBuffer::write_scalar`].
    pub fn read_scalar(&mut self) -> f32 {
        f32::from_bits(self.read_u32())
    }

    /// Read a color written by [`WriteBuffer::write_color4f`].
    pub fn read_color4f(&mut self) -> Color4f {
        let r = self.read_scalar();
        let g = self.read_scalar();
        let b = self.read_scalar();
        let a = self.read_scalar();
        Color4f::new(r, g, b, a)
    }

    /// Read one shader record, dispatching on its tag.
    ///
    /// Returns `None` both for an encoded absent shader and on failure; the two are told apart by
    /// [`ReadBuffer::is_valid`].
    pub fn read_shader(&mut self) -> Option<SharedShader> {
        let tag = ShaderTag(self.read_u32());
        if !self.valid || tag == ShaderTag::ABSENT {
            return None;
        }

        let Some(decode) = self.registry.decoder(tag) else {
            tracing::debug!(tag = tag.0, offset = self.pos, "unknown shader tag");
            self.validate(false);
            return None;
        };

        let size = self.read_u32() as usize;
        if !self.validate(size <= self.remaining()) {
            tracing::debug!(tag = tag.0, size, "shader record overruns stream");
            return None;
        }
        if !self.validate(self.depth < self.opts.max_depth) {
            tracing::debug!(max_depth = self.opts.max_depth, "shader nesting too deep");
            return None;
        }

        let start = self.pos;
        self.depth += 1;
        let shader = decode(self);
        self.depth -= 1;

        if !self.valid {
            return None;
        }
        if !self.validate(self.pos - start == size) {
            tracing::debug!(
                tag = tag.0,
                declared = size,
                consumed = self.pos - start,
                "shader record size mismatch"
            );
            return None;
        }
        shader
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/buffer.rs"]
mod tests;
