use super::*;
use crate::{
    blend::mode::BlendMode,
    shader::{make_blend, make_color_shader, make_lerp},
};

fn builtins() -> ShaderRegistry {
    ShaderRegistry::with_builtins()
}

fn nested_blends(depth: usize) -> Option<SharedShader> {
    let mut shader = make_color_shader(Color4f::RED);
    for _ in 0..depth {
        shader = make_blend(BlendMode::SrcOver, shader, None);
    }
    shader
}

#[test]
fn scalars_are_little_endian() {
    let mut buffer = WriteBuffer::new();
    buffer.write_u32(0x0403_0201);
    buffer.write_scalar(1.0);
    assert_eq!(buffer.as_bytes(), &[1, 2, 3, 4, 0x00, 0x00, 0x80, 0x3f]);
}

#[test]
fn absent_shader_is_a_bare_zero_tag() {
    let mut buffer = WriteBuffer::new();
    buffer.write_flattenable(None);
    assert_eq!(buffer.into_bytes(), vec![0, 0, 0, 0]);
}

#[test]
fn record_size_covers_the_payload() {
    let shader = make_color_shader(Color4f::GREEN).unwrap();
    let mut buffer = WriteBuffer::new();
    buffer.write_flattenable(Some(shader.as_ref()));

    let bytes = buffer.as_bytes();
    assert_eq!(bytes.len(), 8 + 16);
    assert_eq!(&bytes[0..4], &ShaderTag::COLOR.0.to_le_bytes());
    assert_eq!(&bytes[4..8], &16u32.to_le_bytes());
}

#[test]
fn reads_past_the_end_invalidate_for_good() {
    let registry = builtins();
    let mut reader = ReadBuffer::new(&[1, 0, 0], &registry, DecodeOpts::default());
    assert_eq!(reader.read_u32(), 0);
    assert!(!reader.is_valid());
    assert_eq!(reader.offset(), 0);
    assert!(!reader.validate(true));
}

#[test]
fn reads_nested_shaders() {
    let shader = make_lerp(
        0.5,
        make_color_shader(Color4f::RED),
        make_blend(BlendMode::Multiply, None, make_color_shader(Color4f::BLUE)),
    )
    .unwrap();
    let mut buffer = WriteBuffer::new();
    buffer.write_flattenable(Some(shader.as_ref()));

    let registry = builtins();
    let mut reader = ReadBuffer::new(buffer.as_bytes(), &registry, DecodeOpts::default());
    let decoded = reader.read_shader().unwrap();
    assert!(reader.is_valid());
    assert_eq!(reader.remaining(), 0);
    assert_eq!(decoded.tag(), ShaderTag::LERP);
}

#[test]
fn unknown_tag_is_invalid() {
    let mut buffer = WriteBuffer::new();
    buffer.write_u32(0x7e57);
    buffer.write_u32(0);

    let registry = builtins();
    let mut reader = ReadBuffer::new(buffer.as_bytes(), &registry, DecodeOpts::default());
    assert!(reader.read_shader().is_none());
    assert!(!reader.is_valid());
}

#[test]
fn oversized_record_is_invalid() {
    let mut buffer = WriteBuffer::new();
    buffer.write_u32(ShaderTag::COLOR.0);
    buffer.write_u32(64);
    buffer.write_color4f(Color4f::RED);

    let registry = builtins();
    let mut reader = ReadBuffer::new(buffer.as_bytes(), &registry, DecodeOpts::default());
    assert!(reader.read_shader().is_none());
    assert!(!reader.is_valid());
}

#[test]
fn undersized_record_is_invalid() {
    let mut buffer = WriteBuffer::new();
    buffer.write_u32(ShaderTag::COLOR.0);
    buffer.write_u32(12);
    buffer.write_color4f(Color4f::RED);

    let registry = builtins();
    let mut reader = ReadBuffer::new(buffer.as_bytes(), &registry, DecodeOpts::default());
    assert!(reader.read_shader().is_none());
    assert!(!reader.is_valid());
}

#[test]
fn non_finite_color_is_invalid() {
    let mut buffer = WriteBuffer::new();
    buffer.write_u32(ShaderTag::COLOR.0);
    buffer.write_u32(16);
    buffer.write_color4f(Color4f::new(f32::NAN, 0.0, 0.0, 1.0));

    let registry = builtins();
    let mut reader = ReadBuffer::new(buffer.as_bytes(), &registry, DecodeOpts::default());
    assert!(reader.read_shader().is_none());
    assert!(!reader.is_valid());
}

#[test]
fn nesting_beyond_max_depth_is_invalid() {
    let shader = nested_blends(4);
    let mut buffer = WriteBuffer::new();
    buffer.write_flattenable(shader.as_deref());
    let registry = builtins();

    let mut shallow = ReadBuffer::new(buffer.as_bytes(), &registry, DecodeOpts { max_depth: 4 });
    assert!(shallow.read_shader().is_none());
    assert!(!shallow.is_valid());

    let mut deep = ReadBuffer::new(buffer.as_bytes(), &registry, DecodeOpts { max_depth: 5 });
    assert!(deep.read_shader().is_some());
    assert!(deep.is_valid());
}

#[test]
fn custom_decoders_plug_into_the_registry() {
    fn decode_const_green(buffer: &mut ReadBuffer<'_>) -> Option<SharedShader> {
        let marker = buffer.read_u32();
        if !buffer.validate(marker == 0xab) {
            return None;
        }
        make_color_shader(Color4f::GREEN)
    }

    let mut registry = builtins();
    registry.register(ShaderTag(0x40), decode_const_green).unwrap();

    let mut buffer = WriteBuffer::new();
    buffer.write_u32(0x40);
    buffer.write_u32(4);
    buffer.write_u32(0xab);

    let mut reader = ReadBuffer::new(buffer.as_bytes(), &registry, DecodeOpts::default());
    let shader = reader.read_shader().unwrap();
    assert_eq!(shader.tag(), ShaderTag::COLOR);
    assert!(reader.is_valid());
}

#[test]
fn nested_record_sizes_cover_their_children() {
    let shader = nested_blends(3);
    let mut buffer = WriteBuffer::new();
    buffer.write_flattenable(shader.as_deref());
    let bytes = buffer.as_bytes();

    // Each blend record: tag, size, child record, absent src tag, mode id.
    let mut at = 0;
    for depth in 0..3 {
        let size = u32::from_le_bytes(bytes[at + 4..at + 8].try_into().unwrap()) as usize;
        assert_eq!(size, bytes.len() - at - 8 - 8 * depth, "depth {depth}");
        at += 8;
    }
    assert_eq!(&bytes[at..at + 4], &ShaderTag::COLOR.0.to_le_bytes());
    assert_eq!(&bytes[at + 4..at + 8], &16u32.to_le_bytes());
}
