use super::*;

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const HALF_BLUE: [f32; 4] = [0.0, 0.0, 0.5, 0.5];

fn approx(a: [f32; 4], b: [f32; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
}

#[test]
fn src_over_half_alpha_blue_on_red() {
    let out = blend_px(BlendMode::SrcOver, HALF_BLUE, RED);
    assert!(approx(out, [0.5, 0.0, 0.5, 1.0]), "{out:?}");
}

#[test]
fn trivial_modes_select_inputs() {
    assert_eq!(blend_px(BlendMode::Clear, HALF_BLUE, RED), [0.0; 4]);
    assert_eq!(blend_px(BlendMode::Src, HALF_BLUE, RED), HALF_BLUE);
    assert_eq!(blend_px(BlendMode::Dst, HALF_BLUE, RED), RED);
}

#[test]
fn plus_saturates_at_one() {
    let out = blend_px(BlendMode::Plus, [0.8, 0.1, 0.0, 1.0], [0.5, 0.2, 0.0, 1.0]);
    assert!(approx(out, [1.0, 0.3, 0.0, 1.0]), "{out:?}");
}

#[test]
fn multiply_opaque_is_channel_product() {
    let out = blend_px(BlendMode::Multiply, [0.5, 0.25, 1.0, 1.0], [0.5, 1.0, 0.2, 1.0]);
    assert!(approx(out, [0.25, 0.25, 0.2, 1.0]), "{out:?}");
}

#[test]
fn difference_of_identical_opaque_colors_is_black() {
    let c = [0.3, 0.6, 0.9, 1.0];
    let out = blend_px(BlendMode::Difference, c, c);
    assert!(approx(out, [0.0, 0.0, 0.0, 1.0]), "{out:?}");
}

#[test]
fn separable_modes_over_transparent_dst_return_src() {
    let s = [0.2, 0.4, 0.1, 0.5];
    for mode in [
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::Overlay,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::Exclusion,
        BlendMode::Multiply,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ] {
        let out = blend_px(mode, s, [0.0; 4]);
        assert!(approx(out, s), "{mode}: {out:?}");
    }
}

#[test]
fn luminosity_of_gray_src_onto_gray_dst_takes_src_level() {
    let out = blend_px(
        BlendMode::Luminosity,
        [0.8, 0.8, 0.8, 1.0],
        [0.2, 0.2, 0.2, 1.0],
    );
    assert!(approx(out, [0.8, 0.8, 0.8, 1.0]), "{out:?}");
}
