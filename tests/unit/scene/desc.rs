use super::*;
use crate::{
    foundation::color::PremulColor,
    render::eval_span,
    shader::{Paint, Shader as _, ShaderTag},
};

fn parse(json: &str) -> ShaderDesc {
    ShaderDesc::from_reader(json.as_bytes()).unwrap()
}

#[test]
fn parses_nested_blend() {
    let desc = parse(
        r##"{
            "kind": "blend",
            "mode": "src-over",
            "dst": { "kind": "color", "color": "#ff0000" },
            "src": { "kind": "color", "color": [0.0, 0.0, 1.0, 0.5] }
        }"##,
    );
    let shader = desc.build().unwrap().unwrap();
    assert_eq!(shader.tag(), ShaderTag::BLEND);

    let out = eval_span(Some(shader.as_ref()), &Paint::default(), 1).unwrap();
    assert!(out[0].approx_eq(PremulColor::from_array([0.5, 0.0, 0.5, 1.0]), 1e-6));
}

#[test]
fn color_forms_agree() {
    let hex = parse(r##"{ "kind": "color", "color": "#336699cc" }"##);
    let obj = parse(r#"{ "kind": "color", "color": { "r": 0.2, "g": 0.4, "b": 0.6, "a": 0.8 } }"#);
    let (ShaderDesc::Color { color: a }, ShaderDesc::Color { color: b }) = (hex, obj) else {
        panic!("expected color descriptions");
    };
    for (x, y) in [(a.r, b.r), (a.g, b.g), (a.b, b.b), (a.a, b.a)] {
        assert!((x - y).abs() < 1e-6);
    }
}

#[test]
fn object_alpha_defaults_to_one() {
    let desc = parse(r#"{ "kind": "color", "color": { "r": 1, "g": 0, "b": 0 } }"#);
    assert!(desc.build().unwrap().unwrap().is_opaque());
}

#[test]
fn rejects_malformed_hex() {
    for bad in ["\"ff0000\"", "\"#ff00\"", "\"#gg0000\""] {
        let json = format!(r#"{{ "kind": "color", "color": {bad} }}"#);
        assert!(ShaderDesc::from_reader(json.as_bytes()).is_err(), "{bad}");
    }
}

#[test]
fn missing_children_stand_for_paint() {
    let desc = parse(r#"{ "kind": "lerp", "weight": 0.5 }"#);
    assert!(desc.build().unwrap().is_none());

    let desc = parse(r#"{ "kind": "blend", "mode": "multiply" }"#);
    let shader = desc.build().unwrap().unwrap();
    let paint = Paint::with_color(Color4f::WHITE);
    let out = eval_span(Some(shader.as_ref()), &paint, 1).unwrap();
    assert_eq!(out[0], PremulColor::from_array([1.0, 1.0, 1.0, 1.0]));
}

#[test]
fn factories_simplify_built_trees() {
    let desc = parse(
        r##"{ "kind": "lerp", "weight": 1.0,
             "dst": { "kind": "color", "color": "#ff0000" },
             "src": { "kind": "color", "color": "#0000ff" } }"##,
    );
    assert_eq!(desc.build().unwrap().unwrap().tag(), ShaderTag::COLOR);
}

#[test]
fn nan_weight_is_a_validation_error() {
    let desc = ShaderDesc::Lerp {
        weight: f32::NAN,
        dst: None,
        src: None,
    };
    assert!(matches!(desc.build(), Err(ComposeError::Validation(_))));
}

#[test]
fn non_finite_color_is_a_validation_error() {
    let desc = ShaderDesc::Color {
        color: Color4f::new(f32::INFINITY, 0.0, 0.0, 1.0).into(),
    };
    assert!(matches!(desc.build(), Err(ComposeError::Validation(_))));
}

#[test]
fn serializes_back_to_json() {
    let desc = ShaderDesc::Blend {
        mode: BlendMode::Screen,
        dst: Some(Box::new(ShaderDesc::Color {
            color: Color4f::RED.into(),
        })),
        src: None,
    };
    let json = serde_json::to_string(&desc).unwrap();
    assert!(json.contains(r#""kind":"blend""#));
    assert!(json.contains(r#""mode":"screen""#));
    assert!(!json.contains("src\":"));
    assert_eq!(parse(&json), desc);
}
