//! Per-lane blend kernels over premultiplied `[r, g, b, a]` values.
//!
//! `s` is the source (current registers), `d` the destination (secondary registers).

use crate::blend::mode::BlendMode;

type Px = [f32; 4];

/// Blend one premultiplied source pixel onto one premultiplied destination pixel.
pub(crate) fn blend_px(mode: BlendMode, s: Px, d: Px) -> Px {
    match mode {
        BlendMode::Clear => [0.0; 4],
        BlendMode::Src => s,
        BlendMode::Dst => d,
        BlendMode::SrcOver => zip4(s, d, |s, d, sa, _| s + d * inv(sa)),
        BlendMode::DstOver => zip4(s, d, |s, d, _, da| d + s * inv(da)),
        BlendMode::SrcIn => zip4(s, d, |s, _, _, da| s * da),
        BlendMode::DstIn => zip4(s, d, |_, d, sa, _| d * sa),
        BlendMode::SrcOut => zip4(s, d, |s, _, _, da| s * inv(da)),
        BlendMode::DstOut => zip4(s, d, |_, d, sa, _| d * inv(sa)),
        BlendMode::SrcATop => zip4(s, d, |s, d, sa, da| s * da + d * inv(sa)),
        BlendMode::DstATop => zip4(s, d, |s, d, sa, da| d * sa + s * inv(da)),
        BlendMode::Xor => zip4(s, d, |s, d, sa, da| s * inv(da) + d * inv(sa)),
        BlendMode::Plus => zip4(s, d, |s, d, _, _| (s + d).min(1.0)),
        BlendMode::Modulate => zip4(s, d, |s, d, _, _| s * d),
        BlendMode::Screen => zip4(s, d, |s, d, _, _| s + d - s * d),
        BlendMode::Multiply => zip4(s, d, |s, d, sa, da| s * inv(da) + d * inv(sa) + s * d),
        BlendMode::Darken => separable(s, d, |s, d, sa, da| s + d - (s * da).max(d * sa)),
        BlendMode::Lighten => separable(s, d, |s, d, sa, da| s + d - (s * da).min(d * sa)),
        BlendMode::Difference => {
            separable(s, d, |s, d, sa, da| s + d - 2.0 * (s * da).min(d * sa))
        }
        BlendMode::Exclusion => separable(s, d, |s, d, _, _| s + d - 2.0 * s * d),
        BlendMode::ColorBurn => separable(s, d, color_burn),
        BlendMode::ColorDodge => separable(s, d, color_dodge),
        BlendMode::HardLight => separable(s, d, |s, d, sa, da| {
            let m = if 2.0 * s <= sa {
                2.0 * s * d
            } else {
                sa * da - 2.0 * (da - d) * (sa - s)
            };
            s * inv(da) + d * inv(sa) + m
        }),
        BlendMode::Overlay => separable(s, d, |s, d, sa, da| {
            let m = if 2.0 * d <= da {
                2.0 * s * d
            } else {
                sa * da - 2.0 * (da - d) * (sa - s)
            };
            s * inv(da) + d * inv(sa) + m
        }),
        BlendMode::SoftLight => separable(s, d, soft_light),
        BlendMode::Hue => non_separable(s, d, |src, dst, sa, da| {
            let mut c = src.map(|v| v * sa);
            set_sat(&mut c, sat(dst) * sa);
            set_lum(&mut c, lum(dst) * sa);
            clip_color(&mut c, sa * da);
            c
        }),
        BlendMode::Saturation => non_separable(s, d, |src, dst, sa, da| {
            let mut c = dst.map(|v| v * sa);
            set_sat(&mut c, sat(src) * da);
            set_lum(&mut c, lum(dst) * sa);
            clip_color(&mut c, sa * da);
            c
        }),
        BlendMode::Color => non_separable(s, d, |src, dst, sa, da| {
            let mut c = src.map(|v| v * da);
            set_lum(&mut c, lum(dst) * sa);
            clip_color(&mut c, sa * da);
            c
        }),
        BlendMode::Luminosity => non_separable(s, d, |src, dst, sa, da| {
            let mut c = dst.map(|v| v * sa);
            set_lum(&mut c, lum(src) * da);
            clip_color(&mut c, sa * da);
            c
        }),
    }
}

#[inline(always)]
fn inv(x: f32) -> f32 {
    1.0 - x
}

/// Apply `f(s, d, sa, da)` to all four channels, alpha included.
#[inline(always)]
fn zip4(s: Px, d: Px, f: impl Fn(f32, f32, f32, f32) -> f32) -> Px {
    let (sa, da) = (s[3], d[3]);
    [
        f(s[0], d[0], sa, da),
        f(s[1], d[1], sa, da),
        f(s[2], d[2], sa, da),
        f(s[3], d[3], sa, da),
    ]
}

/// Apply `f` to color channels; alpha is always source-over.
#[inline(always)]
fn separable(s: Px, d: Px, f: impl Fn(f32, f32, f32, f32) -> f32) -> Px {
    let (sa, da) = (s[3], d[3]);
    [
        f(s[0], d[0], sa, da),
        f(s[1], d[1], sa, da),
        f(s[2], d[2], sa, da),
        sa + da * inv(sa),
    ]
}

/// `f` produces the blended color term `B * sa * da`; uncovered regions are added back here.
#[inline(always)]
fn non_separable(s: Px, d: Px, f: impl Fn([f32; 3], [f32; 3], f32, f32) -> [f32; 3]) -> Px {
    let (sa, da) = (s[3], d[3]);
    let src = [s[0], s[1], s[2]];
    let dst = [d[0], d[1], d[2]];
    let c = f(src, dst, sa, da);
    [
        s[0] * inv(da) + d[0] * inv(sa) + c[0],
        s[1] * inv(da) + d[1] * inv(sa) + c[1],
        s[2] * inv(da) + d[2] * inv(sa) + c[2],
        sa + da - sa * da,
    ]
}

fn color_burn(s: f32, d: f32, sa: f32, da: f32) -> f32 {
    if d == da {
        d + s * inv(da)
    } else if s == 0.0 {
        d * inv(sa)
    } else {
        sa * (da - da.min((da - d) * sa / s)) + s * inv(da) + d * inv(sa)
    }
}

fn color_dodge(s: f32, d: f32, sa: f32, da: f32) -> f32 {
    if d == 0.0 {
        s * inv(da)
    } else if s == sa {
        s + d * inv(sa)
    } else {
        sa * da.min((d * sa) / (sa - s)) + s * inv(da) + d * inv(sa)
    }
}

fn soft_light(s: f32, d: f32, sa: f32, da: f32) -> f32 {
    let m = if da > 0.0 { d / da } else { 0.0 };
    let s2 = 2.0 * s;
    let m4 = 4.0 * m;

    let dark_src = d * (sa + (s2 - sa) * (1.0 - m));
    let dark_dst = (m4 * m4 + m4) * (m - 1.0) + 7.0 * m;
    let lite_dst = m.sqrt() - m;
    let lite_src = d * sa + da * (s2 - sa) * if 4.0 * d <= da { dark_dst } else { lite_dst };

    s * inv(da) + d * inv(sa) + if s2 <= sa { dark_src } else { lite_src }
}

fn min3(c: [f32; 3]) -> f32 {
    c[0].min(c[1]).min(c[2])
}

fn max3(c: [f32; 3]) -> f32 {
    c[0].max(c[1]).max(c[2])
}

fn sat(c: [f32; 3]) -> f32 {
    max3(c) - min3(c)
}

fn lum(c: [f32; 3]) -> f32 {
    c[0] * 0.30 + c[1] * 0.59 + c[2] * 0.11
}

fn set_sat(c: &mut [f32; 3], s: f32) {
    let mn = min3(*c);
    let range = max3(*c) - mn;
    for v in c.iter_mut() {
        *v = if range == 0.0 { 0.0 } else { (*v - mn) * s / range };
    }
}

fn set_lum(c: &mut [f32; 3], l: f32) {
    let diff = l - lum(*c);
    for v in c.iter_mut() {
        *v += diff;
    }
}

fn clip_color(c: &mut [f32; 3], a: f32) {
    let mn = min3(*c);
    let mx = max3(*c);
    let l = lum(*c);
    for v in c.iter_mut() {
        let mut x = *v;
        if mn < 0.0 && l != mn {
            x = l + (x - l) * l / (l - mn);
        }
        if mx > a && mx != l {
            x = l + (x - l) * (a - l) / (mx - l);
        }
        *v = x.max(0.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/math.rs"]
mod tests;
