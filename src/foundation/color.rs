/// Straight-alpha RGBA color with `f32` channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color4f {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl Color4f {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    /// Create a color from straight-alpha channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from straight-alpha RGBA8 bytes.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Same color with alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Return `true` when every channel is finite.
    pub fn is_finite(self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }

    /// Return `true` when alpha is exactly 1.
    pub fn is_opaque(self) -> bool {
        self.a == 1.0
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Multiply color channels by alpha.
    pub fn premul(self) -> PremulColor {
        PremulColor {
            r: self.r * self.a,
            g: self.g * self.a,
            b: self.b * self.a,
            a: self.a,
        }
    }
}

/// Premultiplied RGBA color (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PremulColor {
    /// Red, premultiplied.
    pub r: f32,
    /// Green, premultiplied.
    pub g: f32,
    /// Blue, premultiplied.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl PremulColor {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_array([0.0; 4]);

    /// Build from `[r, g, b, a]`.
    pub const fn from_array(c: [f32; 4]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3],
        }
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Quantize to premultiplied RGBA8, rounding to nearest and clamping to `[0, 255]`.
    pub fn to_rgba8(self) -> [u8; 4] {
        self.to_array()
            .map(|c| (c * 255.0).round().clamp(0.0, 255.0) as u8)
    }

    /// Return `true` when every channel is within `eps` of `other`.
    pub fn approx_eq(self, other: Self, eps: f32) -> bool {
        self.to_array()
            .iter()
            .zip(other.to_array())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
