//! Blend mode enumeration.
//!
//! Ids are persisted by the binary codec, so the discriminants are stable and must never be
//! reordered.

/// Porter-Duff and separable/non-separable blend modes, operating on premultiplied colors.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u32)]
pub enum BlendMode {
    /// `0`
    Clear = 0,
    /// `s`
    Src = 1,
    /// `d`
    Dst = 2,
    /// `s + d * (1 - sa)`
    #[default]
    SrcOver = 3,
    /// `d + s * (1 - da)`
    DstOver = 4,
    /// `s * da`
    SrcIn = 5,
    /// `d * sa`
    DstIn = 6,
    /// `s * (1 - da)`
    SrcOut = 7,
    /// `d * (1 - sa)`
    DstOut = 8,
    /// `s * da + d * (1 - sa)`
    SrcATop = 9,
    /// `d * sa + s * (1 - da)`
    DstATop = 10,
    /// `s * (1 - da) + d * (1 - sa)`
    Xor = 11,
    /// `min(s + d, 1)`
    Plus = 12,
    /// `s * d`
    Modulate = 13,
    /// `s + d - s * d`
    Screen = 14,
    /// Multiply or screen, depending on destination.
    Overlay = 15,
    /// Darker of source and destination.
    Darken = 16,
    /// Lighter of source and destination.
    Lighten = 17,
    /// Brighten destination to reflect source.
    ColorDodge = 18,
    /// Darken destination to reflect source.
    ColorBurn = 19,
    /// Multiply or screen, depending on source.
    HardLight = 20,
    /// Lighten or darken, depending on source.
    SoftLight = 21,
    /// Subtract darker from lighter with higher contrast.
    Difference = 22,
    /// Subtract darker from lighter with lower contrast.
    Exclusion = 23,
    /// Multiply source with destination, keeping uncovered regions.
    Multiply = 24,
    /// Hue of source with saturation and luminosity of destination.
    Hue = 25,
    /// Saturation of source with hue and luminosity of destination.
    Saturation = 26,
    /// Hue and saturation of source with luminosity of destination.
    Color = 27,
    /// Luminosity of source with hue and saturation of destination.
    Luminosity = 28,
}

impl BlendMode {
    /// Last valid mode; ids above `LAST as u32` are rejected when decoding.
    pub const LAST: BlendMode = BlendMode::Luminosity;

    /// All blend modes in id order.
    pub const ALL: [BlendMode; 29] = [
        Self::Clear,
        Self::Src,
        Self::Dst,
        Self::SrcOver,
        Self::DstOver,
        Self::SrcIn,
        Self::DstIn,
        Self::SrcOut,
        Self::DstOut,
        Self::SrcATop,
        Self::DstATop,
        Self::Xor,
        Self::Plus,
        Self::Modulate,
        Self::Screen,
        Self::Overlay,
        Self::Darken,
        Self::Lighten,
        Self::ColorDodge,
        Self::ColorBurn,
        Self::HardLight,
        Self::SoftLight,
        Self::Difference,
        Self::Exclusion,
        Self::Multiply,
        Self::Hue,
        Self::Saturation,
        Self::Color,
        Self::Luminosity,
    ];

    /// Stable numeric id.
    pub fn id(self) -> u32 {
        self as u32
    }

    /// Look up a mode by id; `None` for ids past [`BlendMode::LAST`].
    pub fn from_u32(id: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(id).ok()?).copied()
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Src => "Src",
            Self::Dst => "Dst",
            Self::SrcOver => "SrcOver",
            Self::DstOver => "DstOver",
            Self::SrcIn => "SrcIn",
            Self::DstIn => "DstIn",
            Self::SrcOut => "SrcOut",
            Self::DstOut => "DstOut",
            Self::SrcATop => "SrcATop",
            Self::DstATop => "DstATop",
            Self::Xor => "Xor",
            Self::Plus => "Plus",
            Self::Modulate => "Modulate",
            Self::Screen => "Screen",
            Self::Overlay => "Overlay",
            Self::Darken => "Darken",
            Self::Lighten => "Lighten",
            Self::ColorDodge => "ColorDodge",
            Self::ColorBurn => "ColorBurn",
            Self::HardLight => "HardLight",
            Self::SoftLight => "SoftLight",
            Self::Difference => "Difference",
            Self::Exclusion => "Exclusion",
            Self::Multiply => "Multiply",
            Self::Hue => "Hue",
            Self::Saturation => "Saturation",
            Self::Color => "Color",
            Self::Luminosity => "Luminosity",
        }
    }
}

impl std::fmt::Display for BlendMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/mode.rs"]
mod tests;
