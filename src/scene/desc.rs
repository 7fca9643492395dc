//! Human-edited JSON form of a shader tree.
//!
//! A description is plain data; [`ShaderDesc::build`] runs it through the factories, so a
//! described `blend` with mode `src` builds to its source child and so on.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    blend::mode::BlendMode,
    foundation::{
        color::Color4f,
        error::{ComposeError, ComposeResult},
    },
    shader::{SharedShader, make_blend, make_color_shader, make_lerp},
};

/// One node of a shader description. Absent children stand for the paint color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShaderDesc {
    /// Constant color.
    Color {
        /// Straight-alpha color.
        color: ColorDesc,
    },
    /// Blend `src` onto `dst`.
    Blend {
        /// Blend mode, kebab-case (`"src-over"`).
        mode: BlendMode,
        /// Destination child.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dst: Option<Box<ShaderDesc>>,
        /// Source child.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<Box<ShaderDesc>>,
    },
    /// Mix `dst` toward `src`.
    Lerp {
        /// Interpolation weight.
        weight: f32,
        /// Destination child.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dst: Option<Box<ShaderDesc>>,
        /// Source child.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<Box<ShaderDesc>>,
    },
}

impl ShaderDesc {
    /// Parse a description from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ComposeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ComposeError::validation(format!("parse shader JSON: {e}")))
    }

    /// Parse a description from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ComposeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ComposeError::validation(format!("open shader JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Build the described shader.
    ///
    /// `Ok(None)` means the tree simplified to the paint color. Non-finite colors and NaN weights
    /// are validation errors rather than silent `None`s.
    pub fn build(&self) -> ComposeResult<Option<SharedShader>> {
        match self {
            Self::Color { color } => {
                let color = color.to_color4f();
                make_color_shader(color)
                    .map(Some)
                    .ok_or_else(|| ComposeError::validation(format!("non-finite color {color:?}")))
            }
            Self::Blend { mode, dst, src } => {
                Ok(make_blend(*mode, build_child(dst)?, build_child(src)?))
            }
            Self::Lerp { weight, dst, src } => {
                if weight.is_nan() {
                    return Err(ComposeError::validation("lerp weight is NaN"));
                }
                Ok(make_lerp(*weight, build_child(dst)?, build_child(src)?))
            }
        }
    }
}

fn build_child(child: &Option<Box<ShaderDesc>>) -> ComposeResult<Option<SharedShader>> {
    match child {
        Some(desc) => desc.build(),
        None => Ok(None),
    }
}

/// Straight-alpha color as written in JSON.
///
/// Accepts `"#rrggbb"` / `"#rrggbbaa"`, `[r, g, b, a]`, or `{ "r", "g", "b", "a" }` (alpha
/// defaults to `1`). Channels are floats in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorDesc {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha.
    pub a: f32,
}

impl ColorDesc {
    /// Convert to the crate color type.
    pub fn to_color4f(self) -> Color4f {
        Color4f::new(self.r, self.g, self.b, self.a)
    }

    fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{s}' must start with '#'"))?;
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(format!("color '{s}' must be #rrggbb or #rrggbbaa"));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("color '{s}': {e}"))
        };
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        let c = Color4f::from_rgba8(channel(0)?, channel(2)?, channel(4)?, a);
        Ok(c.into())
    }
}

impl From<Color4f> for ColorDesc {
    fn from(c: Color4f) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

impl<'de> Deserialize<'de> for ColorDesc {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr([f32; 4]),
            Obj {
                r: f32,
                g: f32,
                b: f32,
                #[serde(default = "one")]
                a: f32,
            },
        }

        fn one() -> f32 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b, a]) => Ok(Self { r, g, b, a }),
            Repr::Obj { r, g, b, a } => Ok(Self { r, g, b, a }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/desc.rs"]
mod tests;
