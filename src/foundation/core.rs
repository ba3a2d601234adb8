use std::fmt;

use crate::foundation::error::{PanelGridError, PanelGridResult};
use crate::foundation::math::mul_div255_u8;

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Stable panel identifier (`panel-N` for plain grids, the area name for named templates).
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct PanelId(pub String);

impl PanelId {
    /// Identifier used for the `index`-th cell of a plain grid (1-based in the text form).
    pub fn for_index(index: usize) -> Self {
        Self(format!("panel-{}", index + 1))
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Output surface size in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Full-surface rectangle in `f64` coordinates.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// Whether a render feeds the live editor or a final export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Editor view: empty captions show a dimmed placeholder.
    #[default]
    Interactive,
    /// Final output: placeholders are never drawn.
    Export,
}

/// Straight (non-premultiplied) RGBA8 color.
///
/// Serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha scaled by `factor` (clamped to `[0, 1]`).
    pub fn with_alpha_mul(self, factor: f64) -> Self {
        let a = (f64::from(self.a) * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn parse_hex(s: &str) -> PanelGridResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        let nibble = |c: u8| -> PanelGridResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| PanelGridError::validation(format!("invalid hex color '{s}'")))
        };
        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 | 8 => {
                let mut out = [255u8; 4];
                for (i, pair) in bytes.chunks_exact(2).enumerate() {
                    out[i] = (nibble(pair[0])? << 4) | nibble(pair[1])?;
                }
                Ok(Self::rgba(out[0], out[1], out[2], out[3]))
            }
            _ => Err(PanelGridError::validation(format!(
                "invalid hex color '{s}'"
            ))),
        }
    }

    /// Premultiplied RGBA8 bytes of this color.
    pub fn premultiplied(self) -> [u8; 4] {
        let premul = |c: u8| mul_div255_u8(u16::from(c), u16::from(self.a));
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

impl TryFrom<String> for Rgba8 {
    type Error = PanelGridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Rgba8> for String {
    fn from(c: Rgba8) -> Self {
        if c.a == 255 {
            format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
