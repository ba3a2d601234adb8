use crate::foundation::{core::Rgba8, math::clamp_finite};

/// Font size used when neither the panel nor the shared style sets one.
pub const FALLBACK_FONT_SIZE_PT: f64 = 26.0;
/// Family used when neither the panel nor the shared style sets one.
pub const FALLBACK_FONT_FAMILY: &str = "Impact";
/// Weight used when neither the panel nor the shared style sets one.
pub const FALLBACK_WEIGHT: u16 = 700;
/// Outline width used when neither the panel nor the shared style sets one.
pub const FALLBACK_STROKE_WIDTH: f64 = 2.0;

/// Per-panel caption overrides. Unset fields fall back to [`DefaultCaptionStyle`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptionSpec {
    /// Caption text; `\n` forces a line break.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fill color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba8>,
    /// Explicit font size. When unset, the size is fitted to the panel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size_pt: Option<f64>,
    /// CSS-style family name or list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font weight (100..=900).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    /// Italic style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Outline width in pixels; 0 disables the outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Outline color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Rgba8>,
    /// Horizontal position in `[-100, 100]`; 0 is centered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_x: Option<f64>,
    /// Vertical position in `[-100, 100]`; 0 is the default bottom anchor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos_y: Option<f64>,
    /// Rotation in degrees about the caption block center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_deg: Option<f64>,
}

/// Shared caption defaults applied beneath every panel override.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefaultCaptionStyle {
    /// Fill color.
    pub color: Option<Rgba8>,
    /// Font size.
    pub font_size_pt: Option<f64>,
    /// Family name or list.
    pub font_family: Option<String>,
    /// Font weight.
    pub weight: Option<u16>,
    /// Italic style.
    pub italic: Option<bool>,
    /// Outline width.
    pub stroke_width: Option<f64>,
    /// Outline color.
    pub stroke_color: Option<Rgba8>,
    /// Horizontal position.
    pub pos_x: Option<f64>,
    /// Vertical position.
    pub pos_y: Option<f64>,
    /// Rotation in degrees.
    pub rotation_deg: Option<f64>,
}

/// Caption with every field resolved (panel, then shared default, then fallback).
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedCaption {
    /// Caption text, possibly empty.
    pub text: String,
    /// Fill color.
    pub color: Rgba8,
    /// Resolved font size (panel, default, fallback).
    pub font_size_pt: f64,
    /// Whether the panel itself pinned the font size; otherwise it is auto-fitted.
    pub explicit_size: bool,
    /// Family name or list.
    pub font_family: String,
    /// Font weight.
    pub weight: u16,
    /// Italic style.
    pub italic: bool,
    /// Outline width, `>= 0`.
    pub stroke_width: f64,
    /// Outline color.
    pub stroke_color: Rgba8,
    /// Horizontal position clamped to `[-100, 100]`.
    pub pos_x: f64,
    /// Vertical position clamped to `[-100, 100]`.
    pub pos_y: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
}

impl ResolvedCaption {
    /// Resolve `spec` over `defaults`. A missing spec resolves to defaults with empty text.
    pub fn resolve(spec: Option<&CaptionSpec>, defaults: &DefaultCaptionStyle) -> Self {
        let empty = CaptionSpec::default();
        let spec = spec.unwrap_or(&empty);

        let positive = |v: Option<f64>| v.filter(|x| x.is_finite() && *x > 0.0);
        let explicit = positive(spec.font_size_pt);
        let font_size_pt = explicit
            .or_else(|| positive(defaults.font_size_pt))
            .unwrap_or(FALLBACK_FONT_SIZE_PT);

        let pos = |v: Option<f64>| clamp_finite(v.unwrap_or(0.0), -100.0, 100.0, 0.0);

        Self {
            text: spec.text.clone().unwrap_or_default(),
            color: spec.color.or(defaults.color).unwrap_or(Rgba8::WHITE),
            font_size_pt,
            explicit_size: explicit.is_some(),
            font_family: spec
                .font_family
                .clone()
                .or_else(|| defaults.font_family.clone())
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_FONT_FAMILY.to_string()),
            weight: spec
                .weight
                .or(defaults.weight)
                .unwrap_or(FALLBACK_WEIGHT)
                .clamp(1, 1000),
            italic: spec.italic.or(defaults.italic).unwrap_or(false),
            stroke_width: spec
                .stroke_width
                .or(defaults.stroke_width)
                .filter(|w| w.is_finite())
                .unwrap_or(FALLBACK_STROKE_WIDTH)
                .max(0.0),
            stroke_color: spec
                .stroke_color
                .or(defaults.stroke_color)
                .unwrap_or(Rgba8::BLACK),
            pos_x: pos(spec.pos_x.or(defaults.pos_x)),
            pos_y: pos(spec.pos_y.or(defaults.pos_y)),
            rotation_deg: spec
                .rotation_deg
                .or(defaults.rotation_deg)
                .filter(|r| r.is_finite())
                .unwrap_or(0.0),
        }
    }

    /// Whether the caption has visible text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/caption.rs"]
mod tests;
