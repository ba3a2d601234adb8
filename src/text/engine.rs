use crate::{
    foundation::core::{RenderMode, Vec2},
    layout::solver::PanelRect,
    text::{
        anchor::{CaptionPlacement, place_caption},
        caption::{CaptionSpec, DefaultCaptionStyle, ResolvedCaption},
        fit::{fit_font_size, wrap_text},
        measure::{FontQuery, TextMeasure},
    },
};

/// Panel-independent inputs for caption layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionOptions<'a> {
    /// Inset from the panel edges, in pixels.
    pub padding: f64,
    /// Text shown for an empty caption in interactive renders.
    pub placeholder_text: &'a str,
    /// Alpha multiplier applied to placeholder colors.
    pub placeholder_opacity: f64,
    /// Multiplier for explicit font sizes (surface height over reference height).
    pub font_scale: f64,
}

impl Default for CaptionOptions<'_> {
    fn default() -> Self {
        Self {
            padding: 10.0,
            placeholder_text: "Add Caption",
            placeholder_opacity: 0.5,
            font_scale: 1.0,
        }
    }
}

/// A caption ready to draw: resolved style, wrapped lines, size and placement.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionLayout {
    /// Resolved style. Colors are already dimmed for placeholders.
    pub style: ResolvedCaption,
    /// Lines in draw order.
    pub lines: Vec<String>,
    /// Font size in pixels.
    pub size_px: f64,
    /// Block position inside the panel.
    pub placement: CaptionPlacement,
    /// Whether this is the editor placeholder rather than user text.
    pub placeholder: bool,
}

impl CaptionLayout {
    /// Font query matching this layout.
    pub fn font_query(&self) -> FontQuery<'_> {
        FontQuery {
            family: &self.style.font_family,
            size_px: self.size_px,
            weight: self.style.weight,
            italic: self.style.italic,
        }
    }
}

/// Lay out the caption for one panel.
///
/// Returns `None` when nothing should be drawn: the panel has no image, or the caption is empty
/// in an export render.
pub fn layout_caption(
    panel: &PanelRect,
    caption: Option<&CaptionSpec>,
    defaults: &DefaultCaptionStyle,
    has_image: bool,
    mode: RenderMode,
    opts: &CaptionOptions<'_>,
    measure: &mut dyn TextMeasure,
) -> Option<CaptionLayout> {
    if !has_image {
        return None;
    }

    let mut style = ResolvedCaption::resolve(caption, defaults);
    let placeholder = !style.has_text();
    if placeholder {
        if mode == RenderMode::Export || opts.placeholder_text.trim().is_empty() {
            return None;
        }
        style.text = opts.placeholder_text.to_string();
        style.color = style.color.with_alpha_mul(opts.placeholder_opacity);
        style.stroke_color = style.stroke_color.with_alpha_mul(opts.placeholder_opacity);
    }

    let rect = panel.rect();
    let font = FontQuery {
        family: &style.font_family,
        size_px: style.font_size_pt,
        weight: style.weight,
        italic: style.italic,
    };
    let (size_px, lines) = if style.explicit_size {
        let size = style.font_size_pt * opts.font_scale.max(0.0);
        let max_width = (rect.width() - 2.0 * opts.padding).max(0.0);
        let lines = wrap_text(&style.text, max_width, &font.with_size(size), measure);
        (size, lines)
    } else {
        let fitted = fit_font_size(
            &style.text,
            rect.width(),
            rect.height(),
            opts.padding,
            &font,
            measure,
        );
        (fitted.size_px, fitted.lines)
    };

    let placement = place_caption(
        rect,
        Vec2::new(style.pos_x, style.pos_y),
        style.rotation_deg,
        lines.len(),
        size_px,
        opts.padding,
    );
    tracing::trace!(
        panel = %panel.id,
        size_px,
        lines = lines.len(),
        placeholder,
        "caption laid out"
    );

    Some(CaptionLayout {
        style,
        lines,
        size_px,
        placement,
        placeholder,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
