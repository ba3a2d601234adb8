use crate::text::measure::{FontQuery, TextMeasure};

/// Largest size the auto-fit will start from.
pub const MAX_AUTO_SIZE: f64 = 48.0;
/// Floor size used when nothing larger fits.
pub const MIN_AUTO_SIZE: f64 = 8.0;
/// Decrement between auto-fit candidates.
pub const AUTO_SIZE_STEP: f64 = 2.0;
/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;
/// Largest share of the panel height a fitted caption block may take.
pub const MAX_BLOCK_FRACTION: f64 = 0.4;
/// Starting size as a share of the panel height.
const START_SIZE_FRACTION: f64 = 0.12;

/// Wrapped lines at a chosen font size.
#[derive(Clone, Debug, PartialEq)]
pub struct FittedText {
    /// Font size in pixels.
    pub size_px: f64,
    /// Lines in draw order.
    pub lines: Vec<String>,
}

impl FittedText {
    /// Distance between consecutive baselines.
    pub fn line_height(&self) -> f64 {
        line_height(self.size_px)
    }

    /// Height of the whole block.
    pub fn block_height(&self) -> f64 {
        self.lines.len() as f64 * self.line_height()
    }
}

/// Line height for a font size.
pub fn line_height(size_px: f64) -> f64 {
    size_px * LINE_HEIGHT_FACTOR
}

/// Greedy word wrap.
///
/// `\n` always breaks (empty lines are kept). Words are packed while the line stays within
/// `max_width`; a word wider than `max_width` gets a line of its own.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    font: &FontQuery<'_>,
    measure: &mut dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if measure.width_of(&candidate, font) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    lines
}

/// Pick the largest candidate size whose wrapped block fits the panel.
pub fn fit_font_size(
    text: &str,
    panel_width: f64,
    panel_height: f64,
    padding: f64,
    font: &FontQuery<'_>,
    measure: &mut dyn TextMeasure,
) -> FittedText {
    let max_width = (panel_width - 2.0 * padding).max(0.0);
    let max_block = panel_height.max(0.0) * MAX_BLOCK_FRACTION;
    let start = crate::foundation::math::clamp_finite(
        panel_height * START_SIZE_FRACTION,
        MIN_AUTO_SIZE,
        MAX_AUTO_SIZE,
        MIN_AUTO_SIZE,
    );

    let mut size = start;
    while size >= MIN_AUTO_SIZE {
        let lines = wrap_text(text, max_width, &font.with_size(size), measure);
        let fitted = FittedText {
            size_px: size,
            lines,
        };
        if fitted.block_height() <= max_block {
            return fitted;
        }
        size -= AUTO_SIZE_STEP;
    }

    tracing::debug!(panel_height, "caption does not fit; using floor size");
    FittedText {
        size_px: MIN_AUTO_SIZE,
        lines: wrap_text(text, max_width, &font.with_size(MIN_AUTO_SIZE), measure),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
