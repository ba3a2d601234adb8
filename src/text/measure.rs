/// Font selection passed to a [`TextMeasure`] oracle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontQuery<'a> {
    /// CSS-style family name or list.
    pub family: &'a str,
    /// Font size in pixels.
    pub size_px: f64,
    /// Font weight.
    pub weight: u16,
    /// Italic style.
    pub italic: bool,
}

impl<'a> FontQuery<'a> {
    /// Query for `family` at `size_px`, regular weight, upright.
    pub fn new(family: &'a str, size_px: f64) -> Self {
        Self {
            family,
            size_px,
            weight: 400,
            italic: false,
        }
    }

    /// Same query at a different size.
    pub fn with_size(self, size_px: f64) -> Self {
        Self { size_px, ..self }
    }
}

/// Width-of-string oracle used by wrapping and auto-fit.
///
/// Any `FnMut(&str, &FontQuery) -> f64` closure is a measure.
pub trait TextMeasure {
    /// Advance width of `text` set in `font`, in pixels.
    fn width_of(&mut self, text: &str, font: &FontQuery<'_>) -> f64;
}

impl<F> TextMeasure for F
where
    F: FnMut(&str, &FontQuery<'_>) -> f64,
{
    fn width_of(&mut self, text: &str, font: &FontQuery<'_>) -> f64 {
        self(text, font)
    }
}

/// Font-free estimate: every character advances a fixed fraction of the em.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxMeasure {
    /// Advance per character, in ems.
    pub advance_em: f64,
}

impl Default for ApproxMeasure {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasure for ApproxMeasure {
    fn width_of(&mut self, text: &str, font: &FontQuery<'_>) -> f64 {
        let bold = if font.weight >= 600 { 1.05 } else { 1.0 };
        text.chars().count() as f64 * font.size_px * self.advance_em * bold
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/measure.rs"]
mod tests;
