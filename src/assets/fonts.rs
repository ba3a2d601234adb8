use std::{borrow::Cow, path::Path};

use anyhow::Context;

use crate::{
    foundation::error::{PanelGridError, PanelGridResult},
    text::measure::{ApproxMeasure, FontQuery, TextMeasure},
};

/// Registered caption fonts plus the Parley contexts used to shape with them.
///
/// Only fonts registered here are used; no system fonts are loaded. A requested family that is
/// not registered falls back to the first registered family.
pub struct FontBook {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    families: Vec<String>,
}

impl Default for FontBook {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.families)
            .finish_non_exhaustive()
    }
}

impl FontBook {
    /// Empty book with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: Vec::new(),
        }
    }

    /// Register font bytes (TTF/OTF/collection). Returns the family names they provide.
    pub fn register(&mut self, bytes: Vec<u8>) -> PanelGridResult<Vec<String>> {
        let registered = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes), None);
        if registered.is_empty() {
            return Err(PanelGridError::validation(
                "no font families registered from font bytes",
            ));
        }

        let mut names = Vec::with_capacity(registered.len());
        for (family_id, _) in registered {
            let name = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| PanelGridError::validation("registered font family has no name"))?
                .to_string();
            if !self.families.iter().any(|f| f.eq_ignore_ascii_case(&name)) {
                tracing::debug!(family = %name, "font family registered");
                self.families.push(name.clone());
            }
            names.push(name);
        }
        Ok(names)
    }

    /// Read and register a font file.
    pub fn load_file(&mut self, path: &Path) -> PanelGridResult<Vec<String>> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        self.register(bytes)
    }

    /// Whether no fonts are registered.
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Registered family names, in registration order.
    pub fn families(&self) -> &[String] {
        &self.families
    }

    /// CSS font stack for a requested family list, restricted to registered families.
    pub(crate) fn stack_for(&self, requested: &str) -> Option<String> {
        let known = requested
            .split(',')
            .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\''))
            .filter_map(|f| self.families.iter().find(|r| r.eq_ignore_ascii_case(f)));
        let fallback = self.families.first()?;
        let mut stack: Vec<&String> = known.collect();
        if !stack.contains(&fallback) {
            stack.push(fallback);
        }
        Some(
            stack
                .iter()
                .map(|f| format!("\"{f}\""))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    /// Shape a single unwrapped line. `None` when no fonts are registered.
    pub fn shape_line(&mut self, text: &str, font: &FontQuery<'_>) -> Option<parley::Layout<()>> {
        let stack = self.stack_for(font.family)?;
        if !font.size_px.is_finite() || font.size_px <= 0.0 {
            return None;
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(stack)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px as f32));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(font.weight)),
        ));
        if font.italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Some(layout)
    }

    /// Measuring oracle backed by this book.
    pub fn measure(&mut self) -> ParleyMeasure<'_> {
        ParleyMeasure {
            book: self,
            fallback: ApproxMeasure::default(),
        }
    }
}

/// [`TextMeasure`] that shapes with registered fonts, estimating when none are registered.
#[derive(Debug)]
pub struct ParleyMeasure<'a> {
    book: &'a mut FontBook,
    fallback: ApproxMeasure,
}

impl TextMeasure for ParleyMeasure<'_> {
    fn width_of(&mut self, text: &str, font: &FontQuery<'_>) -> f64 {
        match self.book.shape_line(text, font) {
            Some(layout) => f64::from(layout.width()),
            None => self.fallback.width_of(text, font),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
