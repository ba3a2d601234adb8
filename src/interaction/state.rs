use std::collections::BTreeMap;

use crate::{foundation::core::PanelId, text::caption::CaptionSpec};

/// Smallest scale a gesture may produce.
pub const MIN_SCALE: f64 = 0.1;
/// Largest scale a gesture may produce.
pub const MAX_SCALE: f64 = 5.0;

/// Per-panel image transform applied on top of cover fitting.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelTransform {
    /// Uniform zoom, `> 0`.
    pub scale: f64,
    /// Horizontal offset in output pixels.
    pub translate_x: f64,
    /// Vertical offset in output pixels.
    pub translate_y: f64,
}

impl Default for PanelTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
        }
    }
}

impl PanelTransform {
    /// Scale sanitized for drawing: non-finite or non-positive values fall back to 1.
    pub fn effective_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }

    /// Copy translated by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            translate_x: self.translate_x + dx,
            translate_y: self.translate_y + dy,
            ..self
        }
    }

    /// Copy with `scale` clamped into `[MIN_SCALE, MAX_SCALE]`.
    pub fn with_scale(self, scale: f64) -> Self {
        Self {
            scale: crate::foundation::math::clamp_finite(scale, MIN_SCALE, MAX_SCALE, self.scale),
            ..self
        }
    }
}

/// Caller-owned transform map keyed by panel id.
pub type TransformMap = BTreeMap<PanelId, PanelTransform>;
/// Caller-owned caption map keyed by panel id.
pub type CaptionMap = BTreeMap<PanelId, CaptionSpec>;

/// A state change requested by the engine. The caller applies it to its own store.
#[derive(Clone, Debug, PartialEq)]
pub enum PanelIntent {
    /// Replace the transform of `panel`.
    TransformChanged {
        /// Target panel.
        panel: PanelId,
        /// New transform.
        transform: PanelTransform,
    },
    /// Replace the caption of `panel`.
    CaptionChanged {
        /// Target panel.
        panel: PanelId,
        /// New caption.
        caption: CaptionSpec,
    },
    /// A pointer-down landed on `panel`.
    PanelActivated {
        /// Panel index in layout order.
        index: usize,
        /// Target panel.
        panel: PanelId,
    },
}

impl PanelIntent {
    /// Forward this intent to the matching sink callback.
    pub fn dispatch<S: PanelSink + ?Sized>(self, sink: &mut S) {
        match self {
            Self::TransformChanged { panel, transform } => {
                sink.on_panel_transform_change(&panel, transform)
            }
            Self::CaptionChanged { panel, caption } => sink.on_panel_text_change(&panel, &caption),
            Self::PanelActivated { index, panel } => sink.on_panel_activated(index, &panel),
        }
    }
}

/// Update callbacks: the engine's only write channel into external state.
pub trait PanelSink {
    /// A panel transform changed.
    fn on_panel_transform_change(&mut self, panel: &PanelId, transform: PanelTransform);

    /// A panel caption changed.
    fn on_panel_text_change(&mut self, panel: &PanelId, caption: &CaptionSpec);

    /// A panel was selected by a pointer-down.
    fn on_panel_activated(&mut self, _index: usize, _panel: &PanelId) {}
}

/// Dispatch every intent in order.
pub fn dispatch_all<S: PanelSink + ?Sized>(
    intents: impl IntoIterator<Item = PanelIntent>,
    sink: &mut S,
) {
    for intent in intents {
        intent.dispatch(sink);
    }
}

/// A minimal caller-side store for transforms, captions and the active selection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PanelState {
    /// Transform per panel.
    pub transforms: TransformMap,
    /// Caption per panel.
    pub captions: CaptionMap,
    /// Most recently activated panel.
    pub active: Option<(usize, PanelId)>,
}

impl PanelState {
    /// Apply a batch of intents.
    pub fn apply(&mut self, intents: impl IntoIterator<Item = PanelIntent>) {
        dispatch_all(intents, self);
    }

    /// Current transform of `panel`, default when unset.
    pub fn transform(&self, panel: &PanelId) -> PanelTransform {
        self.transforms.get(panel).copied().unwrap_or_default()
    }
}

impl PanelSink for PanelState {
    fn on_panel_transform_change(&mut self, panel: &PanelId, transform: PanelTransform) {
        self.transforms.insert(panel.clone(), transform);
    }

    fn on_panel_text_change(&mut self, panel: &PanelId, caption: &CaptionSpec) {
        self.captions.insert(panel.clone(), caption.clone());
    }

    fn on_panel_activated(&mut self, index: usize, panel: &PanelId) {
        self.active = Some((index, panel.clone()));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/state.rs"]
mod tests;
