use crate::foundation::core::{PanelId, Point};

/// Ephemeral gesture bookkeeping for the panel under manipulation.
///
/// Nothing here outlives a gesture: every transition back to [`GestureState::Idle`] drops it.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Single pointer translating a panel image.
    Dragging {
        /// Panel under the pointer at gesture start.
        panel: PanelId,
        /// Pointer position at the previous event.
        last: Point,
    },
    /// Two touches scaling a panel image.
    Pinching {
        /// Panel being scaled.
        panel: PanelId,
        /// Touch distance when the pinch began.
        start_distance: f64,
        /// Panel scale when the pinch began.
        start_scale: f64,
    },
}

impl GestureState {
    /// Start a drag at `at`.
    pub fn drag(panel: PanelId, at: Point) -> Self {
        Self::Dragging { panel, last: at }
    }

    /// Start a pinch between `a` and `b` from scale `start_scale`.
    pub fn pinch(panel: PanelId, a: Point, b: Point, start_scale: f64) -> Self {
        Self::Pinching {
            panel,
            start_distance: a.distance(b),
            start_scale,
        }
    }

    /// Panel targeted by the current gesture.
    pub fn panel(&self) -> Option<&PanelId> {
        match self {
            Self::Idle => None,
            Self::Dragging { panel, .. } | Self::Pinching { panel, .. } => Some(panel),
        }
    }

    /// Whether no gesture is active.
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Pinching { .. } => "pinching",
        }
    }
}

/// Pinch scale for the current touch distance: `clamp(s0 * d / d0, min, max)`.
///
/// Returns `None` when the starting distance is degenerate.
pub fn pinch_scale(
    start_scale: f64,
    start_distance: f64,
    current_distance: f64,
    min: f64,
    max: f64,
) -> Option<f64> {
    if !(start_distance.is_finite() && start_distance > 0.0) || !current_distance.is_finite() {
        return None;
    }
    Some((start_scale * current_distance / start_distance).clamp(min, max))
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/gesture.rs"]
mod tests;
