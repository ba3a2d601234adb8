use crate::{
    foundation::core::{PanelId, Point},
    interaction::{
        gesture::{GestureState, pinch_scale},
        state::{CaptionMap, MAX_SCALE, MIN_SCALE, PanelIntent, PanelTransform, TransformMap},
    },
    layout::solver::{PanelRect, hit_test},
    text::caption::CaptionSpec,
};

/// Turns pointer and touch events into panel intents.
///
/// The controller reads the caller's transform map and the current rectangles; it never writes
/// caller state directly. Each handler returns the intents produced by that event, which the
/// caller should apply before delivering the next event.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    state: GestureState,
}

impl InteractionController {
    /// Controller in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture state.
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    fn transition(&mut self, next: GestureState) {
        if self.state.name() != next.name() {
            tracing::trace!(from = self.state.name(), to = next.name(), "gesture transition");
        }
        self.state = next;
    }

    /// Pointer pressed. Always discards any previous gesture.
    pub fn pointer_down(&mut self, at: Point, panels: &[PanelRect]) -> Vec<PanelIntent> {
        match hit_test(panels, at) {
            Some(hit) => {
                self.transition(GestureState::drag(hit.id.clone(), at));
                vec![PanelIntent::PanelActivated {
                    index: hit.index,
                    panel: hit.id.clone(),
                }]
            }
            None => {
                self.transition(GestureState::Idle);
                Vec::new()
            }
        }
    }

    /// Pointer moved. Drags translate by the delta from the previous event.
    pub fn pointer_move(&mut self, at: Point, transforms: &TransformMap) -> Vec<PanelIntent> {
        let GestureState::Dragging { panel, last } = &mut self.state else {
            return Vec::new();
        };
        let delta = at - *last;
        *last = at;
        if delta.x == 0.0 && delta.y == 0.0 {
            return Vec::new();
        }
        let current = current_transform(transforms, panel);
        vec![PanelIntent::TransformChanged {
            panel: panel.clone(),
            transform: current.translated(delta.x, delta.y),
        }]
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) {
        self.transition(GestureState::Idle);
    }

    /// Drop any gesture in progress.
    pub fn cancel(&mut self) {
        self.transition(GestureState::Idle);
    }

    /// Touches began; `touches` lists every active touch point.
    ///
    /// One touch behaves like a pointer-down. A second touch turns the current drag (or the panel
    /// under the first touch) into a pinch.
    pub fn touch_start(
        &mut self,
        touches: &[Point],
        panels: &[PanelRect],
        transforms: &TransformMap,
    ) -> Vec<PanelIntent> {
        match touches {
            [] => {
                self.transition(GestureState::Idle);
                Vec::new()
            }
            [single] => self.pointer_down(*single, panels),
            [a, b, ..] => {
                let mut intents = Vec::new();
                let panel = match self.state.panel() {
                    Some(p) => Some(p.clone()),
                    None => hit_test(panels, *a).map(|hit| {
                        intents.push(PanelIntent::PanelActivated {
                            index: hit.index,
                            panel: hit.id.clone(),
                        });
                        hit.id.clone()
                    }),
                };
                match panel {
                    Some(panel) => {
                        let s0 = current_transform(transforms, &panel).effective_scale();
                        self.transition(GestureState::pinch(panel, *a, *b, s0));
                    }
                    None => self.transition(GestureState::Idle),
                }
                intents
            }
        }
    }

    /// Touches moved.
    pub fn touch_move(&mut self, touches: &[Point], transforms: &TransformMap) -> Vec<PanelIntent> {
        if let GestureState::Dragging { .. } = self.state {
            return match touches.first() {
                Some(first) => self.pointer_move(*first, transforms),
                None => Vec::new(),
            };
        }
        let (
            GestureState::Pinching {
                panel,
                start_distance,
                start_scale,
            },
            [a, b, ..],
        ) = (&self.state, touches)
        else {
            return Vec::new();
        };
        let Some(scale) = pinch_scale(
            *start_scale,
            *start_distance,
            a.distance(*b),
            MIN_SCALE,
            MAX_SCALE,
        ) else {
            return Vec::new();
        };
        let current = current_transform(transforms, panel);
        vec![PanelIntent::TransformChanged {
            panel: panel.clone(),
            transform: PanelTransform { scale, ..current },
        }]
    }

    /// Touches ended; `remaining` lists the touches still down.
    ///
    /// A touch-end that matches no gesture resets to idle instead of failing.
    pub fn touch_end(&mut self, remaining: &[Point], transforms: &TransformMap) {
        let next = match (&self.state, remaining) {
            (GestureState::Idle, _) => {
                tracing::debug!("touch end without active gesture; staying idle");
                GestureState::Idle
            }
            (_, []) => GestureState::Idle,
            (GestureState::Pinching { panel, .. }, [a, b, ..]) => {
                let s0 = current_transform(transforms, panel).effective_scale();
                GestureState::pinch(panel.clone(), *a, *b, s0)
            }
            (
                GestureState::Pinching { panel, .. } | GestureState::Dragging { panel, .. },
                [a, ..],
            ) => GestureState::drag(panel.clone(), *a),
        };
        self.transition(next);
    }

    /// Intent resetting `panel` to the identity transform.
    pub fn reset_transform(&self, panel: &PanelId) -> PanelIntent {
        PanelIntent::TransformChanged {
            panel: panel.clone(),
            transform: PanelTransform::default(),
        }
    }

    /// Intent carrying an edited copy of the caption of `panel`.
    pub fn edit_caption(
        &self,
        captions: &CaptionMap,
        panel: &PanelId,
        edit: impl FnOnce(&mut CaptionSpec),
    ) -> PanelIntent {
        let mut caption = captions.get(panel).cloned().unwrap_or_default();
        edit(&mut caption);
        PanelIntent::CaptionChanged {
            panel: panel.clone(),
            caption,
        }
    }
}

fn current_transform(transforms: &TransformMap, panel: &PanelId) -> PanelTransform {
    transforms.get(panel).copied().unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
