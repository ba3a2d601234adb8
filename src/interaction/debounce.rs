use std::time::{Duration, Instant};

/// Default quiet period before a coalesced re-render.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(10);

/// Coalesces bursts of transform/caption edits into a single re-render.
///
/// Time is passed in explicitly so callers can drive it from their own clock.
#[derive(Clone, Debug)]
pub struct RenderDebouncer {
    window: Duration,
    last_edit: Option<Instant>,
    coalesced: u32,
}

impl Default for RenderDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl RenderDebouncer {
    /// Debouncer with a custom quiet period.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_edit: None,
            coalesced: 0,
        }
    }

    /// Record an edit at `now`.
    pub fn note_edit(&mut self, now: Instant) {
        self.last_edit = Some(now);
        self.coalesced = self.coalesced.saturating_add(1);
    }

    /// Whether edits are waiting for a render.
    pub fn is_pending(&self) -> bool {
        self.last_edit.is_some()
    }

    /// Time left until the pending render becomes due, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.last_edit
            .map(|t| self.window.saturating_sub(now.saturating_duration_since(t)))
    }

    /// Returns `true` exactly once per burst, when the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.remaining(now) {
            Some(left) if left.is_zero() => {
                tracing::trace!(edits = self.coalesced, "debounced render due");
                self.last_edit = None;
                self.coalesced = 0;
                true
            }
            _ => false,
        }
    }

    /// Force any pending render to be due now (e.g. on resize). Returns whether one was pending.
    pub fn flush(&mut self) -> bool {
        let pending = self.last_edit.take().is_some();
        self.coalesced = 0;
        pending
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/debounce.rs"]
mod tests;
