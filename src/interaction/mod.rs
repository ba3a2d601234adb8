//! Pointer and touch gestures turned into per-panel transform and caption edits.

/// Pointer/touch event handling.
pub mod controller;
/// Re-render coalescing.
pub mod debounce;
/// Gesture state machine.
pub mod gesture;
/// Transforms, intents and sinks.
pub mod state;
