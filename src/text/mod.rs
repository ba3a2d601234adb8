//! Caption styling, wrapping, auto-fit and anchoring.

/// Caption placement inside a panel.
pub mod anchor;
/// Caption descriptors and style resolution.
pub mod caption;
/// Per-panel caption layout.
pub mod engine;
/// Word wrap and font-size fitting.
pub mod fit;
/// Width-of-string oracles.
pub mod measure;
