//! Template parsing and panel rectangle resolution.

/// Built-in named templates.
pub mod registry;
/// Track weights to pixel rectangles; hit testing.
pub mod solver;
/// Template descriptors and track-list parsing.
pub mod template;
