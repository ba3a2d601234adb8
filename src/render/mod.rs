//! CPU compositing of panels, images and captions into a frame.

/// The compositor and its settings.
pub mod compositor;
/// Cover-fit image mapping.
pub mod cover;
/// Output frame type.
pub mod frame;
