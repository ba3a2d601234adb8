//! panelgrid composites images and captions into a single raster collage.
//!
//! A collage is a grid template (column/row weights, optionally with named areas), one image per
//! panel with a user-adjustable zoom and pan, and an optional caption per panel that wraps and
//! sizes itself to fit.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `Template + size + panel count -> Vec<PanelRect>` (deterministic, never fails)
//! 2. **Interact**: pointer/touch events + rectangles -> `PanelIntent`s the caller applies
//! 3. **Lay out captions**: caption descriptors + defaults -> wrapped, sized, anchored lines
//! 4. **Composite**: rectangles + bitmaps + transforms + captions -> `FrameRGBA` (CPU)
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Caller-owned state**: transform and caption maps are passed in by reference; the engine
//!   only emits intents describing changes.
//! - **No IO in the compositor**: images are decoded and fonts registered up front.
//! - **Premultiplied RGBA8** end-to-end.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod interaction;
mod layout;
mod render;
mod scene;
mod text;

pub use assets::decode::{PreparedImage, decode_image, load_image};
pub use assets::fonts::{FontBook, ParleyMeasure};
pub use foundation::core::{Affine, BezPath, Canvas, PanelId, Point, Rect, RenderMode, Rgba8, Vec2};
pub use foundation::error::{PanelGridError, PanelGridResult};
pub use interaction::controller::InteractionController;
pub use interaction::debounce::{DEFAULT_DEBOUNCE, RenderDebouncer};
pub use interaction::gesture::{GestureState, pinch_scale};
pub use interaction::state::{
    CaptionMap, MAX_SCALE, MIN_SCALE, PanelIntent, PanelSink, PanelState, PanelTransform,
    TransformMap, dispatch_all,
};
pub use layout::registry::TemplateRegistry;
pub use layout::solver::{PanelRect, hit_test, resolve_descriptor, resolve_panels};
pub use layout::template::{
    GridArea, GridTemplate, MAX_TRACKS, TemplateDescriptor, parse_track_list,
};
pub use render::compositor::{Border, CollageInput, Compositor, CompositorSettings};
pub use render::cover::{cover_scale, image_affine};
pub use render::frame::FrameRGBA;
pub use scene::model::{AspectRatio, Scene};
pub use text::anchor::{CaptionPlacement, horizontal_center, place_caption, vertical_anchor};
pub use text::caption::{CaptionSpec, DefaultCaptionStyle, ResolvedCaption};
pub use text::engine::{CaptionLayout, CaptionOptions, layout_caption};
pub use text::fit::{
    FittedText, MAX_AUTO_SIZE, MIN_AUTO_SIZE, fit_font_size, line_height, wrap_text,
};
pub use text::measure::{ApproxMeasure, FontQuery, TextMeasure};
