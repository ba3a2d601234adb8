//! Bitmap decoding and caption font registration. All IO happens here, before rendering.

/// Image decoding into premultiplied RGBA8.
pub mod decode;
/// Font registration and Parley shaping.
pub mod fonts;
