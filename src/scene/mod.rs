//! JSON scene payload: template choice, output size, bindings, transforms and captions.

/// Scene model and loaders.
pub mod model;
