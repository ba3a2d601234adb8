/// Shared value types: panel ids, canvas size, colors, render mode.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
