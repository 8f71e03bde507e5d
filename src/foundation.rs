/// Canvas, colors and geometry re-exports.
pub mod core;
/// Crate error type.
pub mod error;
/// Small numeric helpers.
pub mod math;
