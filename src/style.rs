/// Straight-alpha colors.
pub mod color;
/// Node roles, styles and relation colors.
pub mod palette;
