/// Straight and premultiplied float colors.
pub mod color;
/// Error taxonomy and result alias.
pub mod error;
