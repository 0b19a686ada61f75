/// RGB8 bitmaps and bounds-checked region copies.
pub mod bitmap;
/// Aspect-preserving resize helpers.
pub mod scale;
