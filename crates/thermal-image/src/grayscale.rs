//! Luma-weighted binarization of a single pixel.

use crate::pixel::Pixel;

/// Perceived brightness of a pixel, truncated to a byte.
pub fn luma(px: Pixel) -> u8 {
    (0.299 * f64::from(px.r) + 0.587 * f64::from(px.g) + 0.114 * f64::from(px.b)) as u8
}

/// Reduce a pixel to pure black or white.
///
/// Luma strictly below `threshold` becomes black, everything else white.
/// Alpha is passed through unchanged.
pub fn binarize(px: Pixel, threshold: u8) -> Pixel {
    let level = if luma(px) < threshold { 0 } else { 255 };
    Pixel::new(px.a, level, level, level)
}
