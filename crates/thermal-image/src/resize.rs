//! Byte-aligned resizing for thermal printer output.
//!
//! Target dimensions are always rounded up to a multiple of 8 so every
//! raster row fills whole print-head bytes.

use image::RgbaImage;
use image::imageops::{self, FilterType};
use tracing::debug;

use crate::grid::PixelGrid;
use crate::{BYTE_ALIGNMENT, ImagingError, Result};

/// Round `value` up to the next multiple of `n`.
///
/// Zero rounds up to `n` so a derived dimension never collapses. Fails when
/// the aligned value does not fit in a `u32`.
pub fn round_up(value: u32, n: u32) -> Result<u32> {
    if n == 0 {
        return Ok(0);
    }
    if value == 0 {
        return Ok(n);
    }
    value
        .div_ceil(n)
        .checked_mul(n)
        .ok_or_else(|| ImagingError::Dimension(format!("{value} cannot be aligned to {n}")))
}

/// Compute the final dimensions of a resize request.
///
/// With `maintain_aspect_ratio`, a non-zero `width` wins and the height is
/// scaled to match; otherwise a non-zero `height` drives the width. Without
/// it, both dimensions must be non-zero. Results are byte-aligned.
pub fn target_dimensions(
    current: (u32, u32),
    width: u32,
    height: u32,
    maintain_aspect_ratio: bool,
) -> Result<(u32, u32)> {
    let (cur_w, cur_h) = current;

    let (w, h) = if maintain_aspect_ratio {
        if cur_w == 0 || cur_h == 0 {
            return Err(ImagingError::Dimension(
                "cannot keep the aspect ratio of an empty image".into(),
            ));
        }
        if width > 0 {
            let scalar = 1.0 / (cur_w as f32 / width as f32);
            (width, (cur_h as f32 * scalar) as u32)
        } else if height > 0 {
            let scalar = 1.0 / (cur_h as f32 / height as f32);
            ((cur_w as f32 * scalar) as u32, height)
        } else {
            return Err(ImagingError::Dimension(
                "width or height must be non-zero".into(),
            ));
        }
    } else {
        if width == 0 || height == 0 {
            return Err(ImagingError::Dimension(
                "width and height must both be non-zero".into(),
            ));
        }
        (width, height)
    };

    let w = round_up(w, BYTE_ALIGNMENT)?;
    let h = round_up(h, BYTE_ALIGNMENT)?;

    // RGBA buffer length must be addressable.
    (w as usize)
        .checked_mul(h as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| ImagingError::Dimension(format!("{w}x{h} is too large")))?;

    Ok((w, h))
}

/// Resize a grid to exactly `width` x `height`.
///
/// Uses Lanczos3 filtering. Returns a copy when the size already matches.
pub fn resize_exact(grid: &PixelGrid, width: u32, height: u32) -> PixelGrid {
    let (orig_w, orig_h) = grid.dimensions();

    if (orig_w, orig_h) == (width, height) {
        debug!(width, height, "Image already at target size, skipping resize");
        return grid.clone();
    }

    debug!(
        orig_w,
        orig_h,
        new_width = width,
        new_height = height,
        "Resizing image"
    );

    let src = RgbaImage::from(grid);
    let resized = imageops::resize(&src, width, height, FilterType::Lanczos3);
    PixelGrid::from(&resized)
}
