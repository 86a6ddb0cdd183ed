//! Raster bit-image command (`GS v 0`).
//!
//! Frame: `1D 76 30 m xL xH yL yH d1..dk`, where `x` is the row width in
//! bytes and `y` the row count, both little-endian.

use thermal_image::PrinterImage;
use tracing::debug;

use crate::{EscPosError, Result};

pub const ESC: u8 = 0x1b;
pub const GS: u8 = 0x1d;

/// `GS v 0` opcode bytes.
const RASTER_OPCODE: [u8; 3] = [GS, 0x76, 0x30];

/// Normal density, no scaling.
const MODE_NORMAL: u8 = 0x00;

/// Split a value into its little-endian low/high byte pair.
fn u16_le(field: &'static str, value: usize) -> Result<[u8; 2]> {
    let v = u16::try_from(value).map_err(|_| EscPosError::DimensionOverflow { field, value })?;
    Ok(v.to_le_bytes())
}

/// Wrap packed raster bytes in a `GS v 0` command.
///
/// `width_px` is the image width in dots; the header carries it as
/// `ceil(width_px / 8)` bytes. `raster` must hold exactly that many bytes
/// per row for `height` rows.
pub fn raster_command(raster: &[u8], width_px: u32, height: u32) -> Result<Vec<u8>> {
    if raster.is_empty() {
        return Err(EscPosError::EmptyRaster);
    }
    let row_bytes = thermal_image::bytes_per_row(width_px);
    let expected = row_bytes * height as usize;
    if raster.len() != expected {
        return Err(EscPosError::InvalidRasterSize {
            expected,
            actual: raster.len(),
        });
    }

    let x = u16_le("width", row_bytes)?;
    let y = u16_le("height", height as usize)?;

    let mut buf = Vec::with_capacity(8 + raster.len());
    buf.extend_from_slice(&RASTER_OPCODE);
    buf.push(MODE_NORMAL);
    buf.extend_from_slice(&x);
    buf.extend_from_slice(&y);
    buf.extend_from_slice(raster);

    debug!(width_px, height, bytes = buf.len(), "Built raster command");
    Ok(buf)
}

/// Build the `GS v 0` command for the current state of a printer image.
pub fn image_raster_command(image: &PrinterImage) -> Result<Vec<u8>> {
    raster_command(&image.raster(), image.width(), image.height())
}
