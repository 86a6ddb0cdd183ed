//! Bit-packing of a binarized bitmap into print-head raster rows.
//!
//! Each output byte covers up to 8 consecutive columns, MSB first:
//! bit 7 is the leftmost column of the run. Unused trailing bits of a
//! partial run stay 0. Rows are emitted top to bottom.

use tracing::debug;

use crate::grid::PixelGrid;
use crate::pixel::Pixel;

/// Number of packed bytes per raster row for a given pixel width.
pub fn bytes_per_row(width: u32) -> usize {
    width.div_ceil(8) as usize
}

/// Pack one row of pixels (dark = 1) into MSB-first bytes.
fn pack_row(row: &[Pixel]) -> impl Iterator<Item = u8> + '_ {
    row.chunks(8).map(|chunk| {
        chunk
            .iter()
            .enumerate()
            .filter(|(_, px)| px.is_dark())
            .fold(0u8, |byte, (i, _)| byte | (0x80 >> i))
    })
}

/// Pack a whole grid into a raster buffer of `height * ceil(width / 8)` bytes.
pub fn rasterize(grid: &PixelGrid) -> Vec<u8> {
    let (width, height) = grid.dimensions();
    let mut out = Vec::with_capacity(bytes_per_row(width) * height as usize);
    if width == 0 {
        return out;
    }
    for row in grid.rows() {
        out.extend(pack_row(row));
    }
    debug!(width, height, bytes = out.len(), "Rasterized bitmap");
    out
}
