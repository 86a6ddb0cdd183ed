//! Container decode/encode seam.
//!
//! The dithering and packing code only ever sees [`PixelGrid`]s; turning
//! bytes into pixels (and back) goes through an [`ImageCodec`].

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::grid::PixelGrid;
use crate::{ImagingError, Result};

/// Converts between encoded image bytes and a [`PixelGrid`].
pub trait ImageCodec: Send + Sync {
    /// Decode container bytes into 32-bit ARGB pixels.
    fn decode(&self, bytes: &[u8]) -> Result<PixelGrid>;

    /// Encode pixels into container bytes.
    fn encode(&self, grid: &PixelGrid) -> Result<Vec<u8>>;
}

/// [`ImageCodec`] backed by the `image` crate.
///
/// Decoding sniffs the container format; encoding writes `format`
/// (PNG unless configured otherwise).
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateCodec {
    format: ImageFormat,
}

impl ImageCrateCodec {
    pub fn new(format: ImageFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

impl Default for ImageCrateCodec {
    fn default() -> Self {
        Self::new(ImageFormat::Png)
    }
}

impl ImageCodec for ImageCrateCodec {
    fn decode(&self, bytes: &[u8]) -> Result<PixelGrid> {
        if bytes.is_empty() {
            return Err(ImagingError::Decode("image data is empty".into()));
        }
        let img = image::load_from_memory(bytes)
            .map_err(|e| ImagingError::Decode(e.to_string()))?;
        let rgba = img.to_rgba8();
        debug!(
            width = rgba.width(),
            height = rgba.height(),
            "Decoded image"
        );
        Ok(PixelGrid::from(&rgba))
    }

    fn encode(&self, grid: &PixelGrid) -> Result<Vec<u8>> {
        let rgba = RgbaImage::from(grid);
        let mut out = Cursor::new(Vec::new());
        rgba.write_to(&mut out, self.format)
            .map_err(|e| ImagingError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}
