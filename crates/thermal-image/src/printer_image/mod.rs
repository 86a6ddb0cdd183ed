//! Printer image facade.
//!
//! [`PrinterImage`] owns exactly one bitmap at a time and drives it through
//! resize, dithering, inversion and export. Every mutating call validates
//! its inputs first and only then swaps in the new bitmap, so a failed call
//! leaves the previous state untouched.

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::RgbaImage;
use tracing::{debug, info};

use crate::algorithms::Algorithm;
use crate::codec::{ImageCodec, ImageCrateCodec};
use crate::grid::PixelGrid;
use crate::options::ImageOptions;
use crate::raster::{bytes_per_row, rasterize};
use crate::resize::{resize_exact, target_dimensions};
use crate::{ImagingError, Result};

/// A bitmap being prepared for a thermal print head.
pub struct PrinterImage {
    grid: PixelGrid,
    size: usize,
    inverted: bool,
    codec: Box<dyn ImageCodec>,
}

impl PrinterImage {
    /// Load an image file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ImagingError::Decode("source path must not be empty".into()));
        }
        let bytes = std::fs::read(path)
            .map_err(|e| ImagingError::Decode(format!("{}: {e}", path.display())))?;
        info!(path = %path.display(), "Loading printer image");
        Self::from_bytes(&bytes)
    }

    /// Decode an in-memory image with the default codec.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_codec(bytes, Box::new(ImageCrateCodec::default()))
    }

    /// Decode an in-memory image with a custom codec.
    pub fn from_bytes_with_codec(bytes: &[u8], codec: Box<dyn ImageCodec>) -> Result<Self> {
        let grid = codec.decode(bytes)?;
        Ok(Self::with_codec(grid, codec))
    }

    /// Wrap an already decoded grid.
    pub fn from_grid(grid: PixelGrid) -> Self {
        Self::with_codec(grid, Box::new(ImageCrateCodec::default()))
    }

    /// Wrap an already decoded grid, using `codec` for base64 and export.
    pub fn with_codec(grid: PixelGrid, codec: Box<dyn ImageCodec>) -> Self {
        Self {
            size: raster_size(&grid),
            grid,
            inverted: false,
            codec,
        }
    }

    /// Build from a base64 string produced by [`PrinterImage::to_base64`].
    pub fn from_base64(text: &str) -> Result<Self> {
        let bytes = decode_base64(text)?;
        Self::from_bytes(&bytes)
    }

    /// Width of the current bitmap in pixels.
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height of the current bitmap in pixels.
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Size in bytes of the packed raster for the current bitmap.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Packed bytes per raster row.
    pub fn bytes_per_row(&self) -> usize {
        bytes_per_row(self.width())
    }

    /// True when the colors are currently inverted relative to the source.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Current pixels.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    /// Resize to the given dimensions.
    ///
    /// With `maintain_aspect_ratio`, set exactly one of `width`/`height`
    /// (width wins if both are set). Both results are rounded up to a
    /// multiple of 8, so a 60x60 image resized to 60x60 ends up 64x64.
    ///
    /// ```no_run
    /// # use thermal_image::PrinterImage;
    /// # fn demo(img: &mut PrinterImage) -> thermal_image::Result<()> {
    /// img.resize(100, 0, true)?; // 100 wide, keep ratio
    /// img.resize(0, 400, true)?; // 400 tall, keep ratio
    /// img.resize(640, 480, false)?; // stretch
    /// # Ok(())
    /// # }
    /// ```
    pub fn resize(&mut self, width: u32, height: u32, maintain_aspect_ratio: bool) -> Result<()> {
        let (w, h) = target_dimensions(
            self.grid.dimensions(),
            width,
            height,
            maintain_aspect_ratio,
        )?;
        let resized = resize_exact(&self.grid, w, h);
        self.set_image_data(resized);
        Ok(())
    }

    /// Dither the current bitmap with a registered algorithm.
    pub fn apply_dithering(&mut self, algorithm: Algorithm, threshold: u8) -> Result<()> {
        debug!(%algorithm, threshold, "Applying dithering");
        let ditherer = algorithm.ditherer(threshold)?;
        let dithered = ditherer.generate_dithered(&self.grid);
        self.set_image_data(dithered);
        Ok(())
    }

    /// Complement the color channels, leaving alpha alone.
    ///
    /// Calling this twice restores the original colors.
    pub fn apply_color_inversion(&mut self) {
        let inverted = self.grid.map(|px| px.inverted());
        self.set_image_data(inverted);
        self.inverted = !self.inverted;
        debug!(inverted = self.inverted, "Applied color inversion");
    }

    /// Run the whole pipeline described by `options`.
    pub fn process(&mut self, options: &ImageOptions) -> Result<()> {
        // Validate everything up front so a bad option changes nothing.
        let ditherer = options.algorithm.ditherer(options.threshold)?;
        let target = if options.wants_resize() {
            Some(target_dimensions(
                self.grid.dimensions(),
                options.width,
                options.height,
                options.maintain_aspect_ratio,
            )?)
        } else {
            None
        };

        let mut grid = match target {
            Some((w, h)) => resize_exact(&self.grid, w, h),
            None => self.grid.clone(),
        };
        grid = ditherer.generate_dithered(&grid);
        if options.invert {
            grid = grid.map(|px| px.inverted());
        }

        self.set_image_data(grid);
        if options.invert {
            self.inverted = !self.inverted;
        }
        info!(
            algorithm = %options.algorithm,
            threshold = options.threshold,
            width = self.width(),
            height = self.height(),
            inverted = self.inverted,
            "Processed printer image"
        );
        Ok(())
    }

    /// Packed MSB-first raster of the current bitmap.
    pub fn raster(&self) -> Vec<u8> {
        rasterize(&self.grid)
    }

    /// Write the packed raster bytes, and nothing else, to `path`.
    pub fn export_raster_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let data = self.raster();
        std::fs::write(path, &data)?;
        info!(path = %path.display(), bytes = data.len(), "Exported raster");
        Ok(())
    }

    /// Save the current bitmap as an ordinary image file.
    ///
    /// The container format follows the file extension.
    pub fn export_image(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        RgbaImage::from(&self.grid)
            .save(path)
            .map_err(|e| ImagingError::Encode(e.to_string()))?;
        info!(path = %path.display(), "Exported image");
        Ok(())
    }

    /// Encode the current bitmap as base64 text.
    ///
    /// An empty bitmap encodes to an empty string.
    pub fn to_base64(&self) -> Result<String> {
        if self.grid.is_empty() {
            return Ok(String::new());
        }
        let bytes = self.codec.encode(&self.grid)?;
        Ok(STANDARD.encode(bytes))
    }

    /// Replace the current bitmap with one decoded from base64 text.
    pub fn import_base64(&mut self, text: &str) -> Result<()> {
        let bytes = decode_base64(text)?;
        let grid = self.codec.decode(&bytes)?;
        self.set_image_data(grid);
        Ok(())
    }

    fn set_image_data(&mut self, grid: PixelGrid) {
        self.size = raster_size(&grid);
        self.grid = grid;
    }
}

impl fmt::Debug for PrinterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("size", &self.size)
            .field("inverted", &self.inverted)
            .finish_non_exhaustive()
    }
}

fn raster_size(grid: &PixelGrid) -> usize {
    bytes_per_row(grid.width()) * grid.height() as usize
}

fn decode_base64(text: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| ImagingError::Decode(format!("invalid base64: {e}")))
}
