//! Monochrome raster preparation for thermal print heads.
//!
//! Converts arbitrary color bitmaps into the bit-packed, MSB-first raster
//! layout a thermal printer expects: decode, resize to byte-aligned
//! dimensions, error-diffusion dithering, optional inversion and packing.

pub mod algorithms;
pub mod codec;
pub mod dither;
pub mod grayscale;
pub mod grid;
pub mod options;
pub mod pixel;
pub mod printer_image;
pub mod raster;
pub mod resize;

// Re-exports for convenience
pub use algorithms::Algorithm;
pub use codec::{ImageCodec, ImageCrateCodec};
pub use dither::{DitherMatrix, Ditherer};
pub use grid::PixelGrid;
pub use options::ImageOptions;
pub use pixel::Pixel;
pub use printer_image::PrinterImage;
pub use raster::{bytes_per_row, rasterize};

/// Default black/white cutoff used when no threshold is configured.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Print-head byte alignment applied to resized dimensions.
pub const BYTE_ALIGNMENT: u32 = 8;

/// Errors that can occur while preparing a printer image.
#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Invalid dimensions: {0}")]
    Dimension(String),

    #[error("Invalid dither configuration: {0}")]
    Configuration(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for thermal-image operations.
pub type Result<T> = std::result::Result<T, ImagingError>;
