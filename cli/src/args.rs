//! Command-line argument definitions

use clap::Parser;
use std::path::PathBuf;

use thermal_image::Algorithm;

#[derive(Parser, Debug)]
#[command(
    name = "thermal-raster",
    version,
    about = "Prepare images for thermal printers: resize, dither, pack to raster"
)]
pub struct Args {
    /// Input image file
    #[arg(required_unless_present = "list_algorithms")]
    pub input: Option<PathBuf>,

    /// Target width in pixels (rounded up to a multiple of 8)
    #[arg(long)]
    pub width: Option<u32>,

    /// Target height in pixels (rounded up to a multiple of 8)
    #[arg(long)]
    pub height: Option<u32>,

    /// Use both --width and --height as given instead of keeping the aspect ratio
    #[arg(long)]
    pub stretch: bool,

    /// Dithering algorithm (see --list-algorithms)
    #[arg(long)]
    pub algorithm: Option<Algorithm>,

    /// Luma threshold below which a pixel prints black
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Invert colors after dithering
    #[arg(long)]
    pub invert: bool,

    /// Do not invert, even when THERMAL_INVERT is set
    #[arg(long, conflicts_with = "invert")]
    pub no_invert: bool,

    /// Write packed raster bytes to this file
    #[arg(long)]
    pub raster_out: Option<PathBuf>,

    /// Write a complete ESC/POS job (init, raster, feed, cut) to this file
    #[arg(long)]
    pub escpos_out: Option<PathBuf>,

    /// Write the processed image (format from extension)
    #[arg(long)]
    pub image_out: Option<PathBuf>,

    /// Print the processed image as base64 on stdout
    #[arg(long)]
    pub base64: bool,

    /// List available dithering algorithms and exit
    #[arg(long)]
    pub list_algorithms: bool,
}
