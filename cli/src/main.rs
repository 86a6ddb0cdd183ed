//! Thermal raster command-line tool.
//!
//! Loads an image, resizes and dithers it, then writes any of: the packed
//! raster, a full ESC/POS job, a preview image, or base64 text.

mod args;
mod config;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use escpos::{Document, Section};
use thermal_image::{Algorithm, PrinterImage};

use args::Args;
use config::EnvDefaults;

/// Lines fed after the image so it clears the cutter.
const FEED_LINES: u8 = 4;

/// Load .env from multiple candidate paths.
fn load_dotenv() {
    let candidates = [".env", "../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::debug!("No .env file found, using system environment variables");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_algorithms {
        for algo in Algorithm::ALL {
            println!("{algo}");
        }
        return Ok(());
    }

    load_dotenv();
    run(&args)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let input = args.input.as_ref().context("no input image given")?;
    let options = EnvDefaults::load().merge(args);

    let mut image = PrinterImage::open(input)
        .with_context(|| format!("failed to load {}", input.display()))?;
    image
        .process(&options)
        .context("failed to process image")?;

    if let Some(path) = &args.raster_out {
        image
            .export_raster_file(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if let Some(path) = &args.escpos_out {
        let mut doc = Document::new();
        doc.push_image(&image)?
            .push(Section::Feed(FEED_LINES))
            .push(Section::Cut);
        std::fs::write(path, doc.build())
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote ESC/POS job");
    }

    if let Some(path) = &args.image_out {
        image
            .export_image(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if args.base64 {
        println!("{}", image.to_base64()?);
    }

    tracing::info!(
        width = image.width(),
        height = image.height(),
        size = image.size(),
        inverted = image.is_inverted(),
        "Done"
    );
    Ok(())
}
