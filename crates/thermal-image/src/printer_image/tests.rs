use std::path::PathBuf;

use super::*;
use crate::pixel::Pixel;

/// Diagonal color gradient with a few translucent pixels.
fn create_test_grid(width: u32, height: u32) -> PixelGrid {
    let mut grid = PixelGrid::from_pixel(width, height, Pixel::WHITE);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(2).saturating_sub(1)) as u8;
            let g = (y * 255 / height.max(2).saturating_sub(1)) as u8;
            let b = ((x + y) % 256) as u8;
            let a = if (x + y) % 7 == 0 { 128 } else { 255 };
            grid.put(x, y, Pixel::new(a, r, g, b));
        }
    }
    grid
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("thermal-image-{}-{name}", std::process::id()))
}

#[test]
fn test_from_grid_reports_dimensions_and_size() {
    let img = PrinterImage::from_grid(create_test_grid(10, 3));
    assert_eq!((img.width(), img.height()), (10, 3));
    assert_eq!(img.bytes_per_row(), 2);
    assert_eq!(img.size(), 6);
    assert!(!img.is_inverted());
}

#[test]
fn test_dithering_yields_only_black_and_white_for_every_algorithm() {
    for algo in Algorithm::ALL {
        let mut img = PrinterImage::from_grid(create_test_grid(24, 16));
        img.apply_dithering(algo, 128).unwrap();
        for (i, px) in img.grid().pixels().iter().enumerate() {
            assert!(
                *px == Pixel::BLACK || *px == Pixel::WHITE,
                "{algo}: pixel {i} = {px:?}"
            );
        }
        assert_eq!(img.size(), 3 * 16, "{algo}: cached size");
    }
}

#[test]
fn test_dithering_is_deterministic() {
    let mut a = PrinterImage::from_grid(create_test_grid(16, 16));
    let mut b = PrinterImage::from_grid(create_test_grid(16, 16));
    a.apply_dithering(Algorithm::Stucki, 100).unwrap();
    b.apply_dithering(Algorithm::Stucki, 100).unwrap();
    assert_eq!(a.raster(), b.raster());
}

#[test]
fn test_resize_width_keeps_aspect_and_aligns() {
    let mut img = PrinterImage::from_grid(create_test_grid(50, 30));
    img.resize(100, 0, true).unwrap();
    assert_eq!(img.width(), 104);
    assert_eq!(img.height(), 64);
    assert_eq!(img.size(), 13 * 64);
}

#[test]
fn test_resize_height_keeps_aspect_and_aligns() {
    let mut img = PrinterImage::from_grid(create_test_grid(50, 30));
    img.resize(0, 60, true).unwrap();
    assert_eq!((img.width(), img.height()), (104, 64));
}

#[test]
fn test_resize_stretch_rounds_both() {
    let mut img = PrinterImage::from_grid(create_test_grid(60, 60));
    img.resize(60, 60, false).unwrap();
    assert_eq!((img.width(), img.height()), (64, 64));
}

#[test]
fn test_failed_resize_leaves_state_intact() {
    let grid = create_test_grid(20, 10);
    let mut img = PrinterImage::from_grid(grid.clone());
    assert!(matches!(img.resize(0, 0, true), Err(ImagingError::Dimension(_))));
    assert!(matches!(img.resize(20, 0, false), Err(ImagingError::Dimension(_))));
    assert_eq!(img.grid(), &grid);
    assert_eq!(img.size(), 3 * 10);
}

#[test]
fn test_oversized_resize_is_dimension_error() {
    let grid = create_test_grid(8, 8);
    let mut img = PrinterImage::from_grid(grid.clone());
    assert!(matches!(
        img.resize(u32::MAX, 8, false),
        Err(ImagingError::Dimension(_))
    ));
    let opts = ImageOptions::new().with_height(u32::MAX);
    assert!(matches!(img.process(&opts), Err(ImagingError::Dimension(_))));
    assert_eq!(img.grid(), &grid);
}

#[test]
fn test_inversion_twice_restores_colors() {
    let grid = create_test_grid(9, 7);
    let mut img = PrinterImage::from_grid(grid.clone());

    img.apply_color_inversion();
    assert!(img.is_inverted());
    for (before, after) in grid.pixels().iter().zip(img.grid().pixels()) {
        assert_eq!(after.a, before.a, "alpha must not change");
        assert_eq!(after.r, 255 - before.r);
    }

    img.apply_color_inversion();
    assert!(!img.is_inverted());
    assert_eq!(img.grid(), &grid);
}

#[test]
fn test_inverted_dither_flips_raster() {
    let mut img = PrinterImage::from_grid(PixelGrid::from_pixel(8, 1, Pixel::BLACK));
    img.apply_dithering(Algorithm::None, 128).unwrap();
    assert_eq!(img.raster(), vec![0xff]);
    img.apply_color_inversion();
    assert_eq!(img.raster(), vec![0x00]);
}

#[test]
fn test_base64_round_trip() {
    let mut img = PrinterImage::from_grid(create_test_grid(16, 8));
    img.apply_dithering(Algorithm::Atkinson, 128).unwrap();
    let text = img.to_base64().unwrap();
    assert!(!text.is_empty());

    let back = PrinterImage::from_base64(&text).unwrap();
    assert_eq!(back.grid(), img.grid());

    let mut other = PrinterImage::from_grid(PixelGrid::from_pixel(1, 1, Pixel::WHITE));
    other.import_base64(&text).unwrap();
    assert_eq!((other.width(), other.height()), (16, 8));
    assert_eq!(other.raster(), img.raster());
}

#[test]
fn test_base64_round_trip_keeps_translucent_pixels() {
    let img = PrinterImage::from_grid(create_test_grid(7, 5));
    let back = PrinterImage::from_base64(&img.to_base64().unwrap()).unwrap();
    assert_eq!(back.grid(), img.grid());
}

#[test]
fn test_empty_image_encodes_to_empty_string() {
    let img = PrinterImage::from_grid(PixelGrid::from_pixel(0, 0, Pixel::WHITE));
    assert_eq!(img.to_base64().unwrap(), "");
}

#[test]
fn test_import_invalid_base64_keeps_state() {
    let grid = create_test_grid(8, 8);
    let mut img = PrinterImage::from_grid(grid.clone());
    let err = img.import_base64("***not base64***").unwrap_err();
    assert!(matches!(err, ImagingError::Decode(_)));
    // Valid base64, but not an image.
    let err = img.import_base64("aGVsbG8gd29ybGQ=").unwrap_err();
    assert!(matches!(err, ImagingError::Decode(_)));
    assert_eq!(img.grid(), &grid);
}

#[test]
fn test_open_missing_file_is_decode_error() {
    let err = PrinterImage::open(temp_path("does-not-exist.png")).unwrap_err();
    assert!(matches!(err, ImagingError::Decode(_)));
    let err = PrinterImage::open("").unwrap_err();
    assert!(matches!(err, ImagingError::Decode(_)));
}

#[test]
fn test_export_raster_file_contains_only_raster() {
    let mut img = PrinterImage::from_grid(create_test_grid(12, 4));
    img.apply_dithering(Algorithm::FloydSteinberg, 128).unwrap();
    let path = temp_path("raster.bin");
    img.export_raster_file(&path).unwrap();
    let written = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(written, img.raster());
    assert_eq!(written.len(), img.size());
}

#[test]
fn test_export_image_then_open() {
    let mut img = PrinterImage::from_grid(create_test_grid(16, 16));
    img.apply_dithering(Algorithm::Burkes, 128).unwrap();
    let path = temp_path("preview.png");
    img.export_image(&path).unwrap();
    let reopened = PrinterImage::open(&path);
    std::fs::remove_file(&path).ok();
    assert_eq!(reopened.unwrap().grid(), img.grid());
}

#[test]
fn test_process_runs_full_pipeline() {
    let mut img = PrinterImage::from_grid(create_test_grid(50, 30));
    let opts = ImageOptions::new()
        .with_algorithm(Algorithm::SierraLite)
        .with_width(40)
        .with_invert(true);
    img.process(&opts).unwrap();
    assert_eq!((img.width(), img.height()), (40, 24));
    assert!(img.is_inverted());
    assert!(
        img.grid()
            .pixels()
            .iter()
            .all(|&p| p == Pixel::BLACK || p == Pixel::WHITE)
    );
    assert_eq!(img.raster().len(), 5 * 24);
}

#[test]
fn test_process_rejects_bad_dimensions_without_changes() {
    let grid = create_test_grid(10, 10);
    let mut img = PrinterImage::from_grid(grid.clone());
    let opts = ImageOptions::new()
        .with_width(16)
        .with_maintain_aspect_ratio(false);
    assert!(matches!(img.process(&opts), Err(ImagingError::Dimension(_))));
    assert_eq!(img.grid(), &grid);
}

#[test]
fn test_custom_codec_is_used_for_base64() {
    struct FixedCodec;

    impl ImageCodec for FixedCodec {
        fn decode(&self, _bytes: &[u8]) -> Result<PixelGrid> {
            Ok(PixelGrid::from_pixel(8, 1, Pixel::BLACK))
        }

        fn encode(&self, _grid: &PixelGrid) -> Result<Vec<u8>> {
            Ok(b"fixed".to_vec())
        }
    }

    let mut img = PrinterImage::with_codec(
        PixelGrid::from_pixel(2, 2, Pixel::WHITE),
        Box::new(FixedCodec),
    );
    assert_eq!(img.to_base64().unwrap(), "Zml4ZWQ=");
    img.import_base64("Zml4ZWQ=").unwrap();
    assert_eq!(img.raster(), vec![0xff]);
}
