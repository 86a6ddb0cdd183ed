//! Error-diffusion dithering for converting color images to black-and-white.
//!
//! One engine serves every algorithm; the algorithms differ only in the
//! coefficient matrix, divisor and arithmetic mode handed to [`DitherMatrix`].
//! See [`crate::algorithms`] for the table.

use tracing::debug;

use crate::grayscale::binarize;
use crate::grid::PixelGrid;
use crate::pixel::Pixel;
use crate::{ImagingError, Result};

/// Error-diffusion kernel: coefficients, divisor and anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitherMatrix {
    rows: usize,
    cols: usize,
    coefficients: Vec<u8>,
    divisor: u32,
    shift: bool,
    anchor: isize,
}

impl DitherMatrix {
    /// Build a matrix from its rows.
    ///
    /// With `shift` set, `divisor` is a right-shift count instead of a true
    /// divisor. Fails when the matrix is empty or ragged, or the divisor is 0.
    pub fn new(rows: &[&[u8]], divisor: u32, shift: bool) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.len());
        if rows.is_empty() || cols == 0 {
            return Err(ImagingError::Configuration(
                "dither matrix must not be empty".into(),
            ));
        }
        if rows.iter().any(|r| r.len() != cols) {
            return Err(ImagingError::Configuration(
                "dither matrix rows must all have the same length".into(),
            ));
        }
        if divisor == 0 {
            return Err(ImagingError::Configuration(
                "divisor must be non-zero".into(),
            ));
        }
        if divisor > i32::MAX as u32 {
            return Err(ImagingError::Configuration(format!(
                "divisor {divisor} is out of range"
            )));
        }
        // Shifting an i32 by 32 or more overflows.
        if shift && divisor >= 32 {
            return Err(ImagingError::Configuration(format!(
                "shift count {divisor} is out of range"
            )));
        }

        // The first non-zero coefficient of row 0 sits just right of the
        // current pixel.
        let anchor = rows[0]
            .iter()
            .position(|&c| c != 0)
            .map_or(0, |i| i as isize - 1);

        Ok(Self {
            rows: rows.len(),
            cols,
            coefficients: rows.concat(),
            divisor,
            shift,
            anchor,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    pub fn is_shift(&self) -> bool {
        self.shift
    }

    /// Column offset aligning the matrix over the current pixel.
    pub fn anchor(&self) -> isize {
        self.anchor
    }

    /// Coefficient at `(row, col)`.
    pub fn coefficient(&self, row: usize, col: usize) -> u8 {
        self.coefficients[row * self.cols + col]
    }

    /// True when no coefficient is set, i.e. plain thresholding.
    pub fn is_degenerate(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0)
    }

    /// Scale a channel error by one coefficient.
    fn spread(&self, error: i32, coefficient: i32) -> i32 {
        if self.shift {
            (error * coefficient) >> self.divisor
        } else {
            (error * coefficient) / self.divisor as i32
        }
    }
}

/// Applies a [`DitherMatrix`] at a fixed black/white threshold.
#[derive(Debug, Clone)]
pub struct Ditherer {
    matrix: DitherMatrix,
    threshold: u8,
}

impl Ditherer {
    pub fn new(matrix: DitherMatrix, threshold: u8) -> Self {
        Self { matrix, threshold }
    }

    pub fn matrix(&self) -> &DitherMatrix {
        &self.matrix
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Produce a dithered copy of `input`.
    ///
    /// Every pixel of the result is opaque black or opaque white.
    pub fn generate_dithered(&self, input: &PixelGrid) -> PixelGrid {
        let (width, height) = input.dimensions();
        debug!(
            width,
            height,
            threshold = self.threshold,
            rows = self.matrix.rows,
            cols = self.matrix.cols,
            "Applying error-diffusion dithering"
        );

        if self.matrix.is_degenerate() {
            return input.map(|px| opaque(binarize(px, self.threshold)));
        }

        let mut work = input.clone();
        let width = width as usize;
        let height = height as usize;
        let pixels = work.pixels_mut();

        for y in 0..height {
            for x in 0..width {
                let index = y * width + x;
                let colored = pixels[index];
                let grayed = binarize(colored, self.threshold);
                pixels[index] = grayed;

                self.diffuse(pixels, colored, grayed, x, y, width, height);
            }
        }

        let output = work.map(opaque);
        debug!("Dithering complete");
        output
    }

    /// Push the quantization error of `(x, y)` onto its neighbours.
    #[allow(clippy::too_many_arguments)]
    fn diffuse(
        &self,
        pixels: &mut [Pixel],
        colored: Pixel,
        grayed: Pixel,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) {
        let red_error = i32::from(colored.r) - i32::from(grayed.r);
        let green_error = i32::from(colored.g) - i32::from(grayed.g);
        let blue_error = i32::from(colored.b) - i32::from(grayed.b);

        let m = &self.matrix;
        for row in 0..m.rows {
            let ypos = y + row;
            for col in 0..m.cols {
                let coefficient = i32::from(m.coefficient(row, col));
                let xpos = x as isize + (col as isize - m.anchor);

                // The first row and first column never receive error.
                if coefficient == 0
                    || xpos <= 0
                    || xpos as usize >= width
                    || ypos == 0
                    || ypos >= height
                {
                    continue;
                }

                let offset = ypos * width + xpos as usize;
                let target = &mut pixels[offset];
                target.r = saturate(i32::from(target.r) + m.spread(red_error, coefficient));
                target.g = saturate(i32::from(target.g) + m.spread(green_error, coefficient));
                target.b = saturate(i32::from(target.b) + m.spread(blue_error, coefficient));
            }
        }
    }
}

fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

fn opaque(px: Pixel) -> Pixel {
    Pixel { a: 255, ..px }
}
