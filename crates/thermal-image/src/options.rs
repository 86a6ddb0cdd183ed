//! Processing options for preparing a printer image.
//!
//! These options describe the full pipeline run by
//! [`PrinterImage::process`](crate::PrinterImage::process): optional resize,
//! dithering and optional inversion.

use serde::{Deserialize, Serialize};

use crate::DEFAULT_THRESHOLD;
use crate::algorithms::Algorithm;

/// Configuration options for thermal printer image preparation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Dithering algorithm to apply.
    pub algorithm: Algorithm,

    /// Luma cutoff; darker pixels become black.
    pub threshold: u8,

    /// Target width in pixels (0 = derive or keep).
    pub width: u32,

    /// Target height in pixels (0 = derive or keep).
    pub height: u32,

    /// Scale the unset dimension proportionally.
    pub maintain_aspect_ratio: bool,

    /// Invert the color channels after dithering.
    pub invert: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::FloydSteinberg,
            threshold: DEFAULT_THRESHOLD,
            width: 0,
            height: 0,
            maintain_aspect_ratio: true,
            invert: false,
        }
    }
}

impl ImageOptions {
    /// Create options with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set dithering algorithm.
    pub fn with_algorithm(mut self, val: Algorithm) -> Self {
        self.algorithm = val;
        self
    }

    /// Builder: set black/white threshold.
    pub fn with_threshold(mut self, val: u8) -> Self {
        self.threshold = val;
        self
    }

    /// Builder: set target width.
    pub fn with_width(mut self, val: u32) -> Self {
        self.width = val;
        self
    }

    /// Builder: set target height.
    pub fn with_height(mut self, val: u32) -> Self {
        self.height = val;
        self
    }

    /// Builder: set aspect-ratio flag.
    pub fn with_maintain_aspect_ratio(mut self, val: bool) -> Self {
        self.maintain_aspect_ratio = val;
        self
    }

    /// Builder: set invert flag.
    pub fn with_invert(mut self, val: bool) -> Self {
        self.invert = val;
        self
    }

    /// Whether a resize step is requested at all.
    pub fn wants_resize(&self) -> bool {
        self.width > 0 || self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ImageOptions::default();
        assert_eq!(opts.algorithm, Algorithm::FloydSteinberg);
        assert_eq!(opts.threshold, 128);
        assert!(opts.maintain_aspect_ratio);
        assert!(!opts.invert);
        assert!(!opts.wants_resize());
    }

    #[test]
    fn test_builder_chain() {
        let opts = ImageOptions::new()
            .with_algorithm(Algorithm::Atkinson)
            .with_threshold(90)
            .with_width(384)
            .with_height(200)
            .with_maintain_aspect_ratio(false)
            .with_invert(true);

        assert_eq!(opts.algorithm, Algorithm::Atkinson);
        assert_eq!(opts.threshold, 90);
        assert_eq!((opts.width, opts.height), (384, 200));
        assert!(!opts.maintain_aspect_ratio);
        assert!(opts.invert);
        assert!(opts.wants_resize());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let opts: ImageOptions =
            serde_json::from_str(r#"{"algorithm":"stucki","width":384}"#).unwrap();
        assert_eq!(opts.algorithm, Algorithm::Stucki);
        assert_eq!(opts.width, 384);
        assert_eq!(opts.threshold, 128);
    }
}
