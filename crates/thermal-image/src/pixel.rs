//! Four-channel color unit used throughout the pipeline.

/// A single ARGB pixel. Plain value type, copied freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    /// Opaque black, the "dot on" value.
    pub const BLACK: Pixel = Pixel::new(255, 0, 0, 0);

    /// Opaque white, the "dot off" value.
    pub const WHITE: Pixel = Pixel::new(255, 255, 255, 255);

    /// Create a pixel from channels in ARGB order.
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Create a fully opaque pixel.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(255, r, g, b)
    }

    /// Build from an `[r, g, b, a]` quadruple as stored by `image::Rgba`.
    pub const fn from_rgba(rgba: [u8; 4]) -> Self {
        Self::new(rgba[3], rgba[0], rgba[1], rgba[2])
    }

    /// Channels in `[r, g, b, a]` order.
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Complement the color channels; alpha is left alone.
    pub const fn inverted(self) -> Self {
        Self::new(self.a, 255 - self.r, 255 - self.g, 255 - self.b)
    }

    /// Whether the rasterizer prints a dot for this pixel.
    ///
    /// The mean of alpha, red and green must be exactly 255 for the pixel to
    /// count as white. Blue does not take part in this test.
    pub fn is_dark(self) -> bool {
        let mean = (u16::from(self.a) + u16::from(self.r) + u16::from(self.g)) / 3;
        mean != 255
    }
}

impl From<image::Rgba<u8>> for Pixel {
    fn from(px: image::Rgba<u8>) -> Self {
        Self::from_rgba(px.0)
    }
}

impl From<Pixel> for image::Rgba<u8> {
    fn from(px: Pixel) -> Self {
        image::Rgba(px.to_rgba())
    }
}
