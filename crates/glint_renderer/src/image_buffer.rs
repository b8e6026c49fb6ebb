//! Pixel buffer for render output.

use std::path::Path;

use crate::material::Color;

/// A width x height grid of colors, written once per pixel during render.
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Mutable access to the raw pixel storage, row-major. Used by the
    /// renderer to split the image into per-row slices for parallel fill.
    pub(crate) fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Serialize as an 8-bit-per-channel PNG file.
    ///
    /// Pixels are expected to be clamped to [0, 1] already; out-of-range
    /// values are saturated rather than wrapped.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        let mut out = image::RgbImage::new(self.width, self.height);
        for (x, y, pixel) in out.enumerate_pixels_mut() {
            let color = self.get(x, y);
            *pixel = image::Rgb([to_byte(color.x), to_byte(color.y), to_byte(color.z)]);
        }
        out.save(path)
    }
}

/// Quantize a [0, 1] channel to 8 bits.
#[inline]
fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
