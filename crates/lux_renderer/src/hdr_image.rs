//! High dynamic range raster and the tone mapping that turns it into an
//! 8-bit picture.

use std::path::Path;

use crate::{Color, RenderError, RenderResult};

/// Offset that keeps black pixels out of `log10(0)`.
const LUMINOSITY_DELTA: f32 = 1e-10;

/// Linear-light image, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct HdrImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl HdrImage {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    pub fn valid_coordinates(&self, col: u32, row: u32) -> bool {
        col < self.width && row < self.height
    }

    #[inline]
    fn pixel_offset(&self, col: u32, row: u32) -> usize {
        debug_assert!(self.valid_coordinates(col, row));
        (row * self.width + col) as usize
    }

    pub fn get(&self, col: u32, row: u32) -> Color {
        self.pixels[self.pixel_offset(col, row)]
    }

    pub fn set(&mut self, col: u32, row: u32, color: Color) {
        let offset = self.pixel_offset(col, row);
        self.pixels[offset] = color;
    }

    /// Logarithmic average of the pixel luminosities.
    pub fn average_luminosity(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .pixels
            .iter()
            .map(|pixel| (LUMINOSITY_DELTA + luminosity(*pixel)).log10())
            .sum();
        10f32.powf(sum / self.pixels.len() as f32)
    }

    /// Rescale so that the average luminosity maps to `factor`.
    ///
    /// Pass `None` to measure the luminosity from the image itself.
    pub fn normalize_image(&mut self, factor: f32, luminosity: Option<f32>) {
        let luminosity = luminosity.unwrap_or_else(|| self.average_luminosity());
        let scale = factor / luminosity;
        for pixel in &mut self.pixels {
            *pixel *= scale;
        }
    }

    /// Squash every channel into `[0, 1)` with `x / (1 + x)`.
    pub fn clamp_image(&mut self) {
        for pixel in &mut self.pixels {
            *pixel = *pixel / (Color::ONE + *pixel);
        }
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self, gamma: f32) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color, gamma));
        }
        bytes
    }

    /// Write an 8-bit PNG. The image should already be tone mapped.
    pub fn save_png(&self, path: impl AsRef<Path>, gamma: f32) -> RenderResult<()> {
        let bytes = self.to_rgba(gamma);
        let found = bytes.len();
        let buffer = image::RgbaImage::from_raw(self.width, self.height, bytes).ok_or(
            RenderError::BufferSize {
                width: self.width,
                height: self.height,
                found,
            },
        )?;
        buffer.save(path.as_ref())?;
        log::info!("Saved {}x{} image to {:?}", self.width, self.height, path.as_ref());
        Ok(())
    }

    /// Load any format the `image` crate decodes, as floating point RGB.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let decoded = image::open(path.as_ref())?.into_rgb32f();
        let (width, height) = decoded.dimensions();
        let pixels = decoded
            .pixels()
            .map(|p| Color::new(p[0], p[1], p[2]))
            .collect();
        log::debug!("Loaded {}x{} texture from {:?}", width, height, path.as_ref());
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Mean of the brightest and darkest channel.
#[inline]
pub fn luminosity(color: Color) -> f32 {
    (color.max_element() + color.min_element()) * 0.5
}

/// Convert a color to 8-bit RGBA, applying `1/gamma` and clamping to `[0, 1]`.
pub fn color_to_rgba(color: Color, gamma: f32) -> [u8; 4] {
    let encode = |c: f32| (255.0 * c.max(0.0).powf(1.0 / gamma).clamp(0.0, 1.0)) as u8;
    [encode(color.x), encode(color.y), encode(color.z), 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut image = HdrImage::new(7, 4);
        let color = Color::new(1.0, 2.0, 3.0);
        image.set(3, 2, color);

        assert_eq!(image.get(3, 2), color);
        assert_eq!(image.pixels[2 * 7 + 3], color);
        assert_eq!(image.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_valid_coordinates() {
        let image = HdrImage::new(7, 4);
        assert!(image.valid_coordinates(0, 0));
        assert!(image.valid_coordinates(6, 3));
        assert!(!image.valid_coordinates(7, 0));
        assert!(!image.valid_coordinates(0, 4));
    }

    #[test]
    fn test_average_luminosity() {
        let mut image = HdrImage::new(2, 1);
        image.set(0, 0, Color::new(5.0, 10.0, 15.0)); // luminosity 10
        image.set(1, 0, Color::new(500.0, 1000.0, 1500.0)); // luminosity 1000

        assert!((image.average_luminosity() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_normalize_image() {
        let mut image = HdrImage::new(2, 1);
        image.set(0, 0, Color::new(5.0, 10.0, 15.0));
        image.set(1, 0, Color::new(500.0, 1000.0, 1500.0));

        image.normalize_image(1000.0, Some(100.0));

        assert!(image.get(0, 0).abs_diff_eq(Color::new(50.0, 100.0, 150.0), 1e-3));
        assert!(image
            .get(1, 0)
            .abs_diff_eq(Color::new(5000.0, 10000.0, 15000.0), 1e-1));
    }

    #[test]
    fn test_clamp_image() {
        let mut image = HdrImage::new(2, 1);
        image.set(0, 0, Color::new(0.5e1, 1.0e1, 1.5e1));
        image.set(1, 0, Color::new(0.5e3, 1.0e3, 1.5e3));

        image.clamp_image();

        for pixel in &image.pixels {
            assert!(pixel.min_element() >= 0.0 && pixel.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Color::ZERO, 2.2), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Color::ONE, 2.2), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Color::splat(0.25), 2.0)[0], 127);
    }
}
