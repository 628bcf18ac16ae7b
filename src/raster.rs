//! Read-only raster image handed to the extraction core.
//!
//! Decoding happens outside the core; callers build a `RasterImage` from an
//! already-decoded buffer and pass it by reference into every core call.

use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};

/// Immutable RGBA pixel grid, row-major, origin top-left.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pixels: RgbaImage,
}

impl RasterImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Converts any decoded image to 8-bit RGBA.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        Self::new(img.to_rgba8())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns the RGB channels at (x, y), or `None` outside the image.
    pub fn rgb(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixels
            .get_pixel_checked(x, y)
            .map(|Rgba([r, g, b, _])| [*r, *g, *b])
    }

    /// Borrow of the underlying buffer, for rendering collaborators.
    pub fn as_buffer(&self) -> &ImageBuffer<Rgba<u8>, Vec<u8>> {
        &self.pixels
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(pixels: RgbaImage) -> Self {
        Self::new(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_ignores_alpha() {
        let img: RgbaImage = ImageBuffer::from_fn(4, 2, |x, y| Rgba([x as u8, y as u8, 7, 0]));
        let raster = RasterImage::new(img);

        assert_eq!(raster.width(), 4);
        assert_eq!(raster.height(), 2);
        assert_eq!(raster.rgb(3, 1), Some([3, 1, 7]));
    }

    #[test]
    fn test_rgb_out_of_bounds() {
        let raster = RasterImage::new(ImageBuffer::new(4, 2));
        assert_eq!(raster.rgb(4, 0), None);
        assert_eq!(raster.rgb(0, 2), None);
    }

    #[test]
    fn test_from_dynamic_converts_rgb8() {
        let rgb = image::RgbImage::from_pixel(2, 2, image::Rgb([10, 20, 30]));
        let raster = RasterImage::from_dynamic(DynamicImage::ImageRgb8(rgb));
        assert_eq!(raster.rgb(1, 1), Some([10, 20, 30]));
    }
}
