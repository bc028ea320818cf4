//! Decoded raster images.
//!
//! The raster pass only needs per-pixel RGB access. [`PixelBuffer`] is the
//! owned, row-major implementation filled from an image file; tests and
//! upstream renderers can provide their own [`RasterImage`].

use crate::error::{RasterError, RasterResult};
use image::DynamicImage;
use std::path::Path;
use tracing::debug;

/// One 8-bit RGB pixel
pub type Rgb8 = [u8; 3];

/// Read access to a decoded raster image
pub trait RasterImage {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Pixel at column `x`, row `y` (row 0 is the top of the page)
    fn get_pixel(&self, x: usize, y: usize) -> Rgb8;
}

/// Owned RGB image stored row by row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb8>,
}

impl PixelBuffer {
    /// All-white image
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[255, 255, 255]; width * height],
        }
    }

    /// Image computed pixel by pixel
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Rgb8,
    {
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Load and decode an image file.
    ///
    /// Only 8-bit RGB images are accepted; the page renderer is expected
    /// to produce exactly that.
    pub fn from_file<P: AsRef<Path>>(path: P) -> RasterResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(RasterError::NotFound(path.to_path_buf()));
        }
        let img = image::open(path)?;
        debug!(
            "decoded {} ({}x{}, {:?})",
            path.display(),
            img.width(),
            img.height(),
            img.color()
        );
        Self::from_image(img)
    }

    /// Take over the pixels of a decoded image
    pub fn from_image(img: DynamicImage) -> RasterResult<Self> {
        match img {
            DynamicImage::ImageRgb8(rgb) => {
                let width = rgb.width() as usize;
                let height = rgb.height() as usize;
                let pixels = rgb.pixels().map(|p| p.0).collect();
                Ok(Self {
                    width,
                    height,
                    pixels,
                })
            }
            other => Err(RasterError::UnsupportedLayout(format!(
                "{:?}, expected Rgb8",
                other.color()
            ))),
        }
    }

    /// Overwrite one pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: usize, y: usize, rgb: Rgb8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = rgb;
        }
    }

    /// One row of pixels
    pub fn row(&self, y: usize) -> &[Rgb8] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }
}

impl RasterImage for PixelBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_pixel(&self, x: usize, y: usize) -> Rgb8 {
        self.pixels[y * self.width + x]
    }
}
