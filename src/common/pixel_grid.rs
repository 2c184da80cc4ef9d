use crate::error::ImageDecodeError;
use image::{DynamicImage, RgbImage};
use std::sync::Arc;

/// Immutable H×W×3 RGB buffer handed to the analysis pipeline.
///
/// Cloning shares the underlying buffer. Both dimensions are guaranteed to be
/// non-zero.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    rgb: Arc<RgbImage>,
}

impl PixelGrid {
    pub fn new(rgb: RgbImage) -> Result<Self, ImageDecodeError> {
        let (width, height) = rgb.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageDecodeError::ZeroDimension { width, height });
        }
        Ok(Self { rgb: Arc::new(rgb) })
    }

    /// Build from a tightly packed RGB8 buffer.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ImageDecodeError> {
        if width == 0 || height == 0 {
            return Err(ImageDecodeError::ZeroDimension { width, height });
        }
        let expected = width as usize * height as usize * 3;
        let actual = pixels.len();
        let rgb = RgbImage::from_raw(width, height, pixels)
            .ok_or(ImageDecodeError::BufferMismatch { expected, actual })?;
        Self::new(rgb)
    }

    pub fn from_image(image: &DynamicImage) -> Result<Self, ImageDecodeError> {
        Self::new(image.to_rgb8())
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }
}
