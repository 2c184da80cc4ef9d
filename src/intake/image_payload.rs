use crate::common::PixelGrid;
use crate::error::ImageDecodeError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Image as submitted by a caller, before decoding.
#[derive(Debug, Clone)]
pub enum ImagePayload {
    /// Base64 text, optionally prefixed with a `data:image/...;base64,` header.
    Base64(String),
    /// Encoded file bytes (PNG, JPEG, ...).
    Bytes(Vec<u8>),
    /// Already decoded pixels.
    Pixels(PixelGrid),
}

impl ImagePayload {
    pub fn decode(self) -> Result<PixelGrid, ImageDecodeError> {
        match self {
            ImagePayload::Base64(text) => decode_bytes(&decode_base64(&text)?),
            ImagePayload::Bytes(bytes) => decode_bytes(&bytes),
            ImagePayload::Pixels(grid) => Ok(grid),
        }
    }
}

fn decode_base64(text: &str) -> Result<Vec<u8>, ImageDecodeError> {
    let trimmed = text.trim();
    let body = if trimmed.starts_with("data:image") {
        trimmed
            .split_once(',')
            .map(|(_, body)| body)
            .ok_or(ImageDecodeError::EmptyPayload)?
    } else {
        trimmed
    };
    if body.is_empty() {
        return Err(ImageDecodeError::EmptyPayload);
    }
    Ok(STANDARD.decode(body)?)
}

fn decode_bytes(bytes: &[u8]) -> Result<PixelGrid, ImageDecodeError> {
    if bytes.is_empty() {
        return Err(ImageDecodeError::EmptyPayload);
    }
    // Any colour mode (grey, RGBA, 16-bit) is normalised to RGB8 here.
    let image = image::load_from_memory(bytes)?;
    PixelGrid::from_image(&image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, Rgb};
    use std::io::Cursor;

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_decode_data_uri() {
        let bytes = png_bytes(DynamicImage::ImageRgb8(ImageBuffer::from_pixel(
            4,
            3,
            Rgb([200, 10, 10]),
        )));
        let payload = format!("data:image/png;base64,{}", STANDARD.encode(bytes));
        let grid = ImagePayload::Base64(payload).decode().unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert_eq!(grid.rgb().get_pixel(0, 0).0, [200, 10, 10]);
    }

    #[test]
    fn test_grayscale_normalised_to_rgb() {
        let bytes = png_bytes(DynamicImage::ImageLuma8(ImageBuffer::from_pixel(
            2,
            2,
            Luma([77u8]),
        )));
        let grid = ImagePayload::Bytes(bytes).decode().unwrap();
        assert_eq!(grid.rgb().get_pixel(1, 1).0, [77, 77, 77]);
    }

    #[test]
    fn test_empty_payloads_rejected() {
        assert!(matches!(
            ImagePayload::Base64(String::new()).decode(),
            Err(ImageDecodeError::EmptyPayload)
        ));
        assert!(matches!(
            ImagePayload::Base64("data:image/png;base64,".to_string()).decode(),
            Err(ImageDecodeError::EmptyPayload)
        ));
        assert!(matches!(
            ImagePayload::Bytes(Vec::new()).decode(),
            Err(ImageDecodeError::EmptyPayload)
        ));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let result = ImagePayload::Base64("not base64 !!".to_string()).decode();
        assert!(matches!(result, Err(ImageDecodeError::InvalidBase64(_))));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let result = ImagePayload::Bytes(vec![1, 2, 3, 4, 5]).decode();
        assert!(matches!(result, Err(ImageDecodeError::UnsupportedFormat(_))));
    }
}
