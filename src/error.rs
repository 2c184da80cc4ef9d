use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Image Decode Error: {0}")]
    ImageDecode(#[from] ImageDecodeError),
    #[error("Configuration Error: {0}")]
    Config(String),
    #[error("Service Error: {0}")]
    Service(String),
    #[error("Analysis timed out")]
    Timeout,
}

// Image Decode Error Type
#[derive(Error, Debug)]
pub enum ImageDecodeError {
    #[error("No image provided")]
    EmptyPayload,
    #[error("Image payload is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error("Unsupported or corrupt image data: {0}")]
    UnsupportedFormat(#[from] image::ImageError),
    #[error("Image has a zero dimension ({width}x{height})")]
    ZeroDimension { width: u32, height: u32 },
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferMismatch { expected: usize, actual: usize },
    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}

// Recognition tier failures. These are absorbed by the recognition model and
// never reach the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecognitionError {
    #[error("Inference unavailable: {0}")]
    Unavailable(String),
    #[error("Inference failed: {0}")]
    Failure(String),
}
